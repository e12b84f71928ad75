use crate::Arg;

/**
The tokens of a single command level, partitioned around the first token that
looks like a flag.

Everything before that token is a candidate sub-command path (or plain
positional arguments); everything from that token on is the flag-bearing
segment. The flag-bearing segment may still contain positional arguments,
because flag parsing stops at the first token that isn't a flag.
*/
#[derive(Debug)]
pub struct Split<'a, T> {
    pub positional: &'a [T],
    pub flags: &'a [T],
}

impl<T> Clone for Split<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Split<'_, T> {}

impl<'a, T> Split<'a, T> {
    /// True if no token in this level looks like a flag
    #[inline]
    #[must_use]
    pub fn is_flagless(&self) -> bool {
        self.flags.is_empty()
    }

    /// The first positional token, if any. This is the token that gets
    /// checked against the sub-command names.
    #[inline]
    #[must_use]
    pub fn head(&self) -> Option<&'a T> {
        self.positional.first()
    }
}

/**
Partition `tokens` at the first token whose first byte is `-`. `tokens` should
exclude the name of the command itself.

If no token looks like a flag, the whole list is positional and the flag
segment is empty.
*/
pub fn split_at_first_flag<T: AsRef<[u8]>>(tokens: &[T]) -> Split<'_, T> {
    let index = tokens
        .iter()
        .position(|token| Arg::new(token.as_ref()).is_flag_like())
        .unwrap_or(tokens.len());

    let (positional, flags) = tokens.split_at(index);

    Split { positional, flags }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_are_the_suffix_from_the_first_dash() {
        let tokens = ["leaf", "extra", "--flag", "x", "more", "-y"];
        let split = split_at_first_flag(&tokens);

        assert_eq!(split.positional, ["leaf", "extra"]);
        assert_eq!(split.flags, ["--flag", "x", "more", "-y"]);
        assert_eq!(split.head(), Some(&"leaf"));
    }

    #[test]
    fn no_flags_means_everything_is_positional() {
        let tokens = ["a", "b", "c"];
        let split = split_at_first_flag(&tokens);

        assert!(split.is_flagless());
        assert_eq!(split.positional, tokens);
    }

    #[test]
    fn leading_flag_means_nothing_is_positional() {
        let tokens = ["-v", "sub"];
        let split = split_at_first_flag(&tokens);

        assert!(split.positional.is_empty());
        assert_eq!(split.head(), None);
        assert_eq!(split.flags, tokens);
    }

    #[test]
    fn lone_dash_and_terminator_count_as_flag_like() {
        let split = split_at_first_flag(&["a", "-", "b"]);
        assert_eq!(split.flags, ["-", "b"]);

        let split = split_at_first_flag(&["a", "--", "-b"]);
        assert_eq!(split.flags, ["--", "-b"]);
    }

    #[test]
    fn empty_input() {
        let tokens: [&str; 0] = [];
        let split = split_at_first_flag(&tokens);

        assert!(split.positional.is_empty());
        assert!(split.is_flagless());
    }
}
