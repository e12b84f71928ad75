use core::{fmt, mem, str};

/**
A single, raw token passed in from the command line.

This type is used both for the names of flags and for the tokens themselves.
For instance, given `-target foo --path=bar input.txt`, `target`, `foo`,
`path`, `bar`, and `input.txt` would all be passed as [`Arg`] values to the
relevant [`Visitor`][crate::Visitor] methods.

An [`Arg`] internally is just a byte slice. Callers can turn it into a
[`str`] with [`as_str`][Arg::as_str] and parse it however they need.
*/
#[derive(Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct Arg([u8]);

impl Arg {
    pub const fn new(bytes: &[u8]) -> &Self {
        // SAFETY: Arg is repr transparent to a byte slice, so it's safe to
        // transmute into it.
        unsafe { mem::transmute(bytes) }
    }

    pub const fn bytes(&self) -> &[u8] {
        &self.0
    }

    /// Get this argument as a `str`, if it's valid UTF-8.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        str::from_utf8(&self.0).ok()
    }

    /// True if this token looks like a flag, which is to say that it begins
    /// with a `-`. A lone `-` counts.
    #[inline]
    pub fn is_flag_like(&self) -> bool {
        self.0.first() == Some(&b'-')
    }
}

impl PartialEq<[u8]> for Arg {
    fn eq(&self, other: &[u8]) -> bool {
        self.0 == *other
    }
}

impl PartialEq<&[u8]> for Arg {
    fn eq(&self, other: &&[u8]) -> bool {
        self.0 == **other
    }
}

impl PartialEq<str> for Arg {
    fn eq(&self, other: &str) -> bool {
        self.0 == *other.as_bytes()
    }
}

impl PartialEq<&str> for Arg {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other.as_bytes()
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Some(s) => write!(f, "{s:?}"),
            None => write!(f, "{:?}", &self.0),
        }
    }
}
