#![no_std]

/*!
Low-level implementation of command-line token handling. Takes care of telling
flags apart from positional arguments, splitting `-name=value`, and locating
the boundary between a command's sub-command path and its flags. No type
handling happens here. Usually this is too low level to use directly.

The grammar is the single-dash one: `-name` and `--name` are equivalent, and
a flag name is always a whole word (there is no clustering of single-letter
flags). Flag parsing stops at the first positional argument, or after a
literal `--`.
*/

mod arg;
mod split;

use core::marker::PhantomData;

pub use arg::Arg;
pub use split::{Split, split_at_first_flag};

/**
The [`ArgumentsParser`] type operates by passing the tokens it finds into a
[`Visitor`], to be handled.
 */
pub trait Visitor<'arg> {
    type Value;

    /// A positional argument. After the first positional argument, every
    /// remaining token is positional.
    fn visit_positional(self, argument: &'arg Arg) -> Self::Value;

    /// A flag that definitely has an argument, because it was given as
    /// `-option=argument` or `--option=argument`
    fn visit_option(self, option: &'arg Arg, argument: &'arg Arg) -> Self::Value;

    /// A flag such as `-flag` or `--flag`. If the flag needs a value, it can
    /// take the next token with `arg`.
    fn visit_flag(self, option: &'arg Arg, arg: impl ArgAccess<'arg>) -> Self::Value;

    /// A token that starts with a `-` but isn't a well-formed flag, such as
    /// `---flag` or `-=value`
    fn visit_malformed(self, token: &'arg Arg) -> Self::Value;
}

/**
[`ArgAccess`] allows a visitor to decide if a given flag needs a value, based
on the identity of the flag.

Consider `-verbose file.txt`. Is this a boolean flag followed by a positional
argument, or an option with the value `file.txt`? The [`ArgumentsParser`]
can't independently classify it, so a visitor requests the next token through
this trait only for flags that need one.
*/
pub trait ArgAccess<'arg>: Sized {
    /**
    Take the next token from the parser as this flag's value. Flags that
    don't take values should simply ignore this, so that the next token is
    parsed independently.

    The next token is taken verbatim, even if it looks like a flag. This
    returns [`None`] if the tokens have been exhausted.
    */
    fn take(self) -> Option<&'arg Arg>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ready,
    PositionalOnly,
}

/**
An `ArgumentsParser` is the main entry point into `herald_parser`. It parses
one token in each call to `next_arg`, sending it to the given [`Visitor`].

[herald-parser][crate] operates entirely on borrowed data; the `'arg`
lifetime refers to the borrowed command line tokens.
*/
#[derive(Debug, Clone)]
pub struct ArgumentsParser<'arg, I> {
    state: State,
    args: I,
    phantom: PhantomData<&'arg Arg>,
}

impl<'arg, I> ArgumentsParser<'arg, I>
where
    I: Iterator<Item = &'arg [u8]>,
{
    /**
    Create a new [`ArgumentsParser`] from an iterator of byte slices, where
    each byte slice is a single token. This list should *exclude* the name of
    the command.
     */
    #[inline]
    #[must_use]
    pub fn new(args: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            state: State::Ready,
            args: args.into_iter(),
            phantom: PhantomData,
        }
    }

    /// True once the parser has stopped looking for flags
    #[inline]
    #[must_use]
    pub fn is_positional_only(&self) -> bool {
        self.state == State::PositionalOnly
    }

    /// Put `self` into a `PositionalOnly` state, then process a positional
    /// argument
    #[inline]
    fn positional_only_arg<V>(&mut self, visitor: V) -> Option<V::Value>
    where
        V: Visitor<'arg>,
    {
        self.state = State::PositionalOnly;
        self.args
            .next()
            .map(Arg::new)
            .map(|arg| visitor.visit_positional(arg))
    }

    /// Handle a token that begins with a `-` and has at least one more byte
    fn handle_flag<V>(&mut self, token: &'arg [u8], body: &'arg [u8], visitor: V) -> V::Value
    where
        V: Visitor<'arg>,
    {
        // `--name` is the same as `-name`
        let name = match body {
            [b'-', name @ ..] => name,
            name => name,
        };

        match name {
            [] | [b'-', ..] | [b'=', ..] => visitor.visit_malformed(Arg::new(token)),
            name => match split_once(name, b'=') {
                Some((option, argument)) => {
                    visitor.visit_option(Arg::new(option), Arg::new(argument))
                }
                None => visitor.visit_flag(Arg::new(name), StandardArgAccess { parent: self }),
            },
        }
    }

    pub fn next_arg<V>(&mut self, visitor: V) -> Option<V::Value>
    where
        V: Visitor<'arg>,
    {
        match self.state {
            State::Ready => {
                let token = self.args.next()?;

                match token {
                    b"--" => self.positional_only_arg(visitor),
                    [b'-', body @ ..] if !body.is_empty() => {
                        Some(self.handle_flag(token, body, visitor))
                    }
                    positional => {
                        self.state = State::PositionalOnly;
                        Some(visitor.visit_positional(Arg::new(positional)))
                    }
                }
            }
            State::PositionalOnly => self.positional_only_arg(visitor),
        }
    }
}

/// ArgAccess implementation that gets the next token from the list.
struct StandardArgAccess<'a, 'arg, I> {
    parent: &'a mut ArgumentsParser<'arg, I>,
}

impl<'arg, I> ArgAccess<'arg> for StandardArgAccess<'_, 'arg, I>
where
    I: Iterator<Item = &'arg [u8]>,
{
    fn take(self) -> Option<&'arg Arg> {
        self.parent.args.next().map(Arg::new)
    }
}

fn split_once(input: &[u8], delimiter: u8) -> Option<(&[u8], &[u8])> {
    memchr::memchr(delimiter, input).map(|i| (&input[..i], &input[i + 1..]))
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::{
        borrow::ToOwned,
        string::{String, ToString},
        vec::Vec,
    };

    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Event {
        Positional(String),
        Option(String, String),
        Flag(String, Option<String>),
        Malformed(String),
    }

    fn text(arg: &Arg) -> String {
        arg.as_str().unwrap().to_owned()
    }

    /// Visitor that treats any flag whose name starts with `v` as taking a
    /// value, and everything else as a boolean.
    struct Recorder;

    impl<'arg> Visitor<'arg> for Recorder {
        type Value = Event;

        fn visit_positional(self, argument: &'arg Arg) -> Event {
            Event::Positional(text(argument))
        }

        fn visit_option(self, option: &'arg Arg, argument: &'arg Arg) -> Event {
            Event::Option(text(option), text(argument))
        }

        fn visit_flag(self, option: &'arg Arg, arg: impl ArgAccess<'arg>) -> Event {
            let value = match option.bytes().first() {
                Some(b'v') => arg.take().map(text),
                _ => None,
            };

            Event::Flag(text(option), value)
        }

        fn visit_malformed(self, token: &'arg Arg) -> Event {
            Event::Malformed(text(token))
        }
    }

    fn parse(tokens: &[&str]) -> Vec<Event> {
        let mut parser = ArgumentsParser::new(tokens.iter().map(|token| token.as_bytes()));
        let mut events = Vec::new();

        while let Some(event) = parser.next_arg(Recorder) {
            events.push(event);
        }

        events
    }

    #[test]
    fn single_and_double_dash_are_equivalent() {
        assert_eq!(
            parse(&["-debug", "--trace"]),
            [
                Event::Flag("debug".to_string(), None),
                Event::Flag("trace".to_string(), None),
            ]
        );
    }

    #[test]
    fn equals_splits_name_and_value() {
        assert_eq!(
            parse(&["-count=3", "--name=a=b", "--empty="]),
            [
                Event::Option("count".to_string(), "3".to_string()),
                Event::Option("name".to_string(), "a=b".to_string()),
                Event::Option("empty".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn value_is_taken_from_next_token_verbatim() {
        assert_eq!(
            parse(&["-value", "-x", "--verbose", "--", "rest"]),
            [
                Event::Flag("value".to_string(), Some("-x".to_string())),
                Event::Flag("verbose".to_string(), Some("--".to_string())),
                Event::Positional("rest".to_string()),
            ]
        );
    }

    #[test]
    fn missing_value_at_end() {
        assert_eq!(parse(&["-value"]), [Event::Flag("value".to_string(), None)]);
    }

    #[test]
    fn parsing_stops_at_first_positional() {
        assert_eq!(
            parse(&["-a", "file", "-b", "--c=1"]),
            [
                Event::Flag("a".to_string(), None),
                Event::Positional("file".to_string()),
                Event::Positional("-b".to_string()),
                Event::Positional("--c=1".to_string()),
            ]
        );
    }

    #[test]
    fn terminator_is_consumed() {
        assert_eq!(
            parse(&["-a", "--", "-b"]),
            [
                Event::Flag("a".to_string(), None),
                Event::Positional("-b".to_string()),
            ]
        );
        assert!(parse(&["--"]).is_empty());
    }

    #[test]
    fn positional_only_after_first_positional() {
        let tokens: [&[u8]; 3] = [b"-a", b"file", b"-b"];
        let mut parser = ArgumentsParser::new(tokens.iter().copied());
        assert!(!parser.is_positional_only());

        assert!(parser.next_arg(Recorder).is_some());
        assert!(!parser.is_positional_only());

        assert!(parser.next_arg(Recorder).is_some());
        assert!(parser.is_positional_only());
    }

    #[test]
    fn lone_dash_is_positional() {
        assert_eq!(
            parse(&["-", "-a"]),
            [
                Event::Positional("-".to_string()),
                Event::Positional("-a".to_string()),
            ]
        );
    }

    #[test]
    fn malformed_flags() {
        assert_eq!(parse(&["---x"]), [Event::Malformed("---x".to_string())]);
        assert_eq!(parse(&["-=x"]), [Event::Malformed("-=x".to_string())]);
        assert_eq!(parse(&["--=x"]), [Event::Malformed("--=x".to_string())]);
    }
}
