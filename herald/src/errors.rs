/*!
Error types for the various layers of [`herald`][crate]. A [`ParseError`]
comes from a single value; a [`UsageError`] from parsing the flags of one
command level; a [`DeclarationError`] from a malformed command tree; and a
[`DispatchError`] wraps either of the last two with the command path where it
happened, or reports that output couldn't be written.
 */

use std::{fmt::Display, io};

use herald_parser::Arg;

/// A single text token could not be converted into a flag's value type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The token violated the literal grammar of the type
    #[error("failed to parse {arg:?}: {message}")]
    Invalid { arg: String, message: String },

    /// The token should have been one of these (or a case insensitive
    /// variation)
    #[error("{arg:?} isn't one of: {}", .expected.join(", "))]
    ShouldBe {
        arg: String,
        expected: &'static [&'static str],
    },

    /// Something else went wrong
    #[error("{message}")]
    Custom { message: String },
}

impl ParseError {
    pub fn invalid(arg: &str, message: impl Display) -> Self {
        Self::Invalid {
            arg: arg.to_owned(),
            message: message.to_string(),
        }
    }

    pub fn should_be(arg: &str, expected: &'static [&'static str]) -> Self {
        Self::ShouldBe {
            arg: arg.to_owned(),
            expected,
        }
    }

    pub fn custom(message: impl Display) -> Self {
        Self::Custom {
            message: message.to_string(),
        }
    }
}

/// Something was wrong with the flags given to a single command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum UsageError {
    /// The flag isn't declared on this command. Flags declared on an
    /// enclosing command (including global flags) are only accepted before
    /// the sub-command's name.
    #[error("flag provided but not defined: -{0}")]
    Unrecognized(String),

    /// The token started with a `-` but wasn't a well-formed flag
    #[error("bad flag syntax: {0}")]
    BadSyntax(String),

    /// The flag takes a value and the command line ended before one was given
    #[error("flag needs an argument: -{0}")]
    NeedsArgument(String),

    /// The flag's value type rejected the given text
    #[error("invalid value {value:?} for flag -{flag}: {error}")]
    InvalidValue {
        flag: String,
        value: String,
        #[source]
        error: ParseError,
    },

    /// A token wasn't valid UTF-8
    #[error("argument wasn't valid utf-8: {0}")]
    InvalidUtf8(String),
}

impl UsageError {
    pub(crate) fn invalid_utf8(arg: &Arg) -> Self {
        Self::InvalidUtf8(String::from_utf8_lossy(arg.bytes()).into_owned())
    }
}

/// The command tree itself is malformed. These are programming errors in the
/// declarations rather than problems with the command line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DeclarationError {
    /// One of the comma-separated aliases of this flag is empty
    #[error("flag {0:?} has an empty name")]
    EmptyName(String),

    /// Two flags on the same command share an alias
    #[error("flag redefined: {0}")]
    Redefined(String),
}

/// An error from dispatching a command line through a command tree. `path` is
/// the chain of command names, starting at the root, of the level where the
/// error happened.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DispatchError {
    #[error("{}: {error}", .path.join(" "))]
    Usage {
        path: Vec<String>,
        #[source]
        error: UsageError,
    },

    #[error("{}: {error}", .path.join(" "))]
    Declaration {
        path: Vec<String>,
        #[source]
        error: DeclarationError,
    },

    /// Help, version or completion output couldn't be written
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl DispatchError {
    pub fn path(&self) -> &[String] {
        match self {
            Self::Usage { path, .. } | Self::Declaration { path, .. } => path,
            Self::Io(_) => &[],
        }
    }

    pub fn usage_error(&self) -> Option<&UsageError> {
        match self {
            Self::Usage { error, .. } => Some(error),
            Self::Declaration { .. } | Self::Io(_) => None,
        }
    }
}
