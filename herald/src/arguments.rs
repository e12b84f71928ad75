use std::ffi::{OsStr, OsString};

use herald_parser::Arg;

use crate::errors::UsageError;

/// Helper type for loading arguments from the environment. Usually
/// [`App::run_from_env`][crate::App::run_from_env] is all you need.
///
/// This exists to provide an owned container for args retrieved from
/// [`std::env`], and to check them for UTF-8 in one place.
#[derive(Debug, Clone)]
pub struct LoadedArguments {
    arguments: Vec<OsString>,
}

impl LoadedArguments {
    pub fn from_env() -> Self {
        Self {
            arguments: std::env::args_os().collect(),
        }
    }

    /// The program name, if the platform provided one.
    pub fn argv0(&self) -> Option<&OsStr> {
        self.arguments.first().map(OsString::as_os_str)
    }

    /// Every argument, including the program name, as a `String`. Fails on
    /// the first argument that isn't valid UTF-8.
    pub fn to_strings(&self) -> Result<Vec<String>, UsageError> {
        self.arguments
            .iter()
            .map(|argument| {
                argument
                    .to_str()
                    .map(str::to_owned)
                    .ok_or_else(|| UsageError::invalid_utf8(Arg::new(argument.as_encoded_bytes())))
            })
            .collect()
    }
}

impl<T: Into<OsString>> FromIterator<T> for LoadedArguments {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            arguments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_arguments_convert() {
        let arguments: LoadedArguments = ["greet", "-name", "world"].into_iter().collect();

        assert_eq!(arguments.argv0(), Some(OsStr::new("greet")));
        assert_eq!(arguments.to_strings().unwrap(), ["greet", "-name", "world"]);
    }

    #[cfg(unix)]
    #[test]
    fn invalid_utf8_is_rejected() {
        use std::os::unix::ffi::OsStringExt;

        let arguments: LoadedArguments = [
            OsString::from("greet"),
            OsString::from_vec(vec![b'-', b'x', 0xff]),
        ]
        .into_iter()
        .collect();

        assert!(matches!(
            arguments.to_strings(),
            Err(UsageError::InvalidUtf8(ref text)) if text.starts_with("-x")
        ));
    }
}
