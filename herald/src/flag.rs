/*!
Flag declarations. A [`Flag`] binds one or more alias names to a typed
[`Value`] and a line of usage text. Declarations are immutable; the value
they carry is the default that each dispatch starts from.
 */

use std::fmt::{self, Display};

use joinery::JoinableIterator;
use lazy_format::lazy_format;

use crate::value::{Generic, Value};

/**
A single flag declaration.

The `name` may be a comma separated list of aliases, such as `"verbose, V"`.
Surrounding whitespace is trimmed from each alias, and every alias refers to
the same value.
*/
#[derive(Debug, Clone)]
pub struct Flag {
    name: String,
    usage: String,
    value: Value,
    hidden: bool,
}

impl Flag {
    pub fn new(name: impl Into<String>, value: Value, usage: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            usage: usage.into(),
            value,
            hidden: false,
        }
    }

    /// A boolean flag that defaults to `false`
    pub fn bool(name: impl Into<String>, usage: impl Into<String>) -> Self {
        Self::new(name, Value::Bool(false), usage)
    }

    /// A boolean flag that defaults to `true`. It can be turned off with
    /// `-name=false`.
    pub fn bool_t(name: impl Into<String>, usage: impl Into<String>) -> Self {
        Self::new(name, Value::Bool(true), usage)
    }

    pub fn string(
        name: impl Into<String>,
        default: impl Into<String>,
        usage: impl Into<String>,
    ) -> Self {
        Self::new(name, Value::String(default.into()), usage)
    }

    pub fn int(name: impl Into<String>, default: i64, usage: impl Into<String>) -> Self {
        Self::new(name, Value::Int(default), usage)
    }

    pub fn float64(name: impl Into<String>, default: f64, usage: impl Into<String>) -> Self {
        Self::new(name, Value::Float64(default), usage)
    }

    pub fn string_slice(
        name: impl Into<String>,
        default: impl IntoIterator<Item = impl Into<String>>,
        usage: impl Into<String>,
    ) -> Self {
        let default = default.into_iter().map(Into::into).collect();
        Self::new(name, Value::StringSlice(default), usage)
    }

    pub fn int_slice(
        name: impl Into<String>,
        default: impl IntoIterator<Item = i64>,
        usage: impl Into<String>,
    ) -> Self {
        Self::new(name, Value::IntSlice(default.into_iter().collect()), usage)
    }

    pub fn generic<T: Generic + Clone>(
        name: impl Into<String>,
        default: T,
        usage: impl Into<String>,
    ) -> Self {
        Self::new(name, Value::generic(default), usage)
    }

    /// Omit this flag from help output. It still parses normally.
    #[must_use]
    pub fn hidden(self) -> Self {
        Self {
            hidden: true,
            ..self
        }
    }

    /// The full declared name, including every alias.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every alias of this flag, trimmed, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + Clone {
        self.name.split(',').map(str::trim)
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.names().any(|alias| alias == name)
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// The declared default value
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Every alias with its dash prefix, joined with `, `.
    pub fn prefixed_names(&self) -> impl Display + '_ {
        self.names()
            .map(|name| lazy_format!("{}{name}", prefix_for(name)))
            .join_with(", ")
    }
}

/// `-` for single character names, `--` for everything else
fn prefix_for(name: &str) -> &'static str {
    match name.chars().count() {
        1 => "-",
        _ => "--",
    }
}

/// The help line for this flag: names, then (for flags that take values) a
/// quoted example or default, then a tab and the usage text.
impl Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.prefixed_names();
        let usage = &self.usage;

        match self.value {
            Value::Bool(_) => write!(f, "{names}\t{usage}"),
            Value::String(ref value) if value.is_empty() => write!(f, "{names}\t{usage}"),
            ref value if value.is_slice() => {
                let first = self.names().next().unwrap_or_default();
                let prefix = prefix_for(first);
                write!(
                    f,
                    "{names} '{prefix}{first} option {prefix}{first} option'\t{usage}"
                )
            }
            ref value => write!(f, "{names} '{value}'\t{usage}"),
        }
    }
}

/// The implicit `help, h` flag added to every command.
pub fn help_flag() -> Flag {
    Flag::bool("help, h", "show help")
}

/// The implicit `version, v` flag added to the root of an app that has a
/// version.
pub fn version_flag() -> Flag {
    Flag::bool("version, v", "print the version")
}

pub(crate) const BASH_COMPLETION: &str = "generate-bash-completion";

/// The implicit hidden flag that asks for completion candidates instead of
/// running the command.
pub fn bash_completion_flag() -> Flag {
    Flag::bool(BASH_COMPLETION, "").hidden()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_are_trimmed() {
        let flag = Flag::bool(" verbose ,V,  loud", "be loud");

        assert_eq!(flag.names().collect::<Vec<_>>(), ["verbose", "V", "loud"]);
        assert!(flag.has_name("V"));
        assert!(!flag.has_name(" V"));
    }

    #[test]
    fn bool_help_line() {
        assert_eq!(help_flag().to_string(), "--help, -h\tshow help");
        assert_eq!(
            Flag::bool_t("color", "colorize output").to_string(),
            "--color\tcolorize output"
        );
    }

    #[test]
    fn string_help_line() {
        assert_eq!(
            Flag::string("lang, l", "english", "language for the greeting").to_string(),
            "--lang, -l 'english'\tlanguage for the greeting"
        );
        assert_eq!(
            Flag::string("output, o", "", "output file").to_string(),
            "--output, -o\toutput file"
        );
    }

    #[test]
    fn numeric_help_lines() {
        assert_eq!(
            Flag::int("count, c", 3, "how many").to_string(),
            "--count, -c '3'\thow many"
        );
        assert_eq!(
            Flag::float64("ratio", 1.5, "scale factor").to_string(),
            "--ratio '1.500000'\tscale factor"
        );
    }

    #[test]
    fn slice_help_lines() {
        assert_eq!(
            Flag::string_slice("tag, t", ["a"], "add a tag").to_string(),
            "--tag, -t '--tag option --tag option'\tadd a tag"
        );
        assert_eq!(
            Flag::int_slice("p", [], "port").to_string(),
            "-p '-p option -p option'\tport"
        );
    }

    #[test]
    fn hidden_is_preserved() {
        let flag = bash_completion_flag();

        assert!(flag.is_hidden());
        assert_eq!(flag.value().as_bool(), Some(false));
        assert!(!version_flag().is_hidden());
    }
}
