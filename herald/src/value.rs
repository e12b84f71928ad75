/*!
The typed values held by flags. Each [`Value`] owns exactly one mutable slot,
which starts out as the declared default and is updated in place by
[`Value::set`] for every occurrence of the flag on the command line.

User-defined types take part through the [`Generic`] trait.
 */

use std::{
    any::Any,
    fmt::{self, Display},
    str::FromStr,
};

use joinery::JoinableIterator;

use crate::errors::ParseError;

/**
A user-defined flag value type.

A [`Generic`] parses text into itself with [`set`][Generic::set] and renders
itself back to text with [`Display`]. The rendering is used in help output
and should be accepted by `set`.

Types used as flag values must also be [`Clone`], because the declaration
keeps the default and every dispatch works on a fresh copy. Fieldless enums
and newtypes can get an implementation with `#[derive(Generic)]`.
*/
pub trait Generic: Display + Any {
    /// Parse `text` and store it, replacing or accumulating into the current
    /// value.
    fn set(&mut self, text: &str) -> Result<(), ParseError>;

    /**
    If true, this value behaves like a boolean flag: it's set to `"true"`
    when the flag appears without a value, and it never takes the next token
    as its value.
    */
    fn is_bool_flag(&self) -> bool {
        false
    }
}

/// Object-safe extension of [`Generic`] that makes boxed generic values
/// cloneable and downcastable. It's implemented automatically for every
/// `Generic + Clone` type.
pub trait GenericValue: Generic {
    fn clone_boxed(&self) -> Box<dyn GenericValue>;
    fn as_any(&self) -> &dyn Any;
}

impl<T: Generic + Clone> GenericValue for T {
    fn clone_boxed(&self) -> Box<dyn GenericValue> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The value slot of a single flag.
#[non_exhaustive]
pub enum Value {
    Bool(bool),
    String(String),
    Int(i64),
    Float64(f64),

    /// Every occurrence of the flag appends one string
    StringSlice(Vec<String>),

    /// Every occurrence of the flag appends one integer
    IntSlice(Vec<i64>),

    Generic(Box<dyn GenericValue>),
}

impl Value {
    pub fn generic<T: Generic + Clone>(value: T) -> Self {
        Self::Generic(Box::new(value))
    }

    /**
    Parse `text` into this slot. Scalars are replaced; slices get `text`
    appended. If parsing fails, the slot is left untouched, though values
    appended by earlier occurrences stay.
    */
    pub fn set(&mut self, text: &str) -> Result<(), ParseError> {
        match self {
            Self::Bool(value) => *value = parse_bool(text)?,
            Self::String(value) => text.clone_into(value),
            Self::Int(value) => *value = parse_from_str(text)?,
            Self::Float64(value) => *value = parse_from_str(text)?,
            Self::StringSlice(values) => values.push(text.to_owned()),
            Self::IntSlice(values) => values.push(parse_from_str(text)?),
            Self::Generic(value) => value.set(text)?,
        }

        Ok(())
    }

    /// True if the flag can appear without a value
    pub fn is_bool_flag(&self) -> bool {
        match self {
            Self::Bool(_) => true,
            Self::Generic(value) => value.is_bool_flag(),
            _ => false,
        }
    }

    /// True if this value accumulates repeated occurrences
    pub fn is_slice(&self) -> bool {
        matches!(self, Self::StringSlice(_) | Self::IntSlice(_))
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Self::Bool(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match *self {
            Self::Int(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_float64(&self) -> Option<f64> {
        match *self {
            Self::Float64(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_string_slice(&self) -> Option<&[String]> {
        match self {
            Self::StringSlice(values) => Some(values),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int_slice(&self) -> Option<&[i64]> {
        match self {
            Self::IntSlice(values) => Some(values),
            _ => None,
        }
    }

    /// Get the user-defined value, if this is a [`Value::Generic`] holding a
    /// `T`.
    #[must_use]
    pub fn as_generic<T: Generic>(&self) -> Option<&T> {
        match self {
            Self::Generic(value) => value.as_any().downcast_ref(),
            _ => None,
        }
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        match self {
            Self::Bool(value) => Self::Bool(*value),
            Self::String(value) => Self::String(value.clone()),
            Self::Int(value) => Self::Int(*value),
            Self::Float64(value) => Self::Float64(*value),
            Self::StringSlice(values) => Self::StringSlice(values.clone()),
            Self::IntSlice(values) => Self::IntSlice(values.clone()),
            Self::Generic(value) => Self::Generic(value.clone_boxed()),
        }
    }
}

/// Renders the current value. Floats always get six decimal places and
/// slices render as `[a b c]`.
impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::String(value) => f.write_str(value),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float64(value) => write!(f, "{value:.6}"),
            Self::StringSlice(values) => write!(f, "[{}]", values.iter().join_with(' ')),
            Self::IntSlice(values) => write!(f, "[{}]", values.iter().join_with(' ')),
            Self::Generic(value) => write!(f, "{value}"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
            Self::String(value) => f.debug_tuple("String").field(value).finish(),
            Self::Int(value) => f.debug_tuple("Int").field(value).finish(),
            Self::Float64(value) => f.debug_tuple("Float64").field(value).finish(),
            Self::StringSlice(values) => f.debug_tuple("StringSlice").field(values).finish(),
            Self::IntSlice(values) => f.debug_tuple("IntSlice").field(values).finish(),
            Self::Generic(value) => f
                .debug_tuple("Generic")
                .field(&format_args!("{value}"))
                .finish(),
        }
    }
}

fn parse_bool(arg: &str) -> Result<bool, ParseError> {
    const TRUE: [&str; 3] = ["1", "t", "true"];
    const FALSE: [&str; 3] = ["0", "f", "false"];

    if TRUE.iter().any(|literal| arg.eq_ignore_ascii_case(literal)) {
        Ok(true)
    } else if FALSE.iter().any(|literal| arg.eq_ignore_ascii_case(literal)) {
        Ok(false)
    } else {
        Err(ParseError::invalid(arg, "invalid syntax"))
    }
}

fn parse_from_str<T>(arg: &str) -> Result<T, ParseError>
where
    T: FromStr,
    T::Err: Display,
{
    arg.parse().map_err(|err| ParseError::invalid(arg, err))
}
