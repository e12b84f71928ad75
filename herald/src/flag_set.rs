/*!
The flag set for one command level. A [`FlagSet`] is built fresh from a
command's declarations for every dispatch, owns one value cell per
declaration, and maps every alias of a declaration to that cell.
 */

use std::collections::HashMap;

use herald_parser::{Arg, ArgAccess, ArgumentsParser, Visitor};
use tracing::trace;

use crate::{
    errors::{DeclarationError, ParseError, UsageError},
    flag::Flag,
    value::Value,
};

/// The live state of a single declared flag during one dispatch: its current
/// value, and the raw tokens that were supplied for it, in order.
#[derive(Debug, Clone)]
pub struct Slot<'a> {
    flag: &'a Flag,
    value: Value,
    original: Vec<String>,
}

impl<'a> Slot<'a> {
    fn new(flag: &'a Flag) -> Self {
        Self {
            flag,
            value: flag.value().clone(),
            original: Vec::new(),
        }
    }

    pub fn flag(&self) -> &'a Flag {
        self.flag
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The raw tokens given for this flag on the command line. For a
    /// boolean flag given without a value, this is `"true"`.
    pub fn original(&self) -> &[String] {
        &self.original
    }

    /// True if the flag appeared on the command line at all, even if it was
    /// given its default value.
    pub fn is_set(&self) -> bool {
        !self.original.is_empty()
    }

    fn set(&mut self, text: &str) -> Result<(), ParseError> {
        self.value.set(text)?;
        self.original.push(text.to_owned());
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct FlagSet<'a> {
    name: &'a str,
    slots: Vec<Slot<'a>>,
    aliases: HashMap<&'a str, usize>,
}

impl<'a> FlagSet<'a> {
    /**
    Build a flag set for the command `name` out of some declarations. Fails
    if a declaration has an empty alias, or if two declarations share an
    alias.
     */
    pub fn new(
        name: &'a str,
        flags: impl IntoIterator<Item = &'a Flag>,
    ) -> Result<Self, DeclarationError> {
        let mut slots = Vec::new();
        let mut aliases = HashMap::new();

        for flag in flags {
            let index = slots.len();

            for alias in flag.names() {
                if alias.is_empty() {
                    return Err(DeclarationError::EmptyName(flag.name().to_owned()));
                }

                if aliases.insert(alias, index).is_some() {
                    return Err(DeclarationError::Redefined(alias.to_owned()));
                }
            }

            slots.push(Slot::new(flag));
        }

        Ok(Self {
            name,
            slots,
            aliases,
        })
    }

    /// The name of the command that owns this set
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn slots(&self) -> impl Iterator<Item = &Slot<'a>> {
        self.slots.iter()
    }

    /// Look up a flag by any of its aliases
    pub fn slot(&self, name: &str) -> Option<&Slot<'a>> {
        self.aliases.get(name).map(|&index| &self.slots[index])
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut Slot<'a>> {
        self.aliases.get(name).map(|&index| &mut self.slots[index])
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.slot(name).map(Slot::value)
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.slot(name).is_some_and(Slot::is_set)
    }

    pub fn original(&self, name: &str) -> Option<&[String]> {
        self.slot(name).map(Slot::original)
    }

    /// Assign `text` to the flag called `name`.
    fn assign(&mut self, name: &str, text: &str) -> Result<(), UsageError> {
        let slot = self
            .slot_mut(name)
            .ok_or_else(|| UsageError::Unrecognized(name.to_owned()))?;

        slot.set(text).map_err(|error| UsageError::InvalidValue {
            flag: name.to_owned(),
            value: text.to_owned(),
            error,
        })?;

        trace!(flag = name, value = text, "assigned flag");
        Ok(())
    }

    /**
    Parse flags out of `tokens`, stopping at the first positional argument
    or after a `--`. Returns the tokens left over after flag parsing
    stopped, which are always a suffix of `tokens`. Fails on the first
    unknown or malformed flag, or on the first value that can't be parsed.
     */
    pub fn parse<'t>(&mut self, tokens: &'t [String]) -> Result<&'t [String], UsageError> {
        let mut parser = ArgumentsParser::new(tokens.iter().map(|token| token.as_bytes()));
        let mut positionals = 0;

        while let Some(step) = parser.next_arg(FlagVisitor { set: &mut *self }) {
            if let Step::Positional = step? {
                positionals += 1;
            }
        }

        Ok(&tokens[tokens.len() - positionals..])
    }
}

enum Step {
    Flag,
    Positional,
}

fn text(arg: &Arg) -> Result<&str, UsageError> {
    arg.as_str().ok_or_else(|| UsageError::invalid_utf8(arg))
}

struct FlagVisitor<'s, 'a> {
    set: &'s mut FlagSet<'a>,
}

impl<'arg> Visitor<'arg> for FlagVisitor<'_, '_> {
    type Value = Result<Step, UsageError>;

    fn visit_positional(self, _argument: &'arg Arg) -> Self::Value {
        Ok(Step::Positional)
    }

    fn visit_option(self, option: &'arg Arg, argument: &'arg Arg) -> Self::Value {
        self.set.assign(text(option)?, text(argument)?)?;
        Ok(Step::Flag)
    }

    fn visit_flag(self, option: &'arg Arg, arg: impl ArgAccess<'arg>) -> Self::Value {
        let name = text(option)?;

        let slot = self
            .set
            .slot(name)
            .ok_or_else(|| UsageError::Unrecognized(name.to_owned()))?;

        let value = match slot.value().is_bool_flag() {
            true => "true",
            false => match arg.take() {
                Some(value) => text(value)?,
                None => return Err(UsageError::NeedsArgument(name.to_owned())),
            },
        };

        self.set.assign(name, value)?;
        Ok(Step::Flag)
    }

    fn visit_malformed(self, token: &'arg Arg) -> Self::Value {
        Err(UsageError::BadSyntax(text(token)?.to_owned()))
    }
}
