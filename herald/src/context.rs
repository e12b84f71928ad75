use crate::{
    app::App,
    command::Command,
    flag_set::{FlagSet, Slot},
    value::{Generic, Value},
};

/**
The parsed state of one command level, handed to that command's action.

A context exposes the positional arguments left over at its level, and the
values of flags. Flag lookups check this level's flags first, then each
enclosing command's flags in turn up to the root, so flags declared on an
ancestor are visible to every command beneath it.

Typed accessors return the type's zero value (`false`, `""`, `0`, an empty
slice) when no flag with that name exists anywhere in the chain, or when the
flag has a different type.
*/
#[derive(Debug)]
pub struct Context<'a> {
    app: Option<&'a App>,
    command: &'a Command,
    flags: FlagSet<'a>,
    args: Vec<&'a str>,
    parent: Option<&'a Context<'a>>,
}

impl<'a> Context<'a> {
    pub(crate) fn new(
        app: Option<&'a App>,
        command: &'a Command,
        flags: FlagSet<'a>,
        args: Vec<&'a str>,
        parent: Option<&'a Context<'a>>,
    ) -> Self {
        Self {
            app,
            command,
            flags,
            args,
            parent,
        }
    }

    /// The positional arguments at this level, in their original order.
    pub fn args(&self) -> &[&'a str] {
        &self.args
    }

    pub fn arg(&self, index: usize) -> Option<&'a str> {
        self.args.get(index).copied()
    }

    /// The command this context was built for.
    pub fn command(&self) -> &'a Command {
        self.command
    }

    /// The app being run, if the dispatch started from an [`App`].
    pub fn app(&self) -> Option<&'a App> {
        self.app
    }

    pub fn parent(&self) -> Option<&'a Context<'a>> {
        self.parent
    }

    /// The context of the root command.
    pub fn global(&self) -> &Self {
        let mut context = self;

        while let Some(parent) = context.parent {
            context = parent;
        }

        context
    }

    /// The names of the commands from the root down to this one.
    pub fn path(&self) -> Vec<&'a str> {
        let mut path = match self.parent {
            Some(parent) => parent.path(),
            None => Vec::new(),
        };

        path.push(self.command.name());
        path
    }

    /// The flags declared at this level, including the implicit ones.
    pub fn flags(&self) -> &FlagSet<'a> {
        &self.flags
    }

    /// Find a flag by name, starting at this level and walking up toward
    /// the root.
    pub fn lookup(&self, name: &str) -> Option<&Slot<'a>> {
        self.flags
            .slot(name)
            .or_else(|| self.parent.and_then(|parent| parent.lookup(name)))
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.lookup(name).map(Slot::value)
    }

    /// True if the flag was supplied on the command line, at whichever level
    /// it's declared.
    pub fn is_set(&self, name: &str) -> bool {
        self.lookup(name).is_some_and(Slot::is_set)
    }

    /// The raw tokens that were supplied for the flag, in order.
    pub fn original(&self, name: &str) -> &[String] {
        self.lookup(name).map(Slot::original).unwrap_or_default()
    }

    pub fn bool(&self, name: &str) -> bool {
        self.value(name).and_then(Value::as_bool).unwrap_or_default()
    }

    pub fn string(&self, name: &str) -> &str {
        self.value(name).and_then(Value::as_str).unwrap_or_default()
    }

    pub fn int(&self, name: &str) -> i64 {
        self.value(name).and_then(Value::as_int).unwrap_or_default()
    }

    pub fn float64(&self, name: &str) -> f64 {
        self.value(name).and_then(Value::as_float64).unwrap_or_default()
    }

    pub fn string_slice(&self, name: &str) -> &[String] {
        self.value(name)
            .and_then(Value::as_string_slice)
            .unwrap_or_default()
    }

    pub fn int_slice(&self, name: &str) -> &[i64] {
        self.value(name)
            .and_then(Value::as_int_slice)
            .unwrap_or_default()
    }

    /// The value of a user-defined flag, if there is one called `name`
    /// holding a `T`.
    pub fn generic<T: Generic>(&self, name: &str) -> Option<&T> {
        self.value(name).and_then(Value::as_generic)
    }
}
