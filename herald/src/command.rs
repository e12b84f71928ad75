/*!
Command nodes and the dispatch algorithm that resolves a command line down
the tree to a single command.
 */

use std::{fmt, io};

use herald_parser::split_at_first_flag;
use tracing::debug;

use crate::{
    app::App,
    context::Context,
    errors::DispatchError,
    flag::{self, Flag},
    flag_set::FlagSet,
    printers::{self, HelpPage},
    value::Value,
};

/// The handler run with the resolved [`Context`] when a command is the end of
/// the dispatch.
pub type Action = Box<dyn Fn(&Context<'_>)>;

/// What happened during a successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Outcome {
    /// The action of the command at `path` was run
    Action { path: Vec<String> },

    /// Help for the command at `path` was written, either because it was
    /// requested or because the command has no action
    Help { path: Vec<String> },

    /// The app's version was written
    Version,

    /// Completion candidates for the command at `path` were written
    Completion { path: Vec<String> },
}

/**
A node in the command tree. A command has a name and optionally a short name,
some text for help output, a list of flags, a list of sub-commands, and an
action.

Commands are built with the `with_*` methods and never change after that;
dispatching borrows the tree, so a single tree can be run any number of
times.
*/
pub struct Command {
    name: String,
    short_name: Option<String>,
    usage: String,
    description: String,
    commands: Vec<Command>,
    flags: Vec<Flag>,
    action: Option<Action>,
}

/// Shared state for one dispatch through the tree
#[derive(Clone, Copy)]
pub(crate) struct Dispatch<'a> {
    pub app: Option<&'a App>,

    /// The implicit help flag, added to every command that doesn't declare
    /// one of its names itself
    pub help: &'a Flag,

    /// Implicit flags added only to the root command
    pub root: &'a [Flag],

    /// True if completion candidates were requested
    pub completion: bool,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short_name: None,
            usage: String::new(),
            description: String::new(),
            commands: Vec::new(),
            flags: Vec::new(),
            action: None,
        }
    }

    #[must_use]
    pub fn with_short_name(self, short_name: impl Into<String>) -> Self {
        Self {
            short_name: Some(short_name.into()),
            ..self
        }
    }

    /// One line summary, shown next to the command's name
    #[must_use]
    pub fn with_usage(self, usage: impl Into<String>) -> Self {
        Self {
            usage: usage.into(),
            ..self
        }
    }

    /// Longer text, shown only in this command's own help
    #[must_use]
    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..self
        }
    }

    #[must_use]
    pub fn with_command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    #[must_use]
    pub fn with_commands(mut self, commands: impl IntoIterator<Item = Command>) -> Self {
        self.commands.extend(commands);
        self
    }

    #[must_use]
    pub fn with_flag(mut self, flag: Flag) -> Self {
        self.flags.push(flag);
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: impl IntoIterator<Item = Flag>) -> Self {
        self.flags.extend(flags);
        self
    }

    #[must_use]
    pub fn with_action(self, action: impl Fn(&Context<'_>) + 'static) -> Self {
        Self {
            action: Some(Box::new(action)),
            ..self
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_name(&self) -> Option<&str> {
        self.short_name.as_deref()
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.name == name || self.short_name.as_deref() == Some(name)
    }

    /// Find a sub-command by name or short name. If several match, the
    /// first one declared wins.
    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|command| command.has_name(name))
    }

    /// True if one of this command's own flags has the alias `name`
    pub fn declares(&self, name: &str) -> bool {
        self.flags.iter().any(|flag| flag.has_name(name))
    }

    /// The flags of this command as they're parsed and displayed: the
    /// declared ones, then the implicit help flag unless it would collide,
    /// then `extra`.
    pub(crate) fn declarations<'a>(
        &'a self,
        help: &'a Flag,
        extra: &'a [Flag],
    ) -> impl Iterator<Item = &'a Flag> + Clone {
        let help = match help.names().any(|name| self.declares(name)) {
            true => None,
            false => Some(help),
        };

        self.flags.iter().chain(help).chain(extra)
    }

    /**
    Run this command with `args`, where `args[0]` is the name the command
    was invoked as and the rest are the tokens to dispatch. Help and
    completion output goes to `out`.

    This never exits the process or prints errors; see
    [`App::run`][crate::App::run] for that.
     */
    pub fn try_run(
        &self,
        args: &[String],
        out: &mut dyn io::Write,
    ) -> Result<Outcome, DispatchError> {
        let help = flag::help_flag();

        let state = Dispatch {
            app: None,
            help: &help,
            root: &[],
            completion: false,
        };

        self.dispatch(state, out, args, None)
    }

    /// Write the help for this command. `path` is the chain of command names
    /// leading to it, used in the synopsis.
    pub fn write_help(&self, out: &mut dyn io::Write, path: &[&str]) -> io::Result<()> {
        let help = flag::help_flag();
        printers::print_help(out, &HelpPage::new(self, path, self.declarations(&help, &[])))
    }

    fn path_from(&self, parent: Option<&Context<'_>>) -> Vec<String> {
        let mut path: Vec<String> = match parent {
            Some(parent) => parent.path().into_iter().map(str::to_owned).collect(),
            None => Vec::new(),
        };

        path.push(self.name.clone());
        path
    }

    /// Dispatch `tokens` to this command. `tokens[0]` is the name this
    /// command was invoked as.
    pub(crate) fn dispatch<'a>(
        &'a self,
        state: Dispatch<'a>,
        out: &mut dyn io::Write,
        tokens: &'a [String],
        parent: Option<&'a Context<'a>>,
    ) -> Result<Outcome, DispatchError> {
        let is_root = parent.is_none();
        let extra: &[Flag] = match is_root {
            true => state.root,
            false => &[],
        };

        let mut flags = FlagSet::new(&self.name, self.declarations(state.help, extra)).map_err(
            |error| DispatchError::Declaration {
                path: self.path_from(parent),
                error,
            },
        )?;

        let body = tokens.get(1..).unwrap_or_default();
        let split = split_at_first_flag(body);

        // If the first positional names a sub-command, the flags after it
        // belong to that sub-command (or its descendants), so this level
        // parses nothing.
        let (args, rest): (Vec<&'a str>, &'a [String]) = match split.head() {
            Some(head) if self.command(head).is_some() => {
                debug!(command = %self.name, child = head.as_str(), "deferring to sub-command");
                (body.iter().map(String::as_str).collect(), body)
            }
            _ => {
                let leftover = flags
                    .parse(split.flags)
                    .map_err(|error| DispatchError::Usage {
                        path: self.path_from(parent),
                        error,
                    })?;

                debug!(
                    command = %self.name,
                    positional = split.positional.len(),
                    leftover = leftover.len(),
                    "parsed flags"
                );

                let args = split
                    .positional
                    .iter()
                    .chain(leftover)
                    .map(String::as_str)
                    .collect();

                let rest = match split.positional.is_empty() {
                    true => leftover,
                    false => split.positional,
                };

                (args, rest)
            }
        };

        let context = Context::new(state.app, self, flags, args, parent);
        let path = self.path_from(parent);

        if local_bool(&context, "help") {
            debug!(command = %self.name, "help requested");
            self.write_help_page(out, &context, state)?;
            return Ok(Outcome::Help { path });
        }

        if let Some(app) = state.app
            && is_root
            && extra.iter().any(|flag| flag.has_name("version"))
            && local_bool(&context, "version")
        {
            app.write_version(out)?;
            return Ok(Outcome::Version);
        }

        let completion = state.completion
            || (is_root
                && extra.iter().any(|flag| flag.has_name(flag::BASH_COMPLETION))
                && local_bool(&context, flag::BASH_COMPLETION));

        if let Some(child) = rest.first().and_then(|name| self.command(name)) {
            debug!(command = %self.name, child = %child.name, "dispatching to sub-command");
            return child.dispatch(
                Dispatch { completion, ..state },
                out,
                rest,
                Some(&context),
            );
        }

        if completion {
            debug!(command = %self.name, "writing completion candidates");
            self.write_completions(out)?;
            return Ok(Outcome::Completion { path });
        }

        match self.action {
            Some(ref action) => {
                debug!(command = %self.name, args = ?context.args(), "running action");
                action(&context);
                Ok(Outcome::Action { path })
            }
            None => {
                debug!(command = %self.name, "no action, writing help");
                self.write_help_page(out, &context, state)?;
                Ok(Outcome::Help { path })
            }
        }
    }

    fn write_help_page(
        &self,
        out: &mut dyn io::Write,
        context: &Context<'_>,
        state: Dispatch<'_>,
    ) -> io::Result<()> {
        let path = context.path();

        match (context.parent(), state.app) {
            (None, Some(app)) => app.write_root_help(out, state.help, state.root),
            (_, _) => {
                let flags = context.flags().slots().map(|slot| slot.flag());
                printers::print_help(out, &HelpPage::new(self, &path, flags))
            }
        }
    }

    fn write_completions(&self, out: &mut dyn io::Write) -> io::Result<()> {
        self.commands.iter().try_for_each(|command| {
            writeln!(out, "{}", command.name)?;

            match command.short_name {
                Some(ref short_name) => writeln!(out, "{short_name}"),
                None => Ok(()),
            }
        })
    }
}

/// Check a boolean flag at this level only, ignoring the parent chain
fn local_bool(context: &Context<'_>, name: &str) -> bool {
    context.flags().value(name).and_then(Value::as_bool) == Some(true)
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("short_name", &self.short_name)
            .field("usage", &self.usage)
            .field("description", &self.description)
            .field("commands", &self.commands)
            .field("flags", &self.flags)
            .field("action", &self.action.as_ref().map(|_| "<action>"))
            .finish()
    }
}
