use std::{
    io::{self, Write as _},
    process,
};

use tracing::debug;

use crate::{
    arguments::LoadedArguments,
    command::{Command, Dispatch, Outcome},
    context::Context,
    errors::DispatchError,
    flag::{self, Flag},
    printers::{self, HelpPage},
};

/**
An application: the root [`Command`] of a tree, plus the things only the
root has, like a version.

The root command gets some implicit flags on top of the `help` flag that
every command gets:

- `version, v` prints `NAME version VERSION`, if the app has a version.
- `generate-bash-completion` is hidden. When it's given (usually as the last
  token of the command line), the names of the sub-commands of the resolved
  command are printed one per line instead of running anything.

An implicit flag is left out if the root command declares any of its names
itself.
*/
#[derive(Debug)]
pub struct App {
    command: Command,
    version: Option<String>,
    author: Option<String>,
    bash_completion: bool,
}

impl App {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            command: Command::new(name),
            version: None,
            author: None,
            bash_completion: true,
        }
    }

    /// Build an app around an existing root command.
    pub fn from_command(command: Command) -> Self {
        Self {
            command,
            version: None,
            author: None,
            bash_completion: true,
        }
    }

    #[must_use]
    pub fn with_usage(self, usage: impl Into<String>) -> Self {
        self.map_command(|command| command.with_usage(usage))
    }

    #[must_use]
    pub fn with_description(self, description: impl Into<String>) -> Self {
        self.map_command(|command| command.with_description(description))
    }

    #[must_use]
    pub fn with_version(self, version: impl Into<String>) -> Self {
        Self {
            version: Some(version.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_author(self, author: impl Into<String>) -> Self {
        Self {
            author: Some(author.into()),
            ..self
        }
    }

    /// Enable or disable the hidden `generate-bash-completion` flag. It's
    /// enabled by default.
    #[must_use]
    pub fn with_bash_completion(self, enabled: bool) -> Self {
        Self {
            bash_completion: enabled,
            ..self
        }
    }

    /// Add a global flag. Global flags are declared on the root command, and
    /// are visible from the context of every command.
    #[must_use]
    pub fn with_flag(self, flag: Flag) -> Self {
        self.map_command(|command| command.with_flag(flag))
    }

    #[must_use]
    pub fn with_flags(self, flags: impl IntoIterator<Item = Flag>) -> Self {
        self.map_command(|command| command.with_flags(flags))
    }

    #[must_use]
    pub fn with_command(self, command: Command) -> Self {
        self.map_command(|root| root.with_command(command))
    }

    #[must_use]
    pub fn with_commands(self, commands: impl IntoIterator<Item = Command>) -> Self {
        self.map_command(|root| root.with_commands(commands))
    }

    /// The action run when no sub-command is given.
    #[must_use]
    pub fn with_action(self, action: impl Fn(&Context<'_>) + 'static) -> Self {
        self.map_command(|command| command.with_action(action))
    }

    fn map_command(self, op: impl FnOnce(Command) -> Command) -> Self {
        Self {
            command: op(self.command),
            ..self
        }
    }

    pub fn name(&self) -> &str {
        self.command.name()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// The root command
    pub fn command(&self) -> &Command {
        &self.command
    }

    /// The implicit flags of the root command, other than `help`
    fn implicit_flags(&self) -> Vec<Flag> {
        let version = self.version.as_ref().map(|_| flag::version_flag());
        let completion = self.bash_completion.then(flag::bash_completion_flag);

        version
            .into_iter()
            .chain(completion)
            .filter(|flag| !flag.names().any(|name| self.command.declares(name)))
            .collect()
    }

    /**
    Run the app with `args`, where `args[0]` is the program name. Help,
    version and completion output is written to `out`.

    If the last token is `--generate-bash-completion` (and completion is
    enabled), it's removed before dispatch and completion candidates are
    written for whichever command the rest of the line resolves to.
     */
    pub fn try_run_with_output(
        &self,
        args: &[String],
        out: &mut dyn io::Write,
    ) -> Result<Outcome, DispatchError> {
        let (args, completion) = match args.split_last() {
            Some((last, rest))
                if self.bash_completion
                    && last.strip_prefix("--") == Some(flag::BASH_COMPLETION) =>
            {
                (rest, true)
            }
            _ => (args, false),
        };

        debug!(app = self.name(), completion, "running app");

        let help = flag::help_flag();
        let root = self.implicit_flags();

        let state = Dispatch {
            app: Some(self),
            help: &help,
            root: &root,
            completion,
        };

        self.command.dispatch(state, out, args, None)
    }

    /// Run the app with `args`, writing output to stdout.
    pub fn try_run(&self, args: &[String]) -> Result<Outcome, DispatchError> {
        self.try_run_with_output(args, &mut io::stdout().lock())
    }

    /**
    Run the app with `args`. On a usage error, `Incorrect Usage.` and the
    help of the command that failed are printed to stdout, the error itself
    to stderr, and the process exits with status 1.
     */
    pub fn run(&self, args: &[String]) {
        let error = match self.try_run(args) {
            Ok(_) => return,
            Err(error) => error,
        };

        // Nothing more can be done if stdout is gone
        let _ = self.write_usage_error(&mut io::stdout().lock(), &error);

        // Usage and declaration errors already start with the command path
        match error.path() {
            [] => eprintln!("{}: {error}", self.name()),
            _ => eprintln!("{error}"),
        }

        process::exit(1)
    }

    /**
    Write what [`run`][App::run] prints to stdout for `error`: for a usage
    error, `Incorrect Usage.` followed by the help of the command that
    rejected the command line. Other errors write nothing.
     */
    pub fn write_usage_error(
        &self,
        out: &mut dyn io::Write,
        error: &DispatchError,
    ) -> io::Result<()> {
        let DispatchError::Usage { path, .. } = error else {
            return Ok(());
        };

        let path: Vec<&str> = path.iter().map(String::as_str).collect();

        writeln!(out, "Incorrect Usage.\n")?;
        self.write_help(out, &path)?;
        writeln!(out)
    }

    /// Run the app with the arguments of the current process. Arguments that
    /// aren't valid UTF-8 are a usage error.
    pub fn run_from_env(&self) {
        let arguments = LoadedArguments::from_env();

        match arguments.to_strings() {
            Ok(args) => self.run(&args),
            Err(error) => {
                eprintln!("{}: {error}", self.name());
                process::exit(1)
            }
        }
    }

    /**
    Write the help for the command at `path`, where `path[0]` is the app's
    name and each following element names a sub-command of the one before.
    Resolution stops at the first name that isn't a sub-command.
     */
    pub fn write_help(&self, out: &mut dyn io::Write, path: &[&str]) -> io::Result<()> {
        let help = flag::help_flag();
        let mut command = &self.command;
        let mut depth = 1;

        for name in path.iter().skip(1) {
            match command.command(name) {
                Some(child) => command = child,
                None => break,
            }

            depth += 1;
        }

        match depth {
            1 => self.write_root_help(out, &help, &self.implicit_flags()),
            _ => command.write_help(out, &path[..depth]),
        }
    }

    pub(crate) fn write_root_help(
        &self,
        out: &mut dyn io::Write,
        help: &Flag,
        root: &[Flag],
    ) -> io::Result<()> {
        let path = [self.name()];
        let mut page = HelpPage::new(&self.command, &path, self.command.declarations(help, root));
        page.global = true;
        page.version = self.version();
        page.author = self.author();

        printers::print_help(out, &page)
    }

    pub(crate) fn write_version(&self, out: &mut dyn io::Write) -> io::Result<()> {
        match self.version {
            Some(ref version) => writeln!(out, "{} version {version}", self.name()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn implicit_flags_follow_configuration() {
        let names = |app: &App| -> Vec<String> {
            app.implicit_flags()
                .iter()
                .map(|flag| flag.name().to_owned())
                .collect()
        };

        assert_eq!(names(&App::new("plain")), ["generate-bash-completion"]);

        let app = App::new("versioned").with_version("1.2.3");
        assert_eq!(names(&app), ["version, v", "generate-bash-completion"]);

        let app = App::new("quiet")
            .with_version("1.2.3")
            .with_bash_completion(false)
            .with_flag(Flag::bool("verbose, v", ""));
        assert!(names(&app).is_empty());
    }

    #[test]
    fn usage_error_page() {
        let app = App::new("greet").with_command(
            Command::new("hello")
                .with_usage("say hello")
                .with_flag(Flag::int("times", 1, "how many times"))
                .with_action(|_| {}),
        );

        let args = ["greet", "hello", "-times=many"].map(String::from);
        let error = app
            .try_run_with_output(&args, &mut Vec::new())
            .unwrap_err();

        let mut out = Vec::new();
        app.write_usage_error(&mut out, &error).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Incorrect Usage.\n\
             \n\
             hello - say hello\n\
             \n\
             Usage:\n  \
               greet hello [command options] [arguments...]\n\
             \n\
             Options:\n  \
               --times '1'  how many times\n  \
               --help, -h   show help\n\
             \n"
        );
    }

    #[test]
    fn declaration_errors_print_no_usage() {
        let app = App::new("greet")
            .with_flag(Flag::bool("x", ""))
            .with_flag(Flag::bool("x", ""));

        let error = app
            .try_run_with_output(&["greet".to_owned()], &mut Vec::new())
            .unwrap_err();

        let mut out = Vec::new();
        app.write_usage_error(&mut out, &error).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn version_line() {
        let app = App::new("greet").with_version("0.3.0");
        let mut out = Vec::new();

        app.write_version(&mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "greet version 0.3.0\n");
    }
}
