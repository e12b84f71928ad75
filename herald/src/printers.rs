use std::io::{self, Write as _};

use indent_write::io::IndentWriter;
use joinery::JoinableIterator;
use lazy_format::lazy_format;

use crate::{command::Command, flag::Flag};

/// Everything that goes into a single help page
pub(crate) struct HelpPage<'a> {
    pub command: &'a Command,

    /// The names of the commands from the root down to `command`
    pub path: &'a [&'a str],

    /// Every flag parsed by the command, in display order. Hidden flags are
    /// skipped when printing.
    pub flags: Vec<&'a Flag>,

    /// True for the root command of an app, whose flags are global
    pub global: bool,
    pub version: Option<&'a str>,
    pub author: Option<&'a str>,
}

impl<'a> HelpPage<'a> {
    pub fn new(
        command: &'a Command,
        path: &'a [&'a str],
        flags: impl IntoIterator<Item = &'a Flag>,
    ) -> Self {
        Self {
            command,
            path,
            flags: flags.into_iter().collect(),
            global: false,
            version: None,
            author: None,
        }
    }
}

/*
Overall structure:

NAME - USAGE

Usage:
  app sub [command options] [arguments...]

Description:
  etc

Commands:
  name, n  usage

Options:
  --flag 'default'  usage
 */
pub(crate) fn print_help(out: &mut (impl io::Write + ?Sized), page: &HelpPage<'_>) -> io::Result<()> {
    let command = page.command;
    let name = page.path.last().copied().unwrap_or(command.name());

    match command.usage() {
        "" => writeln!(out, "{name}")?,
        usage => writeln!(out, "{name} - {usage}")?,
    }

    let has_commands = !command.commands().is_empty();

    section(out, "Usage", |mut out| {
        let path = page.path.iter().join_with(' ');
        let options = match page.global {
            true => "global options",
            false => "command options",
        };
        let commands = match has_commands {
            true => " command [command options]",
            false => "",
        };

        writeln!(out, "{path} [{options}]{commands} [arguments...]")
    })?;

    if let Some(version) = page.version {
        section(out, "Version", |mut out| writeln!(out, "{version}"))?;
    }

    if let Some(author) = page.author {
        section(out, "Author", |mut out| writeln!(out, "{author}"))?;
    }

    if !command.description().is_empty() {
        section(out, "Description", |mut out| {
            writeln!(out, "{}", textwrap::fill(command.description(), 76))
        })?;
    }

    let commands: Vec<(String, &str)> = command
        .commands()
        .iter()
        .map(|command| {
            let name = lazy_format!(match (command.short_name()) {
                Some(short) => ("{name}, {short}", name = command.name()),
                None => ("{}", command.name()),
            });

            (name.to_string(), command.usage())
        })
        .collect();

    maybe_section(out, "Commands", &commands, |out, rows| columns(out, rows))?;

    let flags: Vec<(String, String)> = page
        .flags
        .iter()
        .filter(|flag| !flag.is_hidden())
        .map(|flag| {
            let line = flag.to_string();
            match line.split_once('\t') {
                Some((names, usage)) => (names.to_owned(), usage.to_owned()),
                None => (line, String::new()),
            }
        })
        .collect();

    let header = match page.global {
        true => "Global Options",
        false => "Options",
    };

    maybe_section(out, header, &flags, |out, rows| columns(out, rows))
}

/// Write rows as two aligned columns. Rows with nothing in the second column
/// are written without padding.
fn columns<L, R>(out: &mut (impl io::Write + ?Sized), rows: &[(L, R)]) -> io::Result<()>
where
    L: AsRef<str>,
    R: AsRef<str>,
{
    let width = rows
        .iter()
        .map(|(left, _)| left.as_ref().chars().count())
        .max()
        .unwrap_or(0);

    rows.iter().try_for_each(|(left, right)| {
        let (left, right) = (left.as_ref(), right.as_ref());

        match right {
            "" => writeln!(out, "{left}"),
            right => writeln!(out, "{left:width$}  {right}"),
        }
    })
}

/// Write a section by writing a newline, then the `header`, then an
/// indented `body`.
fn section<O: io::Write + ?Sized, T>(
    out: &mut O,
    header: &str,
    body: impl FnOnce(IndentWriter<&mut O>) -> io::Result<T>,
) -> io::Result<T> {
    writeln!(out, "\n{header}:")?;
    body(IndentWriter::new("  ", out))
}

/// Write a section only if there's at least one item to put in it.
/// Otherwise identical to `section`.
fn maybe_section<O: io::Write + ?Sized, T>(
    out: &mut O,
    header: &str,
    items: &[T],
    body: impl FnOnce(&mut IndentWriter<&mut O>, &[T]) -> io::Result<()>,
) -> io::Result<()> {
    match items {
        [] => Ok(()),
        items => section(out, header, |mut out| body(&mut out, items)),
    }
}
