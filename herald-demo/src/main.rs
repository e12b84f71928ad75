mod error;

use std::{
    fs,
    io::{self, Write as _},
    path::{Path, PathBuf},
    process,
};

use anyhow::Context as _;
use herald::{App, Command, Context, Flag, Generic};
use tracing::{debug, info};

use crate::error::DemoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Generic)]
enum Priority {
    Low,
    Normal,
    High,

    #[herald(rename = "now")]
    Urgent,
}

#[derive(Debug, Clone)]
struct Task {
    priority: Priority,
    tags: Vec<String>,
    text: String,
}

impl Task {
    fn to_line(&self) -> String {
        format!("{}\t{}\t{}", self.priority, self.tags.join(","), self.text)
    }
}

fn store(context: &Context<'_>) -> PathBuf {
    PathBuf::from(context.global().string("file"))
}

fn load(path: &Path) -> anyhow::Result<Vec<Task>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {}", path.display()));
        }
    };

    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| -> anyhow::Result<Task> {
            let line_number = index + 1;
            let mut fields = line.splitn(3, '\t');

            let (Some(priority), Some(tags), Some(text)) =
                (fields.next(), fields.next(), fields.next())
            else {
                return Err(DemoError::Malformed {
                    path: path.to_owned(),
                    line: line_number,
                }
                .into());
            };

            let mut parsed = Priority::Normal;
            parsed
                .set(priority)
                .map_err(|error| DemoError::BadPriority {
                    path: path.to_owned(),
                    line: line_number,
                    error,
                })?;

            Ok(Task {
                priority: parsed,
                tags: tags
                    .split(',')
                    .filter(|tag| !tag.is_empty())
                    .map(str::to_owned)
                    .collect(),
                text: text.to_owned(),
            })
        })
        .collect()
}

fn save(path: &Path, tasks: &[Task]) -> anyhow::Result<()> {
    let contents: String = tasks
        .iter()
        .map(|task| task.to_line() + "\n")
        .collect();

    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

fn add(context: &Context<'_>) -> anyhow::Result<()> {
    let text = context.args().join(" ");
    if text.trim().is_empty() {
        return Err(DemoError::EmptyTask.into());
    }

    let task = Task {
        priority: context
            .generic::<Priority>("priority")
            .copied()
            .unwrap_or(Priority::Normal),
        tags: context.string_slice("tag").to_vec(),
        text,
    };

    let path = store(context);
    let mut tasks = load(&path)?;

    for _ in 0..context.int("repeat").max(1) {
        tasks.push(task.clone());
    }

    info!(path = %path.display(), total = tasks.len(), "adding task");
    save(&path, &tasks)
}

fn list(context: &Context<'_>) -> anyhow::Result<()> {
    let tasks = load(&store(context))?;
    let minimum = context
        .generic::<Priority>("min-priority")
        .copied()
        .unwrap_or(Priority::Low);
    let tags = context.string_slice("tag");
    let limit = match context.int("limit") {
        limit if limit > 0 => limit as usize,
        _ => usize::MAX,
    };

    let mut out = io::stdout().lock();
    let mut shown = 0;

    for (id, task) in tasks.iter().enumerate() {
        if shown >= limit {
            break;
        }

        if task.priority < minimum || !tags.iter().all(|tag| task.tags.contains(tag)) {
            continue;
        }

        let marker = match (context.bool("color"), task.priority) {
            (true, Priority::Urgent) => "\x1b[1;31m!\x1b[0m",
            (_, Priority::Urgent | Priority::High) => "!",
            _ => " ",
        };

        writeln!(out, "{id:>3} {marker} [{}] {}", task.priority, task.text)?;
        shown += 1;
    }

    let hours = shown as f64 * context.float64("hours-per-task");
    writeln!(out, "{shown} task(s), about {hours:.1} hour(s)")?;

    Ok(())
}

fn done(context: &Context<'_>) -> anyhow::Result<()> {
    let path = store(context);
    let mut tasks = load(&path)?;

    let mut ids: Vec<i64> = context.int_slice("id").to_vec();
    for arg in context.args() {
        let id = arg
            .parse()
            .with_context(|| format!("{arg:?} isn't a task id"))?;
        ids.push(id);
    }

    ids.sort_unstable();
    ids.dedup();

    // Remove from the back so earlier ids stay valid
    for &id in ids.iter().rev() {
        let index = usize::try_from(id)
            .ok()
            .filter(|&index| index < tasks.len())
            .ok_or(DemoError::NoSuchTask(id))?;

        let task = tasks.remove(index);
        debug!(id, text = task.text.as_str(), "completed task");
    }

    save(&path, &tasks)
}

fn list_tags(context: &Context<'_>) -> anyhow::Result<()> {
    let tasks = load(&store(context))?;
    let mut tags: Vec<&str> = tasks
        .iter()
        .flat_map(|task| task.tags.iter().map(String::as_str))
        .collect();

    tags.sort_unstable();
    tags.dedup();

    let mut out = io::stdout().lock();
    tags.iter().try_for_each(|tag| writeln!(out, "{tag}"))?;

    Ok(())
}

fn rename_tag(context: &Context<'_>) -> anyhow::Result<()> {
    let (from, to) = match (context.string("from"), context.string("to")) {
        ("", _) | (_, "") => return Err(DemoError::IncompleteRename.into()),
        pair => pair,
    };

    let path = store(context);
    let mut tasks = load(&path)?;

    tasks
        .iter_mut()
        .flat_map(|task| task.tags.iter_mut())
        .filter(|tag| tag.as_str() == from)
        .for_each(|tag| *tag = to.to_owned());

    save(&path, &tasks)
}

/// Adapt a fallible action to herald's action signature. Failures are
/// reported and end the process.
fn report(
    action: fn(&Context<'_>) -> anyhow::Result<()>,
) -> impl Fn(&Context<'_>) + 'static {
    move |context: &Context<'_>| {
        if let Err(err) = action(context) {
            eprintln!("{}: {err:#}", context.path().join(" "));
            process::exit(1)
        }
    }
}

fn app() -> App {
    App::new("tasks")
        .with_usage("keep a small task list")
        .with_description(
            "Tasks are stored one per line in a plain text file. Global options \
             go before the command name; command options go after it.",
        )
        .with_version(env!("CARGO_PKG_VERSION"))
        .with_author("The herald developers")
        .with_flag(Flag::string("file, f", "tasks.txt", "the task file"))
        .with_flag(Flag::bool_t("color", "highlight urgent tasks"))
        .with_commands([
            Command::new("add")
                .with_short_name("a")
                .with_usage("add a task")
                .with_flag(Flag::generic(
                    "priority, p",
                    Priority::Normal,
                    "low, normal, high or now",
                ))
                .with_flag(Flag::string_slice("tag, t", [] as [&str; 0], "attach a tag"))
                .with_flag(Flag::int("repeat", 1, "add this many copies").hidden())
                .with_action(report(add)),
            Command::new("list")
                .with_short_name("ls")
                .with_usage("show tasks")
                .with_flag(Flag::generic(
                    "min-priority",
                    Priority::Low,
                    "hide tasks below this priority",
                ))
                .with_flag(Flag::string_slice("tag, t", [] as [&str; 0], "only tasks with this tag"))
                .with_flag(Flag::int("limit, n", 0, "show at most this many tasks"))
                .with_flag(Flag::float64("hours-per-task", 1.5, "estimate per task"))
                .with_action(report(list)),
            Command::new("done")
                .with_usage("complete tasks by id")
                .with_flag(Flag::int_slice("id", [], "a task to complete"))
                .with_action(report(done)),
            Command::new("tag")
                .with_usage("work with tags")
                .with_commands([
                    Command::new("list")
                        .with_short_name("ls")
                        .with_usage("list every tag in use")
                        .with_action(report(list_tags)),
                    Command::new("rename")
                        .with_usage("rename a tag on every task")
                        .with_flag(Flag::string("from", "", "the old name"))
                        .with_flag(Flag::string("to", "", "the new name"))
                        .with_action(report(rename_tag)),
                ]),
        ])
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    app().run_from_env()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_command_has_help() {
        let app = app();
        let paths: [&[&str]; 6] = [
            &["tasks"],
            &["tasks", "add"],
            &["tasks", "list"],
            &["tasks", "done"],
            &["tasks", "tag", "list"],
            &["tasks", "tag", "rename"],
        ];

        for path in paths {
            let mut out = Vec::new();
            app.write_help(&mut out, path).unwrap();

            let help = String::from_utf8(out).unwrap();
            assert!(help.contains(&path.join(" ")), "{help}");
        }
    }

    #[test]
    fn task_lines_round_trip_through_load() {
        let dir = std::env::temp_dir().join(format!("herald-demo-{}", process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tasks.txt");

        let task = Task {
            priority: Priority::Urgent,
            tags: vec!["home".to_owned(), "chores".to_owned()],
            text: "take out the bins".to_owned(),
        };

        save(&path, std::slice::from_ref(&task)).unwrap();
        let loaded = load(&path).unwrap();
        fs::remove_dir_all(&dir).unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].priority, Priority::Urgent);
        assert_eq!(loaded[0].tags, task.tags);
        assert_eq!(loaded[0].to_line(), "now\thome,chores\ttake out the bins");
    }
}
