use std::path::PathBuf;

use herald::errors::ParseError;

#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("a task needs some text")]
    EmptyTask,

    #[error("no task with id {0}")]
    NoSuchTask(i64),

    #[error("{}:{line}: expected PRIORITY<tab>TAGS<tab>TEXT", .path.display())]
    Malformed { path: PathBuf, line: usize },

    #[error("{}:{line}: {error}", .path.display())]
    BadPriority {
        path: PathBuf,
        line: usize,
        #[source]
        error: ParseError,
    },

    #[error("renaming a tag needs both --from and --to")]
    IncompleteRename,
}
