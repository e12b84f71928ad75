/*!
Declarative command trees with typed flags; herald resolves a command line
down to a single command and runs it with the parsed flags.

A program is described as a tree of [`Command`]s, usually rooted in an
[`App`]. Each command has a list of [`Flag`] declarations, a list of
sub-commands, and an action. Running the app walks the command line down the
tree: at each level, the tokens before the first flag are checked against the
sub-command names, the flags are parsed, and either a sub-command takes over
or the command's action is run with a [`Context`].

```
use herald::{App, Command, Flag};

let app = App::new("greet")
    .with_flag(Flag::bool("loud, l", "shout the greeting"))
    .with_command(
        Command::new("hello")
            .with_short_name("h")
            .with_flag(Flag::string("name, n", "world", "who to greet"))
            .with_action(|context| {
                let greeting = format!("hello, {}", context.string("name"));
                match context.bool("loud") {
                    true => println!("{}!", greeting.to_uppercase()),
                    false => println!("{greeting}"),
                }
            }),
    );

let args = ["greet", "-loud", "hello", "-name", "herald"].map(String::from);
app.try_run(&args).unwrap();
```

Each level only parses its own flags, and a level whose first positional
argument names a sub-command parses nothing and hands every remaining token
to that sub-command. So flags of an enclosing command, including the app's
global flags, go before the sub-command's name: `greet -loud hello` works,
while `greet hello -loud` is rejected with "flag provided but not defined".
Once parsed, those flags are visible from every context beneath them.

Flags come in the built-in [`Value`] kinds (`bool`, `string`, `int`,
`float64`, and repeatable string and int lists), plus user-defined types
implementing [`Generic`], which can be derived for enums and newtypes with
[`#[derive(Generic)]`][derive@Generic].
*/

mod app;
pub mod arguments;
mod command;
mod context;
pub mod errors;
mod flag;
mod flag_set;
mod printers;
mod value;

pub use app::App;
pub use command::{Action, Command, Outcome};
pub use context::Context;
pub use flag::{Flag, bash_completion_flag, help_flag, version_flag};
pub use flag_set::{FlagSet, Slot};
pub use herald_derive::Generic;
pub use herald_parser::Arg;
pub use value::{Generic, GenericValue, Value};
