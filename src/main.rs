use std::path::PathBuf;
use std::process;

use clap::Parser;
use colored::Colorize;

use studybook::commands::{self, Action};
use studybook::logging;

const HELP_TEXT: &str = r#"
  Usage
    $ sb [<options> ...]

    Options
        none             Display the dashboard
      --add, -a          Create task
      --desc             Description for a new task (before the title)
      --toggle, -c       Complete/reopen task
      --delete, -d       Delete task
      --search, -f       Search tasks
      --top              Display most frequent searches
      --profile, -p      Display or update profile
      --tip              Display a study tip
      --json             Print JSON instead of text
      --studybook-dir    Define a custom studybook directory
      --verbose          Log debug output to stderr
      --help, -h         Display help message
      --version, -V      Display installed version

    Examples
      $ sb
      $ sb --add Math HW due:2026-10-21T09:00
      $ sb --add --desc "Intro and outline" Essay draft p:high
      $ sb --toggle 1 2
      $ sb --delete 4
      $ sb --search algebra
      $ sb --top --json
      $ sb --profile name=Ada course=Physics
"#;

#[derive(Parser)]
#[command(
    name = "sb",
    version = env!("CARGO_PKG_VERSION"),
    about = "Study tasks, deadlines & search stats for the command-line habitat",
    after_help = HELP_TEXT
)]
struct Cli {
    /// Input arguments (task title, IDs, search terms, profile fields)
    #[arg(trailing_var_arg = true)]
    input: Vec<String>,

    /// Create task
    #[arg(short = 'a', long)]
    add: bool,

    /// Description for a new task
    #[arg(long = "desc", value_name = "TEXT")]
    description: Option<String>,

    /// Complete/reopen task
    #[arg(short = 'c', long)]
    toggle: bool,

    /// Delete task
    #[arg(short = 'd', long)]
    delete: bool,

    /// Search tasks
    #[arg(short = 'f', long)]
    search: bool,

    /// Display most frequent searches
    #[arg(long)]
    top: bool,

    /// Display or update profile
    #[arg(short = 'p', long)]
    profile: bool,

    /// Display a study tip
    #[arg(long)]
    tip: bool,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Define a custom studybook directory
    #[arg(long = "studybook-dir", value_name = "PATH")]
    studybook_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(long)]
    verbose: bool,
}

impl Cli {
    fn action(&self) -> Action {
        if self.add {
            Action::Add
        } else if self.toggle {
            Action::Toggle
        } else if self.delete {
            Action::Delete
        } else if self.search {
            Action::Search
        } else if self.top {
            Action::Top
        } else if self.profile {
            Action::Profile
        } else if self.tip {
            Action::Tip
        } else {
            Action::Dashboard
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let action = cli.action();
    let result = commands::run(
        action,
        cli.input,
        cli.description,
        cli.json,
        cli.studybook_dir,
    );

    if let Err(e) = result {
        eprintln!("\n {} {}", "✖".red(), e);
        process::exit(1);
    }
}
