use std::path::PathBuf;

use serde_json::json;

use crate::config::Config;
use crate::error::Result;
use crate::input;
use crate::render::Render;
use crate::search::TOP_SEARCHES_LIMIT;
use crate::studybook::Studybook;
use crate::tips;

/// The action selected by the command-line flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Dashboard,
    Add,
    Toggle,
    Delete,
    Search,
    Top,
    Profile,
    Tip,
}

/// Execute CLI commands
pub fn run(
    action: Action,
    input: Vec<String>,
    description: Option<String>,
    json_output: bool,
    studybook_dir: Option<PathBuf>,
) -> Result<()> {
    let config = Config::load_or_default();
    let top_n = config.dashboard_top_searches;
    let render = Render::new(config);

    let open = || Studybook::open(studybook_dir.as_deref());

    match action {
        Action::Tip => {
            let tip = tips::random_tip(&mut rand::thread_rng());
            if json_output {
                print_json(&json!({ "tip": tip }))?;
            } else {
                render.display_tip(tip);
            }
        }
        Action::Add => {
            let studybook = open()?;
            let draft = input::parse_task_input(&input, description)?;
            let task = studybook.create_task(draft)?;
            if json_output {
                print_json(&task)?;
            } else {
                render.success_create(&task);
            }
        }
        Action::Toggle => {
            let ids = input::parse_ids(&input)?;
            let studybook = open()?;
            let mut toggled = Vec::new();
            for id in ids {
                match studybook.toggle_task(id)? {
                    Some(status) => {
                        if !json_output {
                            render.success_toggle(id, status);
                        }
                        toggled.push(json!({ "id": id, "status": status }));
                    }
                    None if !json_output => render.unknown_id(id),
                    None => {}
                }
            }
            if json_output {
                print_json(&json!({ "toggled": toggled }))?;
            }
        }
        Action::Delete => {
            let ids = input::parse_ids(&input)?;
            let studybook = open()?;
            let mut deleted = Vec::new();
            for id in ids {
                if studybook.delete_task(id)? {
                    deleted.push(id);
                } else if !json_output {
                    render.unknown_id(id);
                }
            }
            if json_output {
                print_json(&json!({ "deleted": deleted }))?;
            } else {
                render.success_delete(&deleted);
            }
        }
        Action::Search => {
            let studybook = open()?;
            let query = input.join(" ");
            let results = studybook.search(&query)?;
            if json_output {
                print_json(&json!({ "results": results }))?;
            } else {
                render.display_search_results(&query, &results);
            }
        }
        Action::Top => {
            let studybook = open()?;
            let top = studybook.top_searches(TOP_SEARCHES_LIMIT)?;
            if json_output {
                print_json(&json!({ "top": top }))?;
            } else {
                render.display_top_searches(&top);
            }
        }
        Action::Profile => {
            let studybook = open()?;
            let profile = if input.is_empty() {
                studybook.profile()?
            } else {
                let changes = input::parse_profile_changes(&input)?;
                let updated = studybook.update_profile(changes)?;
                if !json_output {
                    render.success_profile();
                }
                updated
            };
            if json_output {
                print_json(&profile)?;
            } else {
                render.display_profile(&profile);
            }
        }
        Action::Dashboard => {
            let studybook = open()?;
            let dashboard = studybook.dashboard(top_n)?;
            if json_output {
                print_json(&dashboard)?;
            } else {
                render.display_dashboard(&dashboard);
            }
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
