use std::env;
use std::path::{Path, PathBuf};

use crate::config::{home_dir, Config};
use crate::error::{Result, StudybookError};

const STUDYBOOK_DIR_NAME: &str = ".studybook";
const STUDYBOOK_DIR_ENV: &str = "STUDYBOOK_DIR";

/// Resolve the studybook directory with priority:
/// 1. --studybook-dir CLI flag (highest)
/// 2. STUDYBOOK_DIR environment variable
/// 3. Config file studybookDirectory
/// 4. Default ~/.studybook/ (lowest)
pub fn resolve_studybook_directory(cli_studybook_dir: Option<&Path>) -> Result<PathBuf> {
    let env_dir = env::var(STUDYBOOK_DIR_ENV).ok();
    let config_dir = Config::load_or_default().studybook_directory;
    let home = home_dir()?;

    resolve_from(cli_studybook_dir, env_dir.as_deref(), &config_dir, &home)
}

fn resolve_from(
    cli_dir: Option<&Path>,
    env_dir: Option<&str>,
    config_dir: &str,
    home: &Path,
) -> Result<PathBuf> {
    let candidate = match select_candidate(cli_dir, env_dir, config_dir, home)? {
        Some(c) => c,
        None => return Ok(home.join(STUDYBOOK_DIR_NAME)),
    };

    let resolved = expand_directory(&candidate, home);

    // A path already ending in .studybook only needs its parent to exist
    if is_studybook_directory_path(&resolved) {
        let parent = resolved.parent().ok_or_else(|| {
            StudybookError::InvalidDirectory(format!("{candidate}: path has no parent"))
        })?;
        assert_directory_exists(parent, &candidate)?;
        return Ok(resolved);
    }

    assert_directory_exists(&resolved, &candidate)?;
    Ok(resolved.join(STUDYBOOK_DIR_NAME))
}

fn select_candidate(
    cli_dir: Option<&Path>,
    env_dir: Option<&str>,
    config_dir: &str,
    home: &Path,
) -> Result<Option<String>> {
    if let Some(dir) = cli_dir {
        let dir_str = dir.to_string_lossy().to_string();
        if dir_str.trim().is_empty() {
            return Err(StudybookError::MissingStudybookDirValue);
        }
        return Ok(Some(dir_str));
    }

    if let Some(env_dir) = env_dir.filter(|d| !d.trim().is_empty()) {
        return Ok(Some(env_dir.to_string()));
    }

    // Only use the config dir if it is not the default home directory
    let config_dir = config_dir.trim();
    if !config_dir.is_empty() && config_dir != "~" && Path::new(config_dir) != home {
        return Ok(Some(config_dir.to_string()));
    }

    Ok(None)
}

fn expand_directory(directory: &str, home: &Path) -> PathBuf {
    match directory.strip_prefix('~') {
        Some(rest) => {
            let rest = rest.trim_start_matches('/');
            if rest.is_empty() {
                home.to_path_buf()
            } else {
                home.join(rest)
            }
        }
        None => PathBuf::from(directory),
    }
}

fn is_studybook_directory_path(path: &Path) -> bool {
    path.file_name()
        .map(|name| name == STUDYBOOK_DIR_NAME)
        .unwrap_or(false)
}

fn assert_directory_exists(directory: &Path, display_path: &str) -> Result<()> {
    if directory.is_dir() {
        return Ok(());
    }
    Err(StudybookError::InvalidDirectory(display_path.to_string()))
}
