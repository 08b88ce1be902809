use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "STUDYBOOK_LOG";

/// Initialise console logging on stderr, so stdout stays clean for `--json`.
///
/// `STUDYBOOK_LOG` takes precedence; otherwise only warnings are shown, or
/// debug output with `--verbose`.
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose { "studybook=debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
