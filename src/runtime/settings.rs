use crate::config;

/// Load settings, falling back to defaults on any problem.
///
/// The second value describes what went wrong, if anything, so it can be
/// logged once tracing is up.
pub fn load_settings() -> (config::Settings, Option<String>) {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                eprintln!("encore: invalid config, using defaults: {msg}");
                (
                    config::Settings::default(),
                    Some(format!("invalid config: {msg}")),
                )
            } else {
                (s, None)
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            eprintln!("encore: failed to load config, using defaults: {e}");
            (
                config::Settings::default(),
                Some(format!("failed to load config: {e}")),
            )
        }
    }
}
