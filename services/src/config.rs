use lazy_static::lazy_static;

/// Path to the Chromium (or Chrome) executable to launch instead of the one found on the `PATH`.
///
pub const CHROME_EXECUTABLE: &str = "MAIL2PDF_CHROME_EXECUTABLE";

/// When set to `true` or `1`, Chromium is launched with its sandbox disabled.
///
pub const CHROME_NO_SANDBOX: &str = "MAIL2PDF_CHROME_NO_SANDBOX";

lazy_static! {
    static ref CONFIG: Config = Config;
}

/// A singleton for accessing global configuration values.
///
pub fn config() -> &'static Config {
    &CONFIG
}

/// A struct used to define an interface for accessing process-wide configuration values.
///
#[derive(Debug, Clone, Default)]
pub struct Config;

impl Config {
    /// Get the value of an environment variable.
    ///
    /// # Arguments
    ///
    /// * `key` - The name of the environment variable.
    ///
    /// # Returns
    ///
    /// The value of the environment variable, or [`None`] if it is not set or empty.
    ///
    pub fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|value| !value.trim().is_empty())
    }

    /// Get the value of an environment variable interpreted as a flag.
    ///
    /// `true`, `yes` and `1` (case-insensitive) are truthy, anything else, including an unset variable, is not.
    ///
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).is_some_and(|value| is_truthy(&value))
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1")
}
