//! Session settings, read from the `[settings]` table of a scenario file.

use serde::Deserialize;

pub const SEED_ENV_VAR: &str = "WHODUNIT_SEED";

/// What to do when the dialogue table has nothing for a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MissingDialogue {
    /// Log a warning and show `Settings::placeholder`.
    #[default]
    Placeholder,
    /// Surface a `GameError` to the caller.
    Error,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Countdown length in seconds; zero disables the countdown.
    #[serde(default = "default_time_limit")]
    pub time_limit_secs: f32,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub missing_dialogue: MissingDialogue,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            time_limit_secs: default_time_limit(),
            seed: None,
            missing_dialogue: MissingDialogue::Placeholder,
            placeholder: default_placeholder(),
        }
    }
}

impl Settings {
    /// Apply environment overrides on top of the authored values.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(raw) = std::env::var(SEED_ENV_VAR) {
            match raw.trim().parse::<u64>() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => tracing::warn!(value = %raw, "ignoring non-numeric {SEED_ENV_VAR}"),
            }
        }
        self
    }
}

fn default_time_limit() -> f32 {
    300.0
}

fn default_placeholder() -> String {
    "...".to_string()
}
