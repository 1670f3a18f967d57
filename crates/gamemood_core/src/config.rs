use crate::WellnessError;
use secrecy::SecretString;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Settings for the mood text analysis service.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: SecretString,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, WellnessError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Read configuration through `get` so tests don't touch the process
    /// environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, WellnessError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let api = get("GAMEMOOD_LLM_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| WellnessError::Config("GAMEMOOD_LLM_API_KEY missing".into()))?;
        let base_url = get("GAMEMOOD_LLM_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let model = get("GAMEMOOD_LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into());
        let timeout_secs = match get("GAMEMOOD_LLM_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                WellnessError::Config(format!("GAMEMOOD_LLM_TIMEOUT_SECS is not a number: {raw}"))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        Ok(Self {
            api_key: SecretString::new(api.into()),
            base_url,
            model,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
