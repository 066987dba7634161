use std::{env, path::PathBuf, time::Duration};

use crate::{error::ConfigError, models::session::DEFAULT_TIME_LIMIT_SECS};

pub const TIME_LIMIT_VAR: &str = "QUIZ_TIME_LIMIT";
pub const TICK_MS_VAR: &str = "QUIZ_TICK_MS";
pub const LOG_DIR_VAR: &str = "QUIZ_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    /// Countdown units per question.
    pub time_limit_secs: u32,
    /// Real time between two countdown units.
    pub tick_interval: Duration,
    pub questions_path: Option<PathBuf>,
    pub log_dir: PathBuf,
}

impl Default for QuizConfig {
    fn default() -> Self {
        QuizConfig {
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            tick_interval: Duration::from_secs(1),
            questions_path: None,
            log_dir: PathBuf::from("log"),
        }
    }
}

impl QuizConfig {
    /// First CLI argument is the question file; the rest comes from
    /// `QUIZ_TIME_LIMIT`, `QUIZ_TICK_MS` and `QUIZ_LOG_DIR`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_sources(env::args().nth(1), |key| env::var(key).ok())
    }

    pub fn from_sources<F>(questions_arg: Option<String>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = QuizConfig {
            questions_path: questions_arg.map(PathBuf::from),
            ..QuizConfig::default()
        };

        if let Some(value) = lookup(TIME_LIMIT_VAR) {
            config.time_limit_secs = parse_positive(TIME_LIMIT_VAR, &value)?;
        }
        if let Some(value) = lookup(TICK_MS_VAR) {
            config.tick_interval = Duration::from_millis(parse_positive(TICK_MS_VAR, &value)?);
        }
        if let Some(value) = lookup(LOG_DIR_VAR) {
            config.log_dir = PathBuf::from(value);
        }

        Ok(config)
    }
}

fn parse_positive<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match value.trim().parse::<T>() {
        Ok(parsed) if parsed > T::default() => Ok(parsed),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}
