use std::env;

use crate::domain::DateInputKind;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub date_input: DateInputKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://library.db?mode=rwc".to_string(),
            date_input: DateInputKind::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let date_input = match env::var("DATE_INPUT") {
            Ok(value) => DateInputKind::parse(&value).unwrap_or_else(|| {
                tracing::warn!("Unknown DATE_INPUT {:?}, using text entry", value);
                defaults.date_input
            }),
            Err(_) => defaults.date_input,
        };

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            date_input,
        }
    }
}
