use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub app_env: String,
    pub inference_api_url: Option<String>,
    pub inference_api_token: Option<String>,
    pub question_model: String,
    pub sentiment_model: String,
    pub embedding_model: String,
    pub inference_timeout_secs: u64,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            port: get_env_parse_or("PORT", 5001)?,
            app_env: get_env_or("APP_ENV", "production"),
            inference_api_url: env::var("INFERENCE_API_URL").ok(),
            inference_api_token: env::var("INFERENCE_API_TOKEN").ok(),
            question_model: get_env_or("QUESTION_MODEL", "google/flan-t5-base"),
            sentiment_model: get_env_or(
                "SENTIMENT_MODEL",
                "cardiffnlp/twitter-roberta-base-sentiment-latest",
            ),
            embedding_model: get_env_or(
                "EMBEDDING_MODEL",
                "sentence-transformers/all-MiniLM-L6-v2",
            ),
            inference_timeout_secs: get_env_parse_or("INFERENCE_TIMEOUT_SECS", 30)?,
        })
    }

    pub fn debug_enabled(&self) -> bool {
        self.app_env == "development"
    }
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
