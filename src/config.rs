use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

pub const HH_BASE_URL: &str = "https://api.hh.ru";
pub const TV_BASE_URL: &str = "http://opendata.trudvsem.ru/api/v1";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub hh_access_token: String,
    pub hh_base_url: String,
    pub tv_base_url: String,
    pub http_timeout_secs: u64,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            database_url: get_env("DATABASE_URL")?,
            hh_access_token: get_env("HH_ACCESS_TOKEN")?,
            hh_base_url: env::var("HH_BASE_URL").unwrap_or_else(|_| HH_BASE_URL.to_string()),
            tv_base_url: env::var("TV_BASE_URL").unwrap_or_else(|_| TV_BASE_URL.to_string()),
            http_timeout_secs: get_env_parse_or("HTTP_TIMEOUT_SECS", 60)?,
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Err(_) => Ok(default),
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
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
