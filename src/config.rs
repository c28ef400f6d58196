// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Deserialize;
use thiserror::Error;

pub const ENV_PREFIX: &str = "COTIZA_";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment configuration: {0}")]
    Env(#[from] envy::Error),
    #[error("{0} is not set (use the environment, a .env file, or {1})")]
    Missing(&'static str, &'static str),
    #[error("API key contains characters not allowed in an HTTP header")]
    InvalidApiKey,
    #[error("Could not build HTTP client: {0}")]
    Http(String),
}

/// Connection settings for the backend API.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Default, Deserialize)]
struct EnvConfig {
    api_url: Option<String>,
    api_key: Option<String>,
    timeout_secs: Option<u64>,
}

/// Values given on the command line; they win over the environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct Overrides<'a> {
    pub api_url: Option<&'a str>,
    pub api_key: Option<&'a str>,
}

impl Config {
    /// Loads `.env` if present, then reads `COTIZA_*` variables.
    pub fn load(overrides: Overrides<'_>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars(), overrides)
    }

    pub fn from_vars<I>(vars: I, overrides: Overrides<'_>) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let env: EnvConfig = envy::prefixed(ENV_PREFIX).from_iter(vars)?;
        let pick = |flag: Option<&str>, env: Option<String>| {
            flag.map(str::to_string)
                .or(env)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let api_url = pick(overrides.api_url, env.api_url)
            .ok_or(ConfigError::Missing("COTIZA_API_URL", "--api-url"))?;
        let api_key = pick(overrides.api_key, env.api_key)
            .ok_or(ConfigError::Missing("COTIZA_API_KEY", "--api-key"))?;
        Ok(Self {
            api_url,
            api_key,
            timeout_secs: env.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }
}
