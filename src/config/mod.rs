// Copyright 2026 the homeapi authors.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

pub mod defaults;
pub mod server;

use regex::Regex;
use serde::{de::DeserializeOwned, Serialize};
use std::{
    env::{self, VarError},
    io::{self, Write},
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::Level;

pub trait Config: DeserializeOwned + Serialize {
    const DEFAULT_TOML: &'static str;
    const DEFAULT_FILE: &'static str;

    fn validate(&self) -> Result<(), String> {
        Ok(())
    }

    fn write_defaults(path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::File::create(path)?;
        file.write_all(Self::DEFAULT_TOML.as_bytes())?;
        Ok(())
    }

    /// Parses the configuration, replacing every `${NAME}` with the value of the environment
    /// variable `NAME`.
    fn parse(s: &str) -> Result<Self, Error> {
        let re = Regex::new(r"\$\{([a-zA-Z_]+)\}").expect("environment variable pattern is valid");
        let mut missing = None;
        let s = re.replace_all(s, |caps: &regex::Captures| {
            let name = &caps[1];
            match env::var(name) {
                Ok(env) => env,
                Err(err) => {
                    missing.get_or_insert_with(|| Error::Env(name.to_string(), err));
                    String::new()
                }
            }
        });
        if let Some(err) = missing {
            return Err(err);
        }
        let config: Self = toml::from_str(&s)?;
        config.validate().map_err(Error::Validation)?;

        Ok(config)
    }

    fn read(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    fn default_path() -> Result<PathBuf, Error> {
        Ok(xdg::BaseDirectories::with_prefix("homeapi")?
            .get_config_home()
            .join(Self::DEFAULT_FILE))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    IO(#[from] io::Error),
    #[error("toml deserialize: {0}")]
    TomlDeserialize(#[from] toml::de::Error),
    #[error("toml serialize: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("environment variable {0} referenced from configuration: {1}")]
    Env(String, VarError),
    #[error("xdg: {0}")]
    Xdg(#[from] xdg::BaseDirectoriesError),
    #[error("validation: {0}")]
    Validation(String),
}

pub fn init_logging(hide_timestamp: bool) {
    const LOG_ENV: &str = "HOMEAPI_LOG";

    let env_filter = match env::var(LOG_ENV) {
        Ok(env) => env,
        Err(VarError::NotPresent) => "info".to_string(),
        Err(VarError::NotUnicode(_)) => panic!(
            "{} environment variable is not valid unicode and can't be read",
            LOG_ENV
        ),
    };
    let level = Level::from_str(&env_filter)
        .unwrap_or_else(|err| panic!("invalid `{}` environment variable {}", LOG_ENV, err));

    if hide_timestamp {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .without_time()
            .init()
    } else {
        tracing_subscriber::fmt().with_max_level(level).init()
    };
}
