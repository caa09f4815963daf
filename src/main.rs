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

use axum_server::tls_rustls::RustlsConfig;
use homeapi::config::server::Config;
use homeapi::config::Config as _;
use homeapi::config::Error as ConfigError;
use homeapi::repo::{RoomRepository, SqliteRoomRepository};
use std::env;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::select;
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    const HIDE_TIMESTAMP_ENV: &str = "HOMEAPI_HIDE_TIMESTAMP";

    homeapi::config::init_logging(env::var_os(HIDE_TIMESTAMP_ENV).is_some());
    let config_path = match env::var("HOMEAPI_CONFIG") {
        Ok(path) => PathBuf::from(path),
        Err(_) => Config::default_path()?,
    };

    debug!("Config path: {:?}", config_path);

    let config = match Config::read(&config_path) {
        Ok(config) => config,
        Err(ConfigError::IO(err)) if err.kind() == io::ErrorKind::NotFound => {
            warn!(
                "Config file could not be found at {:?}, writing defaults",
                config_path
            );
            Config::write_defaults(&config_path)?;
            Config::read(&config_path)?
        }
        Err(err) => return Err(err.into()),
    };
    debug!("Config: {:#?}", config);

    let rooms: Arc<dyn RoomRepository> = match &config.database.path {
        Some(path) => Arc::new(SqliteRoomRepository::open(path)?),
        None => {
            warn!("No database path configured, rooms will not be persisted");
            Arc::new(SqliteRoomRepository::open_in_memory()?)
        }
    };
    let state = homeapi::State::new(rooms);

    let address = config.network.socket_address();
    let fut = axum_server::bind(address).serve(homeapi::app(state.clone()).into_make_service());
    info!("Starting server at {}", address);
    if let Some(tls) = &config.tls {
        let tls_address = tls.socket_address();
        let tls_config = RustlsConfig::from_pem_file(&tls.certificate, &tls.private_key).await?;
        let tls_fut = axum_server::bind_rustls(tls_address, tls_config)
            .serve(homeapi::app(state).into_make_service());
        info!("Starting TLS server at {}", tls_address);

        select! {
            val = fut => val?,
            val = tls_fut => val?
        };
    } else {
        fut.await?;
    }

    Ok(())
}
