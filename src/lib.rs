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

pub mod config;
pub mod repo;
mod rooms;
pub mod types;

use axum::routing::{get, put};
use axum::{AddExtensionLayer, Router};
use http::{Request, Response};
use hyper::Body;
use repo::RoomRepository;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::{debug, debug_span, Span};

async fn health_check() -> &'static str {
    "I'm alive!"
}

#[derive(Clone)]
pub struct State {
    pub rooms: Arc<dyn RoomRepository>,
}

impl State {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }
}

pub fn app(state: State) -> Router<hyper::Body> {
    Router::new()
        .route("/health_check", get(health_check))
        .route("/rooms", get(rooms::list::handle).post(rooms::add::handle))
        .route("/rooms/:id", put(rooms::edit::handle))
        .layer(AddExtensionLayer::new(state))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    debug_span!(
                        "Request",
                        status_code = tracing::field::Empty,
                        ms = tracing::field::Empty,
                        method = tracing::field::display(request.method()),
                        path = tracing::field::display(request.uri().path()),
                    )
                })
                .on_response(|response: &Response<_>, latency: Duration, span: &Span| {
                    span.record("status_code", &tracing::field::display(response.status()));
                    span.record("ms", &tracing::field::display(latency.as_millis()));

                    debug!("response processed")
                }),
        )
}
