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

mod internal;

pub use internal::Error as InternalError;

use crate::repo::RepoError;
use crate::types::room;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServerError {
    #[error("internal error: {0}")]
    Internal(#[from] InternalError),
    /// The request body contained an invalid value.
    #[error("Error: {0}")]
    Validation(String),
    /// A room with the given name already exists.
    #[error("Error: room {0} already exists.")]
    Conflict(String),
    /// No room with the given ID exists.
    #[error("Error: room with id {0} is not connected!")]
    UnknownRoom(room::ID),
}

impl axum::response::IntoResponse for ServerError {
    type Body = axum::body::Full<hyper::body::Bytes>;

    type BodyError = <Self::Body as axum::body::HttpBody>::Error;

    fn into_response(self) -> http::Response<Self::Body> {
        use http::StatusCode;
        let (status, message) = match self {
            Self::Validation(_) | Self::UnknownRoom(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            Self::Conflict(_) => (StatusCode::CONFLICT, self.to_string()),
            Self::Internal(ref err) => {
                tracing::error!("Request failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        let mut response = message.into_response();
        *response.status_mut() = status;

        response
    }
}

impl From<RepoError> for InternalError {
    fn from(e: RepoError) -> Self {
        Self::Storage(e.to_string())
    }
}

impl From<RepoError> for ServerError {
    fn from(e: RepoError) -> Self {
        Self::Internal(e.into())
    }
}
