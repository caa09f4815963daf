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

use super::AddRoomRequest;
use crate::types::errors::ServerError;
use crate::types::room::Room;
use crate::State;
use axum::extract::Extension;
use axum::Json;
use http::StatusCode;

/// Adds a room, unless one with the same name already exists.
///
/// The name lookup and the insert are separate storage calls, so two concurrent requests for the
/// same name can both succeed.
#[tracing::instrument(name = "AddRoom", skip(state), err)]
pub async fn handle(
    Extension(state): Extension<State>,
    Json(request): Json<AddRoomRequest>,
) -> Result<(StatusCode, String), ServerError> {
    request.validate().map_err(ServerError::Validation)?;

    if state.rooms.find_room_by_name(&request.name).await?.is_some() {
        return Err(ServerError::Conflict(request.name));
    }

    let room = Room::from(request);
    state.rooms.add_room(&room).await?;
    tracing::info!("Added room {} with id {}", room.name, room.id);

    Ok((StatusCode::CREATED, format!("Room {} added!", room.name)))
}
