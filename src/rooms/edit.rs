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

use super::EditRoomRequest;
use crate::types::errors::ServerError;
use crate::types::room::{self, RoomPatch};
use crate::State;
use axum::extract::{Extension, Path};
use axum::Json;
use http::StatusCode;

#[tracing::instrument(name = "EditRoom", skip(state), err)]
pub async fn handle(
    Extension(state): Extension<State>,
    Path(id): Path<room::ID>,
    Json(request): Json<EditRoomRequest>,
) -> Result<(StatusCode, String), ServerError> {
    let mut room = state
        .rooms
        .find_room_by_id(id)
        .await?
        .ok_or(ServerError::UnknownRoom(id))?;
    request.validate().map_err(ServerError::Validation)?;

    state
        .rooms
        .update_room(&mut room, &RoomPatch::from(request))
        .await?;

    Ok((
        StatusCode::OK,
        format!(
            "Room updated! {}. Area - {}, Gas - {}, Voltage - {}",
            room.name, room.area, room.gas_connected, room.voltage
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::MemoryRoomRepository;
    use crate::types::room::Room;
    use std::sync::Arc;
    use uuid::Uuid;

    async fn state_with_kitchen() -> (State, Room) {
        let state = State::new(Arc::new(MemoryRoomRepository::new()));
        let room = Room::new("Kitchen", 12.5, true, 220.0);
        state.rooms.add_room(&room).await.unwrap();
        (state, room)
    }

    #[tokio::test]
    async fn unknown_id_is_bad_request() {
        let (state, room) = state_with_kitchen().await;
        let id = Uuid::new_v4();
        let request = EditRoomRequest {
            new_name: Some("Cellar".to_string()),
            ..EditRoomRequest::default()
        };

        let response = handle(Extension(state.clone()), Path(id), Json(request)).await;
        assert_eq!(response, Err(ServerError::UnknownRoom(id)));
        assert_eq!(state.rooms.list_rooms().await.unwrap(), vec![room]);
    }

    #[tokio::test]
    async fn partial_patch_keeps_other_fields() {
        let (state, room) = state_with_kitchen().await;
        let request = EditRoomRequest {
            new_name: Some(String::new()),
            new_area: Some(15.0),
            ..EditRoomRequest::default()
        };

        let response = handle(Extension(state.clone()), Path(room.id), Json(request)).await;
        assert_eq!(
            response,
            Ok((
                StatusCode::OK,
                "Room updated! Kitchen. Area - 15, Gas - true, Voltage - 220".to_string()
            ))
        );

        let stored = state.rooms.find_room_by_id(room.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Kitchen");
        assert_eq!(stored.area, 15.0);
        assert!(stored.gas_connected);
        assert_eq!(stored.voltage, 220.0);
    }

    #[tokio::test]
    async fn repeated_patch_is_idempotent() {
        let (state, room) = state_with_kitchen().await;
        let request = EditRoomRequest {
            new_name: Some("Dining room".to_string()),
            new_gas_connected: Some(false),
            new_voltage: Some(110.0),
            ..EditRoomRequest::default()
        };

        let first = handle(Extension(state.clone()), Path(room.id), Json(request.clone())).await;
        let after_first = state.rooms.list_rooms().await.unwrap();
        let second = handle(Extension(state.clone()), Path(room.id), Json(request)).await;

        assert_eq!(first, second);
        assert_eq!(state.rooms.list_rooms().await.unwrap(), after_first);
        assert_eq!(after_first[0].name, "Dining room");
    }

    #[tokio::test]
    async fn negative_area_is_rejected() {
        let (state, room) = state_with_kitchen().await;
        let request = EditRoomRequest {
            new_area: Some(-1.0),
            ..EditRoomRequest::default()
        };

        let response = handle(Extension(state.clone()), Path(room.id), Json(request)).await;
        assert!(matches!(response, Err(ServerError::Validation(_))));
        assert_eq!(state.rooms.list_rooms().await.unwrap(), vec![room]);
    }

    #[tokio::test]
    async fn blank_new_name_is_rejected() {
        let (state, room) = state_with_kitchen().await;
        let request = EditRoomRequest {
            new_name: Some("   ".to_string()),
            ..EditRoomRequest::default()
        };

        let response = handle(Extension(state.clone()), Path(room.id), Json(request)).await;
        assert!(matches!(response, Err(ServerError::Validation(_))));
        assert_eq!(
            state.rooms.find_room_by_id(room.id).await.unwrap().unwrap().name,
            "Kitchen"
        );
    }
}
