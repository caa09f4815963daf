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

use super::GetRoomsResponse;
use crate::types::errors::ServerError;
use crate::State;
use axum::extract::Extension;
use axum::Json;

#[tracing::instrument(name = "ListRooms", skip(state), err)]
pub async fn handle(
    Extension(state): Extension<State>,
) -> Result<Json<GetRoomsResponse>, ServerError> {
    let rooms = state.rooms.list_rooms().await?;
    Ok(Json(GetRoomsResponse::from(rooms.as_slice())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::MemoryRoomRepository;
    use crate::types::room::Room;
    use std::sync::Arc;

    #[tokio::test]
    async fn empty() {
        let state = State::new(Arc::new(MemoryRoomRepository::new()));
        let Json(response) = handle(Extension(state)).await.unwrap();
        assert_eq!(response.room_amount, 0);
        assert!(response.rooms.is_empty());
    }

    #[tokio::test]
    async fn counts_all_rooms() {
        let state = State::new(Arc::new(MemoryRoomRepository::new()));
        for name in ["Kitchen", "Bedroom"] {
            state
                .rooms
                .add_room(&Room::new(name, 10.0, false, 220.0))
                .await
                .unwrap();
        }

        let Json(response) = handle(Extension(state)).await.unwrap();
        assert_eq!(response.room_amount, 2);
        let names: Vec<_> = response.rooms.iter().map(|room| room.name.as_str()).collect();
        assert_eq!(names, ["Kitchen", "Bedroom"]);
    }
}
