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

use super::{RepoResult, RoomRepository};
use crate::types::room::{self, Room, RoomPatch};
use async_trait::async_trait;
use std::sync::{PoisonError, RwLock};

/// Room repository which keeps everything in memory, in insertion order.
#[derive(Debug, Default)]
pub struct MemoryRoomRepository {
    rooms: RwLock<Vec<Room>>,
}

impl MemoryRoomRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for MemoryRoomRepository {
    async fn list_rooms(&self) -> RepoResult<Vec<Room>> {
        Ok(self
            .rooms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn find_room_by_name(&self, name: &str) -> RepoResult<Option<Room>> {
        Ok(self
            .rooms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|room| room.name == name)
            .cloned())
    }

    async fn find_room_by_id(&self, id: room::ID) -> RepoResult<Option<Room>> {
        Ok(self
            .rooms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|room| room.id == id)
            .cloned())
    }

    async fn add_room(&self, room: &Room) -> RepoResult<()> {
        let mut rooms = self.rooms.write().unwrap_or_else(PoisonError::into_inner);
        if !rooms.iter().any(|stored| stored.id == room.id) {
            rooms.push(room.clone());
        }
        Ok(())
    }

    async fn update_room(&self, room: &mut Room, patch: &RoomPatch) -> RepoResult<()> {
        room.apply(patch);
        let mut rooms = self.rooms.write().unwrap_or_else(PoisonError::into_inner);
        match rooms.iter().position(|stored| stored.id == room.id) {
            Some(index) => rooms[index] = room.clone(),
            None => rooms.push(room.clone()),
        }
        Ok(())
    }
}
