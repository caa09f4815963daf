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

//! Storage of rooms.
//!
//! [`RoomRepository`] is the contract the HTTP handlers are written against. It has a SQLite
//! backed implementation for real deployments and an in-memory one for tests.

mod memory;
pub mod migrations;
mod sqlite;

pub use memory::MemoryRoomRepository;
pub use sqlite::SqliteRoomRepository;

use crate::types::room::{self, Room, RoomPatch};
use async_trait::async_trait;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("blocking task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("invalid persisted room data: {0}")]
    InvalidData(String),
    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Returns all rooms, in insertion order.
    async fn list_rooms(&self) -> RepoResult<Vec<Room>>;

    /// Returns the first room with exactly the given name, if any.
    async fn find_room_by_name(&self, name: &str) -> RepoResult<Option<Room>>;

    async fn find_room_by_id(&self, id: room::ID) -> RepoResult<Option<Room>>;

    /// Persists a new room. Adding a room whose ID is already stored does nothing.
    async fn add_room(&self, room: &Room) -> RepoResult<()>;

    /// Applies `patch` to `room` and stores the result, inserting the room if it is not stored
    /// yet.
    async fn update_room(&self, room: &mut Room, patch: &RoomPatch) -> RepoResult<()>;
}
