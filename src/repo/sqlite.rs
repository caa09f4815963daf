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

use super::migrations::apply_migrations;
use super::{RepoError, RepoResult, RoomRepository};
use crate::types::room::{self, Room, RoomPatch};
use async_trait::async_trait;
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tokio::task;
use uuid::Uuid;

const ROOM_SELECT_SQL: &str = "SELECT id, name, area, gas_connected, voltage FROM rooms";

/// Room repository backed by a single SQLite connection.
///
/// Queries run on tokio's blocking thread pool, one at a time.
#[derive(Clone)]
pub struct SqliteRoomRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteRoomRepository {
    /// Opens (or creates) the database file at `path` and applies pending migrations.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        let path = path.as_ref();
        let started_at = Instant::now();
        let conn = Connection::open(path)?;
        let repository = Self::bootstrap(conn)?;
        tracing::info!(
            "Opened room database at {:?} in {}ms",
            path,
            started_at.elapsed().as_millis()
        );
        Ok(repository)
    }

    /// Opens a fresh in-memory database. Its contents are lost when the repository is dropped.
    pub fn open_in_memory() -> RepoResult<Self> {
        let conn = Connection::open_in_memory()?;
        let repository = Self::bootstrap(conn)?;
        tracing::info!("Opened in-memory room database");
        Ok(repository)
    }

    fn bootstrap(mut conn: Connection) -> RepoResult<Self> {
        conn.busy_timeout(Duration::from_secs(5))?;
        apply_migrations(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn call<T, F>(&self, f: F) -> RepoResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> RepoResult<T> + Send + 'static,
    {
        let conn = self.conn.clone();
        task::spawn_blocking(move || {
            let conn = conn.lock().unwrap_or_else(PoisonError::into_inner);
            f(&conn)
        })
        .await?
    }
}

#[async_trait]
impl RoomRepository for SqliteRoomRepository {
    async fn list_rooms(&self) -> RepoResult<Vec<Room>> {
        self.call(|conn| {
            let mut stmt = conn.prepare(&format!("{} ORDER BY seq ASC;", ROOM_SELECT_SQL))?;
            let mut rows = stmt.query(params![])?;
            let mut rooms = Vec::new();
            while let Some(row) = rows.next()? {
                rooms.push(parse_room_row(row)?);
            }
            Ok(rooms)
        })
        .await
    }

    async fn find_room_by_name(&self, name: &str) -> RepoResult<Option<Room>> {
        let name = name.to_owned();
        self.call(move |conn| {
            query_one(
                conn,
                &format!("{} WHERE name = ?1 ORDER BY seq ASC LIMIT 1;", ROOM_SELECT_SQL),
                &name,
            )
        })
        .await
    }

    async fn find_room_by_id(&self, id: room::ID) -> RepoResult<Option<Room>> {
        self.call(move |conn| {
            query_one(
                conn,
                &format!("{} WHERE id = ?1;", ROOM_SELECT_SQL),
                &id.to_string(),
            )
        })
        .await
    }

    async fn add_room(&self, room: &Room) -> RepoResult<()> {
        let room = room.clone();
        self.call(move |conn| {
            let inserted = conn.execute(
                "INSERT INTO rooms (id, name, area, gas_connected, voltage)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT (id) DO NOTHING;",
                params![
                    room.id.to_string(),
                    room.name,
                    room.area,
                    room.gas_connected,
                    room.voltage,
                ],
            )?;
            if inserted == 0 {
                tracing::debug!("Room {} is already stored, not inserting", room.id);
            }
            Ok(())
        })
        .await
    }

    async fn update_room(&self, room: &mut Room, patch: &RoomPatch) -> RepoResult<()> {
        room.apply(patch);
        let room = room.clone();
        self.call(move |conn| {
            conn.execute(
                "INSERT INTO rooms (id, name, area, gas_connected, voltage)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT (id) DO UPDATE SET
                    name = excluded.name,
                    area = excluded.area,
                    gas_connected = excluded.gas_connected,
                    voltage = excluded.voltage;",
                params![
                    room.id.to_string(),
                    room.name,
                    room.area,
                    room.gas_connected,
                    room.voltage,
                ],
            )?;
            Ok(())
        })
        .await
    }
}

fn query_one(conn: &Connection, sql: &str, key: &str) -> RepoResult<Option<Room>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params![key])?;
    match rows.next()? {
        Some(row) => Ok(Some(parse_room_row(row)?)),
        None => Ok(None),
    }
}

fn parse_room_row(row: &Row<'_>) -> RepoResult<Room> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{}` in rooms.id", id_text))
    })?;

    Ok(Room {
        id,
        name: row.get("name")?,
        area: row.get("area")?,
        gas_connected: row.get("gas_connected")?,
        voltage: row.get("voltage")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kitchen() -> Room {
        Room::new("Kitchen", 12.5, true, 220.0)
    }

    #[tokio::test]
    async fn add_then_find() {
        let repo = SqliteRoomRepository::open_in_memory().unwrap();
        let room = kitchen();
        repo.add_room(&room).await.unwrap();

        assert_eq!(repo.find_room_by_id(room.id).await.unwrap(), Some(room.clone()));
        assert_eq!(
            repo.find_room_by_name("Kitchen").await.unwrap(),
            Some(room)
        );
        assert_eq!(repo.find_room_by_name("kitchen").await.unwrap(), None);
        assert_eq!(repo.find_room_by_id(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let repo = SqliteRoomRepository::open_in_memory().unwrap();
        let rooms = vec![
            Room::new("Kitchen", 12.5, true, 220.0),
            Room::new("Bathroom", 4.0, false, 220.0),
            Room::new("Attic", 30.25, false, 110.0),
        ];
        for room in &rooms {
            repo.add_room(room).await.unwrap();
        }

        assert_eq!(repo.list_rooms().await.unwrap(), rooms);
    }

    #[tokio::test]
    async fn adding_same_room_twice_is_a_no_op() {
        let repo = SqliteRoomRepository::open_in_memory().unwrap();
        let room = kitchen();
        repo.add_room(&room).await.unwrap();

        let mut resaved = room.clone();
        resaved.area = 99.0;
        repo.add_room(&resaved).await.unwrap();

        assert_eq!(repo.list_rooms().await.unwrap(), vec![room]);
    }

    #[tokio::test]
    async fn duplicate_names_are_not_rejected_by_storage() {
        let repo = SqliteRoomRepository::open_in_memory().unwrap();
        let first = kitchen();
        let second = kitchen();
        repo.add_room(&first).await.unwrap();
        repo.add_room(&second).await.unwrap();

        assert_eq!(repo.list_rooms().await.unwrap().len(), 2);
        assert_eq!(
            repo.find_room_by_name("Kitchen").await.unwrap(),
            Some(first)
        );
    }

    #[tokio::test]
    async fn update_applies_patch_and_persists() {
        let repo = SqliteRoomRepository::open_in_memory().unwrap();
        let mut room = kitchen();
        repo.add_room(&room).await.unwrap();

        repo.update_room(
            &mut room,
            &RoomPatch {
                new_name: Some(String::new()),
                new_area: Some(15.0),
                ..RoomPatch::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(room.name, "Kitchen");
        assert_eq!(room.area, 15.0);
        let stored = repo.find_room_by_id(room.id).await.unwrap().unwrap();
        assert_eq!(stored, room);
    }

    #[tokio::test]
    async fn update_of_unstored_room_inserts_it() {
        let repo = SqliteRoomRepository::open_in_memory().unwrap();
        let mut room = kitchen();

        repo.update_room(&mut room, &RoomPatch::default())
            .await
            .unwrap();

        assert_eq!(repo.list_rooms().await.unwrap(), vec![room]);
    }

    #[tokio::test]
    async fn fractional_values_are_stored_exactly() {
        let repo = SqliteRoomRepository::open_in_memory().unwrap();
        let room = Room::new("Workshop", 20.75, false, 220.5);
        repo.add_room(&room).await.unwrap();

        let stored = repo.find_room_by_id(room.id).await.unwrap().unwrap();
        assert_eq!(stored.area, 20.75);
        assert_eq!(stored.voltage, 220.5);
    }

    #[tokio::test]
    async fn rooms_survive_reopening_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rooms.db");
        let room = kitchen();
        {
            let repo = SqliteRoomRepository::open(&path).unwrap();
            repo.add_room(&room).await.unwrap();
        }

        let repo = SqliteRoomRepository::open(&path).unwrap();
        assert_eq!(repo.list_rooms().await.unwrap(), vec![room]);
    }

    #[test]
    fn opening_newer_schema_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rooms.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch("PRAGMA user_version = 42;")
            .unwrap();

        assert!(matches!(
            SqliteRoomRepository::open(&path),
            Err(RepoError::UnsupportedSchemaVersion { db_version: 42, .. })
        ));
    }

    #[tokio::test]
    async fn corrupt_id_is_reported() {
        let repo = SqliteRoomRepository::open_in_memory().unwrap();
        repo.call(|conn| {
            conn.execute(
                "INSERT INTO rooms (id, name, area, gas_connected, voltage)
                 VALUES ('not-a-uuid', 'Cellar', 8.0, 0, 220);",
                params![],
            )?;
            Ok(())
        })
        .await
        .unwrap();

        assert!(matches!(
            repo.list_rooms().await,
            Err(RepoError::InvalidData(_))
        ));
    }
}
