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

//! The `/rooms` endpoints and their wire formats.

pub mod add;
pub mod edit;
pub mod list;

use crate::types::room::{self, Room, RoomPatch};
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomView {
    pub id: room::ID,
    pub name: String,
    pub area: f64,
    pub gas_connected: bool,
    pub voltage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetRoomsResponse {
    pub room_amount: usize,
    pub rooms: Vec<RoomView>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddRoomRequest {
    pub name: String,
    pub area: f64,
    pub gas_connected: bool,
    pub voltage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRoomRequest {
    #[serde(default)]
    pub new_name: Option<String>,
    #[serde(default)]
    pub new_area: Option<f64>,
    #[serde(default)]
    pub new_gas_connected: Option<bool>,
    #[serde(default)]
    pub new_voltage: Option<f64>,
}

impl AddRoomRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("room name must not be empty".to_string());
        }
        validate_area(self.area)
    }
}

impl EditRoomRequest {
    /// An empty `new_name` means "keep the current name"; a blank but non-empty one is rejected.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = self.new_name.as_deref() {
            if !name.is_empty() && name.trim().is_empty() {
                return Err("room name must not be empty".to_string());
            }
        }
        match self.new_area {
            Some(area) => validate_area(area),
            None => Ok(()),
        }
    }
}

fn validate_area(area: f64) -> Result<(), String> {
    if area.is_finite() && area >= 0.0 {
        Ok(())
    } else {
        Err(format!("room area must be a non-negative number, got {}", area))
    }
}

impl From<&Room> for RoomView {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id,
            name: room.name.clone(),
            area: room.area,
            gas_connected: room.gas_connected,
            voltage: room.voltage,
        }
    }
}

impl From<&[Room]> for GetRoomsResponse {
    fn from(rooms: &[Room]) -> Self {
        Self {
            room_amount: rooms.len(),
            rooms: rooms.iter().map(RoomView::from).collect(),
        }
    }
}

impl From<AddRoomRequest> for Room {
    fn from(request: AddRoomRequest) -> Self {
        Room::new(
            request.name,
            request.area,
            request.gas_connected,
            request.voltage,
        )
    }
}

impl From<EditRoomRequest> for RoomPatch {
    fn from(request: EditRoomRequest) -> Self {
        Self {
            new_name: request.new_name,
            new_area: request.new_area,
            new_gas_connected: request.new_gas_connected,
            new_voltage: request.new_voltage,
        }
    }
}
