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

use uuid::Uuid;

pub type ID = Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    /// Unique ID of the room, assigned on creation.
    pub id: ID,
    /// Name of the room, unique among all rooms.
    pub name: String,
    /// Floor area of the room.
    pub area: f64,
    /// Whether the room has a gas connection.
    pub gas_connected: bool,
    /// Mains voltage available in the room.
    pub voltage: f64,
}

/// A partial update of a [`Room`]. Fields which are `None` are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomPatch {
    pub new_name: Option<String>,
    pub new_area: Option<f64>,
    pub new_gas_connected: Option<bool>,
    pub new_voltage: Option<f64>,
}

impl Room {
    /// Creates a new room with a freshly generated ID.
    pub fn new(name: impl Into<String>, area: f64, gas_connected: bool, voltage: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            area,
            gas_connected,
            voltage,
        }
    }

    /// Applies the fields present in `patch`.
    ///
    /// An empty `new_name` counts as absent, so a room's name can never be cleared.
    pub fn apply(&mut self, patch: &RoomPatch) {
        if let Some(name) = patch.new_name.as_deref().filter(|name| !name.is_empty()) {
            self.name = name.to_owned();
        }
        if let Some(area) = patch.new_area {
            self.area = area;
        }
        if let Some(gas_connected) = patch.new_gas_connected {
            self.gas_connected = gas_connected;
        }
        if let Some(voltage) = patch.new_voltage {
            self.voltage = voltage;
        }
    }
}
