//! Program normalization: unique room keys and input validation.
//!
//! Duplicate room names are resolved once, before any scheme run, by appending
//! a numeric suffix. The resulting [`RoomProgram`] is immutable and can be
//! shared by every strategy run.
use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::program::RoomRequest;

/// A room with a program-unique name. `base_name` is the name the rule
/// provider knows the room by.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ProgramRoom {
    pub name: String,
    pub base_name: String,
    pub width: f32,
    pub depth: f32,
}

impl ProgramRoom {
    pub fn area(&self) -> f32 {
        self.width * self.depth
    }
}

/// A uniquely keyed room program.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoomProgram {
    rooms: Vec<ProgramRoom>,
}

impl RoomProgram {
    /// Validate and normalize a list of requests.
    pub fn try_from_requests(requests: &[RoomRequest]) -> Result<Self> {
        validate_program(requests)?;
        Ok(normalize_program(requests))
    }

    pub fn rooms(&self) -> &[ProgramRoom] {
        &self.rooms
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Raw area of all requested rooms.
    pub fn total_area(&self) -> f32 {
        self.rooms.iter().map(ProgramRoom::area).sum()
    }

    pub fn get(&self, name: &str) -> Option<&ProgramRoom> {
        self.rooms.iter().find(|r| r.name == name)
    }
}

/// Give every request a unique name. The first occurrence keeps its name,
/// later ones become `"<name> 2"`, `"<name> 3"`, skipping names already taken.
pub fn normalize_program(requests: &[RoomRequest]) -> RoomProgram {
    let mut taken: HashSet<String> = requests.iter().map(|r| r.name.clone()).collect();
    let mut seen: HashSet<&str> = HashSet::with_capacity(requests.len());
    let mut rooms = Vec::with_capacity(requests.len());

    for request in requests {
        let name = if seen.insert(request.name.as_str()) {
            request.name.clone()
        } else {
            let mut suffix = 2usize;
            loop {
                let candidate = format!("{} {}", request.name, suffix);
                if !taken.contains(&candidate) {
                    break candidate;
                }
                suffix += 1;
            }
        };
        if name != request.name {
            debug!("Renamed duplicate room '{}' to '{}'.", request.name, name);
        }
        taken.insert(name.clone());
        rooms.push(ProgramRoom {
            name,
            base_name: request.name.clone(),
            width: request.width,
            depth: request.depth,
        });
    }

    RoomProgram { rooms }
}

/// Reject requests the engine cannot meaningfully place.
pub fn validate_program(requests: &[RoomRequest]) -> Result<()> {
    for (index, request) in requests.iter().enumerate() {
        if request.name.trim().is_empty() {
            return Err(Error::InvalidProgram(format!(
                "room #{index} has an empty name"
            )));
        }
        if !(request.width.is_finite() && request.width > 0.0)
            || !(request.depth.is_finite() && request.depth > 0.0)
        {
            return Err(Error::InvalidProgram(format!(
                "room '{}' has non-positive dimensions: {}x{}",
                request.name, request.width, request.depth
            )));
        }
    }
    Ok(())
}
