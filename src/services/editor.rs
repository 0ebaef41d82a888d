// SPDX-License-Identifier: MIT

//! Zone editor: a state machine over the single user-drawn zone.
//!
//! The editor knows nothing about properties or filtering; it only tracks
//! the zone through draw/edit/delete gestures and hands out `ZoneEvent`s
//! for downstream consumers (filter recomputation, zone persistence).

use crate::models::Zone;

/// Read-only view of the editor's current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    /// No zone exists
    Idle,
    /// The user is placing vertices
    Drawing,
    /// A finished zone exists and can be reshaped
    Editing,
}

/// Emitted when a gesture finishes. Consumers treat `Removed` as
/// "zone = empty" for filtering purposes.
#[derive(Debug, Clone, PartialEq)]
pub enum ZoneEvent {
    Created(Zone),
    Edited(Zone),
    Removed,
}

enum State {
    Idle,
    Drawing { points: Vec<(f64, f64)> },
    Editing { committed: Zone, working: Zone },
}

/// Tracks the single editable zone. At most one zone exists at a time;
/// starting a new draw replaces an existing zone rather than accumulating.
pub struct ZoneEditor {
    state: State,
}

impl Default for ZoneEditor {
    fn default() -> Self {
        Self { state: State::Idle }
    }
}

impl ZoneEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EditorState {
        match self.state {
            State::Idle => EditorState::Idle,
            State::Drawing { .. } => EditorState::Drawing,
            State::Editing { .. } => EditorState::Editing,
        }
    }

    /// The committed zone, if one exists. Staged (unfinished) edits are
    /// not visible here.
    pub fn active_zone(&self) -> Option<&Zone> {
        match &self.state {
            State::Editing { committed, .. } => Some(committed),
            _ => None,
        }
    }

    /// Invoke the draw tool. An existing zone is implicitly deleted
    /// (replace semantics), reported through the returned event.
    pub fn begin_draw(&mut self) -> Option<ZoneEvent> {
        let replaced = matches!(self.state, State::Editing { .. });
        self.state = State::Drawing { points: Vec::new() };
        if replaced {
            tracing::debug!("Draw started, previous zone replaced");
            Some(ZoneEvent::Removed)
        } else {
            None
        }
    }

    /// Place the next vertex of the ring being drawn.
    pub fn place_vertex(&mut self, lat: f64, lng: f64) -> Result<(), EditorError> {
        match &mut self.state {
            State::Drawing { points } => {
                points.push((lat, lng));
                Ok(())
            }
            _ => Err(EditorError::NotDrawing),
        }
    }

    /// Close the ring being drawn.
    ///
    /// On success the editor moves to `Editing` and emits
    /// `ZoneEvent::Created`. A ring that is too small or self-intersecting
    /// is rejected; the editor stays in `Drawing` with the placed vertices
    /// intact so the user can adjust.
    pub fn close_ring(&mut self) -> Result<ZoneEvent, EditorError> {
        let State::Drawing { points } = &self.state else {
            return Err(EditorError::NotDrawing);
        };
        let zone = Zone::from_lat_lng(points);
        validate(&zone)?;

        tracing::info!(vertices = zone.len(), "Zone created");
        self.state = State::Editing {
            committed: zone.clone(),
            working: zone.clone(),
        };
        Ok(ZoneEvent::Created(zone))
    }

    /// Stage a vertex drag on the existing zone. Not visible to
    /// `active_zone()` until `finish_edit` commits it.
    pub fn move_vertex(&mut self, index: usize, lat: f64, lng: f64) -> Result<(), EditorError> {
        let State::Editing { working, .. } = &mut self.state else {
            return Err(EditorError::NoActiveZone);
        };
        let len = working.len();
        if index >= len {
            return Err(EditorError::VertexOutOfRange { index, len });
        }
        let mut points: Vec<(f64, f64)> =
            working.vertices().iter().map(|c| (c.y, c.x)).collect();
        points[index] = (lat, lng);
        *working = Zone::from_lat_lng(&points);
        Ok(())
    }

    /// Finish an edit gesture.
    ///
    /// A valid working ring is committed and emitted as
    /// `ZoneEvent::Edited`; an invalid one is discarded and the last
    /// committed ring restored, leaving the prior zone untouched.
    pub fn finish_edit(&mut self) -> Result<ZoneEvent, EditorError> {
        let State::Editing { committed, working } = &mut self.state else {
            return Err(EditorError::NoActiveZone);
        };
        match validate(working) {
            Ok(()) => {
                *committed = working.clone();
                tracing::info!(vertices = committed.len(), "Zone edited");
                Ok(ZoneEvent::Edited(committed.clone()))
            }
            Err(e) => {
                *working = committed.clone();
                Err(e)
            }
        }
    }

    /// Delete the zone.
    pub fn remove(&mut self) -> Result<ZoneEvent, EditorError> {
        if !matches!(self.state, State::Editing { .. }) {
            return Err(EditorError::NoActiveZone);
        }
        self.state = State::Idle;
        tracing::info!("Zone removed");
        Ok(ZoneEvent::Removed)
    }
}

fn validate(zone: &Zone) -> Result<(), EditorError> {
    if !zone.is_testable() {
        return Err(EditorError::TooFewVertices(zone.len()));
    }
    if zone.is_self_intersecting() {
        return Err(EditorError::SelfIntersecting);
    }
    Ok(())
}

/// Errors surfaced inline to the user at the editor level.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("No draw in progress")]
    NotDrawing,

    #[error("No zone to edit")]
    NoActiveZone,

    #[error("A zone needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("Zone edges must not cross each other")]
    SelfIntersecting,

    #[error("Vertex index {index} out of range for a ring of {len}")]
    VertexOutOfRange { index: usize, len: usize },
}
