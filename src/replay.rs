//! Recorded input scripts.
//!
//! A script is a JSON array of timed events:
//!
//! ```json
//! [
//!   { "t": 0,  "kind": "down", "x": 20,  "y": 40 },
//!   { "t": 16, "kind": "move", "x": 60,  "y": 42 },
//!   { "t": 40, "kind": "up",   "x": 60,  "y": 42, "source": "mouse" }
//! ]
//! ```
//!
//! `t` is in milliseconds from the start of the recording and `source`
//! defaults to `mouse`. Replaying feeds the events to a pad as if a host had
//! delivered them, running the sampling clock between events.
//!
//! A pad listens either to pointer events or to mouse and touch, so a script
//! may not mix `pointer` with the other two sources.

use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::PadResult;
use crate::input::{
    HostCapabilities, InputSource, Phase, PointerInput, RawInput, TouchInput, TouchPoint,
};
use crate::pad::SignaturePad;

/// One event of a recorded script.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptEvent {
    /// Milliseconds since the recording started
    pub t: u64,
    pub kind: Phase,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub source: InputSource,
}

impl ScriptEvent {
    /// Converts to the host event delivered at `start + t`.
    pub fn to_raw(&self, start: Instant) -> RawInput {
        let at = start + Duration::from_millis(self.t);
        match self.source {
            InputSource::Mouse => RawInput::Mouse(self.pointer_input(at)),
            InputSource::Pointer => RawInput::Pointer(self.pointer_input(at)),
            InputSource::Touch => {
                let point = TouchPoint {
                    id: 0,
                    client_x: self.x,
                    client_y: self.y,
                };
                let target_touches = match self.kind {
                    Phase::Down | Phase::Move => vec![point],
                    Phase::Up | Phase::Leave => Vec::new(),
                };
                RawInput::Touch(TouchInput {
                    phase: self.kind,
                    target_touches,
                    changed_touches: vec![point],
                    at,
                })
            }
        }
    }

    fn pointer_input(&self, at: Instant) -> PointerInput {
        PointerInput {
            phase: self.kind,
            client_x: self.x,
            client_y: self.y,
            at,
        }
    }
}

/// Reads a script file.
pub fn load_script(path: &Path) -> Result<Vec<ScriptEvent>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read script from {}", path.display()))?;
    parse_script(&contents).with_context(|| format!("Failed to parse script {}", path.display()))
}

pub fn parse_script(contents: &str) -> Result<Vec<ScriptEvent>> {
    let mut events: Vec<ScriptEvent> = serde_json::from_str(contents)?;
    // Recordings from several sources may interleave; keep them in time order
    events.sort_by_key(|event| event.t);
    Ok(events)
}

/// Host capabilities under which every event of the script is listened to.
pub fn host_capabilities(events: &[ScriptEvent]) -> Result<HostCapabilities> {
    let pointer = events
        .iter()
        .any(|event| event.source == InputSource::Pointer);
    if !pointer {
        return Ok(HostCapabilities {
            pointer_events: false,
            touch_events: true,
        });
    }
    if let Some(other) = events
        .iter()
        .find(|event| event.source != InputSource::Pointer)
    {
        bail!(
            "Script mixes pointer events with {:?} events (at t = {} ms)",
            other.source,
            other.t
        );
    }
    Ok(HostCapabilities {
        pointer_events: true,
        touch_events: false,
    })
}

/// Feeds `events` into `pad` on a virtual clock starting at `start`.
///
/// Samples held back by the sampling window are delivered before each event
/// once they fall due, the way a host's frame loop would. Returns the time
/// of the last event.
pub fn replay(pad: &mut SignaturePad, events: &[ScriptEvent], start: Instant) -> PadResult<Instant> {
    let mut now = start;
    for event in events {
        now = start + Duration::from_millis(event.t);
        pad.tick(now)?;
        pad.handle_input(event.to_raw(start))?;
    }
    debug!("Replayed {} events", events.len());
    Ok(now)
}
