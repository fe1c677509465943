//! Host input events and their normalized form.
//!
//! Hosts deliver mouse, touch, or unified pointer events. They are folded
//! into a single [`PadEvent`] at the boundary so the stroke state machine
//! never needs to know which modality produced a sample.

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Which family of host events produced an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputSource {
    /// Classic mouse events (`down`, `move`, `out`, `up`)
    #[default]
    Mouse,
    /// Touch events; only the first active touch point is tracked
    Touch,
    /// Unified pointer events covering mouse, pen and touch
    Pointer,
}

/// Lifecycle phase of a host event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Button pressed or touch started
    Down,
    /// Motion
    Move,
    /// Button released or touch ended
    Up,
    /// Pointer left the surface
    Leave,
}

/// A mouse or pointer event with a single client-space position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub phase: Phase,
    pub client_x: f64,
    pub client_y: f64,
    pub at: Instant,
}

/// One contact point of a touch event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: u64,
    pub client_x: f64,
    pub client_y: f64,
}

/// A touch event. `target_touches` lists every contact currently on the
/// surface, `changed_touches` the ones this event is about.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchInput {
    pub phase: Phase,
    pub target_touches: Vec<TouchPoint>,
    pub changed_touches: Vec<TouchPoint>,
    pub at: Instant,
}

/// Raw event as delivered by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput {
    Mouse(PointerInput),
    Pointer(PointerInput),
    Touch(TouchInput),
}

impl RawInput {
    pub fn source(&self) -> InputSource {
        match self {
            Self::Mouse(_) => InputSource::Mouse,
            Self::Pointer(_) => InputSource::Pointer,
            Self::Touch(_) => InputSource::Touch,
        }
    }
}

/// What a normalized event asks the state machine to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadEventKind {
    Press,
    Move,
    Release,
    Leave,
}

/// Modality-agnostic input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PadEvent {
    pub kind: PadEventKind,
    pub source: InputSource,
    /// Client-space position. `None` for releases without coordinates and
    /// for presses that should not re-anchor the stroke (extra touches).
    pub position: Option<(f64, f64)>,
    /// Touch presses draw a dot immediately; mouse presses wait for motion.
    pub draws_on_press: bool,
    pub at: Instant,
}

impl PadEvent {
    fn from_pointer(source: InputSource, input: &PointerInput) -> Self {
        let kind = match input.phase {
            Phase::Down => PadEventKind::Press,
            Phase::Move => PadEventKind::Move,
            Phase::Up => PadEventKind::Release,
            Phase::Leave => PadEventKind::Leave,
        };
        Self {
            kind,
            source,
            position: Some((input.client_x, input.client_y)),
            draws_on_press: false,
            at: input.at,
        }
    }

    fn from_touch(input: &TouchInput) -> Option<Self> {
        let first = |touches: &[TouchPoint]| touches.first().map(|t| (t.client_x, t.client_y));

        let (kind, position, draws_on_press) = match input.phase {
            Phase::Down => {
                // A second finger keeps the pen down but must not move the anchor
                if input.target_touches.len() == 1 {
                    (PadEventKind::Press, first(&input.changed_touches), true)
                } else {
                    (PadEventKind::Press, None, false)
                }
            }
            Phase::Move => (
                PadEventKind::Move,
                Some(first(&input.target_touches)?),
                false,
            ),
            Phase::Up => (PadEventKind::Release, first(&input.changed_touches), false),
            Phase::Leave => (PadEventKind::Leave, first(&input.changed_touches), false),
        };

        Some(Self {
            kind,
            source: InputSource::Touch,
            position,
            draws_on_press,
            at: input.at,
        })
    }
}

/// Folds a host event into a [`PadEvent`].
///
/// Returns `None` for events that carry nothing to act on, such as a touch
/// move with no active contact.
pub fn normalize(input: &RawInput) -> Option<PadEvent> {
    match input {
        RawInput::Mouse(event) => Some(PadEvent::from_pointer(InputSource::Mouse, event)),
        RawInput::Pointer(event) => Some(PadEvent::from_pointer(InputSource::Pointer, event)),
        RawInput::Touch(event) => PadEvent::from_touch(event),
    }
}

/// Input facilities the host platform offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HostCapabilities {
    pub pointer_events: bool,
    pub touch_events: bool,
}

/// Set of modalities the pad currently listens to.
///
/// Unified pointer events are preferred; hosts without them get mouse
/// listeners plus touch listeners when touch is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Listeners {
    pub mouse: bool,
    pub touch: bool,
    pub pointer: bool,
}

impl Listeners {
    pub fn for_capabilities(caps: HostCapabilities) -> Self {
        if caps.pointer_events {
            Self {
                pointer: true,
                ..Self::default()
            }
        } else {
            Self {
                mouse: true,
                touch: caps.touch_events,
                pointer: false,
            }
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn accepts(&self, source: InputSource) -> bool {
        match source {
            InputSource::Mouse => self.mouse,
            InputSource::Touch => self.touch,
            InputSource::Pointer => self.pointer,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.mouse || self.touch || self.pointer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(id: u64, x: f64, y: f64) -> TouchPoint {
        TouchPoint {
            id,
            client_x: x,
            client_y: y,
        }
    }

    #[test]
    fn pointer_phases_map_one_to_one() {
        let at = Instant::now();
        for (phase, kind) in [
            (Phase::Down, PadEventKind::Press),
            (Phase::Move, PadEventKind::Move),
            (Phase::Up, PadEventKind::Release),
            (Phase::Leave, PadEventKind::Leave),
        ] {
            let event = normalize(&RawInput::Pointer(PointerInput {
                phase,
                client_x: 3.0,
                client_y: 4.0,
                at,
            }))
            .unwrap();
            assert_eq!(event.kind, kind);
            assert_eq!(event.source, InputSource::Pointer);
            assert_eq!(event.position, Some((3.0, 4.0)));
        }
    }

    #[test]
    fn single_touch_start_anchors_and_draws() {
        let event = normalize(&RawInput::Touch(TouchInput {
            phase: Phase::Down,
            target_touches: vec![touch(1, 10.0, 20.0)],
            changed_touches: vec![touch(1, 10.0, 20.0)],
            at: Instant::now(),
        }))
        .unwrap();
        assert_eq!(event.kind, PadEventKind::Press);
        assert_eq!(event.position, Some((10.0, 20.0)));
        assert!(event.draws_on_press);
    }

    #[test]
    fn second_touch_does_not_reanchor() {
        let event = normalize(&RawInput::Touch(TouchInput {
            phase: Phase::Down,
            target_touches: vec![touch(1, 10.0, 20.0), touch(2, 50.0, 60.0)],
            changed_touches: vec![touch(2, 50.0, 60.0)],
            at: Instant::now(),
        }))
        .unwrap();
        assert_eq!(event.position, None);
        assert!(!event.draws_on_press);
    }

    #[test]
    fn touch_move_follows_first_contact_only() {
        let event = normalize(&RawInput::Touch(TouchInput {
            phase: Phase::Move,
            target_touches: vec![touch(1, 11.0, 21.0), touch(2, 90.0, 90.0)],
            changed_touches: vec![touch(2, 90.0, 90.0)],
            at: Instant::now(),
        }))
        .unwrap();
        assert_eq!(event.position, Some((11.0, 21.0)));

        let empty = RawInput::Touch(TouchInput {
            phase: Phase::Move,
            target_touches: Vec::new(),
            changed_touches: Vec::new(),
            at: Instant::now(),
        });
        assert!(normalize(&empty).is_none());
    }

    #[test]
    fn listeners_prefer_pointer_events() {
        let with_pointer = Listeners::for_capabilities(HostCapabilities {
            pointer_events: true,
            touch_events: true,
        });
        assert!(with_pointer.accepts(InputSource::Pointer));
        assert!(!with_pointer.accepts(InputSource::Mouse));
        assert!(!with_pointer.accepts(InputSource::Touch));

        let legacy = Listeners::for_capabilities(HostCapabilities {
            pointer_events: false,
            touch_events: true,
        });
        assert!(legacy.accepts(InputSource::Mouse));
        assert!(legacy.accepts(InputSource::Touch));
        assert!(!legacy.accepts(InputSource::Pointer));

        let desktop = Listeners::for_capabilities(HostCapabilities::default());
        assert!(desktop.accepts(InputSource::Mouse));
        assert!(!desktop.accepts(InputSource::Touch));
        assert!(!Listeners::none().is_attached());
    }
}
