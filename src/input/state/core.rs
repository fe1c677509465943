//! Pen state machine and sampling state.

use std::time::Duration;

use crate::input::events::{PadEvent, PadEventKind};
use crate::input::mapper::CoordinateMapper;
use crate::input::throttle::Throttle;
use crate::input::width::{WidthEstimator, WidthParameters};
use crate::util::{Bounds, Point};

/// Whether the pen is touching the pad.
///
/// The state is a plain value; [`PenState::next`] is a pure transition
/// function and [`InputState`] applies its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PenState {
    /// Waiting for a press
    #[default]
    Up,
    /// Pressed; `drew` records whether any segment was rendered since
    Down { drew: bool },
}

/// Outcome of feeding one event kind to a [`PenState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// `Up -> Down`
    Began,
    /// The pen stays down (motion, or a repeated press)
    Continued,
    /// `Down -> Up`
    Ended { drew: bool },
    /// Nothing to do for this event in the current state
    Ignored,
}

impl PenState {
    pub fn is_down(&self) -> bool {
        matches!(self, Self::Down { .. })
    }

    /// Computes the state following `kind` without side effects.
    pub fn next(self, kind: PadEventKind) -> (PenState, Transition) {
        match (self, kind) {
            (Self::Up, PadEventKind::Press) => (Self::Down { drew: false }, Transition::Began),
            (Self::Down { .. }, PadEventKind::Press | PadEventKind::Move) => {
                (self, Transition::Continued)
            }
            (Self::Down { drew }, PadEventKind::Release | PadEventKind::Leave) => {
                (Self::Up, Transition::Ended { drew })
            }
            (Self::Up, _) => (self, Transition::Ignored),
        }
    }

    fn mark_drawn(&mut self) {
        if let Self::Down { drew } = self {
            *drew = true;
        }
    }
}

/// One line segment to render at a given width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
    pub width: f64,
}

/// Work produced by the state machine for the pad to carry out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeAction {
    /// A stroke started; the begin callback should run
    Begin(PadEvent),
    /// A sample passed the throttle gate
    Segment(Segment),
    /// The stroke finished. `drew` tells whether anything hit the surface.
    End { event: PadEvent, drew: bool },
}

/// Tracks the pen across press/move/release and turns samples into segments.
///
/// Owns the only copy of the pen position and running width; hosts feed it
/// [`PadEvent`]s and render whatever [`StrokeAction::Segment`]s come back.
pub struct InputState {
    pub(super) pen: PenState,
    /// Last sampled point. Starts at the origin and persists between strokes.
    pub(super) last_point: Point,
    pub(super) width: WidthEstimator,
    pub(super) mapper: CoordinateMapper,
    /// Client positions waiting for the sampling window to close
    pub(super) throttle: Throttle<(f64, f64)>,
}

impl InputState {
    pub fn new(params: WidthParameters, mapper: CoordinateMapper, interval: Duration) -> Self {
        Self {
            pen: PenState::Up,
            last_point: Point::default(),
            width: WidthEstimator::new(params),
            mapper,
            throttle: Throttle::new(interval),
        }
    }

    pub fn pen(&self) -> PenState {
        self.pen
    }

    pub fn last_point(&self) -> Point {
        self.last_point
    }

    pub fn current_width(&self) -> f64 {
        self.width.current()
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    /// Drops any sample still waiting on the sampling window.
    pub fn cancel_pending(&mut self) {
        self.throttle.cancel();
    }

    /// Maps a client position and renders the hop from the last point.
    pub(super) fn sample(&mut self, bounds: &Bounds, client: (f64, f64)) -> Segment {
        let to = self.mapper.map(bounds, client.0, client.1);
        let distance = self.last_point.distance_to(to);
        let width = self.width.advance(distance);
        let segment = Segment {
            from: self.last_point,
            to,
            width,
        };
        self.last_point = to;
        self.pen.mark_drawn();
        segment
    }
}
