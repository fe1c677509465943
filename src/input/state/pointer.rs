use std::time::Instant;

use log::debug;

use crate::input::events::{PadEvent, PadEventKind};
use crate::util::Bounds;

use super::{InputState, StrokeAction, Transition};

impl InputState {
    /// Processes a normalized input event.
    ///
    /// # Arguments
    /// * `event` - The event to apply
    /// * `bounds` - Current client-space rectangle of the surface
    ///
    /// # Behavior
    /// - Press while up: starts a stroke anchored at the mapped position
    /// - Move while down: offers the position to the sampling gate
    /// - Release/leave while down: delivers the trailing sample, ends the stroke
    /// - Release/leave while up: only resets the pen width
    pub fn on_event(&mut self, event: &PadEvent, bounds: &Bounds) -> Vec<StrokeAction> {
        let mut actions = Vec::new();
        let (next, transition) = self.pen.next(event.kind);
        self.pen = next;

        match transition {
            Transition::Began => {
                actions.push(StrokeAction::Begin(*event));
                self.anchor(event, bounds, &mut actions);
            }
            Transition::Continued if event.kind == PadEventKind::Press => {
                // A new anchor invalidates whatever was heading for the old one
                if event.position.is_some() {
                    self.throttle.cancel();
                }
                self.anchor(event, bounds, &mut actions);
            }
            Transition::Continued => {
                if let Some(position) = event.position {
                    self.offer(event.at, bounds, position, &mut actions);
                }
            }
            Transition::Ended { drew } => {
                let trailing = self
                    .throttle
                    .flush()
                    .map(|pending| self.sample(bounds, pending));
                if let Some(segment) = trailing {
                    actions.push(StrokeAction::Segment(segment));
                }
                actions.push(StrokeAction::End {
                    event: *event,
                    drew: drew || trailing.is_some(),
                });
                self.width.reset();
            }
            Transition::Ignored => {
                if matches!(event.kind, PadEventKind::Release | PadEventKind::Leave) {
                    self.width.reset();
                }
            }
        }

        actions
    }

    /// Delivers a sample left pending by the gate once its window has closed.
    ///
    /// Hosts call this from their frame or timer callback.
    pub fn tick(&mut self, now: Instant, bounds: &Bounds) -> Option<StrokeAction> {
        if !self.pen.is_down() {
            return None;
        }
        let pending = self.throttle.poll(now)?;
        Some(StrokeAction::Segment(self.sample(bounds, pending)))
    }

    fn anchor(&mut self, event: &PadEvent, bounds: &Bounds, actions: &mut Vec<StrokeAction>) {
        let Some((x, y)) = event.position else {
            return;
        };
        self.last_point = self.mapper.map(bounds, x, y);
        debug!(
            "Stroke anchored at ({}, {}) via {:?}",
            self.last_point.x, self.last_point.y, event.source
        );
        if event.draws_on_press {
            self.offer(event.at, bounds, (x, y), actions);
        }
    }

    fn offer(
        &mut self,
        now: Instant,
        bounds: &Bounds,
        position: (f64, f64),
        actions: &mut Vec<StrokeAction>,
    ) {
        if let Some(position) = self.throttle.offer(now, position) {
            let segment = self.sample(bounds, position);
            actions.push(StrokeAction::Segment(segment));
        }
    }
}
