//! The signature pad facade.
//!
//! [`SignaturePad`] owns the canvas, the stroke state machine, the undo
//! history and the image decoder, and exposes the operations hosts call:
//! feeding input, clearing, undoing and exporting.
//!
//! Event processing is synchronous. Image decodes (background image, undo
//! redraw, loaded snapshots) resolve on a tokio runtime and are painted when
//! the host calls [`SignaturePad::pump`] or awaits [`SignaturePad::settle`],
//! in the order they were requested.

mod builder;
mod host;
#[cfg(test)]
mod tests;

pub use builder::{BackgroundImage, PadBuilder, PadOptions, StrokeCallback};
pub use host::{FixedHost, SurfaceHost};

use std::collections::VecDeque;
use std::time::Instant;

use log::{debug, warn};
use tokio::sync::oneshot::error::TryRecvError;

use crate::draw::Canvas;
use crate::error::{PadError, PadResult};
use crate::export::{self, ImageFormat};
use crate::history::{History, Snapshot};
use crate::image_source::{DecodeReceiver, DecodedImage, ImageDecoder};
use crate::input::{InputState, Listeners, RawInput, StrokeAction, normalize};

/// What to do with a decoded image once it arrives.
#[derive(Debug, Clone, Copy)]
enum DrawTarget {
    /// Paint at natural size over the background fill
    Background { x: f64, y: f64 },
    /// Replace the surface contents with a full-pad snapshot
    Snapshot,
}

struct PendingDraw {
    target: DrawTarget,
    rx: DecodeReceiver,
}

/// A signature capture surface.
///
/// Created through [`PadBuilder`].
pub struct SignaturePad {
    host: Box<dyn SurfaceHost>,
    canvas: Canvas,
    input: InputState,
    history: History,
    listeners: Listeners,
    decoder: ImageDecoder,
    pending: VecDeque<PendingDraw>,
    options: PadOptions,
    on_begin: Option<StrokeCallback>,
    on_end: Option<StrokeCallback>,
}

impl SignaturePad {
    pub fn builder() -> PadBuilder {
        PadBuilder::new()
    }

    /// Feeds one host event through the stroke pipeline.
    ///
    /// Events from modalities the pad isn't listening to are dropped.
    pub fn handle_input(&mut self, input: RawInput) -> PadResult<()> {
        if !self.listeners.accepts(input.source()) {
            return Ok(());
        }
        let Some(event) = normalize(&input) else {
            return Ok(());
        };

        let bounds = self.host.bounding_box();
        for action in self.input.on_event(&event, &bounds) {
            self.apply_action(action)?;
        }
        Ok(())
    }

    /// Renders a sample the sampling window held back, if it is due by `now`.
    ///
    /// Hosts call this from their frame or timer loop.
    pub fn tick(&mut self, now: Instant) -> PadResult<()> {
        let bounds = self.host.bounding_box();
        if let Some(action) = self.input.tick(now, &bounds) {
            self.apply_action(action)?;
        }
        Ok(())
    }

    /// Wipes the surface.
    ///
    /// With `preserve_history` set and strokes recorded, only the pixels are
    /// erased and the history is kept, ready for a snapshot to be painted.
    /// Otherwise the history is discarded and the background redrawn.
    pub fn clear(&mut self, preserve_history: bool) -> PadResult<()> {
        self.canvas.wipe()?;
        if preserve_history && !self.history.is_empty() {
            return Ok(());
        }

        if !self.history.is_empty() {
            debug!("Discarding {} history entries", self.history.len());
        }
        self.history.clear();
        self.draw_background()
    }

    /// Reverts the most recent stroke.
    ///
    /// Does nothing when no stroke is recorded. Reverting the only stroke
    /// leaves the bare background; otherwise the previous snapshot is decoded
    /// and painted once it resolves (see [`SignaturePad::pump`]).
    pub fn undo(&mut self) -> PadResult<()> {
        if self.history.pop().is_none() {
            debug!("Undo requested with empty history");
            return Ok(());
        }

        match self.history.top() {
            None => self.clear(false),
            Some(snapshot) => {
                let rx = self.decoder.request(snapshot.as_str().to_owned());
                self.pending.push_back(PendingDraw {
                    target: DrawTarget::Snapshot,
                    rx,
                });
                Ok(())
            }
        }
    }

    /// Seeds the pad with a previously exported signature.
    ///
    /// The snapshot becomes the first history entry right away; its pixels
    /// appear once the decode resolves.
    pub fn load_snapshot(&mut self, data_url: impl Into<String>) {
        let snapshot = Snapshot::new(data_url);
        let rx = self.decoder.request(snapshot.as_str().to_owned());
        self.history.push(snapshot);
        self.pending.push_back(PendingDraw {
            target: DrawTarget::Snapshot,
            rx,
        });
    }

    /// Paints every decode that has already resolved, without waiting.
    ///
    /// Draws are applied in request order; a still-running decode holds back
    /// the ones queued after it. Returns how many draws were applied.
    pub fn pump(&mut self) -> PadResult<usize> {
        let mut applied = 0;
        while let Some(front) = self.pending.front_mut() {
            let result = match front.rx.try_recv() {
                Ok(result) => result,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Closed) => Err(PadError::DecodeCancelled),
            };
            if let Some(draw) = self.pending.pop_front() {
                self.apply_decoded(draw.target, result)?;
                applied += 1;
            }
        }
        Ok(applied)
    }

    /// Waits for every outstanding decode and paints it.
    pub async fn settle(&mut self) -> PadResult<()> {
        while let Some(draw) = self.pending.pop_front() {
            let result = draw.rx.await.unwrap_or(Err(PadError::DecodeCancelled));
            self.apply_decoded(draw.target, result)?;
        }
        Ok(())
    }

    /// Number of decodes still waiting to be painted.
    pub fn pending_draws(&self) -> usize {
        self.pending.len()
    }

    /// Encodes the surface in upright orientation.
    ///
    /// `quality` (0.0 - 1.0) applies to lossy formats only.
    pub fn export_image(&self, format: ImageFormat, quality: Option<f64>) -> PadResult<Vec<u8>> {
        let mut upright = self.canvas.upright()?;
        export::encode_surface(&mut upright, format, quality)
    }

    /// Same as [`SignaturePad::export_image`], as a `data:` URL.
    pub fn to_data_url(&self, format: ImageFormat, quality: Option<f64>) -> PadResult<String> {
        let mut upright = self.canvas.upright()?;
        export::surface_data_url(&mut upright, format, quality)
    }

    /// Stops reacting to input from any modality.
    pub fn detach_listeners(&mut self) {
        debug!("Detaching input listeners");
        self.listeners = Listeners::none();
        self.input.cancel_pending();
    }

    /// Listens again to the modalities the host supports.
    pub fn attach_listeners(&mut self) {
        self.listeners = Listeners::for_capabilities(self.host.capabilities());
        debug!("Attached input listeners: {:?}", self.listeners);
    }

    pub fn listeners(&self) -> Listeners {
        self.listeners
    }

    /// True when no stroke is recorded.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn history(&self) -> &[Snapshot] {
        self.history.entries()
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn options(&self) -> &PadOptions {
        &self.options
    }

    fn apply_action(&mut self, action: StrokeAction) -> PadResult<()> {
        match action {
            StrokeAction::Begin(event) => {
                if let Some(callback) = self.on_begin.as_mut() {
                    callback(&event);
                }
            }
            StrokeAction::Segment(segment) => {
                self.canvas.draw_segment(&segment, self.options.pen_color)?;
            }
            StrokeAction::End { event, drew } => {
                if drew {
                    self.record_snapshot()?;
                }
                if let Some(callback) = self.on_end.as_mut() {
                    callback(&event);
                }
            }
        }
        Ok(())
    }

    fn record_snapshot(&mut self) -> PadResult<()> {
        let url = self.to_data_url(ImageFormat::Png, None)?;
        self.history.push(Snapshot::new(url));
        debug!("Recorded snapshot, history length {}", self.history.len());
        Ok(())
    }

    fn draw_background(&mut self) -> PadResult<()> {
        self.canvas.fill_background(self.options.background_color)?;

        if let Some(image) = &self.options.background_image {
            let rx = self.decoder.request(image.src.clone());
            self.pending.push_back(PendingDraw {
                target: DrawTarget::Background {
                    x: image.x,
                    y: image.y,
                },
                rx,
            });
        }
        Ok(())
    }

    fn apply_decoded(
        &mut self,
        target: DrawTarget,
        result: PadResult<DecodedImage>,
    ) -> PadResult<()> {
        match (target, result) {
            (DrawTarget::Background { x, y }, Ok(image)) => {
                let surface = image.to_surface()?;
                self.canvas.paint_image(&surface, x, y)
            }
            (DrawTarget::Background { .. }, Err(err)) => {
                debug!("Background image unavailable: {}", err);
                Ok(())
            }
            (DrawTarget::Snapshot, Ok(image)) => {
                let surface = image.to_surface()?;
                self.clear(true)?;
                self.canvas.paint_snapshot(&surface)
            }
            (DrawTarget::Snapshot, Err(err)) => {
                warn!("Could not redraw snapshot: {}", err);
                Ok(())
            }
        }
    }
}
