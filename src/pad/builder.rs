//! Pad construction options.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use log::info;

use super::SignaturePad;
use super::host::SurfaceHost;
use crate::config::Config;
use crate::draw::{Canvas, Color, color::BLACK, color::WHITE};
use crate::error::{PadError, PadResult};
use crate::history::History;
use crate::image_source::{FileImageSource, ImageDecoder, ImageSource};
use crate::input::throttle::DEFAULT_INTERVAL;
use crate::input::width::{DEFAULT_MAX_DISTANCE, DEFAULT_MIN_DISTANCE};
use crate::input::{
    CoordinateMapper, InputState, Listeners, Orientation, PadEvent, WidthParameters,
};

/// Callback invoked with the event that began or ended a stroke.
pub type StrokeCallback = Box<dyn FnMut(&PadEvent)>;

/// Image drawn on top of the background fill after every full clear.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundImage {
    /// Anything the pad's [`ImageSource`] understands, or a `data:` URL
    pub src: String,
    pub x: f64,
    pub y: f64,
}

/// Appearance and sampling settings of a pad.
#[derive(Debug, Clone, PartialEq)]
pub struct PadOptions {
    pub width: f64,
    pub height: f64,
    pub pen_color: Color,
    pub default_width: f64,
    pub min_width: f64,
    pub max_width: f64,
    pub background_color: Color,
    pub background_image: Option<BackgroundImage>,
    pub orientation: Orientation,
    pub throttle_interval: Duration,
    pub min_distance: f64,
    pub max_distance: f64,
}

impl Default for PadOptions {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 200.0,
            pen_color: BLACK,
            default_width: 3.0,
            min_width: 1.0,
            max_width: 4.0,
            background_color: WHITE,
            background_image: None,
            orientation: Orientation::default(),
            throttle_interval: DEFAULT_INTERVAL,
            min_distance: DEFAULT_MIN_DISTANCE,
            max_distance: DEFAULT_MAX_DISTANCE,
        }
    }
}

impl PadOptions {
    /// Builds options from a loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            width: config.canvas.width,
            height: config.canvas.height,
            pen_color: config.pen.color.to_color(),
            default_width: config.pen.default_width,
            min_width: config.pen.min_width,
            max_width: config.pen.max_width,
            background_color: config.canvas.background_color.to_color(),
            background_image: config
                .canvas
                .background_image
                .as_ref()
                .map(|image| BackgroundImage {
                    src: image.src.clone(),
                    x: image.x,
                    y: image.y,
                }),
            orientation: config.canvas.orientation(),
            throttle_interval: config.throttle_interval(),
            min_distance: config.sampling.min_distance,
            max_distance: config.sampling.max_distance,
        }
    }

    fn width_parameters(&self) -> PadResult<WidthParameters> {
        WidthParameters::new(
            self.min_width,
            self.max_width,
            self.default_width,
            self.min_distance,
            self.max_distance,
        )
    }
}

/// Assembles a [`SignaturePad`].
///
/// Only the host is mandatory; every other setting has a default.
///
/// ```no_run
/// use sigpad::pad::{FixedHost, PadBuilder};
///
/// # fn demo(runtime: &tokio::runtime::Runtime) -> sigpad::PadResult<()> {
/// let mut pad = PadBuilder::new()
///     .host(FixedHost::at_origin(400.0, 200.0))
///     .widths(0.5, 3.0, 1.5)
///     .on_end(|event| log::info!("stroke finished at {:?}", event.position))
///     .runtime(runtime.handle().clone())
///     .build()?;
/// pad.clear(false)?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct PadBuilder {
    host: Option<Box<dyn SurfaceHost>>,
    options: PadOptions,
    on_begin: Option<StrokeCallback>,
    on_end: Option<StrokeCallback>,
    runtime: Option<tokio::runtime::Handle>,
    source: Option<Arc<dyn ImageSource>>,
}

impl PadBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from the settings in `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new().options(PadOptions::from_config(config))
    }

    pub fn host(mut self, host: impl SurfaceHost + 'static) -> Self {
        self.host = Some(Box::new(host));
        self
    }

    pub fn options(mut self, options: PadOptions) -> Self {
        self.options = options;
        self
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.options.width = width;
        self.options.height = height;
        self
    }

    pub fn pen_color(mut self, color: Color) -> Self {
        self.options.pen_color = color;
        self
    }

    /// Sets the width range and the width each stroke starts with.
    pub fn widths(mut self, min_width: f64, max_width: f64, default_width: f64) -> Self {
        self.options.min_width = min_width;
        self.options.max_width = max_width;
        self.options.default_width = default_width;
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.options.background_color = color;
        self
    }

    pub fn background_image(mut self, src: impl Into<String>, x: f64, y: f64) -> Self {
        self.options.background_image = Some(BackgroundImage {
            src: src.into(),
            x,
            y,
        });
        self
    }

    /// Display rotation in degrees; see [`Orientation::Rotation`].
    pub fn rotation(mut self, degrees: i32) -> Self {
        self.options.orientation = Orientation::Rotation(degrees);
        self
    }

    /// Selects the axis-swapped layout; see [`Orientation::AxisSwap`].
    pub fn vertical(mut self, vertical: bool) -> Self {
        self.options.orientation = Orientation::AxisSwap { vertical };
        self
    }

    pub fn throttle(mut self, interval: Duration) -> Self {
        self.options.throttle_interval = interval;
        self
    }

    pub fn on_begin(mut self, callback: impl FnMut(&PadEvent) + 'static) -> Self {
        self.on_begin = Some(Box::new(callback));
        self
    }

    pub fn on_end(mut self, callback: impl FnMut(&PadEvent) + 'static) -> Self {
        self.on_end = Some(Box::new(callback));
        self
    }

    /// Runtime image decodes are spawned on. Defaults to the current one.
    pub fn runtime(mut self, handle: tokio::runtime::Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    /// Where background images are fetched from. Defaults to the filesystem.
    pub fn image_source(mut self, source: impl ImageSource + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    /// Creates the pad, clears it to its background and attaches listeners.
    ///
    /// # Errors
    /// - [`PadError::MissingContainer`] when no host was given
    /// - [`PadError::InvalidConfig`] for a non-positive size or bad width bounds
    /// - [`PadError::NoRuntime`] when no runtime was given and none is current
    pub fn build(self) -> PadResult<SignaturePad> {
        let host = self.host.ok_or(PadError::MissingContainer)?;
        let options = self.options;
        let params = options.width_parameters()?;

        let runtime = match self.runtime {
            Some(handle) => handle,
            None => tokio::runtime::Handle::try_current().map_err(|_| PadError::NoRuntime)?,
        };
        let source = self
            .source
            .unwrap_or_else(|| Arc::new(FileImageSource::new()));

        let pixel_ratio = host.device_pixel_ratio().unwrap_or(1.0);
        let canvas = Canvas::new(
            options.width,
            options.height,
            pixel_ratio,
            options.orientation.swaps_axes(),
        )?;
        let mapper = CoordinateMapper::new(options.orientation, options.width, options.height);
        let input = InputState::new(params, mapper, options.throttle_interval);
        let listeners = Listeners::for_capabilities(host.capabilities());

        info!(
            "Signature pad {}x{} at {:.1}x density ({:?}), listening to {:?}",
            options.width, options.height, canvas.pixel_ratio(), options.orientation, listeners
        );

        let mut pad = SignaturePad {
            host,
            canvas,
            input,
            history: History::new(),
            listeners,
            decoder: ImageDecoder::new(runtime, source),
            pending: VecDeque::new(),
            options,
            on_begin: self.on_begin,
            on_end: self.on_end,
        };
        pad.clear(false)?;
        Ok(pad)
    }
}
