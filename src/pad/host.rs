//! The environment a pad is mounted in.

use crate::input::HostCapabilities;
use crate::util::Bounds;

/// The drawing container a pad binds to.
///
/// Hosts report where the surface currently sits in client space (it may
/// move between events when the page scrolls), the device pixel density the
/// backing store should be allocated at, and which input event families the
/// platform delivers.
pub trait SurfaceHost {
    /// Client-space rectangle currently occupied by the surface.
    fn bounding_box(&self) -> Bounds;

    /// Physical pixels per logical pixel. `None` means the host doesn't know.
    fn device_pixel_ratio(&self) -> Option<f64> {
        None
    }

    fn capabilities(&self) -> HostCapabilities {
        HostCapabilities::default()
    }
}

/// Host with a fixed position, used by the CLI and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedHost {
    bounds: Bounds,
    pixel_ratio: Option<f64>,
    capabilities: HostCapabilities,
}

impl FixedHost {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            pixel_ratio: None,
            capabilities: HostCapabilities::default(),
        }
    }

    /// A host whose surface sits at the client origin.
    pub fn at_origin(width: f64, height: f64) -> Self {
        Self::new(Bounds::new(0.0, 0.0, width, height))
    }

    pub fn with_pixel_ratio(mut self, ratio: f64) -> Self {
        self.pixel_ratio = Some(ratio);
        self
    }

    pub fn with_capabilities(mut self, capabilities: HostCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }
}

impl SurfaceHost for FixedHost {
    fn bounding_box(&self) -> Bounds {
        self.bounds
    }

    fn device_pixel_ratio(&self) -> Option<f64> {
        self.pixel_ratio
    }

    fn capabilities(&self) -> HostCapabilities {
        self.capabilities
    }
}
