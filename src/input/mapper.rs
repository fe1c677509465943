//! Client-to-surface coordinate conversion.
//!
//! Hosts report pointer positions relative to their window. The mapper
//! subtracts the surface's top-left offset and then undoes whatever rotation
//! the surface is displayed with, yielding integer surface-local points.

use log::warn;

use crate::util::{Bounds, Point, round_to_pixel};

/// How the pad surface is laid out relative to the physical input area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Surface displayed rotated by the given angle in degrees.
    ///
    /// Only 0, 90, -90, 180 and -180 are understood. Any other angle is
    /// accepted but leaves coordinates untransformed.
    Rotation(i32),
    /// Width and height axes swapped on the backing surface when `vertical`.
    ///
    /// Pointer coordinates are used as-is; the swap is applied when exporting
    /// and when redrawing snapshots.
    AxisSwap { vertical: bool },
}

impl Default for Orientation {
    fn default() -> Self {
        Self::Rotation(0)
    }
}

impl Orientation {
    /// Returns true when the backing surface stores width and height swapped.
    pub fn swaps_axes(&self) -> bool {
        matches!(self, Self::AxisSwap { vertical: true })
    }

    fn is_supported(&self) -> bool {
        match self {
            Self::Rotation(angle) => matches!(angle, 0 | 90 | -90 | 180 | -180),
            Self::AxisSwap { .. } => true,
        }
    }
}

/// Converts client coordinates into surface-local [`Point`]s.
#[derive(Debug, Clone)]
pub struct CoordinateMapper {
    orientation: Orientation,
    width: f64,
    height: f64,
}

impl CoordinateMapper {
    /// Creates a mapper for a surface of the given logical size.
    pub fn new(orientation: Orientation, width: f64, height: f64) -> Self {
        if !orientation.is_supported() {
            warn!(
                "Unsupported orientation {:?}; only 0, 90, -90, 180 and -180 degrees are transformed",
                orientation
            );
        }
        Self {
            orientation,
            width,
            height,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Maps a client-space position to a surface-local point.
    pub fn map(&self, bounds: &Bounds, client_x: f64, client_y: f64) -> Point {
        let dx = client_x - bounds.left;
        let dy = client_y - bounds.top;

        let (x, y) = match self.orientation {
            Orientation::Rotation(-90) => (self.width - dy, dx),
            Orientation::Rotation(90) => (dy, self.height - dx),
            Orientation::Rotation(180) | Orientation::Rotation(-180) => {
                (self.width - dx, self.height - dy)
            }
            _ => (dx, dy),
        };

        Point::new(round_to_pixel(x), round_to_pixel(y))
    }

    /// Inverse of [`map`](Self::map): the client position that maps onto `point`.
    pub fn unmap(&self, bounds: &Bounds, point: Point) -> (f64, f64) {
        let x = point.x as f64;
        let y = point.y as f64;

        let (dx, dy) = match self.orientation {
            Orientation::Rotation(-90) => (y, self.width - x),
            Orientation::Rotation(90) => (self.height - y, x),
            Orientation::Rotation(180) | Orientation::Rotation(-180) => {
                (self.width - x, self.height - y)
            }
            _ => (x, y),
        };

        (dx + bounds.left, dy + bounds.top)
    }
}
