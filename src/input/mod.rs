//! Input handling and stroke sampling pipeline.
//!
//! This module turns host pointer, mouse, and touch events into rendered
//! segments. Events are normalized into [`PadEvent`]s, gated by the sampling
//! [`Throttle`], mapped onto the surface by the [`CoordinateMapper`], and
//! assigned a width by the [`WidthEstimator`] inside [`InputState`].

pub mod events;
pub mod mapper;
pub mod state;
pub mod throttle;
pub mod width;

// Re-export commonly used types at module level
pub use events::{
    HostCapabilities, InputSource, Listeners, PadEvent, PadEventKind, Phase, PointerInput,
    RawInput, TouchInput, TouchPoint, normalize,
};
pub use mapper::{CoordinateMapper, Orientation};
pub use state::{InputState, PenState, Segment, StrokeAction, Transition};
pub use throttle::Throttle;
pub use width::{WidthEstimator, WidthParameters};
