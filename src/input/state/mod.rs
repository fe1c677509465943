mod core;
mod pointer;

pub use core::{InputState, PenState, Segment, StrokeAction, Transition};
