#![forbid(unsafe_code)]

//! Core: surface dimensions, cell addressing, and click events.

pub mod event;
pub mod geometry;
pub mod logging;

pub use event::{ClickEvent, ClickKind, Modifiers, ViewerId};
pub use geometry::{Slot, Slots, SurfaceType};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace};
