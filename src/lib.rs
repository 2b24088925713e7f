//! bar-view: a keyed dataset drawn as vertical bars with a draggable
//! selection window.
//!
//! The crate owns the model half of the widget: indexing and aggregating
//! keyed points, mapping keys to display positions, and keeping the
//! selection window inside its bounds. Drawing goes through the `Renderer`
//! trait so any backend can consume the produced frames.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{BarView, BarViewConfig};
pub use error::{BarViewError, BarViewResult};
