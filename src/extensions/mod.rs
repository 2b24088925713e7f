//! Host-facing hooks live here.

pub mod observers;

pub use observers::{BarViewEvent, BarViewObserver, ObserverContext};
