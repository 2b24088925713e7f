pub mod bar_projection;
pub mod coordinate_mapper;
pub mod data_index;
pub mod primitives;
pub mod search;
pub mod selection_window;
pub mod types;
pub mod windowing;

pub use bar_projection::{BarGeometry, project_bars};
pub use coordinate_mapper::CoordinateMapper;
pub use data_index::{BuildOptions, DataIndex, EmptyDataPolicy};
pub use selection_window::{
    DEFAULT_WINDOW_SIZE, DEFAULT_WINDOW_START, ListenerId, SelectionWindow, WindowBounds,
    WindowChange, WindowListener,
};
pub use types::{Bucket, KeyedPoint, RawEntry, Viewport};
pub use windowing::buckets_in_key_window;
