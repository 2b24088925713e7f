mod bar_view;
mod config;
mod css_length;
mod data_controller;
mod option_controller;
mod render_coordinator;
mod resize_controller;
mod snapshot;
mod window_controller;

pub use bar_view::BarView;
pub use config::{BarViewConfig, OptionKey};
pub use css_length::CssLength;
pub use option_controller::OptionChange;
pub use snapshot::{BarViewSnapshot, BarViewSnapshotJsonContractV1, SNAPSHOT_JSON_SCHEMA_V1};
