use serde::{Deserialize, Serialize};

use crate::core::{BarGeometry, Viewport, WindowBounds, project_bars};
use crate::error::{BarViewError, BarViewResult};
use crate::render::Renderer;

use super::{BarView, BarViewConfig};

pub const SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable deterministic state snapshot for regression tests and
/// debugging tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarViewSnapshot {
    pub viewport: Viewport,
    pub config: BarViewConfig,
    pub window: WindowBounds,
    pub data_offset: f64,
    pub data_range: f64,
    pub data_max_depth: usize,
    pub bucket_count: usize,
    pub point_count: usize,
    pub bars: Vec<BarGeometry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarViewSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: BarViewSnapshot,
}

impl<R: Renderer, V: Sync> BarView<R, V> {
    /// Captures the current state, including projected bars when the
    /// container has a size.
    pub fn snapshot(&self) -> BarViewResult<BarViewSnapshot> {
        let bars = if self.index.is_empty() || !self.viewport.is_valid() {
            Vec::new()
        } else {
            project_bars(&self.index, self.mapper()?, f64::from(self.viewport.height))?
        };

        Ok(BarViewSnapshot {
            viewport: self.viewport,
            config: self.config,
            window: self.window.bounds(),
            data_offset: self.index.offset(),
            data_range: self.index.range(),
            data_max_depth: self.index.max_depth(),
            bucket_count: self.index.len(),
            point_count: self.index.point_count(),
            bars,
        })
    }
}

impl BarViewSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> BarViewResult<String> {
        let payload = BarViewSnapshotJsonContractV1 {
            schema_version: SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            BarViewError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> BarViewResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<BarViewSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: BarViewSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            BarViewError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(BarViewError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}
