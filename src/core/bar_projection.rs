#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::{Bucket, CoordinateMapper, DataIndex};
use crate::error::{BarViewError, BarViewResult};

/// Deterministic geometry for one bucket drawn as a vertical bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub key: f64,
    pub depth: usize,
    pub x: f64,
    pub y_top: f64,
    pub y_bottom: f64,
    pub label: String,
}

impl BarGeometry {
    #[must_use]
    pub fn height(&self) -> f64 {
        self.y_bottom - self.y_top
    }
}

/// Projects every bucket of `index` into a bar.
///
/// Bars stand on the bottom edge of a `height_px` tall area; a bar's height
/// is `depth / max_depth * height_px`, so the deepest bucket fills the area.
pub fn project_bars<V: Sync>(
    index: &DataIndex<V>,
    mapper: CoordinateMapper,
    height_px: f64,
) -> BarViewResult<Vec<BarGeometry>> {
    if !height_px.is_finite() || height_px <= 0.0 {
        return Err(BarViewError::InvalidData(
            "bar area height must be finite and > 0".to_owned(),
        ));
    }

    if index.is_empty() {
        return Ok(Vec::new());
    }

    let max_depth = index.max_depth() as f64;

    #[cfg(feature = "parallel-projection")]
    {
        let projected: Vec<BarViewResult<BarGeometry>> = index
            .buckets()
            .par_iter()
            .map(|bucket| project_single_bar(bucket, mapper, height_px, max_depth))
            .collect();
        projected.into_iter().collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        index
            .buckets()
            .iter()
            .map(|bucket| project_single_bar(bucket, mapper, height_px, max_depth))
            .collect()
    }
}

fn project_single_bar<V>(
    bucket: &Bucket<V>,
    mapper: CoordinateMapper,
    height_px: f64,
    max_depth: f64,
) -> BarViewResult<BarGeometry> {
    let depth = bucket.depth();
    let x = mapper.key_to_display(bucket.key())?;
    let bar_height = depth as f64 / max_depth * height_px;
    Ok(BarGeometry {
        key: bucket.key(),
        depth,
        x,
        y_top: height_px - bar_height,
        y_bottom: height_px,
        label: depth.to_string(),
    })
}
