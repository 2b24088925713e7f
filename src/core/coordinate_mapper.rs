use serde::{Deserialize, Serialize};

use crate::core::DataIndex;
use crate::error::{BarViewError, BarViewResult};

/// Invertible linear mapping between the key domain and display pixels.
///
/// `position = (key - offset) * scale_factor + pre_relief`, where
/// `scale_factor = usable_extent / range` and
/// `usable_extent = display_extent - pre_relief - post_relief`.
/// A zero range is a single-key dataset: the scale factor falls back to the
/// usable extent and the lone key sits at `pre_relief`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateMapper {
    range: f64,
    offset: f64,
    display_extent: f64,
    pre_relief: f64,
    post_relief: f64,
    scale_factor: f64,
}

impl CoordinateMapper {
    /// Validates mapper preconditions and precomputes the scale factor.
    ///
    /// `range` is `None` for an index that holds no data yet.
    pub fn configure(
        range: Option<f64>,
        offset: f64,
        display_extent: f64,
        pre_relief: f64,
        post_relief: f64,
    ) -> BarViewResult<Self> {
        let extent_error = || BarViewError::InvalidDisplayExtent {
            extent: display_extent,
            pre_relief,
            post_relief,
        };

        if !display_extent.is_finite()
            || !pre_relief.is_finite()
            || !post_relief.is_finite()
            || pre_relief < 0.0
            || post_relief < 0.0
        {
            return Err(extent_error());
        }

        let usable_extent = display_extent - pre_relief - post_relief;
        if usable_extent < 1.0 {
            return Err(extent_error());
        }

        let Some(range) = range else {
            return Err(BarViewError::InvalidRange(
                "range is undefined; the data index holds no keys".to_owned(),
            ));
        };
        if !range.is_finite() || range < 0.0 {
            return Err(BarViewError::InvalidRange(format!(
                "range must be finite and >= 0, got {range}"
            )));
        }
        if !offset.is_finite() {
            return Err(BarViewError::InvalidRange(format!(
                "offset must be finite, got {offset}"
            )));
        }

        let scale_factor = if range == 0.0 {
            usable_extent
        } else {
            usable_extent / range
        };

        Ok(Self {
            range,
            offset,
            display_extent,
            pre_relief,
            post_relief,
            scale_factor,
        })
    }

    /// Configures from an index's offset and range.
    pub fn for_index<V>(
        index: &DataIndex<V>,
        display_extent: f64,
        pre_relief: f64,
        post_relief: f64,
    ) -> BarViewResult<Self> {
        Self::configure(
            index.mapped_range(),
            index.offset(),
            display_extent,
            pre_relief,
            post_relief,
        )
    }

    pub fn key_to_display(self, key: f64) -> BarViewResult<f64> {
        if !key.is_finite() {
            return Err(BarViewError::InvalidData("key must be finite".to_owned()));
        }
        Ok((key - self.offset) * self.scale_factor + self.pre_relief)
    }

    pub fn display_to_key(self, position: f64) -> BarViewResult<f64> {
        if !position.is_finite() {
            return Err(BarViewError::InvalidData(
                "display position must be finite".to_owned(),
            ));
        }
        Ok((position - self.pre_relief) / self.scale_factor + self.offset)
    }

    /// Maps a fraction of the full display extent back to a key.
    pub fn fraction_to_key(self, fraction: f64) -> BarViewResult<f64> {
        self.display_to_key(fraction * self.display_extent)
    }

    #[must_use]
    pub fn scale_factor(self) -> f64 {
        self.scale_factor
    }

    #[must_use]
    pub fn usable_extent(self) -> f64 {
        self.display_extent - self.pre_relief - self.post_relief
    }

    #[must_use]
    pub fn display_extent(self) -> f64 {
        self.display_extent
    }

    #[must_use]
    pub fn relief(self) -> (f64, f64) {
        (self.pre_relief, self.post_relief)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.offset, self.offset + self.range)
    }
}
