use serde_json::json;
use tracing::debug;

use crate::core::{Bucket, BuildOptions, DataIndex, RawEntry};
use crate::error::BarViewResult;
use crate::render::Renderer;

use super::{BarView, OptionChange, OptionKey};

impl<R: Renderer, V: Sync> BarView<R, V> {
    /// Replaces the dataset from the caller's entries.
    ///
    /// With `cloneData` enabled the caller's vector is left untouched.
    /// Otherwise it is rewritten in place into the normalized, sorted and
    /// aggregated form the index holds. On error nothing changes.
    pub fn set_data(&mut self, data: &mut Vec<RawEntry<V>>) -> BarViewResult<()>
    where
        V: Clone,
    {
        let index = DataIndex::build(
            data,
            BuildOptions {
                copy: self.config.clone_data,
                empty_data: self.config.empty_data,
            },
        )?;
        self.install_index(index)
    }

    /// Replaces the dataset from owned entries without copying points.
    pub fn replace_data(&mut self, data: Vec<RawEntry<V>>) -> BarViewResult<()> {
        let index = DataIndex::from_entries(data, self.config.empty_data)?;
        self.install_index(index)
    }

    /// Buckets whose keys fall under the selection window.
    pub fn selected_buckets(&self) -> BarViewResult<&[Bucket<V>]> {
        let mapper = self.mapper()?;
        let start_key = mapper.fraction_to_key(self.window.start())?;
        let end_key = mapper.fraction_to_key(self.window.end())?;
        Ok(self.index.buckets_in_key_range(start_key, end_key))
    }

    fn install_index(&mut self, index: DataIndex<V>) -> BarViewResult<()> {
        let old_value = data_summary(&self.index);
        let new_value = data_summary(&index);
        debug!(
            bucket_count = index.len(),
            point_count = index.point_count(),
            "set data"
        );

        self.index = index;
        self.modified = true;
        self.emit_option_change(OptionChange {
            key: OptionKey::Data,
            old_value,
            new_value,
        });
        self.redraw_if_modified()
    }
}

fn data_summary<V>(index: &DataIndex<V>) -> serde_json::Value {
    json!({
        "buckets": index.len(),
        "points": index.point_count(),
        "offset": index.offset(),
        "range": index.range(),
        "maxDepth": index.max_depth(),
    })
}
