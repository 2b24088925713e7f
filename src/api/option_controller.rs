use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use crate::core::{Bucket, DataIndex, EmptyDataPolicy, RawEntry, SelectionWindow};
use crate::error::{BarViewError, BarViewResult};
use crate::extensions::BarViewEvent;
use crate::interaction::DragConfig;
use crate::render::Renderer;

use super::{BarView, CssLength, OptionKey};

/// Payload of a `change` event: which option moved and its values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionChange {
    pub key: OptionKey,
    pub old_value: Value,
    pub new_value: Value,
}

impl<R: Renderer, V: Sync> BarView<R, V> {
    pub fn set_width(&mut self, width: CssLength) -> BarViewResult<()> {
        self.update_option(OptionKey::Width, |view| {
            view.config.width = width;
            view.refresh_viewport();
            Ok(())
        })
    }

    pub fn set_height(&mut self, height: CssLength) -> BarViewResult<()> {
        self.update_option(OptionKey::Height, |view| {
            view.config.height = height;
            view.refresh_viewport();
            Ok(())
        })
    }

    pub fn set_clone_data(&mut self, clone_data: bool) -> BarViewResult<()> {
        self.update_option(OptionKey::CloneData, |view| {
            view.config.clone_data = clone_data;
            Ok(())
        })
    }

    pub fn set_pre_relief(&mut self, pre_relief: u32) -> BarViewResult<()> {
        self.update_option(OptionKey::PreRelief, |view| {
            if view.config.pre_relief != pre_relief {
                view.config.pre_relief = pre_relief;
                view.modified = true;
            }
            Ok(())
        })
    }

    pub fn set_post_relief(&mut self, post_relief: u32) -> BarViewResult<()> {
        self.update_option(OptionKey::PostRelief, |view| {
            if view.config.post_relief != post_relief {
                view.config.post_relief = post_relief;
                view.modified = true;
            }
            Ok(())
        })
    }

    pub fn set_empty_data(&mut self, policy: EmptyDataPolicy) -> BarViewResult<()> {
        self.update_option(OptionKey::EmptyData, |view| {
            view.config.empty_data = policy;
            Ok(())
        })
    }

    pub fn set_drag_distance_px(&mut self, distance: f64) -> BarViewResult<()> {
        check_drag_distance(distance)?;
        self.update_option(OptionKey::DragDistancePx, |view| {
            view.config.drag_distance_px = distance;
            view.drag.set_config(DragConfig {
                min_distance_px: distance,
            });
            Ok(())
        })
    }

    /// Current value of every option except `data`, as JSON.
    pub(super) fn scalar_option_value(&self, key: OptionKey) -> Value {
        match key {
            OptionKey::Width => json!(self.config.width.to_string()),
            OptionKey::Height => json!(self.config.height.to_string()),
            OptionKey::CloneData => json!(self.config.clone_data),
            OptionKey::PreRelief => json!(self.config.pre_relief),
            OptionKey::PostRelief => json!(self.config.post_relief),
            OptionKey::WindowStart => json!(self.window.start()),
            OptionKey::WindowSize => json!(self.window.size()),
            OptionKey::EmptyData => match self.config.empty_data {
                EmptyDataPolicy::Accept => json!("accept"),
                EmptyDataPolicy::Reject => json!("reject"),
            },
            OptionKey::DragDistancePx => json!(self.config.drag_distance_px),
            OptionKey::Data => json!({
                "buckets": self.index.len(),
                "points": self.index.point_count(),
            }),
        }
    }

    pub(super) fn emit_option_change(&mut self, change: OptionChange) {
        self.emit(BarViewEvent::Change(change));
    }

    fn update_option(
        &mut self,
        key: OptionKey,
        apply: impl FnOnce(&mut Self) -> BarViewResult<()>,
    ) -> BarViewResult<()> {
        let old_value = self.scalar_option_value(key);
        apply(self)?;
        let new_value = self.scalar_option_value(key);
        if old_value != new_value {
            debug!(option = %key, %old_value, %new_value, "option changed");
            self.emit_option_change(OptionChange {
                key,
                old_value,
                new_value,
            });
        }
        self.redraw_if_modified()
    }

    fn refresh_viewport(&mut self) {
        let viewport = self.config.resolve_viewport(self.parent);
        if viewport != self.viewport {
            self.viewport = viewport;
            self.modified = true;
        }
    }
}

impl<R, V> BarView<R, V>
where
    R: Renderer,
    V: Clone + Sync + Serialize + DeserializeOwned,
{
    /// Reads an option by name.
    ///
    /// `data` yields the normalized entries the index holds.
    pub fn option(&self, name: &str) -> BarViewResult<Value> {
        let key: OptionKey = name.parse()?;
        if key != OptionKey::Data {
            return Ok(self.scalar_option_value(key));
        }

        let entries: Vec<RawEntry<V>> = self
            .index
            .buckets()
            .iter()
            .cloned()
            .map(Bucket::into_raw_entry)
            .collect();
        serde_json::to_value(entries)
            .map_err(|e| BarViewError::InvalidData(format!("failed to serialize data: {e}")))
    }

    /// Writes an option by name, validating against the static option schema.
    pub fn set_option(&mut self, name: &str, value: Value) -> BarViewResult<()> {
        let pending = PendingOption::parse(name.parse()?, value)?;
        self.apply_option(pending)
    }

    /// Applies a JSON object of options in the object's key order.
    ///
    /// Every name and value is parsed, and the resulting window, drag distance
    /// and data are checked in sequence, before any option changes. A failing
    /// entry leaves the view as it was.
    pub fn set_options(&mut self, options: Value) -> BarViewResult<()> {
        let Value::Object(options) = options else {
            return Err(BarViewError::InvalidOption(
                "options must be a JSON object".to_owned(),
            ));
        };
        for name in options.keys() {
            name.parse::<OptionKey>()?;
        }
        let pending = options
            .into_iter()
            .map(|(name, value)| PendingOption::parse(name.parse()?, value))
            .collect::<BarViewResult<Vec<_>>>()?;

        self.check_pending(&pending)?;
        for option in pending {
            self.apply_option(option)?;
        }
        Ok(())
    }

    fn check_pending(&self, pending: &[PendingOption<V>]) -> BarViewResult<()> {
        let mut window = SelectionWindow::new(self.window.start(), self.window.size())?;
        let mut empty_data = self.config.empty_data;
        for option in pending {
            match option {
                PendingOption::WindowStart(start) => {
                    window.set_start(*start)?;
                }
                PendingOption::WindowSize(size) => {
                    window.set_size(*size)?;
                }
                PendingOption::EmptyData(policy) => empty_data = *policy,
                PendingOption::DragDistancePx(distance) => check_drag_distance(*distance)?,
                PendingOption::Data(entries) => DataIndex::validate_entries(entries, empty_data)?,
                PendingOption::Width(_)
                | PendingOption::Height(_)
                | PendingOption::CloneData(_)
                | PendingOption::PreRelief(_)
                | PendingOption::PostRelief(_) => {}
            }
        }
        Ok(())
    }

    fn apply_option(&mut self, option: PendingOption<V>) -> BarViewResult<()> {
        match option {
            PendingOption::Width(width) => self.set_width(width),
            PendingOption::Height(height) => self.set_height(height),
            PendingOption::CloneData(clone_data) => self.set_clone_data(clone_data),
            PendingOption::PreRelief(px) => self.set_pre_relief(px),
            PendingOption::PostRelief(px) => self.set_post_relief(px),
            PendingOption::WindowStart(start) => self.set_window_start(start),
            PendingOption::WindowSize(size) => self.set_window_size(size),
            PendingOption::EmptyData(policy) => self.set_empty_data(policy),
            PendingOption::DragDistancePx(distance) => self.set_drag_distance_px(distance),
            PendingOption::Data(mut entries) => self.set_data(&mut entries),
        }
    }
}

/// An option value already coerced to its typed form.
enum PendingOption<V> {
    Width(CssLength),
    Height(CssLength),
    CloneData(bool),
    PreRelief(u32),
    PostRelief(u32),
    WindowStart(f64),
    WindowSize(f64),
    EmptyData(EmptyDataPolicy),
    DragDistancePx(f64),
    Data(Vec<RawEntry<V>>),
}

impl<V: DeserializeOwned> PendingOption<V> {
    fn parse(key: OptionKey, value: Value) -> BarViewResult<Self> {
        Ok(match key {
            OptionKey::Width => Self::Width(css_length_value(key, &value)?),
            OptionKey::Height => Self::Height(css_length_value(key, &value)?),
            OptionKey::CloneData => Self::CloneData(truthy_value(key, &value)?),
            OptionKey::PreRelief => Self::PreRelief(pixels_value(key, &value)?),
            OptionKey::PostRelief => Self::PostRelief(pixels_value(key, &value)?),
            OptionKey::WindowStart => Self::WindowStart(number_value(key, &value)?),
            OptionKey::WindowSize => Self::WindowSize(number_value(key, &value)?),
            OptionKey::EmptyData => Self::EmptyData(
                serde_json::from_value(value)
                    .map_err(|e| BarViewError::InvalidOption(format!("{key}: {e}")))?,
            ),
            OptionKey::DragDistancePx => Self::DragDistancePx(number_value(key, &value)?),
            OptionKey::Data => Self::Data(
                serde_json::from_value(value)
                    .map_err(|e| BarViewError::InvalidData(format!("failed to parse data: {e}")))?,
            ),
        })
    }
}

fn check_drag_distance(distance: f64) -> BarViewResult<()> {
    if !distance.is_finite() || distance < 0.0 {
        return Err(BarViewError::InvalidOption(format!(
            "dragDistancePx must be finite and >= 0, got {distance}"
        )));
    }
    Ok(())
}

fn css_length_value(key: OptionKey, value: &Value) -> BarViewResult<CssLength> {
    match value {
        Value::String(text) => text.parse(),
        Value::Number(number) => number
            .as_f64()
            .filter(|px| px.is_finite() && *px >= 0.0)
            .map(CssLength::Pixels)
            .ok_or_else(|| BarViewError::InvalidOption(format!("{key}: {value}"))),
        _ => Err(BarViewError::InvalidOption(format!("{key}: {value}"))),
    }
}

/// Loose boolean coercion: `"false"` and `"0"` read as `false`.
fn truthy_value(key: OptionKey, value: &Value) -> BarViewResult<bool> {
    match value {
        Value::Bool(flag) => Ok(*flag),
        Value::Number(number) => Ok(number.as_f64().is_some_and(|n| n != 0.0)),
        Value::String(text) => match text.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" | "" => Ok(false),
            _ => Err(BarViewError::InvalidOption(format!("{key}: {value}"))),
        },
        Value::Null => Ok(false),
        _ => Err(BarViewError::InvalidOption(format!("{key}: {value}"))),
    }
}

fn pixels_value(key: OptionKey, value: &Value) -> BarViewResult<u32> {
    value
        .as_u64()
        .and_then(|px| u32::try_from(px).ok())
        .ok_or_else(|| {
            BarViewError::InvalidOption(format!("{key} must be a non-negative integer: {value}"))
        })
}

fn number_value(key: OptionKey, value: &Value) -> BarViewResult<f64> {
    value
        .as_f64()
        .ok_or_else(|| BarViewError::InvalidOption(format!("{key} must be a number: {value}")))
}
