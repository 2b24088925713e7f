use indexmap::IndexMap;

use crate::core::{CoordinateMapper, DataIndex, SelectionWindow, Viewport};
use crate::error::{BarViewError, BarViewResult};
use crate::extensions::{BarViewEvent, BarViewObserver, ObserverContext};
use crate::interaction::{DragConfig, DragMode, DragState};
use crate::render::Renderer;

use super::BarViewConfig;

/// Facade a rendering shell drives: one keyed dataset drawn as bars plus a
/// draggable selection window.
///
/// The view exclusively owns its index, window and observers. All calls are
/// synchronous; nothing is shared between views.
pub struct BarView<R: Renderer, V = serde_json::Value> {
    pub(super) renderer: R,
    pub(super) config: BarViewConfig,
    pub(super) parent: Viewport,
    pub(super) viewport: Viewport,
    pub(super) index: DataIndex<V>,
    pub(super) window: SelectionWindow,
    pub(super) drag: DragState,
    pub(super) observers: IndexMap<String, Box<dyn BarViewObserver>>,
    pub(super) modified: bool,
}

impl<R: Renderer, V> BarView<R, V> {
    /// Creates a view inside a parent element of the given measured size.
    pub fn new(renderer: R, config: BarViewConfig, parent: Viewport) -> BarViewResult<Self> {
        let config = config.validate()?;
        let window = SelectionWindow::new(config.window_start, config.window_size)?;
        let drag = DragState::with_config(DragConfig {
            min_distance_px: config.drag_distance_px,
        });

        Ok(Self {
            renderer,
            config,
            parent,
            viewport: config.resolve_viewport(parent),
            index: DataIndex::default(),
            window,
            drag,
            observers: IndexMap::new(),
            modified: false,
        })
    }

    #[must_use]
    pub fn config(&self) -> BarViewConfig {
        self.config
    }

    /// Cached container size in whole pixels.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn index(&self) -> &DataIndex<V> {
        &self.index
    }

    #[must_use]
    pub fn window(&self) -> &SelectionWindow {
        &self.window
    }

    #[must_use]
    pub fn drag_mode(&self) -> DragMode {
        self.drag.mode()
    }

    /// `true` when data changed since the last successful render.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Mapper for the current data, container width and relief.
    pub fn mapper(&self) -> BarViewResult<CoordinateMapper> {
        CoordinateMapper::for_index(
            &self.index,
            f64::from(self.viewport.width),
            f64::from(self.config.pre_relief),
            f64::from(self.config.post_relief),
        )
    }

    pub fn key_to_display(&self, key: f64) -> BarViewResult<f64> {
        self.mapper()?.key_to_display(key)
    }

    pub fn display_to_key(&self, position: f64) -> BarViewResult<f64> {
        self.mapper()?.display_to_key(position)
    }

    #[must_use]
    pub fn lookup(&self, key: f64) -> Option<usize> {
        self.index.lookup(key)
    }

    /// Registers an observer with a unique, non-empty id.
    pub fn register_observer(&mut self, observer: Box<dyn BarViewObserver>) -> BarViewResult<()> {
        let observer_id = observer.id().to_owned();
        if observer_id.is_empty() {
            return Err(BarViewError::InvalidData(
                "observer id must not be empty".to_owned(),
            ));
        }
        if self.observers.contains_key(&observer_id) {
            return Err(BarViewError::InvalidData(format!(
                "observer with id `{observer_id}` is already registered"
            )));
        }
        self.observers.insert(observer_id, observer);
        Ok(())
    }

    /// Unregisters an observer by id. Returns `true` when removed.
    pub fn unregister_observer(&mut self, observer_id: &str) -> bool {
        self.observers.shift_remove(observer_id).is_some()
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn has_observer(&self, observer_id: &str) -> bool {
        self.observers.contains_key(observer_id)
    }

    pub(super) fn observer_context(&self) -> ObserverContext {
        ObserverContext {
            viewport: self.viewport,
            window: self.window.bounds(),
            data_offset: self.index.offset(),
            data_range: self.index.range(),
            data_max_depth: self.index.max_depth(),
            bucket_count: self.index.len(),
            drag_mode: self.drag.mode(),
        }
    }

    pub(super) fn emit(&mut self, event: BarViewEvent) {
        let context = self.observer_context();
        for observer in self.observers.values_mut() {
            observer.on_event(&event, context);
        }
    }
}
