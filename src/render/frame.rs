use crate::core::Viewport;
use crate::error::{BarViewError, BarViewResult};
use crate::render::{BarPrimitive, SelectionPrimitive};

/// Everything a backend needs to draw one pass of a bar view.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub bars: Vec<BarPrimitive>,
    pub selection: Option<SelectionPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            bars: Vec::new(),
            selection: None,
        }
    }

    #[must_use]
    pub fn with_bars(mut self, bars: impl IntoIterator<Item = BarPrimitive>) -> Self {
        self.bars.extend(bars);
        self
    }

    #[must_use]
    pub fn with_selection(mut self, selection: SelectionPrimitive) -> Self {
        self.selection = Some(selection);
        self
    }

    /// Rejects frames a backend could not draw faithfully.
    pub fn validate(&self) -> BarViewResult<()> {
        if !self.viewport.is_valid() {
            return Err(BarViewError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.bars.iter().try_for_each(BarPrimitive::validate)?;
        if let Some(selection) = self.selection {
            selection.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty() && self.selection.is_none()
    }
}
