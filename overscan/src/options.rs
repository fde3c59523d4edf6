use alloc::sync::Arc;

use crate::grid::GridState;
use crate::list::ListState;
use crate::window::DEFAULT_OVERSCAN;

/// A callback fired when an engine's state changes.
pub type OnChangeCallback<S> = Arc<dyn Fn(&S) + Send + Sync>;

/// A callback fired when the scroll position approaches the end of the
/// content. Edge-triggered; see [`ListOptions::end_reached_threshold`].
pub type OnEndReachedCallback = Arc<dyn Fn() + Send + Sync>;

/// Initial scroll offset configuration.
#[derive(Clone)]
pub enum InitialOffset {
    /// A fixed initial offset.
    Value(u64),
    /// A lazily evaluated initial offset provider (called at construction).
    Provider(Arc<dyn Fn() -> u64 + Send + Sync>),
}

impl InitialOffset {
    pub(crate) fn resolve(&self) -> u64 {
        match self {
            Self::Value(v) => *v,
            Self::Provider(f) => f(),
        }
    }
}

impl Default for InitialOffset {
    fn default() -> Self {
        Self::Value(0)
    }
}

impl core::fmt::Debug for InitialOffset {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

/// Configuration for [`crate::ListState`].
///
/// Callbacks are stored in `Arc`s so options are cheap to clone: adapters can
/// copy, tweak a field, and call `ListState::set_options` without
/// reallocating closures.
pub struct ListOptions {
    /// Total number of items in the (virtual) list.
    pub count: usize,
    /// Fixed pixel height of one item. Must be > 0.
    pub item_height: u32,
    /// Extra items rendered beyond each edge of the viewport.
    pub overscan: usize,
    /// Distance in pixels from the bottom of the content at which
    /// `on_end_reached` fires. The callback is edge-triggered: it fires once
    /// when the scroll position enters the threshold band and again only
    /// after the position has left the band and re-entered it.
    pub end_reached_threshold: u32,
    /// Initial scroll offset.
    pub initial_offset: InitialOffset,
    /// Optional callback fired when the engine's state changes.
    pub on_change: Option<OnChangeCallback<ListState>>,
    /// Optional callback for incremental loading; see `end_reached_threshold`.
    pub on_end_reached: Option<OnEndReachedCallback>,
}

impl ListOptions {
    pub fn new(count: usize, item_height: u32) -> Self {
        Self {
            count,
            item_height,
            overscan: DEFAULT_OVERSCAN,
            end_reached_threshold: 0,
            initial_offset: InitialOffset::default(),
            on_change: None,
            on_end_reached: None,
        }
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_end_reached_threshold(mut self, threshold: u32) -> Self {
        self.end_reached_threshold = threshold;
        self
    }

    pub fn with_initial_offset(mut self, initial_offset: InitialOffset) -> Self {
        self.initial_offset = initial_offset;
        self
    }

    pub fn with_initial_offset_value(mut self, initial_offset: u64) -> Self {
        self.initial_offset = InitialOffset::Value(initial_offset);
        self
    }

    pub fn with_initial_offset_provider(
        mut self,
        initial_offset: impl Fn() -> u64 + Send + Sync + 'static,
    ) -> Self {
        self.initial_offset = InitialOffset::Provider(Arc::new(initial_offset));
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&ListState) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_end_reached(
        mut self,
        on_end_reached: Option<impl Fn() + Send + Sync + 'static>,
    ) -> Self {
        self.on_end_reached = on_end_reached.map(|f| Arc::new(f) as _);
        self
    }
}

impl Clone for ListOptions {
    fn clone(&self) -> Self {
        Self {
            count: self.count,
            item_height: self.item_height,
            overscan: self.overscan,
            end_reached_threshold: self.end_reached_threshold,
            initial_offset: self.initial_offset.clone(),
            on_change: self.on_change.clone(),
            on_end_reached: self.on_end_reached.clone(),
        }
    }
}

impl core::fmt::Debug for ListOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListOptions")
            .field("count", &self.count)
            .field("item_height", &self.item_height)
            .field("overscan", &self.overscan)
            .field("end_reached_threshold", &self.end_reached_threshold)
            .field("initial_offset", &self.initial_offset)
            .finish_non_exhaustive()
    }
}

/// Configuration for [`crate::GridState`].
pub struct GridOptions {
    /// Total number of items in the (virtual) grid.
    pub count: usize,
    /// Fixed pixel height of one row. Must be > 0.
    pub row_height: u32,
    /// Items per row. Must be > 0.
    pub items_per_row: usize,
    /// Extra rows rendered beyond each edge of the viewport.
    pub overscan: usize,
    /// Same edge-triggered contract as [`ListOptions::end_reached_threshold`].
    pub end_reached_threshold: u32,
    /// Initial scroll offset.
    pub initial_offset: InitialOffset,
    /// Optional callback fired when the engine's state changes.
    pub on_change: Option<OnChangeCallback<GridState>>,
    /// Optional callback for incremental loading.
    pub on_end_reached: Option<OnEndReachedCallback>,
}

impl GridOptions {
    pub fn new(count: usize, row_height: u32, items_per_row: usize) -> Self {
        Self {
            count,
            row_height,
            items_per_row,
            overscan: DEFAULT_OVERSCAN,
            end_reached_threshold: 0,
            initial_offset: InitialOffset::default(),
            on_change: None,
            on_end_reached: None,
        }
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_end_reached_threshold(mut self, threshold: u32) -> Self {
        self.end_reached_threshold = threshold;
        self
    }

    pub fn with_initial_offset(mut self, initial_offset: InitialOffset) -> Self {
        self.initial_offset = initial_offset;
        self
    }

    pub fn with_initial_offset_value(mut self, initial_offset: u64) -> Self {
        self.initial_offset = InitialOffset::Value(initial_offset);
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&GridState) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_end_reached(
        mut self,
        on_end_reached: Option<impl Fn() + Send + Sync + 'static>,
    ) -> Self {
        self.on_end_reached = on_end_reached.map(|f| Arc::new(f) as _);
        self
    }
}

impl Clone for GridOptions {
    fn clone(&self) -> Self {
        Self {
            count: self.count,
            row_height: self.row_height,
            items_per_row: self.items_per_row,
            overscan: self.overscan,
            end_reached_threshold: self.end_reached_threshold,
            initial_offset: self.initial_offset.clone(),
            on_change: self.on_change.clone(),
            on_end_reached: self.on_end_reached.clone(),
        }
    }
}

impl core::fmt::Debug for GridOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GridOptions")
            .field("count", &self.count)
            .field("row_height", &self.row_height)
            .field("items_per_row", &self.items_per_row)
            .field("overscan", &self.overscan)
            .field("end_reached_threshold", &self.end_reached_threshold)
            .field("initial_offset", &self.initial_offset)
            .finish_non_exhaustive()
    }
}
