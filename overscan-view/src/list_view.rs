use alloc::sync::Arc;
use alloc::vec::Vec;

use overscan::{ListOptions, ListState};

use crate::{ListContent, RenderFrame};

/// A provider for a placeholder node (empty state, loading indicator).
pub type NodeProvider<N> = Arc<dyn Fn() -> N + Send + Sync>;

/// A render driver for a virtualized, uniform-height list.
///
/// Wraps a [`ListState`] and owns the caller-facing rendering contract: each
/// [`ListView::render`] call syncs the item count from the caller's slice,
/// recomputes the window, and materializes it through the caller's
/// `render_item` closure. The item data itself stays owned by the caller and
/// is never mutated here.
///
/// Scroll and viewport events are forwarded to the engine, so the
/// end-reached notification and the reset-on-empty rule behave exactly as
/// documented on [`ListState`].
pub struct ListView<N> {
    state: ListState,
    empty: Option<NodeProvider<N>>,
    loading: Option<NodeProvider<N>>,
}

impl<N> ListView<N> {
    pub fn new(options: ListOptions) -> Self {
        Self {
            state: ListState::new(options),
            empty: None,
            loading: None,
        }
    }

    pub fn from_state(state: ListState) -> Self {
        Self {
            state,
            empty: None,
            loading: None,
        }
    }

    /// Sets the placeholder rendered instead of the list when it is empty.
    pub fn with_empty(mut self, empty: impl Fn() -> N + Send + Sync + 'static) -> Self {
        self.empty = Some(Arc::new(empty));
        self
    }

    /// Sets the trailing indicator rendered while a load is in flight.
    pub fn with_loading(mut self, loading: impl Fn() -> N + Send + Sync + 'static) -> Self {
        self.loading = Some(Arc::new(loading));
        self
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ListState {
        &mut self.state
    }

    pub fn into_state(self) -> ListState {
        self.state
    }

    /// Call this when the UI reports a scroll offset change.
    pub fn on_scroll(&mut self, offset: u64) {
        self.state.apply_scroll_event(offset);
    }

    /// Call this when the scrollable container is (re)measured.
    pub fn on_viewport_height(&mut self, height: u32) {
        self.state.set_viewport_height(height);
    }

    /// Marks an incremental load as started/finished; while loading,
    /// end-reached notifications are suppressed and the loading placeholder
    /// is appended to rendered frames.
    pub fn set_loading(&mut self, loading: bool) {
        self.state.set_is_loading(loading);
    }

    /// Renders the current window from `items`.
    ///
    /// `render_item` is invoked once per windowed item, in ascending index
    /// order. The item count is synced from `items.len()` first, so a list
    /// that became empty resets its scroll position before the (skipped)
    /// windowing step.
    pub fn render<T>(
        &mut self,
        items: &[T],
        mut render_item: impl FnMut(&T, usize) -> N,
    ) -> ListContent<N> {
        self.state.set_count(items.len());
        if items.is_empty() {
            return ListContent::Empty(self.empty.as_ref().map(|f| f()));
        }

        let window = self.state.window();
        let mut nodes = Vec::with_capacity(window.len());
        for index in window.indexes() {
            nodes.push(render_item(&items[index], index));
        }

        let loading = if self.state.is_loading() {
            self.loading.as_ref().map(|f| f())
        } else {
            None
        };

        ListContent::Frame(RenderFrame {
            content_height: self.state.total_height(),
            pixel_offset: window.pixel_offset,
            start_index: window.start_index,
            nodes,
            loading,
        })
    }
}

impl<N> core::fmt::Debug for ListView<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListView")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
