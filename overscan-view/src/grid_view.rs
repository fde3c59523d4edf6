use alloc::sync::Arc;
use alloc::vec::Vec;

use overscan::{GridOptions, GridState};

use crate::list_view::NodeProvider;
use crate::{GridContent, GridFrame};

/// A render driver for a virtualized, fixed-column grid.
///
/// The grid counterpart of [`crate::ListView`]: windowing runs over whole
/// rows, the windowed slots are materialized flat in ascending index order,
/// and the host distributes them into rows of
/// [`GridFrame::items_per_row`].
pub struct GridView<N> {
    state: GridState,
    empty: Option<NodeProvider<N>>,
    loading: Option<NodeProvider<N>>,
}

impl<N> GridView<N> {
    pub fn new(options: GridOptions) -> Self {
        Self {
            state: GridState::new(options),
            empty: None,
            loading: None,
        }
    }

    pub fn from_state(state: GridState) -> Self {
        Self {
            state,
            empty: None,
            loading: None,
        }
    }

    /// Sets the placeholder rendered instead of the grid when it is empty.
    pub fn with_empty(mut self, empty: impl Fn() -> N + Send + Sync + 'static) -> Self {
        self.empty = Some(Arc::new(empty));
        self
    }

    /// Sets the trailing indicator rendered while a load is in flight.
    pub fn with_loading(mut self, loading: impl Fn() -> N + Send + Sync + 'static) -> Self {
        self.loading = Some(Arc::new(loading));
        self
    }

    pub fn state(&self) -> &GridState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GridState {
        &mut self.state
    }

    pub fn into_state(self) -> GridState {
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

    /// See [`crate::ListView::set_loading`].
    pub fn set_loading(&mut self, loading: bool) {
        self.state.set_is_loading(loading);
    }

    /// Renders the current window from `items`. See
    /// [`crate::ListView::render`]; the only difference is the flat window
    /// covers whole rows, with the last row possibly partial.
    pub fn render<T>(
        &mut self,
        items: &[T],
        mut render_item: impl FnMut(&T, usize) -> N,
    ) -> GridContent<N> {
        self.state.set_count(items.len());
        if items.is_empty() {
            return GridContent::Empty(self.empty.as_ref().map(|f| f()));
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

        GridContent::Frame(GridFrame {
            content_height: self.state.total_height(),
            pixel_offset: window.pixel_offset,
            start_index: window.start_index,
            items_per_row: self.state.items_per_row(),
            nodes,
            loading,
        })
    }
}

impl<N> core::fmt::Debug for GridView<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GridView")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
