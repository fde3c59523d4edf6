use alloc::sync::Arc;
use core::cell::Cell;
use core::cmp;

use crate::{
    Align, FrameState, GridLayout, GridOptions, ItemWindow, RowWindow, ScrollDirection,
    ScrollState, ViewportState,
};

/// A stateful windowing engine for a fixed-column grid with uniform row
/// heights.
///
/// Same contract as [`crate::ListState`], generalized to rows: the scroll
/// offset selects a contiguous row range, which is flattened to item indexes
/// by the column count. Spacer height, synchronous recompute, the
/// edge-triggered end-reached notification, and the reset-on-empty rule all
/// carry over unchanged.
#[derive(Clone, Debug)]
pub struct GridState {
    options: GridOptions,
    viewport_height: u32,
    scroll_offset: u64,
    scroll_direction: Option<ScrollDirection>,
    is_loading: bool,
    end_armed: bool,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl GridState {
    /// Creates a new engine from options.
    pub fn new(options: GridOptions) -> Self {
        let scroll_offset = options.initial_offset.resolve();
        wdebug!(
            count = options.count,
            row_height = options.row_height,
            items_per_row = options.items_per_row,
            "GridState::new"
        );
        Self {
            scroll_offset,
            viewport_height: 0,
            scroll_direction: None,
            is_loading: false,
            end_armed: true,
            options,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        }
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: GridOptions) {
        let prev_count = self.options.count;
        self.options = options;
        if self.options.count == 0 && prev_count != 0 {
            self.reset_scroll();
        }
        self.poll_end_reached();
        self.notify();
    }

    pub fn update_options(&mut self, f: impl FnOnce(&mut GridOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_on_change(&mut self, on_change: Option<impl Fn(&GridState) + Send + Sync + 'static>) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
        self.notify();
    }

    pub fn set_on_end_reached(
        &mut self,
        on_end_reached: Option<impl Fn() + Send + Sync + 'static>,
    ) {
        self.options.on_end_reached = on_end_reached.map(|f| Arc::new(f) as _);
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    /// The layout constants currently in effect.
    pub fn layout(&self) -> GridLayout {
        GridLayout {
            row_height: self.options.row_height,
            items_per_row: self.options.items_per_row,
            viewport_height: self.viewport_height,
            overscan: self.options.overscan,
        }
    }

    pub fn count(&self) -> usize {
        self.options.count
    }

    /// Updates the item count; a transition to zero resets the scroll offset.
    pub fn set_count(&mut self, count: usize) {
        if self.options.count == count {
            return;
        }
        wtrace!(prev = self.options.count, count, "GridState::set_count");
        self.options.count = count;
        if count == 0 {
            self.reset_scroll();
        }
        self.poll_end_reached();
        self.notify();
    }

    pub fn items_per_row(&self) -> usize {
        self.options.items_per_row
    }

    pub fn set_items_per_row(&mut self, items_per_row: usize) {
        if self.options.items_per_row == items_per_row {
            return;
        }
        self.options.items_per_row = items_per_row;
        self.poll_end_reached();
        self.notify();
    }

    pub fn row_height(&self) -> u32 {
        self.options.row_height
    }

    pub fn set_row_height(&mut self, row_height: u32) {
        if self.options.row_height == row_height {
            return;
        }
        self.options.row_height = row_height;
        self.poll_end_reached();
        self.notify();
    }

    pub fn overscan(&self) -> usize {
        self.options.overscan
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        self.options.overscan = overscan;
        self.notify();
    }

    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    pub fn set_viewport_height(&mut self, height: u32) {
        if self.viewport_height == height {
            return;
        }
        self.viewport_height = height;
        self.poll_end_reached();
        self.notify();
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.scroll_direction
    }

    pub fn set_scroll_offset(&mut self, offset: u64) {
        if self.scroll_offset == offset {
            return;
        }
        let prev = self.scroll_offset;
        self.scroll_offset = offset;
        self.scroll_direction = match offset.cmp(&prev) {
            cmp::Ordering::Greater => Some(ScrollDirection::Forward),
            cmp::Ordering::Less => Some(ScrollDirection::Backward),
            cmp::Ordering::Equal => self.scroll_direction,
        };
        self.poll_end_reached();
        self.notify();
    }

    pub fn set_scroll_offset_clamped(&mut self, offset: u64) {
        let clamped = self.clamp_scroll_offset(offset);
        self.set_scroll_offset(clamped);
    }

    /// Applies a scroll offset update from your UI layer.
    pub fn apply_scroll_event(&mut self, offset: u64) {
        wtrace!(offset, "GridState::apply_scroll_event");
        self.batch_update(|s| {
            s.set_scroll_offset(offset);
        });
    }

    /// Applies viewport height and scroll offset in a single coalesced update.
    pub fn apply_scroll_frame(&mut self, viewport_height: u32, scroll_offset: u64) {
        self.batch_update(|s| {
            s.set_viewport_height(viewport_height);
            s.set_scroll_offset(scroll_offset);
        });
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// See [`crate::ListState::set_is_loading`].
    pub fn set_is_loading(&mut self, is_loading: bool) {
        if self.is_loading == is_loading {
            return;
        }
        self.is_loading = is_loading;
        self.notify();
    }

    pub fn row_count(&self) -> usize {
        self.layout().row_count(self.options.count)
    }

    pub fn row_of(&self, index: usize) -> usize {
        self.layout().row_of(index)
    }

    pub fn column_of(&self, index: usize) -> usize {
        self.layout().column_of(index)
    }

    /// Full content height (`row_count * row_height`) — the spacer size.
    pub fn total_height(&self) -> u64 {
        self.layout().total_height(self.options.count)
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.layout().max_scroll_offset(self.options.count)
    }

    pub fn clamp_scroll_offset(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    /// The window of rows to render for the current scroll position.
    pub fn rows(&self) -> RowWindow {
        self.layout().rows(self.options.count, self.scroll_offset)
    }

    /// The flat window of items to render for the current scroll position.
    pub fn window(&self) -> ItemWindow {
        self.layout().window(self.options.count, self.scroll_offset)
    }

    /// Invokes `f` for each index in the current window, in ascending order.
    pub fn for_each_window_index(&self, f: impl FnMut(usize)) {
        self.window().indexes().for_each(f);
    }

    /// Programmatically scrolls so the row containing `index` is visible.
    ///
    /// Returns the applied (clamped) offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> u64 {
        let offset = self.scroll_to_index_offset(index, align);
        self.set_scroll_offset(offset);
        offset
    }

    /// Computes the clamped target offset for [`Self::scroll_to_index`]
    /// without applying it.
    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> u64 {
        if self.options.count == 0 {
            return 0;
        }
        let index = index.min(self.options.count - 1);
        let row = self.row_of(index);
        let start = self.layout().row_start(row);
        let end = start.saturating_add(self.options.row_height as u64);
        let view = self.viewport_height as u64;

        let target = match align {
            Align::Start => start,
            Align::End => end.saturating_sub(view),
            Align::Center => {
                let center = start.saturating_add(self.options.row_height as u64 / 2);
                center.saturating_sub(view / 2)
            }
            Align::Auto => {
                let cur = self.scroll_offset;
                let cur_end = cur.saturating_add(view);
                if start >= cur && end <= cur_end {
                    cur
                } else if start < cur {
                    start
                } else {
                    end.saturating_sub(view)
                }
            }
        };

        self.clamp_scroll_offset(target)
    }

    pub fn viewport_state(&self) -> ViewportState {
        ViewportState {
            height: self.viewport_height,
        }
    }

    pub fn scroll_state(&self) -> ScrollState {
        ScrollState {
            offset: self.scroll_offset,
        }
    }

    pub fn frame_state(&self) -> FrameState {
        FrameState {
            viewport: self.viewport_state(),
            scroll: self.scroll_state(),
        }
    }

    /// Restores both viewport + scroll state, coalesced into a single
    /// notification. The offset is clamped against the current content.
    pub fn restore_frame_state(&mut self, frame: FrameState) {
        self.batch_update(|s| {
            s.set_viewport_height(frame.viewport.height);
            s.set_scroll_offset_clamped(frame.scroll.offset);
        });
    }

    fn reset_scroll(&mut self) {
        self.scroll_offset = 0;
        self.scroll_direction = None;
        self.end_armed = true;
    }

    fn near_end(&self) -> bool {
        if self.options.count == 0 || self.viewport_height == 0 {
            return false;
        }
        let total = self.total_height();
        let threshold = self.options.end_reached_threshold as u64;
        self.scroll_offset
            .saturating_add(self.viewport_height as u64)
            >= total.saturating_sub(threshold)
    }

    // Same edge trigger as ListState::poll_end_reached.
    fn poll_end_reached(&mut self) {
        if !self.near_end() {
            self.end_armed = true;
            return;
        }
        if !self.end_armed {
            return;
        }
        self.end_armed = false;
        if self.is_loading {
            return;
        }
        wdebug!(
            offset = self.scroll_offset,
            total = self.total_height(),
            "end reached"
        );
        if let Some(cb) = &self.options.on_end_reached {
            cb();
        }
    }
}
