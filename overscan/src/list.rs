use alloc::sync::Arc;
use core::cell::Cell;
use core::cmp;

use crate::{
    Align, FrameState, InitialOffset, ItemWindow, ListLayout, ListOptions, ScrollDirection,
    ScrollState, ViewportState,
};

/// A stateful windowing engine for a uniform-height vertical list.
///
/// This type is intentionally UI-agnostic:
/// - It holds no UI objects and no item data; items stay owned by the caller.
/// - Your adapter drives it by providing the viewport height and scroll
///   offsets as UI events arrive.
/// - The window is recomputed from scratch, synchronously, on every query —
///   there is nothing to invalidate and no race between successive events.
///
/// For a caller-facing render driver (item closures, empty/loading
/// placeholders), see the `overscan-view` crate.
#[derive(Clone, Debug)]
pub struct ListState {
    options: ListOptions,
    viewport_height: u32,
    scroll_offset: u64,
    scroll_direction: Option<ScrollDirection>,
    is_loading: bool,
    // Edge trigger for `on_end_reached`: armed while the scroll position is
    // outside the threshold band, consumed on entry.
    end_armed: bool,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl ListState {
    /// Creates a new engine from options.
    ///
    /// `options.initial_offset` is resolved and applied immediately.
    pub fn new(options: ListOptions) -> Self {
        let scroll_offset = options.initial_offset.resolve();
        wdebug!(
            count = options.count,
            item_height = options.item_height,
            overscan = options.overscan,
            "ListState::new"
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

    pub fn options(&self) -> &ListOptions {
        &self.options
    }

    /// Replaces the options wholesale.
    ///
    /// A count transition to zero resets the scroll offset, exactly as
    /// [`Self::set_count`] does.
    pub fn set_options(&mut self, options: ListOptions) {
        let prev_count = self.options.count;
        self.options = options;
        wtrace!(
            count = self.options.count,
            item_height = self.options.item_height,
            overscan = self.options.overscan,
            "ListState::set_options"
        );
        if self.options.count == 0 && prev_count != 0 {
            self.reset_scroll();
        }
        self.poll_end_reached();
        self.notify();
    }

    /// Clones the current options, applies `f`, then delegates to
    /// [`Self::set_options`].
    pub fn update_options(&mut self, f: impl FnOnce(&mut ListOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_on_change(&mut self, on_change: Option<impl Fn(&ListState) + Send + Sync + 'static>) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
        self.notify();
    }

    pub fn set_on_end_reached(
        &mut self,
        on_end_reached: Option<impl Fn() + Send + Sync + 'static>,
    ) {
        self.options.on_end_reached = on_end_reached.map(|f| Arc::new(f) as _);
    }

    pub fn set_initial_offset(&mut self, initial_offset: u64) {
        self.options.initial_offset = InitialOffset::Value(initial_offset);
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
    ///
    /// On a typical frame an adapter updates the viewport height and scroll
    /// offset together; without batching each setter would trigger
    /// `on_change`, which can be expensive if the callback drives rendering.
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
    pub fn layout(&self) -> ListLayout {
        ListLayout {
            item_height: self.options.item_height,
            viewport_height: self.viewport_height,
            overscan: self.options.overscan,
        }
    }

    pub fn count(&self) -> usize {
        self.options.count
    }

    /// Updates the item count.
    ///
    /// A transition to zero resets the scroll offset to zero so the viewport
    /// is never stranded past the end of an empty list (e.g. after a filter
    /// clears it).
    pub fn set_count(&mut self, count: usize) {
        if self.options.count == count {
            return;
        }
        wtrace!(prev = self.options.count, count, "ListState::set_count");
        self.options.count = count;
        if count == 0 {
            self.reset_scroll();
        }
        self.poll_end_reached();
        self.notify();
    }

    pub fn item_height(&self) -> u32 {
        self.options.item_height
    }

    pub fn set_item_height(&mut self, item_height: u32) {
        if self.options.item_height == item_height {
            return;
        }
        self.options.item_height = item_height;
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

    pub fn set_end_reached_threshold(&mut self, threshold: u32) {
        self.options.end_reached_threshold = threshold;
        self.poll_end_reached();
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

    /// Applies a scroll offset update from your UI layer (e.g. wheel/drag).
    ///
    /// Equivalent to `set_scroll_offset` inside a [`Self::batch_update`];
    /// prefer this entry point when an `on_change` callback drives rendering.
    pub fn apply_scroll_event(&mut self, offset: u64) {
        wtrace!(offset, "apply_scroll_event");
        self.batch_update(|s| {
            s.set_scroll_offset(offset);
        });
    }

    /// Same as [`Self::apply_scroll_event`], but clamps the offset.
    pub fn apply_scroll_event_clamped(&mut self, offset: u64) {
        wtrace!(offset, "apply_scroll_event_clamped");
        self.batch_update(|s| {
            s.set_scroll_offset_clamped(offset);
        });
    }

    /// Applies viewport height and scroll offset in a single coalesced
    /// update. The recommended entry point for adapters that receive scroll
    /// events along with updated geometry.
    pub fn apply_scroll_frame(&mut self, viewport_height: u32, scroll_offset: u64) {
        self.batch_update(|s| {
            s.set_viewport_height(viewport_height);
            s.set_scroll_offset(scroll_offset);
        });
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Marks an incremental load as in flight.
    ///
    /// While loading, `on_end_reached` notifications are suppressed so a slow
    /// fetch cannot be requested twice by continued scrolling at the bottom.
    pub fn set_is_loading(&mut self, is_loading: bool) {
        if self.is_loading == is_loading {
            return;
        }
        self.is_loading = is_loading;
        self.notify();
    }

    /// Full content height (`count * item_height`) — the spacer the UI keeps
    /// so native scrollbars and scroll physics behave as if every item were
    /// present.
    pub fn total_height(&self) -> u64 {
        self.layout().total_height(self.options.count)
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.layout().max_scroll_offset(self.options.count)
    }

    pub fn clamp_scroll_offset(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    /// The window of items to render for the current scroll position.
    pub fn window(&self) -> ItemWindow {
        self.layout().window(self.options.count, self.scroll_offset)
    }

    /// The window for a hypothetical scroll position, without mutating state.
    pub fn window_for(&self, scroll_offset: u64, viewport_height: u32) -> ItemWindow {
        ListLayout {
            viewport_height,
            ..self.layout()
        }
        .window(self.options.count, scroll_offset)
    }

    /// Invokes `f` for each index in the current window, in ascending order.
    pub fn for_each_window_index(&self, f: impl FnMut(usize)) {
        self.window().indexes().for_each(f);
    }

    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        self.layout().index_at_offset(self.options.count, offset)
    }

    /// Start offset of `index` in the content, or `None` when out of range.
    pub fn item_start(&self, index: usize) -> Option<u64> {
        (index < self.options.count).then(|| self.layout().item_start(index))
    }

    pub fn item_end(&self, index: usize) -> Option<u64> {
        let start = self.item_start(index)?;
        Some(start.saturating_add(self.options.item_height as u64))
    }

    /// Programmatically scrolls to an index.
    ///
    /// Sets the internal offset to the computed (clamped) target and returns
    /// it. The end-reached trigger is evaluated like any other scroll: a jump
    /// into the threshold band fires it once.
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
        let start = self.layout().item_start(index);
        let end = start.saturating_add(self.options.item_height as u64);
        let view = self.viewport_height as u64;

        let target = match align {
            Align::Start => start,
            Align::End => end.saturating_sub(view),
            Align::Center => {
                let center = start.saturating_add(self.options.item_height as u64 / 2);
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

    /// Returns a lightweight snapshot of the current viewport state.
    pub fn viewport_state(&self) -> ViewportState {
        ViewportState {
            height: self.viewport_height,
        }
    }

    /// Returns a lightweight snapshot of the current scroll state.
    pub fn scroll_state(&self) -> ScrollState {
        ScrollState {
            offset: self.scroll_offset,
        }
    }

    /// Returns a combined snapshot of viewport + scroll state.
    pub fn frame_state(&self) -> FrameState {
        FrameState {
            viewport: self.viewport_state(),
            scroll: self.scroll_state(),
        }
    }

    /// Restores viewport geometry from a previously captured snapshot.
    pub fn restore_viewport_state(&mut self, viewport: ViewportState) {
        self.set_viewport_height(viewport.height);
    }

    /// Restores scroll state from a previously captured snapshot.
    ///
    /// The offset is clamped against the current content, which may have
    /// changed since the snapshot was taken.
    pub fn restore_scroll_state(&mut self, scroll: ScrollState) {
        self.set_scroll_offset_clamped(scroll.offset);
    }

    /// Restores both viewport + scroll state from a previously captured
    /// snapshot, coalesced into a single notification.
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

    /// Whether the scroll position is inside the end-reached threshold band.
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

    // Edge trigger: fires on the transition into the band, re-arms on the
    // transition out. A transition observed while `is_loading` is consumed
    // without firing.
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
