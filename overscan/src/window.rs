use core::cmp;

use crate::{ItemWindow, RowWindow};

/// Default number of extra items rendered beyond each edge of the viewport.
pub const DEFAULT_OVERSCAN: usize = 3;

/// Layout constants for a uniform-height vertical list.
///
/// This is the pure half of the engine: given an item count and a scroll
/// offset, [`ListLayout::window`] computes the index slice that covers the
/// viewport plus overscan. No state, no allocation; callers are expected to
/// recompute on every scroll event.
///
/// `item_height` and `viewport_height` must be positive. Zero values are a
/// caller contract violation: debug builds assert, release builds degrade to
/// an empty window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListLayout {
    /// Fixed pixel height of one item.
    pub item_height: u32,
    /// Pixel height of the scrollable container.
    pub viewport_height: u32,
    /// Extra items rendered beyond each edge of the viewport.
    pub overscan: usize,
}

impl ListLayout {
    pub fn new(item_height: u32, viewport_height: u32) -> Self {
        Self {
            item_height,
            viewport_height,
            overscan: DEFAULT_OVERSCAN,
        }
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    /// Number of items needed to cover the viewport (`ceil(viewport / item)`).
    pub fn visible_count(&self) -> usize {
        if self.item_height == 0 {
            return 0;
        }
        self.viewport_height.div_ceil(self.item_height) as usize
    }

    /// Full content height for `item_count` items (the spacer size).
    pub fn total_height(&self, item_count: usize) -> u64 {
        item_count as u64 * self.item_height as u64
    }

    pub fn max_scroll_offset(&self, item_count: usize) -> u64 {
        self.total_height(item_count)
            .saturating_sub(self.viewport_height as u64)
    }

    pub fn clamp_scroll_offset(&self, item_count: usize, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset(item_count))
    }

    /// Index of the first item intersecting the viewport at `scroll_offset`.
    pub fn first_visible(&self, scroll_offset: u64) -> usize {
        debug_assert!(self.item_height > 0, "ListLayout::item_height must be > 0");
        if self.item_height == 0 {
            return 0;
        }
        (scroll_offset / self.item_height as u64) as usize
    }

    /// Maps a content offset to the item covering it.
    pub fn index_at_offset(&self, item_count: usize, offset: u64) -> Option<usize> {
        if item_count == 0 || self.item_height == 0 {
            return None;
        }
        Some(self.first_visible(offset).min(item_count - 1))
    }

    /// Start offset of `index` in the content.
    pub fn item_start(&self, index: usize) -> u64 {
        index as u64 * self.item_height as u64
    }

    /// Computes the window of items to render at `scroll_offset`.
    ///
    /// The returned range contains every item whose rectangle intersects the
    /// viewport, plus up to `overscan` items on each side. The offset is
    /// clamped to the maximum scroll position first, so overscroll past the
    /// end is tolerated. With `item_count == 0` the window is empty and
    /// `pixel_offset` is 0.
    pub fn window(&self, item_count: usize, scroll_offset: u64) -> ItemWindow {
        debug_assert!(self.item_height > 0, "ListLayout::item_height must be > 0");
        if item_count == 0 || self.viewport_height == 0 || self.item_height == 0 {
            return ItemWindow::EMPTY;
        }

        let scroll_offset = self.clamp_scroll_offset(item_count, scroll_offset);
        let first_visible = self.first_visible(scroll_offset);

        let start = first_visible.saturating_sub(self.overscan);
        let last = cmp::min(
            item_count - 1,
            first_visible
                .saturating_add(self.visible_count())
                .saturating_add(self.overscan),
        );

        ItemWindow {
            start_index: start,
            end_index: last + 1,
            pixel_offset: self.item_start(start),
        }
    }
}

/// Layout constants for a fixed-column grid with uniform row heights.
///
/// Windowing runs over whole rows: the scroll offset selects a contiguous row
/// range exactly the way [`ListLayout`] selects items, and the row range is
/// then flattened to item indexes by the column count. The last row may be
/// partial.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridLayout {
    /// Fixed pixel height of one row.
    pub row_height: u32,
    /// Items per row. Must be > 0.
    pub items_per_row: usize,
    /// Pixel height of the scrollable container.
    pub viewport_height: u32,
    /// Extra rows rendered beyond each edge of the viewport.
    pub overscan: usize,
}

impl GridLayout {
    pub fn new(row_height: u32, items_per_row: usize, viewport_height: u32) -> Self {
        Self {
            row_height,
            items_per_row,
            viewport_height,
            overscan: DEFAULT_OVERSCAN,
        }
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    fn row_layout(&self) -> ListLayout {
        ListLayout {
            item_height: self.row_height,
            viewport_height: self.viewport_height,
            overscan: self.overscan,
        }
    }

    /// Number of rows needed for `item_count` items (`ceil(count / columns)`).
    pub fn row_count(&self, item_count: usize) -> usize {
        debug_assert!(self.items_per_row > 0, "GridLayout::items_per_row must be > 0");
        if self.items_per_row == 0 {
            return 0;
        }
        item_count.div_ceil(self.items_per_row)
    }

    pub fn row_of(&self, index: usize) -> usize {
        debug_assert!(self.items_per_row > 0, "GridLayout::items_per_row must be > 0");
        if self.items_per_row == 0 {
            return 0;
        }
        index / self.items_per_row
    }

    pub fn column_of(&self, index: usize) -> usize {
        debug_assert!(self.items_per_row > 0, "GridLayout::items_per_row must be > 0");
        if self.items_per_row == 0 {
            return 0;
        }
        index % self.items_per_row
    }

    /// Full content height for `item_count` items (the spacer size).
    pub fn total_height(&self, item_count: usize) -> u64 {
        self.row_layout().total_height(self.row_count(item_count))
    }

    pub fn max_scroll_offset(&self, item_count: usize) -> u64 {
        self.row_layout().max_scroll_offset(self.row_count(item_count))
    }

    pub fn clamp_scroll_offset(&self, item_count: usize, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset(item_count))
    }

    /// Start offset of row `row` in the content.
    pub fn row_start(&self, row: usize) -> u64 {
        row as u64 * self.row_height as u64
    }

    /// Computes the window of rows to render at `scroll_offset`.
    pub fn rows(&self, item_count: usize, scroll_offset: u64) -> RowWindow {
        let w = self.row_layout().window(self.row_count(item_count), scroll_offset);
        RowWindow {
            start_row: w.start_index,
            end_row: w.end_index,
            pixel_offset: w.pixel_offset,
        }
    }

    /// Computes the flat item window at `scroll_offset`.
    ///
    /// This is the row window multiplied out by the column count, clamped to
    /// `item_count` so a partial last row never yields out-of-range indexes.
    pub fn window(&self, item_count: usize, scroll_offset: u64) -> ItemWindow {
        let rows = self.rows(item_count, scroll_offset);
        if rows.is_empty() {
            return ItemWindow::EMPTY;
        }
        ItemWindow {
            start_index: rows.start_row * self.items_per_row,
            end_index: cmp::min(item_count, rows.end_row * self.items_per_row),
            pixel_offset: rows.pixel_offset,
        }
    }
}
