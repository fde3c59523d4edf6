use alloc::vec::Vec;

/// The outcome of a list render pass.
///
/// A closed sum type so hosts match exhaustively: adding a variant is a
/// compile error at every call site rather than a silently ignored case.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListContent<N> {
    /// The item list is empty. Windowing was skipped entirely; the payload is
    /// the caller-supplied placeholder, if any.
    Empty(Option<N>),
    /// The rendered window.
    Frame(RenderFrame<N>),
}

impl<N> ListContent<N> {
    pub fn frame(&self) -> Option<&RenderFrame<N>> {
        match self {
            Self::Empty(_) => None,
            Self::Frame(frame) => Some(frame),
        }
    }
}

/// One rendered window of a virtualized list.
///
/// The host lays this out as: a scroll container whose inner spacer is
/// `content_height` tall (so native scrollbars and fling physics see the full
/// list), with `nodes` stacked inside it, translated down by `pixel_offset`.
/// Prior siblings are never re-flowed; only the translation changes from
/// frame to frame.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderFrame<N> {
    /// Full virtual content height (`count * item_height`).
    pub content_height: u64,
    /// Translation of the first rendered node from the top of the content.
    pub pixel_offset: u64,
    /// Item index of the first rendered node.
    pub start_index: usize,
    /// Rendered nodes, in ascending item-index order.
    pub nodes: Vec<N>,
    /// A trailing loading indicator, present while a load is in flight.
    pub loading: Option<N>,
}

impl<N> RenderFrame<N> {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Item indexes covered by this frame.
    pub fn indexes(&self) -> core::ops::Range<usize> {
        self.start_index..self.start_index + self.nodes.len()
    }
}

/// The outcome of a grid render pass. See [`ListContent`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridContent<N> {
    /// The item list is empty; the payload is the caller-supplied
    /// placeholder, if any.
    Empty(Option<N>),
    /// The rendered window.
    Frame(GridFrame<N>),
}

impl<N> GridContent<N> {
    pub fn frame(&self) -> Option<&GridFrame<N>> {
        match self {
            Self::Empty(_) => None,
            Self::Frame(frame) => Some(frame),
        }
    }
}

/// One rendered window of a virtualized grid.
///
/// Nodes are flat, in ascending item-index order; the host distributes them
/// into rows of `items_per_row`, with the first row translated down by
/// `pixel_offset`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridFrame<N> {
    /// Full virtual content height (`row_count * row_height`).
    pub content_height: u64,
    /// Translation of the first rendered row from the top of the content.
    pub pixel_offset: u64,
    /// Item index of the first rendered node.
    pub start_index: usize,
    /// Fixed column count the nodes are distributed into.
    pub items_per_row: usize,
    /// Rendered nodes, in ascending item-index order.
    pub nodes: Vec<N>,
    /// A trailing loading indicator, present while a load is in flight.
    pub loading: Option<N>,
}

impl<N> GridFrame<N> {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Item indexes covered by this frame.
    pub fn indexes(&self) -> core::ops::Range<usize> {
        self.start_index..self.start_index + self.nodes.len()
    }

    /// Position of the `slot`-th node, as (row within this frame, column).
    pub fn slot_position(&self, slot: usize) -> (usize, usize) {
        debug_assert!(self.items_per_row > 0, "GridFrame::items_per_row must be > 0");
        if self.items_per_row == 0 {
            return (0, 0);
        }
        let index = self.start_index + slot;
        let first_row = self.start_index / self.items_per_row;
        (index / self.items_per_row - first_row, index % self.items_per_row)
    }
}
