//! A headless windowing engine for virtualized lists and grids.
//!
//! Rendering ten thousand rows when the viewport fits eight is wasted work.
//! This crate computes, from a scroll offset and a handful of layout
//! constants, the contiguous index slice of a uniform-height list (or
//! fixed-column grid) that must be materialized to cover the viewport plus an
//! overscan margin. Everything is closed-form arithmetic recomputed
//! synchronously on each scroll event; superseded results are simply
//! discarded.
//!
//! It is UI-agnostic. A GUI/TUI layer is expected to provide:
//! - the viewport height of the scrollable container
//! - scroll offsets as events arrive
//! - the per-item rendering itself (see the `overscan-view` crate)
//!
//! The engine never touches item data: the caller keeps ownership of the
//! item sequence and only its length is reported here.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod grid;
mod list;
mod options;
mod state;
mod types;
mod window;

#[cfg(test)]
mod tests;

pub use grid::GridState;
pub use list::ListState;
pub use options::{
    GridOptions, InitialOffset, ListOptions, OnChangeCallback, OnEndReachedCallback,
};
pub use state::{FrameState, ScrollState, ViewportState};
pub use types::{Align, ItemWindow, RowWindow, ScrollDirection};
pub use window::{DEFAULT_OVERSCAN, GridLayout, ListLayout};
