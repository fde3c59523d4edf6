//! Render drivers for the `overscan` windowing engine.
//!
//! The `overscan` crate is UI-agnostic and focuses on the core math and
//! state. This crate owns the caller-facing rendering contract a virtualized
//! list or grid widget needs:
//!
//! - materializing the current window from the caller's item slice through a
//!   `render_item` closure, in ascending index order
//! - the empty-state placeholder (windowing skipped entirely)
//! - the trailing loading indicator while an incremental fetch is in flight
//!
//! It is still framework-neutral: a render pass produces plain data
//! ([`RenderFrame`]/[`GridFrame`] — spacer height, translation, nodes) that a
//! DOM, TUI, or native host lays out however it likes. All configuration is
//! threaded explicitly through construction; there is no ambient context.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod frame;
mod grid_view;
mod list_view;


pub use frame::{GridContent, GridFrame, ListContent, RenderFrame};
pub use grid_view::GridView;
pub use list_view::{ListView, NodeProvider};
