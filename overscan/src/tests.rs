use crate::*;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    fn gen_range_u32(&mut self, start: u32, end_exclusive: u32) -> u32 {
        self.gen_range_u64(start as u64, end_exclusive as u64) as u32
    }
}

/// Slow reference model for `ListLayout::window`, with the first visible
/// index found by linear scan instead of division.
fn expected_window(
    item_count: usize,
    item_height: u32,
    viewport_height: u32,
    overscan: usize,
    scroll_offset: u64,
) -> ItemWindow {
    if item_count == 0 || viewport_height == 0 || item_height == 0 {
        return ItemWindow::EMPTY;
    }
    let h = item_height as u64;
    let total = item_count as u64 * h;
    let offset = scroll_offset.min(total.saturating_sub(viewport_height as u64));

    let first_visible = (0..item_count)
        .take_while(|i| (*i as u64 + 1) * h <= offset)
        .count();
    let visible_count = viewport_height.div_ceil(item_height) as usize;

    let start = first_visible.saturating_sub(overscan);
    let last = core::cmp::min(item_count - 1, first_visible + visible_count + overscan);
    ItemWindow {
        start_index: start,
        end_index: last + 1,
        pixel_offset: start as u64 * h,
    }
}

#[test]
fn window_covers_viewport_plus_overscan() {
    // 1000 items of 80px in a 600px viewport, scrolled to 800px:
    // first visible 10, 8 visible, overscan 3 on each side.
    let layout = ListLayout::new(80, 600);
    let w = layout.window(1000, 800);
    assert_eq!(w.start_index, 7);
    assert_eq!(w.last_index(), Some(21));
    assert_eq!(w.pixel_offset, 560);
}

#[test]
fn short_list_renders_everything() {
    let layout = ListLayout::new(100, 600);
    let w = layout.window(5, 0);
    assert_eq!(w.start_index, 0);
    assert_eq!(w.end_index, 5);
    assert_eq!(w.pixel_offset, 0);
    assert_eq!(w.len(), 5);
}

#[test]
fn empty_list_yields_empty_window() {
    let layout = ListLayout::new(80, 600);
    let w = layout.window(0, 12345);
    assert!(w.is_empty());
    assert_eq!(w.pixel_offset, 0);
    assert_eq!(w.last_index(), None);
}

#[test]
fn window_is_pure() {
    let layout = ListLayout::new(24, 480).with_overscan(5);
    assert_eq!(layout.window(5000, 98_765), layout.window(5000, 98_765));
}

#[test]
fn overscroll_clamps_to_last_item() {
    let layout = ListLayout::new(80, 600).with_overscan(3);
    // Way past the end of the content.
    let w = layout.window(100, u64::MAX);
    assert!(!w.is_empty());
    assert_eq!(w.last_index(), Some(99));
    assert!(w.start_index <= 99);
    assert_eq!(w.pixel_offset, w.start_index as u64 * 80);
}

#[test]
fn start_index_monotonic_in_scroll_offset() {
    let mut rng = Lcg::new(7);
    for _ in 0..50 {
        let count = rng.gen_range_usize(1, 5000);
        let h = rng.gen_range_u32(1, 200);
        let vp = rng.gen_range_u32(1, 2000);
        let layout = ListLayout::new(h, vp).with_overscan(rng.gen_range_usize(0, 10));
        let total = layout.total_height(count);

        let mut offsets: Vec<u64> = (0..40)
            .map(|_| rng.gen_range_u64(0, total.saturating_mul(2).max(1)))
            .collect();
        offsets.sort_unstable();

        let mut prev_start = 0usize;
        for off in offsets {
            let w = layout.window(count, off);
            assert!(w.start_index >= prev_start, "start went backwards");
            prev_start = w.start_index;
        }
    }
}

#[test]
fn window_matches_reference_model() {
    let mut rng = Lcg::new(42);
    for _ in 0..200 {
        let count = rng.gen_range_usize(0, 3000);
        let h = rng.gen_range_u32(1, 150);
        let vp = rng.gen_range_u32(0, 1200);
        let ov = rng.gen_range_usize(0, 8);
        let off = rng.gen_range_u64(0, 1 << 24);

        let layout = ListLayout::new(h, vp).with_overscan(ov);
        let got = layout.window(count, off);
        let want = expected_window(count, h, vp, ov, off);
        assert_eq!(got, want, "count={count} h={h} vp={vp} ov={ov} off={off}");

        // Range invariant and the pixel-offset identity.
        assert!(got.start_index <= got.end_index);
        assert!(got.end_index <= count);
        assert_eq!(got.pixel_offset, got.start_index as u64 * h as u64);
    }
}

#[test]
fn every_intersecting_item_is_in_the_window() {
    let mut rng = Lcg::new(11);
    for _ in 0..100 {
        let count = rng.gen_range_usize(1, 1000);
        let h = rng.gen_range_u32(1, 100);
        let vp = rng.gen_range_u32(1, 800);
        let layout = ListLayout::new(h, vp).with_overscan(rng.gen_range_usize(0, 5));
        let off = rng.gen_range_u64(0, layout.total_height(count).max(1));

        let clamped = layout.clamp_scroll_offset(count, off);
        let view_end = clamped + vp as u64;
        let w = layout.window(count, off);
        for i in 0..count {
            let start = i as u64 * h as u64;
            let end = start + h as u64;
            let intersects = start < view_end && end > clamped;
            if intersects {
                assert!(w.contains(i), "item {i} intersects but was windowed out");
            }
        }
    }
}

#[test]
fn grid_flat_window_clamps_partial_last_row() {
    // 10 items in 3 columns: 4 rows, the last holding a single item.
    let layout = GridLayout::new(100, 3, 250).with_overscan(0);
    assert_eq!(layout.row_count(10), 4);

    let w = layout.window(10, 0);
    assert_eq!(w.start_index, 0);
    assert_eq!(w.end_index, 10);
    assert_eq!(w.pixel_offset, 0);

    let rows = layout.rows(10, 0);
    assert_eq!(rows.start_row, 0);
    assert_eq!(rows.end_row, 4);
}

#[test]
fn grid_rows_window_like_a_list_of_rows() {
    let layout = GridLayout::new(80, 4, 600).with_overscan(3);
    let list = ListLayout::new(80, 600).with_overscan(3);
    // 1000 items in 4 columns = 250 rows.
    let rows = layout.rows(1000, 800);
    let w = list.window(250, 800);
    assert_eq!(rows.start_row, w.start_index);
    assert_eq!(rows.end_row, w.end_index);
    assert_eq!(rows.pixel_offset, w.pixel_offset);
}

#[test]
fn grid_position_helpers() {
    let layout = GridLayout::new(50, 3, 300);
    assert_eq!(layout.row_of(0), 0);
    assert_eq!(layout.column_of(0), 0);
    assert_eq!(layout.row_of(7), 2);
    assert_eq!(layout.column_of(7), 1);
    assert_eq!(layout.row_start(2), 100);
    assert_eq!(layout.total_height(7), 150);
}

#[test]
fn list_state_spacer_and_window() {
    let mut s = ListState::new(ListOptions::new(1000, 80));
    s.set_viewport_height(600);
    assert_eq!(s.total_height(), 80_000);

    s.apply_scroll_event(800);
    let w = s.window();
    assert_eq!(w.start_index, 7);
    assert_eq!(w.last_index(), Some(21));
    assert_eq!(w.pixel_offset, 560);

    let mut seen = Vec::new();
    s.for_each_window_index(|i| seen.push(i));
    assert_eq!(seen, (7..22).collect::<Vec<_>>());
}

#[test]
fn end_reached_is_edge_triggered() {
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);
    let opts = ListOptions::new(100, 10)
        .with_end_reached_threshold(50)
        .with_on_end_reached(Some(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
    let mut s = ListState::new(opts);
    s.set_viewport_height(100);

    // total = 1000, band starts at offset 850 (850 + 100 >= 1000 - 50).
    s.apply_scroll_event(500);
    assert_eq!(fired.load(Ordering::SeqCst), 0);

    s.apply_scroll_event(850);
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    // Further scrolling inside the band must not re-fire.
    s.apply_scroll_event(870);
    s.apply_scroll_event(900);
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    // Leaving the band re-arms; re-approaching fires again.
    s.apply_scroll_event(300);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    s.apply_scroll_event(880);
    assert_eq!(fired.load(Ordering::SeqCst), 2);
}

#[test]
fn end_reached_suppressed_while_loading() {
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);
    let opts = ListOptions::new(100, 10)
        .with_end_reached_threshold(50)
        .with_on_end_reached(Some(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
    let mut s = ListState::new(opts);
    s.set_viewport_height(100);
    s.set_is_loading(true);

    s.apply_scroll_event(900);
    assert_eq!(fired.load(Ordering::SeqCst), 0);

    // The edge was consumed while loading; clearing the flag must not fire
    // retroactively.
    s.set_is_loading(false);
    s.apply_scroll_event(910);
    assert_eq!(fired.load(Ordering::SeqCst), 0);

    // A fresh approach fires normally.
    s.apply_scroll_event(100);
    s.apply_scroll_event(900);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn end_reached_rearms_after_content_growth() {
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);
    let opts = ListOptions::new(100, 10).with_on_end_reached(Some(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }));
    let mut s = ListState::new(opts);
    s.set_viewport_height(100);

    s.apply_scroll_event(900);
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    // The loader appends a page: the offset is no longer near the end, so
    // the trigger re-arms and the next approach fires.
    s.set_count(200);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    s.apply_scroll_event(1900);
    assert_eq!(fired.load(Ordering::SeqCst), 2);
}

#[test]
fn count_to_zero_resets_scroll() {
    let mut s = ListState::new(ListOptions::new(100, 10));
    s.set_viewport_height(100);
    s.apply_scroll_event(500);
    assert_eq!(s.scroll_offset(), 500);

    s.set_count(0);
    assert_eq!(s.scroll_offset(), 0);
    assert_eq!(s.scroll_direction(), None);
    assert!(s.window().is_empty());
}

#[test]
fn scroll_direction_tracks_offset_deltas() {
    let mut s = ListState::new(ListOptions::new(100, 10));
    s.set_viewport_height(100);
    assert_eq!(s.scroll_direction(), None);

    s.apply_scroll_event(50);
    assert_eq!(s.scroll_direction(), Some(ScrollDirection::Forward));
    s.apply_scroll_event(20);
    assert_eq!(s.scroll_direction(), Some(ScrollDirection::Backward));
}

#[test]
fn scroll_to_index_aligns() {
    let mut s = ListState::new(ListOptions::new(100, 10));
    s.set_viewport_height(30);

    assert_eq!(s.scroll_to_index(50, Align::Start), 500);
    assert_eq!(s.scroll_to_index(50, Align::End), 480);
    assert_eq!(s.scroll_to_index(50, Align::Center), 490);

    // Auto: already fully visible keeps the current offset.
    s.set_scroll_offset(500);
    assert_eq!(s.scroll_to_index(51, Align::Auto), 500);
    // Auto: above the viewport scrolls it to the start edge.
    assert_eq!(s.scroll_to_index(10, Align::Auto), 100);
    // Auto: below the viewport scrolls it to the end edge.
    assert_eq!(s.scroll_to_index(90, Align::Auto), 880);

    // Targets past the last item clamp.
    assert_eq!(s.scroll_to_index(1000, Align::End), 970);
}

#[test]
fn batch_update_coalesces_notifications() {
    let notified = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&notified);
    let opts = ListOptions::new(100, 10).with_on_change(Some(move |_: &ListState| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));
    let mut s = ListState::new(opts);

    s.batch_update(|s| {
        s.set_viewport_height(100);
        s.set_scroll_offset(500);
        s.set_overscan(5);
    });
    assert_eq!(notified.load(Ordering::SeqCst), 1);

    // Nested batches still produce a single notification.
    s.batch_update(|s| {
        s.batch_update(|s| s.set_scroll_offset(600));
        s.set_scroll_offset(700);
    });
    assert_eq!(notified.load(Ordering::SeqCst), 2);
}

#[test]
fn snapshot_round_trip() {
    let mut s = ListState::new(ListOptions::new(100, 10));
    s.apply_scroll_frame(100, 640);
    let frame = s.frame_state();
    assert_eq!(frame.viewport.height, 100);
    assert_eq!(frame.scroll.offset, 640);

    let mut restored = ListState::new(ListOptions::new(100, 10));
    restored.restore_frame_state(frame);
    assert_eq!(restored.viewport_height(), 100);
    assert_eq!(restored.scroll_offset(), 640);

    // Restoring against shrunken content clamps.
    let mut small = ListState::new(ListOptions::new(20, 10));
    small.restore_frame_state(frame);
    assert_eq!(small.scroll_offset(), small.max_scroll_offset());
}

#[test]
fn initial_offset_provider_is_resolved_at_construction() {
    let s = ListState::new(ListOptions::new(100, 10).with_initial_offset_provider(|| 420));
    assert_eq!(s.scroll_offset(), 420);

    let s = ListState::new(ListOptions::new(100, 10).with_initial_offset_value(7));
    assert_eq!(s.scroll_offset(), 7);
}

#[test]
fn window_for_does_not_mutate() {
    let s = ListState::new(ListOptions::new(1000, 80));
    let w = s.window_for(800, 600);
    assert_eq!(w.start_index, 7);
    assert_eq!(s.scroll_offset(), 0);
    assert_eq!(s.viewport_height(), 0);
}

#[test]
fn grid_state_windows_and_resets() {
    let mut g = GridState::new(GridOptions::new(1000, 80, 4));
    g.set_viewport_height(600);
    // 250 rows of 80px.
    assert_eq!(g.total_height(), 20_000);

    g.apply_scroll_event(800);
    let rows = g.rows();
    assert_eq!(rows.start_row, 7);
    assert_eq!(rows.end_row, 22);
    let w = g.window();
    assert_eq!(w.start_index, 28);
    assert_eq!(w.end_index, 88);
    assert_eq!(w.pixel_offset, 560);

    g.set_count(0);
    assert_eq!(g.scroll_offset(), 0);
    assert!(g.window().is_empty());
}

#[test]
fn grid_end_reached_uses_row_geometry() {
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);
    let opts = GridOptions::new(120, 10, 4)
        .with_end_reached_threshold(20)
        .with_on_end_reached(Some(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
    let mut g = GridState::new(opts);
    g.set_viewport_height(100);

    // 30 rows of 10px => total 300; band starts at 180 (180 + 100 >= 280).
    g.apply_scroll_event(100);
    assert_eq!(fired.load(Ordering::SeqCst), 0);
    g.apply_scroll_event(180);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    g.apply_scroll_event(200);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    g.apply_scroll_event(50);
    g.apply_scroll_event(190);
    assert_eq!(fired.load(Ordering::SeqCst), 2);
}

#[test]
fn grid_scroll_to_index_targets_the_containing_row() {
    let mut g = GridState::new(GridOptions::new(100, 10, 4));
    g.set_viewport_height(30);

    // Item 50 lives in row 12 (offset 120).
    assert_eq!(g.scroll_to_index(50, Align::Start), 120);
    assert_eq!(g.scroll_to_index(50, Align::End), 100);
}

#[test]
fn set_options_preserves_reset_on_empty() {
    let mut s = ListState::new(ListOptions::new(100, 10));
    s.apply_scroll_frame(100, 500);

    s.update_options(|o| o.count = 0);
    assert_eq!(s.scroll_offset(), 0);

    s.update_options(|o| o.count = 100);
    assert_eq!(s.scroll_offset(), 0);
}

#[test]
fn clamped_setters_respect_content_bounds() {
    let mut s = ListState::new(ListOptions::new(100, 10));
    s.set_viewport_height(100);
    assert_eq!(s.max_scroll_offset(), 900);

    s.set_scroll_offset_clamped(5000);
    assert_eq!(s.scroll_offset(), 900);

    // The unclamped setter tolerates overscroll; the window still clamps.
    s.set_scroll_offset(5000);
    assert_eq!(s.window().last_index(), Some(99));
}
