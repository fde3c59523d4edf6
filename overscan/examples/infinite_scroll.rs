//! Simulates an incrementally loaded feed: scrolling near the bottom fires
//! the edge-triggered end-reached callback, the "backend" appends a page,
//! and the trigger re-arms as the content grows.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use overscan::{ListOptions, ListState};

const PAGE: usize = 50;
const ITEM_HEIGHT: u32 = 40;

fn main() {
    let requests = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&requests);

    let opts = ListOptions::new(PAGE, ITEM_HEIGHT)
        .with_end_reached_threshold(200)
        .with_on_end_reached(Some(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
    let mut list = ListState::new(opts);
    list.set_viewport_height(600);

    let mut loaded = PAGE;
    for step in 0..10 {
        // Scroll to the bottom of whatever is loaded.
        list.apply_scroll_event(list.max_scroll_offset());

        let pending = requests.swap(0, Ordering::SeqCst);
        if pending > 0 {
            list.set_is_loading(true);
            loaded += PAGE;
            list.set_count(loaded);
            list.set_is_loading(false);
            println!(
                "step {step}: loaded page -> {loaded} items, spacer {}px",
                list.total_height()
            );
        }
    }

    println!("final window = {:?}", list.window());
}
