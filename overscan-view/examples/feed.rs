//! Drives a ListView the way a UI host would: measure, scroll, render, and
//! append pages as the end-reached callback asks for them.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use overscan::ListOptions;
use overscan_view::{ListContent, ListView};

fn main() {
    let wants_more = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&wants_more);

    let opts = ListOptions::new(0, 48)
        .with_end_reached_threshold(240)
        .with_on_end_reached(Some(move || {
            flag.store(true, Ordering::SeqCst);
        }));
    let mut view: ListView<String> = ListView::new(opts)
        .with_empty(|| "no posts yet".to_string())
        .with_loading(|| "fetching more…".to_string());
    view.on_viewport_height(720);

    let mut posts: Vec<String> = (0..60).map(|i| format!("post #{i}")).collect();

    for frame_no in 0..6 {
        view.on_scroll(view.state().max_scroll_offset());

        if wants_more.swap(false, Ordering::SeqCst) {
            view.set_loading(true);
            let base = posts.len();
            posts.extend((base..base + 60).map(|i| format!("post #{i}")));
            view.set_loading(false);
        }

        match view.render(&posts, |post, index| format!("[{index}] {post}")) {
            ListContent::Empty(placeholder) => {
                println!("frame {frame_no}: {}", placeholder.unwrap_or_default());
            }
            ListContent::Frame(frame) => {
                println!(
                    "frame {frame_no}: {} nodes at {}px of {}px",
                    frame.len(),
                    frame.pixel_offset,
                    frame.content_height
                );
            }
        }
    }
}
