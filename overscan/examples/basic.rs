use overscan::{Align, ListOptions, ListState};

fn main() {
    let mut list = ListState::new(ListOptions::new(1_000_000, 24));
    list.set_viewport_height(600);
    list.apply_scroll_event(123_456);

    println!("spacer height = {}", list.total_height());
    println!("window = {:?}", list.window());

    list.scroll_to_index(999_999, Align::End);
    println!("after scroll_to_index: offset = {}", list.scroll_offset());
}
