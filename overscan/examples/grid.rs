use overscan::{GridOptions, GridState};

fn main() {
    // A 4-column product grid with 180px rows.
    let mut grid = GridState::new(GridOptions::new(10_000, 180, 4));
    grid.set_viewport_height(900);
    grid.apply_scroll_event(54_000);

    let rows = grid.rows();
    let window = grid.window();
    println!("rows {:?}..{:?} at {}px", rows.start_row, rows.end_row, rows.pixel_offset);
    println!(
        "items {}..{} ({} slots)",
        window.start_index,
        window.end_index,
        window.len()
    );
}
