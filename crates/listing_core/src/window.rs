/// Page-button window for viewports wider than `NARROW_VIEWPORT_MAX_WIDTH`.
pub const WIDE_WINDOW_SIZE: u32 = 10;
pub const NARROW_WINDOW_SIZE: u32 = 5;
pub const NARROW_VIEWPORT_MAX_WIDTH: u32 = 768;

/// The contiguous run of page buttons to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: u32,
    pub end: u32,
    /// Render a leading "1 …" affordance.
    pub show_first: bool,
    /// Render a trailing "… N" affordance.
    pub show_last: bool,
}

impl PageWindow {
    pub fn pages(&self) -> impl Iterator<Item = u32> {
        self.start..=self.end
    }
}

pub fn window_size_for_viewport(width: u32) -> u32 {
    if width <= NARROW_VIEWPORT_MAX_WIDTH {
        NARROW_WINDOW_SIZE
    } else {
        WIDE_WINDOW_SIZE
    }
}

/// Computes the window of page buttons around `current_page`.
///
/// Windows are aligned to multiples of `window_size`, except near the end
/// where the window is pinned to the last `window_size` pages.
pub fn page_window(current_page: u32, total_pages: u32, window_size: u32) -> PageWindow {
    let total_pages = total_pages.max(1);
    let window_size = window_size.max(1);
    let current_page = current_page.clamp(1, total_pages);

    let (start, end) = if current_page > total_pages.saturating_sub(window_size) {
        (total_pages.saturating_sub(window_size) + 1, total_pages)
    } else {
        let start = (current_page - 1) / window_size * window_size + 1;
        (start, (start + window_size - 1).min(total_pages))
    };

    PageWindow {
        start,
        end,
        show_first: start > 1,
        show_last: end < total_pages,
    }
}

/// Target of the "Prev" block button.
pub fn prev_block_target(current_page: u32, window_size: u32) -> u32 {
    current_page.saturating_sub(window_size.max(1)).max(1)
}

/// Target of the "Next" block button.
pub fn next_block_target(current_page: u32, total_pages: u32, window_size: u32) -> u32 {
    current_page
        .saturating_add(window_size.max(1))
        .min(total_pages.max(1))
}
