use listing_core::{
    AppViewModel, ContinuationMode, ControllerStatus, EmptyState, Gallery, Listing,
    ListingDetail, PaginationView,
};

pub fn render(view: &AppViewModel) -> String {
    let mut lines = vec![status_line(view)];

    match view.empty_state {
        Some(EmptyState::Loading) => lines.push("Loading listings...".to_string()),
        Some(EmptyState::NoResults) => lines.push("No listings match these filters.".to_string()),
        Some(EmptyState::LoadFailed) => lines.push(match &view.last_error {
            Some(err) => format!("Could not load listings ({err}). Type `retry` to try again."),
            None => "Could not load listings. Type `retry` to try again.".to_string(),
        }),
        None => lines.extend(view.listings.iter().map(format_listing_row)),
    }

    if view.empty_state.is_none() {
        match view.mode {
            ContinuationMode::InfiniteScroll => lines.extend(scroll_footer(view)),
            ContinuationMode::Paged => {
                if let Some(pagination) = &view.pagination {
                    lines.push(pagination_bar(pagination));
                }
                if let Some(err) = &view.last_error {
                    lines.push(format!("Page failed to load ({err})."));
                }
            }
        }
    }

    lines.join("\n")
}

fn status_line(view: &AppViewModel) -> String {
    let status = match view.status {
        ControllerStatus::Idle => "Idle",
        ControllerStatus::FetchingInitial => "Loading",
        ControllerStatus::FetchingMore => "Loading more",
        ControllerStatus::Exhausted => "All loaded",
        ControllerStatus::Error => "Error",
    };
    let filters = if view.filters.is_empty() {
        "none".to_string()
    } else {
        view.filters
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(" ")
    };
    let pending = view
        .pending_page
        .map(|page| format!(" | Requested: {page}"))
        .unwrap_or_default();
    format!(
        "{} | Page {} of {}{} | Showing {} | Filters: {}",
        status,
        view.current_page,
        view.total_pages,
        pending,
        view.listings.len(),
        filters
    )
}

fn scroll_footer(view: &AppViewModel) -> Option<String> {
    if view.loading_more {
        return Some("Loading more...".to_string());
    }
    if let Some(err) = &view.last_error {
        return Some(format!("Could not load more ({err}). Type `retry` to reload."));
    }
    if view.has_more {
        Some("Type `more` for more listings.".to_string())
    } else {
        Some("End of results.".to_string())
    }
}

fn format_listing_row(listing: &Listing) -> String {
    let badge = if listing.new_listing { " [NEW]" } else { "" };
    format!(
        "{key:>12}  ${price:>11}  {beds} bd  {baths} ba  {area:>6} sqft  {headline}{badge}",
        key = listing.key,
        price = format_with_commas(listing.list_price.round().max(0.0) as u64),
        beds = listing.bedrooms,
        baths = listing.bathrooms,
        area = format_with_commas(listing.building_area.round().max(0.0) as u64),
        headline = listing.headline(),
        badge = badge,
    )
}

/// `Prev 1 ... 28 29 [30] 31 Next`, leaving out disabled buttons.
pub fn pagination_bar(pagination: &PaginationView) -> String {
    let window = &pagination.window;
    let mut parts = Vec::new();
    if pagination.can_prev {
        parts.push("Prev".to_string());
    }
    if window.show_first {
        parts.push("1".to_string());
        parts.push("...".to_string());
    }
    for page in window.pages() {
        if page == pagination.current_page {
            parts.push(format!("[{page}]"));
        } else {
            parts.push(page.to_string());
        }
    }
    if window.show_last {
        parts.push("...".to_string());
        parts.push(pagination.total_pages.to_string());
    }
    if pagination.can_next {
        parts.push("Next".to_string());
    }
    parts.join(" ")
}

pub fn render_detail(detail: &ListingDetail, gallery: &Gallery) -> String {
    let listing = &detail.listing;
    let summary = detail.summary();
    let (position, count) = gallery.position();

    let mut lines = vec![
        listing.headline(),
        format!(
            "${}  {} bd  {} ba  {} sqft",
            format_with_commas(listing.list_price.round().max(0.0) as u64),
            listing.bedrooms,
            listing.bathrooms,
            format_with_commas(listing.building_area.round().max(0.0) as u64)
        ),
        format!(
            "Status: {} | Built: {} | Type: {} | Listed: {}",
            summary.mls_status,
            summary.year_built,
            summary.property_sub_type,
            summary.listing_contract_date
        ),
    ];
    if !detail.levels.is_empty() {
        lines.push(format!("Levels: {}", detail.levels.join(", ")));
    }
    if !detail.exterior_features.is_empty() {
        lines.push(format!("Exterior: {}", detail.exterior_features.join(", ")));
    }
    if let Some(parking) = detail.parking_total {
        lines.push(format!("Parking: {parking}"));
    }
    if let Some((latitude, longitude)) = detail.coordinates() {
        lines.push(format!("Location: {latitude:.5}, {longitude:.5}"));
    }
    if !detail.public_remarks.is_empty() {
        lines.push(String::new());
        lines.push(detail.public_remarks.clone());
    }
    lines.push(String::new());
    lines.push(format!("Photo {position}/{count}: {}", gallery.current()));
    lines.join("\n")
}

fn format_with_commas(value: u64) -> String {
    let mut out = String::new();
    for (i, ch) in value.to_string().chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use listing_core::page_window;

    use super::*;

    #[test]
    fn commas_group_thousands() {
        assert_eq!(format_with_commas(0), "0");
        assert_eq!(format_with_commas(999), "999");
        assert_eq!(format_with_commas(1_250_000), "1,250,000");
    }

    #[test]
    fn pagination_bar_near_the_end() {
        let bar = pagination_bar(&PaginationView {
            window: page_window(37, 37, 10),
            current_page: 37,
            total_pages: 37,
            can_prev: true,
            can_next: false,
        });
        assert_eq!(bar, "Prev 1 ... 28 29 30 31 32 33 34 35 36 [37]");
    }

    #[test]
    fn pagination_bar_on_first_page() {
        let bar = pagination_bar(&PaginationView {
            window: page_window(1, 12, 5),
            current_page: 1,
            total_pages: 12,
            can_prev: false,
            can_next: true,
        });
        assert_eq!(bar, "[1] 2 3 4 5 ... 12 Next");
    }

    #[test]
    fn empty_states_have_messages() {
        let view = AppViewModel {
            empty_state: Some(EmptyState::NoResults),
            status: ControllerStatus::Exhausted,
            current_page: 1,
            total_pages: 1,
            ..AppViewModel::default()
        };
        let text = render(&view);
        assert!(text.starts_with("All loaded | Page 1 of 1 | Showing 0 | Filters: none"));
        assert!(text.contains("No listings match these filters."));
        assert!(!text.contains("End of results."));
    }
}
