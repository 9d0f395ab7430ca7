use serde_json::Value;

use crate::listing::{
    normalize, optional_number, text_field, value_text, Listing, RawListing, DEFAULT_MEDIA_URL,
};

const PLACEHOLDER: &str = "---";

/// Full record behind the detail and photo pages.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingDetail {
    pub listing: Listing,
    pub year_built: Option<u32>,
    pub public_remarks: String,
    pub levels: Vec<String>,
    pub exterior_features: Vec<String>,
    pub parking_total: Option<u32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub listing_contract_date: String,
    pub property_sub_types: Vec<String>,
    /// Never empty.
    pub gallery_images: Vec<String>,
}

/// Display strings for the detail header, `---` where data is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailSummary {
    pub mls_status: String,
    pub year_built: String,
    pub property_sub_type: String,
    pub listing_contract_date: String,
}

impl ListingDetail {
    pub fn summary(&self) -> DetailSummary {
        DetailSummary {
            mls_status: or_placeholder(&self.listing.mls_status),
            year_built: self
                .year_built
                .map(|year| year.to_string())
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            property_sub_type: or_placeholder(&self.property_sub_types.join(", ")),
            listing_contract_date: or_placeholder(&self.listing_contract_date),
        }
    }

    /// Latitude and longitude when both are present.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

fn or_placeholder(text: &str) -> String {
    if text.trim().is_empty() {
        PLACEHOLDER.to_string()
    } else {
        text.to_string()
    }
}

/// Normalizes a detail record. Total for every `RawListing`.
pub fn normalize_detail(raw: &RawListing) -> ListingDetail {
    let mut listing = normalize(raw);
    let data = &raw.data;
    let year_built = optional_number(data, "YearBuilt")
        .filter(|year| *year > 0.0)
        .map(|year| year as u32);
    listing.year_built = year_built;

    // The sub-type is a list on detail payloads and a string on list payloads.
    let property_sub_types = text_list(data.get("PropertySubType"));
    if listing.property_sub_type.is_empty() {
        listing.property_sub_type = property_sub_types.join(", ");
    }

    ListingDetail {
        listing,
        year_built,
        public_remarks: text_field(data, "PublicRemarks"),
        levels: text_list(data.get("Levels")),
        exterior_features: text_list(data.get("ExteriorFeatures")),
        parking_total: optional_number(data, "ParkingTotal")
            .filter(|count| *count >= 0.0)
            .map(|count| count as u32),
        latitude: optional_number(data, "Latitude"),
        longitude: optional_number(data, "Longitude"),
        listing_contract_date: text_field(data, "ListingContractDate"),
        property_sub_types,
        gallery_images: gallery_images(raw),
    }
}

fn gallery_images(raw: &RawListing) -> Vec<String> {
    let prefix = raw.extra.get("MediaURL").map(value_text).unwrap_or_default();
    let images: Vec<String> = match raw.extra.get("MediaNames") {
        Some(Value::Array(names)) => names
            .iter()
            .map(value_text)
            .filter(|name| !name.is_empty())
            .map(|name| format!("{prefix}{name}"))
            .collect(),
        _ => Vec::new(),
    };
    if images.is_empty() {
        vec![DEFAULT_MEDIA_URL.to_string()]
    } else {
        images
    }
}

fn text_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(value_text)
            .filter(|item| !item.is_empty())
            .collect(),
        Some(other) => {
            let text = value_text(other);
            if text.is_empty() {
                Vec::new()
            } else {
                vec![text]
            }
        }
        None => Vec::new(),
    }
}
