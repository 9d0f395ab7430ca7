use std::fmt;

use serde_json::{Map, Value};

/// Image shown when a listing carries no media of its own.
pub const DEFAULT_MEDIA_URL: &str = "/Image/default.jpg";

/// Stable identifier of a listing; the only attribute used for identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListingKey(String);

impl ListingKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaItem {
    pub url: String,
    /// 1-based display position.
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub key: ListingKey,
    pub listing_id: String,
    pub unit_number: String,
    pub street_number: String,
    pub street_name: String,
    pub street_suffix: String,
    pub city: String,
    pub subdivision_name: String,
    pub state_or_province: String,
    pub property_type: String,
    pub property_sub_type: String,
    pub sale_or_rent: String,
    pub mls_status: String,
    pub list_price: f64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub building_area: f64,
    pub new_listing: bool,
    /// Never present in list payloads.
    pub year_built: Option<u32>,
    pub media: Vec<MediaItem>,
}

impl Listing {
    /// Address line followed by subdivision, city and sub-type, skipping blanks.
    pub fn headline(&self) -> String {
        let street = [
            self.unit_number.as_str(),
            self.street_number.as_str(),
            self.street_name.as_str(),
            self.street_suffix.as_str(),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        [
            street.as_str(),
            self.subdivision_name.as_str(),
            self.city.as_str(),
            self.property_sub_type.as_str(),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }

    pub fn primary_media_url(&self) -> &str {
        self.media
            .iter()
            .min_by_key(|item| item.order)
            .map(|item| item.url.as_str())
            .unwrap_or(DEFAULT_MEDIA_URL)
    }
}

/// One listing record as returned by the API, kept loosely typed so that
/// normalization never fails on odd field types.
#[derive(Debug, Clone, PartialEq)]
pub struct RawListing {
    pub key: ListingKey,
    pub new_listing: bool,
    pub data: Map<String, Value>,
    pub media: Vec<Value>,
    /// Anything else at the top level (detail payloads carry `MediaNames`/`MediaURL` here).
    pub extra: Map<String, Value>,
}

impl RawListing {
    /// Accepts any JSON object with a string or numeric `ListingKey`.
    pub fn from_value(value: Value) -> Option<Self> {
        let Value::Object(mut object) = value else {
            return None;
        };
        let key = match object.remove("ListingKey")? {
            Value::String(key) if !key.trim().is_empty() => key,
            Value::Number(number) => number.to_string(),
            _ => return None,
        };
        let new_listing = matches!(object.remove("NewListing"), Some(Value::Bool(true)));
        let data = match object.remove("Data") {
            Some(Value::Object(data)) => data,
            _ => Map::new(),
        };
        let media = match object.remove("Media") {
            Some(Value::Array(media)) => media,
            _ => Vec::new(),
        };
        Some(Self {
            key: ListingKey::new(key),
            new_listing,
            data,
            media,
            extra: object,
        })
    }
}

/// Maps a raw record to the canonical listing. Total for every `RawListing`.
pub fn normalize(raw: &RawListing) -> Listing {
    let data = &raw.data;
    Listing {
        key: raw.key.clone(),
        listing_id: text_field(data, "ListingId"),
        unit_number: text_field(data, "UnitNumber"),
        street_number: text_field(data, "StreetNumber"),
        street_name: text_field(data, "StreetName"),
        street_suffix: text_field(data, "StreetSuffix"),
        city: text_field(data, "City"),
        subdivision_name: text_field(data, "SubdivisionName"),
        state_or_province: text_field(data, "StateOrProvince"),
        property_type: text_field(data, "PropertyType"),
        property_sub_type: text_field(data, "PropertySubType"),
        sale_or_rent: text_field(data, "BCRES_SaleOrRent"),
        mls_status: text_field(data, "MlsStatus"),
        list_price: number_field(data, "ListPrice"),
        bedrooms: count_field(data, "BedroomsTotal"),
        bathrooms: count_field(data, "BathroomsTotalInteger"),
        building_area: number_field(data, "BuildingAreaTotal"),
        new_listing: raw.new_listing,
        year_built: None,
        media: normalize_media(&raw.media),
    }
}

fn normalize_media(raw_media: &[Value]) -> Vec<MediaItem> {
    let media: Vec<MediaItem> = raw_media
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let base = entry.get("MediaURL").map(value_text).unwrap_or_default();
            let name = entry.get("MediaName").map(value_text).unwrap_or_default();
            MediaItem {
                url: format!("{base}{name}"),
                order: index as u32 + 1,
            }
        })
        .collect();

    if media.is_empty() {
        vec![MediaItem {
            url: DEFAULT_MEDIA_URL.to_string(),
            order: 1,
        }]
    } else {
        media
    }
}

pub(crate) fn text_field(data: &Map<String, Value>, name: &str) -> String {
    data.get(name).map(value_text).unwrap_or_default()
}

/// Strings pass through, numbers and booleans are rendered, anything else is blank.
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => String::new(),
    }
}

pub(crate) fn optional_number(data: &Map<String, Value>, name: &str) -> Option<f64> {
    let number = match data.get(name)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|number| number.is_finite())
}

fn number_field(data: &Map<String, Value>, name: &str) -> f64 {
    optional_number(data, name).unwrap_or(0.0)
}

fn count_field(data: &Map<String, Value>, name: &str) -> u32 {
    optional_number(data, name)
        .filter(|number| *number >= 0.0)
        .map(|number| number.round() as u32)
        .unwrap_or(0)
}
