use std::collections::BTreeMap;
use std::fmt;

/// The closed set of filter criteria the listings API understands.
///
/// Ordering of the variants fixes the order of filter parameters in a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterKey {
    City,
    MinPrice,
    MaxPrice,
    MinYearBuilt,
    MaxYearBuilt,
    MinRooms,
    MaxRooms,
    MinBathrooms,
    MaxBathrooms,
    MinArea,
    MaxArea,
    PropertyType,
}

impl FilterKey {
    pub const ALL: [FilterKey; 12] = [
        FilterKey::City,
        FilterKey::MinPrice,
        FilterKey::MaxPrice,
        FilterKey::MinYearBuilt,
        FilterKey::MaxYearBuilt,
        FilterKey::MinRooms,
        FilterKey::MaxRooms,
        FilterKey::MinBathrooms,
        FilterKey::MaxBathrooms,
        FilterKey::MinArea,
        FilterKey::MaxArea,
        FilterKey::PropertyType,
    ];

    /// Query parameter name used by the listings API.
    pub fn query_name(self) -> &'static str {
        match self {
            FilterKey::City => "city",
            FilterKey::MinPrice => "min_price",
            FilterKey::MaxPrice => "max_price",
            FilterKey::MinYearBuilt => "min_year_built",
            FilterKey::MaxYearBuilt => "max_year_built",
            FilterKey::MinRooms => "min_rooms",
            FilterKey::MaxRooms => "max_rooms",
            FilterKey::MinBathrooms => "min_bathrooms",
            FilterKey::MaxBathrooms => "max_bathrooms",
            FilterKey::MinArea => "min_area",
            FilterKey::MaxArea => "max_area",
            FilterKey::PropertyType => "property_type",
        }
    }

    pub fn from_query_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|key| key.query_name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FilterValue {
    Number(i64),
    Text(String),
}

impl FilterValue {
    /// Numbers win over text so `"500000"` and `500000` are the same constraint.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.parse::<i64>() {
            Ok(number) => Some(FilterValue::Number(number)),
            Err(_) => Some(FilterValue::Text(trimmed.to_string())),
        }
    }

    fn is_constraint(&self) -> bool {
        match self {
            FilterValue::Number(_) => true,
            FilterValue::Text(text) => !text.trim().is_empty(),
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Number(number) => write!(f, "{number}"),
            FilterValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Number(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

/// Active filter criteria in normalized form: only keys that constrain the
/// result set are stored, so equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterModel {
    entries: BTreeMap<FilterKey, FilterValue>,
}

impl FilterModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets or clears one criterion. `None` and empty text both clear it.
    pub fn set(&mut self, key: FilterKey, value: Option<FilterValue>) {
        match value.filter(FilterValue::is_constraint) {
            Some(value) => {
                self.entries.insert(key, value);
            }
            None => {
                self.entries.remove(&key);
            }
        }
    }

    pub fn with(mut self, key: FilterKey, value: impl Into<FilterValue>) -> Self {
        self.set(key, Some(value.into()));
        self
    }

    pub fn get(&self, key: FilterKey) -> Option<&FilterValue> {
        self.entries.get(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Applies `changes` on top of `self`; a `None` value removes the key.
    pub fn merged_with(
        &self,
        changes: impl IntoIterator<Item = (FilterKey, Option<FilterValue>)>,
    ) -> FilterModel {
        let mut merged = self.clone();
        for (key, value) in changes {
            merged.set(key, value);
        }
        merged
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilterKey, &FilterValue)> {
        self.entries.iter().map(|(key, value)| (*key, value))
    }
}

impl FromIterator<(FilterKey, Option<FilterValue>)> for FilterModel {
    fn from_iter<I: IntoIterator<Item = (FilterKey, Option<FilterValue>)>>(iter: I) -> Self {
        let mut model = FilterModel::new();
        for (key, value) in iter {
            model.set(key, value);
        }
        model
    }
}

const PROPERTY_TYPES: &[(&str, &str)] = &[
    ("Single Family Residence", "Single_Family_Residence"),
    ("Townhouse", "Townhouse"),
    ("Apartment/Condo", "Apartment/Condo"),
    ("Half Duplex", "Half_Duplex"),
    ("Manufactured Home", "Manufactured_Home"),
    ("Manufactured On Land", "Manufactured_On_Land"),
    ("Duplex", "Duplex"),
    ("Quadruplex", "Quadruplex"),
    ("Recreational", "Recreational"),
    ("Other", "Other"),
];

/// Display labels offered by the home-type selector.
pub fn property_type_labels() -> impl Iterator<Item = &'static str> {
    PROPERTY_TYPES.iter().map(|(label, _)| *label)
}

/// Maps a home-type label (or an API value) to the value the API expects.
pub fn property_type_api_value(input: &str) -> Option<&'static str> {
    let input = input.trim();
    PROPERTY_TYPES
        .iter()
        .find(|(label, api)| label.eq_ignore_ascii_case(input) || api.eq_ignore_ascii_case(input))
        .map(|(_, api)| *api)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_clears_entry() {
        let mut filters = FilterModel::new().with(FilterKey::City, "Vancouver");
        filters.set(FilterKey::City, Some(FilterValue::Text("  ".into())));
        assert!(filters.is_empty());
        assert_eq!(filters, FilterModel::new());
    }

    #[test]
    fn numeric_text_parses_as_number() {
        assert_eq!(FilterValue::parse(" 500000 "), Some(FilterValue::Number(500000)));
        assert_eq!(
            FilterValue::parse("Townhouse"),
            Some(FilterValue::Text("Townhouse".into()))
        );
        assert_eq!(FilterValue::parse(""), None);
    }

    #[test]
    fn query_names_round_trip() {
        for key in FilterKey::ALL {
            assert_eq!(FilterKey::from_query_name(key.query_name()), Some(key));
        }
        assert_eq!(FilterKey::from_query_name("beds"), None);
    }

    #[test]
    fn property_type_labels_map_to_api_values() {
        assert_eq!(
            property_type_api_value("single family residence"),
            Some("Single_Family_Residence")
        );
        assert_eq!(property_type_api_value("Half_Duplex"), Some("Half_Duplex"));
        assert_eq!(property_type_api_value("Castle"), None);
        assert_eq!(property_type_labels().count(), 10);
    }

    #[test]
    fn merge_overrides_existing_keys() {
        let base = FilterModel::new()
            .with(FilterKey::MinPrice, 100)
            .with(FilterKey::MaxPrice, 200);
        let merged = base.merged_with([
            (FilterKey::MaxPrice, Some(FilterValue::Number(300))),
            (FilterKey::City, Some(FilterValue::Text("Surrey".into()))),
        ]);
        assert_eq!(merged.get(FilterKey::MinPrice), Some(&FilterValue::Number(100)));
        assert_eq!(merged.get(FilterKey::MaxPrice), Some(&FilterValue::Number(300)));
        assert_eq!(merged.get(FilterKey::City), Some(&FilterValue::Text("Surrey".into())));

        let cleared = merged.merged_with([(FilterKey::MinPrice, None)]);
        assert_eq!(cleared.get(FilterKey::MinPrice), None);
        assert_eq!(cleared.get(FilterKey::MaxPrice), Some(&FilterValue::Number(300)));
    }
}
