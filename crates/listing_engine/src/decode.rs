use engine_logging::engine_warn;
use listing_core::{normalize_detail, ListingDetail, PageResponse, RawListing};
use serde_json::Value;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),
}

/// Decodes a listings page. Accepts a bare array of records or an envelope
/// object with `Data`, `CurrentPage` and `TotalPages`; the envelope is
/// authoritative for paging.
pub fn decode_page(bytes: &[u8]) -> Result<PageResponse, DecodeError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|err| DecodeError::InvalidJson(err.to_string()))?;

    match value {
        Value::Array(items) => Ok(collect_records(items, None, None)),
        Value::Object(mut envelope) => {
            let items = match envelope.remove("Data") {
                Some(Value::Array(items)) => items,
                Some(other) => {
                    return Err(DecodeError::UnexpectedShape(format!(
                        "`Data` is {}, expected an array",
                        kind_of(&other)
                    )))
                }
                None => {
                    return Err(DecodeError::UnexpectedShape(
                        "object without `Data` array".to_string(),
                    ))
                }
            };
            let current_page = envelope.get("CurrentPage").and_then(page_number);
            let total_pages = envelope.get("TotalPages").and_then(page_number);
            Ok(collect_records(items, current_page, total_pages))
        }
        other => Err(DecodeError::UnexpectedShape(format!(
            "top-level {}",
            kind_of(&other)
        ))),
    }
}

/// Decodes a single-listing detail record.
pub fn decode_detail(bytes: &[u8]) -> Result<ListingDetail, DecodeError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|err| DecodeError::InvalidJson(err.to_string()))?;
    if !value.is_object() {
        return Err(DecodeError::UnexpectedShape(format!(
            "top-level {}",
            kind_of(&value)
        )));
    }
    let raw = RawListing::from_value(value)
        .ok_or_else(|| DecodeError::UnexpectedShape("record without `ListingKey`".to_string()))?;
    Ok(normalize_detail(&raw))
}

fn collect_records(
    items: Vec<Value>,
    current_page: Option<u32>,
    total_pages: Option<u32>,
) -> PageResponse {
    let mut records = Vec::with_capacity(items.len());
    let mut skipped = 0;
    for item in items {
        match RawListing::from_value(item) {
            Some(raw) => records.push(raw),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        engine_warn!("Skipped {} listing records without a ListingKey", skipped);
    }
    PageResponse {
        records,
        skipped,
        current_page,
        total_pages,
    }
}

fn page_number(value: &Value) -> Option<u32> {
    let number: Option<u64> = match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    number
        .and_then(|number| u32::try_from(number).ok())
        .filter(|number| *number >= 1)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
