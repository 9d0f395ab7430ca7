use url::form_urlencoded;
use url::Url;

use crate::filter::FilterModel;
use crate::listing::ListingKey;

/// Fixed number of listings requested per page.
pub const PAGE_SIZE: u32 = 12;

const LISTINGS_PATH: &str = "properties/";

/// A GET against the listings API, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestDescriptor {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl RequestDescriptor {
    /// Form-urlencoded query string without the leading `?`.
    pub fn query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in &self.query {
            serializer.append_pair(name, value);
        }
        serializer.finish()
    }

    /// Resolves the descriptor against `base`, which should end with `/`.
    pub fn resolve(&self, base: &Url) -> Result<Url, url::ParseError> {
        let mut url = base.join(&self.path)?;
        if self.query.is_empty() {
            url.set_query(None);
        } else {
            url.set_query(Some(&self.query_string()));
        }
        Ok(url)
    }
}

/// Builds the request for one page of listings.
///
/// `page` and `page_size` always lead, followed by each constraining filter in
/// key order. The shape does not depend on the page number.
pub fn build_request(filters: &FilterModel, page: u32, page_size: u32) -> RequestDescriptor {
    let mut query = Vec::with_capacity(2 + filters.iter().count());
    query.push(("page".to_string(), page.to_string()));
    query.push(("page_size".to_string(), page_size.to_string()));
    for (key, value) in filters.iter() {
        let value = value.to_string();
        if value.is_empty() {
            continue;
        }
        query.push((key.query_name().to_string(), value));
    }
    RequestDescriptor {
        path: LISTINGS_PATH.to_string(),
        query,
    }
}

/// Builds the single-listing detail request.
pub fn build_detail_request(listing_key: &ListingKey) -> RequestDescriptor {
    let encoded: String =
        form_urlencoded::byte_serialize(listing_key.as_str().as_bytes()).collect();
    RequestDescriptor {
        path: format!("{LISTINGS_PATH}{encoded}"),
        query: Vec::new(),
    }
}
