//! Listing engine: HTTP access to the listings API and effect execution.
mod decode;
mod engine;
mod fetch;
mod types;

pub use decode::{decode_detail, decode_page, DecodeError};
pub use engine::{parse_base_url, EngineError, EngineHandle};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use types::{EngineEvent, FailureKind, FetchError};
