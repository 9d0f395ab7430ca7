use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_info, engine_warn};
use listing_core::{build_detail_request, Epoch, ListingKey, RequestDescriptor};
use url::Url;

use crate::decode::{decode_detail, decode_page};
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::{EngineEvent, FailureKind, FetchError};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid api base url {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

enum EngineCommand {
    FetchPage {
        epoch: Epoch,
        page: u32,
        request: RequestDescriptor,
    },
    FetchDetail {
        listing_key: ListingKey,
    },
}

/// Runs listing requests on a background tokio runtime and reports results
/// as [`EngineEvent`]s.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(base_url: &str, settings: FetchSettings) -> Result<Self, EngineError> {
        let base = parse_base_url(base_url)?;
        Self::with_fetcher(base, Arc::new(ReqwestFetcher::new(settings)))
    }

    pub fn with_fetcher(base: Url, fetcher: Arc<dyn Fetcher>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let base = Arc::new(base);

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let fetcher = fetcher.clone();
                let base = base.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event = handle_command(fetcher.as_ref(), &base, command).await;
                    let _ = event_tx.send(event);
                });
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn fetch_page(&self, epoch: Epoch, page: u32, request: RequestDescriptor) {
        let _ = self.cmd_tx.send(EngineCommand::FetchPage {
            epoch,
            page,
            request,
        });
    }

    pub fn fetch_detail(&self, listing_key: ListingKey) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::FetchDetail { listing_key });
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

/// Parses the API base URL, adding the trailing `/` that relative joins need.
pub fn parse_base_url(raw: &str) -> Result<Url, EngineError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    Url::parse(&with_slash).map_err(|source| EngineError::InvalidBaseUrl {
        url: raw.to_string(),
        source,
    })
}

async fn handle_command(fetcher: &dyn Fetcher, base: &Url, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::FetchPage {
            epoch,
            page,
            request,
        } => {
            let result = fetch_bytes(fetcher, base, &request).await.and_then(|bytes| {
                decode_page(&bytes).map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
            });
            if let Err(err) = &result {
                engine_warn!("Page {} (epoch {}) failed: {}", page, epoch, err);
            }
            EngineEvent::PageFetched {
                epoch,
                page,
                result,
            }
        }
        EngineCommand::FetchDetail { listing_key } => {
            let request = build_detail_request(&listing_key);
            let result = fetch_bytes(fetcher, base, &request).await.and_then(|bytes| {
                decode_detail(&bytes)
                    .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
            });
            if let Err(err) = &result {
                engine_warn!("Detail for {} failed: {}", listing_key, err);
            }
            EngineEvent::DetailFetched {
                listing_key,
                result,
            }
        }
    }
}

async fn fetch_bytes(
    fetcher: &dyn Fetcher,
    base: &Url,
    request: &RequestDescriptor,
) -> Result<Vec<u8>, FetchError> {
    let url = request
        .resolve(base)
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
    engine_info!("GET {}", url);
    fetcher.get(&url).await
}
