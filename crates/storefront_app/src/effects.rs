use std::time::Duration;

use engine_logging::engine_info;
use listing_core::{Effect, ListingDetail, ListingKey, Msg};
use listing_engine::{EngineEvent, EngineHandle, FetchError};

/// What came back from the engine, translated for the session.
#[derive(Debug)]
pub enum Incoming {
    Msg(Msg),
    Detail {
        listing_key: ListingKey,
        result: Result<ListingDetail, FetchError>,
    },
}

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPage {
                    epoch,
                    page,
                    request,
                } => {
                    engine_info!(
                        "FetchPage epoch={} page={} query={}",
                        epoch,
                        page,
                        request.query_string()
                    );
                    self.engine.fetch_page(epoch, page, request);
                }
            }
        }
    }

    pub fn fetch_detail(&self, listing_key: ListingKey) {
        engine_info!("FetchDetail key={}", listing_key);
        self.engine.fetch_detail(listing_key);
    }

    /// Waits up to `timeout` for the next engine event.
    pub fn next_incoming(&self, timeout: Duration) -> Option<Incoming> {
        self.engine.recv_timeout(timeout).map(translate)
    }
}

fn translate(event: EngineEvent) -> Incoming {
    match event {
        EngineEvent::PageFetched {
            epoch,
            page,
            result,
        } => Incoming::Msg(Msg::PageLoaded {
            epoch,
            page,
            result: result.map_err(|err| err.to_failure()),
        }),
        EngineEvent::DetailFetched {
            listing_key,
            result,
        } => Incoming::Detail {
            listing_key,
            result,
        },
    }
}
