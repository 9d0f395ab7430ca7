use std::time::{Duration, Instant};

use engine_logging::{engine_debug, engine_warn};
use listing_core::{
    update, AppState, ContinuationMode, FilterModel, Gallery, ListingDetail, ListingKey, Msg,
};

use crate::commands::{help_text, Command, PhotoStep};
use crate::effects::{EffectRunner, Incoming};
use crate::render::{render, render_detail};

pub enum Outcome {
    Continue(String),
    Quit,
}

struct OpenListing {
    detail: ListingDetail,
    gallery: Gallery,
}

/// Drives one listing screen: commands in, rendered text out.
pub struct Session {
    state: AppState,
    runner: EffectRunner,
    wait: Duration,
    open_listing: Option<OpenListing>,
}

impl Session {
    /// `wait` bounds how long a command blocks on outstanding fetches.
    pub fn new(
        mode: ContinuationMode,
        viewport_width: u32,
        runner: EffectRunner,
        wait: Duration,
    ) -> Self {
        Self {
            state: AppState::new(mode).with_viewport_width(viewport_width),
            runner,
            wait,
            open_listing: None,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Shows the screen and loads the first page.
    pub fn open(&mut self) -> String {
        self.dispatch(Msg::Opened);
        self.settle();
        self.state.consume_dirty();
        render(&self.state.view())
    }

    pub fn execute(&mut self, command: Command) -> Outcome {
        let msg = match command {
            Command::Filter(changes) => {
                Msg::FiltersApplied(self.state.filters().merged_with(changes))
            }
            Command::Clear => Msg::FiltersApplied(FilterModel::new()),
            Command::Page(page) => Msg::PageRequested(page),
            Command::Next => Msg::NextBlockClicked,
            Command::Prev => Msg::PrevBlockClicked,
            Command::First => Msg::PageRequested(1),
            Command::Last => Msg::PageRequested(self.state.total_pages()),
            Command::More => Msg::ScrollThresholdCrossed,
            Command::Retry => Msg::RetryRequested,
            Command::Width(width) => Msg::ViewportResized(width),
            Command::Show(listing_key) => return Outcome::Continue(self.show(listing_key)),
            Command::Photo(step) => return Outcome::Continue(self.step_photo(step)),
            Command::View => return Outcome::Continue(render(&self.state.view())),
            Command::Help => return Outcome::Continue(help_text()),
            Command::Quit => return Outcome::Quit,
        };

        self.dispatch(msg);
        self.settle();
        if self.state.consume_dirty() {
            Outcome::Continue(render(&self.state.view()))
        } else {
            Outcome::Continue("Nothing to do.".to_string())
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects);
    }

    /// Feeds engine results back into the controller until it is idle or
    /// the wait runs out.
    fn settle(&mut self) {
        let deadline = Instant::now() + self.wait;
        while self.state.is_fetching() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                engine_warn!("Gave up waiting for page {:?}", self.state.view().pending_page);
                return;
            }
            match self.runner.next_incoming(remaining) {
                Some(Incoming::Msg(msg)) => self.dispatch(msg),
                Some(Incoming::Detail { listing_key, .. }) => {
                    engine_debug!("Ignoring late detail for {}", listing_key);
                }
                None => {}
            }
        }
    }

    fn show(&mut self, listing_key: ListingKey) -> String {
        self.runner.fetch_detail(listing_key.clone());
        let deadline = Instant::now() + self.wait;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return format!("Timed out loading listing {listing_key}.");
            }
            match self.runner.next_incoming(remaining) {
                Some(Incoming::Msg(msg)) => self.dispatch(msg),
                Some(Incoming::Detail {
                    listing_key: got,
                    result,
                }) if got == listing_key => {
                    return match result {
                        Ok(detail) => {
                            let gallery = Gallery::new(detail.gallery_images.clone());
                            let text = render_detail(&detail, &gallery);
                            self.open_listing = Some(OpenListing { detail, gallery });
                            text
                        }
                        Err(err) => format!("Could not load listing {listing_key} ({err})."),
                    };
                }
                Some(Incoming::Detail { listing_key: got, .. }) => {
                    engine_debug!("Ignoring stale detail for {}", got);
                }
                None => {}
            }
        }
    }

    fn step_photo(&mut self, step: PhotoStep) -> String {
        let Some(open) = self.open_listing.as_mut() else {
            return "Open a listing with `show KEY` first.".to_string();
        };
        match step {
            PhotoStep::Next => open.gallery.next(),
            PhotoStep::Prev => open.gallery.prev(),
        };
        let (position, count) = open.gallery.position();
        format!(
            "{} photo {}/{}: {}",
            open.detail.listing.key,
            position,
            count,
            open.gallery.current()
        )
    }
}
