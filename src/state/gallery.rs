//! The gallery controller.
//!
//! Owns the photo lists, the reaction store and the lightbox, and decides
//! what a "load more" trigger does. Rendering surfaces drive it through
//! `start` / `stop` / `load_more` / `complete` and observe it through
//! `subscribe`.
//!
//! Network reads never run inside the controller. A load that needs one
//! returns `LoadStep::Pending` with a `BatchRequest`; the surface runs it
//! and passes the outcome to `complete`. Until then the load guard stays
//! held, so any number of further triggers are no-ops, while reactions and
//! lightbox navigation keep working.

use std::ops::Range;

use crate::config::GalleryConfig;
use crate::error::Result;
use crate::source::generator::Generator;
use crate::source::{BatchOutcome, BatchRequest, LoadPhase, SourceKind, Ticket};

use super::data::{Photo, Reaction, ReactionCounts, Vote};
use super::lightbox::Lightbox;
use super::pagination::{LoadPlan, Pagination};
use super::reactions::ReactionStore;
use super::storage::KeyValueStore;

/// Result of `start` or `load_more`
#[derive(Debug, Clone)]
pub enum LoadStep {
    /// The gallery is not started
    Detached,
    /// A load is already in flight
    Busy,
    /// Already-fetched photos became visible
    Revealed(Range<usize>),
    /// Synthetic photos were appended
    Generated(Range<usize>),
    /// Everything is visible and infinite mode is off
    Exhausted,
    /// Run the request and hand its outcome to `Gallery::complete`
    Pending(BatchRequest),
}

/// Notification sent to subscribers after a state change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Window { visible: usize, total: usize },
    Reaction { photo_id: String, reaction: Reaction },
    Lightbox(Lightbox),
    /// The configured source failed and generation took over
    SourceFallback,
}

type Listener = Box<dyn FnMut(&Change)>;

pub struct Gallery {
    source: SourceKind,
    http: reqwest::Client,
    generator: Generator,
    pagination: Pagination,
    reactions: ReactionStore,
    lightbox: Lightbox,
    session: u64,
    /// Last issued request sequence number
    seq: u64,
    /// The one request whose outcome `complete` will accept
    in_flight: Option<(Ticket, LoadPhase)>,
    attached: bool,
    listeners: Vec<Listener>,
}

impl Gallery {
    pub fn new(config: &GalleryConfig, store: Box<dyn KeyValueStore>) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            source: config.source.clone(),
            http: reqwest::Client::new(),
            generator: Generator::default(),
            pagination: Pagination::new(config.page_size, config.infinite),
            reactions: ReactionStore::new(store, &config.storage_namespace),
            lightbox: Lightbox::Closed,
            session: 0,
            seq: 0,
            in_flight: None,
            attached: false,
            listeners: Vec::new(),
        })
    }

    /// Start the synthetic counter at `seed` instead of the default
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.generator = Generator::new(seed);
        self
    }

    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&Change) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn source(&self) -> &SourceKind {
        &self.source
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn is_loading(&self) -> bool {
        self.pagination.is_loading()
    }

    pub fn visible(&self) -> &[Photo] {
        self.pagination.visible()
    }

    pub fn master(&self) -> &[Photo] {
        self.pagination.master()
    }

    pub fn reaction(&self, photo_id: &str) -> Reaction {
        self.reactions.reaction(photo_id)
    }

    pub fn counts(&self, photo_id: &str) -> ReactionCounts {
        self.reactions.counts(photo_id)
    }

    pub fn lightbox(&self) -> Lightbox {
        self.lightbox
    }

    /// Position and photo currently shown in the lightbox
    pub fn lightbox_photo(&self) -> Option<(usize, &Photo)> {
        let index = self.lightbox.index()?;
        self.visible().get(index).map(|photo| (index, photo))
    }

    /// Attach and request the first page.
    ///
    /// Generation pre-fills two pages and shows one. Feed and remote
    /// sources return a pending request and hold the load guard until it
    /// completes.
    pub fn start(&mut self) -> LoadStep {
        self.session += 1;
        self.attached = true;
        self.in_flight = None;
        self.pagination.reset();
        self.lightbox.close();

        let page_size = self.pagination.page_size();
        tracing::info!(source = ?self.source, page_size, session = self.session, "gallery started");

        match self.source.clone() {
            SourceKind::Generate => {
                let range = self.seed_generated();
                self.settle(range.clone());
                LoadStep::Generated(range)
            }
            SourceKind::Feed { location } => {
                self.pagination.begin_initial();
                let ticket = self.issue(LoadPhase::Initial);
                LoadStep::Pending(BatchRequest::feed(ticket, self.http.clone(), location))
            }
            SourceKind::Remote { url } => {
                self.pagination.begin_initial();
                let ids = self.generator.reserve(page_size);
                let ticket = self.issue(LoadPhase::Initial);
                LoadStep::Pending(BatchRequest::remote(
                    ticket,
                    LoadPhase::Initial,
                    self.http.clone(),
                    url,
                    ids,
                ))
            }
        }
    }

    /// Detach. Outcomes of requests still in flight will be ignored.
    pub fn stop(&mut self) {
        if !self.attached {
            return;
        }
        self.attached = false;
        self.in_flight = None;
        self.pagination.finish();
        self.lightbox.close();
        tracing::info!(session = self.session, "gallery stopped");
    }

    /// React to the "near end of list" trigger
    pub fn load_more(&mut self) -> LoadStep {
        if !self.attached {
            return LoadStep::Detached;
        }
        let Some(plan) = self.pagination.begin() else {
            tracing::trace!("load already in flight");
            return LoadStep::Busy;
        };

        match plan {
            LoadPlan::Reveal => {
                let range = self.pagination.reveal_next_page();
                self.settle(range.clone());
                LoadStep::Revealed(range)
            }
            LoadPlan::Exhausted => {
                self.pagination.finish();
                LoadStep::Exhausted
            }
            LoadPlan::NeedBatch => {
                let page_size = self.pagination.page_size();
                match self.source.clone() {
                    SourceKind::Remote { url } => {
                        let ids = self.generator.reserve(page_size);
                        let ticket = self.issue(LoadPhase::More);
                        LoadStep::Pending(BatchRequest::remote(
                            ticket,
                            LoadPhase::More,
                            self.http.clone(),
                            url,
                            ids,
                        ))
                    }
                    // A feed is read once; past its end photos are synthetic
                    SourceKind::Feed { .. } | SourceKind::Generate => {
                        let batch = self.generator.batch(page_size);
                        let range = self.pagination.append(batch);
                        self.settle(range.clone());
                        LoadStep::Generated(range)
                    }
                }
            }
        }
    }

    /// Apply the outcome of a pending request and return the newly visible range.
    ///
    /// A failed initial load switches the session to generated photos for
    /// good. A failed later load leaves the window as it was. Only the
    /// outcome of the request currently in flight is applied; outcomes from
    /// a stopped or restarted session, or delivered a second time, are
    /// dropped.
    pub fn complete(&mut self, outcome: BatchOutcome) -> Range<usize> {
        let end = self.visible().len();
        let awaited = Some((outcome.ticket, outcome.phase()));
        if !self.attached || self.in_flight != awaited {
            tracing::debug!(
                session = outcome.ticket.session,
                seq = outcome.ticket.seq,
                phase = ?outcome.phase(),
                "batch outcome not awaited, ignored"
            );
            return end..end;
        }
        self.in_flight = None;

        let range = match (outcome.phase(), outcome.result) {
            (LoadPhase::Initial, Ok(photos)) => {
                let page_size = self.pagination.page_size();
                self.pagination.seed(photos, page_size)
            }
            (LoadPhase::Initial, Err(e)) => {
                tracing::warn!(error = %e, "failed to load photos, switching to generated photos");
                self.source = SourceKind::Generate;
                self.notify(Change::SourceFallback);
                self.seed_generated()
            }
            (LoadPhase::More, Ok(photos)) => self.pagination.append(photos),
            (LoadPhase::More, Err(e)) => {
                tracing::warn!(error = %e, "load more failed, batch dropped");
                self.pagination.finish();
                return end..end;
            }
        };

        self.settle(range.clone());
        range
    }

    /// Run a step to completion on the current task
    pub async fn drive(&mut self, step: LoadStep) -> Range<usize> {
        match step {
            LoadStep::Pending(request) => {
                let outcome = request.run().await;
                self.complete(outcome)
            }
            LoadStep::Revealed(range) | LoadStep::Generated(range) => range,
            LoadStep::Detached | LoadStep::Busy | LoadStep::Exhausted => {
                let end = self.visible().len();
                end..end
            }
        }
    }

    pub fn toggle_reaction(&mut self, photo_id: &str, vote: Vote) -> Reaction {
        let reaction = self.reactions.toggle(photo_id, vote);
        self.notify(Change::Reaction {
            photo_id: photo_id.to_string(),
            reaction,
        });
        reaction
    }

    pub fn open_lightbox(&mut self, index: usize) -> Result<()> {
        self.lightbox.open(index, self.visible().len())?;
        self.notify(Change::Lightbox(self.lightbox));
        Ok(())
    }

    pub fn close_lightbox(&mut self) {
        self.lightbox.close();
        self.notify(Change::Lightbox(self.lightbox));
    }

    pub fn next_photo(&mut self) {
        let before = self.lightbox;
        self.lightbox.next(self.visible().len());
        if self.lightbox != before {
            self.notify(Change::Lightbox(self.lightbox));
        }
    }

    pub fn previous_photo(&mut self) {
        let before = self.lightbox;
        self.lightbox.previous();
        if self.lightbox != before {
            self.notify(Change::Lightbox(self.lightbox));
        }
    }

    fn issue(&mut self, phase: LoadPhase) -> Ticket {
        self.seq += 1;
        let ticket = Ticket {
            session: self.session,
            seq: self.seq,
        };
        self.in_flight = Some((ticket, phase));
        ticket
    }

    /// Two pages generated, one shown
    fn seed_generated(&mut self) -> Range<usize> {
        let page_size = self.pagination.page_size();
        let batch = self.generator.batch(2 * page_size);
        self.pagination.seed(batch, page_size)
    }

    /// Zero counts for newly visible photos, release the guard, tell subscribers
    fn settle(&mut self, range: Range<usize>) {
        self.reactions
            .ensure_counts(&self.pagination.visible()[range.clone()]);
        self.pagination.finish();

        tracing::debug!(
            new = range.len(),
            visible = self.visible().len(),
            total = self.master().len(),
            "window grew"
        );
        self.notify(Change::Window {
            visible: self.visible().len(),
            total: self.master().len(),
        });
    }

    fn notify(&mut self, change: Change) {
        for listener in &mut self.listeners {
            listener(&change);
        }
    }
}

impl std::fmt::Debug for Gallery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gallery")
            .field("source", &self.source)
            .field("visible", &self.visible().len())
            .field("total", &self.master().len())
            .field("loading", &self.is_loading())
            .field("lightbox", &self.lightbox)
            .field("session", &self.session)
            .field("in_flight", &self.in_flight)
            .finish()
    }
}
