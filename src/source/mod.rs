/// Photo source adapters
///
/// This module handles:
/// - Reading a static JSON feed from a URL or file (feed.rs)
/// - Fetching one photo per call from a random-image API (remote.rs)
/// - Generating deterministic synthetic photos (generator.rs)
/// - The fixed chef directory behind the published feed (directory.rs)
///
/// Network reads are packaged as a `BatchRequest` so the caller can run
/// them on its own runtime and hand the `BatchOutcome` back to the gallery.

pub mod directory;
pub mod feed;
pub mod generator;
pub mod remote;

use std::ops::Range;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::GalleryError;
use crate::state::data::Photo;

const AVATAR_ENDPOINT: &str = "https://ui-avatars.com/api/";

/// Where a gallery gets its photos
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceKind {
    /// A JSON document at an http(s) URL or a local path
    Feed { location: String },
    /// An endpoint answering `{image, link}` per call
    Remote { url: String },
    /// Synthetic photos only
    Generate,
}

impl Default for SourceKind {
    fn default() -> Self {
        SourceKind::Feed {
            location: "./api/chefs.json".to_string(),
        }
    }
}

/// Generated avatar for a display name
pub fn avatar_url(name: &str) -> String {
    reqwest::Url::parse_with_params(
        AVATAR_ENDPOINT,
        &[("name", name), ("background", "random"), ("bold", "true"), ("size", "80")],
    )
    .map(String::from)
    .unwrap_or_else(|_| AVATAR_ENDPOINT.to_string())
}

/// Which load a batch belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Initial,
    More,
}

#[derive(Debug, Clone)]
enum Fetch {
    Feed {
        client: reqwest::Client,
        location: String,
    },
    Remote {
        client: reqwest::Client,
        url: String,
        ids: Range<u64>,
    },
}

/// Identifies one issued request: the gallery session plus a sequence
/// number that never repeats within the gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Ticket {
    pub(crate) session: u64,
    pub(crate) seq: u64,
}

/// A network read the gallery is waiting on
#[derive(Debug, Clone)]
pub struct BatchRequest {
    ticket: Ticket,
    phase: LoadPhase,
    fetch: Fetch,
}

impl BatchRequest {
    pub(crate) fn feed(ticket: Ticket, client: reqwest::Client, location: String) -> Self {
        Self {
            ticket,
            phase: LoadPhase::Initial,
            fetch: Fetch::Feed { client, location },
        }
    }

    pub(crate) fn remote(
        ticket: Ticket,
        phase: LoadPhase,
        client: reqwest::Client,
        url: String,
        ids: Range<u64>,
    ) -> Self {
        Self {
            ticket,
            phase,
            fetch: Fetch::Remote { client, url, ids },
        }
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Perform the read.
    ///
    /// No timeout is applied. A request that never resolves never produces
    /// an outcome, and the gallery keeps its load guard until it does.
    pub async fn run(self) -> BatchOutcome {
        let result = match &self.fetch {
            Fetch::Feed { client, location } => feed::fetch_feed(client, location).await,
            Fetch::Remote { client, url, ids } => {
                remote::fetch_remote_batch(client, url, ids.clone()).await
            }
        };

        BatchOutcome {
            ticket: self.ticket,
            phase: self.phase,
            result: result.map_err(Arc::new),
        }
    }
}

/// Result of a `BatchRequest`, to be passed to `Gallery::complete`
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub(crate) ticket: Ticket,
    pub(crate) phase: LoadPhase,
    pub(crate) result: Result<Vec<Photo>, Arc<GalleryError>>,
}

impl BatchOutcome {
    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}
