//! Infinite-scrolling photo gallery state: photo sources, pagination,
//! reactions and a lightbox, independent of any rendering technology.

pub mod config;
pub mod error;
pub mod media;
pub mod source;
pub mod state;

#[cfg(test)]
mod test_support;

pub use config::GalleryConfig;
pub use error::{GalleryError, Result};
pub use source::{BatchOutcome, BatchRequest, SourceKind};
pub use state::data::{Author, Photo, Reaction, ReactionCounts, Vote};
pub use state::gallery::{Change, Gallery, LoadStep};
pub use state::lightbox::Lightbox;
pub use state::storage::{KeyValueStore, MemoryStore, SqliteStore};
