/// State management module
///
/// This module handles all gallery state, including:
/// - Shared data structures (data.rs)
/// - Durable key-value storage (storage.rs)
/// - Reactions and their counters (reactions.rs)
/// - The master list, visible window and load guard (pagination.rs)
/// - The lightbox position (lightbox.rs)
/// - The controller tying them together (gallery.rs)

pub mod data;
pub mod gallery;
pub mod lightbox;
pub mod pagination;
pub mod reactions;
pub mod storage;
