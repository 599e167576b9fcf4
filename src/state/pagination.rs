//! Master list, visible prefix and the load guard.
//!
//! `Pagination` knows nothing about where photos come from; the gallery
//! controller decides between revealing, generating and fetching, and
//! reports back through `reveal_next_page` / `append`.

use std::ops::Range;

use super::data::Photo;

/// What `load_more` should do next, decided under the guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPlan {
    /// Already-fetched photos are hidden; show the next page of them
    Reveal,
    /// Everything fetched is visible and infinite mode wants more
    NeedBatch,
    /// Everything fetched is visible and no more will come
    Exhausted,
}

#[derive(Debug, Clone)]
pub struct Pagination {
    page_size: usize,
    infinite: bool,
    master: Vec<Photo>,
    visible_len: usize,
    loading: bool,
}

impl Pagination {
    pub fn new(page_size: usize, infinite: bool) -> Self {
        Self {
            page_size,
            infinite,
            master: Vec::new(),
            visible_len: 0,
            loading: false,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn master(&self) -> &[Photo] {
        &self.master
    }

    pub fn visible(&self) -> &[Photo] {
        &self.master[..self.visible_len]
    }

    /// Take the load guard. Returns `None` when a load is already in flight.
    pub fn begin(&mut self) -> Option<LoadPlan> {
        if self.loading {
            return None;
        }
        self.loading = true;

        let plan = if self.visible_len < self.master.len() {
            LoadPlan::Reveal
        } else if self.infinite {
            LoadPlan::NeedBatch
        } else {
            LoadPlan::Exhausted
        };
        Some(plan)
    }

    /// Release the load guard
    pub fn finish(&mut self) {
        self.loading = false;
    }

    /// Hold the guard for the initial load
    pub fn begin_initial(&mut self) {
        self.loading = true;
    }

    /// Show up to one more page of hidden photos; returns the newly visible range
    pub fn reveal_next_page(&mut self) -> Range<usize> {
        let start = self.visible_len;
        self.visible_len = (start + self.page_size).min(self.master.len());
        start..self.visible_len
    }

    /// Append a fresh batch to both lists. Only valid once every fetched
    /// photo is visible, which `begin` guarantees for `NeedBatch`.
    pub fn append(&mut self, batch: Vec<Photo>) -> Range<usize> {
        debug_assert_eq!(self.visible_len, self.master.len());
        let start = self.master.len();
        self.master.extend(batch);
        self.visible_len = self.master.len();
        start..self.visible_len
    }

    /// Replace everything with an initial list, showing its first `visible` photos
    pub fn seed(&mut self, photos: Vec<Photo>, visible: usize) -> Range<usize> {
        self.visible_len = visible.min(photos.len());
        self.master = photos;
        0..self.visible_len
    }

    /// Drop all photos and release the guard
    pub fn reset(&mut self) {
        self.master.clear();
        self.visible_len = 0;
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::generator::Generator;

    #[test]
    fn test_reveal_then_need_batch() {
        let mut generator = Generator::new(1000);
        let mut pages = Pagination::new(15, true);
        assert_eq!(pages.seed(generator.batch(30), 15), 0..15);

        assert_eq!(pages.begin(), Some(LoadPlan::Reveal));
        assert_eq!(pages.reveal_next_page(), 15..30);
        pages.finish();

        assert_eq!(pages.begin(), Some(LoadPlan::NeedBatch));
        assert_eq!(pages.append(generator.batch(15)), 30..45);
        pages.finish();

        assert_eq!(pages.visible().len(), 45);
        assert_eq!(pages.visible()[30].id, "g-1030");
    }

    #[test]
    fn test_partial_last_page() {
        let mut pages = Pagination::new(10, false);
        pages.seed(Generator::new(1).batch(14), 10);

        assert_eq!(pages.begin(), Some(LoadPlan::Reveal));
        assert_eq!(pages.reveal_next_page(), 10..14);
        pages.finish();

        assert_eq!(pages.begin(), Some(LoadPlan::Exhausted));
        pages.finish();
        assert_eq!(pages.visible().len(), pages.master().len());
    }

    #[test]
    fn test_guard_blocks_second_begin() {
        let mut pages = Pagination::new(5, true);
        assert!(pages.begin().is_some());
        assert!(pages.is_loading());
        assert_eq!(pages.begin(), None);
        pages.finish();
        assert!(pages.begin().is_some());
    }

    #[test]
    fn test_seed_shorter_than_page() {
        let mut pages = Pagination::new(15, true);
        assert_eq!(pages.seed(Generator::new(1).batch(4), 15), 0..4);
        assert_eq!(pages.visible().len(), 4);
    }
}
