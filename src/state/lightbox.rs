use crate::error::{GalleryError, Result};

/// Full-screen viewer position over the visible window.
///
/// Navigation clamps at both ends and never wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lightbox {
    #[default]
    Closed,
    Open(usize),
}

impl Lightbox {
    pub fn index(&self) -> Option<usize> {
        match self {
            Lightbox::Closed => None,
            Lightbox::Open(index) => Some(*index),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Lightbox::Open(_))
    }

    /// Show item `index` of a window holding `visible` photos
    pub fn open(&mut self, index: usize, visible: usize) -> Result<()> {
        if index >= visible {
            return Err(GalleryError::IndexOutOfRange { index, len: visible });
        }
        *self = Lightbox::Open(index);
        Ok(())
    }

    pub fn close(&mut self) {
        *self = Lightbox::Closed;
    }

    pub fn next(&mut self, visible: usize) {
        if let Lightbox::Open(index) = *self {
            if index + 1 < visible {
                *self = Lightbox::Open(index + 1);
            }
        }
    }

    pub fn previous(&mut self) {
        if let Lightbox::Open(index) = *self {
            if index > 0 {
                *self = Lightbox::Open(index - 1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_clamps_at_last_item() {
        let mut lightbox = Lightbox::default();
        lightbox.open(0, 15).unwrap();
        for _ in 0..15 {
            lightbox.next(15);
        }
        assert_eq!(lightbox, Lightbox::Open(14));
    }

    #[test]
    fn test_previous_at_first_item_stays() {
        let mut lightbox = Lightbox::default();
        lightbox.open(0, 3).unwrap();
        lightbox.previous();
        assert_eq!(lightbox.index(), Some(0));

        lightbox.open(2, 3).unwrap();
        lightbox.previous();
        assert_eq!(lightbox.index(), Some(1));
    }

    #[test]
    fn test_open_out_of_range_is_rejected() {
        let mut lightbox = Lightbox::default();
        assert!(matches!(
            lightbox.open(3, 3),
            Err(GalleryError::IndexOutOfRange { index: 3, len: 3 })
        ));
        assert!(!lightbox.is_open());
    }

    #[test]
    fn test_navigation_while_closed_is_noop() {
        let mut lightbox = Lightbox::default();
        lightbox.next(10);
        lightbox.previous();
        assert_eq!(lightbox, Lightbox::Closed);

        lightbox.open(4, 10).unwrap();
        lightbox.close();
        assert_eq!(lightbox.index(), None);
    }
}
