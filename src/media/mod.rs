/// Image resolution and loading
///
/// This module handles:
/// - Choosing which URL a card, avatar or the lightbox shows
/// - Deterministic fallback images for failed loads
/// - Downloading, decoding and downscaling images (thumbnail.rs)

pub mod thumbnail;

pub use thumbnail::{load_image, load_with_fallback, DecodedImage};

use crate::state::data::Photo;

/// Where an image is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSlot {
    Card,
    Avatar,
    Lightbox,
}

impl ImageSlot {
    fn fallback_size(self) -> (u32, u32) {
        match self {
            ImageSlot::Card => (800, 600),
            ImageSlot::Avatar => (80, 80),
            ImageSlot::Lightbox => (1600, 1200),
        }
    }
}

/// URL to show for `photo` in `slot`
pub fn resolve_url(photo: &Photo, slot: ImageSlot) -> &str {
    match slot {
        ImageSlot::Card => &photo.thumbnail_url,
        ImageSlot::Avatar => &photo.author.avatar_url,
        ImageSlot::Lightbox => photo.display_url(),
    }
}

/// Replacement image for the photo at `position` in the visible window
pub fn fallback_url(slot: ImageSlot, position: usize) -> String {
    let (width, height) = slot.fallback_size();
    format!(
        "https://loremflickr.com/{width}/{height}/chef,portrait,restaurant/all?lock={}",
        position + 1
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::generator::Generator;

    #[test]
    fn test_fallback_is_keyed_by_position() {
        assert_eq!(
            fallback_url(ImageSlot::Card, 0),
            "https://loremflickr.com/800/600/chef,portrait,restaurant/all?lock=1"
        );
        assert_eq!(
            fallback_url(ImageSlot::Lightbox, 9),
            "https://loremflickr.com/1600/1200/chef,portrait,restaurant/all?lock=10"
        );
    }

    #[test]
    fn test_resolve_url_per_slot() {
        let mut photo = Generator::new(3).batch(1).remove(0);
        assert_eq!(resolve_url(&photo, ImageSlot::Card), photo.thumbnail_url);
        assert!(resolve_url(&photo, ImageSlot::Lightbox).contains("/1600/1200/"));
        assert!(resolve_url(&photo, ImageSlot::Avatar).starts_with("https://ui-avatars.com/api/"));

        photo.full_image_url = None;
        assert_eq!(resolve_url(&photo, ImageSlot::Lightbox), photo.thumbnail_url);
    }
}
