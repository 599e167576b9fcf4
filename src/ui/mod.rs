/// Widgets for the gallery window
///
/// This module handles:
/// - Photo cards in the grid (card.rs)
/// - The full-screen lightbox overlay (lightbox.rs)
/// - Shared image placeholders

pub mod card;
pub mod lightbox;

use iced::widget::{container, image, text};
use iced::{ContentFit, Element, Length};

use crate::{ImageState, Message};

/// Downloaded image, or a placeholder while it loads or after it failed
pub fn picture<'a>(state: Option<&ImageState>, height: Length, fit: ContentFit) -> Element<'a, Message> {
    match state {
        Some(ImageState::Ready(handle)) => image(handle.clone())
            .width(Length::Fill)
            .height(height)
            .content_fit(fit)
            .into(),
        Some(ImageState::Failed) => placeholder("Image unavailable", height),
        Some(ImageState::Loading) | None => placeholder("Loading...", height),
    }
}

fn placeholder<'a>(label: &'a str, height: Length) -> Element<'a, Message> {
    container(text(label).size(12))
        .center_x(Length::Fill)
        .center_y(height)
        .into()
}
