use iced::widget::{button, column, container, mouse_area, row, text, Space};
use iced::{Alignment, Color, ContentFit, Element, Length};

use insta_gallery::Photo;

use crate::{ImageState, Message};

/// Full-screen view of the photo at `index`; clicking the backdrop closes it
pub fn view<'a>(
    index: usize,
    total: usize,
    photo: &'a Photo,
    image: Option<&ImageState>,
) -> Element<'a, Message> {
    let controls = row![
        button(text("◀ Prev")).on_press(Message::Previous),
        Space::with_width(Length::Fill),
        text(format!("{} of {}", index + 1, total)).size(13),
        Space::with_width(Length::Fill),
        button(text("✕ Close")).on_press(Message::CloseLightbox),
        Space::with_width(Length::Fill),
        button(text("Next ▶")).on_press(Message::Next),
    ]
    .align_y(Alignment::Center);

    let caption = column![
        text(photo.title.as_str()).size(18),
        text(format!("{} {}", photo.author.name, photo.author.handle)).size(12),
    ]
    .spacing(4)
    .align_x(Alignment::Center);

    let content = column![
        super::picture(image, Length::Fill, ContentFit::Contain),
        caption,
        controls,
    ]
    .spacing(16)
    .align_x(Alignment::Center);

    let backdrop = container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(32)
        .style(|_theme| container::Style {
            background: Some(Color::from_rgba(0.0, 0.0, 0.0, 0.92).into()),
            text_color: Some(Color::WHITE),
            ..container::Style::default()
        });

    mouse_area(backdrop).on_press(Message::CloseLightbox).into()
}
