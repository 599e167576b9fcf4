use chrono::Datelike;
use iced::widget::{button, column, container, mouse_area, row, text, Space};
use iced::{Alignment, Border, Color, ContentFit, Element, Length, Theme};

use insta_gallery::{Photo, Reaction, ReactionCounts, Vote};

use crate::{ImageState, Message};

/// Fixed card width; the grid wraps cards onto as many rows as needed
pub const CARD_WIDTH: f32 = 300.0;
const MEDIA_HEIGHT: f32 = 225.0;
const AVATAR_SIZE: f32 = 36.0;

/// One photo card: author header, clickable image, reactions, caption
pub fn view<'a>(
    index: usize,
    photo: &'a Photo,
    reaction: Reaction,
    counts: ReactionCounts,
    image: Option<&ImageState>,
    avatar: Option<&ImageState>,
) -> Element<'a, Message> {
    let author = column![
        text(photo.author.name.as_str()).size(15),
        text(format!(
            "{} · since {}",
            photo.author.handle,
            photo.author.member_since.year()
        ))
        .size(11),
    ]
    .spacing(2);

    let avatar = container(super::picture(
        avatar,
        Length::Fixed(AVATAR_SIZE),
        ContentFit::Cover,
    ))
    .width(Length::Fixed(AVATAR_SIZE));

    let header = row![avatar, author].spacing(10).align_y(Alignment::Center);

    let media = mouse_area(super::picture(
        image,
        Length::Fixed(MEDIA_HEIGHT),
        ContentFit::Cover,
    ))
    .on_press(Message::OpenLightbox(index));

    let reactions = row![
        reaction_button(
            "Love",
            reaction == Reaction::Liked,
            Message::React(photo.id.clone(), Vote::Like)
        ),
        text(counts.hearts.to_string()).size(12),
        reaction_button(
            "Yuck",
            reaction == Reaction::Disliked,
            Message::React(photo.id.clone(), Vote::Dislike)
        ),
        text(counts.dislikes.to_string()).size(12),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    let caption = row![
        text(photo.title.as_str()).size(14),
        Space::with_width(Length::Fill),
        text(taken_on(photo)).size(11),
    ]
    .align_y(Alignment::Center);

    container(column![header, media, reactions, caption].spacing(10))
        .padding(12)
        .width(Length::Fixed(CARD_WIDTH))
        .style(move |theme| card_style(theme, reaction))
        .into()
}

/// Footer label with the ISO date the photo was taken
fn taken_on(photo: &Photo) -> String {
    format!("Taken on {}", photo.date_taken)
}

fn reaction_button<'a>(label: &'a str, active: bool, on_press: Message) -> Element<'a, Message> {
    let style: fn(&Theme, button::Status) -> button::Style = if active {
        button::primary
    } else {
        button::secondary
    };

    button(text(label).size(13))
        .on_press(on_press)
        .padding([4, 10])
        .style(style)
        .into()
}

/// Border colour tracks the viewer's reaction
fn card_style(theme: &Theme, reaction: Reaction) -> container::Style {
    let palette = theme.extended_palette();
    let (color, width) = match reaction {
        Reaction::Liked => (palette.danger.base.color, 2.0),
        Reaction::Disliked => (Color::from_rgb8(0xE0, 0xA8, 0x00), 2.0),
        Reaction::None => (palette.background.strong.color, 1.0),
    };

    container::Style {
        background: Some(palette.background.weak.color.into()),
        border: Border {
            color,
            width,
            radius: 10.0.into(),
        },
        ..container::Style::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use insta_gallery::Author;

    #[test]
    fn test_taken_on_uses_iso_date() {
        let photo = Photo {
            id: "c-001".into(),
            title: "Gordon Ramsay".into(),
            date_taken: NaiveDate::from_ymd_opt(2026, 3, 7).unwrap(),
            thumbnail_url: "https://example.com/t.jpg".into(),
            full_image_url: None,
            author: Author {
                name: "Gordon Ramsay".into(),
                avatar_url: "https://example.com/a.png".into(),
                member_since: NaiveDate::from_ymd_opt(2017, 1, 1).unwrap(),
                handle: "@gordonramsay".into(),
            },
        };
        assert_eq!(taken_on(&photo), "Taken on 2026-03-07");
    }
}
