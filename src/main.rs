use std::cell::RefCell;
use std::collections::HashMap;
use std::ops::Range;
use std::rc::Rc;

use iced::keyboard::{self, key::Named, Key};
use iced::widget::{button, column, container, image, opaque, scrollable, stack, text};
use iced::{Alignment, Element, Length, Subscription, Task, Theme};
use tracing_subscriber::EnvFilter;

use insta_gallery::media::{self, ImageSlot};
use insta_gallery::{
    BatchOutcome, Change, Gallery, GalleryConfig, KeyValueStore, LoadStep, MemoryStore,
    SqliteStore, Vote,
};

// Declare the ui module
mod ui;

/// Load more once the scroll position passes this fraction of the content
const NEAR_END: f32 = 0.85;

/// Identifies a downloaded image
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageKey {
    photo_id: String,
    slot: ImageSlot,
}

/// Download state of one image
#[derive(Debug)]
pub enum ImageState {
    Loading,
    Ready(image::Handle),
    Failed,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// A feed or remote batch finished
    BatchLoaded(BatchOutcome),
    /// The grid was scrolled
    Scrolled(scrollable::Viewport),
    /// User clicked "Load more"
    LoadMore,
    /// User clicked a reaction button
    React(String, Vote),
    OpenLightbox(usize),
    CloseLightbox,
    Next,
    Previous,
    /// An image (or its fallback) finished loading
    ImageLoaded(ImageKey, Result<image::Handle, String>),
}

/// Main application state
struct InstaGallery {
    gallery: Gallery,
    http: reqwest::Client,
    images: HashMap<ImageKey, ImageState>,
    /// Changes reported by the gallery since the last update
    changes: Rc<RefCell<Vec<Change>>>,
    /// Status line shown under the grid
    status: String,
}

impl InstaGallery {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let config = GalleryConfig::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "config unusable, using defaults");
            GalleryConfig::default()
        });

        // Reactions still work for the session without durable storage
        let store: Box<dyn KeyValueStore> = match SqliteStore::open_default() {
            Ok(store) => Box::new(store),
            Err(e) => {
                tracing::warn!(error = %e, "reaction storage unavailable, reactions will not persist");
                Box::new(MemoryStore::new())
            }
        };

        let http = reqwest::Client::builder()
            .user_agent(format!("insta-gallery/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        // The config was validated on load, so this only fails on a broken default
        let mut gallery = Gallery::new(&config, store)
            .expect("Failed to initialize gallery. Check the configuration file.")
            .with_http_client(http.clone());

        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = changes.clone();
        gallery.subscribe(move |change| sink.borrow_mut().push(change.clone()));

        let step = gallery.start();
        let mut app = InstaGallery {
            gallery,
            http,
            images: HashMap::new(),
            changes,
            status: "Loading photos...".to_string(),
        };
        let task = app.run_step(step);
        app.drain_changes();

        (app, task)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        let task = match message {
            Message::BatchLoaded(outcome) => {
                let range = self.gallery.complete(outcome);
                self.fetch_cards(range)
            }
            Message::Scrolled(viewport) => {
                if viewport.relative_offset().y >= NEAR_END {
                    let step = self.gallery.load_more();
                    self.run_step(step)
                } else {
                    Task::none()
                }
            }
            Message::LoadMore => {
                let step = self.gallery.load_more();
                self.run_step(step)
            }
            Message::React(photo_id, vote) => {
                self.gallery.toggle_reaction(&photo_id, vote);
                Task::none()
            }
            Message::OpenLightbox(index) => {
                if let Err(e) = self.gallery.open_lightbox(index) {
                    tracing::warn!(error = %e, "ignoring lightbox request");
                }
                self.fetch_lightbox()
            }
            Message::CloseLightbox => {
                self.gallery.close_lightbox();
                Task::none()
            }
            Message::Next => {
                self.gallery.next_photo();
                self.fetch_lightbox()
            }
            Message::Previous => {
                self.gallery.previous_photo();
                self.fetch_lightbox()
            }
            Message::ImageLoaded(key, result) => {
                let state = match result {
                    Ok(handle) => ImageState::Ready(handle),
                    Err(e) => {
                        tracing::warn!(photo_id = %key.photo_id, error = %e, "image and fallback failed");
                        ImageState::Failed
                    }
                };
                self.images.insert(key, state);
                Task::none()
            }
        };

        self.drain_changes();
        task
    }

    /// Turn a gallery load step into work for the runtime
    fn run_step(&mut self, step: LoadStep) -> Task<Message> {
        match step {
            LoadStep::Pending(request) => Task::perform(request.run(), Message::BatchLoaded),
            LoadStep::Revealed(range) | LoadStep::Generated(range) => self.fetch_cards(range),
            LoadStep::Exhausted => {
                self.status = "You're all caught up.".to_string();
                Task::none()
            }
            LoadStep::Busy | LoadStep::Detached => Task::none(),
        }
    }

    /// Start downloading card images and avatars for newly visible photos
    fn fetch_cards(&mut self, range: Range<usize>) -> Task<Message> {
        let tasks: Vec<_> = range
            .flat_map(|index| [(index, ImageSlot::Card), (index, ImageSlot::Avatar)])
            .filter_map(|(index, slot)| self.fetch_image(index, slot))
            .collect();
        Task::batch(tasks)
    }

    fn fetch_lightbox(&mut self) -> Task<Message> {
        match self.gallery.lightbox().index() {
            Some(index) => self
                .fetch_image(index, ImageSlot::Lightbox)
                .unwrap_or_else(Task::none),
            None => Task::none(),
        }
    }

    fn fetch_image(&mut self, index: usize, slot: ImageSlot) -> Option<Task<Message>> {
        let photo = self.gallery.visible().get(index)?;
        let key = ImageKey {
            photo_id: photo.id.clone(),
            slot,
        };
        if self.images.contains_key(&key) {
            return None;
        }

        let url = media::resolve_url(photo, slot).to_string();
        let fallback = media::fallback_url(slot, index);
        self.images.insert(key.clone(), ImageState::Loading);

        Some(Task::perform(
            media::load_with_fallback(self.http.clone(), url, fallback, slot),
            move |result| {
                let handle = result
                    .map(|img| image::Handle::from_rgba(img.width, img.height, img.pixels))
                    .map_err(|e| e.to_string());
                Message::ImageLoaded(key.clone(), handle)
            },
        ))
    }

    /// Fold gallery notifications into the status line
    fn drain_changes(&mut self) {
        for change in self.changes.borrow_mut().drain(..) {
            match change {
                Change::Window { visible, total } => {
                    self.status = format!("Showing {visible} of {total} photos");
                }
                Change::SourceFallback => {
                    self.status = "Photo feed unavailable, showing generated photos".to_string();
                }
                Change::Reaction { .. } | Change::Lightbox(_) => {}
            }
        }
    }

    fn image(&self, photo_id: &str, slot: ImageSlot) -> Option<&ImageState> {
        self.images.get(&ImageKey {
            photo_id: photo_id.to_string(),
            slot,
        })
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let cards: Vec<Element<Message>> = self
            .gallery
            .visible()
            .iter()
            .enumerate()
            .map(|(index, photo)| {
                ui::card::view(
                    index,
                    photo,
                    self.gallery.reaction(&photo.id),
                    self.gallery.counts(&photo.id),
                    self.image(&photo.id, ImageSlot::Card),
                    self.image(&photo.id, ImageSlot::Avatar),
                )
            })
            .collect();

        let grid = iced_aw::Wrap::with_elements(cards)
            .spacing(16.0)
            .line_spacing(16.0);

        let more: Element<Message> = if self.gallery.is_loading() {
            text("Loading more...").size(14).into()
        } else {
            button("Load more")
                .on_press(Message::LoadMore)
                .padding(10)
                .into()
        };

        let content = column![grid, more, text(self.status.as_str()).size(12)]
            .spacing(20)
            .padding(20)
            .width(Length::Fill)
            .align_x(Alignment::Center);

        let feed = scrollable(container(content).center_x(Length::Fill))
            .on_scroll(Message::Scrolled)
            .width(Length::Fill)
            .height(Length::Fill);

        match self.gallery.lightbox_photo() {
            Some((index, photo)) => stack![
                feed,
                opaque(ui::lightbox::view(
                    index,
                    self.gallery.visible().len(),
                    photo,
                    self.image(&photo.id, ImageSlot::Lightbox),
                )),
            ]
            .into(),
            None => feed.into(),
        }
    }

    /// Arrow keys navigate the lightbox, Escape closes it
    fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(|key, _modifiers| match key.as_ref() {
            Key::Named(Named::ArrowRight) => Some(Message::Next),
            Key::Named(Named::ArrowLeft) => Some(Message::Previous),
            Key::Named(Named::Escape) => Some(Message::CloseLightbox),
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

impl Drop for InstaGallery {
    fn drop(&mut self) {
        self.gallery.stop();
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    iced::application("Insta Gallery", InstaGallery::update, InstaGallery::view)
        .subscription(InstaGallery::subscription)
        .theme(InstaGallery::theme)
        .centered()
        .run_with(InstaGallery::new)
}
