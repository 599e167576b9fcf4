use image::imageops::FilterType;

use super::ImageSlot;
use crate::error::{GalleryError, Result};

/// Longest edge of card thumbnails
const THUMBNAIL_SIZE: u32 = 512;
const AVATAR_SIZE: u32 = 80;

/// RGBA pixels ready for display
#[derive(Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl std::fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

/// Download and decode one image
pub async fn load_image(client: &reqwest::Client, url: &str, slot: ImageSlot) -> Result<DecodedImage> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(GalleryError::Upstream {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    let bytes = response.bytes().await?.to_vec();

    // Decoding is CPU-bound; keep it off the event loop
    tokio::task::spawn_blocking(move || decode(&bytes, slot))
        .await
        .map_err(|e| GalleryError::Task(e.to_string()))?
}

/// Load `url`, substituting `fallback` when it cannot be fetched or decoded
pub async fn load_with_fallback(
    client: reqwest::Client,
    url: String,
    fallback: String,
    slot: ImageSlot,
) -> Result<DecodedImage> {
    match load_image(&client, &url, slot).await {
        Ok(image) => Ok(image),
        Err(e) => {
            tracing::warn!(url = %url, fallback = %fallback, error = %e, "image failed to load, using fallback");
            load_image(&client, &fallback, slot).await
        }
    }
}

/// Decode image bytes; card and avatar images are downscaled
pub fn decode(bytes: &[u8], slot: ImageSlot) -> Result<DecodedImage> {
    let img = image::load_from_memory(bytes)?;

    let limit = match slot {
        ImageSlot::Card => Some(THUMBNAIL_SIZE),
        ImageSlot::Avatar => Some(AVATAR_SIZE),
        ImageSlot::Lightbox => None,
    };
    let img = match limit {
        Some(edge) if img.width() > edge || img.height() > edge => {
            img.resize(edge, edge, FilterType::Lanczos3)
        }
        _ => img,
    };

    let rgba = img.to_rgba8();
    Ok(DecodedImage {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}
