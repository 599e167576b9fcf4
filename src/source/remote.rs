use std::ops::Range;

use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use super::avatar_url;
use crate::error::{GalleryError, Result};
use crate::state::data::{Author, Photo};

/// One response of a random-image endpoint such as randomfox.ca/floof
#[derive(Debug, Deserialize)]
struct RemoteItem {
    image: String,
    link: String,
}

/// Fetch one photo per id, one call after another.
///
/// Any failed call fails the whole batch; photos fetched before it are
/// dropped.
pub async fn fetch_remote_batch(
    client: &reqwest::Client,
    url: &str,
    ids: Range<u64>,
) -> Result<Vec<Photo>> {
    let today = Utc::now().date_naive();
    let mut batch = Vec::new();

    for id in ids {
        let response = client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GalleryError::Upstream {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let item: RemoteItem = response.json().await?;
        tracing::debug!(id, link = %item.link, "remote photo fetched");
        batch.push(remote_photo(id, item, today));
    }

    Ok(batch)
}

fn remote_photo(id: u64, item: RemoteItem, today: NaiveDate) -> Photo {
    let title = format!("Floof #{id}");
    // Credit the site the photo links back to
    let site = reqwest::Url::parse(&item.link)
        .ok()
        .and_then(|link| link.host_str().map(str::to_string))
        .unwrap_or_else(|| "unknown".to_string());

    Photo {
        id: format!("r-{id}"),
        date_taken: today,
        thumbnail_url: item.image,
        full_image_url: None,
        author: Author {
            avatar_url: avatar_url(&site),
            member_since: today,
            handle: format!("@floof{id}"),
            name: site,
        },
        title,
    }
}
