use reqwest::header::CACHE_CONTROL;
use serde::Deserialize;

use crate::error::{GalleryError, Result};
use crate::state::data::Photo;

/// Shapes a feed document may take
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FeedDocument {
    List(Vec<Photo>),
    Chefs { chefs: Vec<Photo> },
    Photos { photos: Vec<Photo> },
}

impl FeedDocument {
    fn into_photos(self) -> Vec<Photo> {
        match self {
            FeedDocument::List(photos) => photos,
            FeedDocument::Chefs { chefs } => chefs,
            FeedDocument::Photos { photos } => photos,
        }
    }
}

/// Parse a feed: a bare array, or an object wrapping it in `chefs` or `photos`
pub fn parse_feed(text: &str) -> Result<Vec<Photo>> {
    serde_json::from_str::<FeedDocument>(text)
        .map(FeedDocument::into_photos)
        .map_err(|e| GalleryError::MalformedFeed(e.to_string()))
}

/// Read the whole feed from an http(s) URL or a local file path
pub async fn fetch_feed(client: &reqwest::Client, location: &str) -> Result<Vec<Photo>> {
    let text = if is_url(location) {
        let response = client
            .get(location)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GalleryError::Upstream {
                status: status.as_u16(),
                url: location.to_string(),
            });
        }
        response.text().await?
    } else {
        tokio::fs::read_to_string(location).await?
    };

    let photos = parse_feed(&text)?;
    tracing::info!(location, count = photos.len(), "feed loaded");
    Ok(photos)
}

fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::directory::chef_feed;
    use crate::test_support::{serve, Reply};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn sample_json() -> String {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        serde_json::to_string(&chef_feed(3, today)).unwrap()
    }

    #[test]
    fn test_parse_all_shapes() {
        let list = sample_json();
        assert_eq!(parse_feed(&list).unwrap().len(), 3);

        let chefs = format!(r#"{{"chefs":{list}}}"#);
        assert_eq!(parse_feed(&chefs).unwrap()[0].id, "c-001");

        let photos = format!(r#"{{"photos":{list},"version":2}}"#);
        assert_eq!(parse_feed(&photos).unwrap().len(), 3);
    }

    #[test]
    fn test_parse_rejects_unknown_shapes() {
        assert!(matches!(parse_feed("{}"), Err(GalleryError::MalformedFeed(_))));
        assert!(matches!(parse_feed(r#"{"items":[]}"#), Err(GalleryError::MalformedFeed(_))));
        assert!(matches!(parse_feed("<html>"), Err(GalleryError::MalformedFeed(_))));
        assert!(matches!(parse_feed(r#"[{"id":"x"}]"#), Err(GalleryError::MalformedFeed(_))));
    }

    #[tokio::test]
    async fn test_fetch_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chefs.json");
        std::fs::write(&path, sample_json()).unwrap();

        let photos = fetch_feed(&reqwest::Client::new(), path.to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(photos.len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_missing_file_is_io_error() {
        let result = fetch_feed(&reqwest::Client::new(), "/nonexistent/chefs.json").await;
        assert!(matches!(result, Err(GalleryError::Io(_))));
    }

    #[tokio::test]
    async fn test_fetch_over_http() {
        let base = serve(vec![Reply::json(&sample_json()), Reply::status(500)]).await;
        let client = reqwest::Client::new();
        let url = format!("{base}/api/chefs.json");

        assert_eq!(fetch_feed(&client, &url).await.unwrap().len(), 3);
        assert!(matches!(
            fetch_feed(&client, &url).await,
            Err(GalleryError::Upstream { status: 500, .. })
        ));
    }
}
