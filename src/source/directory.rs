//! Fixed chef directory used to publish a static JSON feed.

use chrono::{Days, NaiveDate};

use super::avatar_url;
use crate::state::data::{Author, Photo};

const UNSPLASH_ENDPOINT: &str = "https://source.unsplash.com/featured/";

pub const CHEF_DIRECTORY: [&str; 50] = [
    "Gordon Ramsay", "Jamie Oliver", "Alain Ducasse", "Thomas Keller", "Wolfgang Puck",
    "Heston Blumenthal", "Massimo Bottura", "Ferran Adria", "Rene Redzepi", "Marco Pierre White",
    "Grant Achatz", "Paul Bocuse", "Dominique Crenn", "Mauro Colagreco", "Nobu Matsuhisa",
    "Clare Smyth", "Jose Andres", "Enrique Olvera", "Virgilio Martinez", "Gaggan Anand",
    "Vikas Khanna", "Vineet Bhatia", "Sanjeev Kapoor", "Helene Darroze", "Alice Waters",
    "Rick Bayless", "Michael Mina", "Curtis Stone", "Bobby Flay", "Guy Fieri",
    "Emeril Lagasse", "Martin Berasategui", "Andoni Luis Aduriz", "Carme Ruscalleda", "Joan Roca",
    "Tetsuya Wakuda", "Seiji Yamamoto", "Yoshihiro Murata", "Ana Ros", "Pia Leon",
    "Nadia Santini", "Yannick Alleno", "Pierre Gagnaire", "Daniel Boulud", "Raymond Blanc",
    "Michel Bras", "Narisawa Yoshihiro", "Alex Atala", "Henrique Sa Pessoa", "Helena Rizzo",
];

/// Build up to `count` feed entries (capped at the directory size), newest first
pub fn chef_feed(count: usize, today: NaiveDate) -> Vec<Photo> {
    CHEF_DIRECTORY
        .iter()
        .take(count)
        .enumerate()
        .map(|(i, name)| chef_photo(i, name, today))
        .collect()
}

fn chef_photo(i: usize, name: &str, today: NaiveDate) -> Photo {
    let query = format!("{name} chef portrait");
    let since_year = 2017 + (i % 7) as i32;
    let since_month = (i % 9) as u32 + 1;

    Photo {
        id: format!("c-{:03}", i + 1),
        title: name.to_string(),
        date_taken: today.checked_sub_days(Days::new(i as u64)).unwrap_or(today),
        thumbnail_url: unsplash_url("800x600", &query, i * 2 + 1),
        full_image_url: Some(unsplash_url("1600x1200", &query, i * 2 + 2)),
        author: Author {
            name: name.to_string(),
            avatar_url: avatar_url(name),
            member_since: NaiveDate::from_ymd_opt(since_year, since_month, 1).unwrap_or(today),
            handle: handle_for(name),
        },
    }
}

/// Featured unsplash photo for a free-text search, pinned by `sig`
fn unsplash_url(size: &str, query: &str, sig: usize) -> String {
    let base = format!("{UNSPLASH_ENDPOINT}{size}/");
    match reqwest::Url::parse(&base) {
        Ok(mut url) => {
            url.query_pairs_mut()
                .append_key_only(query)
                .append_pair("sig", &sig.to_string());
            url.into()
        }
        Err(_) => base,
    }
}

/// "@" followed by the lowercase ASCII letters of the name
fn handle_for(name: &str) -> String {
    let letters: String = name
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    format!("@{letters}")
}
