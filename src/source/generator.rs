use std::ops::Range;

use chrono::{Days, NaiveDate, Utc};

use super::avatar_url;
use crate::state::data::{Author, Photo};

/// First counter value of a fresh session
pub const DEFAULT_SEED: u64 = 1000;

const CHEF_NAMES: [&str; 20] = [
    "Gordon Ramsay", "Jamie Oliver", "Alain Ducasse", "Thomas Keller", "Heston Blumenthal",
    "Massimo Bottura", "Ferran Adrià", "René Redzepi", "Marco Pierre White", "Grant Achatz",
    "Paul Bocuse", "Dominique Crenn", "Mauro Colagreco", "Nobu Matsuhisa", "Clare Smyth",
    "José Andrés", "Enrique Olvera", "Virgilio Martínez", "Gaggan Anand", "Vikas Khanna",
];

/// Deterministic synthetic photos.
///
/// Every photo consumes one counter value `n`, which is both the id suffix
/// and the image `lock`, so the same counter always yields the same image.
/// Names repeat every 20 photos; the `#n` suffix keeps titles unique.
#[derive(Debug, Clone)]
pub struct Generator {
    counter: u64,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl Generator {
    pub fn new(seed: u64) -> Self {
        Self { counter: seed }
    }

    /// Counter value the next photo will use
    pub fn peek(&self) -> u64 {
        self.counter
    }

    /// Consume `n` counter values without generating photos
    pub fn reserve(&mut self, n: usize) -> Range<u64> {
        let start = self.counter;
        self.counter += n as u64;
        start..self.counter
    }

    /// Generate `n` photos dated relative to today
    pub fn batch(&mut self, n: usize) -> Vec<Photo> {
        self.batch_on(n, Utc::now().date_naive())
    }

    /// Generate `n` photos dated relative to `today`
    pub fn batch_on(&mut self, n: usize, today: NaiveDate) -> Vec<Photo> {
        self.reserve(n).map(|id| synthetic_photo(id, today)).collect()
    }
}

fn synthetic_photo(id: u64, today: NaiveDate) -> Photo {
    let name = format!("{} #{}", CHEF_NAMES[(id % CHEF_NAMES.len() as u64) as usize], id);
    let lock = id;

    Photo {
        id: format!("g-{id}"),
        date_taken: today.checked_sub_days(Days::new(lock)).unwrap_or(today),
        thumbnail_url: format!("https://loremflickr.com/800/600/chef,portrait,restaurant/all?lock={lock}"),
        full_image_url: Some(format!(
            "https://loremflickr.com/1600/1200/chef,portrait,restaurant/all?lock={lock}"
        )),
        author: Author {
            avatar_url: avatar_url(&name),
            member_since: NaiveDate::from_ymd_opt(2019, 1, 1).unwrap_or_default(),
            handle: format!("@chef{id}"),
            name: name.clone(),
        },
        title: name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batches_continue_the_counter() {
        let mut generator = Generator::new(DEFAULT_SEED);
        let first = generator.batch(30);
        let second = generator.batch(15);

        assert_eq!(first[0].id, "g-1000");
        assert_eq!(first[29].id, "g-1029");
        assert_eq!(second[0].id, "g-1030");
        assert_eq!(generator.peek(), 1045);
    }

    #[test]
    fn test_same_seed_same_photos() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let a = Generator::new(7).batch_on(5, today);
        let b = Generator::new(7).batch_on(5, today);
        assert_eq!(a, b);
    }

    #[test]
    fn test_photo_fields() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let photo = &Generator::new(1000).batch_on(1, today)[0];

        // 1000 % 20 == 0 -> first name in the roster
        assert_eq!(photo.title, "Gordon Ramsay #1000");
        assert_eq!(photo.author.name, photo.title);
        assert_eq!(photo.author.handle, "@chef1000");
        assert_eq!(photo.date_taken, today - Days::new(1000));
        assert!(photo.thumbnail_url.ends_with("lock=1000"));
        assert!(photo.display_url().starts_with("https://loremflickr.com/1600/1200/"));
        assert!(photo.author.avatar_url.starts_with("https://ui-avatars.com/api/?name=Gordon"));
    }

    #[test]
    fn test_names_repeat_but_titles_do_not() {
        let photos = Generator::new(0).batch(40);
        assert!(photos[0].title.starts_with("Gordon Ramsay"));
        assert!(photos[20].title.starts_with("Gordon Ramsay"));
        assert_ne!(photos[0].title, photos[20].title);
    }

    #[test]
    fn test_reserve_consumes_counter() {
        let mut generator = Generator::new(5);
        assert_eq!(generator.reserve(3), 5..8);
        assert_eq!(generator.batch(1)[0].id, "g-8");
    }
}
