//! Name collation for pt-BR listings.
//!
//! Names compare on their base letters first, then on diacritics
//! (unaccented before accented), then on case (lowercase before
//! uppercase), so `"Álvaro"` sorts next to `"Alvaro"` instead of after
//! `"Zeca"`.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Multi-level sort key for a name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    base: Vec<char>,
    accents: Vec<Vec<char>>,
    uppercase: Vec<bool>,
}

impl CollationKey {
    pub fn new(s: &str) -> Self {
        let mut key = Self {
            base: Vec::with_capacity(s.len()),
            accents: Vec::with_capacity(s.len()),
            uppercase: Vec::with_capacity(s.len()),
        };
        for c in s.nfd() {
            if is_combining_mark(c)
                && let Some(marks) = key.accents.last_mut()
            {
                marks.push(c);
                continue;
            }
            // One slot per lowercase char keeps the three levels aligned
            for lower in c.to_lowercase() {
                key.base.push(lower);
                key.accents.push(Vec::new());
                key.uppercase.push(c.is_uppercase());
            }
        }
        key
    }
}

/// Compares two names with pt-BR style collation.
pub fn compare(a: &str, b: &str) -> Ordering {
    CollationKey::new(a).cmp(&CollationKey::new(b))
}

/// Sorts items by a name field without reordering equal names.
pub fn sort_by_name<T>(items: &mut [T], name: impl Fn(&T) -> &str) {
    items.sort_by_cached_key(|item| CollationKey::new(name(item)));
}
