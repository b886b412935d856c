// French stopword set for candidate filtering.
//
// The base list comes from the stop-words crate; a handful of
// crawl-specific noise words (cookie banners, navigation labels) are
// added on top because they dominate French business sites without
// carrying any SEO value.

use std::collections::HashSet;

use stop_words::{get, LANGUAGE};

/// Navigation and boilerplate words the standard list misses.
const CRAWL_NOISE: &[&str] = &[
    "accueil",
    "menu",
    "cookies",
    "copyright",
    "mentions",
    "newsletter",
    "cliquez",
    "ici",
    "savoir",
    "plus",
];

/// Build the full French stopword set.
pub fn french_stopwords() -> HashSet<String> {
    let mut words: HashSet<String> = get(LANGUAGE::French).into_iter().collect();
    for noise in CRAWL_NOISE {
        words.insert((*noise).to_string());
    }
    words
}
