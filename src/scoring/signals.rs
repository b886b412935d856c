// The four signal calculators — pure, stateless, and panic-free.
//
// Every function returns a value in [0.0, 1.0] and degrades to 0.0 on
// empty or degenerate input, whatever the caller throws at it. The
// vocabulary tables are fixed: the tool targets French legal-software
// sites, and the domain terms reflect that.

use std::collections::HashSet;

use crate::model::Page;
use crate::text::normalize::tokenize;

/// Vocabulary that marks a context window as on-topic.
const DOMAIN_POSITIVE: &[&str] = &[
    "avocat",
    "juridique",
    "cabinet",
    "droit",
    "logiciel",
    "gestion",
    "dossier",
    "client",
    "facturation",
    "juriste",
    "notaire",
    "contentieux",
    "plaidoirie",
    "honoraires",
];

/// Vocabulary that marks a context window as spammy.
const SPAM_INDICATORS: &[&str] = &[
    "gratuit",
    "cliquez",
    "promo",
    "promotion",
    "offre limitée",
    "gagnez",
    "casino",
    "crédit rapide",
];

/// Commercial search intent (weight 1.0).
const COMMERCIAL_TERMS: &[&str] = &[
    "acheter",
    "prix",
    "tarif",
    "devis",
    "abonnement",
    "logiciel",
    "solution",
    "meilleur",
    "comparatif",
    "essai",
];

/// Informational search intent (weight 0.7).
const INFORMATIONAL_TERMS: &[&str] = &[
    "comment",
    "pourquoi",
    "guide",
    "définition",
    "exemple",
    "conseil",
    "étape",
    "qu'est-ce",
];

/// Navigational search intent (weight 0.3).
const NAVIGATIONAL_TERMS: &[&str] = &["connexion", "login", "contact", "espace client", "site"];

// Micro-pattern vocabulary for the natural-flow check
const ARTICLES: &[&str] = &["le", "la", "les", "un", "une", "des", "du"];
const PREPOSITIONS: &[&str] = &["de", "du", "des", "pour", "avec", "sans", "en", "sur"];
const ADJECTIVES: &[&str] = &["meilleur", "meilleure", "bon", "bonne", "nouveau", "simple"];
const DOMAIN_NOUNS: &[&str] = &[
    "logiciel",
    "avocat",
    "cabinet",
    "gestion",
    "dossier",
    "droit",
    "juriste",
];

/// How well the keyword fits the site's actual content.
///
/// Per text: 0.5 × exact-substring match + 0.3 × token-overlap ratio
/// + 0.2 × context-window quality, averaged across all texts.
pub fn thematic_score(keyword: &str, content_texts: &[String]) -> f64 {
    let keyword = keyword.trim().to_lowercase();
    if keyword.is_empty() || content_texts.is_empty() {
        return 0.0;
    }

    let keyword_tokens: HashSet<String> = tokenize(&keyword).into_iter().collect();

    let total: f64 = content_texts
        .iter()
        .map(|text| {
            let lower = text.to_lowercase();
            let exact = if lower.contains(&keyword) { 1.0 } else { 0.0 };

            let overlap = if keyword_tokens.is_empty() {
                0.0
            } else {
                let text_tokens: HashSet<String> = tokenize(&lower).into_iter().collect();
                let shared = keyword_tokens.intersection(&text_tokens).count();
                shared as f64 / keyword_tokens.len() as f64
            };

            let context = context_window_score(&keyword, &lower);

            0.5 * exact + 0.3 * overlap + 0.2 * context
        })
        .sum();

    total / content_texts.len() as f64
}

/// Rate the ±50-character windows around each keyword occurrence.
///
/// Domain vocabulary in the window counts +0.2, spam indicators −0.3;
/// each window is clamped to [0, 1] and the windows are averaged.
fn context_window_score(keyword: &str, text_lower: &str) -> f64 {
    let chars: Vec<char> = text_lower.chars().collect();
    let kw_chars: Vec<char> = keyword.chars().collect();
    if kw_chars.is_empty() || chars.len() < kw_chars.len() {
        return 0.0;
    }

    let mut window_scores = Vec::new();
    for start in 0..=(chars.len() - kw_chars.len()) {
        if chars[start..start + kw_chars.len()] != kw_chars[..] {
            continue;
        }
        let lo = start.saturating_sub(50);
        let hi = (start + kw_chars.len() + 50).min(chars.len());
        let window: String = chars[lo..hi].iter().collect();

        let mut score: f64 = 0.0;
        for term in DOMAIN_POSITIVE {
            if window.contains(term) {
                score += 0.2;
            }
        }
        for term in SPAM_INDICATORS {
            if window.contains(term) {
                score -= 0.3;
            }
        }
        window_scores.push(score.clamp(0.0, 1.0));
    }

    if window_scores.is_empty() {
        0.0
    } else {
        window_scores.iter().sum::<f64>() / window_scores.len() as f64
    }
}

/// Search-intent strength, deliberately biased toward commercial intent.
///
/// Counts vocabulary hits per intent class (commercial 1.0,
/// informational 0.7, navigational 0.3), divides by 3 and caps at 1.0.
pub fn intent_score(keyword: &str) -> f64 {
    let keyword = keyword.trim().to_lowercase();
    if keyword.is_empty() {
        return 0.0;
    }

    let hits = |terms: &[&str]| terms.iter().filter(|t| keyword.contains(**t)).count() as f64;

    let weighted = hits(COMMERCIAL_TERMS) * 1.0
        + hits(INFORMATIONAL_TERMS) * 0.7
        + hits(NAVIGATIONAL_TERMS) * 0.3;

    (weighted / 3.0).min(1.0)
}

/// Fraction of pages whose internal mesh (anchors or h1/h2/h3 headings)
/// corroborates the keyword. First match per page wins.
pub fn mesh_evidence_score(keyword: &str, pages: &[Page]) -> f64 {
    let keyword = keyword.trim().to_lowercase();
    if keyword.is_empty() || pages.is_empty() {
        return 0.0;
    }

    let hit_pages = pages
        .iter()
        .filter(|page| {
            page.anchors
                .iter()
                .any(|a| a.text.to_lowercase().contains(&keyword))
                || page.h1.to_lowercase().contains(&keyword)
                || page.h2.iter().any(|h| h.to_lowercase().contains(&keyword))
                || page.h3.iter().any(|h| h.to_lowercase().contains(&keyword))
        })
        .count();

    hit_pages as f64 / pages.len() as f64
}

/// How readable the keyword is as a search phrase.
///
/// Additive composite: length (0.3), word count (up to 0.3), natural
/// flow against French micro-patterns (0.2), clean characters (0.2).
pub fn readability_score(keyword: &str) -> f64 {
    let keyword = keyword.trim().to_lowercase();
    if keyword.is_empty() {
        return 0.0;
    }

    let char_count = keyword.chars().count();
    let length_term = if char_count <= 30 {
        0.3
    } else {
        // Linear decay: zero credit at 60 characters
        (0.3 * (1.0 - (char_count as f64 - 30.0) / 30.0)).max(0.0)
    };

    let words: Vec<&str> = keyword.split_whitespace().collect();
    let word_term = match words.len() {
        0 => 0.0,
        1 => 0.2,
        2..=4 => 0.3,
        _ => 0.1,
    };

    let flow_term = if has_natural_flow(&words) { 0.2 } else { 0.0 };

    let clean = keyword.chars().all(|c| {
        c.is_ascii_lowercase()
            || "àâäéèêëîïôöùûüÿçœæ".contains(c)
            || c == ' '
            || c == '\''
            || c == '-'
    });
    let clean_term = if clean { 0.2 } else { 0.0 };

    (length_term + word_term + flow_term + clean_term).min(1.0)
}

/// Check the keyword against a few French syntactic micro-patterns:
/// article + noun, preposition + noun, adjective + domain noun.
///
/// Keywords that contain none of the trigger words pass by default; a
/// trigger word left dangling (e.g. a phrase ending in "de") fails.
fn has_natural_flow(words: &[&str]) -> bool {
    let mut saw_trigger = false;

    for (i, word) in words.iter().enumerate() {
        let next = words.get(i + 1);

        if ARTICLES.contains(word) || PREPOSITIONS.contains(word) {
            saw_trigger = true;
            if next.is_some() {
                return true;
            }
        } else if ADJECTIVES.contains(word) {
            saw_trigger = true;
            if let Some(next) = next {
                if DOMAIN_NOUNS.contains(next) {
                    return true;
                }
            }
        }
    }

    !saw_trigger
}
