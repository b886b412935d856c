// Normalization and tokenization for French page text.
//
// The accented set covers the characters French actually uses
// (àâäéèêëîïôöùûüÿçœæ). URLs and email-like runs are stripped before
// anything else so "contact@cabinet.fr" never leaks into candidates.
//
// These functions never fail: garbage in, empty token list out.

use std::sync::LazyLock;

use regex_lite::Regex;

/// Letters the tokenizer accepts, beyond ASCII a-z.
const FRENCH_ACCENTS: &str = "àâäéèêëîïôöùûüÿçœæ";

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:https?://|www\.)\S+").expect("valid URL pattern"));

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+").expect("valid email pattern"));

fn is_french_letter(c: char) -> bool {
    c.is_ascii_lowercase() || FRENCH_ACCENTS.contains(c)
}

/// Lowercase and clean raw page text.
///
/// Strips URLs and email-like substrings, keeps letters (accented set
/// included), digits, whitespace, apostrophes, and hyphens, replaces
/// everything else with a space, and collapses whitespace runs.
pub fn normalize_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let without_urls = URL_RE.replace_all(&lowered, " ");
    let without_emails = EMAIL_RE.replace_all(&without_urls, " ");

    let cleaned: String = without_emails
        .chars()
        .map(|c| {
            // Typographic apostrophes show up constantly in French copy
            if c == '\u{2019}' {
                '\''
            } else if is_french_letter(c)
                || c.is_ascii_digit()
                || c.is_whitespace()
                || c == '\''
                || c == '-'
            {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split normalized text into word tokens.
///
/// Tokens are maximal runs of letters. The apostrophe is not a letter,
/// so elision contractions split naturally: "l'avocat" yields "l" and
/// "avocat", and the single-letter article is then discarded along with
/// every other token of length <= 1.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = normalize_text(text);

    let mut tokens = Vec::new();
    let mut current = String::new();
    for c in normalized.chars() {
        if is_french_letter(c) {
            current.push(c);
        } else if !current.is_empty() {
            if current.chars().count() > 1 {
                tokens.push(std::mem::take(&mut current));
            } else {
                current.clear();
            }
        }
    }
    if current.chars().count() > 1 {
        tokens.push(current);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_urls_and_emails() {
        let text = "Contactez-nous sur https://cabinet-durand.fr ou contact@durand.fr !";
        let normalized = normalize_text(text);
        assert!(!normalized.contains("https"));
        assert!(!normalized.contains('@'));
        assert!(normalized.contains("contactez-nous"));
    }

    #[test]
    fn normalize_keeps_accents_and_collapses_whitespace() {
        let normalized = normalize_text("Gestion   de\t\tdossiers   juridiques éprouvée");
        assert_eq!(normalized, "gestion de dossiers juridiques éprouvée");
    }

    #[test]
    fn normalize_replaces_punctuation_with_spaces() {
        let normalized = normalize_text("logiciel, avocat; cabinet?");
        assert_eq!(normalized, "logiciel avocat cabinet");
    }

    #[test]
    fn tokenize_splits_elisions_and_drops_single_letters() {
        let tokens = tokenize("L'avocat d'affaires défend l'entreprise");
        assert_eq!(tokens, vec!["avocat", "affaires", "défend", "entreprise"]);
    }

    #[test]
    fn tokenize_empty_and_garbage_yield_nothing() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t\n  ").is_empty());
        assert!(tokenize("@@@ ### 123 !!!").is_empty());
    }

    #[test]
    fn tokenize_never_panics_on_adversarial_input() {
        let adversarial = "\u{0000}\u{FFFF}🔥🔥🔥 ï î \u{2019}\u{2019} -- '' a";
        let tokens = tokenize(adversarial);
        // Single accented letters are length-1 tokens and get dropped
        assert!(tokens.is_empty(), "got {tokens:?}");
    }
}
