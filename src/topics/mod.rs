// Topic discovery — tiered strategies with shared labeling helpers.

pub mod clustering;
pub mod frequency;
pub mod lexical;
pub mod modeler;
pub mod traits;

use std::collections::HashMap;

use crate::text::normalize::tokenize;

/// Most a topic carries in its representative-term list.
pub const MAX_TOPIC_TERMS: usize = 10;

/// Count token frequencies in a blob of text, keeping tokens of at
/// least `min_len` characters that occur at least `min_freq` times.
/// Returns up to `top` terms, most frequent first (ties alphabetical
/// for determinism).
pub(crate) fn frequent_terms(text: &str, min_len: usize, min_freq: usize, top: usize) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for token in tokenize(text) {
        if token.chars().count() >= min_len {
            *counts.entry(token).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .filter(|(_, c)| *c >= min_freq)
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    ranked.into_iter().take(top).map(|(t, _)| t).collect()
}

/// Title-case the top three terms and join them with " & ".
pub(crate) fn make_label(terms: &[String]) -> String {
    terms
        .iter()
        .take(3)
        .map(|t| title_case(t))
        .collect::<Vec<_>>()
        .join(" & ")
}

fn title_case(term: &str) -> String {
    term.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequent_terms_orders_by_count_then_alpha() {
        let text = "avocat avocat avocat cabinet cabinet juridique juridique logiciel";
        let terms = frequent_terms(text, 3, 2, 10);
        assert_eq!(terms, vec!["avocat", "cabinet", "juridique"]);
    }

    #[test]
    fn frequent_terms_respects_min_len_and_freq() {
        let text = "loi loi due due avocat";
        // "due" meets freq but the min length is 4; "avocat" is long
        // enough but occurs once
        assert!(frequent_terms(text, 4, 2, 10).is_empty());
    }

    #[test]
    fn label_joins_top_three_title_cased() {
        let terms = vec![
            "gestion".to_string(),
            "cabinet".to_string(),
            "avocat".to_string(),
            "dossier".to_string(),
        ];
        assert_eq!(make_label(&terms), "Gestion & Cabinet & Avocat");
    }

    #[test]
    fn label_handles_fewer_than_three_terms() {
        assert_eq!(make_label(&["droit".to_string()]), "Droit");
        assert_eq!(make_label(&[]), "");
    }

    #[test]
    fn title_case_handles_accented_initials() {
        assert_eq!(title_case("étude juridique"), "Étude Juridique");
    }
}
