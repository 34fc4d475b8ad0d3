use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref RE: Regex = Regex::new(r"\w{2,}").expect("valid regex");
}

/// Split text into search words: NFKC normalization, lowercase, then every
/// maximal run of word characters of length >= 2, in order of appearance.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = text.nfkc().collect::<String>().to_lowercase();
    RE.find_iter(&normalized).map(|m| m.as_str().to_string()).collect()
}

/// Distinct words of `text`.
pub fn distinct_words(text: &str) -> BTreeSet<String> {
    tokenize(text).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_tokenize() {
        let t = tokenize("JavaScript: The Definitive Guide, 7th Edition");
        assert_eq!(t, vec!["javascript", "the", "definitive", "guide", "7th", "edition"]);
    }

    #[test]
    fn single_characters_are_not_words() {
        assert!(tokenize("a #b  ").is_empty());
        assert_eq!(tokenize("a #definitive"), vec!["definitive"]);
    }
}
