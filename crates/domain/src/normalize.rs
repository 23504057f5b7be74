//! String canonicalization shared by hierarchy keys and phrase fragments

use std::collections::HashMap;
use std::sync::RwLock;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Canonicalize a string for comparison
///
/// Lower-cases, decomposes (NFD), drops combining marks, drops anything that
/// is not alphanumeric, `_` or whitespace, then trims. Idempotent.
pub fn normalize(input: &str) -> String {
    let cleaned: String = input
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    cleaned.trim().to_string()
}

/// Memoizing normalizer
///
/// The cache is keyed by the exact input string and shared behind a
/// `RwLock`, so one instance can serve concurrent callers.
pub struct Normalizer {
    cache: Option<RwLock<HashMap<String, String>>>,
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            cache: Some(RwLock::new(HashMap::new())),
        }
    }

    /// A normalizer that recomputes every value
    pub fn uncached() -> Self {
        Self { cache: None }
    }

    pub fn normalize(&self, input: &str) -> String {
        let Some(cache) = &self.cache else {
            return normalize(input);
        };

        if let Ok(entries) = cache.read() {
            if let Some(hit) = entries.get(input) {
                return hit.clone();
            }
        }

        let normalized = normalize(input);
        if let Ok(mut entries) = cache.write() {
            entries.insert(input.to_string(), normalized.clone());
        }
        normalized
    }

    /// Number of memoized inputs (always 0 when uncached)
    pub fn cache_len(&self) -> usize {
        self.cache
            .as_ref()
            .and_then(|cache| cache.read().ok().map(|entries| entries.len()))
            .unwrap_or(0)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accents_case_and_punctuation() {
        assert_eq!(normalize("Tigres"), "tigres");
        assert_eq!(normalize("TIGRES"), "tigres");
        assert_eq!(normalize("tígrès"), "tigres");
        assert_eq!(normalize("  Pássaros!  "), "passaros");
        assert_eq!(normalize("coração, ação."), "coracao acao");
        assert_eq!(normalize("snake_case"), "snake_case");
    }

    #[test]
    fn test_pure_punctuation_becomes_empty() {
        assert_eq!(normalize("!!!"), "");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" ... "), "");
    }

    #[test]
    fn test_inner_whitespace_is_kept() {
        assert_eq!(normalize("Animais Marinhos"), "animais marinhos");
        assert_eq!(normalize("a  b"), "a  b");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "Eu vi tigres e papagaios",
            "İstanbul",
            "Ωmega Kelvin \u{212A}",
            "ñandú, pingüino; façade",
            "  \u{00A0}spaced\u{2003}out  ",
            "日本語 テキスト",
            "e\u{0301}te\u{0301}",
            "!?",
        ];

        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_cache_never_changes_result() {
        let normalizer = Normalizer::new();

        let first = normalizer.normalize("Pássaro");
        let second = normalizer.normalize("Pássaro");
        assert_eq!(first, "passaro");
        assert_eq!(first, second);
        assert_eq!(normalizer.cache_len(), 1);

        normalizer.normalize("passaro");
        assert_eq!(normalizer.cache_len(), 2);
    }

    #[test]
    fn test_uncached_matches_cached() {
        let cached = Normalizer::new();
        let uncached = Normalizer::uncached();

        for input in ["Tigres", "PAPAGAIOS!", "animais  marinhos "] {
            assert_eq!(cached.normalize(input), uncached.normalize(input));
        }
        assert_eq!(uncached.cache_len(), 0);
    }

    #[test]
    fn test_shared_across_threads() {
        let normalizer = Normalizer::new();

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    assert_eq!(normalizer.normalize("Àrvore"), "arvore");
                });
            }
        });

        assert_eq!(normalizer.cache_len(), 1);
    }
}
