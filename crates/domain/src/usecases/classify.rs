//! Phrase classification use case

use regex::Regex;
use std::collections::HashSet;

use crate::model::{Hierarchy, HierarchyNode, MatchTally};
use crate::normalize::Normalizer;

/// Number of consecutive words joined into one candidate fragment
pub const MAX_WORDS_TO_COMBINE: usize = 2;

/// Finds which categories are hit by the words of a phrase
pub struct PhraseClassifier<'a> {
    normalizer: &'a Normalizer,
    separator: Regex,
}

impl<'a> PhraseClassifier<'a> {
    pub fn new(normalizer: &'a Normalizer) -> Self {
        let separator = Regex::new(r"[\s,]+").expect("Valid regex");
        Self {
            normalizer,
            separator,
        }
    }

    /// Split on runs of whitespace and commas, normalizing each token
    ///
    /// Leading or trailing separators produce an empty token, which counts
    /// as a word but never matches.
    pub fn tokenize(&self, phrase: &str) -> Vec<String> {
        self.separator
            .split(phrase)
            .map(|token| self.normalizer.normalize(token))
            .collect()
    }

    /// Classify `phrase` against every node of `hierarchy` down to `max_depth`
    ///
    /// The root's categories sit at depth 1, so `max_depth == 0` visits
    /// nothing. Each fragment is credited at most once per exact normalized
    /// text; the search stops as soon as the number of credited fragments
    /// reaches the number of words.
    pub fn classify(&self, phrase: &str, hierarchy: &Hierarchy, max_depth: usize) -> MatchTally {
        let words = self.tokenize(phrase);
        let mut tally = MatchTally::new();
        let mut verified: HashSet<String> = HashSet::new();
        let mut stack: Vec<(&HierarchyNode, usize)> = vec![(hierarchy.root(), 1)];
        let mut nodes_visited = 0usize;
        let mut early_exit = false;

        'search: while let Some((node, depth)) = stack.pop() {
            if depth > max_depth {
                continue;
            }
            let entries = node.entries();
            if entries.is_empty() {
                continue;
            }
            nodes_visited += 1;

            let keys: Vec<String> = entries
                .iter()
                .map(|(key, _)| self.normalizer.normalize(key))
                .collect();

            if depth < max_depth {
                for (_, child) in entries.iter().rev() {
                    if !child.is_leaf() {
                        stack.push((child, depth + 1));
                    }
                }
            }

            for i in 0..words.len() {
                if verified.contains(&words[i]) {
                    continue;
                }

                let end = words.len().min(i + MAX_WORDS_TO_COMBINE);
                for j in (i + 1)..=end {
                    let fragment = self.normalizer.normalize(&words[i..j].join(" "));
                    if fragment.is_empty() || verified.contains(&fragment) {
                        continue;
                    }

                    for key in keys.iter().filter(|key| **key == fragment) {
                        tally.increment(key);
                        verified.insert(fragment.clone());

                        if verified.len() == words.len() {
                            early_exit = true;
                            break 'search;
                        }
                    }
                }
            }
        }

        tracing::debug!(
            words = words.len(),
            nodes_visited,
            matched = tally.len(),
            early_exit,
            "Classified phrase"
        );

        tally
    }
}
