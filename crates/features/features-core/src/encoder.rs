//! Frozen categorical encoding.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Code of the bucket that collects unseen and absent values.
pub const UNKNOWN_CODE: u32 = 0;

/// Canonical form of a categorical value: trimmed and upper-cased.
/// Empty values are treated as absent.
pub fn normalize_category(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_uppercase())
}

/// Result of encoding one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoded {
    pub code: u32,
    /// False when the value landed in the unknown bucket.
    pub known: bool,
}

/// Category to code mapping, fitted once at training and then frozen.
///
/// Known categories get codes `1..=n` in sorted order; code
/// [`UNKNOWN_CODE`] is reserved for anything not seen during fitting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryEncoder {
    codes: BTreeMap<String, u32>,
}

impl CategoryEncoder {
    /// Fit the vocabulary from training values.
    pub fn fit<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let vocabulary: BTreeSet<String> =
            values.into_iter().filter_map(normalize_category).collect();
        let codes = vocabulary
            .into_iter()
            .zip(UNKNOWN_CODE + 1..)
            .collect();
        Self { codes }
    }

    pub fn encode(&self, value: Option<&str>) -> Encoded {
        match value
            .and_then(normalize_category)
            .and_then(|v| self.codes.get(&v).copied())
        {
            Some(code) => Encoded { code, known: true },
            None => Encoded {
                code: UNKNOWN_CODE,
                known: false,
            },
        }
    }

    pub fn code_of(&self, value: &str) -> Option<u32> {
        normalize_category(value).and_then(|v| self.codes.get(&v).copied())
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.codes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
