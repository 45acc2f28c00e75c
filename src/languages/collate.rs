//! Locale-aware ordering for language names.
//!
//! Names are ordered by the Unicode root collation (CLDR), so "Čeština" sorts
//! with "C" and scripts follow the usual Latin, Greek, Cyrillic, Hebrew,
//! Arabic, Devanagari, Hangul, Han sequence. Should the collation data fail to
//! load, a case and Latin-diacritic fold is used instead.

use icu_collator::{Collator, CollatorOptions};
use std::cmp::Ordering;
use tracing::warn;

/// Fold a single lowercase character to its base letters.
fn fold_char(c: char, out: &mut String) {
    let base = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'ď' | 'đ' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'ĥ' | 'ħ' => 'h',
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => 'i',
        'ĵ' => 'j',
        'ķ' => 'k',
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => 'l',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => 'o',
        'ŕ' | 'ŗ' | 'ř' => 'r',
        'ś' | 'ŝ' | 'ş' | 'š' | 'ș' => 's',
        'ţ' | 'ť' | 'ŧ' | 'ț' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ŵ' => 'w',
        'ý' | 'ÿ' | 'ŷ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        'ß' => return out.push_str("ss"),
        'æ' => return out.push_str("ae"),
        'œ' => return out.push_str("oe"),
        'þ' => return out.push_str("th"),
        other => other,
    };
    out.push(base);
}

/// Primary collation key: lowercase with Latin diacritics removed.
pub fn collation_key(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars().flat_map(char::to_lowercase) {
        fold_char(c, &mut out);
    }
    out
}

/// Compare two names by their folded keys, then by the raw string.
pub fn fold_cmp(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// Comparator for native language names.
pub struct NameOrder {
    collator: Option<Collator>,
}

impl NameOrder {
    /// Root-locale collator with default strength.
    pub fn new() -> Self {
        let collator = match Collator::try_new(&Default::default(), CollatorOptions::new()) {
            Ok(c) => Some(c),
            Err(e) => {
                warn!("Root collation unavailable, folding diacritics instead: {}", e);
                None
            }
        };
        Self { collator }
    }

    /// Total order: collation first, raw code points on ties.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(c) => c.compare(a, b).then_with(|| a.cmp(b)),
            None => fold_cmp(a, b),
        }
    }
}

impl Default for NameOrder {
    fn default() -> Self {
        Self::new()
    }
}

/// Compare two names with a fresh [`NameOrder`]. Sorting many names should
/// build one `NameOrder` and reuse it.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    NameOrder::new().compare(a, b)
}
