//! Dosage and frequency extraction
//!
//! Both extractors return the matched attribute plus the fragment with the
//! matched text stripped out, so the remainder can serve as the item name.

use once_cell::sync::Lazy;
use regex::Regex;

/// Unit-suffixed numbers, tried in order. The first hit is the dosage.
static DOSAGE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\b\d+(?:\.\d+)?\s*mg\b",
        r"(?i)\b\d+(?:\.\d+)?\s*ml\b",
        r"(?i)\b\d+(?:\.\d+)?\s*g\b",
        r"(?i)\b\d+(?:\.\d+)?\s*iu\b",
        r"(?i)\b\d+(?:\.\d+)?\s*mcg\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("dosage pattern is valid"))
    .collect()
});

/// Frequency and duration patterns. Every match of every pattern is kept.
static FREQUENCY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // day-fraction counts: 5/7, 2/52
        r"\b\d+/\d+\b",
        r"(?i)\b(?:od|bd|bid|tds|tid|qds|qid|nocte|mane|prn|daily)\b",
        r"(?i)\bstat\b",
        r"(?i)\b\d+\s*(?:hrly|hourly)\b",
        r"(?i)\b(?:for\s+)?\d+\s*days?\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("frequency pattern is valid"))
    .collect()
});

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DosageExtraction {
    pub dosage: Option<String>,
    pub clean_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyExtraction {
    pub duration: Option<String>,
    pub clean_name: String,
}

/// Pulls the first dosage (mg, ml, g, IU, mcg) out of `text`.
///
/// Without a match the text comes back unchanged as `clean_name`.
pub fn extract_dosage(text: &str) -> DosageExtraction {
    for pattern in DOSAGE_PATTERNS.iter() {
        if let Some(m) = pattern.find(text) {
            let mut stripped = String::with_capacity(text.len());
            stripped.push_str(&text[..m.start()]);
            stripped.push(' ');
            stripped.push_str(&text[m.end()..]);
            return DosageExtraction {
                dosage: Some(m.as_str().to_string()),
                clean_name: collapse_whitespace(&stripped),
            };
        }
    }

    DosageExtraction {
        dosage: None,
        clean_name: text.to_string(),
    }
}

/// Collects all frequency and duration markers in `text`, comma-joined in
/// pattern order, and strips every one of them from the name.
pub fn extract_frequency(text: &str) -> FrequencyExtraction {
    let mut found = Vec::new();
    let mut clean = text.to_string();

    for pattern in FREQUENCY_PATTERNS.iter() {
        found.extend(pattern.find_iter(&clean).map(|m| m.as_str().trim().to_string()));
        clean = pattern.replace_all(&clean, " ").into_owned();
    }

    if found.is_empty() {
        return FrequencyExtraction {
            duration: None,
            clean_name: text.to_string(),
        };
    }

    FrequencyExtraction {
        duration: Some(found.join(", ")),
        clean_name: collapse_whitespace(&clean),
    }
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}
