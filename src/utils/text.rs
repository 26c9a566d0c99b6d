// src/utils/text.rs

//! Text normalization and filesystem naming helpers.

use sha2::{Digest, Sha256};
use unicode_normalization::UnicodeNormalization;

/// Normalize a page fragment line: NFKC, non-breaking spaces to plain
/// spaces, surrounding whitespace trimmed.
pub fn normalize_line(s: &str) -> String {
    s.nfkc()
        .collect::<String>()
        .replace('\u{a0}', " ")
        .trim()
        .to_string()
}

/// Reduce a display title to a filesystem-safe slug. Non-alphanumeric
/// runs collapse to a single underscore; output is capped at 60 chars.
pub fn slugify(s: &str) -> String {
    let mut out = String::new();
    let mut count = 0;
    let mut gap = false;
    for c in s.chars() {
        if count >= 60 {
            break;
        }
        if c.is_alphanumeric() {
            if gap && !out.is_empty() {
                out.push('_');
                count += 1;
                if count >= 60 {
                    break;
                }
            }
            gap = false;
            out.push(c);
            count += 1;
        } else {
            gap = true;
        }
    }
    if out.is_empty() {
        "untitled".to_string()
    } else {
        out
    }
}

/// Directory name for a scraped unit: title slug plus a short URL hash.
/// The hash keeps directories distinct when display titles collide.
pub fn dir_key(title: &str, url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    format!("{}-{}", slugify(title), hex::encode(&digest[..4]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_line_nbsp_and_trim() {
        assert_eq!(
            normalize_line("\u{a0}από user1\u{a0}Δευ Ιαν 01, 2024  "),
            "από user1 Δευ Ιαν 01, 2024"
        );
    }

    #[test]
    fn test_slugify_collapses_runs() {
        assert_eq!(slugify("News & Rumors!!"), "News_Rumors");
        assert_eq!(slugify("Γενική Συζήτηση"), "Γενική_Συζήτηση");
    }

    #[test]
    fn test_slugify_empty_title() {
        assert_eq!(slugify("***"), "untitled");
    }

    #[test]
    fn test_slugify_caps_length() {
        let long = "a".repeat(200);
        assert!(slugify(&long).chars().count() <= 60);
    }

    #[test]
    fn test_dir_key_distinguishes_duplicate_titles() {
        let a = dir_key("General", "https://example.com/f1-general");
        let b = dir_key("General", "https://example.com/f2-general");
        assert_ne!(a, b);
        assert!(a.starts_with("General-"));
    }

    #[test]
    fn test_dir_key_is_stable() {
        let a = dir_key("General", "https://example.com/f1-general");
        let b = dir_key("General", "https://example.com/f1-general");
        assert_eq!(a, b);
    }
}
