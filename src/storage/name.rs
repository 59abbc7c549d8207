//! # Name Policy
//!
//! Validation and collision handling for logical file names. Names are
//! stored as-is (URL-unsafe characters are escaped only at URL-generation
//! time) and truncated, never rejected, when too long.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Maximum length of a stored file name, in characters
pub const MAX_NAME_LENGTH: usize = 255;

/// Length of the random collision suffix
const SUFFIX_LENGTH: usize = 7;

/// Truncate a requested name to [`MAX_NAME_LENGTH`] characters.
///
/// Over-length names are silently corrected, not rejected.
pub fn valid_name(name: &str) -> String {
    name.chars().take(MAX_NAME_LENGTH).collect()
}

/// Derive an alternative name by inserting `_<suffix>` before the final
/// path segment's extension.
///
/// The extension is preserved; when the result would exceed
/// [`MAX_NAME_LENGTH`] the stem is trimmed so suffix and extension survive.
pub fn alternative_name(name: &str, suffix: &str) -> String {
    let (stem, ext) = split_extension(name);
    let overhead = 1 + suffix.chars().count() + ext.chars().count();
    let budget = MAX_NAME_LENGTH.saturating_sub(overhead);
    let stem: String = stem.chars().take(budget).collect();
    format!("{}_{}{}", stem, suffix, ext)
}

/// Generate a random 7-character alphanumeric collision suffix.
pub fn random_suffix() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LENGTH)
        .map(char::from)
        .collect()
}

/// Split a name into stem and extension of its final path segment.
///
/// A leading dot in the final segment marks a hidden file, not an
/// extension; dots in earlier segments are ignored.
fn split_extension(name: &str) -> (&str, &str) {
    let segment_start = name.rfind('/').map(|i| i + 1).unwrap_or(0);
    let segment = &name[segment_start..];
    match segment.rfind('.') {
        Some(i) if i > 0 => name.split_at(segment_start + i),
        _ => (name, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_name_short_unchanged() {
        assert_eq!(valid_name("test.file"), "test.file");
    }

    #[test]
    fn test_valid_name_truncates_to_255() {
        let name = "test".repeat(100);
        let valid = valid_name(&name);
        assert_eq!(valid, name[..255]);
        assert_eq!(valid.chars().count(), 255);
    }

    #[test]
    fn test_valid_name_counts_characters_not_bytes() {
        let name = "é".repeat(300);
        assert_eq!(valid_name(&name).chars().count(), 255);
    }

    #[test]
    fn test_alternative_name_before_extension() {
        assert_eq!(alternative_name("test.file", "abc1234"), "test_abc1234.file");
    }

    #[test]
    fn test_alternative_name_no_extension() {
        assert_eq!(alternative_name("report", "abc1234"), "report_abc1234");
    }

    #[test]
    fn test_alternative_name_only_last_segment_extension() {
        // The dot in the directory is not an extension
        assert_eq!(
            alternative_name("dir.v1/report", "abc1234"),
            "dir.v1/report_abc1234"
        );
    }

    #[test]
    fn test_alternative_name_hidden_file() {
        assert_eq!(alternative_name(".bashrc", "abc1234"), ".bashrc_abc1234");
    }

    #[test]
    fn test_alternative_name_multi_dot() {
        assert_eq!(alternative_name("a.tar.gz", "abc1234"), "a.tar_abc1234.gz");
    }

    #[test]
    fn test_alternative_name_respects_max_length() {
        let name = format!("{}.file", "x".repeat(300));
        let alt = alternative_name(&name, "abc1234");
        assert!(alt.chars().count() <= MAX_NAME_LENGTH);
        assert!(alt.ends_with("_abc1234.file"));
    }

    #[test]
    fn test_random_suffix_shape() {
        let suffix = random_suffix();
        assert_eq!(suffix.len(), 7);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
        // Two draws colliding would be a broken generator
        assert_ne!(random_suffix(), suffix);
    }
}
