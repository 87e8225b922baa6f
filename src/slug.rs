/*!
 * Slug normalization.
 *
 * Turns filenames, titles and raw route slugs into a canonical comparison
 * key. The same function is used on live routes and when deriving slugs from
 * catalog image paths, so both sides always agree.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Separator used between words of a normalized slug
pub const SEPARATOR: char = '-';

// Trailing image extension
static IMAGE_EXTENSION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.(?:jpe?g|png|webp|gif|svg)$").expect("Invalid image extension regex")
});

// Any run of characters that are neither letters nor digits
static NON_ALNUM_RUN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\p{L}\p{N}]+").expect("Invalid separator regex")
});

// One or more trailing "-<digits>" groups, applied after separators collapse
static NUMERIC_SUFFIX_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:-\p{N}+)+$").expect("Invalid numeric suffix regex")
});

/// Normalize a string into a comparison key
///
/// Lower-cases, drops a trailing image extension, collapses separator runs
/// into `-`, trims separators at both ends and drops trailing numeric
/// disambiguation suffixes such as `-2` or `_03`.
///
/// The result is idempotent: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(input: &str) -> String {
    let lowered = input.trim().to_lowercase();
    let without_extension = IMAGE_EXTENSION_REGEX.replace(&lowered, "");

    let separator = SEPARATOR.to_string();
    let collapsed = NON_ALNUM_RUN_REGEX.replace_all(&without_extension, separator.as_str());
    let trimmed = collapsed.trim_matches(SEPARATOR);

    NUMERIC_SUFFIX_REGEX.replace(trimmed, "").into_owned()
}

/// Derive a slug from an image path such as `/images/Drum_Lifting_Beam-2.webp`
///
/// Only the final path component is used.
pub fn slug_from_image_path(path: &str) -> String {
    let file_name = path
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(path);

    normalize(file_name)
}
