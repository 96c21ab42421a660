//! Slug generation for catalog entries.

/// Maximum slug length in characters.
pub const MAX_SLUG_LEN: usize = 80;

/// Length of the random token used when no slug can be derived.
pub const FALLBACK_TOKEN_LEN: usize = 8;

/// Derive a slug from free text, returning `None` when nothing survives.
///
/// Rules:
/// - Trim and lowercase
/// - Replace every run of characters outside `[a-z0-9]` with one hyphen
/// - Trim leading/trailing hyphens
/// - Truncate to [`MAX_SLUG_LEN`] characters
///
/// # Examples
///
/// ```
/// use clitpl_types::slug::try_slugify;
///
/// assert_eq!(try_slugify("My Bot").as_deref(), Some("my-bot"));
/// assert_eq!(try_slugify("  Über  Cool!! "), Some("ber-cool".to_string()));
/// assert_eq!(try_slugify("***"), None);
/// ```
pub fn try_slugify(input: &str) -> Option<String> {
    let lowered = input.trim().to_lowercase();

    let mut result = String::with_capacity(lowered.len());
    let mut prev_was_hyphen = true; // treat start as hyphen to trim leading
    for c in lowered.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            result.push(c);
            prev_was_hyphen = false;
        } else if !prev_was_hyphen {
            result.push('-');
            prev_was_hyphen = true;
        }
    }

    // Output is pure ASCII, so byte truncation is char truncation.
    result.truncate(MAX_SLUG_LEN);
    while result.ends_with('-') {
        result.pop();
    }

    if result.is_empty() { None } else { Some(result) }
}

/// Derive a slug, falling back to a random token for degenerate input.
///
/// Always returns a non-empty slug. Empty, whitespace-only, or entirely
/// non-alphanumeric input yields a random [`FALLBACK_TOKEN_LEN`]-character
/// lowercase hex token, so the result is not reproducible in that case.
pub fn slugify(input: &str) -> String {
    try_slugify(input).unwrap_or_else(fallback_token)
}

/// Random lowercase hex token of [`FALLBACK_TOKEN_LEN`] characters.
pub fn fallback_token() -> String {
    let mut token = uuid::Uuid::new_v4().simple().to_string();
    token.truncate(FALLBACK_TOKEN_LEN);
    token
}
