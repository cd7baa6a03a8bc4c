//! Markup stripping for user-authored text.

use std::collections::HashSet;

/// Remove every tag and attribute from `input`, dropping the contents of
/// `script` and `style` elements entirely. Remaining text is HTML-escaped.
pub fn strip_markup(input: &str) -> String {
    ammonia::Builder::empty()
        .clean_content_tags(HashSet::from(["script", "style"]))
        .strip_comments(true)
        .clean(input)
        .to_string()
}

/// Trim, strip markup, and trim again.
///
/// The second trim catches whitespace that only becomes leading or
/// trailing once a tag is gone.
pub fn clean_text(input: &str) -> String {
    strip_markup(input.trim()).trim().to_string()
}
