//! Plain-text line wrapping.

use std::borrow::Cow;

/// Wrap each line of `text` at `width` characters.
///
/// Lines are broken greedily at whitespace; words longer than `width` stay
/// whole on their own line. Lines that already fit are kept verbatim, as is
/// the whole text when `width` is `None`.
///
/// ```
/// use mailtpl_renderer::wrap_text;
///
/// assert_eq!(wrap_text("one two three", Some(8)), "one two\nthree");
/// assert_eq!(wrap_text("one two three", None), "one two three");
/// ```
#[must_use]
pub fn wrap_text(text: &str, width: Option<usize>) -> Cow<'_, str> {
    let Some(width) = width.filter(|w| *w > 0) else {
        return Cow::Borrowed(text);
    };
    if text.lines().all(|line| line.chars().count() <= width) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + text.len() / width);
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if line.chars().count() <= width {
            out.push_str(line);
            continue;
        }
        let mut current = 0;
        for word in line.split_whitespace() {
            let len = word.chars().count();
            if current > 0 && current + 1 + len > width {
                out.push('\n');
                current = 0;
            } else if current > 0 {
                out.push(' ');
                current += 1;
            }
            out.push_str(word);
            current += len;
        }
    }
    Cow::Owned(out)
}
