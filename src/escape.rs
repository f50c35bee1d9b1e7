//! Markup escaping helpers
//!
//! Tag text never reaches a markup target verbatim. Display text is run
//! through [`encode_entities`], attribute values through [`escape_quotes`].

/// Upper bound (inclusive) of the code point range converted to numeric references.
const ENCODE_RANGE_END: u32 = 0x9999;
/// First code point above printable ASCII that is converted (no-break space).
const ENCODE_RANGE_START: u32 = 0x00A0;

/// Whether a character must be written as a numeric character reference
#[must_use]
pub const fn needs_encoding(c: char) -> bool {
    let cp = c as u32;
    matches!(c, '<' | '>' | '&' | '\'' | '"') || (cp >= ENCODE_RANGE_START && cp <= ENCODE_RANGE_END)
}

/// Convert `< > & ' "` and every code point in `U+00A0..=U+9999` into
/// decimal numeric character references (`&#60;`).
///
/// # Examples
///
/// ```
/// use taginput::escape::encode_entities;
///
/// assert_eq!(encode_entities("<b>"), "&#60;b&#62;");
/// assert_eq!(encode_entities("café"), "caf&#233;");
/// ```
#[must_use]
pub fn encode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if needs_encoding(c) {
            push_reference(&mut out, c);
        } else {
            out.push(c);
        }
    }
    out
}

/// Replace single and double quotes with numeric character references,
/// for values placed inside quoted attributes
#[must_use]
pub fn escape_quotes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\'' | '"') {
            push_reference(&mut out, c);
        } else {
            out.push(c);
        }
    }
    out
}

fn push_reference(out: &mut String, c: char) {
    out.push_str("&#");
    out.push_str(&(c as u32).to_string());
    out.push(';');
}
