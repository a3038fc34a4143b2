//! A small tokenizer for raw HTML embedded in markdown.
//!
//! Markdown allows inline and block HTML; the markdown parser hands it over as raw strings.
//! This tokenizer splits such strings into tags and text so they can become elements in
//! the document tree. It is deliberately forgiving: anything that does not look like a tag
//! is text.

/// Tags whose content is raw text and must not be tokenized.
pub(crate) const RAW_TEXT_TAGS: &[&str] = &["script", "style", "textarea", "title"];

/// Tags that never have children or a closing tag.
pub(crate) const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// A lexical unit of HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// Character data between tags.
    Text(&'a str),
    /// An opening tag.
    Start {
        /// Lowercase tag name.
        name: String,
        /// Attributes in source order, names lowercased and values entity-decoded.
        attrs: Vec<(String, String)>,
        /// Whether the tag ended with `/>`.
        self_closing: bool,
    },
    /// A closing tag.
    End {
        /// Lowercase tag name.
        name: String,
    },
    /// A comment, doctype or processing instruction; carries no content.
    Ignored,
}

/// Reads the next token from `input`.
///
/// Returns the token and the number of bytes consumed, or `None` when `input` is empty or
/// starts with a tag that is not yet complete (the caller should wait for more input).
pub(crate) fn next_token(input: &str) -> Option<(Token<'_>, usize)> {
    if input.is_empty() {
        return None;
    }
    if !input.starts_with('<') {
        let end = input.find('<').unwrap_or(input.len());
        return Some((Token::Text(&input[..end]), end));
    }

    if let Some(rest) = input.strip_prefix("<!--") {
        let close = rest.find("-->")?;
        return Some((Token::Ignored, 4 + close + 3));
    }
    if input.starts_with("<!") || input.starts_with("<?") {
        let close = input.find('>')?;
        return Some((Token::Ignored, close + 1));
    }

    let is_end = input.starts_with("</");
    let name_start = if is_end { 2 } else { 1 };
    let name_len = input[name_start..]
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(input.len() - name_start);
    if name_len == 0 || !input[name_start..].starts_with(|c: char| c.is_ascii_alphabetic()) {
        // A lone `<` is text.
        return Some((Token::Text(&input[..1]), 1));
    }
    let name = input[name_start..name_start + name_len].to_ascii_lowercase();
    let close = find_tag_end(input, name_start + name_len)?;

    if is_end {
        return Some((Token::End { name }, close + 1));
    }

    let inner = &input[name_start + name_len..close];
    let self_closing = inner.trim_end().ends_with('/');
    let attrs = parse_attrs(inner.trim_end().trim_end_matches('/'));
    Some((
        Token::Start {
            name,
            attrs,
            self_closing,
        },
        close + 1,
    ))
}

/// Finds the `>` that ends a tag, skipping over quoted attribute values.
fn find_tag_end(input: &str, from: usize) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in input[from..].char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return Some(from + i),
            (None, _) => {}
        }
    }
    None
}

/// Parses `name="value" name2 name3=value3` attribute syntax.
fn parse_attrs(input: &str) -> Vec<(String, String)> {
    let mut attrs = Vec::new();
    let mut rest = input.trim_start();

    while !rest.is_empty() {
        let name_end = rest
            .find(|c: char| c.is_whitespace() || c == '=')
            .unwrap_or(rest.len());
        let name = rest[..name_end].to_ascii_lowercase();
        rest = rest[name_end..].trim_start();

        let value = if let Some(after_eq) = rest.strip_prefix('=') {
            let after_eq = after_eq.trim_start();
            match after_eq.chars().next() {
                Some(q @ ('"' | '\'')) => {
                    let body = &after_eq[1..];
                    let end = body.find(q).unwrap_or(body.len());
                    rest = body.get(end + 1..).unwrap_or("");
                    decode_entities(&body[..end])
                }
                _ => {
                    let end = after_eq
                        .find(char::is_whitespace)
                        .unwrap_or(after_eq.len());
                    rest = &after_eq[end..];
                    decode_entities(&after_eq[..end])
                }
            }
        } else {
            String::new()
        };

        if !name.is_empty() {
            attrs.push((name, value));
        }
        rest = rest.trim_start();
    }
    attrs
}

/// Decodes the handful of character references that appear in hand-written HTML.
///
/// Unknown references are kept verbatim.
pub(crate) fn decode_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest.find(';').and_then(|semi| {
            let entity = &rest[1..semi];
            decode_entity(entity).map(|c| (c, semi + 1))
        });
        match decoded {
            Some((c, len)) => {
                out.push(c);
                rest = &rest[len..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Decodes a single entity body (without `&` and `;`).
fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let num = entity.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_until_tag() {
        assert_eq!(next_token("abc<b>"), Some((Token::Text("abc"), 3)));
    }

    #[test]
    fn test_start_tag_with_attrs() {
        let (token, len) = next_token(r#"<INPUT type="text" value='a b' disabled>rest"#).unwrap();
        assert_eq!(len, 40);
        assert_eq!(
            token,
            Token::Start {
                name: "input".into(),
                attrs: vec![
                    ("type".into(), "text".into()),
                    ("value".into(), "a b".into()),
                    ("disabled".into(), String::new()),
                ],
                self_closing: false,
            }
        );
    }

    #[test]
    fn test_self_closing_and_end() {
        let (token, _) = next_token("<br/>").unwrap();
        assert!(matches!(token, Token::Start { self_closing: true, .. }));
        let (token, len) = next_token("</div >").unwrap();
        assert_eq!(token, Token::End { name: "div".into() });
        assert_eq!(len, 7);
    }

    #[test]
    fn test_incomplete_tag_waits() {
        assert_eq!(next_token("<div class=\"a"), None);
        assert_eq!(next_token("<!-- open"), None);
    }

    #[test]
    fn test_lone_angle_is_text() {
        assert_eq!(next_token("< 3"), Some((Token::Text("<"), 1)));
    }

    #[test]
    fn test_comment_ignored() {
        assert_eq!(next_token("<!-- x -->y"), Some((Token::Ignored, 10)));
    }

    #[test]
    fn test_quoted_gt_inside_attribute() {
        let (token, len) = next_token(r#"<a title="x > y">"#).unwrap();
        assert_eq!(len, 17);
        assert!(matches!(token, Token::Start { .. }));
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &amp; b &lt;c&gt;"), "a & b <c>");
        assert_eq!(decode_entities("&#65;&#x42;"), "AB");
        assert_eq!(decode_entities("&bogus; & done"), "&bogus; & done");
    }
}
