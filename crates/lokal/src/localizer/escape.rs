use std::borrow::Cow;

/// HTML-escape `text`.
///
/// Replaces `<`, `>`, `"` and `'` with `&lt;`, `&gt;`, `&quot;` and `&#39;`,
/// and `&` with `&amp;` unless it already starts an entity reference such
/// as `&quot;` or `&#123;`. Existing entities are therefore never escaped
/// twice. Returns the input unchanged (borrowed) when nothing needs escaping.
///
/// # Example
///
/// ```
/// use lokal::escape_html;
///
/// assert_eq!(escape_html("<div>&quot;</div>"), "&lt;div&gt;&quot;&lt;/div&gt;");
/// assert_eq!(escape_html("Tom & Jerry"), "Tom &amp; Jerry");
/// ```
pub fn escape_html(text: &str) -> Cow<'_, str> {
    let mut escaped: Option<String> = None;

    for (index, c) in text.char_indices() {
        let replacement = match c {
            '&' if !starts_entity(&text[index + 1..]) => Some("&amp;"),
            '<' => Some("&lt;"),
            '>' => Some("&gt;"),
            '"' => Some("&quot;"),
            '\'' => Some("&#39;"),
            _ => None,
        };

        match replacement {
            Some(entity) => escaped
                .get_or_insert_with(|| {
                    let mut out = String::with_capacity(text.len() + 16);
                    out.push_str(&text[..index]);
                    out
                })
                .push_str(entity),
            None => {
                if let Some(out) = escaped.as_mut() {
                    out.push(c);
                }
            }
        }
    }

    escaped.map_or(Cow::Borrowed(text), Cow::Owned)
}

/// Whether `rest` (the text after an `&`) is `[#A-Za-z0-9]+;...`.
fn starts_entity(rest: &str) -> bool {
    let name_len = rest
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'#')
        .count();
    name_len > 0 && rest.as_bytes().get(name_len) == Some(&b';')
}
