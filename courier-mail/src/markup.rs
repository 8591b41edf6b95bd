//! Plain-text projection of rendered HTML.

/// Remove every `<...>` tag from `html`, keeping the text between tags.
///
/// This is a syntactic strip, not an HTML parser:
///
/// - an unmatched `<` drops the rest of the input;
/// - a `>` outside a tag is swallowed and changes nothing else;
/// - entities such as `&amp;` and whitespace are left as they are.
///
/// ```
/// use courier_mail::strip_markup;
///
/// assert_eq!(strip_markup("<p>Hello, <b>Jane</b>!</p>"), "Hello, Jane!");
/// ```
pub fn strip_markup(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }

    text
}
