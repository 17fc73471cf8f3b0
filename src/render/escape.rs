//! Escaping for SVG and HTML output.
//!
//! Element names come from scraped recipe data and are embedded in text
//! nodes, `<title>` tooltips and attributes. Everything user-controllable
//! goes through one of these before it is written.

/// Escape a string for SVG/HTML text content.
///
/// # Examples
///
/// ```
/// use recipe_viz::render::escape::escape_text;
///
/// assert_eq!(escape_text("<script>alert('x')</script>"),
///     "&lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt;");
/// assert_eq!(escape_text("Mud"), "Mud");
/// ```
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape a string for an attribute value.
///
/// Stricter than [`escape_text`]: whitespace control characters are
/// encoded so they survive attribute normalisation.
///
/// ```
/// use recipe_viz::render::escape::escape_attr;
///
/// assert_eq!(escape_attr("a\"b\nc"), "a&quot;b&#10;c");
/// ```
pub fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            '\n' => result.push_str("&#10;"),
            '\r' => result.push_str("&#13;"),
            '\t' => result.push_str("&#9;"),
            _ => result.push(c),
        }
    }
    result
}
