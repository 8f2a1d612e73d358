use scraper::ElementRef;

/// Collapses every run of whitespace into a single space and trims both ends.
///
/// GSMArena cells carry newlines and tabs from nested inline markup; nothing
/// besides whitespace is touched.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text of `element` with each text node trimmed and joined by a single space,
/// so `<a>5G</a><br>LTE` reads `5G LTE` instead of `5GLTE`.
pub fn joined_text(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
