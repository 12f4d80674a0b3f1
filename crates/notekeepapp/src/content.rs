//! Inline image markers.
//!
//! Images are not structured data: a note embeds a picture by carrying a
//! `![Image](<url>)` marker inside its content string, one per line. This
//! module keeps that convention in one place so the data model stays plain
//! text and only renderers need to care.

/// Extract the image URL from a single line, if the line carries a marker.
/// The first marker on the line wins.
pub fn image_url(line: &str) -> Option<&str> {
    const OPEN: &str = "![Image](";
    let start = line.find(OPEN)? + OPEN.len();
    let end = line[start..].find(')')? + start;
    Some(&line[start..end])
}

/// All image URLs embedded in a content body, in line order.
pub fn extract_image_urls(content: &str) -> Vec<&str> {
    content.lines().filter_map(image_url).collect()
}

/// Append an image marker on its own line, the way the composer UI does.
pub fn append_image(content: &str, url: &str) -> String {
    format!("{}\n![Image]({})", content, url)
}
