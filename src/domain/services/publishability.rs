//! Publishability filter
//!
//! A document is publishable when it opens with a `---` header block that
//! contains `可发布: true` or `publish: true`. This is a line matcher, not a
//! YAML parser: nested structures and quoting are not interpreted.

/// Marker line that opens and closes the header block
pub const HEADER_MARKER: &str = "---";

/// Header keys that mark a document as publishable (synonyms)
pub const PUBLISH_KEYS: [&str; 2] = ["可发布", "publish"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Before the opening marker
    Outside,
    /// Between the opening and closing markers
    InsideHeader,
}

fn is_marker(line: &str) -> bool {
    line.trim_end() == HEADER_MARKER
}

/// Lines of the leading header block, or `None` if there is no closed block.
pub fn header_lines(content: &str) -> Option<Vec<&str>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut state = ScanState::Outside;
    let mut lines = Vec::new();

    for line in content.lines() {
        match state {
            ScanState::Outside => {
                if !is_marker(line) {
                    return None;
                }
                state = ScanState::InsideHeader;
            }
            ScanState::InsideHeader => {
                if is_marker(line) {
                    return Some(lines);
                }
                lines.push(line);
            }
        }
    }

    None
}

/// Match a `key : value` line against the publish keys.
fn is_publish_line(line: &str) -> bool {
    let Some((key, value)) = line.split_once(':') else {
        return false;
    };
    PUBLISH_KEYS.contains(&key.trim()) && value.trim() == "true"
}

/// Whether the document text marks itself publishable.
pub fn is_publishable(content: &str) -> bool {
    header_lines(content)
        .map(|lines| lines.into_iter().any(is_publish_line))
        .unwrap_or(false)
}
