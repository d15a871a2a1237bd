use fnv::FnvHasher;
use std::hash::Hasher;
use std::ops::Range;
use tracing::debug;

/// Computes a 6-character hex fingerprint of a whole document using FNV.
pub fn fingerprint(content: &str) -> String {
    let mut hasher = FnvHasher::default();
    hasher.write(content.as_bytes());
    format!("{:06x}", hasher.finish() & 0xFFFFFF)
}

pub fn section_header(name: &str) -> String {
    format!("[{}]", name)
}

/// Splits a document into lines, each keeping its own terminator.
fn split_lines(content: &str) -> Vec<&str> {
    content.split_inclusive('\n').collect()
}

fn is_header_line(line: &str) -> bool {
    line.starts_with('[')
}

/// Finds the first section introduced by `header`.
///
/// The range starts at the header line and stops before the next line opening
/// a table (`[` in column one) or at the end of the document.
pub fn locate_section(lines: &[&str], header: &str) -> Option<Range<usize>> {
    let start = lines.iter().position(|line| line.trim_end() == header)?;
    let end = lines[start + 1..]
        .iter()
        .position(|line| is_header_line(line))
        .map(|offset| start + 1 + offset)
        .unwrap_or(lines.len());
    Some(start..end)
}

/// Returns the text of the first section introduced by `header`, if any.
pub fn extract_section(content: &str, header: &str) -> Option<String> {
    let lines = split_lines(content);
    let range = locate_section(&lines, header)?;
    Some(lines[range].concat())
}

/// Merges `snippet` into `content`.
///
/// The snippet's first line is its header. The first section with that header is
/// replaced up to the next table header, blank lines included; otherwise the
/// snippet is appended after one blank line. The result always ends with exactly
/// one newline.
pub fn merge_section(content: &str, snippet: &str) -> String {
    let snippet = snippet.trim();
    let header = snippet.lines().next().unwrap_or_default().trim_end();
    let lines = split_lines(content);

    let merged = match locate_section(&lines, header) {
        Some(range) => {
            debug!(header, start = range.start + 1, end = range.end, "replacing section");
            let mut out = lines[..range.start].concat();
            out.push_str(snippet);
            out.push('\n');
            out.push_str(&lines[range.end..].concat());
            out
        }
        None => {
            debug!(header, "section not found, appending");
            let prefix = content.trim_end();
            if prefix.is_empty() {
                snippet.to_string()
            } else {
                format!("{}\n\n{}", prefix, snippet)
            }
        }
    };

    let mut result = merged.trim_end().to_string();
    result.push('\n');
    result
}
