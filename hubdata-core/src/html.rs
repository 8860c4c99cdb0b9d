//! HTML table extraction into a [`RawTable`].
//!
//! The EIA history pages are simple, server-rendered markup, so a small
//! case-insensitive tag scanner is enough: locate the `<table>` by its
//! `summary` attribute, take the header from the first row with `<th>` cells
//! and data from every row with `<td>` cells.

use tracing::debug;

use crate::error::HubError;
use crate::table::RawTable;

/// `summary` attribute of the spot-price table on every period's page.
pub const DEFAULT_TABLE_SUMMARY: &str =
    "Henry Hub Natural Gas Spot Price (Dollars per Million Btu)";

/// Extract the table whose `summary` attribute equals `summary`.
///
/// Cells are entity-decoded, stripped of nested tags and whitespace-collapsed.
/// Empty cells are null, short rows are padded, and rows with no non-null
/// cell are dropped.
pub fn extract_table(html: &str, summary: &str) -> Result<RawTable, HubError> {
    let table_html = find_table(html, summary)
        .ok_or_else(|| HubError::Parse(format!("no table with summary \"{summary}\"")))?;

    let mut columns: Option<Vec<String>> = None;
    let mut data_rows: Vec<Vec<Option<String>>> = Vec::new();

    for tr_block in TagScanner::new(inner_after_open_tag(table_html)).elements("tr") {
        let headers = cells(tr_block, "th");
        if columns.is_none() && !headers.is_empty() {
            columns = Some(headers.into_iter().map(Option::unwrap_or_default).collect());
            continue;
        }

        let row = cells(tr_block, "td");
        if row.iter().any(Option::is_some) {
            data_rows.push(row);
        }
    }

    let columns =
        columns.ok_or_else(|| HubError::Parse(format!("table \"{summary}\" has no header row")))?;

    let mut table = RawTable::new(columns);
    for row in data_rows {
        table.push_row(row);
    }
    debug!(
        columns = ?table.columns,
        rows = table.len(),
        "extracted table"
    );
    Ok(table)
}

/// Slice of `html` from the `<table` whose summary matches to its own closing
/// tag. Tables are checked at any nesting depth.
fn find_table<'a>(html: &'a str, summary: &str) -> Option<&'a str> {
    let wanted = to_lower(summary);
    let scanner = TagScanner::new(html);
    let mut pos = 0usize;
    while let Some(start) = scanner.find_open("table", pos) {
        let open_end = html[start..].find('>')? + start;
        let matches = attribute_ci(&html[start..open_end], "summary")
            .is_some_and(|v| to_lower(&v) == wanted);
        if matches {
            let end = scanner.element_end("table", start)?;
            return Some(&html[start..end]);
        }
        pos = open_end;
    }
    None
}

/// Inner text of every `name` cell directly in a row; empty cells are `None`.
fn cells(row: &str, name: &str) -> Vec<Option<String>> {
    TagScanner::new(inner_after_open_tag(row))
        .elements(name)
        .into_iter()
        .map(|block| {
            let text = strip_tags(&normalize_entities(inner_after_open_tag(block)));
            (!text.is_empty()).then_some(text)
        })
        .collect()
}

/// Value of `name=` inside an opening tag, quoted or bare.
fn attribute_ci(open_tag: &str, name: &str) -> Option<String> {
    let lc = to_lower(open_tag);
    let key = format!("{}=", to_lower(name));
    let mut from = 0usize;
    let at = loop {
        let idx = lc[from..].find(&key)? + from;
        let boundary = idx == 0 || lc.as_bytes()[idx - 1].is_ascii_whitespace();
        if boundary {
            break idx + key.len();
        }
        from = idx + key.len();
    };

    let rest = &open_tag[at..];
    match rest.chars().next()? {
        q @ ('"' | '\'') => {
            let body = &rest[1..];
            let end = body.find(q)?;
            Some(body[..end].to_string())
        }
        _ => {
            let end = rest
                .find(|c: char| c.is_ascii_whitespace() || c == '>')
                .unwrap_or(rest.len());
            Some(rest[..end].to_string())
        }
    }
}

/// Case-insensitive scanner over one HTML fragment.
///
/// The lowercased copy is made once; ASCII lowercasing keeps its byte
/// offsets aligned with the source.
struct TagScanner<'a> {
    src: &'a str,
    lc: String,
}

impl<'a> TagScanner<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            lc: to_lower(src),
        }
    }

    /// Offset of the next `<name` opening tag at or after `from`.
    /// `<th` does not match `<thead`.
    fn find_open(&self, name: &str, from: usize) -> Option<usize> {
        self.find_tag(&format!("<{name}"), from)
    }

    fn find_close(&self, name: &str, from: usize) -> Option<usize> {
        self.find_tag(&format!("</{name}"), from)
    }

    fn find_tag(&self, prefix: &str, from: usize) -> Option<usize> {
        let mut pos = from;
        loop {
            let at = self.lc.get(pos..)?.find(prefix)? + pos;
            let after = at + prefix.len();
            match self.lc.as_bytes().get(after) {
                Some(b) if *b == b'>' || *b == b'/' || b.is_ascii_whitespace() => return Some(at),
                Some(_) => pos = after,
                None => return None,
            }
        }
    }

    /// Offset just past the `</name>` closing the element opened at `start`,
    /// counting nested elements of the same name.
    fn element_end(&self, name: &str, start: usize) -> Option<usize> {
        let mut depth = 0usize;
        let mut pos = start;
        loop {
            let close = self.find_close(name, pos)?;
            match self.find_open(name, pos) {
                Some(open) if open < close => {
                    depth += 1;
                    pos = open + 1;
                }
                _ => {
                    let end = self.src[close..].find('>')? + close + 1;
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some(end);
                    }
                    pos = end;
                }
            }
        }
    }

    /// Every outermost `name` element, in document order. Elements inside a
    /// nested `<table>` are skipped.
    fn elements(&self, name: &str) -> Vec<&'a str> {
        let mut out = Vec::new();
        let mut pos = 0usize;
        while let Some(start) = self.find_open(name, pos) {
            if let Some(table) = self.find_open("table", pos).filter(|&t| t < start) {
                match self.element_end("table", table) {
                    Some(end) => {
                        pos = end;
                        continue;
                    }
                    None => break,
                }
            }
            let Some(end) = self.element_end(name, start) else {
                break;
            };
            out.push(&self.src[start..end]);
            pos = end;
        }
        out
    }
}

/// `<td ...>INNER</td>` -> `INNER` (may still contain nested tags).
fn inner_after_open_tag(block: &str) -> &str {
    match (block.find('>'), block.rfind('<')) {
        (Some(open_end), Some(close_start)) if close_start > open_end => {
            &block[open_end + 1..close_start]
        }
        _ => "",
    }
}

/// Remove all `<...>` tags, then collapse whitespace.
fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&out)
}

fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Collapse whitespace runs into one space and trim.
fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// ASCII-only lowercasing; keeps byte offsets aligned with the input.
fn to_lower(s: &str) -> String {
    s.to_ascii_lowercase()
}
