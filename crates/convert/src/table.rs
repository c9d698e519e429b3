//! Wikitext table blocks to pipe tables.

const TABLE_OPEN: &str = "{|";
const TABLE_CLOSE: &str = "|}";
const ROW_SEPARATOR: &str = "|-";
const CELL_MARKER: char = '|';
const INLINE_CELL_SEPARATOR: &str = "||";

/// Render one `{| … |}` block as a Markdown pipe table.
///
/// Only lines starting with `|` are treated as rows; the first row becomes
/// the header. Header cells written with `!` are not recognized and are
/// dropped along with any other line. A block without rows renders as an
/// empty string.
pub(crate) fn render_table(block: &str) -> String {
    let rows: Vec<Vec<&str>> = block
        .trim()
        .split('\n')
        .filter(|line| ![TABLE_OPEN, TABLE_CLOSE, ROW_SEPARATOR].iter().any(|marker| line.starts_with(*marker)))
        .filter_map(|line| line.strip_prefix(CELL_MARKER))
        .map(|line| line.split(INLINE_CELL_SEPARATOR).map(str::trim).collect())
        .collect();
    let Some((header, body)) = rows.split_first() else {
        return String::new();
    };
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format!("| {} |", header.join(" | ")));
    lines.push(format!("|{}", "---|".repeat(header.len())));
    for row in body {
        lines.push(format!("| {} |", row.join(" | ")));
    }
    lines.join("\n")
}
