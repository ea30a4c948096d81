//! Markdown serializer for [`Document`].

use crate::docs::document::{Block, Document, Inline, LinkTarget, Table};
use std::fmt::Write;

pub fn to_markdown(document: &Document) -> String {
    let mut out = String::new();
    for (i, block) in document.blocks.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        write_block(&mut out, block);
    }
    out
}

fn write_block(out: &mut String, block: &Block) {
    match block {
        Block::Heading {
            level,
            text,
            anchor,
        } => {
            out.push_str(&"#".repeat(usize::from((*level).clamp(1, 6))));
            out.push(' ');
            if let Some(anchor) = anchor {
                let _ = write!(out, "<a name=\"{}\"></a>", escape_attribute(anchor));
            }
            out.push_str(&escape_text(text));
            out.push('\n');
        }
        Block::List(items) => {
            for item in items {
                let _ = writeln!(out, "- {}", escape_text(item));
            }
        }
        Block::Table(table) => write_table(out, table),
    }
}

fn write_table(out: &mut String, table: &Table) {
    let headers: Vec<String> = table.headers.iter().map(|h| escape_cell(h)).collect();
    write_row(out, &headers);
    write_row(out, &vec![":---".to_string(); headers.len()]);

    for row in &table.rows {
        let cells: Vec<String> = row.iter().map(inline).collect();
        write_row(out, &cells);
    }
}

fn write_row(out: &mut String, cells: &[String]) {
    out.push('|');
    for cell in cells {
        let _ = write!(out, " {} |", cell);
    }
    out.push('\n');
}

fn inline(value: &Inline) -> String {
    match value {
        Inline::Text(text) => escape_cell(text),
        Inline::Tagged { text, tag } => format!("{} `{}`", escape_cell(text), tag),
        Inline::Link { text, target } => {
            let href = match target {
                LinkTarget::Anchor(anchor) => format!("#{}", encode_href(anchor, true)),
                LinkTarget::Url(url) => encode_href(url, false),
            };
            let text = escape_cell(text).replace('[', "\\[").replace(']', "\\]");
            format!("[{}]({})", text, href)
        }
    }
}

/// Percent-encodes the characters that end or split a link destination.
///
/// Urls may already carry escapes, so `%` is only encoded in anchors.
fn encode_href(href: &str, encode_percent: bool) -> String {
    let mut out = String::with_capacity(href.len());
    for c in href.chars() {
        match c {
            '%' if encode_percent => out.push_str("%25"),
            ' ' => out.push_str("%20"),
            '(' => out.push_str("%28"),
            ')' => out.push_str("%29"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_text(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_cell(text: &str) -> String {
    escape_text(text)
        .replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace('\n', "<br>")
}

fn escape_attribute(text: &str) -> String {
    text.replace('&', "&amp;").replace('"', "&quot;")
}
