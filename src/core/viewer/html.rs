//! HTML writer for [`QuestView`].

use crate::core::quest::QuestRecord;

use super::table::{render, QuestView, RowView, TableView, Viewport};

/// Stylesheet for the class names produced by [`super::CellStyle::class_name`].
pub const STYLESHEET: &str = "\
.container { max-width: 1024px; padding: 6px; }
table { border-collapse: collapse; width: 100%; }
td, th { padding: 4px 10px; border: 0; }
.head { background-color: #000; color: #fff; font-size: 14px; }
.body { font-size: 14px; }
.body2nd { font-size: 11px; }
.body-odd { background-color: rgba(0, 0, 0, 0.04); font-size: 14px; }
.body2nd-odd { background-color: rgba(0, 0, 0, 0.04); font-size: 11px; }
.wave-title { background-color: #000; color: #fff; margin-bottom: 0; }
";

/// Escape text for use in HTML content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn push_row(out: &mut String, row: &RowView, header: bool) {
    let tag = if header { "th" } else { "td" };
    out.push_str("<tr>");
    for cell in &row.cells {
        out.push_str(&format!(
            "<{tag} class=\"{}\" align=\"{}\" width=\"{}%\"",
            cell.style.class_name(),
            cell.align.as_str(),
            cell.width
        ));
        if cell.span > 1 {
            out.push_str(&format!(" colspan=\"{}\"", cell.span));
        }
        out.push('>');
        out.push_str(&escape(&cell.text));
        out.push_str(&format!("</{tag}>"));
    }
    out.push_str("</tr>");
}

fn push_table(out: &mut String, table: &TableView) {
    out.push_str("<table>");
    if !table.header.is_empty() {
        out.push_str("<thead>");
        for row in &table.header {
            push_row(out, row, true);
        }
        out.push_str("</thead>");
    }
    if !table.body.is_empty() {
        out.push_str("<tbody>");
        for row in &table.body {
            push_row(out, row, false);
        }
        out.push_str("</tbody>");
    }
    out.push_str("</table>");
}

/// Table markup for a rendered quest. `None` produces an empty string.
pub fn to_html(view: Option<&QuestView>) -> String {
    let Some(view) = view else {
        return String::new();
    };

    let mut out = String::new();
    out.push_str("<div class=\"container\">");
    push_table(&mut out, &view.quest_info);
    out.push_str("</div>\n<p></p>\n<div class=\"container\">");
    if let Some(header) = &view.enemy_header {
        push_table(&mut out, header);
    }
    for wave in &view.waves {
        out.push_str("<div><p class=\"wave-title\">");
        out.push_str(&escape(&wave.title));
        out.push_str("</p>");
        push_table(&mut out, &wave.table);
        out.push_str("</div>");
    }
    out.push_str("</div>\n");
    out
}

/// A standalone HTML document with the stylesheet inlined.
pub fn page(title: &str, view: Option<&QuestView>) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>\n{}</style>\n</head>\n<body>\n<h2>{}</h2>\n{}</body>\n</html>\n",
        escape(title),
        STYLESHEET,
        escape(title),
        to_html(view)
    )
}

/// Render a quest and wrap it in a standalone page. An unknown quest yields
/// a page with an empty body.
pub fn render_page<'a, F>(quest_id: u32, title: &str, lookup: F, viewport: Viewport) -> String
where
    F: Fn(u32) -> Option<&'a QuestRecord>,
{
    page(title, render(quest_id, lookup, viewport).as_ref())
}
