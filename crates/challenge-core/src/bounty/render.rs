//! Markup HTML de la tabla de bounties y del resumen.
//!
//! Todo contenido aportado por el usuario pasa por [`escape_html`].
use std::fmt::Write;

use super::{BountyTable, ReviewSummary};

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            c => out.push(c),
        }
    }
    out
}

/// Filas `<tr>` de la tabla del paso 3. Cada control de borrado referencia
/// el id estable del bounty, nunca su posición.
pub fn table_rows_html(table: &BountyTable) -> String {
    let mut out = String::new();
    for row in &table.rows {
        let _ = write!(out,
                       "<tr data-bounty-id=\"{id}\"><td><div class=\"font-medium\">{title}</div><div>{desc}</div></td>\
                        <td>{skill}</td><td>{points}</td>\
                        <td><button type=\"button\" data-remove-bounty=\"{id}\">Remove</button></td></tr>",
                       id = row.id,
                       title = escape_html(&row.title),
                       desc = escape_html(&row.description),
                       skill = escape_html(&row.skill),
                       points = row.points);
    }
    out
}

/// Cuerpo del resumen (paso 5): título, descripción, filas sin controles y
/// total.
pub fn summary_html(summary: &ReviewSummary) -> String {
    let mut out = String::new();
    let _ = write!(out,
                   "<h3 id=\"summary-title\">{}</h3><div id=\"summary-description\">{}</div><table><tbody>",
                   escape_html(&summary.title),
                   escape_html(&summary.description));
    for row in &summary.table.rows {
        let _ = write!(out,
                       "<tr><td><div class=\"font-medium\">{}</div><div>{}</div></td><td>{}</td></tr>",
                       escape_html(&row.title),
                       escape_html(&row.description),
                       row.points);
    }
    let _ = write!(out, "</tbody></table><span id=\"summary-total-points\">{}</span>", summary.total_points);
    out
}
