//! Member listing output: a plain text grid or JSON

use ticketheaven_shared::models::member::Member;

const HEADERS: [&str; 6] = ["userid", "username", "name", "email", "phonenumber", "dateofbirth"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Table,
    Json,
}

impl Format {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Format::Json
        } else {
            Format::Table
        }
    }
}

pub fn render(members: &[Member], format: Format) -> Result<String, serde_json::Error> {
    match format {
        Format::Table => Ok(render_table(members)),
        Format::Json => serde_json::to_string_pretty(members),
    }
}

/// Renders members as an aligned grid, one header row then one row each
pub fn render_table(members: &[Member]) -> String {
    let rows: Vec<[String; 6]> = members
        .iter()
        .map(|m| {
            [
                m.user_id.to_string(),
                m.username.clone(),
                m.name.clone(),
                m.email.clone(),
                m.phone_number.clone(),
                m.date_of_birth.format("%Y-%m-%d").to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    let mut out = String::new();
    push_row(&mut out, HEADERS.iter().copied(), &widths);
    push_row(&mut out, rule.iter().map(String::as_str), &widths);
    for row in &rows {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }

    if rows.is_empty() {
        out.push_str("(no members)\n");
    }

    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}
