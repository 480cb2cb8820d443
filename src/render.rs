use crate::inventory::{Candidate, StashEntry, format_currency};
use crate::models::inventory::ItemGroup;

/// Lays out rows as left-aligned columns with a dashed rule under the headers.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(len),
                None => widths.push(len),
            }
        }
    }

    let mut out = String::new();
    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    push_row(&mut out, &header_cells, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{cell:<w$}", w = *w))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

pub fn group_rows(groups: &[ItemGroup]) -> Vec<Vec<String>> {
    groups
        .iter()
        .map(|g| {
            vec![
                g.total_quantity.to_string(),
                g.display_name.clone(),
                g.quality.to_string(),
                g.stacks.to_string(),
                g.locations.join(", "),
                format_currency(g.total_value),
            ]
        })
        .collect()
}

pub fn stash_rows(entries: &[StashEntry]) -> Vec<Vec<String>> {
    entries
        .iter()
        .map(|e| {
            vec![
                e.count.to_string(),
                e.display_name.clone(),
                e.character.clone().unwrap_or_else(|| "?".to_string()),
                e.location.clone(),
            ]
        })
        .collect()
}

pub fn stack_rows(stacks: &[Candidate]) -> Vec<Vec<String>> {
    stacks
        .iter()
        .map(|Candidate { instance: i, stack_value }| {
            vec![
                i.quantity.to_string(),
                i.display_name.clone(),
                i.character.clone().unwrap_or_else(|| "?".to_string()),
                i.location.clone(),
                format_currency(*stack_value),
            ]
        })
        .collect()
}
