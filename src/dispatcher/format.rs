use crate::database::{ColumnDef, Record};

pub const NO_RECORDS: &str = "No records found.";

/// Renders records as a boxed text table with one column per schema column.
///
/// Columns a record lacks are left blank; columns outside the schema are not
/// shown.
pub fn format_records(records: &[Record], columns: &[ColumnDef]) -> String {
    if records.is_empty() {
        return NO_RECORDS.to_string();
    }

    let header: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            header
                .iter()
                .map(|name| record.get(*name).map(|v| v.to_string()).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(i, name)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let separator = format!(
        "+{}+",
        widths.iter().map(|w| "-".repeat(w + 2)).collect::<Vec<_>>().join("+")
    );
    let mut out = vec![separator.clone(), render_line(header.iter().copied(), &widths), separator.clone()];
    for row in &rows {
        out.push(render_line(row.iter().map(String::as_str), &widths));
    }
    out.push(separator);
    out.join("\n")
}

fn render_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let cells: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| format!(" {}{} ", cell, " ".repeat(width - cell.chars().count())))
        .collect();
    format!("|{}|", cells.join("|"))
}
