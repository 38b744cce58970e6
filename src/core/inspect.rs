use crate::models::DateRange;
use crate::sheet::fields::parse_date_in_range;
use crate::sheet::{ColumnRole, RowKind, Sheet, SheetShape, classify};
use crate::utils::colors::{GREY, GREEN, RESET, YELLOW};
use crate::utils::table::{Column, Table};

const MAX_TEXT: usize = 70;

/// One previewed row.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectedRow {
    pub number: usize,
    pub kind: &'static str,
    /// Range check of the date cell, when a range was given and the row has a date.
    pub in_range: Option<bool>,
    pub text: String,
}

pub struct InspectLogic;

impl InspectLogic {
    /// Classify the first `limit` rows of `sheet`.
    pub fn preview(sheet: &Sheet, range: Option<&DateRange>, limit: usize) -> Vec<InspectedRow> {
        sheet
            .data_rows()
            .filter(|r| !r.is_blank())
            .take(limit)
            .map(|row| {
                let kind = classify(&row);
                let in_range = match (&kind, range) {
                    (RowKind::DataRow(_), Some(r)) => {
                        Some(parse_date_in_range(row.cell(ColumnRole::Date), r).is_some())
                    }
                    _ => None,
                };
                InspectedRow {
                    number: row.number,
                    kind: kind.tag(),
                    in_range,
                    text: truncate(&row.text(), MAX_TEXT),
                }
            })
            .collect()
    }

    pub fn print(sheet: &Sheet, range: Option<&DateRange>, limit: usize, separator: char) {
        println!("📄 Sheet    : {}", sheet.name);
        println!("🧭 Layout   : {}", sheet.shape.as_str());
        println!("🔢 Rows     : {}", sheet.len());

        match sheet.shape {
            SheetShape::Keyed => println!("🔑 Keys     : {}", sheet.keys.join(" | ")),
            SheetShape::Positional if !sheet.has_header() => {
                println!("🔑 Header   : {}not found{}", YELLOW, RESET)
            }
            SheetShape::Positional => println!("🔑 Header   : found"),
        }
        if let Some(r) = range {
            println!("📅 Range    : {}", r);
        }
        println!();

        let rows = Self::preview(sheet, range, limit);

        let mut table = Table::new(vec![
            Column::right("Row"),
            Column::left("Kind"),
            Column::left("Range"),
            Column::left("Content"),
        ]);
        for r in &rows {
            table.add_row(vec![
                r.number.to_string(),
                r.kind.to_string(),
                match r.in_range {
                    Some(true) => "in".to_string(),
                    Some(false) => "out".to_string(),
                    None => String::new(),
                },
                r.text.clone(),
            ]);
        }
        print!("{}", table.render(separator));

        let data = rows.iter().filter(|r| r.kind == "DATA_ROW").count();
        println!(
            "\n{}{} data row(s){} in the first {} non-blank rows{}",
            GREEN,
            data,
            GREY,
            rows.len(),
            RESET
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max - 3).collect();
    out.push_str("...");
    out
}
