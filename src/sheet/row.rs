//! In-memory sheet and the row accessor shared by both sheet shapes.

use super::layout::{ColumnMap, ColumnRole, SheetShape, header_keys};

/// A single worksheet read fully into memory as text cells.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub shape: SheetShape,
    /// Column keys for keyed sheets (empty for positional ones).
    pub keys: Vec<String>,
    pub columns: ColumnMap,
    rows: Vec<Vec<String>>,
    /// Index of the first row fed to the classifier.
    data_start: usize,
    /// Sheet row number (1-based) of `rows[0]`.
    first_row_number: usize,
}

impl Sheet {
    pub fn new(name: &str, shape: SheetShape, raw: Vec<Vec<String>>) -> Self {
        match shape {
            SheetShape::Keyed => Self::keyed(name, raw),
            SheetShape::Positional => Self::positional(name, raw),
        }
    }

    /// First row becomes the header keys, every following row is a record.
    pub fn keyed(name: &str, mut raw: Vec<Vec<String>>) -> Self {
        let header = if raw.is_empty() {
            Vec::new()
        } else {
            raw.remove(0)
        };
        let keys = header_keys(&header);
        let columns = ColumnMap::keyed(&keys);

        Self {
            name: name.to_string(),
            shape: SheetShape::Keyed,
            keys,
            columns,
            rows: raw,
            data_start: 0,
            first_row_number: 2,
        }
    }

    /// Raw rows; data starts right after the `Site | Date` header row when
    /// one is present, otherwise at the first row.
    pub fn positional(name: &str, raw: Vec<Vec<String>>) -> Self {
        let data_start = find_header_row(&raw).map(|i| i + 1).unwrap_or(0);

        Self {
            name: name.to_string(),
            shape: SheetShape::Positional,
            keys: Vec::new(),
            columns: ColumnMap::positional(),
            rows: raw,
            data_start,
            first_row_number: 1,
        }
    }

    pub fn has_header(&self) -> bool {
        match self.shape {
            SheetShape::Keyed => !self.keys.is_empty(),
            SheetShape::Positional => self.data_start > 0,
        }
    }

    /// Number of records (keyed) or raw rows (positional).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows handed to the classifier, in sheet order.
    pub fn data_rows(&self) -> impl Iterator<Item = SheetRow<'_>> {
        self.rows
            .iter()
            .enumerate()
            .skip(self.data_start)
            .map(|(i, cells)| SheetRow {
                number: self.first_row_number + i,
                cells,
                columns: &self.columns,
            })
    }
}

/// Borrowed view of one row, addressed by column role.
#[derive(Debug, Clone, Copy)]
pub struct SheetRow<'a> {
    /// 1-based row number in the worksheet.
    pub number: usize,
    cells: &'a [String],
    columns: &'a ColumnMap,
}

impl<'a> SheetRow<'a> {
    pub fn new(number: usize, cells: &'a [String], columns: &'a ColumnMap) -> Self {
        Self {
            number,
            cells,
            columns,
        }
    }

    /// Trimmed cell for `role`, empty when the column is absent.
    pub fn cell(&self, role: ColumnRole) -> &'a str {
        self.columns
            .index(role)
            .and_then(|i| self.cells.get(i))
            .map(|c| c.trim())
            .unwrap_or("")
    }

    /// All non-empty cells joined with a space.
    pub fn text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.trim().is_empty())
    }
}

fn find_header_row(raw: &[Vec<String>]) -> Option<usize> {
    raw.iter().position(|row| {
        let first = row.first().map(|c| c.trim()).unwrap_or("");
        let second = row.get(1).map(|c| c.trim()).unwrap_or("");
        first.eq_ignore_ascii_case(ColumnRole::Site.label())
            && second.eq_ignore_ascii_case(ColumnRole::Date.label())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn positional_sheet_starts_after_header() {
        let sheet = Sheet::positional(
            "Weekly",
            vec![
                row(&["FUEL REPORT"]),
                row(&["Site", "Date", "Operating Hours"]),
                row(&["ALEX", "2026-01-13", "2 hours"]),
            ],
        );

        let rows: Vec<_> = sheet.data_rows().collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].number, 3);
        assert_eq!(rows[0].cell(ColumnRole::Site), "ALEX");
        assert_eq!(rows[0].cell(ColumnRole::OperatingHours), "2 hours");
        assert_eq!(rows[0].cell(ColumnRole::TotalUsage), "");
    }

    #[test]
    fn positional_sheet_without_header_uses_every_row() {
        let sheet = Sheet::positional("Weekly", vec![row(&["ALEX", "2026-01-13"])]);
        assert!(!sheet.has_header());
        assert_eq!(sheet.data_rows().count(), 1);
    }

    #[test]
    fn keyed_sheet_addresses_placeholders() {
        let sheet = Sheet::keyed(
            "Weekly",
            vec![
                row(&["FUEL REPORT SUMMARY", "", ""]),
                row(&[" ALEX ", "2026-01-20", "8 hours"]),
            ],
        );

        let r = sheet.data_rows().next().unwrap();
        assert_eq!(r.number, 2);
        assert_eq!(r.cell(ColumnRole::Site), "ALEX");
        assert_eq!(r.cell(ColumnRole::Date), "2026-01-20");
        assert_eq!(r.cell(ColumnRole::OperatingHours), "8 hours");
    }

    #[test]
    fn text_joins_non_empty_cells() {
        let map = ColumnMap::positional();
        let cells = row(&["ALEX", "Running Time", "From: 06:00:00", "", "To: 09:00:00"]);
        let r = SheetRow::new(1, &cells, &map);
        assert_eq!(r.text(), "ALEX Running Time From: 06:00:00 To: 09:00:00");
    }
}
