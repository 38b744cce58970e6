//! Column roles and their resolution for the two sheet shapes.
//!
//! The role → column mapping is resolved once per sheet; the classifier and
//! the session builder only ever ask a row for `cell(role)`.

use clap::ValueEnum;

/// How the rows of a sheet are addressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SheetShape {
    /// First row holds header labels; unlabeled columns get `__EMPTY`,
    /// `__EMPTY_1`, ... keys.
    Keyed,
    /// Raw cell positions, data starts after the `Site | Date` header row.
    Positional,
}

impl SheetShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            SheetShape::Keyed => "keyed",
            SheetShape::Positional => "positional",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnRole {
    Site,
    Date,
    OperatingHours,
    OpeningPercentage,
    OpeningFuel,
    ClosingPercentage,
    ClosingFuel,
    TotalUsage,
    TotalFill,
    LiterUsagePerHour,
    CostForUsage,
}

impl ColumnRole {
    pub const ALL: [ColumnRole; 11] = [
        ColumnRole::Site,
        ColumnRole::Date,
        ColumnRole::OperatingHours,
        ColumnRole::OpeningPercentage,
        ColumnRole::OpeningFuel,
        ColumnRole::ClosingPercentage,
        ColumnRole::ClosingFuel,
        ColumnRole::TotalUsage,
        ColumnRole::TotalFill,
        ColumnRole::LiterUsagePerHour,
        ColumnRole::CostForUsage,
    ];

    /// Column position in the standard report layout.
    pub fn position(&self) -> usize {
        match self {
            ColumnRole::Site => 0,
            ColumnRole::Date => 1,
            ColumnRole::OperatingHours => 2,
            ColumnRole::OpeningPercentage => 3,
            ColumnRole::OpeningFuel => 4,
            ColumnRole::ClosingPercentage => 5,
            ColumnRole::ClosingFuel => 6,
            ColumnRole::TotalUsage => 7,
            ColumnRole::TotalFill => 8,
            ColumnRole::LiterUsagePerHour => 9,
            ColumnRole::CostForUsage => 10,
        }
    }

    /// Header label printed by the report generator.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnRole::Site => "Site",
            ColumnRole::Date => "Date",
            ColumnRole::OperatingHours => "Operating Hours",
            ColumnRole::OpeningPercentage => "Opening Percentage",
            ColumnRole::OpeningFuel => "Opening Fuel",
            ColumnRole::ClosingPercentage => "Closing Percentage",
            ColumnRole::ClosingFuel => "Closing Fuel",
            ColumnRole::TotalUsage => "Total Usage",
            ColumnRole::TotalFill => "Total Fill",
            ColumnRole::LiterUsagePerHour => "Liter Usage Per Hour",
            ColumnRole::CostForUsage => "Cost For Usage",
        }
    }

    /// Key a keyed sheet gives this column when its header cell is blank.
    pub fn placeholder_key(&self) -> String {
        match self.position() {
            0 => String::new(),
            1 => EMPTY_KEY.to_string(),
            p => format!("{}_{}", EMPTY_KEY, p - 1),
        }
    }
}

pub const EMPTY_KEY: &str = "__EMPTY";

/// Role → column index for one sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    indices: [Option<usize>; 11],
}

impl ColumnMap {
    /// Standard positions: Site, Date, Operating Hours, ... Cost For Usage.
    pub fn positional() -> Self {
        let mut indices = [None; 11];
        for role in ColumnRole::ALL {
            indices[role.position()] = Some(role.position());
        }
        Self { indices }
    }

    /// Resolve roles against header keys. A key equal to the role label wins,
    /// otherwise the `__EMPTY_n` placeholder of the role's standard position
    /// is used. The site role is always the first column (the report title).
    pub fn keyed(keys: &[String]) -> Self {
        let mut indices = [None; 11];

        for role in ColumnRole::ALL {
            let by_label = keys
                .iter()
                .position(|k| k.trim().eq_ignore_ascii_case(role.label()));

            let idx = match role {
                ColumnRole::Site if !keys.is_empty() => Some(0),
                _ => by_label.or_else(|| {
                    let placeholder = role.placeholder_key();
                    keys.iter().position(|k| *k == placeholder)
                }),
            };

            indices[role.position()] = idx;
        }

        Self { indices }
    }

    pub fn index(&self, role: ColumnRole) -> Option<usize> {
        self.indices[role.position()]
    }
}

/// Build SheetJS-style keys from a header row: labels are kept, blank cells
/// become `__EMPTY`, `__EMPTY_1`, ... and repeated labels get a `_n` suffix.
pub fn header_keys(header: &[String]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::with_capacity(header.len());
    let mut blanks = 0usize;

    for cell in header {
        let label = cell.trim();
        let key = if label.is_empty() {
            let k = if blanks == 0 {
                EMPTY_KEY.to_string()
            } else {
                format!("{}_{}", EMPTY_KEY, blanks)
            };
            blanks += 1;
            k
        } else {
            let mut k = label.to_string();
            let mut n = 1;
            while keys.contains(&k) {
                k = format!("{}_{}", label, n);
                n += 1;
            }
            k
        };
        keys.push(key);
    }

    keys
}
