//! Irregular fuel-report parsing: sheet reading, row classification,
//! field parsing and session building.

pub mod builder;
pub mod classify;
pub mod fields;
pub mod fill;
pub mod layout;
pub mod reader;
pub mod row;

pub use builder::{BuildOutput, BuildStats, BuiltSession, SessionBuilder, build_sessions};
pub use classify::{RowKind, classify};
pub use fill::derive_fill_record;
pub use layout::{ColumnMap, ColumnRole, SheetShape};
pub use reader::read_sheet;
pub use row::{Sheet, SheetRow};
