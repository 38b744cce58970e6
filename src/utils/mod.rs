pub mod colors;
pub mod formatting;
pub mod path;
pub mod range;
pub mod table;
pub mod time;

pub use formatting::{fmt_liters, fmt_number};
pub use time::hours2readable;
