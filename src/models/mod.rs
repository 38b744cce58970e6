pub mod batch;
pub mod cost_code;
pub mod date_range;
pub mod running_time;
pub mod session;
pub mod session_status;

pub use batch::ImportBatch;
pub use cost_code::CostCodeTable;
pub use date_range::DateRange;
pub use running_time::RunningTimeWindow;
pub use session::{SessionRecord, StoredSession};
pub use session_status::SessionStatus;
