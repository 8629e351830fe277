pub mod column;
pub mod events;
pub mod field;
pub mod table;

pub use column::{ColumnKind, ColumnSpec};
pub use events::{EventCallback, EventCollector, SubscriberId, TableEvent};
pub use field::Field;
pub use table::{Table, MAX_ROWS};
