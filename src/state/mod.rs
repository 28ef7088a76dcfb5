//! Session state and the value types flowing through it.

mod session;
mod types;

pub use session::{ResponseCache, Session};
pub use types::{EventRecord, MonthDay};
