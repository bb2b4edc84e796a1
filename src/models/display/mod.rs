//! Display model implementations for table and JSON output
//!
//! Display models turn provider payloads into CLI-friendly rows with
//! formatted figures and column names.

mod chart;
mod coin;
mod common;
mod global;
mod search;

pub use chart::chart_rows;
pub use coin::{CoinRowDisplay, detail_fields};
pub use global::{dominance_rows, global_fields};
pub use search::SearchDisplay;
