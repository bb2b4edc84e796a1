//! Display models for CLI output

pub mod display;

pub use display::{
    CoinRowDisplay, SearchDisplay, chart_rows, detail_fields, dominance_rows, global_fields,
};
