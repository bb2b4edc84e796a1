//! Common display utilities and helpers

/// Market-cap rank, or `-` when the provider has none
pub fn format_rank(rank: Option<u32>) -> String {
    rank.map(|r| r.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Value or `-` placeholder
pub fn unknown(value: Option<String>) -> String {
    value.unwrap_or_else(|| "-".to_string())
}
