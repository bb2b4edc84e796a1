//! Search result display model

use serde::Serialize;
use tabled::Tabled;

use super::common::format_rank;
use crate::client::models::SearchCoin;

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct SearchDisplay {
    #[tabled(rename = "#")]
    pub rank: String,

    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "SYMBOL")]
    pub symbol: String,

    #[tabled(rename = "NAME")]
    pub name: String,
}

impl From<SearchCoin> for SearchDisplay {
    fn from(coin: SearchCoin) -> Self {
        Self {
            rank: format_rank(coin.market_cap_rank),
            id: coin.id,
            symbol: coin.symbol.to_uppercase(),
            name: coin.name,
        }
    }
}
