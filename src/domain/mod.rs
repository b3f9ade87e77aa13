pub mod buy_and_hold;
pub mod config_validation;
pub mod ema;
pub mod error;
pub mod index_tables;
pub mod period;
pub mod position;
pub mod price;
pub mod returns;
pub mod summary;
pub mod table;
pub mod trade_sim;
