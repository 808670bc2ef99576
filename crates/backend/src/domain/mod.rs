pub mod a001_coin;
pub mod a002_coin_collection;
