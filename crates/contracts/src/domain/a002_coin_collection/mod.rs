pub mod aggregate;

pub use aggregate::{CoinCollection, CoinCollectionDto, CoinCollectionId};
