pub mod numismatic_rarity;
pub mod option_conservation;

pub use numismatic_rarity::NumismaticRarity;
pub use option_conservation::OptionConservation;
