pub mod aggregate;
pub mod search;
pub mod stats;

pub use aggregate::{Coin, CoinAuditInfo, CoinDto, CoinId};
pub use search::{AdvancedSearchRequest, CoinSearchFilter, CoinSearchRequest, SimpleSearch};
pub use stats::{
    CoinsByDegreeStats, CoinsByMaterialStats, CoinsByYearStats, CoinsSummaryStats,
    TopExpensiveRequest,
};
