pub mod pool;
pub mod snapshot;

pub use pool::NormalizedPool;
pub use snapshot::{MarketContext, RankedResult, Snapshot};
