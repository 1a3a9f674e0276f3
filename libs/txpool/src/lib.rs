mod candidate;
mod pool;
mod shared;
pub mod test;

// region:    --- Exports
pub use candidate::{BuildError, Transaction};
pub use pool::{Accepted, Pool, PoolStats, RejectReason};
pub use shared::SharedPool;
// endregion: --- Exports
