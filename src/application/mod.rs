//! Application layer: the `Wallet` service and the concurrent aggregation
//! engine it delegates sums and filters to.
//!
//! Aggregations partition a payment snapshot, fan the partitions out to
//! blocking `tokio` tasks and merge the partial results in a single reducer,
//! so no lock is ever held while a partition is being scanned.

pub mod aggregate;
pub mod partition;
pub mod progress;
pub mod wallet;
