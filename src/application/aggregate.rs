use super::partition::{Partition, partition};
use crate::domain::account::Money;
use crate::domain::payment::Payment;
use crate::error::Result;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, trace};

/// Default number of payments per partition in progress mode.
pub const DEFAULT_PROGRESS_PARTITION_SIZE: usize = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationConfig {
    /// Payments per partition for [`Aggregator::sum_with_progress`]. Zero is
    /// treated as one.
    pub progress_partition_size: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            progress_partition_size: DEFAULT_PROGRESS_PARTITION_SIZE,
        }
    }
}

/// A worker's output, tagged with the partition that produced it.
#[derive(Debug)]
pub struct PartialResult<T> {
    pub partition: usize,
    pub value: T,
}

/// Parallel aggregation over a payment snapshot.
///
/// Every call partitions the snapshot, runs one blocking worker per partition
/// and merges the partial results in a single reducer loop on the calling
/// task. Workers never share mutable state; they only read their own slice of
/// the snapshot and hand back an owned result.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    pub(crate) config: AggregationConfig,
}

impl Aggregator {
    pub fn new(config: AggregationConfig) -> Self {
        Self { config }
    }

    /// Total of all payment amounts, computed by `workers` parallel workers.
    ///
    /// A worker count of 0 or 1 runs a single worker. Amounts are added with
    /// wrapping arithmetic, so the result does not depend on the worker count.
    pub async fn sum(&self, payments: Arc<Vec<Payment>>, workers: usize) -> Result<Money> {
        let partitions = partition(payments.len(), workers);
        debug!(
            payments = payments.len(),
            partitions = partitions.len(),
            "summing payments"
        );

        let mut tasks = spawn_workers(&payments, partitions, sum_amounts);
        let mut total = Money::ZERO;
        while let Some(joined) = tasks.join_next().await {
            let partial = joined?;
            trace!(partition = partial.partition, sum = %partial.value, "partition summed");
            total = total.wrapping_add(partial.value);
        }
        Ok(total)
    }

    /// Copies of every payment matching `predicate`, computed by `workers`
    /// parallel workers.
    ///
    /// A worker count of 0 means one worker over the whole collection (as does
    /// 1). Matches keep input order within a partition, but partitions are
    /// appended in the order their workers finish; sort the result if a stable
    /// order is needed. No matches yield an empty vector.
    pub async fn filter<P>(
        &self,
        payments: Arc<Vec<Payment>>,
        predicate: P,
        workers: usize,
    ) -> Result<Vec<Payment>>
    where
        P: Fn(&Payment) -> bool + Send + Sync + 'static,
    {
        let partitions = partition(payments.len(), workers);
        debug!(
            payments = payments.len(),
            partitions = partitions.len(),
            "filtering payments"
        );

        let mut tasks = spawn_workers(&payments, partitions, move |slice: &[Payment]| {
            slice
                .iter()
                .filter(|&payment| predicate(payment))
                .cloned()
                .collect::<Vec<_>>()
        });

        let mut matches = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            let partial = joined?;
            trace!(
                partition = partial.partition,
                matches = partial.value.len(),
                "partition filtered"
            );
            matches.extend(partial.value);
        }
        Ok(matches)
    }
}

/// Sequential total of a slice; the per-partition step of every sum.
pub(crate) fn sum_amounts(payments: &[Payment]) -> Money {
    payments.iter().map(|p| p.amount).sum()
}

/// Spawns one blocking task per partition, each applying `work` to its own
/// slice of the snapshot.
fn spawn_workers<T, F>(
    payments: &Arc<Vec<Payment>>,
    partitions: Vec<Partition>,
    work: F,
) -> JoinSet<PartialResult<T>>
where
    T: Send + 'static,
    F: Fn(&[Payment]) -> T + Send + Sync + 'static,
{
    let work = Arc::new(work);
    let mut tasks = JoinSet::new();
    for partition in partitions {
        let payments = Arc::clone(payments);
        let work = Arc::clone(&work);
        tasks.spawn_blocking(move || PartialResult {
            partition: partition.index,
            value: work(&payments[partition.range]),
        });
    }
    tasks
}
