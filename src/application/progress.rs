use super::aggregate::{Aggregator, sum_amounts};
use super::partition::partition_by_size;
use crate::domain::account::Money;
use crate::domain::payment::Payment;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, trace};

/// One partition's contribution, as reported on a progress stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionResult {
    /// Number of payments in the partition.
    pub count: usize,
    /// Sum of their amounts.
    pub sum: Money,
}

/// Receiving end of a progress stream. Closed once every partition has reported.
pub type ProgressStream = mpsc::UnboundedReceiver<PartitionResult>;

impl Aggregator {
    /// Sums the snapshot in fixed-size partitions, reporting each partition's
    /// result on a fresh stream instead of returning a single total.
    ///
    /// Returns immediately. Every partition sends exactly one message; there is
    /// no final "done" message, the stream simply closes when a finalizer task
    /// has seen all workers finish. The grand total is the sum of all messages
    /// received until closure.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn sum_with_progress(&self, payments: Arc<Vec<Payment>>) -> ProgressStream {
        let (tx, rx) = mpsc::unbounded_channel();
        let partitions = partition_by_size(payments.len(), self.config.progress_partition_size);
        debug!(
            payments = payments.len(),
            partitions = partitions.len(),
            "summing payments with progress"
        );

        let mut workers = JoinSet::new();
        for partition in partitions {
            let payments = Arc::clone(&payments);
            let tx = tx.clone();
            workers.spawn_blocking(move || {
                let slice = &payments[partition.range];
                let result = PartitionResult {
                    count: slice.len(),
                    sum: sum_amounts(slice),
                };
                if tx.send(result).is_err() {
                    trace!(partition = partition.index, "progress receiver dropped");
                }
            });
        }

        tokio::spawn(async move {
            while let Some(joined) = workers.join_next().await {
                if let Err(err) = joined {
                    error!(%err, "progress worker failed");
                }
            }
            drop(tx);
            debug!("progress stream closed");
        });

        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::aggregate::AggregationConfig;
    use crate::domain::payment::PaymentStatus;

    fn ones(count: usize) -> Arc<Vec<Payment>> {
        Arc::new(
            (0..count)
                .map(|i| Payment {
                    id: i.to_string(),
                    account_id: 1,
                    amount: Money::new(1),
                    category: "cafe".to_string(),
                    status: PaymentStatus::InProgress,
                })
                .collect(),
        )
    }

    async fn drain(mut stream: ProgressStream) -> Vec<PartitionResult> {
        let mut received = Vec::new();
        while let Some(result) = stream.recv().await {
            received.push(result);
        }
        received
    }

    #[tokio::test]
    async fn test_one_message_per_partition() {
        let aggregator = Aggregator::new(AggregationConfig {
            progress_partition_size: 10,
        });
        let received = drain(aggregator.sum_with_progress(ones(103))).await;

        assert_eq!(received.len(), 10);
        assert_eq!(received.iter().map(|r| r.count).sum::<usize>(), 103);
        assert_eq!(received.iter().map(|r| r.sum).sum::<Money>(), Money::new(103));
        assert_eq!(received.iter().filter(|r| r.count == 13).count(), 1);
    }

    #[tokio::test]
    async fn test_partitions_hold_the_configured_size() {
        let aggregator = Aggregator::new(AggregationConfig {
            progress_partition_size: 100,
        });
        let received = drain(aggregator.sum_with_progress(ones(250))).await;

        let mut counts: Vec<usize> = received.iter().map(|r| r.count).collect();
        counts.sort_unstable();
        assert_eq!(counts, [100, 150]);
        assert_eq!(received.iter().map(|r| r.sum).sum::<Money>(), Money::new(250));
    }

    #[tokio::test]
    async fn test_small_collection_is_a_single_partition() {
        let received = drain(Aggregator::default().sum_with_progress(ones(1_000))).await;
        assert_eq!(
            received,
            [PartitionResult {
                count: 1_000,
                sum: Money::new(1_000),
            }]
        );
    }

    #[tokio::test]
    async fn test_empty_collection_reports_once_and_closes() {
        let received = drain(Aggregator::default().sum_with_progress(ones(0))).await;
        assert_eq!(
            received,
            [PartitionResult {
                count: 0,
                sum: Money::ZERO,
            }]
        );
    }

    #[tokio::test]
    async fn test_concurrent_calls_get_independent_streams() {
        let aggregator = Aggregator::new(AggregationConfig {
            progress_partition_size: 4,
        });
        let first = aggregator.sum_with_progress(ones(20));
        let second = aggregator.sum_with_progress(ones(8));

        let (first, second) = tokio::join!(drain(first), drain(second));
        assert_eq!(first.iter().map(|r| r.count).sum::<usize>(), 20);
        assert_eq!(first.len(), 5);
        assert_eq!(second.iter().map(|r| r.count).sum::<usize>(), 8);
        assert_eq!(second.len(), 2);
    }

    #[tokio::test]
    async fn test_dropped_receiver_does_not_disturb_workers() {
        let aggregator = Aggregator::new(AggregationConfig {
            progress_partition_size: 1,
        });
        drop(aggregator.sum_with_progress(ones(50)));

        let received = drain(aggregator.sum_with_progress(ones(5))).await;
        assert_eq!(received.len(), 5);
    }
}
