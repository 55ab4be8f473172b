use std::ops::Range;

/// A contiguous `[start, end)` slice of the payment snapshot handed to one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    /// Position of this partition in input order.
    pub index: usize,
    pub range: Range<usize>,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Splits `len` items into contiguous, order-preserving partitions for
/// `workers` workers.
///
/// A worker count of 0 or 1 yields a single partition over everything.
/// Otherwise every partition but the last gets `len / workers` items and the
/// last one absorbs the remainder, so it may be larger than the others. When
/// `workers > len` the leading partitions are empty; at most `len + 1`
/// partitions are produced since any beyond that would be empty as well.
pub fn partition(len: usize, workers: usize) -> Vec<Partition> {
    if workers <= 1 {
        return vec![Partition {
            index: 0,
            range: 0..len,
        }];
    }

    let workers = workers.min(len.saturating_add(1));
    fixed_chunks(len, workers, len / workers)
}

/// Partition layout for a fixed partition size: `max(1, len / size)`
/// partitions of exactly `size` items, the last absorbing the remainder. A
/// size of 0 counts as 1.
pub fn partition_by_size(len: usize, size: usize) -> Vec<Partition> {
    let size = size.max(1);
    fixed_chunks(len, (len / size).max(1), size)
}

/// `parts - 1` partitions of `chunk` items followed by one holding the rest.
/// Requires `parts >= 1` and `(parts - 1) * chunk <= len`.
fn fixed_chunks(len: usize, parts: usize, chunk: usize) -> Vec<Partition> {
    let last = parts - 1;
    let mut partitions: Vec<Partition> = (0..last)
        .map(|index| Partition {
            index,
            range: index * chunk..(index + 1) * chunk,
        })
        .collect();
    partitions.push(Partition {
        index: last,
        range: last * chunk..len,
    });
    partitions
}
