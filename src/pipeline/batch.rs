//! Batching: slice an ordered record sequence into contiguous fixed-size
//! groups. A batch is the unit of one outbound request; boundaries never
//! split a record.

/// Produce `ceil(len / batch_size)` contiguous, non-overlapping slices
/// covering all records in original order. The last slice may be short.
/// An empty input yields no batches.
///
/// `batch_size` is validated upstream (`ScoringConfig::validate`) to be
/// at least 1.
pub fn batches<T>(records: &[T], batch_size: usize) -> Vec<&[T]> {
    if records.is_empty() {
        return Vec::new();
    }
    records.chunks(batch_size).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_no_batches() {
        let records: Vec<u32> = vec![];
        assert!(batches(&records, 10).is_empty());
    }

    #[test]
    fn exact_multiple_fills_every_batch() {
        let records: Vec<u32> = (0..20).collect();
        let groups = batches(&records, 10);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 10);
        assert_eq!(groups[1].len(), 10);
    }

    #[test]
    fn last_batch_may_be_short() {
        let records: Vec<u32> = (0..23).collect();
        let groups = batches(&records, 10);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[2].len(), 3);
    }

    #[test]
    fn batch_count_is_ceil_for_various_sizes() {
        for n in 0..30usize {
            for b in 1..7usize {
                let records: Vec<usize> = (0..n).collect();
                let groups = batches(&records, b);
                assert_eq!(groups.len(), n.div_ceil(b), "n={n} b={b}");
            }
        }
    }

    #[test]
    fn concatenation_preserves_original_order() {
        let records: Vec<u32> = (0..17).collect();
        let groups = batches(&records, 5);
        let rejoined: Vec<u32> = groups.concat();
        assert_eq!(rejoined, records);
    }

    #[test]
    fn batch_size_one() {
        let records = vec!["a", "b", "c"];
        let groups = batches(&records, 1);
        assert_eq!(groups.len(), 3);
        assert!(groups.iter().all(|g| g.len() == 1));
    }
}
