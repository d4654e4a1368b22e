//! Count reconciliation: force parsed results into 1:1 positional alignment
//! with the batch's records. The model sometimes over- or under-produces
//! fragments; extras are dropped and gaps are padded with blanks. Fragment
//! order is trusted to match record order.

use crate::rubric::{Rubric, ScoreResult};

/// Truncate or pad `results` so that exactly `expected` results come back,
/// one per record in the batch.
pub fn reconcile(
    mut results: Vec<ScoreResult>,
    expected: usize,
    rubric: &Rubric,
) -> Vec<ScoreResult> {
    if results.len() > expected {
        results.truncate(expected);
    } else {
        while results.len() < expected {
            results.push(rubric.blank_result());
        }
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marked(rubric: &Rubric, item: &str) -> ScoreResult {
        let mut result = rubric.blank_result();
        result.set(item, "1");
        result
    }

    #[test]
    fn parity_for_all_mismatch_shapes() {
        let rubric = Rubric::default();
        let k = 5;
        for parsed_count in [0, k - 1, k, k + 1, 2 * k] {
            let results = vec![rubric.blank_result(); parsed_count];
            let reconciled = reconcile(results, k, &rubric);
            assert_eq!(reconciled.len(), k, "parsed_count={parsed_count}");
        }
    }

    #[test]
    fn exact_count_passes_through_unchanged() {
        let rubric = Rubric::default();
        let results = vec![
            marked(&rubric, "積極傾聽"),
            marked(&rubric, "解決問題"),
        ];
        let reconciled = reconcile(results.clone(), 2, &rubric);
        assert_eq!(reconciled, results);
    }

    #[test]
    fn overproduction_keeps_the_first_results() {
        let rubric = Rubric::default();
        let results = vec![
            marked(&rubric, "積極傾聽"),
            marked(&rubric, "解決問題"),
            marked(&rubric, "情感支持"),
        ];
        let reconciled = reconcile(results, 2, &rubric);
        assert_eq!(reconciled.len(), 2);
        assert!(reconciled[0].is_marked("積極傾聽"));
        assert!(reconciled[1].is_marked("解決問題"));
    }

    #[test]
    fn underproduction_pads_the_tail_with_blanks() {
        let rubric = Rubric::default();
        let results = vec![marked(&rubric, "積極傾聽")];
        let reconciled = reconcile(results, 3, &rubric);
        assert_eq!(reconciled.len(), 3);
        assert!(reconciled[0].is_marked("積極傾聽"));
        assert!(reconciled[1].is_blank(&rubric));
        assert!(reconciled[2].is_blank(&rubric));
    }

    #[test]
    fn padded_results_contain_every_rubric_key() {
        let rubric = Rubric::default();
        let reconciled = reconcile(Vec::new(), 2, &rubric);
        for result in &reconciled {
            for item in rubric.items() {
                assert_eq!(result.get(item), "");
            }
        }
    }
}
