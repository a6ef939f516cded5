//! Point-wise averaging of series.

use crate::error::{StoreError, StoreResult};
use crate::types::{Rgb, Series};

/// Merge `inputs` into a single series by point-wise arithmetic mean.
///
/// Sample `i` of the output is the sum of the inputs' samples at `i`
/// divided by the number of inputs, in f64 arithmetic. Every input must
/// have the same sample count and the output keeps that count. The output
/// carries the given label and color and is created active.
pub fn merge(inputs: &[&Series], label: &str, color: Rgb) -> StoreResult<Series> {
    let first = inputs.first().ok_or(StoreError::EmptyMergeInput)?;
    let len = first.len();
    for series in &inputs[1..] {
        if series.len() != len {
            return Err(StoreError::LengthMismatch {
                label: series.label.clone(),
                expected: len,
                actual: series.len(),
            });
        }
    }

    let count = inputs.len() as f64;
    let samples = (0..len)
        .map(|i| inputs.iter().map(|s| s.samples[i]).sum::<f64>() / count)
        .collect();

    Ok(Series::new(label, samples, color))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    // Integer-valued samples keep f64 sums exact, so order invariance can
    // be asserted with plain equality.
    fn same_len_inputs() -> impl Strategy<Value = Vec<Vec<f64>>> {
        (1usize..6, 0usize..24).prop_flat_map(|(count, len)| {
            prop::collection::vec(
                prop::collection::vec((-1000i32..1000).prop_map(f64::from), len..=len),
                count..=count,
            )
        })
    }

    fn to_series(rows: &[Vec<f64>]) -> Vec<Series> {
        rows.iter()
            .enumerate()
            .map(|(i, samples)| Series::new(format!("#{i}"), samples.clone(), Rgb::palette(i)))
            .collect()
    }

    proptest! {
        #[test]
        fn output_len_matches_inputs(rows in same_len_inputs()) {
            let inputs = to_series(&rows);
            let refs: Vec<&Series> = inputs.iter().collect();

            let merged = merge(&refs, "avg", Rgb::palette(0)).unwrap();
            prop_assert_eq!(merged.len(), rows[0].len());
        }

        #[test]
        fn mean_stays_within_input_bounds(rows in same_len_inputs()) {
            let inputs = to_series(&rows);
            let refs: Vec<&Series> = inputs.iter().collect();

            let merged = merge(&refs, "avg", Rgb::palette(0)).unwrap();
            for i in 0..merged.len() {
                let column: Vec<f64> = rows.iter().map(|r| r[i]).collect();
                let min = column.iter().cloned().fold(f64::INFINITY, f64::min);
                let max = column.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                prop_assert!(merged.samples[i] >= min && merged.samples[i] <= max);
            }
        }

        #[test]
        fn input_order_does_not_matter(rows in same_len_inputs()) {
            let inputs = to_series(&rows);
            let refs: Vec<&Series> = inputs.iter().collect();
            let reversed: Vec<&Series> = inputs.iter().rev().collect();

            let forward = merge(&refs, "avg", Rgb::palette(0)).unwrap();
            let backward = merge(&reversed, "avg", Rgb::palette(0)).unwrap();
            prop_assert_eq!(forward.samples, backward.samples);
        }

        #[test]
        fn constant_inputs_give_constant_output(
            constants in prop::collection::vec(-1000i32..1000, 1..6),
            len in 1usize..24,
        ) {
            let inputs: Vec<Series> = constants
                .iter()
                .enumerate()
                .map(|(i, &c)| {
                    Series::new(format!("#{i}"), vec![f64::from(c); len], Rgb::palette(i))
                })
                .collect();
            let refs: Vec<&Series> = inputs.iter().collect();

            let merged = merge(&refs, "avg", Rgb::palette(0)).unwrap();
            prop_assert!(merged.samples.windows(2).all(|w| w[0] == w[1]));
        }
    }
}
