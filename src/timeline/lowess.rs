//! Locally weighted scatterplot smoothing.
//!
//! Thin wrapper over the `lowess` crate: [`SmoothingParams`] maps onto its
//! neighbourhood fraction and robustness iteration count, and results are
//! returned in input order.

use anyhow::{Result, anyhow, ensure};
use lowess::prelude::*;

use crate::timeline::types::SmoothingParams;

/// Smooths `ys` against `xs`, returning one fitted value per input point in input order.
///
/// `xs` need not be sorted. A single point is returned unchanged; empty input
/// gives empty output.
pub fn lowess(xs: &[f64], ys: &[f64], params: &SmoothingParams) -> Result<Vec<f64>> {
    ensure!(
        xs.len() == ys.len(),
        "lowess: {} x values but {} y values",
        xs.len(),
        ys.len()
    );

    let n = xs.len();
    if n < 2 {
        return Ok(ys.to_vec());
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| xs[a].total_cmp(&xs[b]));

    let x: Vec<f64> = order.iter().map(|&i| xs[i]).collect();
    let y: Vec<f64> = order.iter().map(|&i| ys[i]).collect();

    let model = Lowess::new()
        .fraction(params.frac)
        .iterations(params.iterations)
        .adapter(Batch)
        .build()
        .map_err(|e| anyhow!("invalid smoothing parameters: {:?}", e))?;
    let fitted = model
        .fit(&x, &y)
        .map_err(|e| anyhow!("lowess fit failed: {:?}", e))?
        .y;

    ensure!(
        fitted.len() == n,
        "lowess returned {} values for {} points",
        fitted.len(),
        n
    );

    let mut out = vec![0.0; n];
    for (pos, &i) in order.iter().enumerate() {
        out[i] = fitted[pos];
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_empty_and_single_point() {
        let params = SmoothingParams::default();

        assert!(lowess(&[], &[], &params).unwrap().is_empty());
        assert_eq!(lowess(&[1.0], &[9.0], &params).unwrap(), vec![9.0]);
    }

    #[test]
    fn test_length_mismatch_is_error() {
        let result = lowess(&[1.0, 2.0, 3.0], &[8.0, 8.5], &SmoothingParams::default());

        let err = result.unwrap_err().to_string();
        assert!(err.contains("3 x values but 2 y values"), "{}", err);
    }

    #[test]
    fn test_two_points_stay_in_hull() {
        let fitted = lowess(&[1.0, 2.0], &[7.0, 7.5], &SmoothingParams::default()).unwrap();

        assert_eq!(fitted.len(), 2);
        for v in fitted {
            assert!((7.0 - EPS..=7.5 + EPS).contains(&v), "{} outside hull", v);
        }
    }

    #[test]
    fn test_near_linear_season_stays_in_hull() {
        let fitted =
            lowess(&[1.0, 2.0, 3.0], &[8.0, 8.5, 9.0], &SmoothingParams::default()).unwrap();

        assert_eq!(fitted.len(), 3);
        for v in fitted {
            assert!((8.0 - EPS..=9.0 + EPS).contains(&v), "{} outside hull", v);
        }
    }

    #[test]
    fn test_linear_trend_preserved() {
        let x: Vec<f64> = (1..=10).map(f64::from).collect();
        let y: Vec<f64> = x.iter().map(|v| 7.0 + 0.2 * v).collect();

        let fitted = lowess(&x, &y, &SmoothingParams::default()).unwrap();

        assert!(fitted[0] < fitted[9]);
        for v in &fitted[3..7] {
            assert!((7.2 - EPS..=9.0 + EPS).contains(v), "{} outside hull", v);
        }
    }

    #[test]
    fn test_robustness_damps_outlier() {
        let x: Vec<f64> = (1..=10).map(f64::from).collect();
        let mut y = vec![8.0; 10];
        y[4] = 3.0;

        let plain = lowess(
            &x,
            &y,
            &SmoothingParams {
                frac: 0.8,
                iterations: 0,
            },
        )
        .unwrap();
        let robust = lowess(&x, &y, &SmoothingParams::default()).unwrap();

        assert!(robust[4] > plain[4]);
        assert!(robust[4] > 7.5);
    }

    #[test]
    fn test_unsorted_input_keeps_input_order() {
        let sorted = lowess(
            &[1.0, 2.0, 3.0, 4.0, 5.0],
            &[8.1, 8.6, 7.9, 8.8, 9.0],
            &SmoothingParams::default(),
        )
        .unwrap();
        let shuffled = lowess(
            &[3.0, 1.0, 5.0, 2.0, 4.0],
            &[7.9, 8.1, 9.0, 8.6, 8.8],
            &SmoothingParams::default(),
        )
        .unwrap();

        assert!((shuffled[0] - sorted[2]).abs() < EPS);
        assert!((shuffled[1] - sorted[0]).abs() < EPS);
        assert!((shuffled[2] - sorted[4]).abs() < EPS);
        assert!((shuffled[3] - sorted[1]).abs() < EPS);
        assert!((shuffled[4] - sorted[3]).abs() < EPS);
    }

    #[test]
    fn test_deterministic() {
        let x: Vec<f64> = (1..=8).map(f64::from).collect();
        let y = [8.1, 8.4, 7.9, 8.8, 8.6, 9.0, 8.7, 9.2];
        let params = SmoothingParams::default();

        assert_eq!(
            lowess(&x, &y, &params).unwrap(),
            lowess(&x, &y, &params).unwrap()
        );
    }
}
