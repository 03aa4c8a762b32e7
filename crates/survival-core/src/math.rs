//! Numeric helpers shared by the survival crates
//!
//! Sorted-rank counting, NaN-aware reductions, linear interpolation,
//! percentiles and the chi-squared tail probability.

/// Return a sorted copy of `values` (total order, NaN last)
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

/// Number of elements of `sorted` strictly less than `x`
///
/// This is the left insertion position of `x` in `sorted`.
#[inline]
pub fn count_below(sorted: &[f64], x: f64) -> usize {
    sorted.partition_point(|&v| v < x)
}

/// Sum that skips NaN terms; an all-NaN (or empty) input sums to 0
pub fn nan_sum<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().filter(|v| !v.is_nan()).sum()
}

/// Maximum that skips NaN terms; NaN if no term is a number
pub fn nan_max<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
        .unwrap_or(f64::NAN)
}

/// Piecewise-linear interpolation of `(xp, fp)` at `x`
///
/// `xp` must be sorted ascending; repeated entries are allowed. Queries below
/// `xp[0]` return `fp[0]`, queries at or above the last knot return the last
/// value. Between knots the segment `xp[j] <= x < xp[j + 1]` with the largest
/// such `j` is used, so a repeated knot behaves as a jump.
///
/// # Panics
/// Panics if `xp` and `fp` differ in length.
pub fn interpolate(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    assert_eq!(xp.len(), fp.len(), "knots and values must have equal length");
    if x.is_nan() || xp.is_empty() {
        return f64::NAN;
    }
    if x < xp[0] {
        return fp[0];
    }

    let last = xp.len() - 1;
    let j = xp.partition_point(|&b| b <= x) - 1;
    if j >= last {
        return fp[last];
    }

    let slope = (fp[j + 1] - fp[j]) / (xp[j + 1] - xp[j]);
    fp[j] + (x - xp[j]) * slope
}

/// Percentile of sorted data with linear interpolation between order statistics
///
/// `p` is a probability in `[0, 1]` (clamped). Uses the `(n - 1) * p` rank
/// convention. Returns NaN for empty input.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let rank = (sorted.len() - 1) as f64 * p.clamp(0.0, 1.0);
    let lo = rank.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    let frac = rank - lo as f64;
    if frac == 0.0 {
        sorted[lo]
    } else {
        sorted[lo] + frac * (sorted[hi] - sorted[lo])
    }
}

/// Smallest `f64` strictly greater than `x`
///
/// NaN and `+inf` are returned unchanged.
pub fn next_up(x: f64) -> f64 {
    if x.is_nan() || x == f64::INFINITY {
        return x;
    }
    if x == 0.0 {
        return f64::from_bits(1);
    }
    let bits = x.to_bits();
    if x > 0.0 {
        f64::from_bits(bits + 1)
    } else {
        f64::from_bits(bits - 1)
    }
}

/// Distribution-related functions
pub mod distributions {
    /// Chi-squared distribution utilities
    pub mod chi_squared {
        use statrs::function::gamma::gamma_lr;

        /// Survival function `P(X > x)` of a chi-squared variable with `dof` degrees of freedom
        ///
        /// Computed as `1 - P(dof / 2, x / 2)` where `P` is the regularized
        /// lower incomplete gamma function. `x <= 0` gives 1, `x = +inf`
        /// gives 0 and NaN propagates. `dof` must be positive.
        pub fn sf(x: f64, dof: f64) -> f64 {
            if x.is_nan() {
                return f64::NAN;
            }
            if x <= 0.0 {
                return 1.0;
            }
            if x.is_infinite() {
                return 0.0;
            }
            1.0 - gamma_lr(dof / 2.0, x / 2.0)
        }

        #[cfg(test)]
        mod tests {
            use super::*;
            use approx::assert_abs_diff_eq;

            #[test]
            fn test_chi_squared_one_dof() {
                // Critical values of chi^2(1)
                assert_abs_diff_eq!(sf(3.841_458_820_694_124, 1.0), 0.05, epsilon = 1e-8);
                assert_abs_diff_eq!(sf(6.634_896_601_021_214, 1.0), 0.01, epsilon = 1e-8);
                assert_abs_diff_eq!(sf(1.0, 1.0), 0.317_310_507_862_914, epsilon = 1e-8);
            }

            #[test]
            fn test_chi_squared_edges() {
                assert_eq!(sf(0.0, 1.0), 1.0);
                assert_eq!(sf(-2.0, 1.0), 1.0);
                assert_eq!(sf(f64::INFINITY, 1.0), 0.0);
                assert!(sf(f64::NAN, 1.0).is_nan());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_next_up() {
        assert!(next_up(1.0) > 1.0);
        assert_eq!(next_up(1.0), 1.0 + f64::EPSILON);
        assert!(next_up(-1.0) > -1.0);
        assert!(next_up(0.0) > 0.0);
        assert!(next_up(-0.0) > 0.0);

        let big = 2f64.powi(60);
        assert_eq!(big + 1.0, big);
        assert!(next_up(big) > big);
        assert!(next_up(-big) > -big);

        assert_eq!(next_up(f64::MAX), f64::INFINITY);
        assert_eq!(next_up(f64::INFINITY), f64::INFINITY);
        assert!(next_up(f64::NAN).is_nan());
    }

    #[test]
    fn test_count_below() {
        let data = [1.0, 2.0, 2.0, 3.0, 5.0];
        assert_eq!(count_below(&data, 0.5), 0);
        assert_eq!(count_below(&data, 1.0), 0);
        assert_eq!(count_below(&data, 2.0), 1);
        assert_eq!(count_below(&data, 2.5), 3);
        assert_eq!(count_below(&data, 6.0), 5);
        assert_eq!(count_below(&[], 1.0), 0);
    }

    #[test]
    fn test_sorted_puts_nan_last() {
        let out = sorted(&[3.0, f64::NAN, 1.0, 2.0]);
        assert_eq!(&out[..3], &[1.0, 2.0, 3.0]);
        assert!(out[3].is_nan());
    }

    #[test]
    fn test_nan_aware_reductions() {
        assert_eq!(nan_sum([1.0, f64::NAN, 2.0]), 3.0);
        assert_eq!(nan_sum([f64::NAN, f64::NAN]), 0.0);
        assert_eq!(nan_max([1.0, f64::NAN, -4.0, 3.0]), 3.0);
        assert!(nan_max([f64::NAN]).is_nan());
        assert!(nan_max(std::iter::empty()).is_nan());
    }

    #[test]
    fn test_interpolate() {
        let xp = [1.0, 2.0, 4.0];
        let fp = [1.0, 0.5, 0.0];

        assert_eq!(interpolate(0.0, &xp, &fp), 1.0);
        assert_eq!(interpolate(1.0, &xp, &fp), 1.0);
        assert_abs_diff_eq!(interpolate(1.5, &xp, &fp), 0.75, epsilon = 1e-12);
        assert_abs_diff_eq!(interpolate(3.0, &xp, &fp), 0.25, epsilon = 1e-12);
        assert_eq!(interpolate(4.0, &xp, &fp), 0.0);
        assert_eq!(interpolate(10.0, &xp, &fp), 0.0);
        assert!(interpolate(f64::NAN, &xp, &fp).is_nan());
    }

    #[test]
    fn test_interpolate_repeated_knots() {
        // A repeated knot is a vertical jump: the right-hand value wins at the knot
        let xp = [1.0, 2.0, 2.0, 3.0];
        let fp = [1.0, 0.8, 0.4, 0.0];

        assert_abs_diff_eq!(interpolate(1.5, &xp, &fp), 0.9, epsilon = 1e-12);
        assert_eq!(interpolate(2.0, &xp, &fp), 0.4);
        assert_abs_diff_eq!(interpolate(2.5, &xp, &fp), 0.2, epsilon = 1e-12);

        let xp = [6.0, 6.0];
        let fp = [1.0, 0.0];
        assert_eq!(interpolate(5.9, &xp, &fp), 1.0);
        assert_eq!(interpolate(6.0, &xp, &fp), 0.0);
    }

    #[test]
    fn test_quantile_sorted() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(quantile_sorted(&data, 0.5), 3.0);
        assert_eq!(quantile_sorted(&data, 0.0), 1.0);
        assert_eq!(quantile_sorted(&data, 1.0), 5.0);
        assert_abs_diff_eq!(quantile_sorted(&data, 0.1587), 1.6348, epsilon = 1e-12);
        assert_abs_diff_eq!(quantile_sorted(&data, 0.8413), 4.3652, epsilon = 1e-12);
        assert_eq!(quantile_sorted(&[7.0], 0.8413), 7.0);
        assert!(quantile_sorted(&[], 0.5).is_nan());
    }
}
