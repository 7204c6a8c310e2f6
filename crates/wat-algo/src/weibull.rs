//! Weibull fitting and goodness-of-fit.
//!
//! Maximum-likelihood estimation with the location fixed at 0: Newton-Raphson
//! on the profile log-likelihood finds the shape parameter, the scale then
//! follows analytically. Goodness-of-fit is a one-sample Kolmogorov-Smirnov
//! test of the sample set against the fitted CDF.

use serde::Serialize;
use wat_core::{WatError, WatResult, WeibullParams};

/// Maximum Newton-Raphson iterations for the shape parameter.
const MAX_ITER: usize = 100;

/// Convergence tolerance for Newton-Raphson.
const TOL: f64 = 1e-10;

/// Result of a maximum-likelihood Weibull fit.
#[derive(Debug, Clone, Serialize)]
pub struct WeibullFit {
    /// Fitted shape and scale.
    pub params: WeibullParams,
    /// Log-likelihood at the fitted parameters.
    pub log_likelihood: f64,
    /// Number of Newton-Raphson iterations used.
    pub iterations: usize,
}

/// Drop non-finite values, then drop non-positive values.
///
/// The returned vector satisfies the cleaned-sample invariant: every value
/// is finite and strictly positive. The caller decides whether an empty
/// result is fatal.
pub fn clean_speeds(raw: &[f64]) -> Vec<f64> {
    raw.iter()
        .copied()
        .filter(|v| v.is_finite())
        .filter(|&v| v > 0.0)
        .collect()
}

/// Fit a Weibull distribution to wind-speed samples via MLE, location 0.
///
/// The profile likelihood equation for the shape k is
///
/// ```text
/// f(k) = n/k + sum(ln v_i) - n * sum(v_i^k ln v_i) / sum(v_i^k) = 0
/// ```
///
/// solved by Newton-Raphson from k0 = 1.2; the scale then is
/// `c = (sum(v_i^k) / n)^(1/k)`.
///
/// # Errors
///
/// `Validation` if fewer than 2 samples, any sample is non-positive or
/// non-finite (run [`clean_speeds`] first), or the iteration fails to
/// converge to a positive finite parameter pair.
pub fn fit_weibull(samples: &[f64]) -> WatResult<WeibullFit> {
    let n = samples.len();
    if n < 2 {
        return Err(WatError::Validation(format!(
            "Weibull fit needs at least 2 samples, got {n}"
        )));
    }
    if !samples.iter().all(|&v| v.is_finite() && v > 0.0) {
        return Err(WatError::Validation(
            "Weibull fit requires finite, strictly positive samples".into(),
        ));
    }

    let ln_v: Vec<f64> = samples.iter().map(|v| v.ln()).collect();
    let sum_ln_v: f64 = ln_v.iter().sum();
    let n_f = n as f64;

    // Newton-Raphson on the profile likelihood.
    // f(k)  = n/k + sum(ln v_i) - n * S1 / S0
    // f'(k) = -n/k^2 - n * (S2*S0 - S1^2) / S0^2
    // with S0 = sum(v_i^k), S1 = sum(v_i^k ln v_i), S2 = sum(v_i^k ln^2 v_i)
    let mut shape = 1.2_f64;
    let mut iterations = 0;

    for iter in 0..MAX_ITER {
        iterations = iter + 1;

        let mut s0 = 0.0_f64;
        let mut s1 = 0.0_f64;
        let mut s2 = 0.0_f64;
        for (i, &v) in samples.iter().enumerate() {
            let v_k = v.powf(shape);
            let lv = ln_v[i];
            s0 += v_k;
            s1 += v_k * lv;
            s2 += v_k * lv * lv;
        }

        if s0 == 0.0 {
            return Err(WatError::Validation("degenerate sample set".into()));
        }

        let f_val = n_f / shape + sum_ln_v - n_f * s1 / s0;
        let f_prime = -n_f / (shape * shape) - n_f * (s2 * s0 - s1 * s1) / (s0 * s0);

        if f_prime.abs() < 1e-30 {
            return Err(WatError::Validation(
                "Weibull fit: profile likelihood derivative vanished".into(),
            ));
        }

        let delta = f_val / f_prime;
        shape -= delta;

        // Keep the shape in the valid domain
        if shape <= 0.0 {
            shape = 0.01;
        }

        if delta.abs() < TOL {
            break;
        }

        if iter == MAX_ITER - 1 {
            return Err(WatError::Validation(format!(
                "Weibull fit did not converge in {MAX_ITER} iterations"
            )));
        }
    }

    let s0: f64 = samples.iter().map(|v| v.powf(shape)).sum();
    let scale = (s0 / n_f).powf(1.0 / shape);

    let params = WeibullParams::new(shape, scale).map_err(|_| {
        WatError::Validation(format!(
            "Weibull fit produced invalid parameters (k = {shape}, c = {scale})"
        ))
    })?;

    let log_likelihood = n_f * shape.ln() - n_f * shape * scale.ln() + (shape - 1.0) * sum_ln_v
        - samples.iter().map(|&v| (v / scale).powf(shape)).sum::<f64>();

    Ok(WeibullFit {
        params,
        log_likelihood,
        iterations,
    })
}

/// One-sample Kolmogorov-Smirnov test result.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct KsTest {
    /// D = max |F_n(x) - F(x)| over the sample.
    pub statistic: f64,
    /// Asymptotic p-value. Informational, never a pass/fail gate here.
    pub p_value: f64,
}

/// One-sample KS test of `samples` against the fitted Weibull CDF.
///
/// The p-value uses the Kolmogorov asymptotic series
/// `P(D > x) = 2 sum (-1)^(j-1) exp(-2 j^2 lambda^2)` with the Stephens
/// small-sample correction `lambda = (sqrt(n) + 0.12 + 0.11/sqrt(n)) * D`.
///
/// # Errors
///
/// `Validation` for fewer than 5 samples or non-finite values, `Config` for
/// invalid parameters.
pub fn ks_test(samples: &[f64], params: &WeibullParams) -> WatResult<KsTest> {
    params.validate()?;
    let n = samples.len();
    if n < 5 {
        return Err(WatError::Validation(format!(
            "KS test needs at least 5 samples, got {n}"
        )));
    }
    if samples.iter().any(|v| !v.is_finite()) {
        return Err(WatError::Validation(
            "KS test requires finite samples".into(),
        ));
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("finite values"));

    let n_f = n as f64;
    let mut d_stat = 0.0_f64;
    for (i, &x) in sorted.iter().enumerate() {
        let cdf = params.cdf(x);
        let ecdf_above = (i + 1) as f64 / n_f;
        let ecdf_below = i as f64 / n_f;
        d_stat = d_stat.max((ecdf_above - cdf).abs());
        d_stat = d_stat.max((ecdf_below - cdf).abs());
    }

    let lambda = (n_f.sqrt() + 0.12 + 0.11 / n_f.sqrt()) * d_stat;
    let mut p_value = 0.0;
    for j in 1..=100 {
        let jf = j as f64;
        let sign = if j % 2 == 1 { 1.0 } else { -1.0 };
        let term = sign * (-2.0 * jf * jf * lambda * lambda).exp();
        p_value += term;
        if term.abs() < 1e-15 {
            break;
        }
    }
    p_value = (2.0 * p_value).clamp(0.0, 1.0);

    Ok(KsTest {
        statistic: d_stat,
        p_value,
    })
}
