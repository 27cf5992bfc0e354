//! Julia escape-time iteration.

use std::f64::consts::LN_2;

use crate::complex::Complex;

/// Squared escape radius. An orbit with `|z|² > 4` never returns.
pub const ESCAPE_RADIUS_SQ: f64 = 4.0;

/// Smooth escape time of `z0` under `z ← z² + c`.
///
/// Returns a fractional iteration count. An orbit escaping at step `i`
/// yields `i + 1 - log2(log2|z|)`, which interpolates between integer counts
/// and removes color banding. An orbit that stays bounded for the whole
/// budget yields exactly `max_iterations`.
///
/// The result lies in `[0, max_iterations]` when `|z0| <= 4` and `|c| <= 2`,
/// which covers every pixel of the rendered viewport. A `z0` further out
/// escapes at step 0 with a negative value.
#[must_use]
pub fn escape_time(z0: Complex, c: Complex, max_iterations: u32) -> f64 {
    let mut z = z0;
    for i in 0..max_iterations {
        let norm_sqr = z.norm_sqr();
        // norm_sqr > 4 keeps log_zn > ln 2, so nu stays finite.
        if norm_sqr > ESCAPE_RADIUS_SQ {
            let log_zn = norm_sqr.ln() / 2.0;
            let nu = (log_zn / LN_2).ln() / LN_2;
            return f64::from(i) + 1.0 - nu;
        }
        z = z.square_add(c);
    }
    f64::from(max_iterations)
}

/// Integer escape count of `z0` under `z ← z² + c`.
///
/// The banded counterpart of [`escape_time`]: the step at which `|z|² > 4`
/// first holds, or `max_iterations` if it never does.
#[must_use]
pub fn escape_count(z0: Complex, c: Complex, max_iterations: u32) -> u32 {
    let mut z = z0;
    for i in 0..max_iterations {
        if z.norm_sqr() > ESCAPE_RADIUS_SQ {
            return i;
        }
        z = z.square_add(c);
    }
    max_iterations
}
