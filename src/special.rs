//! Stateless special-function routines used by the model-estimation filters:
//! Gamma and lower incomplete Gamma, Bessel J of integer and half-integer
//! order, and generalized Laguerre polynomials.
//!
//! Dispatch follows the order class of the argument: exact closed forms where
//! one exists (half-integer Gamma, low-order Laguerre, spherical Bessel),
//! recursion or the `statrs` backend otherwise.

use crate::error::DmriError;
use std::f64::consts::PI;

const INT_TOL: f64 = 1e-8;

#[inline]
fn is_int(x: f64) -> bool {
    (x - x.round()).abs() < INT_TOL
}

/// Gamma function Γ(x).
///
/// Positive multiples of 1/2 use the exact closed forms
/// `Γ(n) = (n-1)!` and `Γ(n + 1/2) = (2n-1)!!/2ⁿ · √π`; everything else
/// delegates to the general evaluator. Arguments within `1e-8` of zero are a
/// domain error.
pub fn gamma(x: f64) -> Result<f64, DmriError> {
    if x.abs() < INT_TOL {
        // Pole at zero.
        return Err(DmriError::Domain {
            value: x,
            domain: "{x : |x| >= 1e-8}".to_string(),
        });
    }

    if is_int(2.0 * x) && x > 0.0 {
        return Ok(gamma_half_integer(x));
    }
    Ok(statrs::function::gamma::gamma(x))
}

/// Exact Γ for positive `x` that is a multiple of 1/2.
fn gamma_half_integer(x: f64) -> f64 {
    if is_int(x) {
        let n = x.round() as u64;
        let mut acc = 1.0;
        for k in 2..n {
            acc *= k as f64;
        }
        acc
    } else {
        // x = n + 1/2: Γ = √π · Π_{k=1..n} (2k-1)/2
        let n = (x - 0.5).round() as u64;
        let mut acc = PI.sqrt();
        for k in 1..=n {
            acc *= (2 * k - 1) as f64 / 2.0;
        }
        acc
    }
}

/// Lower incomplete Gamma γ(s, x) = Γ(s) − Γ(s, x).
pub fn gamma_lower(s: f64, x: f64) -> Result<f64, DmriError> {
    let whole = gamma(s)?;
    let upper = statrs::function::gamma::gamma_ui(s, x);
    Ok(whole - upper)
}

/// Bessel function of the first kind J_a(x) for integer or positive
/// half-integer order `a`.
///
/// Negative integer orders use `J_{-n} = (-1)ⁿ J_n`; half-integer orders use
/// the spherical-Bessel relation `J_{l+1/2}(x) = √(2x/π) · j_l(x)`. Negative
/// half-integer orders are rejected (J_a and J_{-a} are linearly independent
/// for non-integer a), and any other order is outside the implemented set.
pub fn bessel_j(a: f64, x: f64) -> Result<f64, DmriError> {
    if is_int(a) {
        let n = a.round() as i64;
        if n < 0 {
            let sign = if n % 2 != 0 { -1.0 } else { 1.0 };
            return Ok(sign * bessel_jn((-n) as usize, x));
        }
        return Ok(bessel_jn(n as usize, x));
    }

    if is_int(2.0 * a) {
        if a < 0.0 {
            return Err(DmriError::Validation(format!(
                "half-integer Bessel order must be positive, got a={a}"
            )));
        }
        let l = (a - 0.5).round() as usize;
        return Ok((2.0 * x / PI).sqrt() * spherical_bessel_j(l, x));
    }

    Err(DmriError::UnsupportedOrder {
        order: (2.0 * a).round() as i32,
        context: "Bessel J (order must be an integer or half-integer)",
    })
}

/// J₀ via the classic rational/asymptotic split (Numerical Recipes).
pub fn bessel_j0(x: f64) -> f64 {
    let ax = x.abs();
    if ax < 8.0 {
        let y = x * x;
        let num = 57568490574.0
            + y * (-13362590354.0
                + y * (651619640.7
                    + y * (-11214424.18 + y * (77392.33017 + y * (-184.9052456)))));
        let den = 57568490410.0
            + y * (1029532985.0
                + y * (9494680.718 + y * (59272.64853 + y * (267.8532712 + y))));
        num / den
    } else {
        let z = 8.0 / ax;
        let y = z * z;
        let xx = ax - 0.785398164;
        let p = 1.0
            + y * (-0.1098628627e-2
                + y * (0.2734510407e-4 + y * (-0.2073370639e-5 + y * 0.2093887211e-6)));
        let q = -0.1562499995e-1
            + y * (0.1430488765e-3
                + y * (-0.6911147651e-5 + y * (0.7621095161e-6 + y * (-0.934935152e-7))));
        (0.636619772 / ax).sqrt() * (xx.cos() * p - z * xx.sin() * q)
    }
}

/// J₁ via the classic rational/asymptotic split (Numerical Recipes).
pub fn bessel_j1(x: f64) -> f64 {
    let ax = x.abs();
    if ax < 8.0 {
        let y = x * x;
        let num = x
            * (72362614232.0
                + y * (-7895059235.0
                    + y * (242396853.1
                        + y * (-2972611.439 + y * (15704.48260 + y * (-30.16036606))))));
        let den = 144725228442.0
            + y * (2300535178.0
                + y * (18583304.74 + y * (99447.43394 + y * (376.9991397 + y))));
        num / den
    } else {
        let z = 8.0 / ax;
        let y = z * z;
        let xx = ax - 2.356194491;
        let p = 1.0
            + y * (0.183105e-2
                + y * (-0.3516396496e-4 + y * (0.2457520174e-5 + y * (-0.240337019e-6))));
        let q = 0.04687499995
            + y * (-0.2002690873e-3
                + y * (0.8449199096e-5 + y * (-0.88228987e-6 + y * 0.105787412e-6)));
        let ans = (0.636619772 / ax).sqrt() * (xx.cos() * p - z * xx.sin() * q);
        if x < 0.0 { -ans } else { ans }
    }
}

/// Integer-order J_n. Upward recursion when `x > n`; Miller's downward
/// recurrence with renormalization otherwise, where the upward direction is
/// unstable.
pub fn bessel_jn(n: usize, x: f64) -> f64 {
    match n {
        0 => return bessel_j0(x),
        1 => return bessel_j1(x),
        _ => {}
    }

    const ACC: f64 = 40.0;
    const BIGNO: f64 = 1.0e10;
    const BIGNI: f64 = 1.0e-10;

    let ax = x.abs();
    if ax == 0.0 {
        return 0.0;
    }

    let ans = if ax > n as f64 {
        let tox = 2.0 / ax;
        let mut bjm = bessel_j0(ax);
        let mut bj = bessel_j1(ax);
        for j in 1..n {
            let bjp = j as f64 * tox * bj - bjm;
            bjm = bj;
            bj = bjp;
        }
        bj
    } else {
        let tox = 2.0 / ax;
        let m = 2 * ((n + (ACC * n as f64).sqrt() as usize) / 2);
        let mut jsum = false;
        let mut bjp = 0.0_f64;
        let mut ans = 0.0_f64;
        let mut sum = 0.0_f64;
        let mut bj = 1.0_f64;
        for j in (1..=m).rev() {
            let bjm = j as f64 * tox * bj - bjp;
            bjp = bj;
            bj = bjm;
            if bj.abs() > BIGNO {
                bj *= BIGNI;
                bjp *= BIGNI;
                ans *= BIGNI;
                sum *= BIGNI;
            }
            if jsum {
                sum += bj;
            }
            jsum = !jsum;
            if j == n {
                ans = bjp;
            }
        }
        sum = 2.0 * sum - bj;
        ans / sum
    };

    if x < 0.0 && n % 2 == 1 { -ans } else { ans }
}

/// Spherical Bessel j_l(x): closed forms for l ∈ {0, 1}, upward recursion
/// above (adequate for the small orders the SH machinery uses).
pub fn spherical_bessel_j(l: usize, x: f64) -> f64 {
    if x.abs() < 1e-12 {
        return if l == 0 { 1.0 } else { 0.0 };
    }
    let j0 = x.sin() / x;
    if l == 0 {
        return j0;
    }
    let j1 = x.sin() / (x * x) - x.cos() / x;
    if l == 1 {
        return j1;
    }
    let mut jm = j0;
    let mut j = j1;
    for k in 1..l {
        let jp = (2 * k + 1) as f64 / x * j - jm;
        jm = j;
        j = jp;
    }
    j
}

/// Generalized Laguerre polynomial L_n^{(α)}(x).
///
/// Closed forms for n ≤ 3, the standard three-term recurrence above.
pub fn laguerre(n: usize, alpha: f64, x: f64) -> f64 {
    match n {
        0 => 1.0,
        1 => 1.0 + alpha - x,
        2 => x * x / 2.0 - (alpha + 2.0) * x + (alpha + 1.0) * (alpha + 2.0) / 2.0,
        3 => {
            -x * x * x / 6.0 + (alpha + 3.0) * x * x / 2.0
                - (alpha + 2.0) * (alpha + 3.0) * x / 2.0
                + (alpha + 1.0) * (alpha + 2.0) * (alpha + 3.0) / 6.0
        }
        _ => {
            let mut lm = 1.0;
            let mut l = 1.0 + alpha - x;
            for k in 2..=n {
                let kf = k as f64;
                let lp = ((2.0 * kf - 1.0 + alpha - x) * l - (kf - 1.0 + alpha) * lm) / kf;
                lm = l;
                l = lp;
            }
            l
        }
    }
}
