use approx::{assert_abs_diff_eq, assert_relative_eq};
use dmrikit::special::{bessel_j0, bessel_j1, bessel_jn};
use dmrikit::{DmriError, bessel_j, exp_legendre_coef, exp_legendre_coef_derivative, gamma,
    gamma_lower, laguerre};
use statrs::function::erf::erf;
use std::f64::consts::PI;

// Reference values computed with 30-digit arithmetic.
const J0_REFERENCE: [(f64, f64); 11] = [
    (0.0, 1.0),
    (0.5, 0.9384698072408129),
    (1.0, 0.76519768655796655),
    (2.0, 0.22389077914123567),
    (5.0, -0.1775967713143383),
    (10.0, -0.24593576445134834),
    (15.0, -0.014224472826780773),
    (20.0, 0.16702466434058315),
    (30.0, -0.086367983581040211),
    (40.0, 0.0073668905842372896),
    (50.0, 0.055812327669251815),
];

const J1_REFERENCE: [(f64, f64); 11] = [
    (0.0, 0.0),
    (0.5, 0.24226845767487389),
    (1.0, 0.44005058574493352),
    (2.0, 0.57672480775687339),
    (5.0, -0.32757913759146522),
    (10.0, 0.043472746168861437),
    (15.0, 0.20510403861352276),
    (20.0, 0.066833124175850046),
    (30.0, -0.11875106261662294),
    (40.0, 0.126038318037585),
    (50.0, -0.097511828125175138),
];

#[test]
fn bessel_j0_matches_reference_across_domain() {
    for &(x, expected) in &J0_REFERENCE {
        assert_abs_diff_eq!(bessel_j0(x), expected, epsilon = 1e-7);
        assert_abs_diff_eq!(bessel_j(0.0, x).unwrap(), expected, epsilon = 1e-7);
    }
}

#[test]
fn bessel_j1_matches_reference_across_domain() {
    for &(x, expected) in &J1_REFERENCE {
        assert_abs_diff_eq!(bessel_j1(x), expected, epsilon = 1e-7);
        assert_abs_diff_eq!(bessel_j(1.0, x).unwrap(), expected, epsilon = 1e-7);
    }
}

#[test]
fn bessel_jn_integer_orders() {
    // Spans both the upward (x > n) and downward-Miller (x < n) branches.
    let reference = [
        (2usize, 1.0, 0.11490348493190048),
        (3, 2.5, 0.21660039103911352),
        (5, 10.0, -0.23406152818679364),
        (8, 3.0, 0.00049344177620883479),
        (10, 25.0, -0.075179843948523284),
        (12, 4.0, 6.2644617943122075e-6),
    ];
    for &(n, x, expected) in &reference {
        assert_abs_diff_eq!(bessel_jn(n, x), expected, epsilon = 1e-7);
    }
}

#[test]
fn bessel_half_integer_orders_via_spherical_relation() {
    let reference = [
        (0.5, 1.0, 0.67139670714180309),
        (1.5, 2.0, 0.49129377868716235),
        (2.5, 5.0, 0.24037720111131735),
        (4.5, 10.0, -0.26641575925730714),
    ];
    for &(a, x, expected) in &reference {
        assert_abs_diff_eq!(bessel_j(a, x).unwrap(), expected, epsilon = 1e-10);
    }
}

#[test]
fn gamma_half_integer_matches_closed_form_and_general_evaluator() {
    let reference = [
        (0usize, 1.772453850905516),
        (1, 0.88622692545275801),
        (2, 1.329340388179137),
        (3, 3.3233509704478426),
        (4, 11.631728396567449),
        (5, 52.34277778455352),
        (6, 287.88527781504436),
        (7, 1871.2543057977883),
    ];
    for &(n, expected) in &reference {
        let x = n as f64 + 0.5;
        let closed = gamma(x).unwrap();
        assert_relative_eq!(closed, expected, max_relative = 1e-12);
        // The exact path and the general evaluator must agree.
        assert_relative_eq!(
            closed,
            statrs::function::gamma::gamma(x),
            max_relative = 1e-10
        );
    }
}

#[test]
fn gamma_lower_matches_reference() {
    let reference = [
        (0.5, 1.0, 1.4936482656248541),
        (1.0, 2.0, 0.86466471676338731),
        (2.5, 3.0, 0.92227121230783402),
        (3.0, 0.5, 0.028775355933941373),
    ];
    for &(s, x, expected) in &reference {
        assert_relative_eq!(gamma_lower(s, x).unwrap(), expected, max_relative = 1e-10);
    }
}

#[test]
fn laguerre_matches_reference() {
    let reference = [
        (1usize, 0.5, 2.0, -0.5),
        (2, 1.5, 1.0, 1.375),
        (3, 0.5, 3.0, 0.3125),
        (5, 2.0, 1.5, -2.52421875),
        (7, 0.5, 0.7, -0.96000947555555555),
    ];
    for &(n, alpha, x, expected) in &reference {
        assert_relative_eq!(laguerre(n, alpha, x), expected, max_relative = 1e-12);
    }
}

#[test]
fn exp_legendre_order_zero_closed_form() {
    for a in [0.05f64, 0.3, 1.0, 3.5, 9.0, 27.0] {
        let expected = PI.sqrt() * erf(a.sqrt()) / (2.0 * a.sqrt());
        assert_relative_eq!(
            exp_legendre_coef(a, 0).unwrap(),
            expected,
            max_relative = 1e-13
        );
    }
}

#[test]
fn exp_legendre_vanishes_for_odd_orders() {
    for l in [1, 3, 9, 17, 25] {
        for a in [0.0, 0.5, 10.0] {
            assert_eq!(exp_legendre_coef(a, l).unwrap(), 0.0);
        }
    }
}

#[test]
fn exp_legendre_high_orders_stay_finite_and_decay() {
    // Past the low-order peak the band coefficients decay with order.
    let a = 15.0;
    let mut prev = f64::INFINITY;
    for l in (0..=24).step_by(2) {
        let value = exp_legendre_coef(a, l).unwrap();
        assert!(value.is_finite(), "A_{l}({a}) not finite");
        if l >= 4 {
            assert!(value.abs() < prev, "A_{l}({a}) did not decay");
        }
        prev = value.abs();
    }
}

#[test]
fn exp_legendre_derivative_consistency_at_moderate_argument() {
    let h = 1e-5;
    for l in (0..=20).step_by(2) {
        for a in [10.0_f64, 18.0, 30.0] {
            let numeric = (exp_legendre_coef(a + h, l).unwrap()
                - exp_legendre_coef(a - h, l).unwrap())
                / (2.0 * h);
            let analytic = exp_legendre_coef_derivative(a, l).unwrap();
            assert_relative_eq!(analytic, numeric, max_relative = 1e-4, epsilon = 1e-13);
        }
    }
}

#[test]
fn unsupported_orders_surface_as_errors() {
    assert!(matches!(
        exp_legendre_coef(2.0, 26),
        Err(DmriError::UnsupportedOrder { .. })
    ));
    assert!(matches!(
        exp_legendre_coef_derivative(2.0, 24),
        Err(DmriError::UnsupportedOrder { .. })
    ));
    assert!(matches!(
        bessel_j(0.25, 1.0),
        Err(DmriError::UnsupportedOrder { .. })
    ));
}

#[test]
fn gamma_domain_guard() {
    assert!(matches!(gamma(5e-9), Err(DmriError::Domain { .. })));
    assert!(matches!(gamma(-5e-9), Err(DmriError::Domain { .. })));
}
