//! Integration tests for the compounded overnight discounting method.
//!
//! The table-driven cases use a provider that only knows the discount factors
//! at the period boundaries and the payment time:
//!
//! | t    | P(t)      | role                |
//! |------|-----------|---------------------|
//! | 0.1  | 1.000000  | start of period 1   |
//! | 0.6  | 0.993333  | end of period 1     |
//! | 0.7  | 0.986667  | start of period 2   |
//! | 1.2  | 0.980000  | end of period 2     |
//! | 1.3  | 0.970000  | payment             |

mod common;

use accrual_config::SensitivityConfig;
use accrual_core::{Currency, Date};
use accrual_curves::prelude::*;
use accrual_pricing::prelude::*;
use approx::assert_relative_eq;
use proptest::prelude::*;

use common::{init_tracing, relative_error, TableProvider};

const NOTIONAL: f64 = 1_000_000.0;
const STARTS: [f64; 2] = [0.1, 0.7];
const ENDS: [f64; 2] = [0.6, 1.2];
const ACCRUALS: [f64; 2] = [0.5, 0.5];
const PAYMENT: f64 = 1.3;
const PAYMENT_DF: f64 = 0.97;

fn boundary_dfs() -> [f64; 4] {
    let step = 0.02 / 3.0;
    [1.0, 1.0 - step, 1.0 - 2.0 * step, 0.98]
}

fn table_provider() -> TableProvider {
    let [p0, p1, p2, p3] = boundary_dfs();
    TableProvider::new(
        Currency::BRL,
        RateIndex::cdi(),
        &[(0.1, p0), (0.6, p1), (0.7, p2), (1.2, p3), (PAYMENT, PAYMENT_DF)],
    )
}

fn two_period_coupon() -> CompoundedOvernightCoupon {
    CompoundedOvernightCoupon::new(
        Currency::BRL,
        PAYMENT,
        NOTIONAL,
        RateIndex::cdi(),
        STARTS.to_vec(),
        ENDS.to_vec(),
        ACCRUALS.to_vec(),
    )
    .unwrap()
}

fn central_difference(h: f64, pv: impl Fn(f64) -> f64) -> f64 {
    (pv(h) - pv(-h)) / (2.0 * h)
}

// =============================================================================
// CONCRETE SCENARIO
// =============================================================================

#[test]
fn test_two_period_present_value_by_substitution() {
    init_tracing();
    let curves = table_provider();
    let [p0, p1, p2, p3] = boundary_dfs();

    let f1 = (p0 / p1).powf(1.0 / 0.5) - 1.0;
    let f2 = (p2 / p3).powf(1.0 / 0.5) - 1.0;
    let expected = PAYMENT_DF * NOTIONAL * (1.0 + f1).powf(0.5) * (1.0 + f2).powf(0.5);

    let pv = CompoundedOvernightDiscountingMethod
        .present_value(&two_period_coupon(), &curves)
        .unwrap();
    assert_eq!(pv.len(), 1);
    assert!(relative_error(pv.amount(Currency::BRL), expected) < 1e-10);
}

#[test]
fn test_two_period_sensitivity_shape() {
    init_tracing();
    let curves = table_provider();
    let sensitivity = CompoundedOvernightDiscountingMethod
        .present_value_curve_sensitivity(&two_period_coupon(), &curves)
        .unwrap();

    assert_eq!(sensitivity.len(), 1);
    let brl = sensitivity.get(Currency::BRL).unwrap();
    let name = curves.curve_name();

    let discounting = &brl.discounting()[name];
    assert_eq!(discounting.len(), 1);
    assert_eq!(discounting[0].0, PAYMENT);

    let forward = &brl.forward()[name];
    assert_eq!(forward.len(), 2);
    for (i, s) in forward.iter().enumerate() {
        assert_eq!((s.start, s.end, s.accrual_factor), (STARTS[i], ENDS[i], ACCRUALS[i]));
    }
}

// =============================================================================
// SINGLE PERIOD CLOSED FORM
// =============================================================================

#[test]
fn test_single_period_compounding_identity() {
    let curves = MulticurveProvider::builder(Date::from_ymd(2025, 1, 2).unwrap())
        .curve(YieldCurve::new("GBP-SONIA", vec![0.5, 1.0, 2.0], vec![0.046, 0.044, 0.041]).unwrap())
        .discounting(Currency::GBP, "GBP-SONIA")
        .forward(RateIndex::sonia(), "GBP-SONIA")
        .build()
        .unwrap();
    let coupon = CompoundedOvernightCoupon::new(
        Currency::GBP,
        1.02,
        2_500_000.0,
        RateIndex::sonia(),
        vec![0.75],
        vec![1.0],
        vec![0.25],
    )
    .unwrap();

    let forward = CompoundedOvernightDiscountingMethod::annually_compounded_forward_rate(
        Currency::GBP,
        0.75,
        1.0,
        0.25,
        &curves,
    )
    .unwrap();
    let df = curves.discount_factor(Currency::GBP, 1.02).unwrap();
    let pv = CompoundedOvernightDiscountingMethod
        .present_value(&coupon, &curves)
        .unwrap();
    assert_relative_eq!(
        pv.amount(Currency::GBP),
        df * 2_500_000.0 * (1.0 + forward).powf(0.25),
        max_relative = 1e-14
    );
}

// =============================================================================
// FINITE-DIFFERENCE CONSISTENCY
// =============================================================================

#[test]
fn test_discounting_entry_matches_payment_time_bump() {
    let curves = table_provider();
    let coupon = two_period_coupon();
    let analytic = CompoundedOvernightDiscountingMethod
        .present_value_curve_sensitivity(&coupon, &curves)
        .unwrap()
        .get(Currency::BRL)
        .unwrap()
        .discounting()[curves.curve_name()][0]
        .1;

    let numeric = central_difference(1e-6, |shift| {
        let bumped = PointBump::zero_rate(Currency::BRL, PAYMENT, shift).apply(&curves);
        CompoundedOvernightDiscountingMethod
            .present_value(&coupon, &bumped)
            .unwrap()
            .amount(Currency::BRL)
    });
    assert_relative_eq!(analytic, numeric, max_relative = 1e-7);
}

#[test]
fn test_forward_entries_match_period_forward_bumps() {
    let curves = table_provider();
    let coupon = two_period_coupon();
    let sensitivity = CompoundedOvernightDiscountingMethod
        .present_value_curve_sensitivity(&coupon, &curves)
        .unwrap();
    let forward = &sensitivity.get(Currency::BRL).unwrap().forward()[curves.curve_name()];

    for i in 0..2 {
        let numeric = central_difference(1e-6, |shift| {
            let bump =
                PointBump::discount_forward(Currency::BRL, STARTS[i], ENDS[i], ACCRUALS[i], shift);
            CompoundedOvernightDiscountingMethod
                .present_value(&coupon, &bump.apply(&curves))
                .unwrap()
                .amount(Currency::BRL)
        });
        assert_relative_eq!(forward[i].value, numeric, max_relative = 1e-6);
    }
}

#[test]
fn test_checker_agrees_with_point_entries() {
    let curves = table_provider();
    let coupon = Coupon::from(two_period_coupon());
    let checker = FiniteDifferenceChecker::new(&SensitivityConfig::default()).unwrap();
    let sensitivity = PresentValueCurveSensitivityDiscountingCalculator
        .coupon(&coupon, &curves)
        .unwrap();
    let brl = sensitivity.get(Currency::BRL).unwrap();

    let dsc = checker
        .discounting_sensitivity(&coupon, &curves, Currency::BRL, PAYMENT)
        .unwrap();
    assert_relative_eq!(brl.discounting()[curves.curve_name()][0].1, dsc, max_relative = 1e-6);

    let fwd = checker
        .discount_forward_sensitivity(&coupon, &curves, Currency::BRL, 0.7, 1.2, 0.5)
        .unwrap();
    assert_relative_eq!(brl.forward()[curves.curve_name()][1].value, fwd, max_relative = 1e-6);

    // The method projects from the discounting curve, not through `forward_rate`.
    let index = checker
        .index_forward_sensitivity(&coupon, &curves, &RateIndex::cdi(), 0.7, 1.2)
        .unwrap();
    assert_eq!(index, 0.0);
}

#[test]
fn test_node_sensitivities_match_bumped_curves() {
    init_tracing();
    let curves = MulticurveProvider::builder(Date::from_ymd(2025, 1, 2).unwrap())
        .curve(
            YieldCurve::new(
                "BRL-CDI",
                vec![0.25, 0.5, 1.0, 2.0, 5.0],
                vec![0.1105, 0.1130, 0.1180, 0.1210, 0.1190],
            )
            .unwrap(),
        )
        .discounting(Currency::BRL, "BRL-CDI")
        .forward(RateIndex::cdi(), "BRL-CDI")
        .build()
        .unwrap();
    let coupon = Coupon::from(
        CompoundedOvernightCoupon::new(
            Currency::BRL,
            1.6,
            -3_000_000.0,
            RateIndex::cdi(),
            vec![0.4, 0.65, 0.9, 1.15],
            vec![0.65, 0.9, 1.15, 1.4],
            vec![0.25, 0.25, 0.25, 0.25],
        )
        .unwrap(),
    );

    let checker = FiniteDifferenceChecker::default();
    let mismatches = checker.check(&coupon, &curves).unwrap();
    assert!(mismatches.is_empty(), "mismatches: {mismatches:?}");

    let analytic = checker.analytic_node_sensitivities(&coupon, &curves).unwrap();
    let nodes = analytic.get("BRL-CDI").unwrap();
    assert_eq!(nodes.len(), 5);
    // Nothing is read beyond 2Y.
    assert_eq!(nodes[4], 0.0);
}

// =============================================================================
// ARGUMENT CHECKS
// =============================================================================

#[test]
fn test_non_positive_accrual_factor_rejected() {
    let curves = table_provider();
    for delta in [0.0, -0.5] {
        let result = CompoundedOvernightDiscountingMethod::annually_compounded_forward_rate(
            Currency::BRL,
            0.1,
            0.6,
            delta,
            &curves,
        );
        assert!(matches!(result, Err(PricingError::InvalidArgument { .. })));
    }
}

#[test]
fn test_missing_inputs_rejected() {
    let curves = table_provider();
    let coupon = Coupon::from(two_period_coupon());

    let no_curves = Valuation::new().coupon(&coupon);
    assert!(matches!(
        no_curves.present_value(),
        Err(PricingError::NullArgument { .. })
    ));
    assert!(matches!(
        no_curves.curve_sensitivity(),
        Err(PricingError::NullArgument { .. })
    ));

    let no_coupon = Valuation::new().curves(&curves);
    assert!(matches!(
        no_coupon.present_value(),
        Err(PricingError::NullArgument { .. })
    ));
    assert!(matches!(
        no_coupon.curve_sensitivity(),
        Err(PricingError::NullArgument { .. })
    ));

    let pv = no_curves.curves(&curves).present_value().unwrap();
    assert!(pv.amount(Currency::BRL) > 0.0);
}

#[test]
fn test_unknown_currency_is_curve_error() {
    let curves = table_provider();
    let coupon = CompoundedOvernightCoupon::new(
        Currency::USD,
        PAYMENT,
        NOTIONAL,
        RateIndex::sofr(),
        STARTS.to_vec(),
        ENDS.to_vec(),
        ACCRUALS.to_vec(),
    )
    .unwrap();
    assert!(matches!(
        CompoundedOvernightDiscountingMethod.present_value(&coupon, &curves),
        Err(PricingError::Curve(CurveError::NoDiscountCurve { .. }))
    ));
}

// =============================================================================
// DEGENERATE DISCOUNT FACTORS
// =============================================================================

/// The two-period table with one boundary discount factor replaced.
fn table_with(time: f64, df: f64) -> TableProvider {
    let [p0, p1, p2, p3] = boundary_dfs();
    let base = [(0.1, p0), (0.6, p1), (0.7, p2), (1.2, p3), (PAYMENT, PAYMENT_DF)];
    let points: Vec<(f64, f64)> = base
        .into_iter()
        .map(|(t, p)| if t == time { (t, df) } else { (t, p) })
        .collect();
    TableProvider::new(Currency::BRL, RateIndex::cdi(), &points)
}

fn sensitivity_values(sensitivity: &MultiCurrencyMulticurveSensitivity) -> Vec<f64> {
    let brl = sensitivity.get(Currency::BRL).unwrap();
    brl.discounting()
        .values()
        .flatten()
        .map(|&(_, v)| v)
        .chain(brl.forward().values().flatten().map(|f| f.value))
        .collect()
}

#[test]
fn test_nan_discount_factor_propagates() {
    init_tracing();
    let curves = table_with(0.1, f64::NAN);
    let coupon = two_period_coupon();

    let pv = CompoundedOvernightDiscountingMethod
        .present_value(&coupon, &curves)
        .unwrap();
    assert!(pv.amount(Currency::BRL).is_nan());

    let sensitivity = CompoundedOvernightDiscountingMethod
        .present_value_curve_sensitivity(&coupon, &curves)
        .unwrap();
    let values = sensitivity_values(&sensitivity);
    assert_eq!(values.len(), 3);
    assert!(values.iter().all(|v| v.is_nan()));
}

#[test]
fn test_zero_discount_factor_propagates() {
    init_tracing();
    let curves = table_with(0.6, 0.0);
    let coupon = two_period_coupon();

    let pv = CompoundedOvernightDiscountingMethod
        .present_value(&coupon, &curves)
        .unwrap();
    assert!(!pv.amount(Currency::BRL).is_finite());

    let sensitivity = CompoundedOvernightDiscountingMethod
        .present_value_curve_sensitivity(&coupon, &curves)
        .unwrap();
    let values = sensitivity_values(&sensitivity);
    assert_eq!(values.len(), 3);
    assert!(values.iter().all(|v| !v.is_finite()));
}

// =============================================================================
// DEFINITION TO COUPON
// =============================================================================

#[test]
fn test_seasoned_definition_prices_like_accrued_coupon() {
    let valuation_date = Date::from_ymd(2025, 3, 3).unwrap();
    let curves = MulticurveProvider::builder(valuation_date)
        .curve(YieldCurve::new("BRL-CDI", vec![0.25, 1.0], vec![0.112, 0.118]).unwrap())
        .discounting(Currency::BRL, "BRL-CDI")
        .forward(RateIndex::cdi(), "BRL-CDI")
        .build()
        .unwrap();

    let dates: Vec<Date> = [(2025, 1, 2), (2025, 2, 3), (2025, 3, 3), (2025, 4, 1), (2025, 5, 2)]
        .iter()
        .map(|&(y, m, d)| Date::from_ymd(y, m, d).unwrap())
        .collect();
    let definition = CompoundedOvernightDefinition::new(
        Currency::BRL,
        Date::from_ymd(2025, 5, 5).unwrap(),
        1_000_000.0,
        RateIndex::cdi(),
        dates.clone(),
    )
    .unwrap();
    let fixings = FixingSeries::new()
        .with_fixing(dates[0], 0.1215)
        .with_fixing(dates[1], 0.1240);

    let coupon = definition.to_coupon(valuation_date, &fixings).unwrap();
    let Coupon::CompoundedOvernight(ref overnight) = coupon else {
        panic!("expected an open overnight coupon, got {coupon:?}");
    };
    assert_eq!(overnight.period_count(), 2);
    assert_eq!(overnight.fixing_period_start_times()[0], 0.0);

    let deltas = definition.fixing_period_accrual_factors();
    let accrued = 1_000_000.0 * (1.1215_f64).powf(deltas[0]) * (1.1240_f64).powf(deltas[1]);
    assert_relative_eq!(overnight.notional_accrued(), accrued, max_relative = 1e-14);

    let pv = PresentValueDiscountingCalculator.coupon(&coupon, &curves).unwrap();
    let end = curves.time(dates[4]);
    let payment = curves.time(Date::from_ymd(2025, 5, 5).unwrap());
    let growth = 1.0 / curves.discount_factor(Currency::BRL, end).unwrap();
    let df = curves.discount_factor(Currency::BRL, payment).unwrap();
    assert_relative_eq!(pv.amount(Currency::BRL), df * accrued * growth, max_relative = 1e-12);
}

#[test]
fn test_fully_fixed_definition_is_fixed_payment() {
    let valuation_date = Date::from_ymd(2025, 2, 4).unwrap();
    let dates = vec![
        Date::from_ymd(2025, 1, 2).unwrap(),
        Date::from_ymd(2025, 2, 3).unwrap(),
    ];
    let definition = CompoundedOvernightDefinition::new(
        Currency::BRL,
        Date::from_ymd(2025, 2, 5).unwrap(),
        500_000.0,
        RateIndex::cdi(),
        dates.clone(),
    )
    .unwrap();
    let fixings: FixingSeries = [(dates[0], 0.12)].into_iter().collect();

    let coupon = definition.to_coupon(valuation_date, &fixings).unwrap();
    assert!(matches!(coupon, Coupon::FixedPayment(_)));
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_discounting_entry_matches_bump(
        rate in 0.0_f64..0.15,
        slope in -0.01_f64..0.01,
        first_start in 0.0_f64..1.0,
        period in 0.05_f64..0.5,
        periods in 1_usize..6,
        lag in 0.01_f64..0.1,
        notional in 1_000.0_f64..10_000_000.0,
    ) {
        let curve = YieldCurve::new("USD-OIS", vec![0.5, 5.0], vec![rate, rate + slope]).unwrap();
        let curves = MulticurveProvider::builder(Date::from_ymd(2025, 1, 2).unwrap())
            .curve(curve)
            .discounting(Currency::USD, "USD-OIS")
            .forward(RateIndex::sofr(), "USD-OIS")
            .build()
            .unwrap();

        let starts: Vec<f64> = (0..periods).map(|i| first_start + i as f64 * period).collect();
        let ends: Vec<f64> = starts.iter().map(|s| s + period).collect();
        let payment = ends[periods - 1] + lag;
        let coupon = CompoundedOvernightCoupon::new(
            Currency::USD,
            payment,
            notional,
            RateIndex::sofr(),
            starts,
            ends,
            vec![period; periods],
        )
        .unwrap();

        let sensitivity = CompoundedOvernightDiscountingMethod
            .present_value_curve_sensitivity(&coupon, &curves)
            .unwrap();
        let usd = sensitivity.get(Currency::USD).unwrap();
        prop_assert_eq!(usd.forward()["USD-OIS"].len(), periods);

        let analytic = usd.discounting()["USD-OIS"][0].1;
        let numeric = central_difference(1e-6, |shift| {
            let bumped = PointBump::zero_rate(Currency::USD, payment, shift).apply(&curves);
            CompoundedOvernightDiscountingMethod
                .present_value(&coupon, &bumped)
                .unwrap()
                .amount(Currency::USD)
        });
        prop_assert!(
            (analytic - numeric).abs() <= 1e-6 * notional.max(analytic.abs()),
            "analytic {} vs numeric {}", analytic, numeric
        );
    }
}
