use tariff_tracker::engine::{
    clamp_inventory_months, clamp_pass_through, compute_impact, derive_pass_through,
    tariff_passed_to_consumer, CalculationInput,
};
use tariff_tracker::{Decimal, ElasticityPair};

fn d(s: &str) -> Decimal {
    Decimal::from_str_canonical(s).unwrap()
}

fn input(price: &str, markup: &str, tariff: &str, pass: &str, months: &str) -> CalculationInput {
    CalculationInput {
        retail_price: d(price),
        retail_markup_percent: d(markup),
        tariff_rate_percent: d(tariff),
        pass_through_rate_percent: d(pass),
        inventory_buffer_months: d(months),
    }
}

fn close(a: Decimal, b: Decimal) -> bool {
    (a.inner() - b.inner()).abs() < d("0.000000001").inner()
}

const PRICES: [&str; 4] = ["0.01", "19.99", "100", "25000"];
const MARKUPS: [&str; 4] = ["-50", "0", "35.5", "300"];
const TARIFFS: [&str; 4] = ["0", "2.5", "25", "145"];

#[test]
fn test_identical_inputs_give_identical_results() {
    let i = input("49.99", "35", "17.5", "62", "4.5");
    assert_eq!(compute_impact(&i).unwrap(), compute_impact(&i).unwrap());
}

#[test]
fn test_import_cost_times_markup_recovers_retail_price() {
    for price in PRICES {
        for markup in MARKUPS {
            let r = compute_impact(&input(price, markup, "10", "75", "0")).unwrap();
            let factor = Decimal::one() + d(markup) / Decimal::hundred();
            assert!(
                close(r.import_cost * factor, d(price)),
                "price {} markup {}",
                price,
                markup
            );
        }
    }
}

#[test]
fn test_passed_tariff_bounded_by_tariff_amount() {
    for tariff in TARIFFS {
        for pass in ["-20", "0", "42.5", "100", "180"] {
            let r = compute_impact(&input("100", "40", tariff, pass, "0")).unwrap();
            assert!(r.tariff_passed_to_consumer >= Decimal::zero());
            assert!(r.tariff_passed_to_consumer <= r.tariff_amount);
        }
    }
}

#[test]
fn test_zero_tariff_leaves_price_unchanged() {
    for price in PRICES {
        let r = compute_impact(&input(price, "25", "0", "75", "6")).unwrap();
        assert!(r.tariff_amount.is_zero());
        assert_eq!(r.future_price, d(price));
        assert!(r.price_increase_percent.is_zero());
        assert!(r.tariff_tax_percent_of_future_price.is_zero());
        assert!(r.inventory_adjusted_initial_impact.is_zero());
    }
}

#[test]
fn test_full_pass_through_passes_whole_tariff() {
    for tariff in TARIFFS {
        let r = compute_impact(&input("80", "60", tariff, "100", "0")).unwrap();
        assert_eq!(r.tariff_passed_to_consumer, r.tariff_amount);
    }
}

#[test]
fn test_inventory_extremes() {
    let none = compute_impact(&input("100", "50", "25", "75", "0")).unwrap();
    assert_eq!(
        none.inventory_adjusted_initial_impact,
        none.tariff_passed_to_consumer
    );

    for months in ["12", "18", "120"] {
        let full = compute_impact(&input("100", "50", "25", "75", months)).unwrap();
        assert!(full.inventory_adjusted_initial_impact.is_zero());
    }

    let negative = compute_impact(&input("100", "50", "25", "75", "-3")).unwrap();
    assert_eq!(
        negative.inventory_adjusted_initial_impact,
        negative.tariff_passed_to_consumer
    );
}

#[test]
fn test_inventory_impact_decreases_with_months() {
    let mut previous = None;
    for months in 0..=12 {
        let r = compute_impact(&input("100", "50", "25", "75", &months.to_string())).unwrap();
        if let Some(prev) = previous {
            assert!(r.inventory_adjusted_initial_impact < prev);
        }
        previous = Some(r.inventory_adjusted_initial_impact);
    }
}

#[test]
fn test_clamping_is_idempotent() {
    for raw in ["-5", "0", "37.5", "100", "250"] {
        let once = clamp_pass_through(d(raw));
        assert_eq!(clamp_pass_through(once), once);
        assert!(once >= Decimal::zero() && once <= Decimal::hundred());
    }
    for raw in ["-1", "0", "6", "12", "40"] {
        let once = clamp_inventory_months(d(raw));
        assert_eq!(clamp_inventory_months(once), once);
    }
}

#[test]
fn test_out_of_range_pass_through_matches_clamped() {
    assert_eq!(
        tariff_passed_to_consumer(d("10"), d("150")),
        tariff_passed_to_consumer(d("10"), d("100"))
    );
    assert_eq!(
        tariff_passed_to_consumer(d("10"), d("-40")),
        Decimal::zero()
    );
}

#[test]
fn test_derived_pass_through_always_in_range() {
    let pairs = [
        ("-2.0", "1.5"),
        ("-0.1", "4.0"),
        ("-3.0", "0.2"),
        ("0", "1"),
        ("-1", "0"),
        ("2", "-5"),
    ];
    for (demand, supply) in pairs {
        let rate = derive_pass_through(Some(&ElasticityPair::new(d(demand), d(supply)))).unwrap();
        assert!(
            rate >= Decimal::zero() && rate <= Decimal::hundred(),
            "demand {} supply {} gave {}",
            demand,
            supply,
            rate
        );
    }
}

#[test]
fn test_tax_share_below_hundred() {
    for tariff in TARIFFS {
        let r = compute_impact(&input("10", "-50", tariff, "100", "0")).unwrap();
        assert!(r.tariff_tax_percent_of_future_price < Decimal::hundred());
    }
}
