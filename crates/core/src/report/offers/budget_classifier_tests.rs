use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::dataset::{DateWindow, PerformanceRecord};

use super::*;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

fn window() -> DateWindow {
    DateWindow {
        newest: day(15),
        second_newest: day(14),
    }
}

fn record(offer: &str, date: NaiveDate, revenue: Decimal) -> PerformanceRecord {
    PerformanceRecord {
        timestamp: date.and_hms_opt(12, 0, 0).unwrap(),
        offer_id: offer.to_string(),
        app_id: String::new(),
        advertiser: "AcmeAds".to_string(),
        affiliate: "aff-1".to_string(),
        geo: "US".to_string(),
        status: "active".to_string(),
        total_revenue: revenue,
        total_profit: Decimal::ZERO,
        total_clicks: 0,
        total_conversions: 0,
    }
}

#[test]
fn test_lookback_revenue_makes_an_offer_old() {
    let records = vec![
        record("101", day(12), dec!(4)),
        record("101", day(15), dec!(9)),
    ];

    let budgets = classify_budgets(&records, &window());
    assert_eq!(budgets.budget_type("101"), BudgetType::Old);
    assert_eq!(budgets.old_budget_count(), 1);
    assert_eq!(budgets.new_budget_count(), 0);
}

#[test]
fn test_newest_day_revenue_alone_is_new() {
    let records = vec![record("101", day(15), dec!(50))];

    let budgets = classify_budgets(&records, &window());
    assert_eq!(budgets.budget_type("101"), BudgetType::New);
    assert_eq!(budgets.new_budget_count(), 1);
}

#[test]
fn test_zero_revenue_lookback_rows_stay_new() {
    let records = vec![
        record("101", day(13), Decimal::ZERO),
        record("101", day(15), dec!(8)),
    ];

    let budgets = classify_budgets(&records, &window());
    assert_eq!(budgets.budget_type("101"), BudgetType::New);
}

#[test]
fn test_lookback_boundary_is_six_days() {
    // Exactly six days before the newest day is inside the lookback; seven
    // days is out.
    let records = vec![
        record("on-boundary", day(9), dec!(1)),
        record("outside", day(8), dec!(1)),
        record("on-boundary", day(15), dec!(20)),
        record("outside", day(15), dec!(20)),
    ];

    let budgets = classify_budgets(&records, &window());
    assert_eq!(budgets.budget_type("on-boundary"), BudgetType::Old);
    assert_eq!(budgets.budget_type("outside"), BudgetType::New);
}

#[test]
fn test_counts_cover_every_offer_in_the_data() {
    let records = vec![
        record("101", day(14), dec!(3)),
        record("102", day(15), dec!(7)),
        record("103", day(8), dec!(2)),
    ];

    let budgets = classify_budgets(&records, &window());
    assert_eq!(budgets.total_offers(), 3);
    assert_eq!(budgets.old_budget_count(), 1);
    assert_eq!(budgets.new_budget_count(), 2);
    assert_eq!(budgets.budget_type("103"), BudgetType::New);
}

#[test]
fn test_unseen_offer_defaults_to_new() {
    let budgets = classify_budgets(&[], &window());
    assert_eq!(budgets.budget_type("nope"), BudgetType::New);
    assert_eq!(budgets.total_offers(), 0);
}
