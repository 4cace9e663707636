use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::dataset::{
    AdvertiserTier, DateWindow, DayPair, PerformanceRecord, RejectEvent, RejectRule,
    RejectRuleSet, TierLookup,
};
use crate::report::tiers::TierDailyMetrics;

use super::*;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

fn at(d: u32, hour: u32, minute: u32) -> NaiveDateTime {
    day(d).and_hms_opt(hour, minute, 0).unwrap()
}

fn window() -> DateWindow {
    DateWindow {
        newest: day(15),
        second_newest: day(14),
    }
}

fn lookup() -> TierLookup {
    TierLookup::new(&[
        AdvertiserTier {
            advertiser: "AcmeAds".to_string(),
            tier2: "Acme".to_string(),
            tier3: "AcmeNetwork".to_string(),
        },
        AdvertiserTier {
            advertiser: "ZenAds".to_string(),
            tier2: "Zen".to_string(),
            tier3: "ZenNetwork".to_string(),
        },
        AdvertiserTier {
            advertiser: "AppNextGlobal".to_string(),
            tier2: "AppNext".to_string(),
            tier3: "AppNextNetwork".to_string(),
        },
    ])
}

fn rules() -> RejectRuleSet {
    RejectRuleSet::new(&[
        RejectRule {
            event: "fraud_click".to_string(),
            is_reject: true,
        },
        RejectRule {
            event: "payout_ok".to_string(),
            is_reject: false,
        },
    ])
}

fn event(advertiser: &str, name: &str, timestamp: NaiveDateTime) -> RejectEvent {
    RejectEvent {
        timestamp,
        advertiser: advertiser.to_string(),
        event: name.to_string(),
    }
}

fn record(
    affiliate: &str,
    advertiser: &str,
    date: NaiveDate,
    conversions: i64,
) -> PerformanceRecord {
    PerformanceRecord {
        timestamp: date.and_hms_opt(9, 0, 0).unwrap(),
        offer_id: "101".to_string(),
        app_id: String::new(),
        advertiser: advertiser.to_string(),
        affiliate: affiliate.to_string(),
        geo: "US".to_string(),
        status: "active".to_string(),
        total_revenue: dec!(1),
        total_profit: dec!(0.5),
        total_clicks: 10,
        total_conversions: conversions,
    }
}

#[test]
fn test_reject_rate_formula_and_guard() {
    assert_eq!(reject_rate(2, 8), dec!(20));
    assert_eq!(reject_rate(0, 50), Decimal::ZERO);
    assert_eq!(reject_rate(0, 0), Decimal::ZERO);
    assert_eq!(reject_rate(5, 0), dec!(100));
}

#[test]
fn test_counts_group_by_tier_and_day() {
    let events = vec![
        event("AcmeAds", "fraud_click", at(15, 10, 0)),
        event("AcmeAds", "fraud_click", at(15, 11, 0)),
        event("AcmeAds", "fraud_click", at(14, 10, 0)),
        event("ZenAds", "fraud_click", at(15, 10, 0)),
    ];

    let counts = count_tier_rejects(&events, &rules(), &lookup(), &window());
    assert_eq!(counts["Acme"], DayPair::new(2, 1));
    assert_eq!(counts["Zen"], DayPair::new(1, 0));
}

#[test]
fn test_non_reject_and_unmatched_events_are_ignored() {
    let events = vec![
        event("AcmeAds", "payout_ok", at(15, 10, 0)),
        event("AcmeAds", "never_heard_of_it", at(15, 10, 0)),
    ];

    let counts = count_tier_rejects(&events, &rules(), &lookup(), &window());
    assert!(counts.is_empty());
}

#[test]
fn test_day_shift_for_appnext_advertisers() {
    // Reported one minute before midnight on the newest day; the advertiser
    // family reports a day late, so it counts on the second-newest day.
    let events = vec![event("AppNextGlobal", "fraud_click", at(15, 23, 59))];

    let counts = count_tier_rejects(&events, &rules(), &lookup(), &window());
    assert_eq!(counts["AppNext"], DayPair::new(0, 1));
}

#[test]
fn test_day_shift_token_is_case_insensitive_and_substring() {
    let mut lookup_rows = vec![AdvertiserTier {
        advertiser: "appnextmedia-eu".to_string(),
        tier2: "AppNext".to_string(),
        tier3: "AppNextNetwork".to_string(),
    }];
    lookup_rows.push(AdvertiserTier {
        advertiser: "AcmeAds".to_string(),
        tier2: "Acme".to_string(),
        tier3: "AcmeNetwork".to_string(),
    });
    let lookup = TierLookup::new(&lookup_rows);

    let events = vec![
        event("appnextmedia-eu", "fraud_click", at(16, 0, 30)),
        // Not part of the family: attributes to its own day and stays
        // outside the window.
        event("AcmeAds", "fraud_click", at(16, 0, 30)),
    ];

    let counts = count_tier_rejects(&events, &rules(), &lookup, &window());
    assert_eq!(counts["AppNext"], DayPair::new(1, 0));
    assert!(!counts.contains_key("Acme"));
}

#[test]
fn test_unmapped_advertiser_events_count_under_empty_tier() {
    let events = vec![event("GhostAds", "fraud_click", at(15, 12, 0))];

    let counts = count_tier_rejects(&events, &rules(), &lookup(), &window());
    assert_eq!(counts[""], DayPair::new(1, 0));
}

fn tier_metrics(tier: &str, conversions: DayPair<i64>) -> TierDailyMetrics {
    TierDailyMetrics {
        tier: tier.to_string(),
        revenue: DayPair::new(dec!(10), dec!(8)),
        profit: DayPair::new(dec!(2), dec!(1)),
        conversions,
    }
}

#[test]
fn test_tier_reject_metrics_join_counts_with_conversions() {
    let metrics = vec![
        tier_metrics("Acme", DayPair::new(8, 4)),
        tier_metrics("Quiet", DayPair::new(3, 0)),
    ];
    let mut counts = HashMap::new();
    counts.insert("Acme".to_string(), DayPair::new(2, 1));
    // Event-only tiers do not produce rows.
    counts.insert("EventOnly".to_string(), DayPair::new(9, 9));

    let rows = tier_reject_metrics(&metrics, &counts);
    assert_eq!(rows.len(), 2);

    let acme = &rows[0];
    assert_eq!(acme.rejects, DayPair::new(2, 1));
    assert_eq!(acme.reject_rate.newest, dec!(20));
    assert_eq!(acme.reject_rate.second_newest, dec!(20));

    let quiet = &rows[1];
    assert_eq!(quiet.rejects, DayPair::new(0, 0));
    assert_eq!(quiet.reject_rate.newest, Decimal::ZERO);
    assert_eq!(quiet.reject_rate.second_newest, Decimal::ZERO);
}

#[test]
fn test_affiliate_tier_mode_prefers_majority_then_smallest_name() {
    let records = vec![
        record("aff-1", "AcmeAds", day(15), 1),
        record("aff-1", "AcmeAds", day(15), 1),
        record("aff-1", "ZenAds", day(15), 1),
        // Tie on the second-newest day: Acme and Zen once each.
        record("aff-1", "AcmeAds", day(14), 1),
        record("aff-1", "ZenAds", day(14), 1),
    ];

    let rows = affiliate_reject_metrics(&records, &lookup(), &window(), &HashMap::new());
    assert_eq!(rows.len(), 1);
    // Majority Acme on the newest day, tie-broken Acme on the second; union
    // collapses to one tier.
    assert_eq!(rows[0].associated_tiers, vec!["Acme".to_string()]);
}

#[test]
fn test_affiliate_union_spans_both_days() {
    let records = vec![
        record("aff-1", "AcmeAds", day(15), 2),
        record("aff-1", "ZenAds", day(14), 3),
    ];
    let mut counts = HashMap::new();
    counts.insert("Acme".to_string(), DayPair::new(4, 1));
    counts.insert("Zen".to_string(), DayPair::new(2, 5));

    let rows = affiliate_reject_metrics(&records, &lookup(), &window(), &counts);
    let affiliate = &rows[0];
    assert_eq!(
        affiliate.associated_tiers,
        vec!["Acme".to_string(), "Zen".to_string()]
    );
    // Counts sum over the union on both days.
    assert_eq!(affiliate.rejects, DayPair::new(6, 6));
    // Rate divides by the affiliate's own conversions: 6/(2+6) and 6/(3+6).
    assert_eq!(affiliate.reject_rate.newest, dec!(75));
    assert_eq!(
        affiliate.reject_rate.second_newest.round_dp(2),
        dec!(66.67)
    );
}

#[test]
fn test_affiliates_sharing_a_tier_absorb_its_full_count() {
    let records = vec![
        record("aff-1", "AcmeAds", day(15), 5),
        record("aff-2", "AcmeAds", day(15), 5),
    ];
    let mut counts = HashMap::new();
    counts.insert("Acme".to_string(), DayPair::new(5, 0));

    let rows = affiliate_reject_metrics(&records, &lookup(), &window(), &counts);
    assert_eq!(rows.len(), 2);
    for affiliate in &rows {
        assert_eq!(affiliate.rejects.newest, 5);
        assert_eq!(affiliate.reject_rate.newest, dec!(50));
    }
}

#[test]
fn test_affiliate_with_only_unmapped_records_has_no_tiers() {
    let records = vec![record("aff-1", "GhostAds", day(15), 4)];
    let mut counts = HashMap::new();
    counts.insert("".to_string(), DayPair::new(9, 9));

    let rows = affiliate_reject_metrics(&records, &lookup(), &window(), &counts);
    let affiliate = &rows[0];
    // The empty tier never joins an association union.
    assert!(affiliate.associated_tiers.is_empty());
    assert_eq!(affiliate.rejects, DayPair::new(0, 0));
    assert_eq!(affiliate.reject_rate.newest, Decimal::ZERO);
}

#[test]
fn test_affiliate_rows_sorted_and_sums_per_day() {
    let records = vec![
        record("zeta", "AcmeAds", day(15), 2),
        record("alpha", "AcmeAds", day(15), 1),
        record("alpha", "AcmeAds", day(14), 3),
        // Out-of-window traffic keeps the affiliate listed with zero sums.
        record("mid", "AcmeAds", day(2), 9),
    ];

    let rows = affiliate_reject_metrics(&records, &lookup(), &window(), &HashMap::new());
    let names: Vec<&str> = rows.iter().map(|row| row.affiliate.as_str()).collect();
    assert_eq!(names, vec!["alpha", "mid", "zeta"]);

    let alpha = &rows[0];
    assert_eq!(alpha.conversions, DayPair::new(1, 3));
    assert_eq!(alpha.revenue, DayPair::new(dec!(1), dec!(1)));

    let mid = &rows[1];
    assert_eq!(mid.conversions, DayPair::new(0, 0));
    assert!(mid.associated_tiers.is_empty());
}
