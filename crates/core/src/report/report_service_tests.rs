use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::dataset::{
    AdvertiserTier, DayPair, PerformanceRecord, RejectEvent, RejectRule, ReportDataset,
};
use crate::errors::Error;
use crate::events::{MockProgressSink, ProgressEvent, ReportPhase};

use super::{DailyReportService, DailyReportServiceTrait};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

fn record(
    offer_id: &str,
    advertiser: &str,
    affiliate: &str,
    date: NaiveDate,
    revenue: Decimal,
    profit: Decimal,
    clicks: i64,
    conversions: i64,
) -> PerformanceRecord {
    PerformanceRecord {
        timestamp: date.and_hms_opt(9, 0, 0).unwrap(),
        offer_id: offer_id.to_string(),
        app_id: "com.example.app".to_string(),
        advertiser: advertiser.to_string(),
        affiliate: affiliate.to_string(),
        geo: "US".to_string(),
        status: "active".to_string(),
        total_revenue: revenue,
        total_profit: profit,
        total_clicks: clicks,
        total_conversions: conversions,
    }
}

fn fixture() -> ReportDataset {
    let performance = vec![
        // Offer 101 jumps from zero to 12: high-variance, new budget.
        record("101", "AcmeAds", "aff-1", day(14), dec!(0), dec!(0), 50, 0),
        record("101", "AcmeAds", "aff-1", day(15), dec!(12), dec!(6), 60, 2),
        // Offer 202 is stable and was already spending in the lookback.
        record("202", "AcmeAds", "aff-2", day(14), dec!(99), dec!(20), 100, 4),
        record("202", "AcmeAds", "aff-2", day(15), dec!(100), dec!(21), 110, 6),
        record("202", "GhostAds", "aff-2", day(15), dec!(3), dec!(1), 10, 1),
        record("202", "AcmeAds", "aff-2", day(10), dec!(5), dec!(1), 10, 1),
    ];
    let advertiser_tiers = vec![AdvertiserTier {
        advertiser: "AcmeAds".to_string(),
        tier2: "Acme".to_string(),
        tier3: "AcmeNetwork".to_string(),
    }];
    let reject_events = vec![
        RejectEvent {
            timestamp: day(15).and_hms_opt(10, 0, 0).unwrap(),
            advertiser: "AcmeAds".to_string(),
            event: "fraud_click".to_string(),
        },
        RejectEvent {
            timestamp: day(15).and_hms_opt(11, 0, 0).unwrap(),
            advertiser: "AcmeAds".to_string(),
            event: "fraud_click".to_string(),
        },
        RejectEvent {
            timestamp: day(15).and_hms_opt(12, 0, 0).unwrap(),
            advertiser: "AcmeAds".to_string(),
            event: "payout_ok".to_string(),
        },
    ];
    let reject_rules = vec![
        RejectRule {
            event: "fraud_click".to_string(),
            is_reject: true,
        },
        RejectRule {
            event: "payout_ok".to_string(),
            is_reject: false,
        },
    ];
    ReportDataset::new(performance, advertiser_tiers, reject_events, reject_rules)
}

#[test]
fn test_generate_produces_all_four_tables() {
    let bundle = DailyReportService::new().generate(&fixture()).unwrap();

    assert_eq!(bundle.window.newest, day(15));
    assert_eq!(bundle.window.second_newest, day(14));

    // Table 1: tier-3 rows sorted by tier, unmapped advertisers first under
    // the empty tier.
    let tiers: Vec<&str> = bundle
        .tier_daily
        .iter()
        .map(|row| row.tier.as_str())
        .collect();
    assert_eq!(tiers, vec!["", "AcmeNetwork"]);
    assert_eq!(
        bundle.tier_daily[1].revenue,
        DayPair::new(dec!(112), dec!(99))
    );

    // Table 2: only the high-variance offer, with the spike sentinel and the
    // affiliate narrative.
    assert_eq!(bundle.high_variance_offers.len(), 1);
    let offer = &bundle.high_variance_offers[0];
    assert_eq!(offer.offer_id, "101");
    assert_eq!(offer.status, "active");
    assert_eq!(offer.delta, dec!(12));
    assert_eq!(offer.percent_change, dec!(1000));
    assert_eq!(offer.budget_type, "New budget");
    assert_eq!(offer.attribution, "aff-1 newly generated 12.00 USD");

    // Table 3: tier-2 reject rates against tier conversions.
    let acme = bundle
        .tier_rejects
        .iter()
        .find(|row| row.tier == "Acme")
        .unwrap();
    assert_eq!(acme.conversions, DayPair::new(8, 4));
    assert_eq!(acme.rejects, DayPair::new(2, 0));
    assert_eq!(acme.reject_rate, DayPair::new(dec!(20), dec!(0)));

    // Table 4: affiliates sorted, each absorbing its associated tiers' full
    // reject counts.
    let affiliates: Vec<&str> = bundle
        .affiliate_rejects
        .iter()
        .map(|row| row.affiliate.as_str())
        .collect();
    assert_eq!(affiliates, vec!["aff-1", "aff-2"]);

    let aff_1 = &bundle.affiliate_rejects[0];
    assert_eq!(aff_1.associated_tiers, vec!["Acme".to_string()]);
    assert_eq!(aff_1.rejects, DayPair::new(2, 0));
    assert_eq!(aff_1.reject_rate.newest, dec!(50));

    let aff_2 = &bundle.affiliate_rejects[1];
    assert_eq!(aff_2.associated_tiers, vec!["Acme".to_string()]);
    assert_eq!(aff_2.rejects, DayPair::new(2, 0));
    assert_eq!(aff_2.reject_rate.newest, dec!(22.22));

    assert_eq!(bundle.summary.high_variance_offers, 1);
    assert_eq!(bundle.summary.old_budget_offers, 1);
    assert_eq!(bundle.summary.new_budget_offers, 1);
}

#[test]
fn test_generate_emits_phases_in_order_then_completed() {
    let sink = MockProgressSink::new();
    let service = DailyReportService::new().with_progress_sink(Arc::new(sink.clone()));

    service.generate(&fixture()).unwrap();

    let expected = vec![
        ProgressEvent::phase_started(ReportPhase::ResolvingWindow),
        ProgressEvent::phase_started(ReportPhase::SummarizingTiers),
        ProgressEvent::phase_started(ReportPhase::AggregatingOffers),
        ProgressEvent::phase_started(ReportPhase::AttributingAffiliates),
        ProgressEvent::phase_started(ReportPhase::ComputingRejects),
        ProgressEvent::phase_started(ReportPhase::AssemblingReport),
        ProgressEvent::completed(),
    ];
    assert_eq!(sink.events(), expected);
}

#[test]
fn test_single_day_dataset_fails_without_completion() {
    let sink = MockProgressSink::new();
    let service = DailyReportService::new().with_progress_sink(Arc::new(sink.clone()));

    let dataset = ReportDataset::new(
        vec![record(
            "101",
            "AcmeAds",
            "aff-1",
            day(15),
            dec!(10),
            dec!(5),
            10,
            1,
        )],
        Vec::new(),
        Vec::new(),
        Vec::new(),
    );

    let err = service.generate(&dataset).unwrap_err();
    match err {
        Error::InsufficientData { distinct_days } => assert_eq!(distinct_days, 1),
        other => panic!("Expected InsufficientData, got {other:?}"),
    }

    assert_eq!(
        sink.events(),
        vec![ProgressEvent::phase_started(ReportPhase::ResolvingWindow)]
    );
}
