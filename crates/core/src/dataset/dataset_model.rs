//! Typed input records and the column contract of the four source tables.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use log::warn;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};
use crate::Result;

use super::DataTable;

/// Column names of the four source tables, as the upload template defines
/// them. The advertiser-map and reject-rule sheets keep their original
/// bilingual headers; the parser delivers them verbatim.
pub mod columns {
    pub const TIME: &str = "Time";
    pub const OFFER_ID: &str = "Offer ID";
    pub const APP_ID: &str = "App ID";
    pub const ADVERTISER: &str = "Advertiser";
    pub const AFFILIATE: &str = "Affiliate";
    pub const GEO: &str = "GEO";
    pub const STATUS: &str = "Status";
    pub const TOTAL_REVENUE: &str = "Total Revenue";
    pub const TOTAL_PROFIT: &str = "Total Profit";
    pub const TOTAL_CLICKS: &str = "Total Clicks";
    pub const TOTAL_CONVERSIONS: &str = "Total Conversions";
    pub const TIER2: &str = "二级广告主";
    pub const TIER3: &str = "三级广告主";
    pub const EVENT: &str = "Event";
    pub const IS_REJECT: &str = "是否为reject";
}

/// One performance row: an offer × affiliate slice of one day's traffic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRecord {
    /// Wall-clock instant the row was reported at; only its calendar day
    /// participates in the report.
    pub timestamp: NaiveDateTime,
    pub offer_id: String,
    pub app_id: String,
    pub advertiser: String,
    pub affiliate: String,
    pub geo: String,
    pub status: String,
    pub total_revenue: Decimal,
    pub total_profit: Decimal,
    pub total_clicks: i64,
    pub total_conversions: i64,
}

/// One advertiser-to-tier mapping row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvertiserTier {
    pub advertiser: String,
    /// Second-level grouping (tier-2)
    pub tier2: String,
    /// Third-level grouping (tier-3)
    pub tier3: String,
}

/// One reject event row from the advertiser event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectEvent {
    pub timestamp: NaiveDateTime,
    pub advertiser: String,
    pub event: String,
}

/// One reject-classification rule row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectRule {
    pub event: String,
    pub is_reject: bool,
}

/// Advertiser-to-tier lookup with an explicit default.
///
/// Every join against the tier map goes through this type. Unmapped
/// advertisers resolve to the empty tier, which participates in tier
/// aggregation like any other value; nothing is silently dropped.
#[derive(Debug, Clone, Default)]
pub struct TierLookup {
    by_advertiser: HashMap<String, (String, String)>,
}

impl TierLookup {
    /// Builds the lookup. The first mapping wins when an advertiser appears
    /// twice in the sheet.
    pub fn new(mappings: &[AdvertiserTier]) -> Self {
        let mut by_advertiser = HashMap::with_capacity(mappings.len());
        for mapping in mappings {
            by_advertiser
                .entry(mapping.advertiser.clone())
                .or_insert_with(|| (mapping.tier2.clone(), mapping.tier3.clone()));
        }
        Self { by_advertiser }
    }

    /// Tier-2 value for an advertiser, empty when unmapped.
    pub fn tier2(&self, advertiser: &str) -> &str {
        self.by_advertiser
            .get(advertiser)
            .map(|(tier2, _)| tier2.as_str())
            .unwrap_or("")
    }

    /// Tier-3 value for an advertiser, empty when unmapped.
    pub fn tier3(&self, advertiser: &str) -> &str {
        self.by_advertiser
            .get(advertiser)
            .map(|(_, tier3)| tier3.as_str())
            .unwrap_or("")
    }
}

/// Event-to-reject-flag lookup with an explicit default.
///
/// Events with no matching rule are non-reject.
#[derive(Debug, Clone, Default)]
pub struct RejectRuleSet {
    by_event: HashMap<String, bool>,
}

impl RejectRuleSet {
    pub fn new(rules: &[RejectRule]) -> Self {
        let mut by_event = HashMap::with_capacity(rules.len());
        for rule in rules {
            by_event.entry(rule.event.clone()).or_insert(rule.is_reject);
        }
        Self { by_event }
    }

    pub fn is_reject(&self, event: &str) -> bool {
        self.by_event.get(event).copied().unwrap_or(false)
    }
}

/// The four source tables in typed form; the input of a report run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDataset {
    pub performance: Vec<PerformanceRecord>,
    pub advertiser_tiers: Vec<AdvertiserTier>,
    pub reject_events: Vec<RejectEvent>,
    pub reject_rules: Vec<RejectRule>,
}

impl ReportDataset {
    pub fn new(
        performance: Vec<PerformanceRecord>,
        advertiser_tiers: Vec<AdvertiserTier>,
        reject_events: Vec<RejectEvent>,
        reject_rules: Vec<RejectRule>,
    ) -> Self {
        Self {
            performance,
            advertiser_tiers,
            reject_events,
            reject_rules,
        }
    }

    /// Maps the four generic tables into typed records.
    ///
    /// Fails with a schema error when a required column is missing and with a
    /// validation error (carrying table, row, and column) when a non-empty
    /// cell cannot be parsed. Fully empty rows are skipped; rows missing a
    /// timestamp are skipped with a warning, since they can never attribute
    /// to a report day. Empty numeric cells read as zero.
    pub fn from_tables(
        performance: &DataTable,
        advertiser_map: &DataTable,
        reject_events: &DataTable,
        reject_rules: &DataTable,
    ) -> Result<Self> {
        Ok(Self {
            performance: map_performance(performance)?,
            advertiser_tiers: map_advertiser_tiers(advertiser_map)?,
            reject_events: map_reject_events(reject_events)?,
            reject_rules: map_reject_rules(reject_rules)?,
        })
    }
}

fn map_performance(table: &DataTable) -> Result<Vec<PerformanceRecord>> {
    let time = table.require_column(columns::TIME)?;
    let offer_id = table.require_column(columns::OFFER_ID)?;
    let app_id = table.require_column(columns::APP_ID)?;
    let advertiser = table.require_column(columns::ADVERTISER)?;
    let affiliate = table.require_column(columns::AFFILIATE)?;
    let geo = table.require_column(columns::GEO)?;
    let status = table.require_column(columns::STATUS)?;
    let revenue = table.require_column(columns::TOTAL_REVENUE)?;
    let profit = table.require_column(columns::TOTAL_PROFIT)?;
    let clicks = table.require_column(columns::TOTAL_CLICKS)?;
    let conversions = table.require_column(columns::TOTAL_CONVERSIONS)?;

    let mut records = Vec::with_capacity(table.row_count());
    for row in 0..table.row_count() {
        if row_is_empty(table, row) {
            continue;
        }
        let Some(timestamp) = parse_timestamp_cell(table, row, time, columns::TIME)? else {
            continue;
        };
        records.push(PerformanceRecord {
            timestamp,
            offer_id: table.cell(row, offer_id).trim().to_string(),
            app_id: table.cell(row, app_id).trim().to_string(),
            advertiser: table.cell(row, advertiser).trim().to_string(),
            affiliate: table.cell(row, affiliate).trim().to_string(),
            geo: table.cell(row, geo).trim().to_string(),
            status: table.cell(row, status).trim().to_string(),
            total_revenue: parse_decimal_cell(table, row, revenue, columns::TOTAL_REVENUE)?,
            total_profit: parse_decimal_cell(table, row, profit, columns::TOTAL_PROFIT)?,
            total_clicks: parse_int_cell(table, row, clicks, columns::TOTAL_CLICKS)?,
            total_conversions: parse_int_cell(
                table,
                row,
                conversions,
                columns::TOTAL_CONVERSIONS,
            )?,
        });
    }
    Ok(records)
}

fn map_advertiser_tiers(table: &DataTable) -> Result<Vec<AdvertiserTier>> {
    let advertiser = table.require_column(columns::ADVERTISER)?;
    let tier2 = table.require_column(columns::TIER2)?;
    let tier3 = table.require_column(columns::TIER3)?;

    let mut mappings = Vec::with_capacity(table.row_count());
    for row in 0..table.row_count() {
        let name = table.cell(row, advertiser).trim();
        if name.is_empty() {
            continue;
        }
        mappings.push(AdvertiserTier {
            advertiser: name.to_string(),
            tier2: table.cell(row, tier2).trim().to_string(),
            tier3: table.cell(row, tier3).trim().to_string(),
        });
    }
    Ok(mappings)
}

fn map_reject_events(table: &DataTable) -> Result<Vec<RejectEvent>> {
    let time = table.require_column(columns::TIME)?;
    let advertiser = table.require_column(columns::ADVERTISER)?;
    let event = table.require_column(columns::EVENT)?;

    let mut events = Vec::with_capacity(table.row_count());
    for row in 0..table.row_count() {
        if row_is_empty(table, row) {
            continue;
        }
        let Some(timestamp) = parse_timestamp_cell(table, row, time, columns::TIME)? else {
            continue;
        };
        events.push(RejectEvent {
            timestamp,
            advertiser: table.cell(row, advertiser).trim().to_string(),
            event: table.cell(row, event).trim().to_string(),
        });
    }
    Ok(events)
}

fn map_reject_rules(table: &DataTable) -> Result<Vec<RejectRule>> {
    let event = table.require_column(columns::EVENT)?;
    let is_reject = table.require_column(columns::IS_REJECT)?;

    let mut rules = Vec::with_capacity(table.row_count());
    for row in 0..table.row_count() {
        let name = table.cell(row, event).trim();
        if name.is_empty() {
            continue;
        }
        rules.push(RejectRule {
            event: name.to_string(),
            is_reject: parse_bool_cell(table.cell(row, is_reject)),
        });
    }
    Ok(rules)
}

fn row_is_empty(table: &DataTable, row: usize) -> bool {
    (0..table.headers.len()).all(|column| table.cell(row, column).trim().is_empty())
}

/// Parses a timestamp cell. Returns `None` for an empty cell (the row is
/// skipped upstream with a warning); errors on a non-empty cell in none of
/// the accepted formats.
fn parse_timestamp_cell(
    table: &DataTable,
    row: usize,
    column: usize,
    column_name: &str,
) -> Result<Option<NaiveDateTime>> {
    let raw = table.cell(row, column).trim();
    if raw.is_empty() {
        warn!(
            "Skipping row {} of table '{}': empty {} cell",
            row, table.name, column_name
        );
        return Ok(None);
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(Some(parsed));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(Some(midnight));
        }
    }

    Err(invalid_cell(table, row, column_name, raw, "timestamp"))
}

fn parse_decimal_cell(
    table: &DataTable,
    row: usize,
    column: usize,
    column_name: &str,
) -> Result<Decimal> {
    let raw = table.cell(row, column).trim();
    if raw.is_empty() {
        return Ok(Decimal::ZERO);
    }
    raw.parse::<Decimal>()
        .map_err(|_| invalid_cell(table, row, column_name, raw, "decimal"))
}

/// Parses an integral cell. Decimal renderings of whole numbers ("12.0") are
/// accepted; a fractional count is a data error.
fn parse_int_cell(
    table: &DataTable,
    row: usize,
    column: usize,
    column_name: &str,
) -> Result<i64> {
    let raw = table.cell(row, column).trim();
    if raw.is_empty() {
        return Ok(0);
    }
    if let Ok(value) = raw.parse::<i64>() {
        return Ok(value);
    }
    if let Ok(value) = raw.parse::<Decimal>() {
        if value.fract().is_zero() {
            if let Some(whole) = value.to_i64() {
                return Ok(whole);
            }
        }
    }
    Err(invalid_cell(table, row, column_name, raw, "integer"))
}

/// Reject flags accept true/1/yes in any case; anything else is false,
/// matching how the rule sheet is maintained (blank means not a reject).
fn parse_bool_cell(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}

fn invalid_cell(
    table: &DataTable,
    row: usize,
    column_name: &str,
    value: &str,
    expected: &'static str,
) -> Error {
    ValidationError::InvalidCell {
        table: table.name.clone(),
        row,
        column: column_name.to_string(),
        value: value.to_string(),
        expected,
    }
    .into()
}
