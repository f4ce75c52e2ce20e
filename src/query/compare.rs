// src/query/compare.rs
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::{debug, error, info, warn};

use crate::dataset::{cell_value, columns, MerchantTable};

#[derive(Debug, Serialize)]
pub struct ComparisonResult {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry_peers: Option<IndustryPeers>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ComparisonResult {
    fn not_found(message: String) -> Self {
        Self {
            found: false,
            merchant_id: None,
            industry: None,
            metrics: None,
            target: None,
            industry_peers: None,
            message: Some(message),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IndustryPeers {
    pub count: usize,
    /// metric column → mean, mode fallback, or null
    pub avg: Map<String, Value>,
}

/// Outcome of aggregating one metric column over the peer group.
///
/// `Empty` and `Failed` both surface as `null` in the public `avg` map but
/// stay distinguishable here so a genuinely all-missing column can be told
/// apart from a computation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnAggregate {
    /// Arithmetic mean over the numerically-parsable subset, 2 decimals.
    Mean(f64),
    /// Most frequent non-empty value; ties break to the first-encountered.
    Mode(String),
    /// Column entirely empty across the peer group.
    Empty,
    /// Per-column computation error, absorbed rather than propagated.
    Failed(String),
}

impl ColumnAggregate {
    pub fn into_value(self) -> Value {
        match self {
            ColumnAggregate::Mean(v) => Value::from(v),
            ColumnAggregate::Mode(v) => Value::from(v),
            ColumnAggregate::Empty | ColumnAggregate::Failed(_) => Value::Null,
        }
    }
}

fn parse_numeric(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return None;
    }
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Aggregate one metric column over `peers` (row indices into `table`).
///
/// If at least one peer cell parses as a number the result is the mean of
/// the parsable subset only; otherwise the mode of the non-empty values.
/// A failure is confined to this column and never aborts the caller.
pub fn aggregate_metric(table: &MerchantTable, column: &str, peers: &[usize]) -> ColumnAggregate {
    let Some(col) = table.column(column) else {
        error!(column, "metric column missing from table");
        return ColumnAggregate::Failed(format!("column `{}` missing from table", column));
    };

    let mut sum = 0.0;
    let mut numeric = 0usize;
    for &r in peers {
        if let Some(v) = col.get(r).map(String::as_str).and_then(parse_numeric) {
            sum += v;
            numeric += 1;
        }
    }
    if numeric > 0 {
        return ColumnAggregate::Mean(round2(sum / numeric as f64));
    }

    // mode fallback over non-empty values, first-encountered wins ties
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for &r in peers {
        let Some(v) = col.get(r).map(String::as_str) else {
            continue;
        };
        if v.is_empty() {
            continue;
        }
        let seen = counts.entry(v).or_insert(0);
        if *seen == 0 {
            order.push(v);
        }
        *seen += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for v in order {
        let c = counts[v];
        if best.map_or(true, |(_, bc)| c > bc) {
            best = Some((v, c));
        }
    }
    match best {
        Some((v, _)) => ColumnAggregate::Mode(v.to_string()),
        None => ColumnAggregate::Empty,
    }
}

/// Compare one merchant against every merchant sharing its business category.
///
/// The peer group includes the target row itself. Metric columns are derived
/// from the table schema on every call; per-column failures are logged and
/// recorded as `null`, never fatal. Output is deterministic for a fixed
/// table snapshot.
pub fn get_compare_industry(table: &MerchantTable, merchant_id: &str) -> ComparisonResult {
    info!(merchant_id = %merchant_id, "get_compare_industry start");

    let Some(target_row) = table.find_by_id(merchant_id) else {
        warn!(merchant_id = %merchant_id, "no data for id");
        return ComparisonResult::not_found(format!("{} 데이터 없음", merchant_id));
    };

    let industry = table.industries()[target_row].clone();
    info!(
        name = %table.names()[target_row],
        industry = %industry,
        "comparison target resolved"
    );

    if industry.is_empty() {
        warn!(merchant_id = %merchant_id, "target has no industry");
        return ComparisonResult::not_found("업종 정보 없음".to_string());
    }

    let peer_rows: Vec<usize> = table
        .industries()
        .iter()
        .enumerate()
        .filter(|(_, v)| v.as_str() == industry)
        .map(|(r, _)| r)
        .collect();
    info!(industry = %industry, peers = peer_rows.len(), "peer group selected");

    // the target itself matched, so this only guards a future schema change
    if peer_rows.is_empty() {
        warn!(industry = %industry, "industry has no rows");
        return ComparisonResult::not_found(format!("{} 업종 데이터 없음", industry));
    }

    let metrics = columns::metric_columns(table.headers());
    debug!(count = metrics.len(), "metric columns derived");

    let mut avg = Map::with_capacity(metrics.len());
    for m in &metrics {
        let agg = aggregate_metric(table, m, &peer_rows);
        match &agg {
            ColumnAggregate::Mean(v) => debug!(column = %m, mean = v, "numeric mean"),
            ColumnAggregate::Mode(v) => debug!(column = %m, mode = %v, "mode fallback"),
            ColumnAggregate::Empty => debug!(column = %m, "column empty across peers"),
            ColumnAggregate::Failed(reason) => {
                error!(column = %m, reason = %reason, "metric aggregation failed")
            }
        }
        avg.insert(m.clone(), agg.into_value());
    }

    let target: Map<String, Value> = metrics
        .iter()
        .map(|m| {
            (
                m.clone(),
                cell_value(table.cell(m, target_row).unwrap_or("")),
            )
        })
        .collect();

    info!(
        merchant_id = %merchant_id,
        metrics = metrics.len(),
        "comparison complete"
    );

    ComparisonResult {
        found: true,
        merchant_id: Some(merchant_id.to_string()),
        industry: Some(industry),
        metrics: Some(metrics),
        target: Some(target),
        industry_peers: Some(IndustryPeers {
            count: peer_rows.len(),
            avg,
        }),
        message: None,
    }
}
