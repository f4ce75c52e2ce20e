//! Well-known column names of the merchant dataset.
//!
//! The source file carries its original Korean headers. The four key columns
//! are required at load time; everything else is carried opaquely and only
//! classified here as identity/administrative vs. metric.

/// Merchant name, stored already masked (e.g. `유유**`).
pub const COL_MERCHANT_NAME: &str = "가맹점명";
/// Merchant id, treated as a unique key by convention.
pub const COL_MERCHANT_ID: &str = "가맹점ID";
pub const COL_ADDRESS: &str = "주소";
/// Business category, the grouping key for industry comparisons.
pub const COL_INDUSTRY: &str = "업종";

pub const COL_PERIOD: &str = "기준년월";
pub const COL_BRAND_CODE: &str = "브랜드코드";
pub const COL_REGION: &str = "지역";
pub const COL_TRADE_ZONE: &str = "상권";
pub const COL_OPEN_DATE: &str = "개설일";
pub const COL_CLOSE_DATE: &str = "폐업일";

/// Identity/administrative columns, never eligible for statistical comparison.
pub const EXCLUDED_METRIC_COLUMNS: &[&str] = &[
    COL_MERCHANT_ID,
    COL_PERIOD,
    COL_ADDRESS,
    COL_MERCHANT_NAME,
    COL_BRAND_CODE,
    COL_REGION,
    COL_INDUSTRY,
    COL_TRADE_ZONE,
    COL_OPEN_DATE,
    COL_CLOSE_DATE,
];

/// Every header not in the exclusion list, preserving table column order.
pub fn metric_columns(headers: &[String]) -> Vec<String> {
    headers
        .iter()
        .filter(|h| !EXCLUDED_METRIC_COLUMNS.contains(&h.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excludes_identity_columns_preserving_order() {
        let headers: Vec<String> = [
            COL_MERCHANT_ID,
            COL_PERIOD,
            COL_MERCHANT_NAME,
            COL_ADDRESS,
            COL_INDUSTRY,
            "이용건수구간",
            "재방문율",
            COL_OPEN_DATE,
            "등급",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        assert_eq!(metric_columns(&headers), vec!["이용건수구간", "재방문율", "등급"]);
    }

    #[test]
    fn all_identity_columns_yield_empty_set() {
        let headers: Vec<String> = EXCLUDED_METRIC_COLUMNS
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(metric_columns(&headers).is_empty());
    }
}
