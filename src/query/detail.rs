// src/query/detail.rs
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::dataset::MerchantTable;

#[derive(Debug, Serialize)]
pub struct DetailResult {
    pub found: bool,
    /// 0 or 1; only the first matching row is ever returned.
    pub count: usize,
    pub detail: Option<Map<String, Value>>,
    pub message: String,
}

/// Fetch the full record for one merchant id.
///
/// Ids are compared by exact string equality. The id column is treated as a
/// unique key by convention; if the source file ever carries duplicates the
/// first row wins and the rest are ignored without error.
pub fn get_merchant_detail(table: &MerchantTable, merchant_id: &str) -> DetailResult {
    info!(merchant_id = %merchant_id, "get_merchant_detail start");

    match table.find_by_id(merchant_id) {
        None => {
            warn!(merchant_id = %merchant_id, "no merchant for id");
            DetailResult {
                found: false,
                count: 0,
                detail: None,
                message: format!("{} 에 해당하는 가맹점 없음", merchant_id),
            }
        }
        Some(row) => {
            info!(merchant_id = %merchant_id, row, "detail found");
            DetailResult {
                found: true,
                count: 1,
                detail: Some(table.row_object(row)),
                message: format!("{} 의 가맹점 상세정보를 찾았습니다.", merchant_id),
            }
        }
    }
}
