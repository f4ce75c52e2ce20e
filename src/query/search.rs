// src/query/search.rs
use serde::Serialize;
use tracing::{info, warn};

use super::mask::mask_merchant_name;
use crate::dataset::MerchantTable;

/// Minimal per-match record: enough for the caller to disambiguate and
/// follow up with a detail fetch by id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MerchantSummary {
    pub name: String,
    pub merchant_id: String,
    pub address: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResult {
    pub found: bool,
    pub message: String,
    pub count: usize,
    pub merchants: Vec<MerchantSummary>,
}

/// Look up merchants by name.
///
/// The input is masked to the dataset's convention and compared by exact
/// string equality against the stored (already-masked) name column. Masking
/// collapses distinct original names onto the same key, so zero, one, or
/// many rows may match; all matches are returned in table row order.
pub fn search_merchant(table: &MerchantTable, merchant_name: &str) -> SearchResult {
    info!(input = %merchant_name, "search_merchant start");

    let masked = mask_merchant_name(merchant_name);
    info!(original = %merchant_name, masked = %masked, "merchant name masked");

    let merchants: Vec<MerchantSummary> = table
        .names()
        .iter()
        .enumerate()
        .filter(|(_, name)| name.as_str() == masked)
        .map(|(row, name)| MerchantSummary {
            name: name.clone(),
            merchant_id: table.ids()[row].clone(),
            address: table.addresses()[row].clone(),
        })
        .collect();

    if merchants.is_empty() {
        warn!(masked = %masked, "no merchants matched");
        return SearchResult {
            found: false,
            message: format!("'{}'에 해당하는 가맹점을 찾을 수 없습니다.", masked),
            count: 0,
            merchants,
        };
    }

    info!(masked = %masked, count = merchants.len(), "search succeeded");
    SearchResult {
        found: true,
        message: format!(
            "'{}'에 해당하는 가맹점 {}개를 찾았습니다.",
            masked,
            merchants.len()
        ),
        count: merchants.len(),
        merchants,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Cursor;

    const SAMPLE: &str = "\
가맹점ID,기준년월,가맹점명,주소,업종,재방문율
000F03E44A,202406,유유**,서울특별시 마포구,카페,0.25
11AA22BB33,202406,유유**,서울특별시 서대문구,카페,0.35
55CC66DD77,202406,동대*,서울특별시 중구,한식,0.4
";

    fn sample_table() -> Result<MerchantTable> {
        Ok(MerchantTable::from_reader(Cursor::new(SAMPLE))?)
    }

    #[test]
    fn unmasked_input_finds_all_colliding_rows() -> Result<()> {
        let table = sample_table()?;
        let result = search_merchant(&table, "유유커피");
        assert!(result.found);
        assert_eq!(result.count, 2);
        assert_eq!(result.merchants.len(), 2);
        assert_eq!(
            result.merchants[0],
            MerchantSummary {
                name: "유유**".into(),
                merchant_id: "000F03E44A".into(),
                address: "서울특별시 마포구".into(),
            }
        );
        // row order of the source file is preserved
        assert_eq!(result.merchants[1].merchant_id, "11AA22BB33");
        assert!(result.message.contains("유유**"));
        Ok(())
    }

    #[test]
    fn already_masked_input_matches_directly() -> Result<()> {
        let table = sample_table()?;
        let result = search_merchant(&table, "동대*");
        assert!(result.found);
        assert_eq!(result.count, 1);
        assert_eq!(result.merchants[0].merchant_id, "55CC66DD77");
        Ok(())
    }

    #[test]
    fn zero_matches_return_structured_not_found() -> Result<()> {
        let table = sample_table()?;
        let result = search_merchant(&table, "분식집");
        assert!(!result.found);
        assert_eq!(result.count, 0);
        assert!(result.merchants.is_empty());
        // message cites the masked form, not the raw input
        assert!(result.message.contains("분식*"));
        Ok(())
    }

    #[test]
    fn matching_is_exact_equality_not_substring() -> Result<()> {
        // "동대문시장" masks to "동대***"; the stored "동대*" is a strict
        // prefix of it. A partial matcher would pair them, exact equality
        // must not. Documented behavior despite older tool docs promising
        // partial matching.
        let table = sample_table()?;
        let result = search_merchant(&table, "동대문시장");
        assert!(!result.found);
        assert_eq!(result.count, 0);
        Ok(())
    }
}
