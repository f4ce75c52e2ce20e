// src/tools/mod.rs
//
// Tool-style surface over the query layer: the three operations are invoked
// by name with a flat JSON argument object, and return the serialized result
// the caller renders as-is.

use anyhow::{anyhow, Result};
use serde_json::{Map, Value};
use tracing::info;

use crate::dataset::MerchantTable;
use crate::query;

pub const TOOL_SEARCH_MERCHANT: &str = "search_merchant";
pub const TOOL_GET_MERCHANT_DETAIL: &str = "get_merchant_detail";
pub const TOOL_GET_COMPARE_INDUSTRY: &str = "get_compare_industry";

/// One callable tool: its name, a one-line summary, and its sole argument.
#[derive(Debug, Clone, Copy)]
pub struct ToolDef {
    pub name: &'static str,
    pub summary: &'static str,
    pub arg: &'static str,
}

/// Registration order is the stable listing order.
pub const TOOLS: &[ToolDef] = &[
    ToolDef {
        name: TOOL_SEARCH_MERCHANT,
        summary: "가맹점명으로 가맹점 기본 정보를 검색",
        arg: "merchant_name",
    },
    ToolDef {
        name: TOOL_GET_MERCHANT_DETAIL,
        summary: "가맹점 ID로 상세정보를 조회",
        arg: "merchant_id",
    },
    ToolDef {
        name: TOOL_GET_COMPARE_INDUSTRY,
        summary: "동일 업종 기준 비교 지표를 반환",
        arg: "merchant_id",
    },
];

pub fn find(name: &str) -> Option<&'static ToolDef> {
    TOOLS.iter().find(|t| t.name == name)
}

/// Invoke a tool by name against the loaded table.
///
/// `args` is a flat object; each tool takes exactly one string argument.
/// Unknown names and missing/non-string arguments are errors for the caller
/// to surface, never panics.
pub fn dispatch(table: &MerchantTable, tool: &str, args: &Map<String, Value>) -> Result<Value> {
    let def = find(tool).ok_or_else(|| anyhow!("unknown tool `{}`", tool))?;
    let arg = args
        .get(def.arg)
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("tool `{}` requires string argument `{}`", tool, def.arg))?;

    info!(tool = %tool, arg = %arg, "dispatching tool call");
    let result = match def.name {
        TOOL_SEARCH_MERCHANT => serde_json::to_value(query::search_merchant(table, arg))?,
        TOOL_GET_MERCHANT_DETAIL => serde_json::to_value(query::get_merchant_detail(table, arg))?,
        TOOL_GET_COMPARE_INDUSTRY => {
            serde_json::to_value(query::get_compare_industry(table, arg))?
        }
        other => unreachable!("tool `{}` registered but not dispatched", other),
    };
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Cursor;

    const SAMPLE: &str = "\
가맹점ID,가맹점명,주소,업종,재방문율
000F03E44A,유유**,서울특별시 마포구,카페,0.25
11AA22BB33,유유**,서울특별시 서대문구,카페,0.35
";

    fn sample_table() -> Result<MerchantTable> {
        Ok(MerchantTable::from_reader(Cursor::new(SAMPLE))?)
    }

    fn args(key: &str, value: &str) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(key.to_string(), Value::String(value.to_string()));
        map
    }

    #[test]
    fn dispatches_all_three_tools() -> Result<()> {
        let table = sample_table()?;

        let search = dispatch(&table, TOOL_SEARCH_MERCHANT, &args("merchant_name", "유유커피"))?;
        assert_eq!(search["found"], Value::Bool(true));
        assert_eq!(search["count"], Value::from(2));

        let detail = dispatch(
            &table,
            TOOL_GET_MERCHANT_DETAIL,
            &args("merchant_id", "000F03E44A"),
        )?;
        assert_eq!(detail["found"], Value::Bool(true));
        assert_eq!(detail["detail"]["주소"], Value::from("서울특별시 마포구"));

        let compare = dispatch(
            &table,
            TOOL_GET_COMPARE_INDUSTRY,
            &args("merchant_id", "000F03E44A"),
        )?;
        assert_eq!(compare["industry"], Value::from("카페"));
        assert_eq!(compare["industry_peers"]["count"], Value::from(2));
        Ok(())
    }

    #[test]
    fn unknown_tool_is_an_error() -> Result<()> {
        let table = sample_table()?;
        let err = dispatch(&table, "drop_table", &Map::new()).unwrap_err();
        assert!(err.to_string().contains("unknown tool"));
        Ok(())
    }

    #[test]
    fn missing_argument_is_an_error() -> Result<()> {
        let table = sample_table()?;
        let err = dispatch(&table, TOOL_SEARCH_MERCHANT, &Map::new()).unwrap_err();
        assert!(err.to_string().contains("merchant_name"));

        let err = dispatch(
            &table,
            TOOL_GET_MERCHANT_DETAIL,
            &args("merchant_id_typo", "000F03E44A"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("merchant_id"));
        Ok(())
    }

    #[test]
    fn listing_order_is_registration_order() {
        let names: Vec<&str> = TOOLS.iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![
                TOOL_SEARCH_MERCHANT,
                TOOL_GET_MERCHANT_DETAIL,
                TOOL_GET_COMPARE_INDUSTRY,
            ]
        );
    }
}
