// src/dataset/mod.rs
pub mod columns;

use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use serde_json::Value;
use std::{collections::HashMap, fs::File, io::Read, path::Path};
use tracing::info;

use self::columns::{COL_ADDRESS, COL_INDUSTRY, COL_MERCHANT_ID, COL_MERCHANT_NAME};

/// Positions of the four key columns, resolved once at load time so queries
/// never have to re-check their presence.
#[derive(Debug, Clone, Copy)]
struct KeyColumns {
    name: usize,
    id: usize,
    address: usize,
    industry: usize,
}

impl KeyColumns {
    fn resolve(index: &HashMap<String, usize>) -> Result<Self> {
        let pos = |name: &str| -> Result<usize> {
            index
                .get(name)
                .copied()
                .with_context(|| format!("dataset missing required column `{}`", name))
        };
        Ok(Self {
            name: pos(COL_MERCHANT_NAME)?,
            id: pos(COL_MERCHANT_ID)?,
            address: pos(COL_ADDRESS)?,
            industry: pos(COL_INDUSTRY)?,
        })
    }
}

/// Immutable, process-lifetime columnar table of merchant records.
///
/// Loaded exactly once from a CSV source file; queries take `&MerchantTable`
/// and never mutate it. Cells are kept as raw strings (the empty string marks
/// a missing value) and only typed when they cross the JSON boundary, see
/// [`cell_value`]. Row order is the insertion order of the source file.
#[derive(Debug)]
pub struct MerchantTable {
    headers: Vec<String>,
    /// header name → column position
    index: HashMap<String, usize>,
    /// column-major storage: `columns[c][r]`
    columns: Vec<Vec<String>>,
    key: KeyColumns,
}

impl MerchantTable {
    /// Read the dataset from `path`. Fails if the file is unreadable, the
    /// header row is malformed, or any of the four key columns is absent.
    #[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path)
            .with_context(|| format!("failed to open dataset `{}`", path.as_ref().display()))?;
        let table = Self::from_reader(file)
            .with_context(|| format!("failed to load dataset `{}`", path.as_ref().display()))?;
        info!(
            rows = table.row_count(),
            columns = table.headers.len(),
            "dataset loaded"
        );
        Ok(table)
    }

    /// Parse a CSV stream into a table. Records shorter than the header are
    /// padded with empty cells; surplus fields are dropped.
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self> {
        let mut csv = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(rdr);

        let headers: Vec<String> = csv
            .headers()
            .context("reading dataset header row")?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        if headers.is_empty() {
            bail!("dataset has no header row");
        }

        let mut index = HashMap::with_capacity(headers.len());
        for (i, h) in headers.iter().enumerate() {
            if index.insert(h.clone(), i).is_some() {
                bail!("duplicate column `{}` in dataset header", h);
            }
        }
        let key = KeyColumns::resolve(&index)?;

        let mut table_columns: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        for (row_idx, record) in csv.records().enumerate() {
            let record = record
                .with_context(|| format!("CSV parse error at data row {}", row_idx))?;
            for (c, col) in table_columns.iter_mut().enumerate() {
                col.push(record.get(c).unwrap_or("").to_string());
            }
        }

        Ok(Self {
            headers,
            index,
            columns: table_columns,
            key,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Full column by header name, `None` for an unknown header.
    pub fn column(&self, name: &str) -> Option<&[String]> {
        self.index.get(name).map(|&c| self.columns[c].as_slice())
    }

    /// Single cell by header name and row, `None` if either is out of range.
    pub fn cell(&self, name: &str, row: usize) -> Option<&str> {
        self.index
            .get(name)
            .and_then(|&c| self.columns[c].get(row))
            .map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.columns[self.key.name]
    }

    pub fn ids(&self) -> &[String] {
        &self.columns[self.key.id]
    }

    pub fn addresses(&self) -> &[String] {
        &self.columns[self.key.address]
    }

    pub fn industries(&self) -> &[String] {
        &self.columns[self.key.industry]
    }

    /// First row whose id cell equals `merchant_id` exactly. Ids are assumed
    /// unique by convention; duplicates are not validated and the first match
    /// wins.
    pub fn find_by_id(&self, merchant_id: &str) -> Option<usize> {
        self.ids().iter().position(|v| v == merchant_id)
    }

    /// One row as a JSON object, every column in table order with typed
    /// cell values.
    pub fn row_object(&self, row: usize) -> serde_json::Map<String, Value> {
        let mut map = serde_json::Map::with_capacity(self.headers.len());
        for (h, col) in self.headers.iter().zip(&self.columns) {
            let raw = col.get(row).map(String::as_str).unwrap_or("");
            map.insert(h.clone(), cell_value(raw));
        }
        map
    }
}

/// Type a raw cell for the JSON boundary: empty → null, integer-looking →
/// integer, float-looking → number, everything else → string.
pub fn cell_value(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Value::from(i);
    }
    if let Ok(f) = raw.parse::<f64>() {
        if f.is_finite() {
            return Value::from(f);
        }
    }
    Value::String(raw.to_string())
}
