use merchantsearch::dataset::{columns, MerchantTable};
use std::{env, path::Path, process::exit};

fn main() {
    // Expect exactly one CLI argument: path to the merchant CSV.
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <DATASET_CSV>", args[0]);
        exit(1);
    }
    if let Err(e) = inspect(Path::new(&args[1])) {
        eprintln!("Error: {:#}", e);
        exit(1);
    }
}

/// Load the dataset and print its schema, row count, and which columns the
/// industry comparison will treat as metrics.
fn inspect(path: &Path) -> anyhow::Result<()> {
    let table = MerchantTable::load_csv(path)?;
    let metrics = columns::metric_columns(table.headers());

    println!("=== Dataset: {} ===", path.display());
    println!("Rows:    {}", table.row_count());
    println!("Columns: {}", table.headers().len());
    println!();

    println!("=== Columns ===");
    for h in table.headers() {
        let kind = if metrics.iter().any(|m| m == h) {
            "metric"
        } else {
            "identity"
        };
        println!("- {:<24} | {}", h, kind);
    }
    println!();
    println!("Metric columns: {}", metrics.len());

    if table.row_count() > 0 {
        println!();
        println!("=== First row ===");
        println!("{}", serde_json::to_string_pretty(&table.row_object(0))?);
    }

    Ok(())
}
