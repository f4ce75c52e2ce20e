use anyhow::Result;
use merchantsearch::{
    config::{AppConfig, DEFAULT_CONFIG_PATH},
    dataset::MerchantTable,
    tools,
};
use serde_json::{Map, Value};
use std::{env, process::exit, time::Instant};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn usage(prog: &str) -> ! {
    eprintln!("Usage: {} [--config <path>] <tool> <value>", prog);
    eprintln!("       {} [--config <path>] list-tools", prog);
    eprintln!();
    eprintln!("Tools:");
    for t in tools::TOOLS {
        eprintln!("  {} <{}>", t.name, t.arg);
    }
    exit(1);
}

fn main() -> Result<()> {
    // ─── 1) parse args ───────────────────────────────────────────────
    let args: Vec<String> = env::args().collect();
    let mut rest: &[String] = &args[1..];
    let mut config_path = DEFAULT_CONFIG_PATH.to_string();
    if rest.first().map(String::as_str) == Some("--config") {
        if rest.len() < 2 {
            usage(&args[0]);
        }
        config_path = rest[1].clone();
        rest = &rest[2..];
    }
    if rest.is_empty() {
        usage(&args[0]);
    }

    // ─── 2) load config & init logging ───────────────────────────────
    let config = AppConfig::load(&config_path)?;
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.as_deref().unwrap_or("info")));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    info!(
        config = %config_path,
        dataset = %config.dataset_path.display(),
        "startup"
    );

    // ─── 3) list-tools needs no dataset ──────────────────────────────
    if rest[0] == "list-tools" {
        for t in tools::TOOLS {
            println!("{}({}) - {}", t.name, t.arg, t.summary);
        }
        return Ok(());
    }
    if rest.len() != 2 {
        usage(&args[0]);
    }
    let (tool, value) = (rest[0].as_str(), rest[1].as_str());

    // ─── 4) load the dataset once ────────────────────────────────────
    let start = Instant::now();
    let table = MerchantTable::load_csv(&config.dataset_path)?;
    info!(elapsed = ?start.elapsed(), "dataset ready");

    // ─── 5) dispatch & print ─────────────────────────────────────────
    let Some(def) = tools::find(tool) else {
        eprintln!("unknown tool `{}`", tool);
        usage(&args[0]);
    };
    let mut tool_args = Map::new();
    tool_args.insert(def.arg.to_string(), Value::String(value.to_string()));

    let result = tools::dispatch(&table, tool, &tool_args)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
