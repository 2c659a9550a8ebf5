use std::env;
use std::error::Error;
use std::fs;

use rendernorm::{Normalizer, RendernormConfig, ResponseEnvelope, normalize_page};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: rendernorm <fragments.json> [config.yaml]";

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let mut args = env::args().skip(1);
    let fragments_path = args.next().ok_or(USAGE)?;
    let config = match args.next() {
        Some(path) => RendernormConfig::from_file(path)?,
        None => RendernormConfig::default(),
    };

    let normalizer = Normalizer::new(config.normalize)?;
    let fragments: Vec<Value> = serde_json::from_str(&fs::read_to_string(fragments_path)?)?;

    let mut envelope = ResponseEnvelope::collecting_refinements();
    let items = normalize_page(&normalizer, &fragments, Some(&mut envelope));

    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "items": items,
            "refinements": envelope.refinements,
            "correctedQuery": envelope.corrected_query,
        }))?
    );
    Ok(())
}

/// `RUST_LOG` filters (default `info`); `RENDERNORM_LOG_JSON=1` switches to JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if env::var_os("RENDERNORM_LOG_JSON").is_some() {
        builder.json().init();
    } else {
        builder.init();
    }
}
