//! Compile vanilla data generator output into configuration packets and the
//! block palette of a small server.
//!
//! Run the vanilla server jar with `--reports --server` first, then point
//! `--data-dir` at its `generated/` directory.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use eyre::WrapErr;
use mc_registry::GeneratorConfig;
use mc_registry_gen::{BAREIRON_CONFIG, Inputs, emit, generate, load_json};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate registry packets and the block palette", long_about = None)]
struct Args {
    /// Data generator output (contains `reports/` and `data/`)
    #[arg(short, long)]
    data_dir: PathBuf,

    /// Generator configuration (JSON); defaults to the bundled bareiron tables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output Rust source file
    #[arg(short, long, default_value = "registries.rs")]
    out: PathBuf,

    /// Namespace whose data pack tree is scanned for registry entries
    #[arg(long, default_value = "minecraft")]
    namespace: String,
}

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mc_registry_gen=info".parse()?)
                .add_directive("mc_registry=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let config: GeneratorConfig = match &args.config {
        Some(path) => load_json(path)?,
        None => serde_json::from_str(BAREIRON_CONFIG).wrap_err("bundled config is invalid")?,
    };

    let inputs = Inputs::load(&args.data_dir, &args.namespace)?;
    let artifacts = generate(&inputs, &config)?;
    let source = emit(&artifacts)?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&args.out, source)
        .wrap_err_with(|| format!("failed to write {}", args.out.display()))?;

    info!(
        registries = artifacts.registries.registries.len(),
        registry_bytes = artifacts.registries.bytes.len(),
        tag_bytes = artifacts.tags.as_ref().map_or(0, |t| t.len()),
        palette = artifacts.palette.len(),
        "wrote {}",
        args.out.display()
    );
    Ok(())
}
