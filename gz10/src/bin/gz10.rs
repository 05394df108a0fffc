use std::{
    io::{BufWriter, Write},
    path::PathBuf,
    time::Instant,
};

use clap::{Parser, Subcommand};
use gz10::{
    healpix_bucket, BuilderConfig, CatalogShard, DatasetInfo, Example, ObjectId, Resolver,
    StorageBackend, Variant,
};
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(author, version, long_about = None)]
#[command(about = "GZ10 CLI - Read Galaxy10 DECaLS catalog shards and emit records as JSON lines")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show dataset description and record schema
    Info {
        /// Configuration name (gz10 or gz10_rgb_images)
        #[arg(long, default_value = "gz10_rgb_images")]
        name: Variant,
    },
    /// Generate the records of every shard in a split
    Generate {
        /// JSON builder configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Configuration name, overrides the configuration file
        #[arg(long)]
        name: Option<Variant>,

        /// Data directory, overrides the configuration file
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Split to generate
        #[arg(long, default_value = "train")]
        split: String,

        /// Stop after this many records
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Look up object ids in one shard
    Lookup {
        /// Shard file
        shard: PathBuf,

        /// Object ids to look up
        #[arg(required = true)]
        ids: Vec<String>,

        /// Configuration name
        #[arg(long, default_value = "gz10_rgb_images")]
        name: Variant,
    },
    /// Show the header and column directory of one shard
    Inspect {
        /// Shard file
        shard: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();
    let cli = Cli::parse();
    let start_time = Instant::now();

    match cli.command {
        Commands::Info { name } => handle_info(name)?,
        Commands::Generate {
            config,
            name,
            data_dir,
            split,
            limit,
        } => handle_generate(config, name, data_dir, &split, limit)?,
        Commands::Lookup { shard, ids, name } => handle_lookup(shard, ids, name)?,
        Commands::Inspect { shard } => handle_inspect(shard)?,
    }

    info!(elapsed = ?start_time.elapsed(), "done");
    Ok(())
}

fn setup_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn handle_info(variant: Variant) -> Result<(), Box<dyn std::error::Error>> {
    let info = DatasetInfo::for_variant(variant);
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

fn handle_generate(
    config: Option<PathBuf>,
    name: Option<Variant>,
    data_dir: Option<PathBuf>,
    split: &str,
    limit: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match config {
        Some(path) => BuilderConfig::from_json_file(path)?,
        None => BuilderConfig::default(),
    };
    if let Some(name) = name {
        config.name = name;
    }
    if let Some(data_dir) = data_dir {
        config = config.with_data_dir(data_dir);
    }

    let files = config
        .split_generators()?
        .into_iter()
        .find(|generator| generator.name == split)
        .map(|generator| generator.files)
        .ok_or_else(|| gz10::Error::Configuration(format!("no split named '{split}'")))?;
    info!(
        split,
        variant = %config.variant(),
        shards = files.len(),
        "generating examples"
    );

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut written = 0usize;
    let mut failed = 0usize;

    let examples = config.generate(files, None)?;
    for example in examples.take(limit.unwrap_or(usize::MAX)) {
        match example {
            Ok(example) => {
                write_example(&mut out, &example)?;
                written += 1;
            }
            Err(err) if err.is_fatal() => return Err(err.into()),
            // Already logged by the generator
            Err(_) => failed += 1,
        }
    }
    out.flush()?;

    info!(written, failed, "generation finished");
    Ok(())
}

fn handle_lookup(
    shard: PathBuf,
    ids: Vec<String>,
    variant: Variant,
) -> Result<(), Box<dyn std::error::Error>> {
    let shard = CatalogShard::open(&shard, variant)?;
    let resolver = Resolver::build(&shard)?;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let missed = write_lookups(&mut out, &shard, &resolver, ids)?;
    out.flush()?;
    if missed > 0 {
        info!(missed, "some identifiers were not found");
    }
    Ok(())
}

/// Writes one JSON line per resolved id, logging the misses. Returns the miss count.
fn write_lookups<B: StorageBackend>(
    out: &mut impl Write,
    shard: &CatalogShard<B>,
    resolver: &Resolver,
    ids: Vec<String>,
) -> Result<usize, Box<dyn std::error::Error>> {
    let mut missed = 0;
    for id in ids {
        let key = ObjectId::from(id);
        match resolver.resolve(&key) {
            Ok(row) => {
                let record = shard.read_record(row)?;
                write_example(out, &(record.object_id().to_string(), record))?;
            }
            Err(err) => {
                warn!(error = %err, "lookup failed");
                missed += 1;
            }
        }
    }
    Ok(missed)
}

fn handle_inspect(path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let shard = CatalogShard::open(&path, Variant::Gz10)?;
    let container = shard.shard();

    println!("Shard: {}", path.display());
    if let Some(bucket) = healpix_bucket(&path) {
        println!("  Healpix bucket: {bucket}");
    }
    println!("  Format version: {}", container.header().version);
    println!("  Rows: {}", shard.row_count());
    println!("  Identifier kind: {:?}", shard.id_kind());
    println!("  Columns:");
    for name in container.column_names() {
        if let Some(column) = container.column(name) {
            println!(
                "    {name:<24} {:<6} shape {:?}",
                column.data_type().to_string(),
                column.shape()
            );
        }
    }
    let images = Variant::Gz10RgbImages
        .required_columns()
        .iter()
        .all(|column| container.has_column(column));
    println!("  Image variant supported: {images}");
    Ok(())
}

fn write_example(out: &mut impl Write, (key, record): &Example) -> std::io::Result<()> {
    serde_json::to_writer(&mut *out, &json!({ "key": key, "record": record }))?;
    writeln!(out)
}
