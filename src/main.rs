mod db;
mod export;
mod fetch;
mod parser;
mod sources;
mod urls;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rusqlite::Connection;
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "panneaux_scraper",
    about = "Road-sign scraper for the Wikibooks Code de la route pages"
)]
struct Cli {
    /// SQLite file to use instead of the default in-memory store
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the source pages, download images, export CSV + SQL
    Run {
        /// JSON file overriding the built-in source list
        #[arg(long)]
        sources: Option<PathBuf>,
        /// Directory for downloaded images
        #[arg(long, default_value = "images")]
        images_dir: PathBuf,
        /// Directory for panneaux.csv / panneaux.sql
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// Metadata-only pass, no image downloads
        #[arg(long)]
        skip_images: bool,
    },
    /// Re-export CSV + SQL from an existing database (requires --db)
    Export {
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Show row counts (requires --db)
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            sources,
            images_dir,
            out_dir,
            skip_images,
        } => {
            let conn = db::connect(cli.db.as_deref())?;
            db::init_schema(&conn)?;
            let srcs = match sources {
                Some(path) => sources::load(&path)?,
                None => sources::default_sources(),
            };
            run_pipeline(&conn, &srcs, &images_dir, &out_dir, skip_images).await
        }
        Commands::Export { out_dir } => {
            let db_path = require_db(cli.db.as_deref())?;
            let conn = db::connect(Some(db_path))?;
            db::init_schema(&conn)?;
            std::fs::create_dir_all(&out_dir)?;
            let (count, csv_path, sql_path) = export_both(&conn, &out_dir)?;
            println!(
                "Exported {} rows: {}, {}",
                count,
                csv_path.display(),
                sql_path.display()
            );
            Ok(())
        }
        Commands::Stats => {
            let db_path = require_db(cli.db.as_deref())?;
            let conn = db::connect(Some(db_path))?;
            db::init_schema(&conn)?;
            let s = db::get_stats(&conn)?;
            println!("Total:               {}", s.total);
            println!("Liste des panneaux:  {}", s.liste);
            println!("Signalisation dyn.:  {}", s.dynamique);
            println!("With image URL:      {}", s.with_image_url);
            println!("Downloaded images:   {}", s.downloaded);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

fn require_db(db: Option<&Path>) -> Result<&Path> {
    db.ok_or_else(|| anyhow::anyhow!("This command needs --db pointing at an existing database"))
}

/// Fetch → parse → download → store, one source page at a time, then export.
/// A failing page is logged and skipped; the run itself still exits 0.
async fn run_pipeline(
    conn: &Connection,
    srcs: &[sources::Source],
    images_dir: &Path,
    out_dir: &Path,
    skip_images: bool,
) -> Result<()> {
    let client = fetch::client()?;
    std::fs::create_dir_all(images_dir)?;
    std::fs::create_dir_all(out_dir)?;

    let mut total = 0usize;
    for src in srcs {
        match process_source(conn, &client, src, images_dir, skip_images).await {
            Ok(count) => {
                info!("{}: {} entries", src.url, count);
                total += count;
            }
            Err(e) => warn!("Skipping {}: {:#}", src.url, e),
        }
    }

    let (_, csv_path, sql_path) = export_both(conn, out_dir)?;
    println!(
        "Done. {} entries considered (duplicates ignored). Exports: {}, {}",
        total,
        csv_path.display(),
        sql_path.display()
    );
    Ok(())
}

async fn process_source(
    conn: &Connection,
    client: &reqwest::Client,
    src: &sources::Source,
    images_dir: &Path,
    skip_images: bool,
) -> Result<usize> {
    info!("Fetching {}", src.url);
    let html = fetch::fetch_html(client, &src.url).await?;
    let mut records = parser::parse_page(&html, src);

    if !skip_images {
        let pb = ProgressBar::new(records.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec})")?
                .progress_chars("=> "),
        );
        for record in &mut records {
            if let Some(url) = record.image_url.clone() {
                // Failed downloads keep the URL but leave the local path
                // empty.
                match fetch::download_image(client, &url, images_dir).await {
                    Ok(path) => record.image_path = Some(path.display().to_string()),
                    Err(e) => warn!("Image download failed for {}: {:#}", record.name, e),
                }
            }
            pb.inc(1);
        }
        pb.finish_and_clear();
    }

    let considered = records.len();
    let inserted = db::insert_panneaux(conn, &records)?;
    info!(
        "{}: inserted {} of {} (rest were duplicates)",
        src.sign_type.as_str(),
        inserted,
        considered
    );
    Ok(considered)
}

fn export_both(conn: &Connection, out_dir: &Path) -> Result<(usize, PathBuf, PathBuf)> {
    let rows = db::fetch_all(conn)?;
    let csv_path = out_dir.join("panneaux.csv");
    let sql_path = out_dir.join("panneaux.sql");
    export::export_csv(&rows, &csv_path)?;
    export::export_sql(&rows, &sql_path)?;
    Ok((rows.len(), csv_path, sql_path))
}
