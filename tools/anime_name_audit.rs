use anyhow::Context;
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use sqlx::Row;
use std::env;

use anime_catalog::application::hardening::sanitize_text;

/// Report stored anime names that differ from their sanitized form
#[derive(Parser)]
struct Cli {
    #[arg(long)]
    database_url: Option<String>,

    /// Rewrite offending rows with their sanitized name
    #[arg(long)]
    fix: bool,

    /// Rows read per batch
    #[arg(long, default_value_t = 500)]
    batch_size: i64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let db_url = cli
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .context("DATABASE_URL must be set or passed with --database-url")?;
    anyhow::ensure!(cli.batch_size > 0, "--batch-size must be positive");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await
        .context("connecting to database")?;

    let mut last_id = 0_i64;
    let mut scanned = 0_usize;
    let mut dirty = 0_usize;

    loop {
        let rows = sqlx::query("SELECT id, name FROM animes WHERE id > $1 ORDER BY id LIMIT $2")
            .bind(last_id)
            .bind(cli.batch_size)
            .fetch_all(&pool)
            .await?;

        if rows.is_empty() {
            break;
        }

        for r in rows.iter() {
            let id: i64 = r.get("id");
            let name: String = r.get("name");
            last_id = id;
            scanned += 1;

            let clean = sanitize_text(&name);
            if clean == name {
                continue;
            }
            dirty += 1;
            println!("id: {}, stored: {:?}, sanitized: {:?}", id, name, clean);

            if cli.fix {
                sqlx::query("UPDATE animes SET name = $1 WHERE id = $2")
                    .bind(&clean)
                    .bind(id)
                    .execute(&pool)
                    .await?;
                println!("Fixed: {}", id);
            }
        }
    }

    println!("Scanned rows: {}", scanned);
    println!("Unsanitized names: {}", dirty);
    if dirty > 0 && !cli.fix {
        println!("Run with --fix to rewrite them");
    }

    Ok(())
}
