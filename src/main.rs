pub mod config;
pub mod pipeline;
pub mod sqlite_pragma;
pub mod summary_core;

use config::Config;

pub fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    dotenv::dotenv().ok();

    let config = Config::from_env();

    log::info!("🚀 Starting vendor sales summary run");
    log::info!("   Source database: {}", config.source_db_path.display());
    log::info!("   Destination database: {}", config.dest_db_path.display());
    log::info!("   Summary table: {}", config.summary_table);
    log::info!("   Load batch size: {}", config.batch_size);
    log::info!("   Backend: {}", config.backend.as_str());

    match pipeline::run(&config) {
        Ok(report) => {
            log::info!("-------------- Ingestion completed ----------------");
            log::info!(
                "   Started {} | extracted {} rows | loaded {} rows in {:.2?}",
                report.started_at.to_rfc3339(),
                report.rows_extracted,
                report.rows_loaded,
                report.elapsed,
            );
            Ok(())
        }
        Err(e) => {
            // Log the full cause chain, then re-raise so the surrounding
            // scheduler observes a failed process.
            log::error!("Failed to build and ingest {}: {}", config.summary_table, e);
            let mut cause = std::error::Error::source(&e);
            while let Some(c) = cause {
                log::error!("   caused by: {}", c);
                cause = c.source();
            }
            Err(Box::new(e))
        }
    }
}
