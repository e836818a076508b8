//! Pipeline orchestration - Querying → Transforming → Loading
//!
//! The run is a single unit executed sequentially on the current thread:
//! each stage consumes the previous stage's owned output, no stage is
//! retried, and the first failure ends the run with its cause chain intact.

use crate::config::Config;
use crate::summary_core::{
    clean_summary, LoaderError, RawSummaryRow, SqliteSummaryReader, SummaryLoader,
    SummaryQueryError, SummaryRow,
};
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

/// Stage marker for the run state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Idle,
    Querying,
    Transforming,
    Loading,
    Done,
    Failed,
}

impl RunStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStage::Idle => "Idle",
            RunStage::Querying => "Querying",
            RunStage::Transforming => "Transforming",
            RunStage::Loading => "Loading",
            RunStage::Done => "Done",
            RunStage::Failed => "Failed",
        }
    }
}

#[derive(Debug)]
pub enum PipelineError {
    Query(SummaryQueryError),
    Load(LoaderError),
}

impl PipelineError {
    /// Stage in which the run failed.
    pub fn stage(&self) -> RunStage {
        match self {
            PipelineError::Query(_) => RunStage::Querying,
            PipelineError::Load(_) => RunStage::Loading,
        }
    }
}

impl From<SummaryQueryError> for PipelineError {
    fn from(err: SummaryQueryError) -> Self {
        PipelineError::Query(err)
    }
}

impl From<LoaderError> for PipelineError {
    fn from(err: LoaderError) -> Self {
        PipelineError::Load(err)
    }
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Query(e) => write!(f, "Summary extraction failed: {}", e),
            PipelineError::Load(e) => write!(f, "Summary load failed: {}", e),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Query(e) => Some(e),
            PipelineError::Load(e) => Some(e),
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub rows_extracted: usize,
    pub rows_loaded: usize,
    pub elapsed: Duration,
    pub stage: RunStage,
}

/// Drive the three stages once, sequentially, with blocking I/O.
pub fn run(config: &Config) -> Result<RunReport, PipelineError> {
    match run_stages(config) {
        Ok(report) => Ok(report),
        Err(e) => {
            log::error!(
                "❌ Run failed during {} (→ {}): {}",
                e.stage().as_str(),
                RunStage::Failed.as_str(),
                e
            );
            Err(e)
        }
    }
}

fn run_stages(config: &Config) -> Result<RunReport, PipelineError> {
    let started_at = Utc::now();
    let started = Instant::now();

    log::info!("⏱️  Stage: {}", RunStage::Querying.as_str());
    let raw_rows = {
        // The source connection is scoped to the extract stage.
        let reader = SqliteSummaryReader::new(&config.source_db_path)?;
        reader.fetch_summary()?
    };
    log::info!(
        "📥 Extracted {} rows x {} cols",
        raw_rows.len(),
        RawSummaryRow::COLUMN_COUNT
    );
    preview(&raw_rows);

    log::info!("⏱️  Stage: {}", RunStage::Transforming.as_str());
    let clean_rows = clean_summary(&raw_rows);
    log::info!(
        "🧮 Cleaned {} rows x {} cols",
        clean_rows.len(),
        SummaryRow::COLUMN_COUNT
    );

    log::info!("⏱️  Stage: {}", RunStage::Loading.as_str());
    let mut loader = SummaryLoader::from_config(config)?;
    log::info!("📊 Backend: {}", loader.backend_type());
    let rows_loaded = loader.load(&clean_rows)?;

    let elapsed = started.elapsed();
    log::info!("✅ Run complete: {} rows loaded in {:.2?}", rows_loaded, elapsed);

    Ok(RunReport {
        started_at,
        rows_extracted: raw_rows.len(),
        rows_loaded,
        elapsed,
        stage: RunStage::Done,
    })
}

fn preview(rows: &[RawSummaryRow]) {
    if log::log_enabled!(log::Level::Debug) {
        for row in rows.iter().take(5) {
            log::debug!("   {:?}", row);
        }
    }
}
