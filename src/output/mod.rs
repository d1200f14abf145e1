//! Solution writers.
//!
//! - [`write_solution`]: plain text, one line per route
//! - [`SolutionReport`]: serde report, written as JSON
//!
//! [`save`] puts a result file for an instance into a directory.

mod report;
mod text;

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::gls::GlsResult;
use crate::models::CostModel;

pub use report::{OutputFormat, SearchSummary, SolutionReport};
pub use text::write_solution;

/// Path of the result file for instance `name`: `<dir>/_gls_<name>.<ext>`.
pub fn result_path(dir: &Path, name: &str, format: OutputFormat) -> PathBuf {
    dir.join(format!("_gls_{name}.{}", format.extension()))
}

/// Writes the result of a run on instance `name` into `dir`, creating the
/// directory if needed. Returns the written path.
pub fn save(
    dir: &Path,
    name: &str,
    model: &CostModel,
    result: &GlsResult,
    format: OutputFormat,
) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = result_path(dir, name, format);
    let writer = BufWriter::new(File::create(&path)?);
    match format {
        OutputFormat::Text => write_solution(model, &result.solution, writer)?,
        OutputFormat::Json => SolutionReport::from_result(name, model, result)
            .write_json(writer)
            .map_err(io::Error::other)?,
    }
    debug!(path = %path.display(), "solution written");
    Ok(path)
}
