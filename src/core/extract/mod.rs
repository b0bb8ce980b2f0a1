//! Extract stage: input directory → raw records
//!
//! The extractor reads every matching file in the input directory, keeps the
//! valid rows, and moves each file to the processed or error directory once it
//! is done with it. Failures are isolated per file: a corrupt file is routed
//! to the error directory and the next file is read as normal.

pub mod parse;
pub mod route;

use crate::config::PathsConfig;
use crate::domain::errors::{DerrickError, FileError};
use crate::domain::record::RawRecord;
use crate::domain::Result;
use std::fs;
use std::path::{Path, PathBuf};

pub use parse::{parse_file, parse_reader, ParsedFile};

/// Where an input file ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileDestination {
    /// Read successfully and moved to the processed directory
    Processed(PathBuf),
    /// Unreadable and moved to the error directory
    Error(PathBuf),
    /// Could not be moved; the file is still in the input directory
    Unmoved(String),
}

/// Per-file extraction report
#[derive(Debug, Clone)]
pub struct FileReport {
    /// Path of the file in the input directory
    pub source: PathBuf,

    pub destination: FileDestination,

    /// Valid records taken from this file
    pub records: usize,

    /// Rows skipped because they could not be coerced or failed validation
    pub rows_skipped: usize,

    /// Structural failure, if the file could not be read
    pub failure: Option<FileError>,
}

/// Result of one extraction pass
#[derive(Debug, Default)]
pub struct ExtractionOutcome {
    /// Valid records from every processed file, in file then row order
    pub records: Vec<RawRecord>,

    /// One report per input file
    pub files: Vec<FileReport>,
}

impl ExtractionOutcome {
    /// Number of files moved to the processed directory
    pub fn files_processed(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.destination, FileDestination::Processed(_)))
            .count()
    }

    /// Number of files that could not be read or moved
    pub fn files_failed(&self) -> usize {
        self.files.len() - self.files_processed()
    }

    pub fn rows_skipped(&self) -> usize {
        self.files.iter().map(|f| f.rows_skipped).sum()
    }
}

/// Reads input files and routes them to processed/error directories
#[derive(Debug, Clone)]
pub struct Extractor {
    input_dir: PathBuf,
    processed_dir: PathBuf,
    error_dir: PathBuf,
    extension: String,
}

impl Extractor {
    /// Create an extractor from the configured paths
    pub fn new(paths: &PathsConfig) -> Self {
        Self {
            input_dir: PathBuf::from(&paths.input_dir),
            processed_dir: PathBuf::from(&paths.processed_dir),
            error_dir: PathBuf::from(&paths.error_dir),
            extension: paths
                .file_extension
                .trim_start_matches('.')
                .to_ascii_lowercase(),
        }
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    /// Extract every matching file in the input directory
    ///
    /// Files are read in file-name order. An empty (or missing) input
    /// directory is not an error: a warning is logged and an empty outcome is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the input directory cannot be created or listed,
    /// or if the processed or error directory resolves to the input
    /// directory. Problems with individual files are recorded in the outcome.
    pub fn extract_all(&self) -> Result<ExtractionOutcome> {
        let files = self.list_input_files()?;
        self.check_destinations()?;
        let mut outcome = ExtractionOutcome::default();

        if files.is_empty() {
            tracing::warn!(
                input_dir = %self.input_dir.display(),
                extension = %self.extension,
                "No input files found"
            );
            return Ok(outcome);
        }

        tracing::info!(
            input_dir = %self.input_dir.display(),
            file_count = files.len(),
            "Extracting input files"
        );

        for path in files {
            let (report, records) = self.extract_file(&path);
            outcome.records.extend(records);
            outcome.files.push(report);
        }

        tracing::info!(
            records = outcome.records.len(),
            files_processed = outcome.files_processed(),
            files_failed = outcome.files_failed(),
            rows_skipped = outcome.rows_skipped(),
            "Extraction finished"
        );

        Ok(outcome)
    }

    fn list_input_files(&self) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.input_dir).map_err(|e| {
            DerrickError::Extraction(format!(
                "Failed to create input directory {}: {}",
                self.input_dir.display(),
                e
            ))
        })?;

        let entries = fs::read_dir(&self.input_dir).map_err(|e| {
            DerrickError::Extraction(format!(
                "Failed to list input directory {}: {}",
                self.input_dir.display(),
                e
            ))
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && self.matches_extension(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Refuses destinations that are the input directory under another name
    ///
    /// Destinations that do not exist yet cannot alias the input directory,
    /// which exists once it has been listed.
    fn check_destinations(&self) -> Result<()> {
        let input = fs::canonicalize(&self.input_dir)?;
        for (name, dir) in [
            ("processed", &self.processed_dir),
            ("error", &self.error_dir),
        ] {
            if fs::canonicalize(dir).is_ok_and(|resolved| resolved == input) {
                return Err(DerrickError::Extraction(format!(
                    "{name} directory {} is the input directory {}",
                    dir.display(),
                    self.input_dir.display()
                )));
            }
        }
        Ok(())
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(&self.extension))
            .unwrap_or(false)
    }

    fn extract_file(&self, path: &Path) -> (FileReport, Vec<RawRecord>) {
        let parsed = parse_file(path);

        let (records, rows_skipped, failure) = match parsed {
            Ok(parsed) => {
                for row_error in &parsed.row_errors {
                    tracing::warn!(
                        file = %path.display(),
                        error = %row_error,
                        "Skipping row"
                    );
                }
                (parsed.records, parsed.row_errors.len(), None)
            }
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "Unreadable input file");
                (Vec::new(), 0, Some(e))
            }
        };

        let (destination, records) = if failure.is_none() {
            match route::move_into(path, &self.processed_dir) {
                Ok(moved) => (FileDestination::Processed(moved), records),
                Err(e) => {
                    // Records are dropped so a rerun does not load them twice
                    tracing::error!(
                        file = %path.display(),
                        error = %e,
                        "Failed to move file to processed directory"
                    );
                    (self.route_to_error(path), Vec::new())
                }
            }
        } else {
            (self.route_to_error(path), Vec::new())
        };

        match &destination {
            FileDestination::Processed(to) | FileDestination::Error(to) => {
                crate::log_file_routed!(path, to, records.len());
            }
            FileDestination::Unmoved(_) => {}
        }

        let report = FileReport {
            source: path.to_path_buf(),
            destination,
            records: records.len(),
            rows_skipped,
            failure,
        };
        (report, records)
    }

    fn route_to_error(&self, path: &Path) -> FileDestination {
        match route::move_into(path, &self.error_dir) {
            Ok(moved) => FileDestination::Error(moved),
            Err(e) => {
                tracing::error!(
                    file = %path.display(),
                    error = %e,
                    "Failed to move file to error directory; file left in input directory"
                );
                FileDestination::Unmoved(e.to_string())
            }
        }
    }
}
