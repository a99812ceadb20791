use crate::domain::ClassState;
use crate::error::Result;
use crate::mining::ProjectState;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// The fixed dataset schema: one row per exported (release, file).
pub const DATASET_FIELDS: [&str; 19] = [
    "Version",
    "File Name",
    "LOC",
    "LOC_touched",
    "NR",
    "NFix",
    "NAuth",
    "LOC_added",
    "MAX_LOC_added",
    "AVG_LOC_ADDED",
    "Churn",
    "MAX_churn",
    "AVG_Churn",
    "ChgSetSize",
    "MAX_ChgSetSize",
    "AVG_ChgSetSize",
    "AGE",
    "WeightedAge",
    "Buggy",
];

/// Minimal buffered CSV writer with RFC-4180-style quoting.
pub struct CsvWriter {
    out: BufWriter<File>,
    fields: Vec<String>,
}

impl CsvWriter {
    pub fn create<P: AsRef<Path>>(path: P, fields: &[&str]) -> Result<Self> {
        let file = File::create(path)?;
        Ok(CsvWriter {
            out: BufWriter::new(file),
            fields: fields.iter().map(|s| s.to_string()).collect(),
        })
    }

    pub fn write_header(&mut self) -> Result<()> {
        let header: Vec<String> = self.fields.clone();
        self.write_row(&header)
    }

    pub fn write_row(&mut self, row: &[String]) -> Result<()> {
        let line: Vec<String> = row.iter().map(|f| Self::escape(f)).collect();
        writeln!(self.out, "{}", line.join(","))?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    fn escape(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }
}

/// Output layout for a run: where datasets go and where clones live.
#[derive(Debug, Clone)]
pub struct OutputDirectory {
    output: PathBuf,
    repository: PathBuf,
}

impl OutputDirectory {
    /// Create both directories if missing.
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(output: P, repository: Q) -> Result<Self> {
        let output = output.as_ref().to_path_buf();
        let repository = repository.as_ref().to_path_buf();
        fs::create_dir_all(&output)?;
        fs::create_dir_all(&repository)?;
        Ok(OutputDirectory { output, repository })
    }

    /// Dataset path for one project: `<output>/<name>.csv`
    pub fn csv_path(&self, project: &str) -> PathBuf {
        self.output.join(format!("{}.csv", project))
    }

    /// Clone location for one project: `<repository>/<name>`
    pub fn clone_path(&self, project: &str) -> PathBuf {
        self.repository.join(project)
    }
}

/// Export policy: the leading releases are written unconditionally to
/// bootstrap early history; later releases only contribute rows already
/// labeled buggy (class-imbalance control). This is a writer concern
/// layered on top of the engine, not an engine invariant.
pub fn should_export(version: usize, cutoff: usize, state: &ClassState) -> bool {
    version <= cutoff || state.buggy()
}

/// One dataset row for a file as of a release.
pub fn dataset_row(version: usize, state: &ClassState) -> Vec<String> {
    vec![
        version.to_string(),
        state.path().to_string(),
        state.loc().to_string(),
        state.touched_loc().to_string(),
        state.revisions().to_string(),
        state.fixes().to_string(),
        state.authors().to_string(),
        state.added_loc().to_string(),
        state.max_added_loc().to_string(),
        state.avg_added_loc().to_string(),
        state.churn().to_string(),
        state.max_churn().to_string(),
        state.avg_churn().to_string(),
        state.changed_file_set().to_string(),
        state.max_changed_file_set().to_string(),
        state.avg_changed_file_set().to_string(),
        state.age().to_string(),
        state.weighted_age().to_string(),
        if state.buggy() { "YES" } else { "NO" }.to_string(),
    ]
}

/// Write the eligible rows for the release the walker is currently on,
/// then flush so prior releases survive a later abort. Returns the
/// number of rows written.
pub fn write_release(writer: &mut CsvWriter, project: &ProjectState) -> Result<usize> {
    let version = project.version();
    let cutoff = project.num_release_to_process();

    let mut rows = 0;
    let paths: Vec<String> = project.files().map(|p| p.to_string()).collect();
    for path in paths {
        if let Some(state) = project.state(&path) {
            if should_export(version, cutoff, state) {
                writer.write_row(&dataset_row(version, state))?;
                rows += 1;
            }
        }
    }
    writer.flush()?;
    Ok(rows)
}
