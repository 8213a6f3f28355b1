use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::{debug, error, warn};

use super::table::Table;
use crate::error::LoadError;

/// The configured CSV file.
///
/// Nothing is cached: every call reads the file again, so each request sees
/// the file as it is at that moment and no state is shared between requests.
#[derive(Debug, Clone)]
pub struct DataSource {
    path: PathBuf,
}

impl DataSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and types the whole file.
    pub fn try_load(&self) -> Result<Table, LoadError> {
        if !self.path.exists() {
            return Err(LoadError::NotFound(self.path.clone()));
        }

        let file = File::open(&self.path).map_err(|e| LoadError::Io(self.path.clone(), e))?;
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);

        let header: Vec<String> = reader
            .headers()
            .map_err(|e| self.csv_error(e))?
            .iter()
            .map(|h| h.trim().to_owned())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| self.csv_error(e))?;
            rows.push(record.iter().map(str::to_owned).collect());
        }

        let table = Table::from_raw(header, rows);
        debug!(path = %self.path.display(), rows = table.len(), "loaded data");
        Ok(table)
    }

    /// Like [`try_load`](DataSource::try_load), but every failure is logged
    /// and turned into an empty table.
    pub fn load(&self) -> Table {
        match self.try_load() {
            Ok(table) => table,
            Err(e @ LoadError::NotFound(_)) => {
                warn!("{e}");
                Table::empty()
            }
            Err(e) => {
                error!("error loading data: {e}");
                Table::empty()
            }
        }
    }

    /// Runs [`load`](DataSource::load) on tokio's blocking pool so file I/O
    /// never stalls the async workers.
    pub async fn load_async(&self) -> Table {
        let source = self.clone();
        match tokio::task::spawn_blocking(move || source.load()).await {
            Ok(table) => table,
            Err(e) => {
                error!(path = %self.path.display(), "data load task failed: {e}");
                Table::empty()
            }
        }
    }

    fn csv_error(&self, e: csv::Error) -> LoadError {
        LoadError::Csv(self.path.clone(), e)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::Value;

    fn write_csv(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("data.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_typed_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "subject_id,arm,dose\n1,A,10\n2,B,\n");
        let table = DataSource::new(path).try_load().unwrap();
        assert_eq!(table.columns(), &["subject_id", "arm", "dose"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1][2], Value::Null);
    }

    #[test]
    fn missing_file_is_not_found_and_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let source = DataSource::new(dir.path().join("nope.csv"));
        assert!(matches!(source.try_load(), Err(LoadError::NotFound(_))));
        assert!(source.load().is_empty());
    }

    #[test]
    fn ragged_rows_are_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "a,b\n1,2\n3\n");
        let source = DataSource::new(path);
        assert!(matches!(source.try_load(), Err(LoadError::Csv(..))));
        assert!(source.load().is_empty());
    }

    #[test]
    fn header_only_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "subject_id,arm\n");
        assert!(DataSource::new(path).load().is_empty());
    }

    #[tokio::test]
    async fn async_load_matches_sync() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "a\n1\n2\n");
        let source = DataSource::new(path);
        assert_eq!(source.load_async().await, source.load());
    }
}
