//! Storage layer for hrdesk.
//!
//! This module provides CSV-backed persistent storage for employee records.
//! The dataset is a single flat file read whole into memory; appends rewrite
//! the file under an exclusive lock and replace it atomically.

pub mod format;
pub mod lock;

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::Duration;

use csv::StringRecord;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::employee::Employee;
use crate::error::{Error, Result};

use self::format::ColumnIndex;
pub use self::lock::StoreLock;

/// Default time an append waits for another writer to finish.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// Employee dataset with an explicit in-memory cache.
///
/// The cache is filled on first use of [`RecordStore::records`] and dropped
/// by [`RecordStore::invalidate`], [`RecordStore::reload`] and every
/// successful [`RecordStore::append`].
#[derive(Debug)]
pub struct RecordStore {
    /// Path to the dataset file.
    path: PathBuf,
    /// How long an append waits for the writer lock.
    lock_timeout: Duration,
    /// Records from the last load, if still valid.
    cache: Option<Vec<Employee>>,
}

impl RecordStore {
    /// Bind a store to a dataset path. The file is not touched.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
            cache: None,
        }
    }

    /// Set how long appends wait for another writer.
    #[must_use]
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    /// Create an empty dataset holding only the header row.
    ///
    /// Creates the parent directories if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageExists`] if the file already exists, or an
    /// I/O error if it cannot be written.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|err| {
                if err.kind() == std::io::ErrorKind::AlreadyExists {
                    Error::StorageExists { path: path.clone() }
                } else {
                    Error::Io(err)
                }
            })?;

        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(&format::default_headers())?;
        writer.flush()?;

        info!("Created empty dataset at {}", path.display());
        Ok(Self::new(path))
    }

    /// Get the path to the dataset file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record from disk, bypassing the cache.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageOpen`] if the file is missing or unreadable,
    /// [`Error::MissingColumn`] if a required header is absent, and
    /// [`Error::InvalidDate`] or [`Error::InvalidField`] for malformed rows.
    pub fn load(&self) -> Result<Vec<Employee>> {
        let (headers, rows) = self.read_table()?;
        let columns = ColumnIndex::from_headers(&headers)?;

        let records = rows
            .iter()
            .enumerate()
            .map(|(index, row)| format::parse_row(row, &columns, index + 1))
            .collect::<Result<Vec<_>>>()?;

        debug!("Loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    /// The cached records, loading them on first use.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`RecordStore::load`].
    pub fn records(&mut self) -> Result<&[Employee]> {
        let records = match self.cache.take() {
            Some(records) => records,
            None => self.load()?,
        };
        Ok(self.cache.insert(records).as_slice())
    }

    /// Drop the cache and load the dataset again.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`RecordStore::load`].
    pub fn reload(&mut self) -> Result<&[Employee]> {
        self.invalidate();
        self.records()
    }

    /// Drop the cache so the next [`RecordStore::records`] reads the file.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// Whether records are currently cached.
    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    /// Append one record to the end of the dataset.
    ///
    /// The whole file is re-read and rewritten while holding the writer
    /// lock. Columns hrdesk does not know are preserved and left empty for
    /// the new row. The cache is invalidated on success.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageOpen`] if the dataset does not exist,
    /// [`Error::LockTimeout`] if another writer holds the lock for too long,
    /// [`Error::MissingColumn`] if the header row is incomplete, or an I/O
    /// error if the rewrite fails.
    pub fn append(&mut self, employee: &Employee) -> Result<()> {
        fs::metadata(&self.path).map_err(|source| Error::StorageOpen {
            path: self.path.clone(),
            source,
        })?;

        let lock = StoreLock::acquire(&self.path, self.lock_timeout)?;
        debug!("Holding {} for append", lock.path().display());

        let (headers, mut rows) = self.read_table()?;
        ColumnIndex::from_headers(&headers)?;
        rows.push(format::to_row(employee, &headers));
        self.write_table(&headers, &rows)?;

        self.invalidate();
        info!(
            "Appended {} to {} ({} rows)",
            employee.full_name(),
            self.path.display(),
            rows.len()
        );
        Ok(())
    }

    /// Read the raw header and data rows.
    fn read_table(&self) -> Result<(StringRecord, Vec<StringRecord>)> {
        debug!("Reading dataset at {}", self.path.display());
        let file = fs::File::open(&self.path).map_err(|source| Error::StorageOpen {
            path: self.path.clone(),
            source,
        })?;

        let mut reader = csv::Reader::from_reader(file);
        let headers = reader.headers()?.clone();
        let rows = reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok((headers, rows))
    }

    /// Write the full table to a temporary file and rename it into place.
    fn write_table(&self, headers: &StringRecord, rows: &[StringRecord]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = csv::Writer::from_writer(&mut temp);
            writer.write_record(headers)?;
            for row in rows {
                writer.write_record(row)?;
            }
            writer.flush()?;
        }
        temp.as_file().sync_all()?;

        // Keep the dataset's permissions rather than the temp file's 0600.
        if let Ok(metadata) = fs::metadata(&self.path) {
            fs::set_permissions(temp.path(), metadata.permissions())?;
        }

        temp.persist(&self.path).map_err(|err| Error::Io(err.error))?;
        debug!("Rewrote {} rows to {}", rows.len(), self.path.display());
        Ok(())
    }
}
