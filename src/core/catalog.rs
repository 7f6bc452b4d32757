//! Catalog store.
//!
//! The catalog is an `.xlsx` workbook with one row per processed video. It is
//! loaded once, kept in memory alongside the set of processed filenames, and
//! rewritten in full after every append.

use crate::models::media::CatalogEntry;
use crate::Result;
use calamine::{open_workbook, Data, Reader, Xlsx};
use rust_xlsxwriter::{Format, Workbook};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Column header labels, in order.
pub const COLUMN_LABELS: [&str; 4] = ["视频标题", "视频网址", "视频封面", "视频原片片名"];

/// Column keys, in order. Accepted as headers on load as well.
pub const COLUMN_KEYS: [&str; 4] = [
    "video_title",
    "video_url",
    "video_cover",
    "video_original_filename",
];

/// Column widths in characters.
const COLUMN_WIDTHS: [f64; 4] = [30.0, 50.0, 50.0, 30.0];

const FILENAME_COLUMN: usize = 3;

/// In-memory catalog backed by a workbook on disk.
#[derive(Debug)]
pub struct Catalog {
    path: PathBuf,
    entries: Vec<CatalogEntry>,
    processed: HashSet<String>,
}

impl Catalog {
    /// Load the catalog at `path`, or start an empty one if the file does not exist.
    ///
    /// An empty catalog is not written until the first append.
    pub fn load(path: &Path) -> Result<Self> {
        let entries = if path.exists() {
            read_entries(path)?
        } else {
            tracing::info!("No catalog at {}, starting a new one", path.display());
            Vec::new()
        };

        let processed = entries
            .iter()
            .map(|e| e.original_filename.clone())
            .collect::<HashSet<_>>();

        if processed.len() != entries.len() {
            tracing::warn!(
                "Catalog {} has {} rows but only {} distinct filenames",
                path.display(),
                entries.len(),
                processed.len()
            );
        }

        tracing::debug!("Loaded {} catalog rows from {}", entries.len(), path.display());

        Ok(Self {
            path: path.to_path_buf(),
            entries,
            processed,
        })
    }

    /// Whether a file with this name was already processed.
    pub fn contains(&self, filename: &str) -> bool {
        self.processed.contains(filename)
    }

    /// Append a row and rewrite the workbook.
    ///
    /// On a failed write the row is dropped again, so memory never runs ahead
    /// of what is on disk.
    pub fn append(&mut self, entry: CatalogEntry) -> Result<()> {
        if self.processed.contains(&entry.original_filename) {
            return Err(crate::Error::DuplicateEntry(entry.original_filename));
        }

        let filename = entry.original_filename.clone();
        self.entries.push(entry);
        self.processed.insert(filename.clone());

        if let Err(e) = self.save() {
            self.entries.pop();
            self.processed.remove(&filename);
            return Err(e);
        }

        tracing::debug!("Catalog row added: {}", filename);
        Ok(())
    }

    /// Rows in insertion order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Number of processed filenames.
    pub fn len(&self) -> usize {
        self.processed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processed.is_empty()
    }

    /// Location of the workbook.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write every row to a temporary workbook, then rename it over the catalog.
    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| write_error(&self.path, e))?;
            }
        }

        let tmp_path = temp_path(&self.path);
        write_workbook(&tmp_path, &self.entries).map_err(|e| write_error(&self.path, e))?;

        if let Err(e) = std::fs::rename(&tmp_path, &self.path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(write_error(&self.path, e));
        }

        Ok(())
    }
}

fn write_error(path: &Path, e: impl std::fmt::Display) -> crate::Error {
    crate::Error::CatalogWrite(format!("{}: {}", path.display(), e))
}

fn read_error(path: &Path, e: impl std::fmt::Display) -> crate::Error {
    crate::Error::CatalogRead(format!("{}: {}", path.display(), e))
}

/// Sibling path the workbook is written to before the rename.
fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "catalog.xlsx".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}

fn write_workbook(path: &Path, entries: &[CatalogEntry]) -> std::result::Result<(), rust_xlsxwriter::XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();

    for (col, label) in COLUMN_LABELS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *label, &header)?;
        worksheet.set_column_width(col as u16, COLUMN_WIDTHS[col])?;
    }

    for (i, entry) in entries.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string(row, 0, &entry.display_title)?;
        worksheet.write_string(row, 1, &entry.canonical_url)?;
        worksheet.write_string(row, 2, &entry.cover_reference)?;
        worksheet.write_string(row, 3, &entry.original_filename)?;
    }

    workbook.save(path)?;
    Ok(())
}

/// Read all rows from the first sheet.
fn read_entries(path: &Path) -> Result<Vec<CatalogEntry>> {
    let mut workbook = open_workbook::<Xlsx<BufReader<File>>, _>(path)
        .map_err(|e| read_error(path, e))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| read_error(path, "workbook has no sheets"))?
        .map_err(|e| read_error(path, e))?;

    let mut rows = range.rows();
    let columns = match rows.next() {
        Some(header) => resolve_columns(header),
        None => return Ok(Vec::new()),
    };

    let mut entries = Vec::new();
    for row in rows {
        let entry = CatalogEntry {
            display_title: cell_at(row, columns[0]),
            canonical_url: cell_at(row, columns[1]),
            cover_reference: cell_at(row, columns[2]),
            original_filename: cell_at(row, columns[3]),
        };
        if entry.original_filename.is_empty() {
            tracing::debug!("Skipping catalog row without a filename");
            continue;
        }
        entries.push(entry);
    }

    Ok(entries)
}

/// Map each logical column to its index in the sheet, by header label.
fn resolve_columns(header: &[Data]) -> [usize; 4] {
    let labels: Vec<String> = header.iter().map(cell_to_string).collect();
    let mut columns = [0, 1, 2, FILENAME_COLUMN];
    for (i, column) in columns.iter_mut().enumerate() {
        if let Some(pos) = labels
            .iter()
            .position(|l| l.trim() == COLUMN_LABELS[i] || l.trim() == COLUMN_KEYS[i])
        {
            *column = pos;
        }
    }
    columns
}

fn cell_at(row: &[Data], col: usize) -> String {
    row.get(col).map(cell_to_string).unwrap_or_default()
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        // Files named like "2024.mp4" survive, but a bare "2024" comes back as a float
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}
