use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use tracing::warn;

use crate::models::PricePoint;

/// Where a loaded series came from. `Missing` means the symbol has never
/// been synced; `Recovered` means a file existed but was unreadable and
/// was treated as empty. Both look like an empty series to the caller,
/// but `Recovered` is worth a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesSource {
    File,
    Missing,
    Recovered,
}

#[derive(Debug)]
pub struct LoadedSeries {
    pub points: Vec<PricePoint>,
    pub source: SeriesSource,
}

/// File-backed persistence for per-symbol price series, one JSON array
/// per symbol under the data directory.
#[derive(Debug, Clone)]
pub struct SeriesStore {
    data_dir: PathBuf,
}

impl SeriesStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> io::Result<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    fn data_file(&self, symbol: &str) -> PathBuf {
        self.data_dir
            .join(format!("stock_data_{}.json", sanitize_symbol(symbol)))
    }

    /// Loads the persisted series for `symbol`. Never fails: a missing file
    /// is an empty series, and a corrupt file is logged and recovered as
    /// empty rather than surfaced.
    pub fn load(&self, symbol: &str) -> LoadedSeries {
        let path = self.data_file(symbol);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return LoadedSeries {
                    points: Vec::new(),
                    source: SeriesSource::Missing,
                };
            }
            Err(e) => {
                warn!("Unreadable series file {:?} for {}: {}. Treating as empty.", path, symbol, e);
                return LoadedSeries {
                    points: Vec::new(),
                    source: SeriesSource::Recovered,
                };
            }
        };

        match serde_json::from_str::<Vec<PricePoint>>(&raw) {
            Ok(points) => LoadedSeries {
                points,
                source: SeriesSource::File,
            },
            Err(e) => {
                warn!("Corrupt series file {:?} for {}: {}. Treating as empty.", path, symbol, e);
                LoadedSeries {
                    points: Vec::new(),
                    source: SeriesSource::Recovered,
                }
            }
        }
    }

    /// Persists the full series, replacing any prior state. Writes to a
    /// sibling temp file and renames it into place, so a concurrent reader
    /// never observes a partially written array.
    pub fn save(&self, symbol: &str, points: &[PricePoint]) -> io::Result<()> {
        let path = self.data_file(symbol);
        let tmp = path.with_extension("json.tmp");

        {
            let file = File::create(&tmp)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, points).map_err(io::Error::from)?;
            writer.flush()?;
        }

        fs::rename(&tmp, &path)
    }
}

/// Maps a symbol to a safe storage key. Path separators and anything else
/// outside `[A-Za-z0-9._-]` become `_`, so a hostile symbol cannot escape
/// the data directory.
pub fn sanitize_symbol(symbol: &str) -> String {
    symbol
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
