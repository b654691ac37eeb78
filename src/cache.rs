//! Persistent color → block cache.
//!
//! The cache file is a JSON array of `[[r, g, b], ["block_id", offset]]` pairs. It is
//! never locked: a CRC-32 of the file is taken when it is opened, and if the file has
//! changed by the time we save, the other writer's keys are merged in first. Saves go
//! through a temporary sibling file and an atomic rename, so readers only ever see a
//! complete cache.

use crate::color::Color;
use crate::error::{MapartError, Result};
use crate::observer::{Event, Observer};
use flate2::Crc;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// On-disk record: color and (block id, offset).
type Record = (Color, (String, i32));

/// A cached match for one color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    block: String,
    offset: i32,
}

impl CacheEntry {
    pub fn new(block: impl Into<String>, offset: i32) -> Self {
        Self {
            block: block.into(),
            offset,
        }
    }

    pub fn block(&self) -> &str {
        &self.block
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }
}

/// Result of [`ColorCache::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Nothing changed since the last open or save, or the cache has no backing file.
    Skipped,
    /// The file was rewritten. `merged` counts keys picked up from another writer.
    Saved { entries: usize, merged: usize },
}

#[derive(Debug)]
pub struct ColorCache {
    path: Option<PathBuf>,
    entries: HashMap<Color, CacheEntry>,
    /// Content hash of the file as last read or written, `None` if it did not exist.
    disk_hash: Option<u32>,
    dirty: bool,
}

impl ColorCache {
    /// Opens the cache backed by `path`. A missing file is an empty cache, not an error.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let (entries, disk_hash) = match read_bytes(&path)? {
            Some(bytes) => (parse(&bytes)?, Some(content_hash(&bytes))),
            None => (HashMap::new(), None),
        };

        Ok(Self {
            path: Some(path),
            entries,
            disk_hash,
            dirty: false,
        })
    }

    /// A cache with no backing file. Saving it does nothing.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: HashMap::new(),
            disk_hash: None,
            dirty: false,
        }
    }

    /// Opens the cache, runs `f` with it, and saves it if `f` succeeds. If `f` fails the
    /// in-memory changes are discarded and the file is left as it was.
    pub fn scoped<T, O, F>(path: impl AsRef<Path>, observer: &mut O, f: F) -> Result<T>
    where
        O: Observer + ?Sized,
        F: FnOnce(&mut ColorCache, &mut O) -> Result<T>,
    {
        let mut cache = ColorCache::open(path)?;
        if cache.was_on_disk() {
            observer.on_event(&Event::CacheLoaded {
                entries: cache.len(),
            });
        } else {
            observer.on_event(&Event::CacheMissing);
        }

        let value = f(&mut cache, observer)?;

        if let SaveOutcome::Saved { entries, merged } = cache.save()? {
            if merged > 0 {
                observer.on_event(&Event::CacheMerged { external: merged });
            }
            observer.on_event(&Event::CacheSaved { entries });
        }
        Ok(value)
    }

    pub fn find(&self, color: &Color) -> Option<&CacheEntry> {
        self.entries.get(color)
    }

    /// Inserts a match. With `replace` unset, an existing key is a `DuplicateKey` error
    /// and the cache is left untouched.
    pub fn add(
        &mut self,
        color: Color,
        block: impl Into<String>,
        offset: i32,
        replace: bool,
    ) -> Result<()> {
        match self.entries.entry(color) {
            Entry::Occupied(_) if !replace => return Err(MapartError::DuplicateKey(color)),
            Entry::Occupied(mut slot) => {
                slot.insert(CacheEntry::new(block, offset));
            }
            Entry::Vacant(slot) => {
                slot.insert(CacheEntry::new(block, offset));
            }
        }
        self.dirty = true;
        Ok(())
    }

    /// Inserts or replaces a match.
    pub(crate) fn insert(&mut self, color: Color, entry: CacheEntry) {
        self.entries.insert(color, entry);
        self.dirty = true;
    }

    /// Like [`ColorCache::add`], for keys that arrive as untyped integers.
    pub fn add_components(
        &mut self,
        components: &[i64],
        block: impl Into<String>,
        offset: i32,
        replace: bool,
    ) -> Result<()> {
        let color = Color::try_from(components)?;
        self.add(color, block, offset, replace)
    }

    /// Unions `others` into this cache. On collisions the source merged last wins.
    pub fn merge<'a>(&mut self, others: impl IntoIterator<Item = &'a ColorCache>) {
        for other in others {
            for (color, entry) in &other.entries {
                self.entries.insert(*color, entry.clone());
            }
        }
        self.dirty = true;
    }

    /// Writes the cache back to its file if anything changed.
    ///
    /// When the file no longer matches what was read at open time, it is re-read and
    /// any keys we don't have are adopted before writing, so another writer's work is
    /// never thrown away. Keys we both have keep our value.
    pub fn save(&mut self) -> Result<SaveOutcome> {
        let Some(path) = self.path.clone() else {
            return Ok(SaveOutcome::Skipped);
        };
        if !self.dirty {
            return Ok(SaveOutcome::Skipped);
        }

        let mut merged = 0;
        if let Some(bytes) = read_bytes(&path)? {
            if Some(content_hash(&bytes)) != self.disk_hash {
                for (color, entry) in parse(&bytes)? {
                    if let Entry::Vacant(slot) = self.entries.entry(color) {
                        slot.insert(entry);
                        merged += 1;
                    }
                }
            }
        }

        let bytes = serde_json::to_vec(&self.records())?;
        atomic_write(&path, &bytes)?;

        self.disk_hash = Some(content_hash(&bytes));
        self.dirty = false;
        Ok(SaveOutcome::Saved {
            entries: self.entries.len(),
            merged,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if there are changes that have not been saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// True if the backing file existed when the cache was opened or has been saved since.
    pub fn was_on_disk(&self) -> bool {
        self.disk_hash.is_some()
    }

    /// Entries sorted by color, so the file is stable across runs.
    fn records(&self) -> Vec<Record> {
        let mut records: Vec<Record> = self
            .entries
            .iter()
            .map(|(color, entry)| (*color, (entry.block.clone(), entry.offset)))
            .collect();
        records.sort_by_key(|(color, _)| *color);
        records
    }
}

fn read_bytes(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn parse(bytes: &[u8]) -> Result<HashMap<Color, CacheEntry>> {
    let records: Vec<Record> = serde_json::from_slice(bytes)?;
    Ok(records
        .into_iter()
        .map(|(color, (block, offset))| (color, CacheEntry { block, offset }))
        .collect())
}

fn content_hash(bytes: &[u8]) -> u32 {
    let mut crc = Crc::new();
    crc.update(bytes);
    crc.sum()
}

/// Writes `data` to `<path>.tmp`, syncs it, then renames it over `path`. A crash at any
/// point leaves either the old file or the new one, never a partial write.
fn atomic_write(path: &Path, data: &[u8]) -> io::Result<()> {
    atomic_write_with(path, |file| file.write_all(data))
}

/// [`atomic_write`] with the file contents produced by `write`. The temporary file is
/// removed again if writing or syncing it fails.
fn atomic_write_with<F>(path: &Path, write: F) -> io::Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = temp_path(path);
    let written = File::create(&tmp_path).and_then(|mut file| {
        write(&mut file)?;
        file.sync_all()
    });
    if let Err(err) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }

    fs::rename(&tmp_path, path)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
