use std::{
    path::{Path, PathBuf},
    sync::{
        Mutex,
        atomic::{AtomicBool, Ordering},
    },
    time::SystemTime,
};

use tracing::debug;

use crate::tags::{
    parser::{TagLine, parse_line},
    query::{NamePattern, QueryError, TagIndex},
    record::TagRecord,
};

const SORTED_HEADER: &str = "FILE_SORTED";

#[derive(Debug)]
struct LoadedTags {
    modified: Option<SystemTime>,
    len: u64,
    sorted: bool,
    records: Vec<TagRecord>,
}

impl LoadedTags {
    fn parse(
        contents: &str,
        base_dir: Option<&Path>,
        modified: Option<SystemTime>,
        len: u64,
    ) -> Self {
        // ctags omits the header for unsorted output.
        let mut sorted = false;
        let mut records = Vec::new();
        for line in contents.lines() {
            match parse_line(line, base_dir) {
                Some(TagLine::Header {
                    key,
                    value,
                }) if key == SORTED_HEADER => sorted = value.trim() == "1",
                Some(TagLine::Header {
                    ..
                }) => {},
                Some(TagLine::Tag(record)) => records.push(record),
                None => {},
            }
        }
        Self {
            modified,
            len,
            sorted,
            records,
        }
    }
}

/// A single ctags file, read lazily and re-read when it changes on disk.
#[derive(Debug)]
pub struct TagsFile {
    path: PathBuf,
    in_memory: bool,
    binary_search: AtomicBool,
    cache: Mutex<Option<LoadedTags>>,
}

impl TagsFile {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            in_memory: false,
            binary_search: AtomicBool::new(true),
            cache: Mutex::new(None),
        }
    }

    /// Build an index from tags text that is not backed by a file.
    ///
    /// `path` is only used to resolve relative file names and in messages.
    pub fn from_contents(
        path: impl Into<PathBuf>,
        contents: &str,
    ) -> Self {
        let path = path.into();
        let loaded = LoadedTags::parse(contents, path.parent(), None, contents.len() as u64);
        Self {
            path,
            in_memory: true,
            binary_search: AtomicBool::new(true),
            cache: Mutex::new(Some(loaded)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    fn refresh(
        &self,
        cache: &mut Option<LoadedTags>,
    ) -> Result<(), QueryError> {
        if self.in_memory {
            return Ok(());
        }

        let unavailable = |error: std::io::Error| QueryError::Unavailable {
            path: self.display_path(),
            reason: error.to_string(),
        };

        let metadata = std::fs::metadata(&self.path).map_err(unavailable)?;
        let modified = metadata.modified().ok();
        if let Some(loaded) = cache.as_ref()
            && loaded.modified.is_some()
            && loaded.modified == modified
            && loaded.len == metadata.len()
        {
            return Ok(());
        }

        let bytes = std::fs::read(&self.path).map_err(unavailable)?;
        let contents = String::from_utf8_lossy(&bytes);
        let loaded = LoadedTags::parse(&contents, self.path.parent(), modified, bytes.len() as u64);
        debug!("[tags] loaded {} tag(s) from {} (sorted={})", loaded.records.len(), self.path.display(), loaded.sorted);
        *cache = Some(loaded);
        Ok(())
    }

    fn binary_find(
        &self,
        records: &[TagRecord],
        name: &str,
    ) -> Result<Vec<TagRecord>, QueryError> {
        let start = records.partition_point(|record| record.name.as_str() < name);
        let end = start + records[start..].iter().take_while(|record| record.name == name).count();

        // Verify the ordering around the probe point; a file that claims to be
        // sorted but is not makes binary search miss tags silently.
        let window_start = start.saturating_sub(1);
        let window_end = (end + 2).min(records.len());
        let consistent =
            records[window_start..window_end].windows(2).all(|pair| pair[0].name.as_str() <= pair[1].name.as_str());
        if !consistent {
            return Err(QueryError::Transient {
                path: self.display_path(),
                reason: format!("not sorted around '{name}'"),
            });
        }

        Ok(records[start..end].to_vec())
    }
}

impl TagIndex for TagsFile {
    fn find(
        &self,
        pattern: &NamePattern,
    ) -> Result<Vec<TagRecord>, QueryError> {
        let mut cache = self.cache.lock().map_err(|_| QueryError::Unavailable {
            path: self.display_path(),
            reason: "tags cache lock poisoned".to_string(),
        })?;
        self.refresh(&mut cache)?;
        let Some(loaded) = cache.as_ref() else {
            return Ok(Vec::new());
        };

        if self.binary_search()
            && loaded.sorted
            && let Some(literal) = pattern.literal()
        {
            return self.binary_find(&loaded.records, literal);
        }

        Ok(loaded.records.iter().filter(|record| pattern.is_match(&record.name)).cloned().collect())
    }

    fn binary_search(&self) -> bool {
        self.binary_search.load(Ordering::Relaxed)
    }

    fn set_binary_search(
        &self,
        enabled: bool,
    ) {
        self.binary_search.store(enabled, Ordering::Relaxed);
    }
}

/// Several tags files searched in order, like an editor `tags` option.
#[derive(Debug, Default)]
pub struct TagFiles {
    files: Vec<TagsFile>,
}

impl TagFiles {
    pub fn new(files: Vec<TagsFile>) -> Self {
        Self {
            files,
        }
    }

    /// Open `paths`, resolving relative entries against `root`.
    pub fn open_all(
        paths: &[String],
        root: Option<&Path>,
        binary_search: bool,
    ) -> Self {
        let files = paths
            .iter()
            .map(|path| {
                let path = Path::new(path);
                match root {
                    Some(root) if path.is_relative() => root.join(path),
                    _ => path.to_path_buf(),
                }
            })
            .map(|path| {
                let file = TagsFile::open(path);
                file.set_binary_search(binary_search);
                file
            })
            .collect();
        Self {
            files,
        }
    }

    pub fn files(&self) -> &[TagsFile] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl TagIndex for TagFiles {
    fn find(
        &self,
        pattern: &NamePattern,
    ) -> Result<Vec<TagRecord>, QueryError> {
        let mut records = Vec::new();
        let mut first_unavailable = None;
        let mut any_readable = false;

        for file in &self.files {
            match file.find(pattern) {
                Ok(found) => {
                    any_readable = true;
                    records.extend(found);
                },
                Err(error @ QueryError::Unavailable {
                    ..
                }) => {
                    debug!("[tags] skipping {error}");
                    first_unavailable.get_or_insert(error);
                },
                Err(error) => return Err(error),
            }
        }

        if any_readable {
            return Ok(records);
        }
        Err(first_unavailable.unwrap_or_else(|| QueryError::Unavailable {
            path: String::new(),
            reason: "no tags files configured".to_string(),
        }))
    }

    fn binary_search(&self) -> bool {
        self.files.iter().all(TagsFile::binary_search)
    }

    fn set_binary_search(
        &self,
        enabled: bool,
    ) {
        for file in &self.files {
            file.set_binary_search(enabled);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src/tags/file_tests.rs"]
mod tests;
