use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// One child reported by a [`ListingSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub is_dir: bool,
}

impl ListingEntry {
    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }
}

/// Lists the direct children of a directory, in display order.
pub trait ListingSource {
    fn list(&mut self, path: &Path) -> io::Result<Vec<ListingEntry>>;
}

/// Reads directories from disk. Directories come first, then files, each
/// group sorted by name.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsListing;

impl ListingSource for FsListing {
    fn list(&mut self, path: &Path) -> io::Result<Vec<ListingEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let Ok(name) = entry.file_name().into_string() else {
                log::warn!("Skipping non UTF-8 entry in {}", path.display());
                continue;
            };
            entries.push(ListingEntry {
                name,
                is_dir: entry.file_type()?.is_dir(),
            });
        }
        entries.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.name.cmp(&b.name)));
        Ok(entries)
    }
}

/// Fixed in-memory listings keyed by path.
#[derive(Debug, Default, Clone)]
pub struct MemoryListing {
    dirs: HashMap<PathBuf, Vec<ListingEntry>>,
}

impl MemoryListing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, entries: Vec<ListingEntry>) {
        self.dirs.insert(path.into(), entries);
    }
}

impl ListingSource for MemoryListing {
    fn list(&mut self, path: &Path) -> io::Result<Vec<ListingEntry>> {
        self.dirs.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no listing for {}", path.display()),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fs_listing_orders_dirs_first() {
        let root = std::env::temp_dir().join(format!("quill-listing-{}", std::process::id()));
        std::fs::create_dir_all(root.join("beta")).unwrap();
        std::fs::create_dir_all(root.join("alpha")).unwrap();
        std::fs::write(root.join("a.txt"), "a").unwrap();
        std::fs::write(root.join("Cargo.toml"), "").unwrap();

        let entries = FsListing.list(&root).unwrap();
        std::fs::remove_dir_all(&root).unwrap();

        assert_eq!(
            entries,
            vec![
                ListingEntry::dir("alpha"),
                ListingEntry::dir("beta"),
                ListingEntry::file("Cargo.toml"),
                ListingEntry::file("a.txt"),
            ]
        );
    }

    #[test]
    fn test_memory_listing_missing_path() {
        let mut listing = MemoryListing::new();
        let err = listing.list(Path::new("nowhere")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
