//! Lazily expanded file tree, stored as a flat depth-tagged listing.
//!
//! Rows are kept in display order: a directory's children follow it
//! immediately, one level deeper. Names live in a single string buffer and
//! rows refer to them by offset, so growing the buffer never invalidates a
//! row.

mod listing;

use std::path::{Path, PathBuf};

use bitflags::bitflags;
use thiserror::Error;

pub use listing::{FsListing, ListingEntry, ListingSource, MemoryListing};

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct ItemFlags: u8 {
        const DIRECTORY = 0b001;
        /// Children are shown
        const OPEN      = 0b010;
        /// Children have been listed and inserted
        const EXPLORED  = 0b100;
    }
}

/// Byte range of a name inside the tree's string buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NameSlice {
    start: usize,
    len: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeItem {
    name: NameSlice,
    /// Distance from the listing root; top-level rows have depth 1
    pub depth: u16,
    pub flags: ItemFlags,
}

impl TreeItem {
    pub fn is_dir(&self) -> bool {
        self.flags.contains(ItemFlags::DIRECTORY)
    }

    pub fn is_open(&self) -> bool {
        self.flags.contains(ItemFlags::OPEN)
    }

    pub fn is_explored(&self) -> bool {
        self.flags.contains(ItemFlags::EXPLORED)
    }
}

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("row {index} is out of bounds ({len} rows)")]
    OutOfBounds { index: usize, len: usize },
    #[error("row {index} is not a directory")]
    NotADirectory { index: usize },
    #[error("failed to list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What the host should do after a tree row was activated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeAction {
    Expand(usize),
    Collapse(usize),
    /// A file row was activated
    Select(usize),
}

#[derive(Debug, Clone, Default)]
pub struct FileTree {
    root: PathBuf,
    names: String,
    items: Vec<TreeItem>,
}

impl FileTree {
    /// An empty tree rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            names: String::new(),
            items: Vec::new(),
        }
    }

    /// List `root` into a tree of top-level rows.
    pub fn load<S>(root: impl Into<PathBuf>, source: &mut S) -> Result<Self, TreeError>
    where
        S: ListingSource + ?Sized,
    {
        let mut tree = Self::new(root);
        let entries = source.list(&tree.root).map_err(|source| TreeError::Io {
            path: tree.root.clone(),
            source,
        })?;
        for entry in &entries {
            tree.push_root(&entry.name, entry.is_dir);
        }
        log::info!("Loaded {} entries from {}", tree.len(), tree.root.display());
        Ok(tree)
    }

    /// Append a top-level row.
    pub fn push_root(&mut self, name: &str, is_dir: bool) -> usize {
        let item = self.make_item(name, is_dir, 1);
        self.items.push(item);
        self.items.len() - 1
    }

    fn make_item(&mut self, name: &str, is_dir: bool, depth: u16) -> TreeItem {
        let start = self.names.len();
        self.names.push_str(name);
        TreeItem {
            name: NameSlice {
                start,
                len: name.len(),
            },
            depth,
            flags: if is_dir {
                ItemFlags::DIRECTORY
            } else {
                ItemFlags::empty()
            },
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[TreeItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&TreeItem> {
        self.items.get(index)
    }

    pub fn name(&self, item: &TreeItem) -> &str {
        &self.names[item.name.start..item.name.start + item.name.len]
    }

    fn checked(&self, index: usize) -> Result<&TreeItem, TreeError> {
        self.items.get(index).ok_or(TreeError::OutOfBounds {
            index,
            len: self.items.len(),
        })
    }

    fn checked_dir(&self, index: usize) -> Result<&TreeItem, TreeError> {
        let item = self.checked(index)?;
        if !item.is_dir() {
            return Err(TreeError::NotADirectory { index });
        }
        Ok(item)
    }

    /// Filesystem path of a row, built by walking back to each shallower
    /// ancestor.
    pub fn path_of(&self, index: usize) -> Result<PathBuf, TreeError> {
        let item = self.checked(index)?;
        let mut components = vec![self.name(item)];
        let mut depth = item.depth;
        for ancestor in self.items[..index].iter().rev() {
            if depth <= 1 {
                break;
            }
            if ancestor.depth < depth {
                components.push(self.name(ancestor));
                depth = ancestor.depth;
            }
        }

        let mut path = self.root.clone();
        path.extend(components.iter().rev());
        Ok(path)
    }

    /// One past the last row of `index`'s subtree.
    fn subtree_end(&self, index: usize) -> usize {
        let depth = self.items[index].depth;
        self.items[index + 1..]
            .iter()
            .position(|item| item.depth <= depth)
            .map_or(self.items.len(), |offset| index + 1 + offset)
    }

    /// Show a directory's children, listing them first if this is the first
    /// time the directory is opened. Returns the number of rows inserted.
    pub fn expand<S>(&mut self, index: usize, source: &mut S) -> Result<usize, TreeError>
    where
        S: ListingSource + ?Sized,
    {
        let item = *self.checked_dir(index)?;
        if item.is_explored() {
            self.items[index].flags |= ItemFlags::OPEN;
            return Ok(0);
        }

        let path = self.path_of(index)?;
        let entries = source
            .list(&path)
            .map_err(|source| TreeError::Io { path: path.clone(), source })?;

        let children: Vec<TreeItem> = entries
            .iter()
            .map(|entry| self.make_item(&entry.name, entry.is_dir, item.depth + 1))
            .collect();
        let inserted = children.len();
        self.items.splice(index + 1..index + 1, children);
        self.items[index].flags |= ItemFlags::OPEN | ItemFlags::EXPLORED;

        log::debug!("Expanded {} with {} entries", path.display(), inserted);
        Ok(inserted)
    }

    /// Hide a directory's children. They stay in the listing and are skipped
    /// by [`FileTree::visible`].
    pub fn collapse(&mut self, index: usize) -> Result<(), TreeError> {
        self.checked_dir(index)?;
        self.items[index].flags.remove(ItemFlags::OPEN);
        Ok(())
    }

    /// Remove a directory's listed descendants so the next expand lists it
    /// again. Returns the number of rows removed.
    pub fn prune(&mut self, index: usize) -> Result<usize, TreeError> {
        self.checked_dir(index)?;
        let end = self.subtree_end(index);
        self.items.drain(index + 1..end);
        self.items[index]
            .flags
            .remove(ItemFlags::OPEN | ItemFlags::EXPLORED);
        Ok(end - index - 1)
    }

    /// Carry out the mutation a tree row asked for.
    pub fn apply<S>(&mut self, action: TreeAction, source: &mut S) -> Result<(), TreeError>
    where
        S: ListingSource + ?Sized,
    {
        match action {
            TreeAction::Expand(index) => self.expand(index, source).map(|_| ()),
            TreeAction::Collapse(index) => self.collapse(index),
            TreeAction::Select(_) => Ok(()),
        }
    }

    /// Rows to display: every row not inside a closed directory.
    pub fn visible(&self) -> Visible<'_> {
        Visible {
            items: &self.items,
            index: 0,
        }
    }
}

/// Iterator over the rows of a [`FileTree`] that are not hidden by a closed
/// ancestor. Yields `(row index, row)`.
pub struct Visible<'a> {
    items: &'a [TreeItem],
    index: usize,
}

impl<'a> Iterator for Visible<'a> {
    type Item = (usize, &'a TreeItem);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.index;
        let item = self.items.get(index)?;
        self.index += 1;
        if item.is_dir() && !item.is_open() {
            // skip the contiguous deeper run
            while self
                .items
                .get(self.index)
                .is_some_and(|next| next.depth > item.depth)
            {
                self.index += 1;
            }
        }
        Some((index, item))
    }
}
