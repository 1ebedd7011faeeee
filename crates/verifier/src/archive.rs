//! Package archive access.

use aixverify_common::layout::{
    self, FILTERS_JSON, ICON_PNG, MAIN_WASM, SETTINGS_JSON, SOURCE_JSON,
};
use aixverify_common::{Error, Result, SchemaKind};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;
use zip::ZipArchive;

/// Upper bound on the buffer reserved up front for an entry. The declared
/// size comes from the archive and is not trusted beyond this.
const MAX_PREALLOC: u64 = 1024 * 1024;

/// Logical role of an archive entry, decided by its exact name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRole {
    Payload,
    Icon,
    Descriptor(SchemaKind),
    Unclassified,
}

impl EntryRole {
    pub fn classify(name: &str) -> Self {
        match name {
            MAIN_WASM => EntryRole::Payload,
            ICON_PNG => EntryRole::Icon,
            SOURCE_JSON => EntryRole::Descriptor(SchemaKind::Source),
            SETTINGS_JSON => EntryRole::Descriptor(SchemaKind::Settings),
            FILTERS_JSON => EntryRole::Descriptor(SchemaKind::Filters),
            _ => EntryRole::Unclassified,
        }
    }
}

/// One item stored in a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Position in the archive's central directory.
    pub index: usize,
    pub name: String,
    pub is_dir: bool,
    pub role: EntryRole,
}

impl Entry {
    /// Name without the `Payload/` prefix.
    pub fn display_name(&self) -> &str {
        layout::display_name(&self.name)
    }
}

/// An opened package archive.
///
/// The underlying file handle is released when the package is dropped.
pub struct Package {
    path: PathBuf,
    archive: ZipArchive<File>,
    entries: Vec<Entry>,
}

impl Package {
    /// Open a package and index its entries in stored order.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut archive = ZipArchive::new(file)
            .map_err(|e| Error::InvalidArchive(format!("{}: {e}", path.display())))?;

        let mut entries = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let file = archive
                .by_index_raw(index)
                .map_err(|e| Error::InvalidArchive(format!("{}: {e}", path.display())))?;
            let name = file.name().to_string();
            let role = EntryRole::classify(&name);
            debug!("Entry {}: {} ({:?})", index, name, role);

            entries.push(Entry {
                index,
                is_dir: file.is_dir(),
                name,
                role,
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            archive,
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All entries, directories included, in stored order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// First entry with the given role.
    pub fn find(&self, role: EntryRole) -> Option<&Entry> {
        self.entries.iter().find(|e| e.role == role)
    }

    /// Read an entry's content.
    pub fn read_entry(&mut self, entry: &Entry) -> Result<Vec<u8>> {
        let read_error = |reason: String| Error::EntryRead {
            entry: entry.name.clone(),
            reason,
        };

        let mut file = self
            .archive
            .by_index(entry.index)
            .map_err(|e| read_error(e.to_string()))?;

        let mut content = Vec::with_capacity(file.size().min(MAX_PREALLOC) as usize);
        file.read_to_end(&mut content)
            .map_err(|e| read_error(e.to_string()))?;
        Ok(content)
    }
}
