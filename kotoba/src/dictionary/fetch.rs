use std::fs::File;
use std::io::Read;
use std::ops::Deref;
use std::path::Path;

use flate2::read::GzDecoder;
use memmap2::Mmap;

use crate::errors::{KotobaError, Result};

/// Raw bytes of a dictionary file, either mapped or decompressed into the heap.
pub(crate) enum Blob {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Deref for Blob {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Mmap(mmap) => &mmap[..],
            Self::Owned(buf) => buf.as_slice(),
        }
    }
}

/// Compression of a dictionary file, decided by its extension.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum FileType {
    Plain,
    Gzip,
    Zstd,
}

impl FileType {
    pub(crate) fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("gz") => Self::Gzip,
            Some("zst") => Self::Zstd,
            _ => Self::Plain,
        }
    }
}

/// Reads a dictionary file, decompressing `.gz` and `.zst` files transparently.
///
/// Plain files are memory-mapped.
pub(crate) fn read_blob<P: AsRef<Path>>(path: P) -> Result<Blob> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        KotobaError::invalid_argument(
            "path",
            format!("Failed to open dictionary file {}: {}", path.display(), e),
        )
    })?;

    let blob = match FileType::from_path(path) {
        FileType::Gzip => {
            let mut buf = Vec::new();
            GzDecoder::new(file).read_to_end(&mut buf)?;
            Blob::Owned(buf)
        }
        FileType::Zstd => Blob::Owned(zstd::decode_all(file)?),
        FileType::Plain => {
            if file.metadata()?.len() == 0 {
                Blob::Owned(Vec::new())
            } else {
                // SAFETY: the mapping is read-only and only lives while the dictionary is parsed.
                Blob::Mmap(unsafe { Mmap::map(&file)? })
            }
        }
    };
    log::debug!("[kotoba] read {} ({} bytes)", path.display(), blob.len());
    Ok(blob)
}
