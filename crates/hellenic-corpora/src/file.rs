use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::Lines;

use anyhow::{Context, Result};
use memmap2::Mmap;
use serde::{Deserialize, Serialize};

/// Strategy for loading corpus files.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadMode {
    /// Memory-map the file (fast, zero-copy).
    #[default]
    Mmap,
    /// Read the file into an owned buffer (portable fallback).
    Owned,
}

enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }
}

/// A UTF-8 corpus file held in memory for the lifetime of a reader.
pub struct CorpusFile {
    path: PathBuf,
    buffer: Buffer,
}

impl CorpusFile {
    pub fn open(path: impl AsRef<Path>, mode: LoadMode) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let buffer = match mode {
            LoadMode::Mmap => {
                let file =
                    File::open(&path).with_context(|| format!("open {}", path.display()))?;
                // An empty file cannot be mapped on every platform.
                if file.metadata().map(|m| m.len() == 0).unwrap_or(false) {
                    Buffer::Owned(Vec::new())
                } else {
                    unsafe { Mmap::map(&file) }
                        .map(Buffer::Mmap)
                        .with_context(|| format!("mmap {}", path.display()))?
                }
            }
            LoadMode::Owned => {
                let mut file =
                    File::open(&path).with_context(|| format!("open {}", path.display()))?;
                let mut buf = Vec::new();
                file.read_to_end(&mut buf)
                    .with_context(|| format!("read {}", path.display()))?;
                Buffer::Owned(buf)
            }
        };
        Ok(Self { path, buffer })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.buffer.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whole file as text, with a leading byte-order mark removed.
    pub fn text(&self) -> Result<&str> {
        let text = std::str::from_utf8(self.buffer.as_slice())
            .with_context(|| format!("{} is not valid UTF-8", self.path.display()))?;
        Ok(text.strip_prefix('\u{FEFF}').unwrap_or(text))
    }

    pub fn lines(&self) -> Result<Lines<'_>> {
        Ok(self.text()?.lines())
    }
}
