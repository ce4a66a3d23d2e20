use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

const MAGIC: &[u8; 4] = b"AIHS";
// File size: 4 magic + 4-byte little-endian score
const FILE_SIZE: usize = 4 + 4;
const FILE_NAME: &str = "alien_invasion.scores";

/// The one persisted value: the all-time high score.
#[derive(Clone, Debug)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path() -> PathBuf {
        // Store next to the executable
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                return dir.join(FILE_NAME);
            }
        }
        PathBuf::from(FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Never fails: a missing file is a fresh install, a corrupt one is
    /// logged and treated the same way.
    pub fn load(&self) -> u32 {
        match self.try_load() {
            Ok(Some(score)) => score,
            Ok(None) => {
                tracing::debug!(path = %self.path.display(), "no high score file yet");
                0
            }
            Err(err) => {
                tracing::warn!(path = %self.path.display(), "ignoring high score file: {err:#}");
                0
            }
        }
    }

    /// `Ok(None)` when the file does not exist.
    pub fn try_load(&self) -> Result<Option<u32>> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("reading {}", self.path.display()))
            }
        };
        decode(&data)
            .map(Some)
            .with_context(|| format!("decoding {}", self.path.display()))
    }

    pub fn save(&self, score: u32) -> Result<()> {
        fs::write(&self.path, encode(score))
            .with_context(|| format!("writing {}", self.path.display()))
    }
}

fn encode(score: u32) -> [u8; FILE_SIZE] {
    let mut buf = [0u8; FILE_SIZE];
    buf[..4].copy_from_slice(MAGIC);
    buf[4..].copy_from_slice(&score.to_le_bytes());
    buf
}

fn decode(data: &[u8]) -> Result<u32> {
    if data.len() != FILE_SIZE {
        bail!("expected {FILE_SIZE} bytes, found {}", data.len());
    }
    if &data[0..4] != MAGIC {
        bail!("bad magic");
    }
    let bytes: [u8; 4] = [data[4], data[5], data[6], data[7]];
    Ok(u32::from_le_bytes(bytes))
}
