use std::fs;
use std::path::PathBuf;

use tracing::warn;

const MAGIC: &[u8; 4] = b"ACH1";
// File layout: 4-byte magic + one little-endian u32.
const FILE_SIZE: usize = 8;

/// The one scalar that survives the session: the best score ever seen.
///
/// Loaded once at startup and rewritten whenever the running score exceeds
/// it. I/O failures are logged and swallowed; a broken disk never touches
/// gameplay.
pub struct HighScoreFile {
    best: u32,
    path: PathBuf,
}

impl HighScoreFile {
    pub fn load() -> Self {
        let path = Self::score_path();
        let best = Self::read_file(&path).unwrap_or(0);
        HighScoreFile { best, path }
    }

    /// Store next to the executable, like the rest of our sidecar files.
    fn score_path() -> PathBuf {
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                return dir.join("astrocade.highscore");
            }
        }
        PathBuf::from("astrocade.highscore")
    }

    fn read_file(path: &PathBuf) -> Option<u32> {
        let data = fs::read(path).ok()?;
        if data.len() < FILE_SIZE || &data[0..4] != MAGIC {
            return None;
        }
        let bytes: [u8; 4] = [data[4], data[5], data[6], data[7]];
        Some(u32::from_le_bytes(bytes))
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Record a new best if `score` beats the stored one. Never lowers it.
    pub fn record(&mut self, score: u32) {
        if score <= self.best {
            return;
        }
        self.best = score;

        let mut buf = Vec::with_capacity(FILE_SIZE);
        buf.extend_from_slice(MAGIC);
        buf.extend_from_slice(&score.to_le_bytes());
        if let Err(e) = fs::write(&self.path, &buf) {
            warn!(path = %self.path.display(), error = %e, "high score not saved");
        }
    }
}
