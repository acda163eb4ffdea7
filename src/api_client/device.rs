use rand::Rng;
use regex::Regex;
use std::fs;
use std::io;
use std::path::PathBuf;

/// A stable per-installation identifier, persisted next to the extracted
/// tabs so that API keys stay scoped to one output location.
///
/// The upstream service ties key validity to the client identifier that
/// requested it, so the identity must not change between runs (or mid-run)
/// unless explicitly refreshed.
pub struct DeviceIdentity {
    path: PathBuf,
}

impl DeviceIdentity {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the persisted identifier, or synthesizes and persists a new
    /// one when no valid value exists on disk.
    ///
    /// A persistence failure is downgraded to a warning: the identity is
    /// still usable in memory for the current run.
    pub fn load(&self) -> String {
        if let Ok(stored) = fs::read_to_string(&self.path) {
            let stored = stored.trim();
            if is_valid_device_id(stored) {
                return stored.to_string();
            }
        }

        let id = generate_device_id();
        if let Err(e) = self.persist(&id) {
            eprintln!(
                "\x1b[33mWarning: failed to persist device id to {}: {}\x1b[0m",
                self.path.display(),
                e
            );
        }
        id
    }

    /// Discards the persisted identifier so the next `load` synthesizes a
    /// fresh one. Any previously derived API key becomes useless.
    pub fn refresh(&self) -> io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    fn persist(&self, id: &str) -> io::Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, id)
    }
}

/// A valid identity is exactly 16 lowercase hex characters.
pub fn is_valid_device_id(value: &str) -> bool {
    Regex::new(r"^[0-9a-f]{16}$").unwrap().is_match(value)
}

fn generate_device_id() -> String {
    const HEX_CHARS: &[u8] = b"0123456789abcdef";
    let mut rng = rand::thread_rng();
    (0..16)
        .map(|_| HEX_CHARS[rng.gen_range(0..HEX_CHARS.len())] as char)
        .collect()
}
