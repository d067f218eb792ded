use std::path::PathBuf;

/// Locations for configuration and durable state, rooted at `~/.frontdesk`
/// by default. Tests point `base` at a temp directory instead.
#[derive(Debug, Clone)]
pub struct Paths {
    pub base: PathBuf,
}

impl Paths {
    pub fn new() -> Self {
        let base = dirs::home_dir()
            .map(|h| h.join(".frontdesk"))
            .unwrap_or_else(|| PathBuf::from(".frontdesk"));
        Self { base }
    }

    pub fn with_base(base: PathBuf) -> Self {
        Self { base }
    }

    pub fn config_file(&self) -> PathBuf {
        self.base.join("config.json")
    }

    pub fn memory_db(&self) -> PathBuf {
        self.base.join("memory.db")
    }

    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.base)
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new()
    }
}
