use crc32fast::Hasher;

/// Stable seed for a module path (CRC32 of its `file://` URL)
pub fn module_seed(path: &str) -> String {
    let url = if path.starts_with("file://") {
        path.to_string()
    } else {
        format!("file://{}", path)
    };

    let mut hasher = Hasher::new();
    hasher.update(url.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential key generator for syntax nodes within one module.
///
/// Keys look like `<seed>-<n>`. Parsing the same text from the same path
/// yields the same keys; nodes created later by edits keep counting from
/// where the parse stopped.
#[derive(Debug, Clone)]
pub struct IDGenerator {
    seed: String,
    count: u32,
}

impl IDGenerator {
    pub fn new(path: &str) -> Self {
        Self {
            seed: module_seed(path),
            count: 0,
        }
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Number of keys handed out so far
    pub fn issued(&self) -> u32 {
        self.count
    }
}
