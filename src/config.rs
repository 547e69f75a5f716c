use std::collections::HashMap;
use std::fs;
use std::time::Duration;

/// Configuration loaded from a simple INI-style file.
///
/// Keys before the first `[section]` header are global; `#` starts a comment
/// line and values may be double-quoted. Lookups fall back from section to
/// globals to a caller default, so a flat file and a sectioned file both work.
#[derive(Debug)]
pub struct Config {
    pub globals: HashMap<String, String>,
    pub sections: HashMap<String, HashMap<String, String>>,
}

impl Config {
    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns a description of the I/O failure; the parse itself never fails
    /// (unrecognized lines are ignored).
    pub fn load(path: &str) -> Result<Self, String> {
        let content =
            fs::read_to_string(path).map_err(|e| format!("Error reading file {path}: {e}"))?;
        Ok(Self::parse(&content))
    }

    /// Parses configuration text. Lines that are neither a section header nor
    /// a `key = value` pair are skipped.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut globals = HashMap::new();
        let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut current_section: Option<String> = None;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                current_section = Some(line[1..line.len() - 1].to_string());
                continue;
            }

            if let Some(pos) = line.find('=') {
                let key = line[..pos].trim().to_string();
                let value = line[pos + 1..].trim().trim_matches('"').to_string();

                match &current_section {
                    None => {
                        globals.insert(key, value);
                    }
                    Some(sec) => {
                        sections.entry(sec.clone()).or_default().insert(key, value);
                    }
                }
            }
        }
        Config { globals, sections }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            globals: HashMap::new(),
            sections: HashMap::new(),
        }
    }

    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|sec| sec.get(key))
            .map(|s| s.as_str())
    }

    #[must_use]
    pub fn get_global(&self, key: &str) -> Option<&str> {
        self.globals.get(key).map(|s| s.as_str())
    }

    #[must_use]
    pub fn get_non_empty(&self, section: &str, key: &str) -> Option<&str> {
        self.get(section, key).filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn get_or_default<'a>(&'a self, section: &str, key: &str, default: &'a str) -> &'a str {
        self.get(section, key)
            .or_else(|| self.get_global(key))
            .unwrap_or(default)
    }

    /// Port-style lookup: section, then globals, then the default. A present
    /// but unparseable value falls back to the default as well.
    #[must_use]
    pub fn get_u16(&self, section: &str, key: &str, default: u16) -> u16 {
        self.get(section, key)
            .or_else(|| self.get_global(key))
            .and_then(|s| s.parse().ok())
            .unwrap_or(default)
    }

    /// Millisecond duration lookup with the same fallback chain as [`get_u16`](Self::get_u16).
    #[must_use]
    pub fn get_duration_ms(&self, section: &str, key: &str, default: Duration) -> Duration {
        self.get(section, key)
            .or_else(|| self.get_global(key))
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(default)
    }
}
