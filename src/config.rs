use crate::error::{LinelogError, Result};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

const DEFAULT_FILETYPES: &str = include_str!("../assets/filetypes.json");
const DEFAULT_IGNORE: &str = include_str!("../assets/ignore.json");

/// Noise-pattern key that applies to every language.
pub const ANY_LANGUAGE: &str = "any";

pub const DEFAULT_MIN_CHARS: usize = 2;

/// Lowercase extension (no leading dot) → language label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FiletypeDb {
    languages: HashMap<String, String>,
}

impl FiletypeDb {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let languages = entries
            .into_iter()
            .map(|(ext, lang)| (normalize_extension(ext.as_ref()), lang.into()))
            .filter(|(ext, _)| !ext.is_empty())
            .collect();
        Self { languages }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let raw: HashMap<String, String> = serde_json::from_str(text)
            .map_err(|e| LinelogError::Configuration(format!("Invalid filetype database: {e}")))?;
        Ok(Self::new(raw))
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_json(&read_config_file(path)?)
    }

    pub fn embedded() -> Result<Self> {
        Self::from_json(DEFAULT_FILETYPES)
    }

    /// Language for a bare extension, case-insensitive.
    pub fn language_for_extension(&self, ext: &str) -> Option<&str> {
        self.languages.get(&normalize_extension(ext)).map(String::as_str)
    }

    /// Language for a file name; `None` when the name has no extension or it is unmapped.
    pub fn classify(&self, file_name: &str) -> Option<&str> {
        let ext = extension_of(file_name)?;
        self.language_for_extension(ext)
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

/// Ignore configuration as written on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoreConfig {
    pub ignore_paths: Vec<String>,
    pub ignore_extensions: Vec<String>,
    /// Language (or comma separated languages, or `any`) → noise regexes.
    pub noise: HashMap<String, Vec<String>>,
    pub min_chars: usize,
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            ignore_paths: Vec::new(),
            ignore_extensions: Vec::new(),
            noise: HashMap::new(),
            min_chars: DEFAULT_MIN_CHARS,
        }
    }
}

impl IgnoreConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| LinelogError::Configuration(format!("Invalid ignore configuration: {e}")))
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_json(&read_config_file(path)?)
    }

    pub fn embedded() -> Result<Self> {
        Self::from_json(DEFAULT_IGNORE)
    }

    pub fn compile(&self) -> Result<IgnoreRules> {
        IgnoreRules::compile(self)
    }
}

/// Compiled, immutable form of [`IgnoreConfig`].
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    paths: Vec<Regex>,
    extensions: HashSet<String>,
    any_noise: Vec<Regex>,
    language_noise: HashMap<String, Vec<Regex>>,
    min_chars: usize,
}

impl IgnoreRules {
    pub fn compile(config: &IgnoreConfig) -> Result<Self> {
        let paths = config
            .ignore_paths
            .iter()
            .map(|p| compile_pattern(p, false))
            .collect::<Result<Vec<_>>>()?;

        let extensions = config
            .ignore_extensions
            .iter()
            .map(|e| normalize_extension(e))
            .filter(|e| !e.is_empty())
            .collect();

        let mut any_noise = Vec::new();
        let mut language_noise: HashMap<String, Vec<Regex>> = HashMap::new();
        // Sorted so that pattern order is stable when several keys name the same language.
        let mut keys: Vec<&String> = config.noise.keys().collect();
        keys.sort();
        for key in keys {
            let compiled = config.noise[key]
                .iter()
                .map(|p| compile_pattern(p, true))
                .collect::<Result<Vec<_>>>()?;
            for language in key.split(',').map(normalize_language) {
                if language.is_empty() {
                    continue;
                }
                if language == ANY_LANGUAGE {
                    any_noise.extend(compiled.iter().cloned());
                } else {
                    language_noise
                        .entry(language)
                        .or_default()
                        .extend(compiled.iter().cloned());
                }
            }
        }

        Ok(Self {
            paths,
            extensions,
            any_noise,
            language_noise,
            min_chars: config.min_chars,
        })
    }

    pub fn none() -> Self {
        Self {
            paths: Vec::new(),
            extensions: HashSet::new(),
            any_noise: Vec::new(),
            language_noise: HashMap::new(),
            min_chars: DEFAULT_MIN_CHARS,
        }
    }

    /// True when any path regex matches somewhere in `path`.
    pub fn path_excluded(&self, path: &str) -> bool {
        self.paths.iter().any(|re| re.is_match(path))
    }

    pub fn extension_excluded(&self, file_name: &str) -> bool {
        extension_of(file_name)
            .map(|ext| self.extensions.contains(&normalize_extension(ext)))
            .unwrap_or(false)
    }

    /// `any` patterns first, then the ones registered for `language`.
    pub fn noise_for<'a>(&'a self, language: &str) -> impl Iterator<Item = &'a Regex> + 'a {
        self.any_noise
            .iter()
            .chain(self.language_noise.get(&normalize_language(language)).into_iter().flatten())
    }

    pub fn min_chars(&self) -> usize {
        self.min_chars
    }
}

/// Everything a scan needs besides the repositories themselves.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub filetypes: FiletypeDb,
    pub rules: IgnoreRules,
}

impl ScanConfig {
    pub fn new(filetypes: FiletypeDb, ignore: &IgnoreConfig) -> Result<Self> {
        if filetypes.is_empty() {
            return Err(LinelogError::Configuration(
                "Filetype database is empty".to_string(),
            ));
        }
        Ok(Self {
            filetypes,
            rules: ignore.compile()?,
        })
    }

    /// Loads configuration from explicit paths, then the user config directory, then the
    /// embedded defaults.
    pub fn load(ignore_path: Option<&Path>, filetypes_path: Option<&Path>) -> Result<Self> {
        let ignore = match resolve_config_path(ignore_path, "config.json") {
            Some(path) => {
                log::info!("Loading ignore configuration from {}", path.display());
                IgnoreConfig::load(&path)?
            }
            None => IgnoreConfig::embedded()?,
        };
        let filetypes = match resolve_config_path(filetypes_path, "filetypes.json") {
            Some(path) => {
                log::info!("Loading filetype database from {}", path.display());
                FiletypeDb::load(&path)?
            }
            None => FiletypeDb::embedded()?,
        };
        log::info!("Filetype database maps {} extensions", filetypes.len());
        Self::new(filetypes, &ignore)
    }

    pub fn embedded() -> Result<Self> {
        Self::new(FiletypeDb::embedded()?, &IgnoreConfig::embedded()?)
    }
}

/// `~/.config/linelog` or the platform equivalent.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("linelog"))
}

fn resolve_config_path(explicit: Option<&Path>, file_name: &str) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    config_dir()
        .map(|dir| dir.join(file_name))
        .filter(|path| path.is_file())
}

fn read_config_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        LinelogError::Configuration(format!("Cannot read {}: {e}", path.display()))
    })
}

fn compile_pattern(pattern: &str, multi_line: bool) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .multi_line(multi_line)
        .build()
        .map_err(|e| LinelogError::Configuration(format!("Invalid pattern '{pattern}': {e}")))
}

pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}

pub fn normalize_language(language: &str) -> String {
    language.trim().to_lowercase().replace(' ', "-")
}

/// Extension of the final path component, ignoring dotfiles such as `.gitignore`.
pub fn extension_of(file_name: &str) -> Option<&str> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
}
