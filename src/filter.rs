use crate::config::IgnoreRules;
use crate::util::GitIgnoreMatcher;

/// Decides whether a repository-relative path takes part in a snapshot.
pub struct IgnoreFilter<'a> {
    rules: &'a IgnoreRules,
    native: Option<&'a GitIgnoreMatcher>,
}

impl<'a> IgnoreFilter<'a> {
    pub fn new(rules: &'a IgnoreRules, native: Option<&'a GitIgnoreMatcher>) -> Self {
        Self { rules, native }
    }

    /// Only the configured rules, no repository ignore files.
    pub fn rules_only(rules: &'a IgnoreRules) -> Self {
        Self::new(rules, None)
    }

    pub fn rules(&self) -> &'a IgnoreRules {
        self.rules
    }

    /// Directory paths are matched against the path patterns with a trailing `/`.
    pub fn is_dir_ignored(&self, path: &str) -> bool {
        self.rules.path_excluded(&format!("{path}/")) || self.natively_ignored(path, true)
    }

    pub fn is_file_ignored(&self, path: &str) -> bool {
        self.rules.extension_excluded(path)
            || self.rules.path_excluded(path)
            || self.natively_ignored(path, false)
    }

    fn natively_ignored(&self, path: &str, is_dir: bool) -> bool {
        self.native
            .map(|matcher| matcher.is_ignored(path, is_dir))
            .unwrap_or(false)
    }
}
