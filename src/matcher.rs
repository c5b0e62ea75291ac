use globset::{Glob, GlobMatcher};

/// Case-insensitive name matching. A pattern matches when it matches as a
/// shell glob or, failing that, when it appears anywhere in the name, so
/// `2021` and `E*` both work without a mode switch.
pub fn matches(candidate: &str, pattern: &str) -> bool {
    NameMatcher::new(pattern).is_match(candidate)
}

/// A pattern compiled once and applied to many names.
pub struct NameMatcher {
    lowered: String,
    glob: Option<GlobMatcher>,
}

impl NameMatcher {
    pub fn new(pattern: &str) -> Self {
        let lowered = pattern.to_lowercase();
        let glob = if lowered.is_empty() {
            None
        } else {
            Glob::new(&lowered).ok().map(|g| g.compile_matcher())
        };
        Self { lowered, glob }
    }

    pub fn is_match(&self, candidate: &str) -> bool {
        if self.lowered.is_empty() {
            return true;
        }
        let candidate = candidate.to_lowercase();
        self.glob.as_ref().is_some_and(|g| g.is_match(&candidate))
            || candidate.contains(&self.lowered)
    }
}
