//! Regex ignore patterns.

use regex::Regex;

use super::error::{VfsError, VfsResult};

/// A compiled set of ignore patterns.
///
/// A candidate is ignored if **any** pattern finds a match anywhere in it
/// (patterns are not implicitly anchored; use `^`/`$` for that).
#[derive(Debug, Clone, Default)]
pub struct IgnorePatterns {
    patterns: Vec<Regex>,
}

impl IgnorePatterns {
    /// Compile every pattern, failing on the first invalid one.
    pub fn new<I, S>(patterns: I) -> VfsResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                let p = p.as_ref();
                Regex::new(p).map_err(|source| VfsError::InvalidPattern {
                    pattern: p.to_string(),
                    source,
                })
            })
            .collect::<VfsResult<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Returns true if any pattern matches `candidate`.
    pub fn matches(&self, candidate: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(candidate))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_pattern_matches() {
        let ignores = IgnorePatterns::new([r"\.tmp$", r"/\.git(/|$)"]).unwrap();
        assert!(ignores.matches("/srv/data/cache.tmp"));
        assert!(ignores.matches("/srv/data/.git"));
        assert!(ignores.matches("/srv/data/.git/HEAD"));
        assert!(!ignores.matches("/srv/data/tmp.txt"));
        assert!(!ignores.matches("/srv/data/.gitignore"));
    }

    #[test]
    fn test_empty_matches_nothing() {
        let ignores = IgnorePatterns::new(Vec::<String>::new()).unwrap();
        assert!(ignores.is_empty());
        assert!(!ignores.matches("/anything"));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = IgnorePatterns::new(["ok", "(unclosed"]).unwrap_err();
        match err {
            VfsError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "(unclosed"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
