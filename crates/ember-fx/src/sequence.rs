//! Strict key-sequence matching.

/// Matches a fixed sequence of key names fed one at a time.
///
/// Progress only advances when the next key is exactly the expected one; any
/// other key drops progress back to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySequence {
    keys: Vec<String>,
    progress: usize,
}

impl KeySequence {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            progress: 0,
        }
    }

    /// Feed one key. Returns `true` when it completes the sequence, after
    /// which matching starts over.
    pub fn feed(&mut self, key: &str) -> bool {
        if self.keys.is_empty() {
            return false;
        }
        if self.keys[self.progress] != key {
            self.progress = 0;
            return false;
        }
        self.progress += 1;
        if self.progress == self.keys.len() {
            self.progress = 0;
            return true;
        }
        false
    }

    /// Number of keys matched so far.
    pub fn progress(&self) -> usize {
        self.progress
    }

    pub fn reset(&mut self) {
        self.progress = 0;
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::EasterEggConfig;

    fn konami() -> KeySequence {
        KeySequence::new(EasterEggConfig::default().sequence)
    }

    #[test]
    fn test_exact_sequence_activates_once() {
        let mut seq = konami();
        let keys = EasterEggConfig::default().sequence;
        let activations = keys.iter().filter(|k| seq.feed(k)).count();
        assert_eq!(activations, 1);
        assert_eq!(seq.progress(), 0);
    }

    #[test]
    fn test_substitution_never_activates() {
        let keys = EasterEggConfig::default().sequence;
        for position in 0..keys.len() {
            let mut seq = konami();
            let mut activated = false;
            for (i, key) in keys.iter().enumerate() {
                let key = if i == position { "x" } else { key.as_str() };
                activated |= seq.feed(key);
                if i == position {
                    assert_eq!(seq.progress(), 0, "progress kept after mismatch at {i}");
                }
            }
            assert!(!activated, "activated with substitution at {position}");
        }
    }

    #[test]
    fn test_case_sensitive() {
        let mut seq = KeySequence::new(["b", "a"]);
        assert!(!seq.feed("B"));
        assert!(!seq.feed("a"));
        assert!(!seq.feed("b"));
        assert!(seq.feed("a"));
    }

    #[test]
    fn test_mismatch_is_not_retried_as_first_key() {
        let mut seq = KeySequence::new(["ArrowUp", "ArrowDown"]);
        assert!(!seq.feed("ArrowUp"));
        assert!(!seq.feed("ArrowUp"));
        assert_eq!(seq.progress(), 0);
        assert!(!seq.feed("ArrowDown"));
    }

    #[test]
    fn test_completes_repeatedly() {
        let mut seq = KeySequence::new(["b", "a"]);
        assert!(!seq.feed("b"));
        assert!(seq.feed("a"));
        assert!(!seq.feed("b"));
        assert!(seq.feed("a"));
    }

    #[test]
    fn test_empty_sequence_never_matches() {
        let mut seq = KeySequence::new(Vec::<String>::new());
        assert!(!seq.feed("a"));
        assert!(seq.is_empty());
    }
}
