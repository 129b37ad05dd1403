//! Typewriter reveal for long headings.

/// Reveals a heading one character per tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Typewriter {
    chars: Vec<char>,
    revealed: usize,
}

impl Typewriter {
    /// Only headings longer than `min_length` characters are animated.
    pub fn for_heading(text: &str, min_length: usize) -> Option<Self> {
        let chars: Vec<char> = text.chars().collect();
        (chars.len() > min_length).then_some(Self { chars, revealed: 0 })
    }

    /// Reveal one more character and return the visible text, or `None` once
    /// the whole heading is shown.
    pub fn tick(&mut self) -> Option<String> {
        if self.is_done() {
            return None;
        }
        self.revealed += 1;
        Some(self.visible())
    }

    pub fn visible(&self) -> String {
        self.chars[..self.revealed].iter().collect()
    }

    pub fn full_text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn is_done(&self) -> bool {
        self.revealed >= self.chars.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_headings_are_skipped() {
        assert!(Typewriter::for_heading("Blog", 20).is_none());
        assert!(Typewriter::for_heading("exactly twenty chars", 20).is_none());
        assert!(Typewriter::for_heading("twenty-one characters", 20).is_some());
    }

    #[test]
    fn test_reveals_one_char_per_tick() {
        let mut writer = Typewriter::for_heading("abc", 0).unwrap();
        assert_eq!(writer.visible(), "");
        assert_eq!(writer.tick().as_deref(), Some("a"));
        assert_eq!(writer.tick().as_deref(), Some("ab"));
        assert_eq!(writer.tick().as_deref(), Some("abc"));
        assert!(writer.is_done());
        assert_eq!(writer.tick(), None);
        assert_eq!(writer.full_text(), "abc");
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let writer = Typewriter::for_heading("çà et là", 7).unwrap();
        assert_eq!(writer.full_text(), "çà et là");
        assert!(Typewriter::for_heading("çà et là", 8).is_none());
    }
}
