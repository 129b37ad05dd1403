//! Time-boxed effects: the easter egg color cycle and highlight pulses.

use ember_core::EasterEggConfig;

use crate::sequence::KeySequence;

/// An effect that stays active for a fixed duration after being started.
///
/// Times are milliseconds on any monotonic clock the caller chooses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedEffect {
    duration_ms: f64,
    started_at: Option<f64>,
}

impl TimedEffect {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms: duration_ms as f64,
            started_at: None,
        }
    }

    /// Start (or restart) the effect at `now_ms`.
    pub fn start(&mut self, now_ms: f64) {
        self.started_at = Some(now_ms);
    }

    pub fn is_active(&self, now_ms: f64) -> bool {
        self.remaining(now_ms) > 0.0
    }

    /// Milliseconds left, zero when idle or expired.
    pub fn remaining(&self, now_ms: f64) -> f64 {
        match self.started_at {
            Some(start) => (start + self.duration_ms - now_ms).max(0.0),
            None => 0.0,
        }
    }

    /// Fraction of the duration elapsed (0.0-1.0), `None` when idle or expired.
    pub fn progress(&self, now_ms: f64) -> Option<f64> {
        let start = self.started_at?;
        if !self.is_active(now_ms) || self.duration_ms <= 0.0 {
            return None;
        }
        Some(((now_ms - start) / self.duration_ms).clamp(0.0, 1.0))
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }
}

/// Key sequence that triggers a timed effect.
#[derive(Debug, Clone)]
pub struct EasterEgg {
    sequence: KeySequence,
    effect: TimedEffect,
}

impl EasterEgg {
    pub fn new(config: &EasterEggConfig) -> Self {
        Self {
            sequence: KeySequence::new(config.sequence.iter().cloned()),
            effect: TimedEffect::new(config.duration_ms),
        }
    }

    /// Feed one key press. Returns `true` when this key activated the effect.
    pub fn on_key(&mut self, key: &str, now_ms: f64) -> bool {
        if self.sequence.feed(key) {
            self.effect.start(now_ms);
            log::debug!("key sequence completed");
            true
        } else {
            false
        }
    }

    pub fn is_active(&self, now_ms: f64) -> bool {
        self.effect.is_active(now_ms)
    }

    pub fn effect(&self) -> &TimedEffect {
        &self.effect
    }

    pub fn progress(&self) -> usize {
        self.sequence.progress()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timed_effect_window() {
        let mut effect = TimedEffect::new(2000);
        assert!(!effect.is_active(0.0));
        assert_eq!(effect.progress(0.0), None);

        effect.start(1000.0);
        assert!(effect.is_active(1000.0));
        assert_eq!(effect.remaining(2500.0), 500.0);
        assert_eq!(effect.progress(2000.0), Some(0.5));
        assert!(!effect.is_active(3000.0));
        assert_eq!(effect.progress(3000.0), None);
    }

    #[test]
    fn test_easter_egg_activation_and_expiry() {
        let config = EasterEggConfig::default();
        let mut egg = EasterEgg::new(&config);

        let mut activations = 0;
        for (i, key) in config.sequence.iter().enumerate() {
            if egg.on_key(key, i as f64 * 100.0) {
                activations += 1;
            }
        }
        assert_eq!(activations, 1);
        assert!(egg.is_active(900.0));
        assert!(egg.is_active(5800.0));
        assert!(!egg.is_active(5900.0));
    }

    #[test]
    fn test_easter_egg_ignores_other_keys() {
        let mut egg = EasterEgg::new(&EasterEggConfig::default());
        for key in ["a", "b", "Enter", "ArrowUp", "ArrowDown"] {
            assert!(!egg.on_key(key, 0.0));
        }
        assert!(!egg.is_active(0.0));
        assert_eq!(egg.progress(), 0);
    }
}
