//! Registry behind the shared viewport watcher.
//!
//! One watcher serves every reveal, roadmap and lazy-image target. Each target
//! is registered under a key with its reaction; the watcher forwards
//! intersection reports here and applies whatever comes back.

use std::collections::HashMap;

use crate::element::Reaction;

/// Registration for one watched element.
#[derive(Debug, Clone, PartialEq)]
pub struct Watch {
    pub reaction: Reaction,
    /// Minimum visible fraction before the reaction fires.
    pub threshold: f64,
    /// Release the element after the first reaction.
    pub once: bool,
}

/// A reaction that should be applied now.
#[derive(Debug, Clone, PartialEq)]
pub struct Triggered {
    pub reaction: Reaction,
    /// The caller should stop observing the element.
    pub release: bool,
}

/// Watched targets keyed by an opaque id.
#[derive(Debug, Default)]
pub struct WatchRegistry {
    targets: HashMap<u32, Watch>,
    next_key: u32,
}

impl WatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a target and return its key.
    pub fn register(&mut self, watch: Watch) -> u32 {
        let key = self.next_key;
        self.next_key = self.next_key.wrapping_add(1);
        self.targets.insert(key, watch);
        key
    }

    /// Drop a target without firing it.
    pub fn unregister(&mut self, key: u32) -> bool {
        self.targets.remove(&key).is_some()
    }

    /// Handle an intersection report for `key`.
    pub fn dispatch(&mut self, key: u32, intersecting: bool, ratio: f64) -> Option<Triggered> {
        let watch = self.targets.get(&key)?;
        if !intersecting || ratio < watch.threshold {
            return None;
        }
        if watch.once {
            let watch = self.targets.remove(&key)?;
            Some(Triggered {
                reaction: watch.reaction,
                release: true,
            })
        } else {
            Some(Triggered {
                reaction: watch.reaction.clone(),
                release: false,
            })
        }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Distinct thresholds across all targets, ascending.
    pub fn thresholds(&self) -> Vec<f64> {
        let mut thresholds: Vec<f64> = self.targets.values().map(|w| w.threshold).collect();
        thresholds.sort_by(f64::total_cmp);
        thresholds.dedup();
        thresholds
    }

    pub fn clear(&mut self) {
        self.targets.clear();
    }
}

/// Outcome of an intersection report for one element.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Report {
    pub reactions: Vec<Reaction>,
    /// Nothing is left to watch on the element.
    pub release: bool,
}

/// Registry keys carried by each observed element.
///
/// Elements are matched by equality, so the table lives with the watcher that
/// owns it and nothing is written onto the elements themselves.
#[derive(Debug)]
pub struct TargetKeys<T> {
    entries: Vec<(T, Vec<u32>)>,
}

impl<T> Default for TargetKeys<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: PartialEq> TargetKeys<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, target: T, key: u32) {
        match self.entries.iter_mut().find(|(t, _)| *t == target) {
            Some((_, keys)) => keys.push(key),
            None => self.entries.push((target, vec![key])),
        }
    }

    /// Dispatch every key of `target` and forget the ones that were released.
    pub fn report(
        &mut self,
        registry: &mut WatchRegistry,
        target: &T,
        intersecting: bool,
        ratio: f64,
    ) -> Report {
        let Some(index) = self.entries.iter().position(|(t, _)| t == target) else {
            return Report {
                reactions: Vec::new(),
                release: true,
            };
        };

        let mut reactions = Vec::new();
        self.entries[index].1.retain(|&key| {
            match registry.dispatch(key, intersecting, ratio) {
                Some(triggered) => {
                    reactions.push(triggered.reaction);
                    !triggered.release
                }
                None => true,
            }
        });

        let release = self.entries[index].1.is_empty();
        if release {
            self.entries.swap_remove(index);
        }
        Report { reactions, release }
    }

    /// Number of elements still carrying keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementOps;
    use crate::test_support::MockElement;

    fn reveal(threshold: f64, once: bool) -> Watch {
        Watch {
            reaction: Reaction::AddClass("animate-in".to_string()),
            threshold,
            once,
        }
    }

    #[test]
    fn test_one_shot_fires_once() {
        let mut registry = WatchRegistry::new();
        let key = registry.register(reveal(0.1, true));

        let first = registry.dispatch(key, true, 0.5).unwrap();
        assert!(first.release);
        assert!(registry.dispatch(key, true, 0.5).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_repeatable_target_stays_registered() {
        let mut registry = WatchRegistry::new();
        let key = registry.register(reveal(0.2, false));

        assert!(!registry.dispatch(key, true, 0.3).unwrap().release);
        assert!(registry.dispatch(key, true, 0.3).is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_below_threshold_or_leaving_is_ignored() {
        let mut registry = WatchRegistry::new();
        let key = registry.register(reveal(0.2, true));

        assert!(registry.dispatch(key, true, 0.1).is_none());
        assert!(registry.dispatch(key, false, 0.0).is_none());
        assert_eq!(registry.len(), 1);
        assert!(registry.dispatch(key, true, 0.2).is_some());
    }

    #[test]
    fn test_unknown_key() {
        let mut registry = WatchRegistry::new();
        assert!(registry.dispatch(99, true, 1.0).is_none());
        assert!(!registry.unregister(99));
    }

    #[test]
    fn test_thresholds_are_deduplicated() {
        let mut registry = WatchRegistry::new();
        registry.register(reveal(0.2, false));
        registry.register(reveal(0.1, true));
        registry.register(reveal(0.1, true));
        registry.register(reveal(0.0, true));
        assert_eq!(registry.thresholds(), vec![0.0, 0.1, 0.2]);
    }

    #[test]
    fn test_element_watched_for_two_reactions() {
        let mut registry = WatchRegistry::new();
        let mut targets = TargetKeys::new();
        targets.insert("card", registry.register(reveal(0.1, true)));
        targets.insert("card", registry.register(reveal(0.5, true)));

        let first = targets.report(&mut registry, &"card", true, 0.2);
        assert_eq!(first.reactions.len(), 1);
        assert!(!first.release);

        let second = targets.report(&mut registry, &"card", true, 0.6);
        assert_eq!(second.reactions.len(), 1);
        assert!(second.release);
        assert!(targets.is_empty());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_two_watchers_share_an_element() {
        // Two instances on one page start their keys at zero.
        let mut first_registry = WatchRegistry::new();
        let mut second_registry = WatchRegistry::new();
        let mut first = TargetKeys::new();
        let mut second = TargetKeys::new();
        first.insert("hero", first_registry.register(reveal(0.1, true)));
        second.insert("hero", second_registry.register(reveal(0.1, true)));

        let report = first.report(&mut first_registry, &"hero", true, 1.0);
        assert!(report.release);
        assert_eq!(second.len(), 1);

        let report = second.report(&mut second_registry, &"hero", true, 1.0);
        assert_eq!(report.reactions.len(), 1);
        assert!(report.release);
    }

    #[test]
    fn test_unknown_element_is_released() {
        let mut registry = WatchRegistry::new();
        let mut targets: TargetKeys<&str> = TargetKeys::new();
        let report = targets.report(&mut registry, &"stray", true, 1.0);
        assert!(report.reactions.is_empty());
        assert!(report.release);
    }

    #[test]
    fn test_lazy_image_scrolled_into_view() {
        let mut registry = WatchRegistry::new();
        let img = MockElement::default()
            .with_attribute("data-src", "/img/post.jpg")
            .with_class("lazy");
        let key = registry.register(Watch {
            reaction: Reaction::LoadImage {
                source_attribute: "data-src".to_string(),
                lazy_class: "lazy".to_string(),
            },
            threshold: 0.0,
            once: true,
        });

        // Still below the fold.
        assert!(registry.dispatch(key, false, 0.0).is_none());
        assert_eq!(img.attribute("src"), None);

        let triggered = registry.dispatch(key, true, 0.01).unwrap();
        triggered.reaction.apply(&img);

        assert!(triggered.release);
        assert_eq!(img.attribute("src").as_deref(), Some("/img/post.jpg"));
        assert!(!img.has_class("lazy"));
    }
}
