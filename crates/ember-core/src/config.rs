//! Page enhancement configuration.
//!
//! Every section deserializes with defaults, so a page may supply a partial
//! document (or none at all) and still get the stock theme behavior.

use serde::{Deserialize, Deserializer, Serialize};

use crate::color::Rgb;
use crate::error::ConfigError;

/// Upper bound on particles; the link pass is quadratic.
pub const MAX_PARTICLES: usize = 500;

/// Top-level configuration for all page effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancementConfig {
    pub particles: ParticleConfig,
    pub scroll: ScrollConfig,
    pub reveal: RevealConfig,
    /// Partial sections fill from the roadmap defaults, not the reveal ones.
    #[serde(deserialize_with = "roadmap_section")]
    pub roadmap: RevealConfig,
    pub lazy_images: LazyImageConfig,
    pub typing: TypingConfig,
    pub links: LinkConfig,
    pub forms: FormConfig,
    pub easter_egg: EasterEggConfig,
    pub print: PrintConfig,
    pub shuffle: ShuffleConfig,
    pub categories: CategoryConfig,
    /// Class added to `<html>` once initialization finishes.
    pub loaded_class: String,
    /// Console log level (`error`, `warn`, `info`, `debug`, `trace`, `off`).
    pub log_level: String,
}

impl Default for EnhancementConfig {
    fn default() -> Self {
        Self {
            particles: ParticleConfig::default(),
            scroll: ScrollConfig::default(),
            reveal: RevealConfig::default(),
            roadmap: RevealConfig::roadmap(),
            lazy_images: LazyImageConfig::default(),
            typing: TypingConfig::default(),
            links: LinkConfig::default(),
            forms: FormConfig::default(),
            easter_egg: EasterEggConfig::default(),
            print: PrintConfig::default(),
            shuffle: ShuffleConfig::default(),
            categories: CategoryConfig::default(),
            loaded_class: "js-loaded".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl EnhancementConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the effects cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.particles.validate()?;
        check_threshold("reveal.threshold", self.reveal.threshold)?;
        check_threshold("roadmap.threshold", self.roadmap.threshold)?;
        let classes = [
            ("loaded_class", &self.loaded_class),
            ("scroll.progress_class", &self.scroll.progress_class),
            ("scroll.back_to_top_class", &self.scroll.back_to_top_class),
            ("scroll.visible_class", &self.scroll.visible_class),
            ("scroll.scrolled_class", &self.scroll.scrolled_class),
            ("reveal.class", &self.reveal.class),
            ("roadmap.class", &self.roadmap.class),
            ("lazy_images.lazy_class", &self.lazy_images.lazy_class),
            ("print.class", &self.print.class),
        ];
        for (field, class) in classes {
            check_class(field, class)?;
        }
        if self.easter_egg.sequence.is_empty() {
            return Err(ConfigError::invalid(
                "easter_egg.sequence",
                "at least one key is required",
            ));
        }
        Ok(())
    }
}

/// A single CSS class token: non-empty and without whitespace.
fn check_class(field: &'static str, class: &str) -> Result<(), ConfigError> {
    if class.is_empty() || class.chars().any(char::is_whitespace) {
        Err(ConfigError::invalid(field, format!("`{class}` is not a single class name")))
    } else {
        Ok(())
    }
}

fn check_threshold(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} is outside 0..=1")))
    }
}

/// Decorative particle overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub enabled: bool,
    /// Container the overlay is mounted in; the first match wins.
    pub selector: String,
    pub count: usize,
    /// Each velocity component is drawn from `[-max_speed, max_speed)`.
    pub max_speed: f64,
    pub radius_min: f64,
    pub radius_max: f64,
    /// Pairs closer than this are joined by a line.
    pub link_distance: f64,
    /// Line opacity at zero distance; fades linearly to 0 at `link_distance`.
    pub link_opacity: f64,
    pub line_width: f64,
    pub color: Rgb,
    pub dot_opacity: f64,
    /// Opacity of the whole overlay element.
    pub surface_opacity: f64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            selector: ".feature_text, .feature-text, [class*=\"feature\"]".to_string(),
            count: 30,
            max_speed: 0.25,
            radius_min: 1.0,
            radius_max: 3.0,
            link_distance: 100.0,
            link_opacity: 0.2,
            line_width: 0.5,
            color: Rgb::ACCENT,
            dot_opacity: 0.5,
            surface_opacity: 0.3,
        }
    }
}

impl ParticleConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.count > MAX_PARTICLES {
            return Err(ConfigError::invalid(
                "particles.count",
                format!("{} exceeds the maximum of {MAX_PARTICLES}", self.count),
            ));
        }
        if !(self.radius_min > 0.0 && self.radius_min < self.radius_max) {
            return Err(ConfigError::invalid(
                "particles.radius_min",
                "must be positive and below radius_max",
            ));
        }
        if !(self.link_distance > 0.0) {
            return Err(ConfigError::invalid(
                "particles.link_distance",
                "must be positive",
            ));
        }
        if !(self.max_speed >= 0.0 && self.max_speed.is_finite()) {
            return Err(ConfigError::invalid(
                "particles.max_speed",
                "must be finite and not negative",
            ));
        }
        Ok(())
    }
}

/// Scroll progress bar, back-to-top button and sticky header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub progress_enabled: bool,
    pub progress_class: String,
    pub back_to_top_enabled: bool,
    pub back_to_top_class: String,
    pub back_to_top_label: String,
    /// Button becomes visible once scrolled strictly past this offset (px).
    pub back_to_top_after: f64,
    pub visible_class: String,
    pub header_selector: String,
    /// Header gets `scrolled_class` once scrolled strictly past this offset (px).
    pub header_scrolled_after: f64,
    pub scrolled_class: String,
    /// In-page anchors (`a[href^="#"]`) scroll smoothly.
    pub smooth_anchors: bool,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            progress_enabled: true,
            progress_class: "scroll-progress".to_string(),
            back_to_top_enabled: true,
            back_to_top_class: "back-to-top".to_string(),
            back_to_top_label: "Back to top".to_string(),
            back_to_top_after: 300.0,
            visible_class: "visible".to_string(),
            header_selector: ".site-header".to_string(),
            header_scrolled_after: 50.0,
            scrolled_class: "scrolled".to_string(),
            smooth_anchors: true,
        }
    }
}

/// Reveal-on-scroll group. Used both for cards/sections and roadmap items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub enabled: bool,
    pub selector: String,
    pub class: String,
    /// Fraction of the element that must be visible (0.0-1.0).
    pub threshold: f64,
    pub root_margin: String,
    /// Stop watching after the first reveal.
    pub once: bool,
    /// Start hidden (opacity 0, shifted down) and transition in.
    pub prepare_hidden: bool,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            selector: ".feature-card, .post-card, section".to_string(),
            class: "animate-in".to_string(),
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
            once: true,
            prepare_hidden: true,
        }
    }
}

impl RevealConfig {
    /// Defaults for the roadmap timeline items.
    pub fn roadmap() -> Self {
        Self {
            enabled: true,
            selector: ".roadmap-item".to_string(),
            class: "roadmap-visible".to_string(),
            threshold: 0.2,
            root_margin: "0px 0px -50px 0px".to_string(),
            once: false,
            prepare_hidden: false,
        }
    }
}

/// Field-by-field overrides for a [`RevealConfig`].
#[derive(Deserialize)]
struct RevealOverrides {
    enabled: Option<bool>,
    selector: Option<String>,
    class: Option<String>,
    threshold: Option<f64>,
    root_margin: Option<String>,
    once: Option<bool>,
    prepare_hidden: Option<bool>,
}

impl RevealOverrides {
    fn apply(self, base: RevealConfig) -> RevealConfig {
        RevealConfig {
            enabled: self.enabled.unwrap_or(base.enabled),
            selector: self.selector.unwrap_or(base.selector),
            class: self.class.unwrap_or(base.class),
            threshold: self.threshold.unwrap_or(base.threshold),
            root_margin: self.root_margin.unwrap_or(base.root_margin),
            once: self.once.unwrap_or(base.once),
            prepare_hidden: self.prepare_hidden.unwrap_or(base.prepare_hidden),
        }
    }
}

fn roadmap_section<'de, D>(deserializer: D) -> Result<RevealConfig, D::Error>
where
    D: Deserializer<'de>,
{
    RevealOverrides::deserialize(deserializer).map(|o| o.apply(RevealConfig::roadmap()))
}

/// Deferred image loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LazyImageConfig {
    pub enabled: bool,
    pub selector: String,
    pub source_attribute: String,
    pub lazy_class: String,
    pub root_margin: String,
}

impl Default for LazyImageConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            selector: "img[data-src]".to_string(),
            source_attribute: "data-src".to_string(),
            lazy_class: "lazy".to_string(),
            root_margin: "0px".to_string(),
        }
    }
}

/// Typewriter effect on long headings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    pub enabled: bool,
    pub selector: String,
    /// Only headings strictly longer than this many characters are animated.
    pub min_length: usize,
    pub char_delay_ms: u32,
    pub start_delay_ms: u32,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            selector: "h1, .feature_text h1, .feature-text h1".to_string(),
            min_length: 20,
            char_delay_ms: 50,
            start_delay_ms: 500,
        }
    }
}

/// Hover transition on links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    pub enabled: bool,
    pub selector: String,
    /// Links carrying any of these classes keep their own transition.
    pub skip_classes: Vec<String>,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            selector: "a:not(.no-effect)".to_string(),
            skip_classes: vec!["cta-btn".to_string(), "read-more-btn".to_string()],
        }
    }
}

/// Form submission feedback and input focus styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub enabled: bool,
    pub busy_label: String,
    /// Fallback restore when no navigation happens after submit.
    pub restore_after_ms: u32,
    pub focus_effect: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            busy_label: "Sending...".to_string(),
            restore_after_ms: 3000,
            focus_effect: true,
        }
    }
}

/// Keyboard easter egg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EasterEggConfig {
    pub enabled: bool,
    /// `KeyboardEvent.key` values, matched case-sensitively and in order.
    pub sequence: Vec<String>,
    pub duration_ms: u32,
}

impl Default for EasterEggConfig {
    fn default() -> Self {
        let sequence = [
            "ArrowUp",
            "ArrowUp",
            "ArrowDown",
            "ArrowDown",
            "ArrowLeft",
            "ArrowRight",
            "ArrowLeft",
            "ArrowRight",
            "b",
            "a",
        ];
        Self {
            enabled: true,
            sequence: sequence.iter().map(|k| k.to_string()).collect(),
            duration_ms: 5000,
        }
    }
}

/// Body class toggled around printing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintConfig {
    pub enabled: bool,
    pub class: String,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            class: "printing".to_string(),
        }
    }
}

/// Blog post order randomization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShuffleConfig {
    pub enabled: bool,
    pub container_id: String,
}

impl Default for ShuffleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            container_id: "blog-posts-container".to_string(),
        }
    }
}

/// Fragment highlight on the categories page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryConfig {
    pub enabled: bool,
    /// The page path must contain this fragment.
    pub path_fragment: String,
    pub delay_ms: u32,
    pub highlight_ms: u32,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path_fragment: "/categories".to_string(),
            delay_ms: 300,
            highlight_ms: 2000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_theme() {
        let config = EnhancementConfig::default();
        assert_eq!(config.particles.count, 30);
        assert_eq!(config.particles.link_distance, 100.0);
        assert_eq!(config.scroll.back_to_top_after, 300.0);
        assert_eq!(config.scroll.header_scrolled_after, 50.0);
        assert_eq!(config.easter_egg.sequence.len(), 10);
        assert!(config.reveal.once);
        assert!(!config.roadmap.once);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EnhancementConfig::from_json(
            r##"{ "particles": { "count": 12, "color": "#102030" }, "loaded_class": "ready" }"##,
        )
        .unwrap();
        assert_eq!(config.particles.count, 12);
        assert_eq!(config.particles.color, Rgb::new(0x10, 0x20, 0x30));
        assert_eq!(config.particles.link_distance, 100.0);
        assert_eq!(config.loaded_class, "ready");
        assert_eq!(config.roadmap, RevealConfig::roadmap());
    }

    #[test]
    fn test_partial_roadmap_keeps_roadmap_defaults() {
        let config = EnhancementConfig::from_json(r#"{ "roadmap": { "class": "shown" } }"#).unwrap();
        assert_eq!(config.roadmap.class, "shown");
        assert_eq!(config.roadmap.selector, ".roadmap-item");
        assert_eq!(config.roadmap.threshold, 0.2);
        assert!(!config.roadmap.once);
    }

    #[test]
    fn test_toml_with_channel_color() {
        let config = EnhancementConfig::from_toml(
            r#"
            [particles]
            count = 50
            color = [1, 2, 3]

            [easter_egg]
            duration_ms = 1000
            "#,
        )
        .unwrap();
        assert_eq!(config.particles.count, 50);
        assert_eq!(config.particles.color, Rgb::new(1, 2, 3));
        assert_eq!(config.easter_egg.duration_ms, 1000);
        assert_eq!(config.easter_egg.sequence.len(), 10);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let err = EnhancementConfig::from_json(r#"{ "particles": { "count": 10000 } }"#);
        assert!(matches!(
            err,
            Err(ConfigError::Invalid {
                field: "particles.count",
                ..
            })
        ));

        let err = EnhancementConfig::from_json(r#"{ "reveal": { "threshold": 1.5 } }"#);
        assert!(matches!(err, Err(ConfigError::Invalid { .. })));

        let err = EnhancementConfig::from_json(r#"{ "easter_egg": { "sequence": [] } }"#);
        assert!(matches!(err, Err(ConfigError::Invalid { .. })));

        let err = EnhancementConfig::from_json(
            r#"{ "particles": { "radius_min": 3.0, "radius_max": 1.0 } }"#,
        );
        assert!(matches!(err, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_validation_rejects_bad_particle_motion() {
        let err = EnhancementConfig::from_json(r#"{ "particles": { "link_distance": 0.0 } }"#);
        assert!(matches!(
            err,
            Err(ConfigError::Invalid {
                field: "particles.link_distance",
                ..
            })
        ));

        let err = EnhancementConfig::from_json(r#"{ "particles": { "link_distance": -5.0 } }"#);
        assert!(matches!(err, Err(ConfigError::Invalid { .. })));

        let err = EnhancementConfig::from_json(r#"{ "particles": { "max_speed": -0.1 } }"#);
        assert!(matches!(
            err,
            Err(ConfigError::Invalid {
                field: "particles.max_speed",
                ..
            })
        ));

        let mut config = EnhancementConfig::default();
        config.particles.max_speed = f64::INFINITY;
        assert!(config.validate().is_err());

        config.particles.max_speed = 30.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_multi_word_classes() {
        let err = EnhancementConfig::from_json(r#"{ "loaded_class": "js loaded" }"#);
        assert!(matches!(
            err,
            Err(ConfigError::Invalid {
                field: "loaded_class",
                ..
            })
        ));

        let err = EnhancementConfig::from_json(r#"{ "reveal": { "class": "" } }"#);
        assert!(matches!(
            err,
            Err(ConfigError::Invalid {
                field: "reveal.class",
                ..
            })
        ));
    }

    #[test]
    fn test_malformed_input_errors() {
        assert!(matches!(
            EnhancementConfig::from_json("{"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            EnhancementConfig::from_toml("particles = ["),
            Err(ConfigError::Toml(_))
        ));
        assert!(EnhancementConfig::from_json(r#"{ "particles": { "color": "orange" } }"#).is_err());
    }
}
