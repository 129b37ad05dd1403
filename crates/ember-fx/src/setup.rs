//! Install steps that fail on their own.

use std::fmt::Debug;

/// Runs named install steps. A failing step is logged and skipped; later
/// steps still run.
#[derive(Debug, Default)]
pub struct Setup {
    failed: Vec<&'static str>,
}

impl Setup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step<T, E: Debug>(
        &mut self,
        name: &'static str,
        install: impl FnOnce() -> Result<T, E>,
    ) -> Option<T> {
        match install() {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("{name} failed: {err:?}");
                self.failed.push(name);
                None
            }
        }
    }

    /// Names of the steps that failed, in run order.
    pub fn failed(&self) -> &[&'static str] {
        &self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_does_not_stop_later_steps() {
        let mut setup = Setup::new();
        let mut ran = Vec::new();

        setup.step("scroll", || {
            ran.push("scroll");
            Err::<(), _>("no body")
        });
        let forms = setup.step("forms", || {
            ran.push("forms");
            Ok::<_, &str>(3)
        });
        setup.step("loaded class", || {
            ran.push("loaded class");
            Ok::<_, &str>(())
        });

        assert_eq!(ran, ["scroll", "forms", "loaded class"]);
        assert_eq!(forms, Some(3));
        assert_eq!(setup.failed(), ["scroll"]);
    }

    #[test]
    fn test_all_steps_succeed() {
        let mut setup = Setup::new();
        assert_eq!(setup.step("print", || Ok::<_, ()>("ready")), Some("ready"));
        assert!(setup.failed().is_empty());
    }
}
