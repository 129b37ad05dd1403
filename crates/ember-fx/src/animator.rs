//! Particle overlay lifecycle: mount, per-frame update, resize and stop.

use ember_core::ParticleConfig;
use rand::Rng;

use crate::particles::ParticleField;
use crate::surface::Surface;

/// A host able to create a drawing surface inside a container.
pub trait Stage {
    type Surface: Surface;

    /// Create an overlay surface inside the first element matching
    /// `selector`, returning it with its initial size.
    ///
    /// Must leave the host untouched when it returns `None` (container
    /// missing, no 2D drawing capability).
    fn mount(
        &mut self,
        selector: &str,
        config: &ParticleConfig,
    ) -> Option<(Self::Surface, f64, f64)>;
}

/// A running particle field bound to its own surface.
#[derive(Debug)]
pub struct ParticleAnimator<S> {
    field: ParticleField,
    surface: S,
    running: bool,
    frames: u64,
}

impl<S: Surface> ParticleAnimator<S> {
    /// Mount on `stage`. Returns `None` (with nothing created) when the stage
    /// cannot provide a surface.
    pub fn mount<T, R>(stage: &mut T, config: &ParticleConfig, rng: &mut R) -> Option<Self>
    where
        T: Stage<Surface = S>,
        R: Rng + ?Sized,
    {
        let (surface, width, height) = stage.mount(&config.selector, config)?;
        let field = ParticleField::spawn(width, height, config, rng);
        log::debug!(
            "particle field mounted: {} particles on {width}x{height}",
            field.particles().len()
        );
        Some(Self {
            field,
            surface,
            running: true,
            frames: 0,
        })
    }

    /// Advance and redraw one frame. Returns `false` once stopped, in which
    /// case nothing is drawn and the caller should not reschedule.
    pub fn frame(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.field.step();
        self.field.render(&mut self.surface);
        self.frames += 1;
        true
    }

    /// Track a new surface size without rescaling particle positions.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.field.resize(width, height);
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames drawn since mounting.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Mark, MockStage};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_missing_container_is_a_silent_noop() {
        let mut stage = MockStage::empty();
        let mut rng = SmallRng::seed_from_u64(0);
        let animator = ParticleAnimator::mount(&mut stage, &ParticleConfig::default(), &mut rng);

        assert!(animator.is_none());
        assert_eq!(stage.mutations, 0);
    }

    #[test]
    fn test_missing_drawing_context_is_a_silent_noop() {
        let mut stage = MockStage::without_context(800.0, 400.0);
        let mut rng = SmallRng::seed_from_u64(0);
        let animator = ParticleAnimator::mount(&mut stage, &ParticleConfig::default(), &mut rng);

        assert!(animator.is_none());
        assert_eq!(stage.mutations, 0);
    }

    #[test]
    fn test_frames_draw_until_stopped() {
        let mut stage = MockStage::with_container(800.0, 400.0);
        let mut rng = SmallRng::seed_from_u64(0);
        let mut animator =
            ParticleAnimator::mount(&mut stage, &ParticleConfig::default(), &mut rng).unwrap();

        assert_eq!(stage.mutations, 1);
        assert_eq!(animator.field().size(), (800.0, 400.0));
        assert!(animator.frame());
        assert!(animator.frame());
        assert_eq!(animator.frames(), 2);
        assert_eq!(animator.surface().circles(), 60);

        animator.stop();
        let marks = animator.surface().marks.len();
        assert!(!animator.frame());
        assert!(!animator.is_running());
        assert_eq!(animator.surface().marks.len(), marks);
        assert_eq!(animator.frames(), 2);
    }

    #[test]
    fn test_each_frame_starts_with_clear() {
        let mut stage = MockStage::with_container(200.0, 200.0);
        let mut rng = SmallRng::seed_from_u64(9);
        let mut animator =
            ParticleAnimator::mount(&mut stage, &ParticleConfig::default(), &mut rng).unwrap();
        animator.frame();
        animator.frame();
        let clears = animator
            .surface()
            .marks
            .iter()
            .filter(|m| **m == Mark::Clear)
            .count();
        assert_eq!(clears, 2);
    }

    #[test]
    fn test_resize_updates_bounds_only() {
        let mut stage = MockStage::with_container(400.0, 400.0);
        let mut rng = SmallRng::seed_from_u64(5);
        let mut animator =
            ParticleAnimator::mount(&mut stage, &ParticleConfig::default(), &mut rng).unwrap();
        let before = animator.field().particles().to_vec();
        animator.resize(100.0, 50.0);
        assert_eq!(animator.field().size(), (100.0, 50.0));
        assert_eq!(animator.field().particles(), &before[..]);
    }
}
