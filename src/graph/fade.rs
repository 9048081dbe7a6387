//! Opacity lifecycle shared by nodes and edges.
//!
//! Entities are never created or destroyed abruptly. They enter at opacity
//! 0, fade towards 1 while wanted, and leave their collection in the step
//! their opacity returns to 0.

/// An entity with a fade-in/fade-out opacity in `[0, 1]`.
pub trait Fade {
    /// Current opacity.
    fn opacity(&self) -> f64;

    /// Mutable access to the stored opacity.
    fn opacity_mut(&mut self) -> &mut f64;

    /// Add `delta` to the opacity, clamped into `[0, 1]`.
    #[inline]
    fn fade(&mut self, delta: f64) {
        let opacity = self.opacity_mut();
        *opacity = (*opacity + delta).clamp(0.0, 1.0);
    }

    /// Whether the entity still belongs in its collection.
    #[inline]
    fn is_alive(&self) -> bool {
        self.opacity() > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Blip(f64);

    impl Fade for Blip {
        fn opacity(&self) -> f64 {
            self.0
        }

        fn opacity_mut(&mut self) -> &mut f64 {
            &mut self.0
        }
    }

    #[test]
    fn test_fade_clamps_upper() {
        let mut b = Blip(0.9);
        b.fade(0.5);
        assert_eq!(b.opacity(), 1.0);
    }

    #[test]
    fn test_fade_clamps_lower() {
        let mut b = Blip(0.02);
        b.fade(-0.03);
        assert_eq!(b.opacity(), 0.0);
        assert!(!b.is_alive());
    }

    #[test]
    fn test_fade_in_from_zero() {
        let mut b = Blip(0.0);
        assert!(!b.is_alive());
        b.fade(0.06);
        assert!(b.is_alive());
        assert!((b.opacity() - 0.06).abs() < 1e-12);
    }
}
