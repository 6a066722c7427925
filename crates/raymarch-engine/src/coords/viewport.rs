use winit::dpi::PhysicalSize;

/// Drawable area in physical pixels.
///
/// This is what the fragment shader sees as `resolution`, so it matches
/// `gl_FragCoord` / `@builtin(position)` units.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn from_physical(size: PhysicalSize<u32>) -> Self {
        Self::new(size.width as f32, size.height as f32)
    }

    /// False for a minimized window or nonsense values; nothing is drawn then.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    #[inline]
    pub fn to_array(self) -> [f32; 2] {
        [self.width, self.height]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physical_size_converts_exactly() {
        let v = Viewport::from_physical(PhysicalSize::new(1920, 1080));
        assert_eq!(v.to_array(), [1920.0, 1080.0]);
    }

    #[test]
    fn zero_area_is_invalid() {
        assert!(!Viewport::new(0.0, 600.0).is_valid());
        assert!(!Viewport::new(800.0, 0.0).is_valid());
        assert!(Viewport::new(800.0, 600.0).is_valid());
    }
}
