/// Linear RGBA color with straight alpha.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Color> for wgpu::Color {
    fn from(c: Color) -> Self {
        wgpu::Color {
            r: c.r as f64,
            g: c.g as f64,
            b: c.b as f64,
            a: c.a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_to_wgpu_color() {
        let w: wgpu::Color = Color::TRANSPARENT.into();
        assert_eq!(w, wgpu::Color::TRANSPARENT);
    }

    #[test]
    fn straight_alpha_is_passed_through() {
        let w: wgpu::Color = Color::rgba(0.25, 0.5, 1.0, 0.5).into();
        assert_eq!((w.r, w.g, w.b, w.a), (0.25, 0.5, 1.0, 0.5));
    }
}
