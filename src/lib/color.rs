//! Linear RGB colour.

#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[allow(missing_docs)]
/// Linear RGB triple, each channel nominally in `0..=1`. Emission may exceed 1.
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    #[allow(missing_docs)]
    pub const BLACK: Self = Self::new(0., 0., 0.);
    #[allow(missing_docs)]
    pub const WHITE: Self = Self::new(1., 1., 1.);
    #[allow(missing_docs)]
    pub const RED: Self = Self::new(1., 0., 0.);
    #[allow(missing_docs)]
    pub const GREEN: Self = Self::new(0., 1., 0.);
    #[allow(missing_docs)]
    pub const BLUE: Self = Self::new(0., 0., 1.);

    /// Create a colour from its channels.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Color { r, g, b }
    }
}

impl From<Color> for [f32; 3] {
    fn from(Color { r, g, b }: Color) -> Self {
        [r, g, b]
    }
}
