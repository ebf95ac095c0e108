/// An RGB display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self(r, g, b)
    }

    pub fn channels(&self) -> [u8; 3] {
        [self.0, self.1, self.2]
    }

    /// Lightens the color by `scale` times the headroom of its brightest
    /// channel, so hue is preserved until that channel saturates.
    ///
    /// A scale of 0.5 moves the brightest channel halfway to white.
    pub fn lighten(&self, scale: f32) -> Self {
        let channels = self.channels();
        let min_gap = channels.iter().map(|c| 255 - c).min().unwrap_or(0);
        let additional = min_gap as f32 * scale;
        // `as u8` saturates, which clamps to the 0..=255 range.
        let shift = |c: u8| (c as f32 + additional) as u8;
        Self(shift(self.0), shift(self.1), shift(self.2))
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(channels: [u8; 3]) -> Self {
        Self(channels[0], channels[1], channels[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lighten_half() {
        let color = Rgb::new(100, 55, 0);
        // Brightest channel has 155 headroom; half of it is 77.5.
        assert_eq!(color.lighten(0.5), Rgb::new(177, 132, 77));
    }

    #[test]
    fn test_lighten_zero_scale_is_identity() {
        let color = Rgb::new(12, 200, 31);
        assert_eq!(color.lighten(0.0), color);
    }

    #[test]
    fn test_lighten_saturates() {
        assert_eq!(Rgb::new(0, 0, 0).lighten(2.0), Rgb::new(255, 255, 255));
        assert_eq!(Rgb::new(255, 10, 10).lighten(1.0), Rgb::new(255, 10, 10));
    }
}
