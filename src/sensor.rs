use crate::{
    color::Color,
    error::{Error, Result},
};

/// Accumulates per-pixel radiance across samples. Deliberately dumb: no
/// tone mapping, filtering, or tiling — those belong to pixel-buffer
/// storage and display, not here. A `Sensor` only knows how to sum and
/// average.
pub struct Sensor {
    width: u32,
    height: u32,
    max_samples: u32,
    accumulated: Vec<Color>,
}

impl Sensor {
    pub fn new(width: u32, height: u32, max_samples: u32) -> Result<Sensor> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidConfig(
                "sensor dimensions must be non-zero".to_string(),
            ));
        }
        if max_samples == 0 {
            return Err(Error::InvalidConfig(
                "max_samples must be at least 1".to_string(),
            ));
        }
        Ok(Sensor {
            width,
            height,
            max_samples,
            accumulated: vec![Color::BLACK; (width * height) as usize],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Adds one sample's contribution to pixel `(x, y)`. Silently ignored if
    /// out of range: a write from a collaborator-controlled coordinate
    /// never needs to panic the render.
    pub fn write(&mut self, x: u32, y: u32, sample: Color) {
        if let Some(index) = self.index(x, y) {
            self.accumulated[index] += sample;
        }
    }

    /// Reads back the average of all samples written to `(x, y)` so far.
    /// Returns `Color::BLACK` out of range.
    pub fn read(&self, x: u32, y: u32) -> Color {
        match self.index(x, y) {
            Some(index) => self.accumulated[index] / self.max_samples as f64,
            None => Color::BLACK,
        }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y * self.width + x) as usize)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn rejects_zero_sized_sensor() {
        assert!(Sensor::new(0, 4, 1).is_err());
        assert!(Sensor::new(4, 0, 1).is_err());
        assert!(Sensor::new(4, 4, 0).is_err());
    }

    #[test]
    fn accumulates_and_averages() {
        let mut sensor = Sensor::new(2, 2, 4).unwrap();
        for _ in 0..4 {
            sensor.write(1, 0, Color::WHITE);
        }
        assert_abs_diff_eq!(sensor.read(1, 0), Color::WHITE, epsilon = 1e-9);
        assert_abs_diff_eq!(sensor.read(0, 0), Color::BLACK, epsilon = 1e-9);
    }

    #[test]
    fn out_of_range_access_is_silently_ignored() {
        let mut sensor = Sensor::new(2, 2, 1).unwrap();
        sensor.write(5, 5, Color::WHITE);
        assert_eq!(sensor.read(5, 5), Color::BLACK);
    }
}
