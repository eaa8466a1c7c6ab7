use crate::error::{Error, Result};

/// Parameters governing a render, independent of any particular scene.
/// Concrete construction (CLI flags, config files) is the binary's
/// responsibility; this crate only validates the result.
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    pub image_width: u32,
    pub image_height: u32,
    /// Hard cap on the number of bounces a path may take, including the
    /// camera hit. `1` means only directly-visible emission is recorded.
    pub max_path_length: u32,
    /// Samples accumulated per pixel before the sensor is read out.
    pub max_samples: u32,
    /// Enables next-event estimation. `false` falls back to plain emission
    /// hits, i.e. a "basic" path-tracing mode with no shadow rays.
    pub enable_nee: bool,
}

impl RenderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(Error::InvalidConfig(
                "image dimensions must be non-zero".to_string(),
            ));
        }
        if self.max_path_length == 0 {
            return Err(Error::InvalidConfig(
                "max_path_length must be at least 1".to_string(),
            ));
        }
        if self.max_samples == 0 {
            return Err(Error::InvalidConfig(
                "max_samples must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> RenderConfig {
        RenderConfig {
            image_width: 64,
            image_height: 64,
            max_path_length: 8,
            max_samples: 16,
            enable_nee: true,
        }
    }

    #[test]
    fn accepts_sane_config() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn rejects_zero_dimensions() {
        let mut config = valid();
        config.image_width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_path_length() {
        let mut config = valid();
        config.max_path_length = 0;
        assert!(config.validate().is_err());
    }
}
