//! Render parameters.

use crate::error::SettingsError;

/// Image size, sampling rate and seed for one render.
///
/// There are no built-in defaults; the caller decides every value and
/// `validate` rejects the ones the renderer cannot work with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    /// Samples per sub-pixel cell (each pixel has 2x2 cells)
    pub samples: u32,
    pub seed: u32,
}

impl RenderSettings {
    /// Sub-pixel cells per axis.
    pub const SUBPIXELS: u32 = 2;

    /// Create new render settings.
    pub fn new(width: u32, height: u32, samples: u32, seed: u32) -> Self {
        Self {
            width,
            height,
            samples,
            seed,
        }
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Camera rays traced per pixel.
    pub fn samples_per_pixel(&self) -> u64 {
        u64::from(Self::SUBPIXELS * Self::SUBPIXELS) * u64::from(self.samples)
    }

    /// Reject settings the renderer cannot handle.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.width == 0 || self.height == 0 {
            return Err(SettingsError::EmptyImage {
                width: self.width,
                height: self.height,
            });
        }
        if self.samples == 0 {
            return Err(SettingsError::NoSamples);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_settings() {
        let settings = RenderSettings::new(100, 80, 40, 12345);
        assert!(settings.validate().is_ok());
        assert_eq!(settings.pixel_count(), 8000);
        assert_eq!(settings.samples_per_pixel(), 160);
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        assert_eq!(
            RenderSettings::new(0, 10, 1, 0).validate(),
            Err(SettingsError::EmptyImage { width: 0, height: 10 })
        );
        assert!(RenderSettings::new(10, 0, 1, 0).validate().is_err());
    }

    #[test]
    fn test_rejects_zero_samples() {
        assert_eq!(
            RenderSettings::new(10, 10, 0, 0).validate(),
            Err(SettingsError::NoSamples)
        );
    }
}
