use crate::constants::EXPORT_JPEG_QUALITY;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Compositor configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CollageOptions {
    /// Canvas background color used when no background image is set
    pub background: BackgroundColor,
    /// JPEG quality for the exported composite (1-100)
    pub jpeg_quality: u8,
}

impl Default for CollageOptions {
    fn default() -> Self {
        Self {
            background: BackgroundColor::default(),
            jpeg_quality: EXPORT_JPEG_QUALITY,
        }
    }
}

impl CollageOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options: Self = serde_json::from_slice(&bytes)
            .map_err(|e| CollageError::Config(format!("Failed to parse config: {e}")))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| CollageError::Config(format!("Failed to serialize config: {e}")))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(CollageError::Config(format!(
                "JPEG quality must be between 1 and 100, got {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_are_valid() {
        let options = CollageOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.jpeg_quality, 92);
    }

    #[test]
    fn test_quality_bounds_rejected() {
        let mut options = CollageOptions::default();
        options.jpeg_quality = 0;
        assert!(options.validate().is_err());
        options.jpeg_quality = 101;
        assert!(options.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[tokio::test]
    async fn test_options_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("collage.json");

        let options = CollageOptions {
            background: BackgroundColor::Beige,
            jpeg_quality: 80,
        };
        options.save(&path).await.unwrap();

        let loaded = CollageOptions::load(&path).await.unwrap();
        assert_eq!(loaded, options);
    }
}
