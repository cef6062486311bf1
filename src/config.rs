//! Deployment configuration.
//!
//! Every struct deserialises with `#[serde(default)]`, so a JSON document only
//! needs the keys it overrides.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::GeoCoordinate;

/// Observer location. Defaults to Ahmedabad, India.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            latitude: 23.0225,
            longitude: 72.5714,
        }
    }
}

impl SiteConfig {
    pub fn coordinate(&self) -> GeoCoordinate {
        GeoCoordinate::new(self.latitude, self.longitude)
    }
}

/// Offscreen render parameters for the shadow estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowConfig {
    /// Square target edge in pixels.
    pub resolution: u32,
    /// A pixel with any RGB channel below this is shadow.
    pub threshold: u8,
    /// Distance of the directional light from the building centre.
    pub light_distance: f64,
    pub near: f64,
    pub far: f64,
    pub building_color: [u8; 3],
    pub ground_color: [u8; 3],
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            resolution: 1024,
            threshold: 240,
            light_distance: 1000.0,
            near: 0.1,
            far: 2000.0,
            building_color: [128, 128, 128],
            ground_color: [255, 255, 255],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Average daily insolation, kWh/m²/day.
    pub irradiance: f64,
    /// Fractional panel conversion efficiency.
    pub panel_efficiency: f64,
    pub shadow: ShadowConfig,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            irradiance: 5.5,
            panel_efficiency: 0.15,
            shadow: ShadowConfig::default(),
        }
    }
}

impl EstimatorConfig {
    pub fn from_json(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.irradiance.is_finite() || self.irradiance < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "irradiance must be a non-negative number, got {}",
                self.irradiance
            )));
        }
        if !(0.0..=1.0).contains(&self.panel_efficiency) {
            return Err(Error::InvalidConfig(format!(
                "panel_efficiency must be within [0, 1], got {}",
                self.panel_efficiency
            )));
        }
        if self.shadow.resolution == 0 {
            return Err(Error::InvalidConfig("shadow.resolution must be positive".into()));
        }
        if !(self.shadow.light_distance > 0.0) {
            return Err(Error::InvalidConfig(
                "shadow.light_distance must be positive".into(),
            ));
        }
        if !(self.shadow.near >= 0.0 && self.shadow.far > self.shadow.near) {
            return Err(Error::InvalidConfig(format!(
                "shadow clip range {}..{} is empty",
                self.shadow.near, self.shadow.far
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let c = EstimatorConfig::from_json(r#"{"irradiance": 4.2, "shadow": {"resolution": 256}}"#)
            .unwrap();
        assert_eq!(c.irradiance, 4.2);
        assert_eq!(c.panel_efficiency, 0.15);
        assert_eq!(c.shadow.resolution, 256);
        assert_eq!(c.shadow.threshold, 240);
    }

    #[test]
    fn test_rejects_bad_efficiency() {
        let err = EstimatorConfig::from_json(r#"{"panel_efficiency": 1.5}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = EstimatorConfig::from_json("{irradiance").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_site_default_is_ahmedabad() {
        let c = SiteConfig::default().coordinate();
        assert_eq!(c.latitude, 23.0225);
        assert_eq!(c.longitude, 72.5714);
    }
}
