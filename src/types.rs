use chrono::{DateTime, Utc};
use glam::DVec3;

/// Observer location in degrees. Latitude is clamped to [-90, 90] by the
/// ephemeris before use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Every intermediate of one ephemeris evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    pub julian_date: f64,
    pub days_since_j2000: f64,
    /// Radians.
    pub declination: f64,
    pub mean_anomaly: f64,
    pub equation_of_center: f64,
    pub ecliptic_longitude: f64,
    /// Minutes.
    pub equation_of_time: f64,
    /// Hours.
    pub solar_time: f64,
    pub hour_angle: f64,
    pub altitude: f64,
}

/// Observer-to-sun direction scaled to [`crate::ephemeris::SUN_DISTANCE`].
///
/// `vector.y > 0` exactly when the sun is above the horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunDirection {
    pub vector: DVec3,
    /// Degrees above the horizon.
    pub altitude: f64,
    /// Degrees, `-hour_angle`.
    pub azimuth: f64,
    pub hour_angle: f64,
}

impl SunDirection {
    pub fn unit(&self) -> DVec3 {
        self.vector.normalize_or_zero()
    }

    pub fn is_above_horizon(&self) -> bool {
        self.vector.y > 0.0
    }
}

/// Sunrise and sunset in local solar minutes after midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunriseSunset {
    pub sunrise: i32,
    pub sunset: i32,
}

impl SunriseSunset {
    pub fn day_length_minutes(&self) -> i32 {
        self.sunset - self.sunrise
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaylightWindow {
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}

impl DaylightWindow {
    pub fn contains(&self, t: &DateTime<Utc>) -> bool {
        *t >= self.sunrise && *t <= self.sunset
    }
}

/// Rasterised shadow coverage of the reference ground plane under a building.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowEstimate {
    pub shadow_pixels: usize,
    pub total_pixels: usize,
    pub shadow_area_ratio: f64,
    /// Square metres on the reference plane.
    pub shadow_area: f64,
    pub plane_size: f64,
}

impl ShadowEstimate {
    /// Result for geometry that cannot cast a shadow.
    pub fn empty(resolution: u32, plane_size: f64) -> Self {
        Self {
            shadow_pixels: 0,
            total_pixels: resolution as usize * resolution as usize,
            shadow_area_ratio: 0.0,
            shadow_area: 0.0,
            plane_size,
        }
    }

    pub fn from_counts(shadow_pixels: usize, total_pixels: usize, plane_size: f64) -> Self {
        let shadow_area_ratio = if total_pixels == 0 {
            0.0
        } else {
            shadow_pixels as f64 / total_pixels as f64
        };
        Self {
            shadow_pixels,
            total_pixels,
            shadow_area_ratio,
            shadow_area: shadow_area_ratio * plane_size * plane_size,
            plane_size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPotentialEstimate {
    /// m²
    pub area: f64,
    /// kWh/m²/day
    pub irradiance: f64,
    pub panel_efficiency: f64,
    /// kWh/day
    pub potential: f64,
}

/// What the calculator panel shows for one building at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarAssessment {
    pub potential: SolarPotentialEstimate,
    pub shadow: ShadowEstimate,
    pub daytime: bool,
}
