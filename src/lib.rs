pub mod config;
pub mod daylight;
pub mod ephemeris;
pub mod error;
pub mod estimator;
pub mod geometry;
pub mod raster;
pub mod software;
pub mod types;

pub use config::{EstimatorConfig, ShadowConfig, SiteConfig};

pub use daylight::{
    clamp_to_daylight, daylight_window, estimate_sunrise_sunset, minutes_to_time, solar_date,
    time_to_minutes,
};

pub use ephemeris::{
    days_since_j2000, deg_to_rad, direction_from_angles, equation_of_time, hour_angle,
    is_daytime, julian_date, normalize_angle, rad_to_deg, solar_altitude, solar_declination,
    solar_position, solar_time, sun_direction, sun_direction_at, SUN_DISTANCE,
};

pub use error::{Error, RenderError, Result};

pub use estimator::{
    estimate_potential, estimate_shadow_area, estimate_surface_area, SolarYieldEstimator,
};

pub use geometry::{BuildingBounds, MeshSource, TriangleMesh};

pub use raster::{classify_shadow_pixels, Rasterizer, RenderSession, ShadowScene};

pub use software::SoftwareRasterizer;

pub use types::{
    DaylightWindow, GeoCoordinate, ShadowEstimate, SolarAssessment, SolarPosition,
    SolarPotentialEstimate, SunDirection, SunriseSunset,
};
