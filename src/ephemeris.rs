//! Low-precision solar ephemeris.
//!
//! Degree-level accuracy, enough to place a sun light in a city scene. All
//! functions are pure.

use chrono::{DateTime, TimeZone, Timelike, Utc};
use glam::DVec3;

use crate::types::{GeoCoordinate, SolarPosition, SunDirection};

pub const DEGREES_PER_HOUR: f64 = 15.0;
pub const MILLIS_PER_DAY: f64 = 86_400_000.0;
/// Julian date of the Unix epoch.
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;
/// Julian date of J2000.0.
pub const J2000_JD: f64 = 2_451_545.0;
pub const TROPICAL_YEAR_DAYS: f64 = 365.24;
/// Radius of the returned sun vector. Only the direction matters.
pub const SUN_DISTANCE: f64 = 1000.0;

const ANNUAL: f64 = 2.0 * std::f64::consts::PI / TROPICAL_YEAR_DAYS;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

pub fn julian_date<Tz: TimeZone>(dt: &DateTime<Tz>) -> f64 {
    dt.timestamp_millis() as f64 / MILLIS_PER_DAY + UNIX_EPOCH_JD
}

pub fn days_since_j2000(julian_date: f64) -> f64 {
    julian_date - J2000_JD
}

/// Declination in radians for `n` days since J2000.
pub fn solar_declination(n: f64) -> f64 {
    0.39778
        * (ANNUAL * (n + 10.0)
            + (2.0 * std::f64::consts::PI / 360.0) * 0.0167 * (ANNUAL * (n - 2.0)).sin())
        .sin()
}

/// Mean anomaly in degrees.
pub fn mean_anomaly(n: f64) -> f64 {
    357.528 + 0.9856003 * n
}

/// Equation of centre in degrees for mean anomaly `g` (degrees).
pub fn equation_of_center(g: f64) -> f64 {
    let g = deg_to_rad(g);
    1.9148 * g.sin() + 0.02 * (2.0 * g).sin() + 0.0003 * (3.0 * g).sin()
}

pub fn ecliptic_longitude(n: f64) -> f64 {
    280.47 + 0.9856003 * n + equation_of_center(mean_anomaly(n))
}

/// Equation of time in minutes.
pub fn equation_of_time(n: f64) -> f64 {
    -(1789.0 + 237.0 * (ANNUAL * (n + 10.0)).sin()) / 60.0
}

/// Apparent solar time in hours. Seconds of the timestamp are ignored.
pub fn solar_time<Tz: TimeZone>(dt: &DateTime<Tz>, longitude: f64) -> f64 {
    let utc = dt.with_timezone(&Utc);
    let eot = equation_of_time(days_since_j2000(julian_date(&utc)));
    (utc.hour() as f64 * 60.0 + utc.minute() as f64 + eot + 4.0 * longitude) / 60.0
}

pub fn hour_angle(solar_time: f64) -> f64 {
    (solar_time - 12.0) * DEGREES_PER_HOUR
}

/// Altitude in degrees; `declination` in radians, the rest in degrees.
pub fn solar_altitude(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    let lat = deg_to_rad(latitude);
    let ha = deg_to_rad(hour_angle);
    let sin_alt = lat.sin() * declination.sin() + lat.cos() * declination.cos() * ha.cos();
    rad_to_deg(sin_alt.clamp(-1.0, 1.0).asin())
}

/// Spherical to cartesian, y up. The polar angle is the zenith angle
/// `90° - altitude` and the azimuth is `-hour_angle`, so the sun moves
/// east to west as the hour angle grows.
pub fn direction_from_angles(altitude: f64, hour_angle: f64, radius: f64) -> DVec3 {
    let alt = deg_to_rad(altitude);
    let theta = deg_to_rad(-hour_angle);
    let horizontal = radius * alt.cos();
    DVec3::new(horizontal * theta.sin(), radius * alt.sin(), horizontal * theta.cos())
}

fn clamp_latitude(latitude: f64) -> f64 {
    latitude.clamp(-90.0, 90.0)
}

pub fn solar_position<Tz: TimeZone>(
    dt: &DateTime<Tz>,
    latitude: f64,
    longitude: f64,
) -> SolarPosition {
    let latitude = clamp_latitude(latitude);
    let jd = julian_date(dt);
    let n = days_since_j2000(jd);
    let declination = solar_declination(n);
    let g = mean_anomaly(n);
    let st = solar_time(dt, longitude);
    let ha = hour_angle(st);
    SolarPosition {
        julian_date: jd,
        days_since_j2000: n,
        declination,
        mean_anomaly: g,
        equation_of_center: equation_of_center(g),
        ecliptic_longitude: ecliptic_longitude(n),
        equation_of_time: equation_of_time(n),
        solar_time: st,
        hour_angle: ha,
        altitude: solar_altitude(latitude, declination, ha),
    }
}

pub fn sun_direction<Tz: TimeZone>(dt: &DateTime<Tz>, latitude: f64, longitude: f64) -> SunDirection {
    let pos = solar_position(dt, latitude, longitude);
    SunDirection {
        vector: direction_from_angles(pos.altitude, pos.hour_angle, SUN_DISTANCE),
        altitude: pos.altitude,
        azimuth: -pos.hour_angle,
        hour_angle: pos.hour_angle,
    }
}

pub fn sun_direction_at<Tz: TimeZone>(dt: &DateTime<Tz>, site: &GeoCoordinate) -> SunDirection {
    sun_direction(dt, site.latitude, site.longitude)
}

pub fn is_daytime<Tz: TimeZone>(dt: &DateTime<Tz>, latitude: f64, longitude: f64) -> bool {
    sun_direction(dt, latitude, longitude).vector.y > 0.0
}
