use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::ephemeris;
use crate::types::{DaylightWindow, GeoCoordinate, SunriseSunset};

pub const SOLAR_NOON_MINUTES: i32 = 720;
pub const MINUTES_PER_DAY: i32 = 1440;

pub fn minutes_to_time(total_minutes: i32) -> (i32, i32) {
    (total_minutes / 60, total_minutes % 60)
}

pub fn time_to_minutes(time: (i32, i32)) -> i32 {
    time.0 * 60 + time.1
}

/// Sunrise and sunset in local solar minutes; `declination` in radians.
///
/// Polar night collapses to solar noon, polar day spans the whole day.
pub fn estimate_sunrise_sunset(latitude: f64, declination: f64) -> SunriseSunset {
    let lat_rad = ephemeris::deg_to_rad(latitude.clamp(-90.0, 90.0));
    let cos_h = -lat_rad.tan() * declination.tan();

    if cos_h >= 1.0 {
        SunriseSunset {
            sunrise: SOLAR_NOON_MINUTES,
            sunset: SOLAR_NOON_MINUTES,
        }
    } else if cos_h <= -1.0 {
        SunriseSunset {
            sunrise: 0,
            sunset: MINUTES_PER_DAY,
        }
    } else {
        let h_deg = ephemeris::rad_to_deg(cos_h.acos());
        let half_day_minutes = h_deg / ephemeris::DEGREES_PER_HOUR * 60.0;
        SunriseSunset {
            sunrise: (SOLAR_NOON_MINUTES as f64 - half_day_minutes).ceil() as i32,
            sunset: (SOLAR_NOON_MINUTES as f64 + half_day_minutes).floor() as i32,
        }
    }
}

/// Calendar date at the observer's meridian (mean solar time).
pub fn solar_date<Tz: TimeZone>(dt: &DateTime<Tz>, longitude: f64) -> NaiveDate {
    let shift = Duration::seconds((4.0 * longitude * 60.0).round() as i64);
    (dt.with_timezone(&Utc) + shift).date_naive()
}

/// Sunrise and sunset of the solar day `date` as UTC instants.
///
/// Declination and equation of time are taken at mean solar noon.
pub fn daylight_window(date: NaiveDate, site: &GeoCoordinate) -> DaylightWindow {
    let midnight = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
    let noon = midnight
        + Duration::seconds(((SOLAR_NOON_MINUTES as f64 - 4.0 * site.longitude) * 60.0).round() as i64);
    let n = ephemeris::days_since_j2000(ephemeris::julian_date(&noon));
    let ss = estimate_sunrise_sunset(site.latitude, ephemeris::solar_declination(n));
    let offset = ephemeris::equation_of_time(n) + 4.0 * site.longitude;
    let to_utc = |solar_minutes: i32| {
        let seconds = ((solar_minutes as f64 - offset) * 60.0).round() as i64;
        midnight + Duration::seconds(seconds)
    };
    DaylightWindow {
        sunrise: to_utc(ss.sunrise),
        sunset: to_utc(ss.sunset),
    }
}

/// Snaps a chosen time into the daylight window of its solar day.
pub fn clamp_to_daylight<Tz: TimeZone>(dt: &DateTime<Tz>, site: &GeoCoordinate) -> DateTime<Utc> {
    let utc = dt.with_timezone(&Utc);
    let window = daylight_window(solar_date(&utc, site.longitude), site);
    if utc < window.sunrise {
        log::debug!("{} is before sunrise, using {}", utc, window.sunrise);
        window.sunrise
    } else if utc > window.sunset {
        log::debug!("{} is after sunset, using {}", utc, window.sunset);
        window.sunset
    } else {
        utc
    }
}
