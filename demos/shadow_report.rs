use chrono::{DateTime, Utc};
use glam::DVec3;

use bipv_solar::config::{EstimatorConfig, SiteConfig};
use bipv_solar::daylight::{clamp_to_daylight, daylight_window, solar_date};
use bipv_solar::ephemeris::{is_daytime, sun_direction_at};
use bipv_solar::estimator::SolarYieldEstimator;
use bipv_solar::geometry::BuildingBounds;
use bipv_solar::raster::{Rasterizer, ShadowScene};
use bipv_solar::software::SoftwareRasterizer;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let site = SiteConfig::default().coordinate();
    let requested: DateTime<Utc> = match std::env::args().nth(1) {
        Some(arg) => DateTime::parse_from_rfc3339(&arg)?.with_timezone(&Utc),
        None => Utc::now(),
    };
    let when = clamp_to_daylight(&requested, &site);
    let window = daylight_window(solar_date(&when, site.longitude), &site);

    let building = BuildingBounds::from_extent(DVec3::new(-5.0, 0.0, -5.0), 10.0, 20.0, 10.0);
    let sun = sun_direction_at(&when, &site);
    let estimator = SolarYieldEstimator::new(EstimatorConfig::default());
    let mut rasterizer = SoftwareRasterizer::new();
    let assessment = estimator.assess(&mut rasterizer, Some(&building), Some(&sun))?;

    println!("=== Building Solar Report ===");
    println!("Location: Ahmedabad ({:.4}°N, {:.4}°E)", site.latitude, site.longitude);
    println!("Requested: {}", requested);
    if when != requested {
        println!("Clamped to daylight: {}", when);
    }
    println!("Sunrise: {}  Sunset: {}", window.sunrise, window.sunset);
    println!("Daytime: {}", is_daytime(&when, site.latitude, site.longitude));
    println!();
    println!("--- Sun ---");
    println!("Altitude: {:.2}°", sun.altitude);
    println!("Hour angle: {:.2}°", sun.hour_angle);
    println!(
        "Direction: ({:.1}, {:.1}, {:.1})",
        sun.vector.x, sun.vector.y, sun.vector.z
    );
    println!();
    println!("--- Building {:.0} x {:.0} x {:.0} m ---", building.width(), building.depth(), building.height());
    println!("Surface area: {:.1} m²", assessment.potential.area);
    println!("Estimated solar potential: {:.2} kWh/day", assessment.potential.potential);
    println!(
        "Shadow: {} / {} px, ratio {:.4}, area {:.2} m²",
        assessment.shadow.shadow_pixels,
        assessment.shadow.total_pixels,
        assessment.shadow.shadow_area_ratio,
        assessment.shadow.shadow_area
    );

    let config = estimator.config().shadow;
    let scene = ShadowScene::new(&building, sun.vector, &config);
    let mut target = rasterizer.allocate_target(config.resolution, config.resolution)?;
    rasterizer.render(&scene, &mut target)?;
    target.save("shadow.png")?;
    rasterizer.release_target(target);
    println!("Shadow view written to shadow.png");

    Ok(())
}
