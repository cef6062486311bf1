//! Building solar yield and shadow estimation.

use crate::config::{EstimatorConfig, ShadowConfig};
use crate::error::{Error, Result};
use crate::geometry::{BuildingBounds, MeshSource};
use crate::raster::{classify_shadow_pixels, Rasterizer, RenderSession, ShadowScene};
use crate::types::{ShadowEstimate, SolarAssessment, SolarPotentialEstimate, SunDirection};

/// Roof plus four walls of the bounding box, in m².
///
/// Treats the building as a single box regardless of mesh concavity.
/// Degenerate bounds give 0.
pub fn estimate_surface_area(bounds: &BuildingBounds) -> f64 {
    if bounds.is_degenerate() {
        return 0.0;
    }
    let (w, h, d) = (bounds.width(), bounds.height(), bounds.depth());
    let roof = w * d;
    let walls = 2.0 * (w * h + d * h);
    roof + walls
}

/// Daily yield in kWh.
pub fn estimate_potential(area: f64, irradiance: f64, panel_efficiency: f64) -> f64 {
    area * irradiance * panel_efficiency
}

/// Rasterised shadow coverage of the reference plane under `bounds`.
///
/// Degenerate bounds and a sun at or below the horizon give an empty estimate
/// without rendering. Backend failures come back as
/// [`Error::RenderUnavailable`]; the render target is released either way.
pub fn estimate_shadow_area<R: Rasterizer>(
    rasterizer: &mut R,
    bounds: &BuildingBounds,
    sun: &SunDirection,
    config: &ShadowConfig,
) -> Result<ShadowEstimate> {
    if bounds.is_degenerate() {
        log::warn!("degenerate building bounds {:?}, skipping shadow estimate", bounds);
        return Ok(ShadowEstimate::empty(config.resolution, 0.0));
    }
    let plane_size = ShadowScene::plane_size(bounds);
    if !sun.is_above_horizon() {
        log::debug!("sun below horizon (altitude {:.2}°), no cast shadow", sun.altitude);
        return Ok(ShadowEstimate::empty(config.resolution, plane_size));
    }

    let scene = ShadowScene::new(bounds, sun.vector, config);
    let pixels = {
        let mut session = RenderSession::open(rasterizer, config.resolution, config.resolution)?;
        session.render(&scene)?;
        session.read_pixels()?
    };

    let total = config.resolution as usize * config.resolution as usize;
    let shadow_pixels = classify_shadow_pixels(&pixels, config.threshold);
    let estimate = ShadowEstimate::from_counts(shadow_pixels, total, plane_size);
    log::debug!(
        "shadow estimate: {} of {} pixels, ratio {:.4}, area {:.2} m²",
        estimate.shadow_pixels,
        estimate.total_pixels,
        estimate.shadow_area_ratio,
        estimate.shadow_area
    );
    Ok(estimate)
}

/// Configured entry point for the calculator flow.
#[derive(Debug, Clone, Default)]
pub struct SolarYieldEstimator {
    config: EstimatorConfig,
}

impl SolarYieldEstimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub fn surface_area(&self, bounds: &BuildingBounds) -> f64 {
        estimate_surface_area(bounds)
    }

    pub fn potential(&self, bounds: &BuildingBounds) -> SolarPotentialEstimate {
        let area = estimate_surface_area(bounds);
        SolarPotentialEstimate {
            area,
            irradiance: self.config.irradiance,
            panel_efficiency: self.config.panel_efficiency,
            potential: estimate_potential(area, self.config.irradiance, self.config.panel_efficiency),
        }
    }

    pub fn shadow<R, S>(
        &self,
        rasterizer: &mut R,
        building: Option<&S>,
        sun: Option<&SunDirection>,
    ) -> Result<ShadowEstimate>
    where
        R: Rasterizer,
        S: MeshSource + ?Sized,
    {
        let (bounds, sun) = selection(building, sun)?;
        estimate_shadow_area(rasterizer, &bounds, sun, &self.config.shadow)
    }

    pub fn assess<R, S>(
        &self,
        rasterizer: &mut R,
        building: Option<&S>,
        sun: Option<&SunDirection>,
    ) -> Result<SolarAssessment>
    where
        R: Rasterizer,
        S: MeshSource + ?Sized,
    {
        let (bounds, sun) = selection(building, sun)?;
        let shadow = estimate_shadow_area(rasterizer, &bounds, sun, &self.config.shadow)?;
        Ok(SolarAssessment {
            potential: self.potential(&bounds),
            shadow,
            daytime: sun.is_above_horizon(),
        })
    }
}

fn selection<'s, S: MeshSource + ?Sized>(
    building: Option<&S>,
    sun: Option<&'s SunDirection>,
) -> Result<(BuildingBounds, &'s SunDirection)> {
    let sun = sun.ok_or(Error::NoSelection)?;
    let bounds = building.and_then(|b| b.bounding_box()).ok_or_else(|| {
        log::info!("building is not placed, shadow estimate not computable");
        Error::NoSelection
    })?;
    Ok((bounds, sun))
}
