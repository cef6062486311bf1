//! Rasterizer capability used by the shadow estimate.
//!
//! The estimator only describes the scene and classifies the pixels it gets
//! back; any backend that can draw a box, a ground plane and one shadowing
//! directional light into an offscreen RGBA target fits behind [`Rasterizer`].

use glam::DVec3;

use crate::config::ShadowConfig;
use crate::error::RenderError;
use crate::geometry::BuildingBounds;

pub const BYTES_PER_PIXEL: usize = 4;

/// Parallel projection volume, in the owning camera's view space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoFrustum {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub near: f64,
    pub far: f64,
}

impl OrthoFrustum {
    pub fn square(half_extent: f64, near: f64, far: f64) -> Self {
        Self {
            left: -half_extent,
            right: half_extent,
            top: half_extent,
            bottom: -half_extent,
            near,
            far,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }
}

/// Horizontal square facing up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundPlane {
    pub center: DVec3,
    pub size: f64,
    pub color: [u8; 3],
    pub receive_shadow: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub position: DVec3,
    pub target: DVec3,
    pub cast_shadow: bool,
    pub shadow_map_size: u32,
    pub shadow_frustum: OrthoFrustum,
}

impl DirectionalLight {
    /// Unit vector from the lit surface toward the light.
    pub fn to_light(&self) -> DVec3 {
        (self.position - self.target).normalize_or_zero()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthographicCamera {
    pub position: DVec3,
    pub look_at: DVec3,
    pub frustum: OrthoFrustum,
}

/// Everything one shadow render needs. Owned by a single estimate and
/// dropped with it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowScene {
    pub building: BuildingBounds,
    pub building_color: [u8; 3],
    pub ground: GroundPlane,
    pub light: DirectionalLight,
    pub camera: OrthographicCamera,
    pub background: [u8; 3],
}

impl ShadowScene {
    /// Reference plane edge for a building: twice its larger horizontal extent.
    pub fn plane_size(bounds: &BuildingBounds) -> f64 {
        2.0 * bounds.width().max(bounds.depth())
    }

    /// Isolated scene around `bounds` lit from `to_sun` (any length).
    pub fn new(bounds: &BuildingBounds, to_sun: DVec3, config: &ShadowConfig) -> Self {
        let plane_size = Self::plane_size(bounds);
        let half = plane_size / 2.0;
        let center = bounds.center();
        let ground_center = DVec3::new(center.x, bounds.min.y, center.z);
        let camera_height = bounds.height() + plane_size;

        Self {
            building: *bounds,
            building_color: config.building_color,
            ground: GroundPlane {
                center: ground_center,
                size: plane_size,
                color: config.ground_color,
                receive_shadow: true,
            },
            light: DirectionalLight {
                position: center + to_sun.normalize_or_zero() * config.light_distance,
                target: center,
                cast_shadow: true,
                shadow_map_size: config.resolution,
                shadow_frustum: OrthoFrustum::square(half, config.near, config.far),
            },
            camera: OrthographicCamera {
                position: ground_center + DVec3::Y * camera_height,
                look_at: ground_center,
                frustum: OrthoFrustum::square(half, config.near, camera_height + config.near),
            },
            background: [255, 255, 255],
        }
    }
}

/// Offscreen rendering backend.
pub trait Rasterizer {
    type Target;

    fn allocate_target(&mut self, width: u32, height: u32) -> Result<Self::Target, RenderError>;

    fn render(&mut self, scene: &ShadowScene, target: &mut Self::Target) -> Result<(), RenderError>;

    /// Row-major RGBA8, `4 * width * height` bytes.
    fn read_pixels(&mut self, target: &Self::Target) -> Result<Vec<u8>, RenderError>;

    fn release_target(&mut self, target: Self::Target);
}

/// One offscreen target borrowed from a rasterizer for a single estimate.
/// The target is released when the session drops, on every exit path.
pub struct RenderSession<'a, R: Rasterizer> {
    rasterizer: &'a mut R,
    target: Option<R::Target>,
    width: u32,
    height: u32,
}

impl<'a, R: Rasterizer> RenderSession<'a, R> {
    pub fn open(rasterizer: &'a mut R, width: u32, height: u32) -> Result<Self, RenderError> {
        let target = rasterizer.allocate_target(width, height)?;
        Ok(Self {
            rasterizer,
            target: Some(target),
            width,
            height,
        })
    }

    pub fn render(&mut self, scene: &ShadowScene) -> Result<(), RenderError> {
        let target = self
            .target
            .as_mut()
            .ok_or_else(|| RenderError::new("render target already released"))?;
        self.rasterizer.render(scene, target)
    }

    pub fn read_pixels(&mut self) -> Result<Vec<u8>, RenderError> {
        let target = self
            .target
            .as_ref()
            .ok_or_else(|| RenderError::new("render target already released"))?;
        let pixels = self.rasterizer.read_pixels(target)?;
        let expected = self.width as usize * self.height as usize * BYTES_PER_PIXEL;
        if pixels.len() != expected {
            return Err(RenderError::new(format!(
                "readback returned {} bytes, expected {}",
                pixels.len(),
                expected
            )));
        }
        Ok(pixels)
    }
}

impl<R: Rasterizer> Drop for RenderSession<'_, R> {
    fn drop(&mut self) {
        if let Some(target) = self.target.take() {
            self.rasterizer.release_target(target);
        }
    }
}

/// Number of RGBA pixels with any colour channel below `threshold`.
/// Alpha is ignored.
pub fn classify_shadow_pixels(rgba: &[u8], threshold: u8) -> usize {
    rgba.chunks_exact(BYTES_PER_PIXEL)
        .filter(|px| px[0] < threshold || px[1] < threshold || px[2] < threshold)
        .count()
}
