//! CPU reference rasterizer.
//!
//! Renders the top-down shadow view exactly instead of through a shadow map:
//! every ground pixel casts a ray toward the light and is darkened when the
//! ray hits the building box.

use glam::DVec3;
use image::{Rgba, RgbaImage};

use crate::error::RenderError;
use crate::raster::{Rasterizer, ShadowScene};

pub const DEFAULT_MAX_DIMENSION: u32 = 8192;

#[derive(Debug, Clone)]
pub struct SoftwareRasterizer {
    /// Fraction of ground brightness removed in shadow.
    pub shadow_strength: f64,
    pub max_dimension: u32,
    live_targets: usize,
    frames_rendered: usize,
}

impl Default for SoftwareRasterizer {
    fn default() -> Self {
        Self {
            shadow_strength: 0.5,
            max_dimension: DEFAULT_MAX_DIMENSION,
            live_targets: 0,
            frames_rendered: 0,
        }
    }
}

impl SoftwareRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shadow_strength(mut self, shadow_strength: f64) -> Self {
        self.shadow_strength = shadow_strength;
        self
    }

    /// Targets allocated and not yet released.
    pub fn live_targets(&self) -> usize {
        self.live_targets
    }

    pub fn frames_rendered(&self) -> usize {
        self.frames_rendered
    }

    fn shade_ground(&self, scene: &ShadowScene, point: DVec3, to_light: DVec3) -> [u8; 3] {
        let base = scene.ground.color;
        let lit = to_light.y > 0.0;
        let blocked = scene.light.cast_shadow
            && scene.ground.receive_shadow
            && lit
            && scene.building.ray_hit(point, to_light).is_some();
        if !blocked {
            return base;
        }
        let k = (1.0 - self.shadow_strength).clamp(0.0, 1.0);
        base.map(|c| (c as f64 * k).round() as u8)
    }
}

impl Rasterizer for SoftwareRasterizer {
    type Target = RgbaImage;

    fn allocate_target(&mut self, width: u32, height: u32) -> Result<RgbaImage, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::new(format!("cannot allocate {width}x{height} target")));
        }
        if width > self.max_dimension || height > self.max_dimension {
            return Err(RenderError::new(format!(
                "{width}x{height} target exceeds the {} pixel limit",
                self.max_dimension
            )));
        }
        self.live_targets += 1;
        log::trace!("allocated {}x{} software target", width, height);
        Ok(RgbaImage::new(width, height))
    }

    fn render(&mut self, scene: &ShadowScene, target: &mut RgbaImage) -> Result<(), RenderError> {
        let (w, h) = target.dimensions();
        let frustum = scene.camera.frustum;
        if !(frustum.width() > 0.0 && frustum.height() > 0.0) {
            return Err(RenderError::new("camera frustum has no area"));
        }
        let eye = scene.camera.position;
        let ground_y = scene.ground.center.y;
        let half_ground = scene.ground.size / 2.0;
        let to_light = scene.light.to_light();
        let px_w = frustum.width() / w as f64;
        let px_h = frustum.height() / h as f64;

        for (i, j, pixel) in target.enumerate_pixels_mut() {
            let x = eye.x + frustum.left + (i as f64 + 0.5) * px_w;
            let z = eye.z + frustum.bottom + (j as f64 + 0.5) * px_h;
            let rgb = if scene.building.footprint_contains(x, z) {
                scene.building_color
            } else if (x - scene.ground.center.x).abs() <= half_ground
                && (z - scene.ground.center.z).abs() <= half_ground
            {
                self.shade_ground(scene, DVec3::new(x, ground_y, z), to_light)
            } else {
                scene.background
            };
            *pixel = Rgba([rgb[0], rgb[1], rgb[2], 255]);
        }
        self.frames_rendered += 1;
        Ok(())
    }

    fn read_pixels(&mut self, target: &RgbaImage) -> Result<Vec<u8>, RenderError> {
        Ok(target.as_raw().clone())
    }

    fn release_target(&mut self, target: RgbaImage) {
        drop(target);
        self.live_targets = self.live_targets.saturating_sub(1);
    }
}
