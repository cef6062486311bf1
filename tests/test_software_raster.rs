use bipv_solar::config::ShadowConfig;
use bipv_solar::geometry::BuildingBounds;
use bipv_solar::raster::{classify_shadow_pixels, Rasterizer, RenderSession, ShadowScene};
use bipv_solar::software::SoftwareRasterizer;
use glam::DVec3;

fn tower() -> BuildingBounds {
    BuildingBounds::new(DVec3::new(-5.0, 0.0, -5.0), DVec3::new(5.0, 20.0, 5.0))
}

fn config() -> ShadowConfig {
    ShadowConfig {
        resolution: 64,
        ..ShadowConfig::default()
    }
}

fn render(rasterizer: &mut SoftwareRasterizer, scene: &ShadowScene) -> Vec<u8> {
    let mut session = RenderSession::open(rasterizer, 64, 64).unwrap();
    session.render(scene).unwrap();
    session.read_pixels().unwrap()
}

fn pixel(buf: &[u8], i: usize, j: usize) -> [u8; 4] {
    let k = (j * 64 + i) * 4;
    [buf[k], buf[k + 1], buf[k + 2], buf[k + 3]]
}

// ── Layout ──

#[test]
fn test_roof_and_lit_ground_colours() {
    let mut r = SoftwareRasterizer::new();
    let scene = ShadowScene::new(&tower(), DVec3::Y, &config());
    let buf = render(&mut r, &scene);
    assert_eq!(pixel(&buf, 32, 32), [128, 128, 128, 255]);
    assert_eq!(pixel(&buf, 2, 2), [255, 255, 255, 255]);
    assert_eq!(r.live_targets(), 0);
}

#[test]
fn test_shadow_falls_away_from_sun() {
    let mut r = SoftwareRasterizer::new();
    let scene = ShadowScene::new(&tower(), DVec3::new(1.0, 1.0, 0.0), &config());
    let buf = render(&mut r, &scene);
    // column 4 is x ≈ -8.6 on the side away from the sun
    assert_eq!(pixel(&buf, 4, 32), [128, 128, 128, 255]);
    assert_eq!(pixel(&buf, 60, 32), [255, 255, 255, 255]);
    assert_eq!(pixel(&buf, 4, 2), [255, 255, 255, 255]);
}

#[test]
fn test_shadow_strength_controls_darkness() {
    let mut r = SoftwareRasterizer::new().with_shadow_strength(0.02);
    let scene = ShadowScene::new(&tower(), DVec3::new(1.0, 1.0, 0.0), &config());
    let buf = render(&mut r, &scene);
    // faint shadow stays above the near-white threshold
    assert_eq!(pixel(&buf, 4, 32), [250, 250, 250, 255]);
    assert_eq!(classify_shadow_pixels(&buf, 240), 32 * 32);
}

#[test]
fn test_disabled_shadow_casting() {
    let mut r = SoftwareRasterizer::new();
    let mut scene = ShadowScene::new(&tower(), DVec3::new(1.0, 1.0, 0.0), &config());
    scene.light.cast_shadow = false;
    let buf = render(&mut r, &scene);
    assert_eq!(classify_shadow_pixels(&buf, 240), 32 * 32);
}

#[test]
fn test_allocate_limits() {
    let mut r = SoftwareRasterizer::new();
    assert!(r.allocate_target(0, 0).is_err());
    assert!(r.allocate_target(9000, 16).is_err());
    let t = r.allocate_target(16, 16).unwrap();
    assert_eq!(t.dimensions(), (16, 16));
    r.release_target(t);
    assert_eq!(r.live_targets(), 0);
}
