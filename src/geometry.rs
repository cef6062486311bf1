//! Building geometry snapshots

use glam::DVec3;

/// Axis-aligned bounds of a building mesh in world coordinates, y up.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BuildingBounds {
    pub min: DVec3,
    pub max: DVec3,
}

impl BuildingBounds {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Bounds of a box standing on the ground at `origin` (its min corner).
    pub fn from_extent(origin: DVec3, width: f64, height: f64, depth: f64) -> Self {
        Self {
            min: origin,
            max: origin + DVec3::new(width, height, depth),
        }
    }

    /// Smallest bounds containing every point; `None` for an empty set.
    pub fn from_points(points: &[DVec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Self::new(*first, *first);
        for p in rest {
            bounds.expand(*p);
        }
        Some(bounds)
    }

    pub fn expand(&mut self, point: DVec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Extent along x.
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Extent along y.
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Extent along z.
    pub fn depth(&self) -> f64 {
        self.max.z - self.min.z
    }

    /// True when any extent is zero, negative or not finite.
    pub fn is_degenerate(&self) -> bool {
        let size = self.size();
        !size.is_finite() || size.min_element() <= 0.0
    }

    pub fn translated(&self, offset: DVec3) -> Self {
        Self::new(self.min + offset, self.max + offset)
    }

    /// Scale about the min corner.
    pub fn scaled(&self, k: f64) -> Self {
        Self::new(self.min, self.min + self.size() * k)
    }

    /// Whether `(x, z)` lies on the footprint.
    pub fn footprint_contains(&self, x: f64, z: f64) -> bool {
        x >= self.min.x && x <= self.max.x && z >= self.min.z && z <= self.max.z
    }

    /// Smallest `t > 0` at which `origin + t * dir` enters the box.
    pub fn ray_hit(&self, origin: DVec3, dir: DVec3) -> Option<f64> {
        let mut t_near = f64::NEG_INFINITY;
        let mut t_far = f64::INFINITY;
        for axis in 0..3 {
            let (o, d, lo, hi) = (origin[axis], dir[axis], self.min[axis], self.max[axis]);
            if d.abs() < 1e-12 {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let (mut t0, mut t1) = ((lo - o) / d, (hi - o) / d);
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_near = t_near.max(t0);
            t_far = t_far.min(t1);
            if t_near > t_far {
                return None;
            }
        }
        if t_far <= 0.0 {
            return None;
        }
        Some(t_near.max(0.0))
    }
}

/// Non-indexed triangle soup, three vertices per triangle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriangleMesh {
    pub positions: Vec<DVec3>,
}

impl TriangleMesh {
    pub fn new(positions: Vec<DVec3>) -> Self {
        Self { positions }
    }

    /// Twelve-triangle closed box matching `bounds`.
    pub fn from_bounds(bounds: &BuildingBounds) -> Self {
        let (a, b) = (bounds.min, bounds.max);
        let c = |x: f64, y: f64, z: f64| DVec3::new(x, y, z);
        let quads = [
            [c(a.x, a.y, a.z), c(b.x, a.y, a.z), c(b.x, a.y, b.z), c(a.x, a.y, b.z)],
            [c(a.x, b.y, a.z), c(a.x, b.y, b.z), c(b.x, b.y, b.z), c(b.x, b.y, a.z)],
            [c(a.x, a.y, a.z), c(a.x, b.y, a.z), c(b.x, b.y, a.z), c(b.x, a.y, a.z)],
            [c(a.x, a.y, b.z), c(b.x, a.y, b.z), c(b.x, b.y, b.z), c(a.x, b.y, b.z)],
            [c(a.x, a.y, a.z), c(a.x, a.y, b.z), c(a.x, b.y, b.z), c(a.x, b.y, a.z)],
            [c(b.x, a.y, a.z), c(b.x, b.y, a.z), c(b.x, b.y, b.z), c(b.x, a.y, b.z)],
        ];
        let positions = quads
            .iter()
            .flat_map(|q| [q[0], q[1], q[2], q[0], q[2], q[3]])
            .collect();
        Self { positions }
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Sum of triangle areas. Trailing vertices that do not form a full
    /// triangle are ignored.
    pub fn surface_area(&self) -> f64 {
        self.positions
            .chunks_exact(3)
            .map(|t| (t[1] - t[0]).cross(t[2] - t[0]).length() * 0.5)
            .sum()
    }
}

/// Supplies a building's bounds on demand. `None` means the building is no
/// longer placed in the scene.
pub trait MeshSource {
    fn bounding_box(&self) -> Option<BuildingBounds>;
}

impl MeshSource for BuildingBounds {
    fn bounding_box(&self) -> Option<BuildingBounds> {
        Some(*self)
    }
}

impl MeshSource for TriangleMesh {
    fn bounding_box(&self) -> Option<BuildingBounds> {
        BuildingBounds::from_points(&self.positions)
    }
}

impl<T: MeshSource> MeshSource for Option<T> {
    fn bounding_box(&self) -> Option<BuildingBounds> {
        self.as_ref().and_then(|m| m.bounding_box())
    }
}
