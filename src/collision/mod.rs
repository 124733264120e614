use glam::Vec2;

/// Below this distance a circle overlap has no usable normal and is left alone.
const DEGENERATE_DIST: f32 = 0.001;

/// Tree trunk positions, matching the scenery layout.
const TREE_POSITIONS: [[f32; 2]; 28] = [
    [-30.0, -30.0], [-25.0, -35.0], [-35.0, -25.0], [30.0, -30.0], [35.0, -25.0], [25.0, -35.0],
    [-30.0, 30.0], [-35.0, 35.0], [-25.0, 25.0], [30.0, 30.0], [35.0, 25.0], [28.0, 38.0],
    [-40.0, 0.0], [40.0, 5.0], [-10.0, 35.0], [15.0, 38.0], [-38.0, -15.0], [42.0, -20.0],
    [0.0, -35.0], [10.0, -40.0], [-20.0, 40.0], [20.0, -25.0],
    [-42.0, 25.0], [38.0, -38.0], [-15.0, -42.0], [42.0, 42.0], [-42.0, -42.0], [5.0, 42.0],
];

/// Static solid volume on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Collider {
    Circle { x: f32, z: f32, r: f32 },
    /// Axis-aligned box given by its center and half extents.
    Box {
        x: f32,
        z: f32,
        half_width: f32,
        half_depth: f32,
    },
}

impl Collider {
    /// Push `p` out of this collider, expanded by `radius`. Returns `p` unchanged when clear.
    fn push_out(&self, p: Vec2, radius: f32) -> Vec2 {
        match *self {
            Collider::Circle { x, z, r } => {
                let center = Vec2::new(x, z);
                let offset = p - center;
                let dist = offset.length();
                let min_dist = r + radius;
                if dist < min_dist && dist > DEGENERATE_DIST {
                    center + offset / dist * min_dist
                } else {
                    p
                }
            }
            Collider::Box {
                x,
                z,
                half_width,
                half_depth,
            } => {
                let hw = half_width + radius;
                let hd = half_depth + radius;
                let dx = p.x - x;
                let dz = p.y - z;
                if dx.abs() >= hw || dz.abs() >= hd {
                    return p;
                }
                // Shortest way out; a dead-center point exits on the positive side.
                let overlap_x = hw - dx.abs();
                let overlap_z = hd - dz.abs();
                if overlap_x < overlap_z {
                    Vec2::new(x + dx.signum() * hw, p.y)
                } else {
                    Vec2::new(p.x, z + dz.signum() * hd)
                }
            }
        }
    }
}

/// Every static obstacle on the farm, resolved in registration order.
///
/// Each collider is applied once per query against the already-corrected point.
/// Earlier colliders are not re-checked, so a tight corner between two volumes
/// can leave a small residual overlap.
#[derive(Debug, Clone, Default)]
pub struct CollisionField {
    colliders: Vec<Collider>,
}

impl CollisionField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trees, the well, the farmhouse, the barn and its hay bales.
    pub fn farm() -> Self {
        let mut field = Self::new();
        for [x, z] in TREE_POSITIONS {
            field.add(Collider::Circle { x, z, r: 1.0 });
        }
        // Well
        field.add(Collider::Circle { x: 10.0, z: 8.0, r: 1.5 });
        // Farmhouse + porch
        field.add(Collider::Box { x: -15.0, z: -15.0, half_width: 4.5, half_depth: 4.5 });
        // Barn
        field.add(Collider::Box { x: 18.0, z: -12.0, half_width: 5.5, half_depth: 4.5 });
        // Hay bales
        field.add(Collider::Box { x: 24.0, z: -11.0, half_width: 1.5, half_depth: 2.0 });
        field
    }

    pub fn add(&mut self, collider: Collider) {
        self.colliders.push(collider);
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Correct a proposed ground position for an agent of the given radius.
    pub fn resolve(&self, x: f32, z: f32, radius: f32) -> Vec2 {
        self.colliders
            .iter()
            .fold(Vec2::new(x, z), |p, c| c.push_out(p, radius))
    }
}
