use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Silhouette of a gummy. Physics treats every kind as a circle of the particle radius;
/// the outline only drives hit testing and rendering.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Circle = 0,
    Square = 1,
    Pencil = 2,
    Heart = 3,
    Bag = 4,
    Calendar = 5,
    Folder = 6,
    Book = 7,
    Briefcase = 8,
    Plane = 9,
    Car = 10,
    Game = 11,
    Bed = 12,
    Hospital = 13,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 14] = [
        ShapeKind::Circle,
        ShapeKind::Square,
        ShapeKind::Pencil,
        ShapeKind::Heart,
        ShapeKind::Bag,
        ShapeKind::Calendar,
        ShapeKind::Folder,
        ShapeKind::Book,
        ShapeKind::Briefcase,
        ShapeKind::Plane,
        ShapeKind::Car,
        ShapeKind::Game,
        ShapeKind::Bed,
        ShapeKind::Hospital,
    ];

    /// Lenient lookup: unknown tags become circles.
    pub fn from_tag(tag: &str) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str().eq_ignore_ascii_case(tag.trim()))
            .unwrap_or(ShapeKind::Circle)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Square => "square",
            ShapeKind::Pencil => "pencil",
            ShapeKind::Heart => "heart",
            ShapeKind::Bag => "bag",
            ShapeKind::Calendar => "calendar",
            ShapeKind::Folder => "folder",
            ShapeKind::Book => "book",
            ShapeKind::Briefcase => "briefcase",
            ShapeKind::Plane => "plane",
            ShapeKind::Car => "car",
            ShapeKind::Game => "game",
            ShapeKind::Bed => "bed",
            ShapeKind::Hospital => "hospital",
        }
    }

    /// Circles are rotation-invariant, everything else visibly spins.
    pub fn spins(self) -> bool {
        self != ShapeKind::Circle
    }

    /// Angular velocity a freshly spawned gummy starts with, given a uniform sample in [0, 1).
    pub fn spawn_spin(self, u: f32) -> f32 {
        match self {
            ShapeKind::Pencil => (u - 0.5) * 0.1,
            _ => 0.0,
        }
    }

    /// Outline polygon in local space (unrotated, centered on the particle).
    /// Empty for circles.
    pub fn outline(self, radius: f32) -> Vec<Vec2> {
        let r = radius;
        match self {
            ShapeKind::Circle => Vec::new(),
            ShapeKind::Square => rect(r * 1.6, r * 1.6),
            ShapeKind::Calendar => rect(r * 1.8, r * 1.8),
            ShapeKind::Folder => rect(r * 2.4, r * 1.8),
            ShapeKind::Book => rect(r * 2.0, r * 2.6),
            ShapeKind::Briefcase => rect(r * 2.8, r * 2.0),
            ShapeKind::Car => rect(r * 3.0, r * 1.8),
            ShapeKind::Game => rect(r * 2.4, r * 1.6),
            ShapeKind::Bed => rect(r * 3.2, r * 2.0),
            ShapeKind::Pencil => {
                let len = r * 3.2;
                let width = r * 0.9;
                let tip = width * 0.9;
                vec![
                    Vec2::new(-len / 2.0, -width / 2.0),
                    Vec2::new(len / 2.0, -width / 2.0),
                    Vec2::new(len / 2.0 + tip, 0.0),
                    Vec2::new(len / 2.0, width / 2.0),
                    Vec2::new(-len / 2.0, width / 2.0),
                ]
            }
            ShapeKind::Bag => {
                let w = r * 2.2;
                let h = r * 1.6;
                vec![
                    Vec2::new(-w / 2.0, h / 2.0),
                    Vec2::new(-w / 2.0, -h / 2.0),
                    Vec2::new(-w * 0.3, -h / 2.0),
                    Vec2::new(-w * 0.25, -h * 0.8),
                    Vec2::new(w * 0.25, -h * 0.8),
                    Vec2::new(w * 0.3, -h / 2.0),
                    Vec2::new(w / 2.0, -h / 2.0),
                    Vec2::new(w / 2.0, h / 2.0),
                ]
            }
            ShapeKind::Heart => {
                let s = r * 1.6;
                vec![
                    Vec2::new(0.0, s * 0.3),
                    Vec2::new(-s * 0.7, -s * 0.7),
                    Vec2::new(s * 0.7, -s * 0.7),
                ]
            }
            ShapeKind::Plane => {
                let s = r * 2.5;
                vec![
                    Vec2::new(-s * 0.5, 0.0),
                    Vec2::new(-s * 0.2, -s * 0.15),
                    Vec2::new(s * 0.5, -s * 0.2),
                    Vec2::new(s * 0.5, s * 0.2),
                    Vec2::new(-s * 0.2, s * 0.15),
                ]
            }
            ShapeKind::Hospital => {
                let s = r * 1.8;
                let (a, b) = (s * 0.3, s * 0.9);
                vec![
                    Vec2::new(-a, -b),
                    Vec2::new(a, -b),
                    Vec2::new(a, -a),
                    Vec2::new(b, -a),
                    Vec2::new(b, a),
                    Vec2::new(a, a),
                    Vec2::new(a, b),
                    Vec2::new(-a, b),
                    Vec2::new(-a, a),
                    Vec2::new(-b, a),
                    Vec2::new(-b, -a),
                    Vec2::new(-a, -a),
                ]
            }
        }
    }

    /// Point-in-shape test for a point already in local (unrotated) coordinates.
    pub fn contains(self, local: Vec2, radius: f32) -> bool {
        match self {
            ShapeKind::Circle => local.length_squared() <= radius * radius,
            _ => point_in_polygon(&self.outline(radius), local),
        }
    }

    /// Half width / half height of the local bounding box.
    pub fn half_extents(self, radius: f32) -> Vec2 {
        let outline = self.outline(radius);
        if outline.is_empty() {
            return Vec2::splat(radius);
        }
        outline
            .iter()
            .fold(Vec2::ZERO, |acc, v| acc.max(v.abs()))
    }

    /// Area of the silhouette (shoelace for polygons).
    pub fn area(self, radius: f32) -> f32 {
        let outline = self.outline(radius);
        if outline.is_empty() {
            return std::f32::consts::PI * radius * radius;
        }
        let n = outline.len();
        let twice: f32 = (0..n)
            .map(|i| outline[i].perp_dot(outline[(i + 1) % n]))
            .sum();
        twice.abs() * 0.5
    }
}

fn rect(w: f32, h: f32) -> Vec<Vec2> {
    vec![
        Vec2::new(-w / 2.0, -h / 2.0),
        Vec2::new(w / 2.0, -h / 2.0),
        Vec2::new(w / 2.0, h / 2.0),
        Vec2::new(-w / 2.0, h / 2.0),
    ]
}

/// Even-odd ray casting.
fn point_in_polygon(vertices: &[Vec2], p: Vec2) -> bool {
    let mut inside = false;
    let n = vertices.len();
    if n < 3 {
        return false;
    }
    let mut j = n - 1;
    for i in 0..n {
        let (vi, vj) = (vertices[i], vertices[j]);
        if (vi.y > p.y) != (vj.y > p.y) && p.x < (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}
