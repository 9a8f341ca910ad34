//! Zone definitions and the containment predicate.
//!
//! A zone is an immutable named region of world space with a set of typed
//! effect configurations. Zones are produced once by the registry loader and
//! never mutated afterwards.

use glam::Vec3;

use crate::effects::ZoneEffects;

/// Axis-aligned box in world units. Used for particle spawning/wraparound and
/// for the debug view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Spatial extent of a zone.
///
/// `Unknown` keeps the declared kind around for logging and the debug view;
/// it never contains any point.
#[derive(Clone, Debug, PartialEq)]
pub enum ZoneShape {
    Box { min: Vec3, max: Vec3 },
    Sphere { center: Vec3, radius: f32 },
    Unknown { kind: String },
}

impl ZoneShape {
    /// Short name matching the document's `type` field.
    pub fn kind(&self) -> &str {
        match self {
            ZoneShape::Box { .. } => "box",
            ZoneShape::Sphere { .. } => "sphere",
            ZoneShape::Unknown { kind } => kind,
        }
    }

    /// Bounding box of the shape, `None` for unknown shapes.
    pub fn aabb(&self) -> Option<Aabb> {
        match self {
            ZoneShape::Box { min, max } => Some(Aabb::new(*min, *max)),
            ZoneShape::Sphere { center, radius } => {
                let r = Vec3::splat(*radius);
                Some(Aabb::new(*center - r, *center + r))
            }
            ZoneShape::Unknown { .. } => None,
        }
    }

    #[inline]
    pub fn contains(&self, point: Vec3) -> bool {
        match self {
            ZoneShape::Box { min, max } => Aabb::new(*min, *max).contains(point),
            ZoneShape::Sphere { center, radius } => point.distance(*center) <= *radius,
            ZoneShape::Unknown { .. } => false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Zone {
    pub id: String,
    pub shape: ZoneShape,
    pub effects: ZoneEffects,
}

impl Zone {
    #[inline]
    pub fn contains(&self, point: Vec3) -> bool {
        self.shape.contains(point)
    }

    /// Geometric center; hosts use it to place an observer inside a starting
    /// zone. `None` for unknown shapes.
    pub fn center(&self) -> Option<Vec3> {
        match &self.shape {
            ZoneShape::Sphere { center, .. } => Some(*center),
            other => other.aabb().map(|b| b.center()),
        }
    }
}

/// Free-standing form of [`Zone::contains`].
#[inline]
pub fn is_inside(point: Vec3, zone: &Zone) -> bool {
    zone.contains(point)
}
