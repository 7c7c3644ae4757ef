use std::collections::BTreeMap;

use crate::sphere::SphericalPoint;

/// Opaque numeric identifier for a point.
pub type PointId = u64;

/// Ordered collection of points keyed by identifier.
#[derive(Debug, Clone, Default)]
pub struct PointStore {
    points: BTreeMap<PointId, SphericalPoint>,
}

impl PointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a point, overwriting any point already stored under `id`.
    pub fn insert(&mut self, id: PointId, phi: f64, theta: f64) {
        self.points
            .insert(id, SphericalPoint::from_angles(phi, theta));
    }

    /// Remove a point, returning whether it was present.
    pub fn erase(&mut self, id: PointId) -> bool {
        self.points.remove(&id).is_some()
    }

    pub fn contains(&self, id: PointId) -> bool {
        self.points.contains_key(&id)
    }

    pub fn get(&self, id: PointId) -> Option<&SphericalPoint> {
        self.points.get(&id)
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate points in ascending identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (PointId, &SphericalPoint)> + '_ {
        self.points.iter().map(|(id, point)| (*id, point))
    }

    /// Identifiers in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = PointId> + '_ {
        self.points.keys().copied()
    }
}
