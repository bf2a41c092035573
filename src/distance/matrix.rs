//! Dense distance matrix.

use super::haversine_m;
use crate::models::GeoPoint;

/// A dense n×n distance matrix in meters, stored in row-major order.
///
/// Node 0 is the depot; node `i` (1-based) is the `i - 1`th pickup point.
///
/// # Examples
///
/// ```
/// use pickup_routing::distance::DistanceMatrix;
/// use pickup_routing::models::GeoPoint;
///
/// let locations = vec![
///     GeoPoint::new(48.4504, -2.0448),
///     GeoPoint::new(48.4600, -2.0500),
///     GeoPoint::new(48.4400, -2.0300),
/// ];
/// let dm = DistanceMatrix::from_locations(&locations);
/// assert_eq!(dm.size(), 3);
/// assert_eq!(dm.get(1, 1), 0.0);
/// assert_eq!(dm.get(0, 2), dm.get(2, 0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes great-circle distances between every pair of locations.
    ///
    /// Each unordered pair is computed once and mirrored, so the result is
    /// symmetric with a zero diagonal by construction.
    pub fn from_locations(locations: &[GeoPoint]) -> Self {
        let n = locations.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = haversine_m(locations[i], locations[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Creates a distance matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the distance from node `from` to node `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from node `from` to node `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of nodes in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns `true` if every diagonal entry is exactly zero.
    pub fn has_zero_diagonal(&self) -> bool {
        (0..self.size).all(|i| self.get(i, i) == 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_locations() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(48.4504, -2.0448),
            GeoPoint::new(48.4604, -2.0448),
            GeoPoint::new(48.4504, -2.1448),
            GeoPoint::new(48.4504, -2.0448),
        ]
    }

    #[test]
    fn test_from_locations() {
        let dm = DistanceMatrix::from_locations(&sample_locations());
        assert_eq!(dm.size(), 4);
        // 0.01 degree of latitude is about 1.112 km
        assert!((dm.get(0, 1) - 1111.95).abs() < 1.0);
        // coincident depot and point 3
        assert_eq!(dm.get(0, 3), 0.0);
    }

    #[test]
    fn test_symmetric_zero_diagonal() {
        let dm = DistanceMatrix::from_locations(&sample_locations());
        assert!(dm.is_symmetric(0.0));
        assert!(dm.has_zero_diagonal());
    }

    #[test]
    fn test_depot_only() {
        let dm = DistanceMatrix::from_locations(&[GeoPoint::new(10.0, 10.0)]);
        assert_eq!(dm.size(), 1);
        assert_eq!(dm.get(0, 0), 0.0);
    }

    #[test]
    fn test_from_data() {
        let dm = DistanceMatrix::from_data(2, vec![0.0, 5.0, 5.0, 0.0]).expect("valid");
        assert_eq!(dm.get(0, 1), 5.0);
        assert!(DistanceMatrix::from_data(2, vec![0.0, 1.0, 2.0]).is_none());
    }

    #[test]
    fn test_asymmetric_matrix() {
        let mut dm = DistanceMatrix::new(2);
        dm.set(0, 1, 10.0);
        dm.set(1, 0, 15.0);
        assert!(!dm.is_symmetric(1e-10));
    }
}
