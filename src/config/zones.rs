//! Zone distance matrix and proximity threshold.
//!
//! Zones are geographic groupings numbered `0..N`. The matrix holds a
//! non-negative separation for every ordered pair; it need not be
//! symmetric, so a lookup always reads the row of the first ("self") zone.

use serde::{Deserialize, Serialize};

use crate::error::{StaffError, StaffResult};

/// Zone identifier (row/column index into the distance matrix).
pub type ZoneId = usize;

/// N x N zone distance matrix with a proximity threshold.
///
/// Zone `a` is proximate to zone `b` iff `distance(a, b) <= threshold`.
/// Read-only once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneMatrix {
    /// Distances: `distances[from][to]`.
    distances: Vec<Vec<u32>>,
    /// Largest distance still considered proximate.
    pub proximate_zone_distance: u32,
}

impl ZoneMatrix {
    /// Creates a matrix from square rows.
    ///
    /// Fails if any row length differs from the row count.
    pub fn new(distances: Vec<Vec<u32>>, proximate_zone_distance: u32) -> StaffResult<Self> {
        let n = distances.len();
        if let Some((i, row)) = distances.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(StaffError::InvalidZoneMatrix(format!(
                "row {} has {} columns, expected {}",
                i,
                row.len(),
                n
            )));
        }
        Ok(Self {
            distances,
            proximate_zone_distance,
        })
    }

    /// Creates a matrix from signed cells, rejecting negative distances.
    pub fn from_signed(distances: Vec<Vec<i64>>, proximate_zone_distance: i64) -> StaffResult<Self> {
        let threshold = u32::try_from(proximate_zone_distance).map_err(|_| {
            StaffError::InvalidZoneMatrix(format!(
                "proximate zone distance {} is not a non-negative integer",
                proximate_zone_distance
            ))
        })?;

        let mut rows = Vec::with_capacity(distances.len());
        for (i, row) in distances.into_iter().enumerate() {
            let mut converted = Vec::with_capacity(row.len());
            for (j, d) in row.into_iter().enumerate() {
                let d = u32::try_from(d).map_err(|_| {
                    StaffError::InvalidZoneMatrix(format!(
                        "distance[{}][{}] = {} is not a non-negative integer",
                        i, j, d
                    ))
                })?;
                converted.push(d);
            }
            rows.push(converted);
        }

        Self::new(rows, threshold)
    }

    /// Number of zones.
    pub fn zone_count(&self) -> usize {
        self.distances.len()
    }

    /// Whether `zone` indexes a row of the matrix.
    #[inline]
    pub fn contains(&self, zone: ZoneId) -> bool {
        zone < self.distances.len()
    }

    /// Distance from `from` to `to`, read from `from`'s row.
    pub fn distance(&self, from: ZoneId, to: ZoneId) -> StaffResult<u32> {
        let zone_count = self.zone_count();
        let row = self.distances.get(from).ok_or(StaffError::ZoneOutOfRange {
            zone: from,
            zone_count,
        })?;
        row.get(to).copied().ok_or(StaffError::ZoneOutOfRange {
            zone: to,
            zone_count,
        })
    }

    /// Whether `to` lies within the threshold of `from`.
    pub fn is_proximate(&self, from: ZoneId, to: ZoneId) -> StaffResult<bool> {
        Ok(self.distance(from, to)? <= self.proximate_zone_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ZoneMatrix {
        ZoneMatrix::new(vec![vec![0, 1, 5], vec![1, 0, 2], vec![4, 2, 0]], 1).unwrap()
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let m = sample();
        assert!(m.is_proximate(0, 0).unwrap());
        assert!(m.is_proximate(0, 1).unwrap());
        assert!(!m.is_proximate(0, 2).unwrap());
        assert!(!m.is_proximate(1, 2).unwrap());
    }

    #[test]
    fn test_lookup_uses_first_zone_row() {
        let m = ZoneMatrix::new(vec![vec![0, 1], vec![9, 0]], 1).unwrap();
        assert!(m.is_proximate(0, 1).unwrap());
        assert!(!m.is_proximate(1, 0).unwrap());
    }

    #[test]
    fn test_out_of_range() {
        let m = sample();
        assert!(matches!(
            m.distance(3, 0),
            Err(StaffError::ZoneOutOfRange { zone: 3, zone_count: 3 })
        ));
        assert!(matches!(
            m.is_proximate(0, 10),
            Err(StaffError::ZoneOutOfRange { zone: 10, .. })
        ));
    }

    #[test]
    fn test_non_square_rejected() {
        let result = ZoneMatrix::new(vec![vec![0, 1], vec![1]], 1);
        assert!(matches!(result, Err(StaffError::InvalidZoneMatrix(_))));
    }

    #[test]
    fn test_from_signed_rejects_negative() {
        assert!(ZoneMatrix::from_signed(vec![vec![0, -1], vec![1, 0]], 1).is_err());
        assert!(ZoneMatrix::from_signed(vec![vec![0]], -2).is_err());

        let m = ZoneMatrix::from_signed(vec![vec![0, 3], vec![3, 0]], 3).unwrap();
        assert_eq!(m.zone_count(), 2);
        assert!(m.is_proximate(1, 0).unwrap());
    }
}
