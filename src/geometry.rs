//! Pixel geometry of a strip wound around a cone.
//!
//! Only a sparse set of pixels has a measured angle. Every other pixel is
//! placed by linear interpolation between its nearest measured neighbours.
//! Angles are in degrees: the front face is 0 and angles increase
//! counter-clockwise when looking down from above. Index 0 sits at the
//! bottom of the tree, the last index at the top.

use core::fmt;
use std::cell::OnceCell;
use std::collections::BTreeMap;

const FULL_TURN: f32 = 360.0;

/// Errors from geometry construction and queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    /// The strip has no pixels
    EmptyStrip,
    /// The index is not enclosed by two reference indices
    Unbounded {
        index: usize,
        first: usize,
        last: usize,
    },
    /// The index is past the end of the strip
    OutOfRange { index: usize, count: usize },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyStrip => write!(f, "pixel count must be positive"),
            Self::Unbounded { index, first, last } => write!(
                f,
                "pixel {index} is outside the reference range {first}..={last}"
            ),
            Self::OutOfRange { index, count } => {
                write!(f, "pixel {index} is out of range for a strip of {count}")
            }
        }
    }
}

impl std::error::Error for GeometryError {}

/// Sparse mapping from pixel index to a measured angle in degrees
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AngleTable {
    angles: BTreeMap<usize, f32>,
}

impl AngleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the angle of a pixel, normalized into `[0, 360)`
    ///
    /// Returns the previously recorded angle if the index was already known.
    pub fn insert(&mut self, index: usize, angle: f32) -> Option<f32> {
        self.angles.insert(index, normalize(angle))
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        self.angles.get(&index).copied()
    }

    pub fn len(&self) -> usize {
        self.angles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    /// Lowest known index
    pub fn first_index(&self) -> Option<usize> {
        self.angles.keys().next().copied()
    }

    /// Highest known index
    pub fn last_index(&self) -> Option<usize> {
        self.angles.keys().next_back().copied()
    }

    /// Nearest known entries strictly below and strictly above `index`
    fn neighbors(&self, index: usize) -> Option<((usize, f32), (usize, f32))> {
        let left = self.angles.range(..index).next_back()?;
        let right = self.angles.range(index + 1..).next()?;
        Some(((*left.0, *left.1), (*right.0, *right.1)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.angles.iter().map(|(index, angle)| (*index, *angle))
    }
}

impl FromIterator<(usize, f32)> for AngleTable {
    fn from_iter<I: IntoIterator<Item = (usize, f32)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (index, angle) in iter {
            table.insert(index, angle);
        }
        table
    }
}

/// Immutable geometry of one strip
///
/// Interpolated angles are computed on first use and cached for the
/// lifetime of the model.
#[derive(Debug)]
pub struct Geometry {
    count: usize,
    table: AngleTable,
    angles: Box<[OnceCell<f32>]>,
}

impl Geometry {
    /// Build the geometry for a strip of `count` pixels
    ///
    /// The table must bound every pixel: its lowest index must be 0 and its
    /// highest index must be at least `count - 1`.
    pub fn new(count: usize, table: AngleTable) -> Result<Self, GeometryError> {
        if count == 0 {
            return Err(GeometryError::EmptyStrip);
        }
        let (Some(first), Some(last)) = (table.first_index(), table.last_index()) else {
            return Err(GeometryError::Unbounded {
                index: 0,
                first: 0,
                last: 0,
            });
        };
        if first > 0 {
            return Err(GeometryError::Unbounded {
                index: 0,
                first,
                last,
            });
        }
        if last < count - 1 {
            return Err(GeometryError::Unbounded {
                index: count - 1,
                first,
                last,
            });
        }

        Ok(Self {
            count,
            table,
            angles: (0..count).map(|_| OnceCell::new()).collect(),
        })
    }

    /// Number of pixels in the strip
    pub const fn count(&self) -> usize {
        self.count
    }

    pub const fn table(&self) -> &AngleTable {
        &self.table
    }

    /// Angle of a pixel in degrees, in `[0, 360)`
    ///
    /// Construction guarantees every in-range index is bounded, so this only
    /// fails for indices past the end of the strip.
    pub fn try_angle(&self, index: usize) -> Result<f32, GeometryError> {
        let Some(slot) = self.angles.get(index) else {
            return Err(GeometryError::OutOfRange {
                index,
                count: self.count,
            });
        };
        if let Some(angle) = slot.get() {
            return Ok(*angle);
        }
        let angle = self.interpolate(index)?;
        Ok(*slot.get_or_init(|| angle))
    }

    /// Angle of a pixel in degrees, in `[0, 360)`
    ///
    /// Indices past the end of the strip are a caller bug: they panic in
    /// debug builds and read as 0 in release builds.
    pub fn angle(&self, index: usize) -> f32 {
        match self.try_angle(index) {
            Ok(angle) => angle,
            Err(err) => {
                debug_assert!(false, "{err}");
                0.0
            }
        }
    }

    fn interpolate(&self, index: usize) -> Result<f32, GeometryError> {
        if let Some(angle) = self.table.get(index) {
            return Ok(angle);
        }
        let Some(((i0, a0), (i1, mut a1))) = self.table.neighbors(index) else {
            return Err(GeometryError::Unbounded {
                index,
                first: self.table.first_index().unwrap_or(0),
                last: self.table.last_index().unwrap_or(0),
            });
        };
        // Going from a0 to a1 always runs counter-clockwise, through 0 if needed
        if a1 <= a0 {
            a1 += FULL_TURN;
        }
        let ratio = (index - i0) as f32 / (i1 - i0) as f32;
        Ok(normalize(a0 * (1.0 - ratio) + a1 * ratio))
    }

    /// Distance of a pixel from `reference`, in degrees within `[0, 180]`
    pub fn angle_from(&self, index: usize, reference: f32) -> f32 {
        angular_distance(self.angle(index), reference)
    }

    /// Radius of a pixel, tapering linearly from 1 at the bottom to 0 at the top
    pub fn radius(&self, index: usize) -> f32 {
        1.0 - index as f32 / self.count as f32
    }

    /// Position of a pixel projected onto the unit square, seen from above
    pub fn position(&self, index: usize) -> (f32, f32) {
        let theta = self.angle(index).to_radians();
        let r = self.radius(index);
        (0.5 + r * theta.cos() / 2.0, 0.5 + r * theta.sin() / 2.0)
    }

    /// Indices whose distance from `reference` is below `band_width / 2`
    ///
    /// The iterator is lazy and can be cloned to restart it.
    pub fn indices_within_angle_band(
        &self,
        reference: f32,
        band_width: f32,
    ) -> impl Iterator<Item = usize> + Clone + '_ {
        let half_width = band_width / 2.0;
        (0..self.count).filter(move |&index| self.angle_from(index, reference) < half_width)
    }

    /// The pixel closest to `reference` on each winding, bottom to top
    pub fn indices_near_angle(&self, reference: f32) -> Vec<usize> {
        let distances: Vec<f32> = (0..self.count)
            .map(|index| self.angle_from(index, reference))
            .collect();

        let mut nearest = Vec::new();
        for (index, distance) in distances.iter().enumerate() {
            let below = index
                .checked_sub(1)
                .and_then(|prev| distances.get(prev))
                .is_none_or(|prev| *distance <= *prev);
            let above = distances
                .get(index + 1)
                .is_none_or(|next| *distance < *next);
            if below && above {
                nearest.push(index);
            }
        }
        nearest
    }
}

/// Normalize an angle into `[0, 360)`
pub fn normalize(angle: f32) -> f32 {
    let angle = angle.rem_euclid(FULL_TURN);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if angle >= FULL_TURN { 0.0 } else { angle }
}

/// Shortest distance between two angles, in degrees within `[0, 180]`
pub fn angular_distance(a: f32, b: f32) -> f32 {
    let delta = a - b;
    normalize(delta).min(normalize(-delta))
}
