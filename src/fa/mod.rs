//! Function approximation module: tile-coded projections and linear
//! action-value functions.
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Description of one axis of a bounded real-valued input space.
///
/// A dimension spans `[lo, hi]` and is quantised into `grid` cells of width
/// `offset()`. Tile coders lay `grid + 1` tiles along each axis so that the
/// upper bound and per-tiling positive shifts remain inside the tiling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    lo: f64,
    hi: f64,
    grid: usize,
    generalisation: f64,
}

impl Dimension {
    pub fn new(lo: f64, hi: f64, grid: usize) -> Result<Dimension> {
        if !(lo.is_finite() && hi.is_finite()) || hi <= lo {
            return Err(Error::InvalidConfig(format!(
                "dimension bounds must be finite with hi > lo, got [{}, {}]",
                lo, hi
            )));
        }

        if grid < 1 {
            return Err(Error::InvalidConfig(
                "dimension grid count must be at least 1".to_string(),
            ));
        }

        Ok(Dimension {
            lo,
            hi,
            grid,
            generalisation: 1.0,
        })
    }

    /// Replace the generalisation multiplier applied to per-tiling random
    /// shift magnitudes.
    pub fn with_generalisation(mut self, generalisation: f64) -> Result<Dimension> {
        if !generalisation.is_finite() || generalisation <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "dimension generalisation must be positive, got {}",
                generalisation
            )));
        }

        self.generalisation = generalisation;

        Ok(self)
    }

    pub fn lo(&self) -> f64 { self.lo }

    pub fn hi(&self) -> f64 { self.hi }

    pub fn grid(&self) -> usize { self.grid }

    pub fn generalisation(&self) -> f64 { self.generalisation }

    /// Width of the axis.
    pub fn range(&self) -> f64 { self.hi - self.lo }

    /// Quantisation step; the width of one grid cell.
    pub fn offset(&self) -> f64 { self.range() / self.grid as f64 }

    /// Number of tiles laid along this axis by a single tiling.
    pub fn n_tiles(&self) -> usize { self.grid + 1 }

    /// Integer grid coordinate of `x` under a positive `shift`.
    ///
    /// Rejects inputs outside `[lo, hi]` (including NaN). Coordinates at the
    /// upper boundary saturate at `n_tiles() - 1`.
    pub(crate) fn coord(&self, x: f64, shift: f64) -> Result<usize> {
        if !(x >= self.lo && x <= self.hi) {
            return Err(Error::OutOfDomain {
                value: x,
                lo: self.lo,
                hi: self.hi,
            });
        }

        let g = ((x + shift - self.lo) * self.grid as f64 / self.range()).floor();

        Ok((g as usize).min(self.n_tiles() - 1))
    }
}

/// A deterministic mapping from a point in a bounded real-valued space to the
/// sparse set of active feature indices, one per tiling.
pub trait Projection {
    /// Project `input` onto the active feature indices.
    ///
    /// Always returns exactly `n_tilings()` indices, each in `[0, size())`,
    /// and is deterministic in `input`.
    fn project(&self, input: &[f64]) -> Result<Vec<usize>>;

    /// Total number of features spanned by the projection.
    fn size(&self) -> usize;

    /// Number of overlapping tilings.
    fn n_tilings(&self) -> usize;

    /// Dimensionality of the input space.
    fn n_dims(&self) -> usize;
}

mod tile_coding;
pub use self::tile_coding::TileCoding;

mod hashed;
pub use self::hashed::{HashedTileCoding, TileHasher};

mod linear;
pub use self::linear::LinearQ;

mod trace;
pub use self::trace::{Trace, TraceKind};

#[cfg(test)]
mod tests {
    use super::Dimension;
    use crate::error::Error;

    #[test]
    fn test_dimension_validation() {
        assert!(Dimension::new(0.0, 1.0, 10).is_ok());
        assert!(Dimension::new(1.0, 0.0, 10).is_err());
        assert!(Dimension::new(0.0, 0.0, 10).is_err());
        assert!(Dimension::new(0.0, ::std::f64::INFINITY, 10).is_err());
        assert!(Dimension::new(0.0, 1.0, 0).is_err());

        assert!(Dimension::new(0.0, 1.0, 10)
            .unwrap()
            .with_generalisation(0.0)
            .is_err());
    }

    #[test]
    fn test_derived_quantities() {
        let d = Dimension::new(-1.0, 1.0, 4).unwrap();

        assert_eq!(d.range(), 2.0);
        assert_eq!(d.offset(), 0.5);
        assert_eq!(d.n_tiles(), 5);
    }

    #[test]
    fn test_coord() {
        let d = Dimension::new(0.0, 1.0, 10).unwrap();

        assert_eq!(d.coord(0.0, 0.0), Ok(0));
        assert_eq!(d.coord(0.55, 0.0), Ok(5));
        assert_eq!(d.coord(1.0, 0.0), Ok(10));

        // Positive shifts stay within the extra upper tile:
        assert_eq!(d.coord(1.0, 0.09), Ok(10));
        assert_eq!(d.coord(0.0, 0.05), Ok(0));
    }

    #[test]
    fn test_coord_out_of_domain() {
        let d = Dimension::new(0.0, 1.0, 10).unwrap();

        assert!(matches!(d.coord(-0.1, 0.0), Err(Error::OutOfDomain { .. })));
        assert!(matches!(d.coord(1.1, 0.0), Err(Error::OutOfDomain { .. })));
        assert!(matches!(
            d.coord(::std::f64::NAN, 0.0),
            Err(Error::OutOfDomain { .. })
        ));
    }
}
