use super::{Dimension, Projection};
use crate::error::{Error, Result};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::Uniform;
use serde::{Deserialize, Serialize};

/// Collision-free tile coder.
///
/// Each of the `n_tilings` tilings assigns the input a mixed-radix index over
/// its per-dimension grid coordinates, so distinct coordinate tuples always
/// map to distinct features. Memory grows with the product of the
/// per-dimension tile counts; prefer [`HashedTileCoding`](super::HashedTileCoding)
/// when that product is large.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TileCoding {
    dims: Vec<Dimension>,
    offsets: Vec<Vec<f64>>,
    strides: Vec<usize>,
    tiling_size: usize,
}

impl TileCoding {
    /// Construct a coder with per-tiling shifts drawn once from the seeded
    /// generator; two instances built from the same seed and dimensions are
    /// interchangeable.
    pub fn new(dims: Vec<Dimension>, n_tilings: usize, seed: u64) -> Result<TileCoding> {
        let mut rng = StdRng::seed_from_u64(seed);
        let unit = Uniform::new(0.0, 1.0);

        let offsets = (0..n_tilings)
            .map(|_| {
                dims.iter()
                    .map(|d| rng.sample(unit) * d.offset() * d.generalisation())
                    .collect()
            })
            .collect();

        TileCoding::with_offsets(dims, offsets)
    }

    /// Construct a coder whose tilings all coincide with the base grid.
    pub fn aligned(dims: Vec<Dimension>, n_tilings: usize) -> Result<TileCoding> {
        let offsets = vec![vec![0.0; dims.len()]; n_tilings];

        TileCoding::with_offsets(dims, offsets)
    }

    fn with_offsets(dims: Vec<Dimension>, offsets: Vec<Vec<f64>>) -> Result<TileCoding> {
        if dims.is_empty() {
            return Err(Error::InvalidConfig(
                "tile coding requires at least one dimension".to_string(),
            ));
        }

        if offsets.is_empty() {
            return Err(Error::InvalidConfig(
                "tile coding requires at least one tiling".to_string(),
            ));
        }

        let mut strides = Vec::with_capacity(dims.len());
        let mut tiling_size = 1;

        for d in &dims {
            strides.push(tiling_size);
            tiling_size *= d.n_tiles();
        }

        Ok(TileCoding {
            dims,
            offsets,
            strides,
            tiling_size,
        })
    }

    pub fn dims(&self) -> &[Dimension] { &self.dims }

    /// Number of features spanned by a single tiling.
    pub fn tiling_size(&self) -> usize { self.tiling_size }
}

impl Projection for TileCoding {
    fn project(&self, input: &[f64]) -> Result<Vec<usize>> {
        if input.len() != self.dims.len() {
            return Err(Error::InvalidConfig(format!(
                "expected {} input coordinates, got {}",
                self.dims.len(),
                input.len()
            )));
        }

        self.offsets
            .iter()
            .enumerate()
            .map(|(t, shifts)| {
                let mut index = t * self.tiling_size;

                for (d, dim) in self.dims.iter().enumerate() {
                    index += dim.coord(input[d], shifts[d])? * self.strides[d];
                }

                Ok(index)
            })
            .collect()
    }

    fn size(&self) -> usize { self.offsets.len() * self.tiling_size }

    fn n_tilings(&self) -> usize { self.offsets.len() }

    fn n_dims(&self) -> usize { self.dims.len() }
}

#[cfg(test)]
mod tests {
    use super::{Dimension, Projection, TileCoding};
    use crate::error::Error;
    use quickcheck::{quickcheck, TestResult};
    use std::collections::HashSet;

    fn unit_dims(n: usize, grid: usize) -> Vec<Dimension> {
        (0..n)
            .map(|_| Dimension::new(0.0, 1.0, grid).unwrap())
            .collect()
    }

    #[test]
    fn test_1d_aligned() {
        let tc = TileCoding::aligned(unit_dims(1, 10), 1).unwrap();

        assert_eq!(tc.project(&[0.0]).unwrap(), vec![0]);
        assert_eq!(tc.project(&[0.55]).unwrap(), vec![5]);
        assert_eq!(tc.project(&[1.0]).unwrap(), vec![10]);
    }

    #[test]
    fn test_tiling_blocks() {
        let tc = TileCoding::aligned(unit_dims(1, 10), 3).unwrap();

        assert_eq!(tc.size(), 33);
        assert_eq!(tc.project(&[0.55]).unwrap(), vec![5, 16, 27]);
    }

    #[test]
    fn test_uniqueness() {
        let tc = TileCoding::aligned(unit_dims(2, 10), 1).unwrap();

        let mut seen = HashSet::new();
        for i in 0..10 {
            for j in 0..10 {
                let x = [i as f64 / 10.0 + 0.05, j as f64 / 10.0 + 0.05];

                seen.insert(tc.project(&x).unwrap()[0]);
            }
        }

        assert_eq!(seen.len(), 100);
    }

    #[test]
    fn test_seed_reproducibility() {
        let a = TileCoding::new(unit_dims(2, 8), 4, 17).unwrap();
        let b = TileCoding::new(unit_dims(2, 8), 4, 17).unwrap();
        let c = TileCoding::new(unit_dims(2, 8), 4, 18).unwrap();

        let sweep: Vec<[f64; 2]> = (0..100)
            .map(|i| [(i % 10) as f64 / 10.0, (i / 10) as f64 / 10.0])
            .collect();

        for x in &sweep {
            assert_eq!(a.project(x).unwrap(), b.project(x).unwrap());
        }

        // A different seed draws different shifts:
        assert!(sweep
            .iter()
            .any(|x| a.project(x).unwrap() != c.project(x).unwrap()));
    }

    #[test]
    fn test_input_arity() {
        let tc = TileCoding::aligned(unit_dims(2, 10), 1).unwrap();

        assert!(matches!(tc.project(&[0.5]), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_out_of_domain() {
        let tc = TileCoding::aligned(unit_dims(1, 10), 1).unwrap();

        assert!(matches!(tc.project(&[1.5]), Err(Error::OutOfDomain { .. })));
        assert!(matches!(
            tc.project(&[::std::f64::NAN]),
            Err(Error::OutOfDomain { .. })
        ));
    }

    #[test]
    fn test_feature_properties() {
        fn prop_features(seed: u64, x: f64, y: f64) -> TestResult {
            if !x.is_finite() || !y.is_finite() {
                return TestResult::discard();
            }

            // Fold arbitrary finite inputs onto the unit square:
            let x = x.fract().abs();
            let y = y.fract().abs();

            let tc = TileCoding::new(
                vec![
                    Dimension::new(0.0, 1.0, 6).unwrap(),
                    Dimension::new(0.0, 1.0, 6).unwrap(),
                ],
                8,
                seed,
            )
            .unwrap();

            let phi = tc.project(&[x, y]).unwrap();

            TestResult::from_bool(
                phi.len() == tc.n_tilings()
                    && phi.iter().all(|&i| i < tc.size())
                    && phi == tc.project(&[x, y]).unwrap(),
            )
        }

        quickcheck(prop_features as fn(u64, f64, f64) -> TestResult);
    }
}
