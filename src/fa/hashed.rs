use super::{Dimension, Projection};
use crate::error::{Error, Result};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::Uniform;
use serde::{Deserialize, Serialize};

const UNH_TABLE_SIZE: usize = 2048;
const UNH_STRIDE: u64 = 449;

const MT_M: usize = 156;
const MT_MATRIX_A: u64 = 0xB502_6F5A_A966_19E9;
const MT_UPPER_MASK: u64 = 0xFFFF_FFFF_8000_0000;
const MT_LOWER_MASK: u64 = 0x0000_0000_7FFF_FFFF;

/// Integer hash applied to a tiling's coordinate tuple.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum TileHasher {
    /// Classic University of New Hampshire scheme: coordinates index into a
    /// fixed table of random words whose entries are summed.
    Unh { table: Vec<u64> },

    /// Seed a 64-bit Mersenne Twister from the coordinate tuple and take a
    /// single draw.
    Mersenne,
}

impl TileHasher {
    pub fn unh(seed: u64) -> TileHasher {
        let mut rng = StdRng::seed_from_u64(seed);

        TileHasher::Unh {
            table: (0..UNH_TABLE_SIZE).map(|_| rng.gen()).collect(),
        }
    }

    fn hash(&self, coordinates: &[u64]) -> u64 {
        match self {
            TileHasher::Unh { table } => {
                coordinates.iter().enumerate().fold(0u64, |acc, (i, &c)| {
                    let slot = c.wrapping_add(UNH_STRIDE.wrapping_mul(i as u64))
                        & (UNH_TABLE_SIZE as u64 - 1);

                    acc.wrapping_add(table[slot as usize])
                })
            },
            TileHasher::Mersenne => {
                let seed = coordinates.iter().fold(0u64, |acc, &c| {
                    acc.wrapping_mul(6_364_136_223_846_793_005)
                        .wrapping_add(c)
                        .wrapping_add(1_442_695_040_888_963_407)
                });

                mt19937_64_draw(seed)
            },
        }
    }
}

/// First output of a 64-bit Mersenne Twister initialised from `seed`.
fn mt19937_64_draw(seed: u64) -> u64 {
    let mut mt = [0u64; MT_M + 1];

    mt[0] = seed;
    for i in 1..=MT_M {
        mt[i] = 6_364_136_223_846_793_005u64
            .wrapping_mul(mt[i - 1] ^ (mt[i - 1] >> 62))
            .wrapping_add(i as u64);
    }

    let x = (mt[0] & MT_UPPER_MASK) | (mt[1] & MT_LOWER_MASK);
    let mut y = mt[MT_M] ^ (x >> 1) ^ if x & 1 == 0 { 0 } else { MT_MATRIX_A };

    y ^= (y >> 29) & 0x5555_5555_5555_5555;
    y ^= (y << 17) & 0x71D6_7FFF_EDA6_0000;
    y ^= (y << 37) & 0xFFF7_EEE0_0000_0000;
    y ^= y >> 43;

    y
}

/// Hashed tile coder for high-dimensional inputs.
///
/// Each tiling's coordinate tuple `(t, g_0, ..., g_{D-1})` is hashed down to
/// a caller-chosen memory size; collisions are accepted as a space/accuracy
/// trade-off. Coordinates are quantised with the per-dimension grid count
/// directly, since no index packing is involved.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HashedTileCoding {
    dims: Vec<Dimension>,
    offsets: Vec<Vec<f64>>,
    memory_size: usize,
    hasher: TileHasher,
}

impl HashedTileCoding {
    /// Construct a UNH-hashed coder; both the hash table and the per-tiling
    /// shifts derive deterministically from `seed`.
    pub fn new(
        dims: Vec<Dimension>,
        n_tilings: usize,
        memory_size: usize,
        seed: u64,
    ) -> Result<HashedTileCoding> {
        HashedTileCoding::with_hasher(dims, n_tilings, memory_size, TileHasher::unh(seed), seed)
    }

    /// Construct a coder backed by the Mersenne Twister hash.
    pub fn mersenne(
        dims: Vec<Dimension>,
        n_tilings: usize,
        memory_size: usize,
        seed: u64,
    ) -> Result<HashedTileCoding> {
        HashedTileCoding::with_hasher(dims, n_tilings, memory_size, TileHasher::Mersenne, seed)
    }

    fn with_hasher(
        dims: Vec<Dimension>,
        n_tilings: usize,
        memory_size: usize,
        hasher: TileHasher,
        seed: u64,
    ) -> Result<HashedTileCoding> {
        if dims.is_empty() {
            return Err(Error::InvalidConfig(
                "tile coding requires at least one dimension".to_string(),
            ));
        }

        if n_tilings < 1 {
            return Err(Error::InvalidConfig(
                "tile coding requires at least one tiling".to_string(),
            ));
        }

        if memory_size < 1 {
            return Err(Error::InvalidConfig(
                "hashed tile coding requires a positive memory size".to_string(),
            ));
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let unit = Uniform::new(0.0, 1.0);

        let offsets = (0..n_tilings)
            .map(|_| {
                dims.iter()
                    .map(|d| rng.sample(unit) * d.offset() * d.generalisation())
                    .collect()
            })
            .collect();

        Ok(HashedTileCoding {
            dims,
            offsets,
            memory_size,
            hasher,
        })
    }

    pub fn dims(&self) -> &[Dimension] { &self.dims }
}

impl Projection for HashedTileCoding {
    fn project(&self, input: &[f64]) -> Result<Vec<usize>> {
        if input.len() != self.dims.len() {
            return Err(Error::InvalidConfig(format!(
                "expected {} input coordinates, got {}",
                self.dims.len(),
                input.len()
            )));
        }

        let mut coordinates = vec![0u64; self.dims.len() + 1];

        self.offsets
            .iter()
            .enumerate()
            .map(|(t, shifts)| {
                coordinates[0] = t as u64;

                for (d, dim) in self.dims.iter().enumerate() {
                    coordinates[d + 1] = dim.coord(input[d], shifts[d])? as u64;
                }

                Ok((self.hasher.hash(&coordinates) % self.memory_size as u64) as usize)
            })
            .collect()
    }

    fn size(&self) -> usize { self.memory_size }

    fn n_tilings(&self) -> usize { self.offsets.len() }

    fn n_dims(&self) -> usize { self.dims.len() }
}
