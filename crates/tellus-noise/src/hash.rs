//! Hash-based lattice value noise behind the [`NoiseFn`] interface.

use noise::NoiseFn;

/// Continuous hash-based lattice value noise in `[-1, 1]`.
///
/// Hashes the integer lattice and blends corner values with a cubic fade,
/// so the field is continuous across lattice boundaries. Cheaper and busier
/// than gradient noise; used for ice-coverage variation, where high-frequency
/// texture matters more than isotropy. Stateless and unseeded: one fixed
/// field, like the terrain primitive.
#[derive(Clone, Copy, Debug, Default)]
pub struct HashNoise;

const HASH_X: i64 = 73_856_093;
const HASH_Y: i64 = 19_349_663;
const HASH_Z: i64 = 83_492_791;

/// Deterministic per-lattice-point value in `[-1, 1]`.
fn lattice_value(ix: i64, iy: i64, iz: i64) -> f64 {
    let mixed = (ix.wrapping_mul(HASH_X)) ^ (iy.wrapping_mul(HASH_Y)) ^ (iz.wrapping_mul(HASH_Z));
    // Final avalanche so neighbouring lattice points decorrelate.
    let mut h = mixed as u64;
    h ^= h >> 33;
    h = h.wrapping_mul(0xff51_afd7_ed55_8ccd);
    h ^= h >> 33;
    (h % 65_536) as f64 / 32_768.0 - 1.0
}

fn fade(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

impl NoiseFn<f64, 3> for HashNoise {
    fn get(&self, point: [f64; 3]) -> f64 {
        let [x, y, z] = point;
        let (ix, iy, iz) = (x.floor() as i64, y.floor() as i64, z.floor() as i64);
        let (fx, fy, fz) = (x - x.floor(), y - y.floor(), z - z.floor());
        let (u, v, w) = (fade(fx), fade(fy), fade(fz));

        let c000 = lattice_value(ix, iy, iz);
        let c100 = lattice_value(ix + 1, iy, iz);
        let c010 = lattice_value(ix, iy + 1, iz);
        let c110 = lattice_value(ix + 1, iy + 1, iz);
        let c001 = lattice_value(ix, iy, iz + 1);
        let c101 = lattice_value(ix + 1, iy, iz + 1);
        let c011 = lattice_value(ix, iy + 1, iz + 1);
        let c111 = lattice_value(ix + 1, iy + 1, iz + 1);

        let x00 = lerp(c000, c100, u);
        let x10 = lerp(c010, c110, u);
        let x01 = lerp(c001, c101, u);
        let x11 = lerp(c011, c111, u);

        let y0 = lerp(x00, x10, v);
        let y1 = lerp(x01, x11, v);

        lerp(y0, y1, w)
    }
}
