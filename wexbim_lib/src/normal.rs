//! Octahedral-ish two-byte unit normal decoding and the per-vertex
//! sum-and-normalize accumulator that turns per-face or per-corner packed
//! normals into smooth per-vertex normals.

use glam::Vec3;

use crate::remap;

/// Decode one packed normal. `u`/`v` are bytes in `[0, 255]`. The decoded
/// vector is axis-remapped before it's returned, since every caller
/// immediately needs it in the consumer's Y-up space.
///
/// The axis swap is applied before the forward-convention flip: swapping the
/// source's Y and Z axes is an improper (reflecting) transform, so the
/// handedness correction has to act on the *consumer*-space Z, not the
/// source-space one. Getting this order backwards flips the sign of every
/// decoded normal in the scene.
pub fn decode_octahedral(u: u8, v: u8) -> Vec3 {
    let uf = 2.0 * u as f32 / 255.0 - 1.0;
    let vf = 2.0 * v as f32 / 255.0 - 1.0;
    let zf = (1.0 - uf * uf - vf * vf).max(0.0).sqrt();

    let n = Vec3::new(uf, vf, zf).normalize_or_zero();
    let mut remapped = remap::axis_remap_vec3(n);
    remapped.z = -remapped.z;
    remapped
}

/// Sum-and-normalize accumulator over `vertex_count` vertices.
pub struct NormalAccumulator {
    sums: Vec<Vec3>,
    counts: Vec<u32>,
}

impl NormalAccumulator {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            sums: vec![Vec3::ZERO; vertex_count],
            counts: vec![0; vertex_count],
        }
    }

    pub fn add(&mut self, vertex_index: u32, normal: Vec3) {
        let i = vertex_index as usize;
        self.sums[i] += normal;
        self.counts[i] += 1;
    }

    /// Vertices with zero contributions are left as the zero vector; they
    /// are unreferenced by any triangle.
    pub fn finish(self) -> Vec<Vec3> {
        self.sums
            .into_iter()
            .zip(self.counts)
            .map(|(sum, count)| {
                if count == 0 {
                    Vec3::ZERO
                } else {
                    (sum / count as f32).normalize_or_zero()
                }
            })
            .collect()
    }
}
