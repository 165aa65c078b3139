//! The fixed Z-up -> Y-up axis remap: swap of the Y and Z axes, applied
//! uniformly to positions, normals, bounds and transforms.

use glam::{Mat4, Vec3};

/// `(x, y, z) -> (x, z, y)`. Self-inverse.
pub fn axis_remap_vec3(v: Vec3) -> Vec3 {
    Vec3::new(v.x, v.z, v.y)
}

pub fn axis_remap_bbox(min: Vec3, max: Vec3) -> (Vec3, Vec3) {
    (axis_remap_vec3(min), axis_remap_vec3(max))
}

/// `T * M * T` where `T` is the Y/Z swap permutation matrix, computed without
/// constructing `T` explicitly: swap rows 1<->2 and columns 1<->2 of `M`.
pub fn axis_remap_mat4(m: Mat4) -> Mat4 {
    let mut cols = m.to_cols_array_2d();
    cols.swap(1, 2);
    for col in &mut cols {
        col.swap(1, 2);
    }
    Mat4::from_cols_array_2d(&cols)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec3;

    #[test]
    fn vec3_remap_is_involution() {
        let v = vec3(1.0, 2.0, 3.0);
        assert_eq!(axis_remap_vec3(axis_remap_vec3(v)), v);
        assert_eq!(axis_remap_vec3(v), vec3(1.0, 3.0, 2.0));
    }

    #[test]
    fn mat4_remap_is_involution() {
        let m = Mat4::from_cols_array(&[
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0,
        ]);
        let remapped = axis_remap_mat4(m);
        assert_eq!(axis_remap_mat4(remapped), m);
    }

    #[test]
    fn mat4_remap_swaps_translation_yz() {
        let m = Mat4::from_translation(vec3(2.0, 3.0, 5.0));
        let remapped = axis_remap_mat4(m);
        assert_eq!(remapped.w_axis.truncate(), vec3(2.0, 5.0, 3.0));
    }
}
