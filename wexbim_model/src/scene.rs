use std::sync::Arc;

use glam::{Mat4, Vec3};
use indexmap::IndexMap;
use wexbim_lib::{DecodedFile, Diagnostic, ParsedBlock};

use crate::material::{Material, MaterialCache, MaterialFactory};

/// A shared, indexed triangle mesh: per-vertex positions and unit normals,
/// plus a flat triangle index buffer. Owned by the scene node(s) that
/// reference it; when a block has multiple instances, every instance shares
/// the same `Arc<MeshGeometry>` and owns only its own transform.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshGeometry {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

/// Recovers the element a picked triangle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserData {
    pub model_id: u32,
    pub product_label: i32,
    pub instance_label: i32,
    pub style_id: i32,
}

#[derive(Debug, Clone)]
pub enum MeshNode {
    /// One geometry block with exactly one shape instance.
    Singleton {
        geometry: Arc<MeshGeometry>,
        material: Material,
        transform: Mat4,
        user_data: UserData,
    },
    /// One geometry block shared by two or more shape instances of the same
    /// effective style.
    Instanced {
        geometry: Arc<MeshGeometry>,
        material: Material,
        transforms: Vec<Mat4>,
        user_data: Vec<UserData>,
    },
}

/// An ordered list of mesh nodes, in file order: regions, then geometry
/// blocks within a region, then shape instances within a block, all in the
/// order they appeared in the source file.
#[derive(Debug, Clone, Default)]
pub struct SceneRoot {
    pub nodes: Vec<MeshNode>,
}

/// Build a [`SceneRoot`] from a fully decoded file.
///
/// `Diagnostic::UnknownProduct` is already collected once per shape by
/// [`wexbim_lib::decode`]'s own shape-instance parsing; assembly does not
/// re-check product existence, so the returned diagnostics here only ever
/// cover assembly-local concerns (currently none, reserved for future use).
pub fn assemble_scene(
    decoded: &DecodedFile,
    model_id: u32,
    factory: &dyn MaterialFactory,
) -> (SceneRoot, Vec<Diagnostic>) {
    let mut materials = MaterialCache::new(factory);
    let mut nodes = Vec::with_capacity(decoded.blocks.len());
    let diagnostics = Vec::new();

    for block in &decoded.blocks {
        assemble_block(block, model_id, &decoded.styles, &mut materials, &mut nodes);
    }

    (SceneRoot { nodes }, diagnostics)
}

fn assemble_block(
    block: &ParsedBlock,
    model_id: u32,
    styles: &wexbim_lib::StyleTable,
    materials: &mut MaterialCache,
    nodes: &mut Vec<MeshNode>,
) {
    let geometry = Arc::new(MeshGeometry {
        positions: block.geometry.positions.clone(),
        normals: block.geometry.normals.clone(),
        indices: block.geometry.indices.clone(),
    });

    if block.shapes.len() == 1 {
        let shape = &block.shapes[0];
        let style = styles.lookup(shape.effective_style_id);
        let material = materials.get_or_create(style);

        nodes.push(MeshNode::Singleton {
            geometry,
            material,
            transform: shape.transform.unwrap_or(Mat4::IDENTITY),
            user_data: user_data(shape, model_id),
        });
        return;
    }

    // Partition by effective style id, preserving first-seen order.
    let mut groups: IndexMap<i32, Vec<usize>> = IndexMap::new();
    for (i, shape) in block.shapes.iter().enumerate() {
        groups
            .entry(shape.effective_style_id)
            .or_default()
            .push(i);
    }

    for (style_id, indices) in groups {
        let style = styles.lookup(style_id);
        let material = materials.get_or_create(style);

        let mut transforms = Vec::with_capacity(indices.len());
        let mut user_datas = Vec::with_capacity(indices.len());
        for i in indices {
            let shape = &block.shapes[i];
            transforms.push(shape.transform.unwrap_or(Mat4::IDENTITY));
            user_datas.push(user_data(shape, model_id));
        }

        nodes.push(MeshNode::Instanced {
            geometry: geometry.clone(),
            material,
            transforms,
            user_data: user_datas,
        });
    }
}

fn user_data(shape: &wexbim_lib::ShapeInstance, model_id: u32) -> UserData {
    UserData {
        model_id,
        product_label: shape.product_label,
        instance_label: shape.instance_label,
        style_id: shape.effective_style_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::DefaultMaterialFactory;
    use wexbim_lib::{GeometryBlock, ShapeInstance};

    fn empty_tables() -> (wexbim_lib::ProductTable, wexbim_lib::StyleTable) {
        let bytes: [u8; 0] = [];
        let mut c = wexbim_lib::Cursor::new(&bytes);
        let products = wexbim_lib::ProductTable::parse(&mut c, 0).unwrap();
        let mut c = wexbim_lib::Cursor::new(&bytes);
        let styles = wexbim_lib::StyleTable::parse(&mut c, 0).unwrap();
        (products, styles)
    }

    fn unit_triangle() -> GeometryBlock {
        let mut bytes = Vec::new();
        bytes.push(1); // sub_version
        bytes.extend_from_slice(&3i32.to_le_bytes());
        bytes.extend_from_slice(&1i32.to_le_bytes());
        for v in [(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0)] {
            bytes.extend_from_slice(&(v.0 as f32).to_le_bytes());
            bytes.extend_from_slice(&(v.1 as f32).to_le_bytes());
            bytes.extend_from_slice(&(v.2 as f32).to_le_bytes());
        }
        bytes.extend_from_slice(&1i32.to_le_bytes());
        bytes.extend_from_slice(&1i32.to_le_bytes());
        bytes.push(128);
        bytes.push(128);
        for i in [0u8, 1, 2] {
            bytes.push(i);
        }
        let mut c = wexbim_lib::Cursor::new(&bytes);
        wexbim_lib::geometry::parse_geometry(&mut c).unwrap()
    }

    fn shape_with_tables(
        product_label: i32,
        instance_label: i32,
        style_id: i32,
        transform: Option<Mat4>,
        products: &wexbim_lib::ProductTable,
        styles: &wexbim_lib::StyleTable,
    ) -> ShapeInstance {
        let bytes = if let Some(m) = transform {
            let mut b = Vec::new();
            b.extend_from_slice(&2i32.to_le_bytes()); // repetition
            for _ in 0..2 {
                b.extend_from_slice(&product_label.to_le_bytes());
                b.extend_from_slice(&1i16.to_le_bytes());
                b.extend_from_slice(&instance_label.to_le_bytes());
                b.extend_from_slice(&style_id.to_le_bytes());
                for f in m.to_cols_array() {
                    b.extend_from_slice(&(f as f64).to_le_bytes());
                }
            }
            b
        } else {
            let mut b = Vec::new();
            b.extend_from_slice(&1i32.to_le_bytes());
            b.extend_from_slice(&product_label.to_le_bytes());
            b.extend_from_slice(&1i16.to_le_bytes());
            b.extend_from_slice(&instance_label.to_le_bytes());
            b.extend_from_slice(&style_id.to_le_bytes());
            b
        };
        let mut diagnostics = Vec::new();
        let mut c = wexbim_lib::Cursor::new(&bytes);
        let mut shapes =
            wexbim_lib::shape::parse_shapes(&mut c, 4, products, styles, &mut diagnostics)
                .unwrap();
        shapes.remove(0)
    }

    fn shape(product_label: i32, instance_label: i32, style_id: i32, transform: Option<Mat4>) -> ShapeInstance {
        let (products, styles) = empty_tables();
        shape_with_tables(product_label, instance_label, style_id, transform, &products, &styles)
    }

    #[test]
    fn two_shapes_same_style_produce_one_instanced_node() {
        let block = ParsedBlock {
            shapes: vec![
                shape(100, 1, 7, Some(Mat4::IDENTITY)),
                shape(100, 2, 7, Some(Mat4::from_translation(Vec3::new(2.0, 0.0, 0.0)))),
            ],
            geometry: unit_triangle(),
        };
        let (_, styles) = empty_tables();
        let factory = DefaultMaterialFactory;
        let mut materials = MaterialCache::new(&factory);
        let mut nodes = Vec::new();
        assemble_block(&block, 0, &styles, &mut materials, &mut nodes);

        assert_eq!(nodes.len(), 1);
        match &nodes[0] {
            MeshNode::Instanced {
                transforms,
                user_data,
                ..
            } => {
                assert_eq!(transforms.len(), 2);
                assert_eq!(user_data.len(), 2);
                assert_eq!(transforms[1].w_axis.truncate(), Vec3::new(2.0, 0.0, 0.0));
            }
            MeshNode::Singleton { .. } => panic!("expected an instanced node"),
        }
    }

    #[test]
    fn instances_partition_by_effective_style() {
        // Build a two-product table: label 100 is an ordinary wall (type 1),
        // label 200 is an opening (type 3) that forces the `-2` sentinel
        // style regardless of its stored style id.
        let mut product_bytes = Vec::new();
        for (label, product_type) in [(100, 1i16), (200, 3)] {
            product_bytes.extend_from_slice(&label.to_le_bytes());
            product_bytes.extend_from_slice(&product_type.to_le_bytes());
            for _ in 0..6 {
                product_bytes.extend_from_slice(&0.0f32.to_le_bytes());
            }
        }
        let mut c = wexbim_lib::Cursor::new(&product_bytes);
        let products = wexbim_lib::ProductTable::parse(&mut c, 2).unwrap();
        let (_, styles) = empty_tables();

        let block = ParsedBlock {
            shapes: vec![
                shape_with_tables(100, 1, 7, Some(Mat4::IDENTITY), &products, &styles),
                shape_with_tables(200, 2, 7, Some(Mat4::IDENTITY), &products, &styles),
            ],
            geometry: unit_triangle(),
        };
        let factory = DefaultMaterialFactory;
        let mut materials = MaterialCache::new(&factory);
        let mut nodes = Vec::new();
        assemble_block(&block, 0, &styles, &mut materials, &mut nodes);

        assert_eq!(nodes.len(), 2);
        for node in &nodes {
            match node {
                MeshNode::Instanced { user_data, .. } => assert_eq!(user_data.len(), 1),
                MeshNode::Singleton { .. } => panic!("expected instanced nodes"),
            }
        }
    }
}
