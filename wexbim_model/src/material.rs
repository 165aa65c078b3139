use indexmap::IndexMap;
use wexbim_lib::StyleRecord;

/// A physically-based material descriptor. Flat base color, derived
/// transparency/opacity, two-sided by default (the axis remap is a
/// reflection rather than a rotation, so triangle winding can end up facing
/// either way once it's applied, and rendering both sides keeps geometry
/// visible regardless), and a small emissive term so pure-black unlit
/// regions never appear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub base_color: [f32; 4],
    pub transparent: bool,
    pub opacity: f32,
    pub double_sided: bool,
    pub flat_shading: bool,
    pub emissive: [f32; 3],
}

const EMISSIVE_FACTOR: f32 = 0.1;

fn default_material(style: &StyleRecord) -> Material {
    let [r, g, b, a] = style.rgba;
    Material {
        base_color: style.rgba,
        transparent: style.transparent(),
        opacity: style.opacity(),
        double_sided: true,
        flat_shading: true,
        emissive: [r * EMISSIVE_FACTOR, g * EMISSIVE_FACTOR, b * EMISSIVE_FACTOR],
    }
}

/// A host-supplied alternative to the default PBA mapping, for hosts that
/// want to materialize a style into their own renderer's material type
/// instead of this crate's [`Material`].
pub trait MaterialFactory {
    fn create(&self, style: &StyleRecord) -> Material;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultMaterialFactory;

impl MaterialFactory for DefaultMaterialFactory {
    fn create(&self, style: &StyleRecord) -> Material {
        default_material(style)
    }
}

/// Caches one [`Material`] per style id, materialized on first use.
pub struct MaterialCache<'a> {
    factory: &'a dyn MaterialFactory,
    by_style_id: IndexMap<i32, Material>,
}

impl<'a> MaterialCache<'a> {
    pub fn new(factory: &'a dyn MaterialFactory) -> Self {
        Self {
            factory,
            by_style_id: IndexMap::new(),
        }
    }

    pub fn get_or_create(&mut self, style: &StyleRecord) -> Material {
        *self
            .by_style_id
            .entry(style.id)
            .or_insert_with(|| self.factory.create(style))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(id: i32, rgba: [f32; 4]) -> StyleRecord {
        // StyleRecord's fields are crate-visible in wexbim_lib; construct an
        // equivalent record through the public parser instead of field
        // literals so this test tracks the real type.
        let mut bytes = id.to_le_bytes().to_vec();
        for f in rgba {
            bytes.extend_from_slice(&f.to_le_bytes());
        }
        let mut cursor = wexbim_lib::Cursor::new(&bytes);
        let table = wexbim_lib::StyleTable::parse(&mut cursor, 1).unwrap();
        *table.lookup(id)
    }

    #[test]
    fn default_material_matches_style() {
        let s = style(7, [1.0, 0.0, 0.0, 1.0]);
        let m = default_material(&s);
        assert_eq!(m.base_color, [1.0, 0.0, 0.0, 1.0]);
        assert!(!m.transparent);
        assert!(m.double_sided);
    }

    #[test]
    fn cache_reuses_material_for_same_style_id() {
        let factory = DefaultMaterialFactory;
        let mut cache = MaterialCache::new(&factory);
        let s = style(7, [1.0, 0.0, 0.0, 1.0]);
        let a = cache.get_or_create(&s);
        let b = cache.get_or_create(&s);
        assert_eq!(a, b);
        assert_eq!(cache.by_style_id.len(), 1);
    }
}
