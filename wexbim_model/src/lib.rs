//! Scene-assembly layer on top of [`wexbim_lib`]: turns a parsed
//! [`wexbim_lib::DecodedFile`] into a [`SceneRoot`] of mesh nodes, building
//! and caching [`Material`] descriptors per style id, and exposing the
//! consumer-facing `load`/`load_streaming` entry points.

pub mod material;
pub mod scene;

pub use material::{DefaultMaterialFactory, Material, MaterialCache, MaterialFactory};
pub use scene::{assemble_scene, MeshGeometry, MeshNode, SceneRoot, UserData};

pub use wexbim_lib::{
    Diagnostic, FormatError, ProductRecord, ProductTable, Region, StyleRecord, StyleTable,
};

/// Decode `bytes` and assemble a scene in one synchronous call, using the
/// default PBA material mapping.
///
/// `model_id` is stamped into every emitted [`UserData`] so a host juggling
/// several loaded files can tell their picks apart; the core has no notion
/// of "which model" beyond this opaque tag.
pub fn load(bytes: &[u8], model_id: u32) -> Result<(SceneRoot, Vec<Diagnostic>), FormatError> {
    load_with_factory(bytes, model_id, &DefaultMaterialFactory)
}

/// As [`load`], but with a caller-supplied [`MaterialFactory`] in place of
/// the default PBA mapping, for hosts that want to materialize styles into
/// their own renderer's material type instead.
pub fn load_with_factory(
    bytes: &[u8],
    model_id: u32,
    factory: &dyn MaterialFactory,
) -> Result<(SceneRoot, Vec<Diagnostic>), FormatError> {
    let decoded = wexbim_lib::decode(bytes)?;
    assemble(decoded, model_id, factory)
}

/// Cooperative variant of [`load`]: `on_progress(bytes_consumed, bytes_total)`
/// fires once per fully-parsed geometry block, the only point a host can
/// hook into to pace a long decode, using the default material mapping.
pub fn load_streaming(
    bytes: &[u8],
    model_id: u32,
    on_progress: impl FnMut(usize, usize),
) -> Result<(SceneRoot, Vec<Diagnostic>), FormatError> {
    load_streaming_with_factory(bytes, model_id, on_progress, &DefaultMaterialFactory)
}

/// As [`load_streaming`], with a caller-supplied [`MaterialFactory`].
pub fn load_streaming_with_factory(
    bytes: &[u8],
    model_id: u32,
    on_progress: impl FnMut(usize, usize),
    factory: &dyn MaterialFactory,
) -> Result<(SceneRoot, Vec<Diagnostic>), FormatError> {
    let decoded = wexbim_lib::decode_streaming(bytes, on_progress)?;
    assemble(decoded, model_id, factory)
}

fn assemble(
    decoded: wexbim_lib::DecodedFile,
    model_id: u32,
    factory: &dyn MaterialFactory,
) -> Result<(SceneRoot, Vec<Diagnostic>), FormatError> {
    let (scene, assembly_diagnostics) = assemble_scene(&decoded, model_id, factory);
    let mut diagnostics = decoded.diagnostics;
    diagnostics.extend(assembly_diagnostics);
    Ok((scene, diagnostics))
}
