//! Framing code generator.
//!
//! Turns a [`Spec`] into two Rust source artifacts: declarations (records,
//! constants, name enums) and definitions (codecs, lookup tables). Both are
//! meant to be `include!`d into the same module of a crate depending on
//! `framegen-runtime`.

mod config;
mod error;
mod ident;
mod lookup;
mod macros;
mod method;
pub mod packer;
mod property;
mod record;
mod render;

#[cfg(test)]
mod tests;

pub use config::{BuildConfig, RUNTIME_CRATE_ENV};
pub use error::GenerateError;
pub use render::{Artifacts, artifact_name};

use framegen_spec::{
    node::{Class, Field, Method, Spec},
    types::WireType,
};
use proc_macro2::{Ident, TokenStream};
use quote::quote;
use std::path::{Path, PathBuf};

// generate
/// Generate both artifacts for a spec.
///
/// Output is a pure function of the spec and config.
#[tracing::instrument(skip_all, fields(version = %spec.version), level = "info")]
pub fn generate(spec: &Spec, config: &BuildConfig) -> Result<Artifacts, GenerateError> {
    let builder = FramingBuilder::new(spec, config)?;
    let artifacts = render::render(&builder)?;

    tracing::info!(
        name = %artifacts.name,
        classes = spec.classes().len(),
        constants = spec.constants().len(),
        "generated framing artifacts"
    );

    Ok(artifacts)
}

/// Load a JSON description from disk and generate its artifacts.
pub fn generate_from_path(
    path: impl AsRef<Path>,
    config: &BuildConfig,
) -> Result<Artifacts, GenerateError> {
    let spec = Spec::from_json_path(path)?;

    generate(&spec, config)
}

/// Write `<name>_decls.rs` and `<name>_defs.rs` into `dir`.
///
/// Returns the two paths written, declarations first.
pub fn write_artifacts(
    artifacts: &Artifacts,
    dir: impl AsRef<Path>,
) -> Result<(PathBuf, PathBuf), GenerateError> {
    let dir = dir.as_ref();
    let decls = dir.join(artifacts.declarations_file());
    let defs = dir.join(artifacts.definitions_file());

    std::fs::write(&decls, &artifacts.declarations)?;
    std::fs::write(&defs, &artifacts.definitions)?;

    tracing::debug!(decls = %decls.display(), defs = %defs.display(), "wrote framing artifacts");

    Ok((decls, defs))
}

///
/// FramingBuilder
///
/// Shared state for the generators of one run.
///

pub(crate) struct FramingBuilder<'a> {
    pub(crate) spec: &'a Spec,
    pub(crate) rt: TokenStream,
    pub(crate) config: &'a BuildConfig,
}

impl<'a> FramingBuilder<'a> {
    pub(crate) fn new(spec: &'a Spec, config: &'a BuildConfig) -> Result<Self, GenerateError> {
        let rt = config.runtime_path()?;

        Ok(Self { spec, rt, config })
    }

    pub(crate) fn wire_type(&self, field: &Field) -> Result<WireType, GenerateError> {
        Ok(self.spec.field_type(field)?)
    }

    /// Rust type of a field as carried in a method record.
    pub(crate) fn rust_type(&self, ty: WireType) -> TokenStream {
        let rt = &self.rt;

        match ty {
            WireType::Bit => quote!(bool),
            WireType::Octet => quote!(u8),
            WireType::Short => quote!(u16),
            WireType::Long => quote!(u32),
            WireType::LongLong | WireType::Timestamp => quote!(u64),
            WireType::ShortStr | WireType::LongStr => quote!(Vec<u8>),
            WireType::Table => quote!(#rt::FieldTable),
        }
    }

    /// Record type and variant name of a method, e.g. `QueueDeclareOk`.
    pub(crate) fn method_ident(method: &Method) -> Result<Ident, GenerateError> {
        ident::type_ident(&[method.class_name(), &method.name])
    }

    /// Variant name of a class in the properties sum type, e.g. `Basic`.
    pub(crate) fn class_ident(class: &Class) -> Result<Ident, GenerateError> {
        ident::type_ident(&[&class.name])
    }

    /// Property record type of a class, e.g. `BasicProperties`.
    pub(crate) fn properties_ident(class: &Class) -> Result<Ident, GenerateError> {
        ident::type_ident(&[&class.name, "properties"])
    }
}
