//! Class and exception lookup tables.

use crate::{FramingBuilder, error::GenerateError, ident};
use framegen_spec::{node::Constant, types::ErrorClass};
use proc_macro2::TokenStream;
use quote::quote;
use std::collections::BTreeSet;

/// Constant standing in for exception codes the table does not know.
const FALLBACK_EXCEPTION: &str = "internal-error";

pub(crate) fn generate(builder: &FramingBuilder) -> Result<TokenStream, GenerateError> {
    let mut tokens = quote!();

    tokens.extend(version());
    tokens.extend(classes(builder));
    tokens.extend(exceptions(builder)?);

    Ok(tokens)
}

fn version() -> TokenStream {
    quote! {
        #[must_use]
        pub const fn version() -> (u8, u8, u8) {
            VERSION
        }
    }
}

fn classes(builder: &FramingBuilder) -> TokenStream {
    let rt = &builder.rt;

    let mut names = quote!();
    let mut ids = quote!();

    for class in builder.spec.classes() {
        let id = class.id;
        let name = class.name.as_str();

        names.extend(quote!(#id => Ok(#name),));
        ids.extend(quote!(#name => Ok(#id),));
    }

    quote! {
        pub fn lookup_class_name(class_id: u16) -> Result<&'static str, #rt::FrameError> {
            match class_id {
                #names
                _ => Err(#rt::FrameError::UnknownClassId(class_id)),
            }
        }

        pub fn class_id(name: &str) -> Result<u16, #rt::FrameError> {
            match name {
                #ids
                _ => Err(#rt::FrameError::UnknownClassName(name.to_string())),
            }
        }
    }
}

// exceptions
// the first constant declared with a code owns it
fn exceptions(builder: &FramingBuilder) -> Result<TokenStream, GenerateError> {
    let rt = &builder.rt;
    let fallback = fallback_exception(builder)?;

    let mut infos = quote!();
    let mut codes = quote!();
    let mut names = quote!();
    let mut seen_exceptions = BTreeSet::new();
    let mut seen_exception_names = BTreeSet::new();
    let mut seen_names = BTreeSet::new();

    for constant in builder.spec.constants() {
        let display = ident::constant_name(&constant.name);

        if constant.class.is_exception() {
            let code = exception_code(constant)?;
            let hard = constant.class.is_hard();

            if seen_exceptions.insert(code) {
                infos.extend(quote!(#code => #rt::ExceptionInfo::new(#hard, #code, #display),));
            }
            if seen_exception_names.insert(display.clone()) {
                codes.extend(quote!(#display => Some(#code),));
            }
        }

        if let Ok(code) = u16::try_from(constant.code)
            && seen_names.insert(code)
        {
            names.extend(quote!(#code => Some(#display),));
        }
    }

    let fallback_code = exception_code(fallback)?;
    let fallback_name = ident::constant_name(&fallback.name);
    let fallback_doc = format!(" Unknown codes are reported and classified as `{fallback_name}`.");

    Ok(quote! {
        /// Classify an exception reply code.
        ///
        #[doc = #fallback_doc]
        #[must_use]
        pub fn lookup_exception(code: u16) -> #rt::ExceptionInfo {
            match code {
                #infos
                _ => #rt::unknown_exception(
                    code,
                    #rt::ExceptionInfo::new(true, #fallback_code, #fallback_name),
                ),
            }
        }

        #[must_use]
        pub fn exception_code(name: &str) -> Option<u16> {
            match name {
                #codes
                _ => None,
            }
        }

        /// Display name of the constant declared with `code`.
        #[must_use]
        pub const fn exception_name(code: u16) -> Option<&'static str> {
            match code {
                #names
                _ => None,
            }
        }
    })
}

// fallback_exception
// must exist and be a hard error
fn fallback_exception<'a>(builder: &FramingBuilder<'a>) -> Result<&'a Constant, GenerateError> {
    builder
        .spec
        .constants()
        .iter()
        .find(|c| {
            ident::constant_name(&c.name) == ident::constant_name(FALLBACK_EXCEPTION)
                && c.class == ErrorClass::Hard
        })
        .ok_or(GenerateError::MissingFallback)
}

fn exception_code(constant: &Constant) -> Result<u16, GenerateError> {
    u16::try_from(constant.code).map_err(|_| GenerateError::ConstantOutOfRange {
        name: constant.name.clone(),
        code: constant.code,
    })
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BuildConfig;
    use framegen_spec::node::{Spec, Version};

    fn spec(constants: &[(&str, u32, ErrorClass)]) -> Spec {
        constants.iter().fold(
            Spec::new(Version::new(0, 9, 1), 5672),
            |spec, (name, code, class)| spec.with_constant(Constant::new(*name, *code, *class)),
        )
    }

    fn definitions(spec: &Spec) -> Result<String, GenerateError> {
        let config = BuildConfig::default();
        let builder = FramingBuilder::new(spec, &config)?;

        generate(&builder).map(|tokens| tokens.to_string())
    }

    #[test]
    fn exceptions_are_keyed_by_code_and_name() {
        let spec = spec(&[
            ("frame-end", 206, ErrorClass::None),
            ("not-found", 404, ErrorClass::Soft),
            ("channel-error", 504, ErrorClass::Hard),
            ("internal-error", 541, ErrorClass::Hard),
        ]);
        let code = definitions(&spec).unwrap();

        assert!(code.contains(
            "504u16 => :: framegen_runtime :: ExceptionInfo :: new (true , 504u16 , \"CHANNEL_ERROR\")"
        ));
        assert!(code.contains("\"NOT_FOUND\" => Some (404u16)"));
        assert!(code.contains("206u16 => Some (\"FRAME_END\")"));
        assert!(!code.contains("\"FRAME_END\" => Some"));
    }

    #[test]
    fn duplicate_codes_keep_the_first_constant() {
        let spec = spec(&[
            ("internal-error", 541, ErrorClass::Hard),
            ("legacy-internal-error", 541, ErrorClass::Hard),
        ]);
        let code = definitions(&spec).unwrap();

        assert_eq!(code.matches("541u16 => :: framegen_runtime").count(), 1);
        assert!(code.contains("\"LEGACY_INTERNAL_ERROR\" => Some (541u16)"));
    }

    #[test]
    fn fallback_borrows_from_the_spec_not_the_builder() {
        let spec = spec(&[
            ("channel-error", 504, ErrorClass::Hard),
            ("INTERNAL-ERROR", 541, ErrorClass::Hard),
        ]);
        let config = BuildConfig::default();

        let fallback = {
            let builder = FramingBuilder::new(&spec, &config).unwrap();
            fallback_exception(&builder).unwrap()
        };

        assert_eq!(fallback.code, 541);
        assert_eq!(fallback.name, "INTERNAL-ERROR");
    }

    #[test]
    fn missing_fallback_is_fatal() {
        let spec = spec(&[("channel-error", 504, ErrorClass::Hard)]);

        assert!(matches!(definitions(&spec), Err(GenerateError::MissingFallback)));
    }

    #[test]
    fn soft_fallback_is_not_accepted() {
        let spec = spec(&[("internal-error", 541, ErrorClass::Soft)]);

        assert!(matches!(definitions(&spec), Err(GenerateError::MissingFallback)));
    }

    #[test]
    fn wide_exception_codes_are_rejected() {
        let spec = spec(&[
            ("internal-error", 541, ErrorClass::Hard),
            ("huge", 70_000, ErrorClass::Soft),
        ]);

        assert!(matches!(
            definitions(&spec),
            Err(GenerateError::ConstantOutOfRange { ref name, code: 70_000 }) if name == "huge"
        ));
    }

    #[test]
    fn wide_plain_constants_are_left_out_of_name_lookup() {
        let spec = spec(&[
            ("internal-error", 541, ErrorClass::Hard),
            ("frame-max", 131_072, ErrorClass::None),
        ]);

        assert!(!definitions(&spec).unwrap().contains("FRAME_MAX"));
    }
}
