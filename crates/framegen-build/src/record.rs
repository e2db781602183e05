//! Declarations artifact: constants, records and the name/sum enums.

use crate::{FramingBuilder, error::GenerateError, ident};
use framegen_spec::{
    node::{Class, Field, Method},
    types::{DefaultValue, WireType},
};
use proc_macro2::{Literal, TokenStream};
use quote::quote;

pub(crate) fn generate(builder: &FramingBuilder) -> Result<TokenStream, GenerateError> {
    let mut tokens = quote!();

    tokens.extend(protocol_constants(builder)?);

    for class in builder.spec.classes() {
        tracing::debug!(class = %class.name, methods = class.methods().len(), "declaring class records");

        for method in class.methods() {
            tokens.extend(method_record(builder, method)?);
        }
        tokens.extend(properties_record(builder, class)?);
    }

    tokens.extend(method_name_enum(builder)?);
    tokens.extend(method_enum(builder)?);
    tokens.extend(properties_enum(builder)?);

    Ok(tokens)
}

fn protocol_constants(builder: &FramingBuilder) -> Result<TokenStream, GenerateError> {
    let spec = builder.spec;
    let version = spec.version.reported();
    let (major, minor, revision) = (version.major, version.minor, version.revision);
    let port = spec.port;

    let mut constants = quote!();
    for constant in spec.constants() {
        let ident = ident::constant_ident(&constant.name)?;
        let code = constant.code;

        constants.extend(quote! {
            pub const #ident: u32 = #code;
        });
    }

    Ok(quote! {
        /// Protocol version as peers expect to see it.
        pub const VERSION: (u8, u8, u8) = (#major, #minor, #revision);

        pub const PROTOCOL_PORT: u16 = #port;

        #constants
    })
}

// method_record
// derives Default unless some argument declares its own default
fn method_record(builder: &FramingBuilder, method: &Method) -> Result<TokenStream, GenerateError> {
    let record = FramingBuilder::method_ident(method)?;
    let owner = method.qualified_name();

    let mut fields = quote!();
    let mut inits = quote!();
    let mut has_defaults = false;

    for field in &method.arguments {
        let ident = ident::field_ident(&field.name)?;
        let wire = builder.wire_type(field)?;
        let ty = builder.rust_type(wire);

        fields.extend(quote!(pub #ident: #ty,));

        let init = match &field.default {
            Some(default) => {
                has_defaults = true;
                default_value(builder, &owner, field, wire, default)?
            }
            None => quote!(::core::default::Default::default()),
        };
        inits.extend(quote!(#ident: #init,));
    }

    let doc = format!(" `{owner}` arguments.");

    if has_defaults {
        Ok(quote! {
            #[doc = #doc]
            #[derive(Clone, Debug, PartialEq)]
            pub struct #record {
                #fields
            }

            impl Default for #record {
                fn default() -> Self {
                    Self { #inits }
                }
            }
        })
    } else {
        Ok(quote! {
            #[doc = #doc]
            #[derive(Clone, Debug, Default, PartialEq)]
            pub struct #record {
                #fields
            }
        })
    }
}

// default_value
// the default must be representable in the field's wire type
fn default_value(
    builder: &FramingBuilder,
    owner: &str,
    field: &Field,
    wire: WireType,
    default: &DefaultValue,
) -> Result<TokenStream, GenerateError> {
    let rt = &builder.rt;
    let mismatch = || GenerateError::DefaultMismatch {
        owner: owner.to_string(),
        field: field.name.clone(),
        default: default.clone(),
        ty: wire,
    };

    let tokens = match (wire, default) {
        (WireType::Bit, DefaultValue::Bool(value)) => quote!(#value),
        (WireType::Bit, DefaultValue::Int(value @ (0 | 1))) => {
            let value = *value == 1;
            quote!(#value)
        }
        (WireType::Octet, DefaultValue::Int(value)) => {
            let value = u8::try_from(*value).map_err(|_| mismatch())?;
            quote!(#value)
        }
        (WireType::Short, DefaultValue::Int(value)) => {
            let value = u16::try_from(*value).map_err(|_| mismatch())?;
            quote!(#value)
        }
        (WireType::Long, DefaultValue::Int(value)) => {
            let value = u32::try_from(*value).map_err(|_| mismatch())?;
            quote!(#value)
        }
        (WireType::LongLong | WireType::Timestamp, DefaultValue::Int(value)) => quote!(#value),
        (WireType::ShortStr | WireType::LongStr, DefaultValue::Text(text)) => {
            let bytes = Literal::byte_string(text.as_bytes());
            quote!(#bytes.to_vec())
        }
        (WireType::Table, DefaultValue::EmptyTable) => quote!(#rt::FieldTable::new()),
        _ => return Err(mismatch()),
    };

    Ok(tokens)
}

// properties_record
// every property is optional, absent by default
fn properties_record(builder: &FramingBuilder, class: &Class) -> Result<TokenStream, GenerateError> {
    let record = FramingBuilder::properties_ident(class)?;

    let mut fields = quote!();
    for field in &class.properties {
        let ident = ident::field_ident(&field.name)?;
        let ty = builder.rust_type(builder.wire_type(field)?);

        fields.extend(quote!(pub #ident: Option<#ty>,));
    }

    let doc = format!(" `{}` content properties.", class.name);

    Ok(quote! {
        #[doc = #doc]
        #[derive(Clone, Debug, Default, PartialEq)]
        pub struct #record {
            #fields
        }
    })
}

fn method_name_enum(builder: &FramingBuilder) -> Result<TokenStream, GenerateError> {
    let mut variants = quote!();
    let mut all = quote!();
    let mut names = quote!();
    let mut count = 0usize;

    for method in builder.spec.all_methods() {
        let variant = FramingBuilder::method_ident(method)?;
        let name = method.qualified_name();

        variants.extend(quote!(#variant,));
        all.extend(quote!(Self::#variant,));
        names.extend(quote!(Self::#variant => #name,));
        count += 1;
    }

    Ok(quote! {
        /// Every method of the protocol, in declaration order.
        #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        pub enum MethodName {
            #variants
        }

        impl MethodName {
            pub const ALL: [Self; #count] = [#all];

            /// `class.method` as peers and diagnostics spell it.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    #names
                }
            }
        }

        impl ::core::fmt::Display for MethodName {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    })
}

fn method_enum(builder: &FramingBuilder) -> Result<TokenStream, GenerateError> {
    let mut variants = quote!();
    let mut names = quote!();
    let mut froms = quote!();

    for method in builder.spec.all_methods() {
        let variant = FramingBuilder::method_ident(method)?;

        variants.extend(quote!(#variant(#variant),));
        names.extend(quote!(Self::#variant(_) => MethodName::#variant,));
        froms.extend(quote! {
            impl From<#variant> for Method {
                fn from(record: #variant) -> Self {
                    Self::#variant(record)
                }
            }
        });
    }

    Ok(quote! {
        /// A decoded method with its arguments.
        #[derive(Clone, Debug, PartialEq)]
        pub enum Method {
            #variants
        }

        impl Method {
            #[must_use]
            pub const fn name(&self) -> MethodName {
                match *self {
                    #names
                }
            }
        }

        #froms
    })
}

fn properties_enum(builder: &FramingBuilder) -> Result<TokenStream, GenerateError> {
    let mut variants = quote!();
    let mut ids = quote!();
    let mut froms = quote!();

    for class in builder.spec.classes() {
        let variant = FramingBuilder::class_ident(class)?;
        let record = FramingBuilder::properties_ident(class)?;
        let id = class.id;

        variants.extend(quote!(#variant(#record),));
        ids.extend(quote!(Self::#variant(_) => #id,));
        froms.extend(quote! {
            impl From<#record> for Properties {
                fn from(record: #record) -> Self {
                    Self::#variant(record)
                }
            }
        });
    }

    Ok(quote! {
        /// Content properties of any class.
        #[derive(Clone, Debug, PartialEq)]
        pub enum Properties {
            #variants
        }

        impl Properties {
            #[must_use]
            pub const fn class_id(&self) -> u16 {
                match *self {
                    #ids
                }
            }
        }

        #froms
    })
}

///
/// TESTS
///
