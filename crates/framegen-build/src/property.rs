//! Property codecs.
//!
//! Content properties are preceded by a 16-bit presence bitmap. Property `i`
//! owns bit `15 - i`; bits past the last property are reserved and must be
//! zero. A `bit` property carries its value in its presence bit alone.

use crate::{FramingBuilder, error::GenerateError, ident, method::codec_call};
use framegen_spec::node::Class;
use proc_macro2::{Ident, Span, TokenStream};
use quote::{format_ident, quote};
use syn::LitInt;

pub(crate) fn generate(builder: &FramingBuilder) -> Result<TokenStream, GenerateError> {
    let rt = &builder.rt;

    let mut decode_arms = quote!();
    let mut encode_arms = quote!();
    let mut fns = quote!();

    for class in builder.spec.classes() {
        tracing::debug!(class = %class.name, properties = class.properties.len(), "generating property codec");

        let id = class.id;
        let variant = FramingBuilder::class_ident(class)?;
        let record = FramingBuilder::properties_ident(class)?;
        let decode = ident::fn_ident(&["decode", &class.name, "properties"])?;
        let encode = ident::fn_ident(&["encode", &class.name, "properties"])?;

        decode_arms.extend(quote!(#id => #decode(payload).map(Properties::#variant),));
        encode_arms.extend(quote!(Properties::#variant(ref properties) => #encode(properties),));

        fns.extend(decoder(builder, class, &record, &decode)?);
        fns.extend(encoder(builder, class, &record, &encode)?);
    }

    Ok(quote! {
        /// Decode the property payload of a content header frame.
        pub fn decode_properties(
            class_id: u16,
            payload: &[u8],
        ) -> Result<Properties, #rt::FrameError> {
            match class_id {
                #decode_arms
                _ => Err(#rt::FrameError::UnknownClassId(class_id)),
            }
        }

        /// Encode the property payload of a content header frame.
        pub fn encode_properties(properties: &Properties) -> Result<Vec<u8>, #rt::FrameError> {
            match *properties {
                #encode_arms
            }
        }

        #fns
    })
}

// presence_bit
// property i owns bit 15 - i, counting from the least significant bit
fn presence_bit(index: usize) -> LitInt {
    flag_literal(0x8000u16 >> index)
}

// reserved_mask
// every bit below the last property's presence bit
fn reserved_mask(count: usize) -> LitInt {
    flag_literal((1u16 << (16 - count)) - 1)
}

fn flag_literal(value: u16) -> LitInt {
    LitInt::new(&format!("0x{value:04x}u16"), Span::call_site())
}

fn decoder(
    builder: &FramingBuilder,
    class: &Class,
    record: &Ident,
    decode: &Ident,
) -> Result<TokenStream, GenerateError> {
    let rt = &builder.rt;
    let name = class.name.as_str();

    if class.properties.is_empty() {
        return Ok(quote! {
            fn #decode(payload: &[u8]) -> Result<#record, #rt::FrameError> {
                #rt::Reader::new(#name, payload).finish()?;

                Ok(#record {})
            }
        });
    }

    let id = class.id;
    let reserved = reserved_mask(class.properties.len());

    let mut reads = quote!();
    let mut inits = quote!();

    for field in &class.properties {
        let local = format_ident!("p{}", field.index());
        let ident = ident::field_ident(&field.name)?;
        let bit = presence_bit(field.index());
        let ty = builder.wire_type(field)?;

        let value = if ty.is_bit() {
            quote!(Some(true))
        } else {
            let read = codec_call(ty);
            quote!(Some(r.#read()?))
        };

        reads.extend(quote! {
            let #local = if flags & #bit != 0u16 { #value } else { None };
        });
        inits.extend(quote!(#ident: #local,));
    }

    Ok(quote! {
        fn #decode(payload: &[u8]) -> Result<#record, #rt::FrameError> {
            let mut r = #rt::Reader::new(#name, payload);
            let flags = r.short()?;
            if flags & #reserved != 0u16 {
                return Err(#rt::FrameError::ReservedFlags { class_id: #id, flags });
            }
            #reads
            r.finish()?;

            Ok(#record { #inits })
        }
    })
}

fn encoder(
    builder: &FramingBuilder,
    class: &Class,
    record: &Ident,
    encode: &Ident,
) -> Result<TokenStream, GenerateError> {
    let rt = &builder.rt;

    if class.properties.is_empty() {
        return Ok(quote! {
            fn #encode(_properties: &#record) -> Result<Vec<u8>, #rt::FrameError> {
                Ok(Vec::new())
            }
        });
    }

    let mut writes = quote!();
    let mut has_values = false;

    for field in &class.properties {
        let ident = ident::field_ident(&field.name)?;
        let bit = presence_bit(field.index());
        let ty = builder.wire_type(field)?;

        if ty.is_bit() {
            writes.extend(quote! {
                if properties.#ident == Some(true) {
                    flags |= #bit;
                }
            });
            continue;
        }

        has_values = true;
        let write = codec_call(ty);

        let body = if ty.is_integer() {
            quote! {
                if let Some(value) = properties.#ident {
                    flags |= #bit;
                    w.#write(value);
                }
            }
        } else {
            quote! {
                if let Some(value) = &properties.#ident {
                    flags |= #bit;
                    w.#write(value)?;
                }
            }
        };
        writes.extend(body);
    }

    let writer = if has_values {
        quote!(let mut w = #rt::Writer::new();)
    } else {
        quote!(let w = #rt::Writer::new();)
    };

    Ok(quote! {
        fn #encode(properties: &#record) -> Result<Vec<u8>, #rt::FrameError> {
            let mut flags: u16 = 0;
            #writer
            #writes

            Ok(w.into_flagged(flags))
        }
    })
}

///
/// TESTS
///
