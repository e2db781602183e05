//! Method codecs and per-method metadata.

use crate::{
    FramingBuilder,
    error::GenerateError,
    ident,
    packer::{self, WireChunk},
};
use framegen_spec::{node::Method, types::WireType};
use proc_macro2::{Ident, Literal, Span, TokenStream};
use quote::{format_ident, quote};

pub(crate) fn generate(builder: &FramingBuilder) -> Result<TokenStream, GenerateError> {
    let mut tokens = quote!();

    tokens.extend(metadata(builder)?);
    tokens.extend(decoders(builder)?);
    tokens.extend(encoders(builder)?);

    Ok(tokens)
}

///
/// METADATA
///

fn metadata(builder: &FramingBuilder) -> Result<TokenStream, GenerateError> {
    let rt = &builder.rt;

    let mut lookups = quote!();
    let mut ids = quote!();
    let mut contents = quote!();
    let mut fieldnames = quote!();
    let mut records = quote!();
    let mut syncs = quote!();

    for method in builder.spec.all_methods() {
        let variant = FramingBuilder::method_ident(method)?;
        let class_id = method.class_id();
        let method_id = method.id;
        let has_content = method.has_content;
        let names = method
            .arguments
            .iter()
            .map(|field| ident::field_name(&field.name));

        lookups.extend(quote!((#class_id, #method_id) => Ok(MethodName::#variant),));
        ids.extend(quote!(MethodName::#variant => (#class_id, #method_id),));
        contents.extend(quote!(MethodName::#variant => #has_content,));
        fieldnames.extend(quote!(MethodName::#variant => &[#(#names),*],));
        records.extend(quote!(MethodName::#variant => Method::#variant(#variant::default()),));
        syncs.extend(synchronous_arm(builder, method, &variant)?);
    }

    Ok(quote! {
        /// Resolve a wire `(class id, method id)` pair.
        pub fn lookup_method_name(
            class_id: u16,
            method_id: u16,
        ) -> Result<MethodName, #rt::FrameError> {
            match (class_id, method_id) {
                #lookups
                _ => Err(#rt::FrameError::UnknownMethodId { class_id, method_id }),
            }
        }

        #[must_use]
        pub const fn method_id(name: MethodName) -> (u16, u16) {
            match name {
                #ids
            }
        }

        #[must_use]
        pub const fn method_has_content(name: MethodName) -> bool {
            match name {
                #contents
            }
        }

        /// Argument names in wire order.
        #[must_use]
        pub const fn method_fieldnames(name: MethodName) -> &'static [&'static str] {
            match name {
                #fieldnames
            }
        }

        /// A record of the named method holding its default arguments.
        #[must_use]
        pub fn method_record(name: MethodName) -> Method {
            match name {
                #records
            }
        }

        /// Whether the sender of this method waits for a reply.
        #[must_use]
        pub const fn is_method_synchronous(method: &Method) -> bool {
            match *method {
                #syncs
            }
        }
    })
}

// synchronous_arm
// on a synchronous method a no-wait bit overrides the static flag per instance
fn synchronous_arm(
    builder: &FramingBuilder,
    method: &Method,
    variant: &Ident,
) -> Result<TokenStream, GenerateError> {
    if method.synchronous {
        for field in &method.arguments {
            if ident::is_no_wait(&field.name) && builder.wire_type(field)?.is_bit() {
                let no_wait = ident::field_ident(&field.name)?;

                return Ok(quote!(Method::#variant(ref record) => !record.#no_wait,));
            }
        }
    }

    let synchronous = method.synchronous;

    Ok(quote!(Method::#variant(_) => #synchronous,))
}

///
/// DECODE
///

fn decoders(builder: &FramingBuilder) -> Result<TokenStream, GenerateError> {
    let rt = &builder.rt;

    let mut arms = quote!();
    let mut fns = quote!();

    for method in builder.spec.all_methods() {
        tracing::debug!(method = %method.qualified_name(), "generating method codec");

        let variant = FramingBuilder::method_ident(method)?;
        let decode = ident::fn_ident(&["decode", method.class_name(), &method.name])?;

        arms.extend(quote!(MethodName::#variant => #decode(payload).map(Method::#variant),));
        fns.extend(decoder(builder, method, &variant, &decode)?);
    }

    Ok(quote! {
        /// Decode the argument payload of a method frame.
        pub fn decode_method_fields(
            name: MethodName,
            payload: &[u8],
        ) -> Result<Method, #rt::FrameError> {
            match name {
                #arms
            }
        }

        #fns
    })
}

fn decoder(
    builder: &FramingBuilder,
    method: &Method,
    record: &Ident,
    decode: &Ident,
) -> Result<TokenStream, GenerateError> {
    let rt = &builder.rt;
    let name = method.qualified_name();
    let chunks = packer::pack_fields(builder.spec, &method.arguments)?;

    let mut reads = quote!();
    let mut post = quote!();

    for chunk in &chunks {
        match chunk {
            WireChunk::FixedWidth { field, ty } | WireChunk::VariableWidth { field, ty } => {
                let local = format_ident!("f{}", field.index());
                let read = codec_call(*ty);

                reads.extend(quote!(let #local = r.#read()?;));

                if *ty == WireType::ShortStr && !method.has_content {
                    post.extend(quote!(#rt::assert_utf8(#name, &#local)?;));
                }
            }
            WireChunk::BitGroup(group) => {
                let bits = format_ident!("bits{}", group.start());
                reads.extend(quote!(let #bits = r.octet()?;));

                for (offset, field) in (0u8..).zip(group.fields()) {
                    let local = format_ident!("f{}", field.index());
                    let mask = Literal::u8_suffixed(1u8 << offset);

                    post.extend(quote!(let #local = (#bits & #mask) != 0u8;));
                }
            }
        }
    }

    let mut inits = quote!();
    for field in &method.arguments {
        let ident = ident::field_ident(&field.name)?;
        let local = format_ident!("f{}", field.index());

        inits.extend(quote!(#ident: #local,));
    }

    let reader = if chunks.is_empty() {
        quote!(let r = #rt::Reader::new(#name, payload);)
    } else {
        quote!(let mut r = #rt::Reader::new(#name, payload);)
    };

    Ok(quote! {
        fn #decode(payload: &[u8]) -> Result<#record, #rt::FrameError> {
            #reader
            #reads
            r.finish()?;
            #post

            Ok(#record { #inits })
        }
    })
}

///
/// ENCODE
///

fn encoders(builder: &FramingBuilder) -> Result<TokenStream, GenerateError> {
    let rt = &builder.rt;

    let mut arms = quote!();
    let mut fns = quote!();

    for method in builder.spec.all_methods() {
        let variant = FramingBuilder::method_ident(method)?;
        let encode = ident::fn_ident(&["encode", method.class_name(), &method.name])?;

        arms.extend(quote!(Method::#variant(ref record) => #encode(record),));
        fns.extend(encoder(builder, method, &variant, &encode)?);
    }

    Ok(quote! {
        /// Encode the argument payload of a method frame.
        pub fn encode_method_fields(method: &Method) -> Result<Vec<u8>, #rt::FrameError> {
            match *method {
                #arms
            }
        }

        #fns
    })
}

fn encoder(
    builder: &FramingBuilder,
    method: &Method,
    record: &Ident,
    encode: &Ident,
) -> Result<TokenStream, GenerateError> {
    let rt = &builder.rt;
    let chunks = packer::pack_fields(builder.spec, &method.arguments)?;

    if chunks.is_empty() {
        return Ok(quote! {
            fn #encode(_record: &#record) -> Result<Vec<u8>, #rt::FrameError> {
                Ok(#rt::Writer::new().into_bytes())
            }
        });
    }

    let mut writes = quote!();

    for chunk in &chunks {
        match chunk {
            WireChunk::FixedWidth { field, ty } => {
                let ident = ident::field_ident(&field.name)?;
                let write = codec_call(*ty);

                writes.extend(quote!(w.#write(record.#ident);));
            }
            WireChunk::VariableWidth { field, ty } => {
                let ident = ident::field_ident(&field.name)?;
                let write = codec_call(*ty);

                writes.extend(quote!(w.#write(&record.#ident)?;));
            }
            WireChunk::BitGroup(group) => {
                let mut members = Vec::with_capacity(group.len());

                for (offset, field) in (0u8..).zip(group.fields()) {
                    let ident = ident::field_ident(&field.name)?;

                    members.push(if offset == 0 {
                        quote!(u8::from(record.#ident))
                    } else {
                        quote!((u8::from(record.#ident) << #offset))
                    });
                }

                writes.extend(quote!(w.octet(#(#members)|*);));
            }
        }
    }

    Ok(quote! {
        fn #encode(record: &#record) -> Result<Vec<u8>, #rt::FrameError> {
            let mut w = #rt::Writer::new();
            #writes

            Ok(w.into_bytes())
        }
    })
}

///
/// HELPERS
///

// codec_call
// Reader and Writer name their methods after the wire type
pub(crate) fn codec_call(ty: WireType) -> Ident {
    let name = match ty {
        WireType::Bit | WireType::Octet => "octet",
        WireType::Short => "short",
        WireType::Long => "long",
        WireType::LongLong => "longlong",
        WireType::Timestamp => "timestamp",
        WireType::ShortStr => "shortstr",
        WireType::LongStr => "longstr",
        WireType::Table => "table",
    };

    Ident::new(name, Span::call_site())
}

///
/// TESTS
///
