//! Framing codecs generated at build time from the descriptions under
//! `protocol/`.


/// AMQP 0-9-1 subset: connection, channel, exchange, queue and basic.
#[allow(clippy::all, clippy::pedantic, clippy::nursery)]
pub mod amqp_0_9_1 {
    include!(concat!(env!("OUT_DIR"), "/framing_amqp_0_9_1_decls.rs"));
    include!(concat!(env!("OUT_DIR"), "/framing_amqp_0_9_1_defs.rs"));
}

/// Small description exercising the packing corner cases. It declares itself
/// as version 8.0, so it is generated under the 0-8 name.
#[allow(clippy::all, clippy::pedantic, clippy::nursery)]
pub mod toy {
    include!(concat!(env!("OUT_DIR"), "/framing_amqp_0_8_decls.rs"));
    include!(concat!(env!("OUT_DIR"), "/framing_amqp_0_8_defs.rs"));
}

/// A description with properties but no methods.
#[allow(clippy::all, clippy::pedantic, clippy::nursery)]
pub mod headers {
    include!(concat!(env!("OUT_DIR"), "/framing_headers_0_9_1_decls.rs"));
    include!(concat!(env!("OUT_DIR"), "/framing_headers_0_9_1_defs.rs"));
}
