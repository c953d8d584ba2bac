// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![doc = include_str!(concat!("../", std::env!("CARGO_PKG_README")))]
#![deny(unstable_features, unused_import_braces, unreachable_pub)]
#![forbid(unsafe_code)]

mod class_id;
mod context_association_lists;
mod device_id;
mod endian;
mod ephemeris;
mod error;
mod fields;
mod fixed_point;
mod gain;
mod geolocation;
mod gps_ascii;
mod header;
mod if_context;
mod packet;
mod payload_format;
mod state_and_event;
mod time;
mod trailer;

// Public exports
pub use crate::class_id::ClassIdentifier;
pub use crate::context_association_lists::ContextAssociationLists;
pub use crate::device_id::DeviceIdentifier;
pub use crate::endian::is_platform_little_endian;
pub use crate::ephemeris::EphemerisBlock;
pub use crate::error::VrtError;
pub use crate::fields::Fields;
pub use crate::gain::Gain;
pub use crate::geolocation::GeolocationBlock;
pub use crate::gps_ascii::GpsAscii;
pub use crate::header::{Header, PacketType, Tsf, Tsi, Tsm};
pub use crate::if_context::IfContext;
pub use crate::packet::Packet;
pub use crate::payload_format::{DataItemFormat, DataPacketPayloadFormat, RealOrComplex};
pub use crate::state_and_event::StateAndEventIndicators;
pub use crate::time::{time_calendar, time_difference, Calendar, TimeDelta, Timestamp};
pub use crate::trailer::{AgcOrMgc, Trailer};

/// Standard imports for encoding/decoding a packet end to end.
pub mod prelude {
    pub use crate::error::VrtError;
    pub use crate::fields::Fields;
    pub use crate::header::{Header, PacketType, Tsf, Tsi, Tsm};
    pub use crate::if_context::IfContext;
    pub use crate::packet::Packet;
    pub use crate::trailer::Trailer;
}
