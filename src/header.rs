// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
The packet header: the mandatory first word of every VRT packet
(ANSI/VITA-49.0 section 5.1.1).
*/

use crate::error::VrtError;

/// Selects which of the six VRT packet variants a packet is.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PacketType {
    /// IF data packet without a stream identifier.
    #[default]
    IfDataNoStreamId = 0x0,
    /// IF data packet with a stream identifier.
    IfDataStreamId = 0x1,
    /// Extension data packet without a stream identifier.
    ExtDataNoStreamId = 0x2,
    /// Extension data packet with a stream identifier.
    ExtDataStreamId = 0x3,
    /// IF context packet.
    IfContext = 0x4,
    /// Extension context packet.
    ExtContext = 0x5,
}

impl PacketType {
    fn from_u8(v: u8) -> Result<PacketType, VrtError> {
        match v {
            0x0 => Ok(PacketType::IfDataNoStreamId),
            0x1 => Ok(PacketType::IfDataStreamId),
            0x2 => Ok(PacketType::ExtDataNoStreamId),
            0x3 => Ok(PacketType::ExtDataStreamId),
            0x4 => Ok(PacketType::IfContext),
            0x5 => Ok(PacketType::ExtContext),
            _ => Err(VrtError::InvalidPacketType),
        }
    }

    /// True for `IfContext`/`ExtContext`.
    pub fn is_context(&self) -> bool {
        (*self as u8) & 0x4 != 0
    }

    /// True for every variant that carries a stream identifier word:
    /// every context variant, and every data variant "with stream id".
    pub fn has_stream_id(&self) -> bool {
        (*self as u8) & 0x5 != 0
    }
}

/// Timestamp mode: resolution with which context events are timed.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tsm {
    /// Precise timing, down to the TSF's resolution.
    #[default]
    Fine = 0x0,
    /// Context events occurred sometime within the data sampling
    /// interval of the paired data packet stream. Only valid on
    /// context packets.
    Coarse = 0x1,
}

/// Integer-seconds timestamp encoding.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tsi {
    /// No integer-seconds timestamp.
    #[default]
    None = 0x0,
    /// Seconds since 1970-01-01 00:00:00 UTC.
    Utc = 0x1,
    /// Seconds since 1980-01-06 00:00:00 GPS.
    Gps = 0x2,
    /// Some other time reference.
    Other = 0x3,
}

/// Fractional-seconds timestamp encoding.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tsf {
    /// No fractional-seconds timestamp.
    #[default]
    None = 0x0,
    /// A sample counter since the last integer-second boundary.
    SampleCount = 0x1,
    /// Picoseconds since the last integer-second boundary.
    RealTime = 0x2,
    /// A free-running sample count from the first sample.
    FreeRunningCount = 0x3,
}

fn tsi_from_u8(v: u8) -> Result<Tsi, VrtError> {
    match v {
        0 => Ok(Tsi::None),
        1 => Ok(Tsi::Utc),
        2 => Ok(Tsi::Gps),
        3 => Ok(Tsi::Other),
        _ => Err(VrtError::InvalidTsi),
    }
}

fn tsf_from_u8(v: u8) -> Result<Tsf, VrtError> {
    match v {
        0 => Ok(Tsf::None),
        1 => Ok(Tsf::SampleCount),
        2 => Ok(Tsf::RealTime),
        3 => Ok(Tsf::FreeRunningCount),
        _ => Err(VrtError::InvalidTsf),
    }
}

/// The packet header (always exactly 1 word).
///
/// Bit layout, most-significant bit first: `packet_type:4,
/// has_class_id:1, has_trailer:1, tsm:1, reserved:1, tsi:2, tsf:2,
/// packet_count:4, packet_size:16`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    /// Which of the six packet variants this is.
    pub packet_type: PacketType,
    /// Whether a class identifier follows in the fields prelude.
    pub has_class_id: bool,
    /// Whether a trailer word follows the body. Must be `false` on
    /// context variants.
    pub has_trailer: bool,
    /// Timestamp resolution mode. `Coarse` is only valid on context
    /// variants.
    pub tsm: Tsm,
    /// Integer-seconds timestamp encoding.
    pub tsi: Tsi,
    /// Fractional-seconds timestamp encoding.
    pub tsf: Tsf,
    /// Modulo-16 packet sequence counter.
    pub packet_count: u8,
    /// Total packet size in 32-bit words, including this header.
    pub packet_size: u16,
}

impl Header {
    /// Validates the header's own field constraints (does not check
    /// `packet_size` against the recomputed layout; that is the packet
    /// codec's job).
    fn validate(&self) -> Result<(), VrtError> {
        if self.has_trailer && self.packet_type.is_context() {
            return Err(VrtError::TrailerInContext);
        }
        if matches!(self.tsm, Tsm::Coarse) && !self.packet_type.is_context() {
            return Err(VrtError::TsmInData);
        }
        if self.packet_count > 0x0F {
            return Err(VrtError::BoundsPacketCount);
        }
        Ok(())
    }

    /// Encodes the header into `word`, returning `Ok(1)` (the header is
    /// always 1 word) or an error.
    ///
    /// When `validate` is `false`, only the reserved bit is forced to
    /// zero; the enumerated-field and structural checks in
    /// [`Header::validate`] are skipped and the header is written as given.
    pub fn write(&self, validate: bool) -> Result<u32, VrtError> {
        if validate {
            self.validate()?;
        }
        let mut w: u32 = 0;
        w |= (self.packet_type as u32) << 28;
        w |= (self.has_class_id as u32) << 27;
        w |= (self.has_trailer as u32) << 26;
        w |= (self.tsm as u32) << 25;
        // bit 24 reserved, always zero
        w |= (self.tsi as u32 & 0b11) << 22;
        w |= (self.tsf as u32 & 0b11) << 20;
        w |= (self.packet_count as u32 & 0x0F) << 16;
        w |= self.packet_size as u32;
        Ok(w)
    }

    /// Decodes a header from `word`.
    ///
    /// When `validate` is `false`, the reserved bit and the
    /// enumerated/structural checks in [`Header::validate`] are not
    /// enforced: a nonzero reserved bit or an out-of-range enum value
    /// is demoted to its nearest in-range interpretation rather than
    /// raised as an error where that is representable, and structural
    /// rules (trailer-in-context, tsm-in-data, packet-count bounds) are
    /// skipped entirely.
    pub fn read(word: u32, validate: bool) -> Result<Header, VrtError> {
        let packet_type = PacketType::from_u8(((word >> 28) & 0x0F) as u8)?;
        let has_class_id = (word >> 27) & 1 != 0;
        let has_trailer = (word >> 26) & 1 != 0;
        let tsm = if (word >> 25) & 1 != 0 { Tsm::Coarse } else { Tsm::Fine };
        if validate && (word >> 24) & 1 != 0 {
            return Err(VrtError::Reserved);
        }
        let tsi = tsi_from_u8(((word >> 22) & 0b11) as u8)?;
        let tsf = tsf_from_u8(((word >> 20) & 0b11) as u8)?;
        let packet_count = ((word >> 16) & 0x0F) as u8;
        let packet_size = (word & 0xFFFF) as u16;

        let header = Header {
            packet_type,
            has_class_id,
            has_trailer,
            tsm,
            tsi,
            tsf,
            packet_count,
            packet_size,
        };
        if validate {
            header.validate()?;
        }
        Ok(header)
    }
}
