// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Data packet payload format: a two-word IF context subsection
describing the signal sample layout carried by the paired data packets.
*/

use crate::error::VrtError;

/// Whether each sample is real or a complex pair, and in which part order.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RealOrComplex {
    Real = 0,
    ComplexCartesian = 1,
    ComplexPolar = 2,
}

impl RealOrComplex {
    fn from_u8(v: u8) -> Result<RealOrComplex, VrtError> {
        match v {
            0 => Ok(RealOrComplex::Real),
            1 => Ok(RealOrComplex::ComplexCartesian),
            2 => Ok(RealOrComplex::ComplexPolar),
            _ => Err(VrtError::InvalidRealOrComplex),
        }
    }
}

/// The numeric representation of one sample component.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataItemFormat {
    SignedFixedPoint = 0x00,
    SignedVrt1 = 0x01,
    SignedVrt2 = 0x02,
    SignedVrt3 = 0x03,
    SignedVrt4 = 0x04,
    SignedVrt5 = 0x05,
    SignedVrt6 = 0x06,
    IeeeFloat32 = 0x0E,
    IeeeFloat64 = 0x0F,
    UnsignedFixedPoint = 0x10,
    UnsignedVrt1 = 0x11,
    UnsignedVrt2 = 0x12,
    UnsignedVrt3 = 0x13,
    UnsignedVrt4 = 0x14,
    UnsignedVrt5 = 0x15,
    UnsignedVrt6 = 0x16,
}

impl DataItemFormat {
    fn from_u8(v: u8) -> Result<DataItemFormat, VrtError> {
        use DataItemFormat::*;
        Ok(match v {
            0x00 => SignedFixedPoint,
            0x01 => SignedVrt1,
            0x02 => SignedVrt2,
            0x03 => SignedVrt3,
            0x04 => SignedVrt4,
            0x05 => SignedVrt5,
            0x06 => SignedVrt6,
            0x0E => IeeeFloat32,
            0x0F => IeeeFloat64,
            0x10 => UnsignedFixedPoint,
            0x11 => UnsignedVrt1,
            0x12 => UnsignedVrt2,
            0x13 => UnsignedVrt3,
            0x14 => UnsignedVrt4,
            0x15 => UnsignedVrt5,
            0x16 => UnsignedVrt6,
            _ => return Err(VrtError::InvalidDataItemFormat),
        })
    }
}

/// Data packet payload format (IF context subsection 16).
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataPacketPayloadFormat {
    pub packing_method: bool,
    pub real_or_complex: RealOrComplex,
    pub data_item_format: DataItemFormat,
    pub sample_component_repeat: bool,
    pub event_tag_size: u8,
    pub channel_tag_size: u8,
    /// Exposed exactly as it appears on the wire, without the
    /// standard's actual-minus-one bias.
    pub item_packing_field_size: u8,
    pub data_item_size: u8,
    pub repeat_count: u16,
    pub vector_size: u16,
}

impl Default for DataPacketPayloadFormat {
    fn default() -> Self {
        DataPacketPayloadFormat {
            packing_method: false,
            real_or_complex: RealOrComplex::Real,
            data_item_format: DataItemFormat::SignedFixedPoint,
            sample_component_repeat: false,
            event_tag_size: 0,
            channel_tag_size: 0,
            item_packing_field_size: 0,
            data_item_size: 0,
            repeat_count: 0,
            vector_size: 0,
        }
    }
}

impl DataPacketPayloadFormat {
    pub const WORDS: usize = 2;

    fn validate(&self) -> Result<(), VrtError> {
        if self.event_tag_size > 0b111 {
            return Err(VrtError::BoundsEventTagSize);
        }
        if self.channel_tag_size > 0b1111 {
            return Err(VrtError::BoundsChannelTagSize);
        }
        if self.item_packing_field_size > 0b11_1111 {
            return Err(VrtError::BoundsItemPackingFieldSize);
        }
        if self.data_item_size > 0b11_1111 {
            return Err(VrtError::BoundsDataItemSize);
        }
        Ok(())
    }

    pub fn write(&self, out: &mut [u32], validate: bool) -> Result<usize, VrtError> {
        if out.len() < Self::WORDS {
            return Err(VrtError::BufferSize);
        }
        if validate {
            self.validate()?;
        }
        let mut w0: u32 = 0;
        w0 |= (self.packing_method as u32) << 31;
        w0 |= (self.real_or_complex as u32 & 0b11) << 29;
        w0 |= (self.data_item_format as u32 & 0b1_1111) << 24;
        w0 |= (self.sample_component_repeat as u32) << 23;
        w0 |= (self.event_tag_size as u32 & 0b111) << 20;
        w0 |= (self.channel_tag_size as u32 & 0b1111) << 16;
        w0 |= (self.item_packing_field_size as u32 & 0b11_1111) << 10;
        w0 |= self.data_item_size as u32 & 0b11_1111;
        out[0] = w0;
        out[1] = ((self.repeat_count as u32) << 16) | self.vector_size as u32;
        Ok(Self::WORDS)
    }

    pub fn read(buf: &[u32], validate: bool) -> Result<(DataPacketPayloadFormat, usize), VrtError> {
        if buf.len() < Self::WORDS {
            return Err(VrtError::BufferSize);
        }
        let w0 = buf[0];
        if validate && (w0 >> 6) & 0b1111 != 0 {
            return Err(VrtError::Reserved);
        }
        let format = DataPacketPayloadFormat {
            packing_method: (w0 >> 31) & 1 != 0,
            real_or_complex: RealOrComplex::from_u8(((w0 >> 29) & 0b11) as u8)?,
            data_item_format: DataItemFormat::from_u8(((w0 >> 24) & 0b1_1111) as u8)?,
            sample_component_repeat: (w0 >> 23) & 1 != 0,
            event_tag_size: ((w0 >> 20) & 0b111) as u8,
            channel_tag_size: ((w0 >> 16) & 0b1111) as u8,
            item_packing_field_size: ((w0 >> 10) & 0b11_1111) as u8,
            data_item_size: (w0 & 0b11_1111) as u8,
            repeat_count: (buf[1] >> 16) as u16,
            vector_size: buf[1] as u16,
        };
        if validate {
            format.validate()?;
        }
        Ok((format, Self::WORDS))
    }
}
