// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
The packet codec: composes header, fields, body, and trailer-or-
if-context into one contiguous word buffer, and the mirror-image
parser.
*/

use crate::error::VrtError;
use crate::fields::{self, Fields};
use crate::header::Header;
use crate::if_context::IfContext;
use crate::trailer::Trailer;

/// A whole VRT packet (ANSI/VITA-49.0 section 5).
///
/// `body` borrows into the buffer this packet was decoded from (or, on
/// the write side, the caller-supplied sample/payload data to copy
/// verbatim); it is opaque to this crate.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Packet<'a> {
    pub header: Header,
    pub fields: Fields,
    pub body: &'a [u32],
    /// Present only on data-typed variants with `header.has_trailer`.
    pub trailer: Option<Trailer>,
    /// Present only on `PacketType::IfContext`/`ExtContext`.
    pub if_context: Option<IfContext<'a>>,
}

impl<'a> Packet<'a> {
    /// Total words this packet occupies, including the header.
    pub fn words(&self) -> usize {
        let tail = if self.header.packet_type.is_context() {
            self.if_context
                .as_ref()
                .map_or_else(|| IfContext::default().words(), |c| c.words())
        } else if self.header.has_trailer {
            1
        } else {
            0
        };
        1 + fields::words_fields(&self.header) + self.body.len() + tail
    }

    /// Encodes the packet into `out`.
    ///
    /// On success, `out[0]`'s `packet_size` half-word equals the
    /// returned word count, matching `self.header.packet_size` when
    /// `validate` is true.
    pub fn write(&self, out: &mut [u32], validate: bool) -> Result<usize, VrtError> {
        let needed = self.words();
        if validate && needed > 0xFFFF {
            return Err(VrtError::BoundsPacketSize);
        }
        if validate && needed != self.header.packet_size as usize {
            return Err(VrtError::PacketSizeMismatch);
        }
        if out.len() < needed {
            return Err(VrtError::BufferSize);
        }

        out[0] = self.header.write(validate)?;
        let mut idx = 1;
        idx += self.fields.write(&self.header, &mut out[idx..], validate)?;

        let body_words = self.body.len();
        out[idx..idx + body_words].copy_from_slice(self.body);
        idx += body_words;

        if self.header.packet_type.is_context() {
            let ctx = self.if_context.unwrap_or_default();
            idx += ctx.write(&mut out[idx..], validate)?;
        } else if self.header.has_trailer {
            let trailer = self.trailer.unwrap_or_default();
            idx += trailer.write(&self.header, &mut out[idx..], validate)?;
        }

        Ok(idx)
    }

    /// Decodes a packet from `buf`.
    pub fn read(buf: &'a [u32], validate: bool) -> Result<(Packet<'a>, usize), VrtError> {
        if buf.is_empty() {
            return Err(VrtError::BufferSize);
        }
        let header = Header::read(buf[0], validate)?;
        let mut idx = 1;

        let (fields, n) = Fields::read(&header, &buf[idx..], validate)?;
        idx += n;

        let packet_size = header.packet_size as usize;
        if buf.len() < packet_size {
            return Err(VrtError::BufferSize);
        }

        let (trailer, if_context, body);
        if header.packet_type.is_context() {
            if packet_size < idx {
                return Err(VrtError::PacketSizeMismatch);
            }
            body = &buf[idx..idx];
            let (ctx, n) = IfContext::read(&buf[idx..], validate)?;
            idx += n;
            if_context = Some(ctx);
            trailer = None;
        } else {
            let trailer_words = Trailer::words(&header);
            if packet_size < idx + trailer_words {
                return Err(VrtError::PacketSizeMismatch);
            }
            let body_words = packet_size - idx - trailer_words;
            body = &buf[idx..idx + body_words];
            idx += body_words;
            let (t, n) = Trailer::read(&header, &buf[idx..], validate)?;
            idx += n;
            trailer = if trailer_words > 0 { Some(t) } else { None };
            if_context = None;
        }

        if idx != packet_size {
            return Err(VrtError::PacketSizeMismatch);
        }

        let packet = Packet {
            header,
            fields,
            body,
            trailer,
            if_context,
        };
        Ok((packet, idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{PacketType, Tsf, Tsi, Tsm};

    fn stream_id_header(packet_size: u16) -> Header {
        Header {
            packet_type: PacketType::IfDataStreamId,
            has_class_id: false,
            has_trailer: false,
            tsm: Tsm::Fine,
            tsi: Tsi::None,
            tsf: Tsf::None,
            packet_count: 0,
            packet_size,
        }
    }

    #[test]
    fn empty_if_data_with_stream_id_scenario_1() {
        let packet = Packet {
            header: stream_id_header(2),
            fields: Fields {
                stream_id: Some(0xABAB_ABAB),
                ..Default::default()
            },
            body: &[],
            trailer: None,
            if_context: None,
        };
        let mut buf = [0u32; 2];
        let n = packet.write(&mut buf, true).unwrap();
        assert_eq!(n, 2);
        assert_eq!(buf, [0x1000_0002, 0xABAB_ABAB]);
        let (decoded, n2) = Packet::read(&buf, true).unwrap();
        assert_eq!(n2, 2);
        assert_eq!(decoded, packet);
    }

    #[test]
    fn if_data_with_three_word_body_scenario_2() {
        let body = [0xCECE_CECEu32, 0xFEFE_FEFE, 0xDEDE_DEDE];
        let packet = Packet {
            header: stream_id_header(5),
            fields: Fields {
                stream_id: Some(0xABAB_ABAB),
                ..Default::default()
            },
            body: &body,
            trailer: None,
            if_context: None,
        };
        let mut buf = [0u32; 5];
        let n = packet.write(&mut buf, true).unwrap();
        assert_eq!(n, 5);
        assert_eq!(
            buf,
            [0x1000_0005, 0xABAB_ABAB, 0xCECE_CECE, 0xFEFE_FEFE, 0xDEDE_DEDE]
        );
        let (decoded, _) = Packet::read(&buf, true).unwrap();
        assert_eq!(decoded.body, &body);
    }

    #[test]
    fn packet_size_mismatch_detected() {
        let packet = Packet {
            header: stream_id_header(99),
            fields: Fields {
                stream_id: Some(0),
                ..Default::default()
            },
            body: &[],
            trailer: None,
            if_context: None,
        };
        let mut buf = [0u32; 8];
        assert_eq!(packet.write(&mut buf, true), Err(VrtError::PacketSizeMismatch));
    }
}
