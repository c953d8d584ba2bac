// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
The fields prelude: the optional run of words between the header and
the packet body (stream identifier, class identifier, and the
integer/fractional timestamps).
*/

use crate::class_id::ClassIdentifier;
use crate::error::VrtError;
use crate::header::{Header, Tsf, Tsi};

const REAL_TIME_BOUND_PS: u64 = 1_000_000_000_000;

/// The fields prelude (ANSI/VITA-49.0 section 5.1.2-5.1.4).
///
/// Which of these are actually present on the wire is determined
/// entirely by the paired [`Header`]: `stream_id` by
/// `packet_type.has_stream_id()`, `class_id` by `has_class_id`,
/// `integer_seconds_timestamp` by `tsi != Tsi::None`, and
/// `fractional_seconds_timestamp` by `tsf != Tsf::None`. A field not
/// required by the header is ignored on write and always read back as
/// `None`.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fields {
    pub stream_id: Option<u32>,
    pub class_id: Option<ClassIdentifier>,
    pub integer_seconds_timestamp: Option<u32>,
    pub fractional_seconds_timestamp: Option<u64>,
}

/// Number of words the fields prelude occupies for a given header: 0..6.
pub(crate) fn words_fields(header: &Header) -> usize {
    header.packet_type.has_stream_id() as usize
        + 2 * header.has_class_id as usize
        + !matches!(header.tsi, Tsi::None) as usize
        + 2 * !matches!(header.tsf, Tsf::None) as usize
}

impl Fields {
    /// Encodes the fields required by `header` into `out`.
    pub fn write(&self, header: &Header, out: &mut [u32], validate: bool) -> Result<usize, VrtError> {
        let needed = words_fields(header);
        if out.len() < needed {
            return Err(VrtError::BufferSize);
        }

        let mut idx = 0;
        if header.packet_type.has_stream_id() {
            out[idx] = self.stream_id.unwrap_or(0);
            idx += 1;
        }
        if header.has_class_id {
            let class_id = self.class_id.unwrap_or_default();
            idx += class_id.write(&mut out[idx..], validate)?;
        }
        if !matches!(header.tsi, Tsi::None) {
            out[idx] = self.integer_seconds_timestamp.unwrap_or(0);
            idx += 1;
        }
        if !matches!(header.tsf, Tsf::None) {
            if validate {
                if let Some(frac) = self.fractional_seconds_timestamp {
                    if matches!(header.tsf, Tsf::RealTime) && frac >= REAL_TIME_BOUND_PS {
                        return Err(VrtError::BoundsRealTime);
                    }
                }
            }
            let frac = self.fractional_seconds_timestamp.unwrap_or(0);
            out[idx] = (frac >> 32) as u32;
            out[idx + 1] = frac as u32;
            idx += 2;
        }
        Ok(idx)
    }

    /// Decodes the fields required by `header` from `buf`.
    pub fn read(header: &Header, buf: &[u32], validate: bool) -> Result<(Fields, usize), VrtError> {
        let needed = words_fields(header);
        if buf.len() < needed {
            return Err(VrtError::BufferSize);
        }

        let mut fields = Fields::default();
        let mut idx = 0;
        if header.packet_type.has_stream_id() {
            fields.stream_id = Some(buf[idx]);
            idx += 1;
        }
        if header.has_class_id {
            let (class_id, n) = ClassIdentifier::read(&buf[idx..], validate)?;
            fields.class_id = Some(class_id);
            idx += n;
        }
        if !matches!(header.tsi, Tsi::None) {
            fields.integer_seconds_timestamp = Some(buf[idx]);
            idx += 1;
        }
        if !matches!(header.tsf, Tsf::None) {
            let frac = ((buf[idx] as u64) << 32) | buf[idx + 1] as u64;
            if validate && matches!(header.tsf, Tsf::RealTime) && frac >= REAL_TIME_BOUND_PS {
                return Err(VrtError::BoundsRealTime);
            }
            fields.fractional_seconds_timestamp = Some(frac);
            idx += 2;
        }
        Ok((fields, idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{PacketType, Tsm};

    fn header_with(packet_type: PacketType, tsi: Tsi, tsf: Tsf, has_class_id: bool) -> Header {
        Header {
            packet_type,
            has_class_id,
            has_trailer: false,
            tsm: Tsm::Fine,
            tsi,
            tsf,
            packet_count: 0,
            packet_size: 0,
        }
    }

    #[test]
    fn stream_id_only() {
        let header = header_with(PacketType::IfDataStreamId, Tsi::None, Tsf::None, false);
        let f = Fields {
            stream_id: Some(0xABAB_ABAB),
            ..Default::default()
        };
        let mut buf = [0u32; 1];
        let n = f.write(&header, &mut buf, true).unwrap();
        assert_eq!(n, 1);
        assert_eq!(buf, [0xABAB_ABAB]);
        let (decoded, n2) = Fields::read(&header, &buf, true).unwrap();
        assert_eq!(n2, 1);
        assert_eq!(decoded.stream_id, Some(0xABAB_ABAB));
    }

    #[test]
    fn real_time_bound_is_rejected_when_validating() {
        let header = header_with(PacketType::IfDataNoStreamId, Tsi::Utc, Tsf::RealTime, false);
        let f = Fields {
            integer_seconds_timestamp: Some(0),
            fractional_seconds_timestamp: Some(REAL_TIME_BOUND_PS),
            ..Default::default()
        };
        let mut buf = [0u32; 3];
        assert_eq!(f.write(&header, &mut buf, true), Err(VrtError::BoundsRealTime));
        let n = f.write(&header, &mut buf, false).unwrap();
        assert_eq!(n, 3);
        assert_eq!(&buf[1..3], &[0x0000_00E8, 0xD4A5_1000]);
    }

    #[test]
    fn no_fields_when_header_requires_none() {
        let header = header_with(PacketType::IfDataNoStreamId, Tsi::None, Tsf::None, false);
        let f = Fields::default();
        let mut buf = [0u32; 0];
        assert_eq!(words_fields(&header), 0);
        assert_eq!(f.write(&header, &mut buf, true).unwrap(), 0);
    }

    #[test]
    fn class_id_included_when_flagged() {
        let header = header_with(PacketType::IfDataNoStreamId, Tsi::None, Tsf::None, true);
        assert_eq!(words_fields(&header), 2);
        let f = Fields {
            class_id: Some(ClassIdentifier {
                oui: 0x0001_02,
                information_class_code: 1,
                packet_class_code: 2,
            }),
            ..Default::default()
        };
        let mut buf = [0u32; 2];
        f.write(&header, &mut buf, true).unwrap();
        let (decoded, _) = Fields::read(&header, &buf, true).unwrap();
        assert_eq!(decoded.class_id, f.class_id);
    }
}
