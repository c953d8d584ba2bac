// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
The data trailer: an optional final word on data packets carrying
state-and-event style indicator bits plus an associated-context-packet
count.
*/

use crate::error::VrtError;
use crate::header::{Header, PacketType};

/// AGC (automatic gain control) or MGC (manual gain control) state.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgcOrMgc {
    Mgc,
    Agc,
}

// has-bit positions, counted from bit 31 down; twelve has/value pairs
// occupy bits 31..20 (has) and 19..8 (value), one-to-one.
const HAS_SHIFT: u32 = 20;
const VALUE_SHIFT: u32 = 8;
const ASSOC_HAS_BIT: u32 = 7;
const ASSOC_COUNT_MASK: u32 = 0x7F;

/// The trailer (ANSI/VITA-49.0 section 5.1.6).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trailer {
    pub calibrated_time: Option<bool>,
    pub valid_data: Option<bool>,
    pub reference_lock: Option<bool>,
    pub agc_or_mgc: Option<AgcOrMgc>,
    pub detected_signal: Option<bool>,
    pub spectral_inversion: Option<bool>,
    pub over_range: Option<bool>,
    pub sample_loss: Option<bool>,
    pub user_defined11: Option<bool>,
    pub user_defined10: Option<bool>,
    pub user_defined9: Option<bool>,
    pub user_defined8: Option<bool>,
    pub associated_context_packet_count: Option<u8>,
}

impl Trailer {
    /// Number of words the trailer occupies: 0 on context packets or
    /// when `header.has_trailer` is false, otherwise 1.
    pub fn words(header: &Header) -> usize {
        if header.packet_type.is_context() || !header.has_trailer {
            0
        } else {
            1
        }
    }

    fn pairs(&self) -> [(u32, Option<bool>); 12] {
        [
            (11, self.calibrated_time),
            (10, self.valid_data),
            (9, self.reference_lock),
            (8, self.agc_or_mgc.map(|m| matches!(m, AgcOrMgc::Agc))),
            (7, self.detected_signal),
            (6, self.spectral_inversion),
            (5, self.over_range),
            (4, self.sample_loss),
            (3, self.user_defined11),
            (2, self.user_defined10),
            (1, self.user_defined9),
            (0, self.user_defined8),
        ]
    }

    fn validate(&self) -> Result<(), VrtError> {
        if let Some(count) = self.associated_context_packet_count {
            if count > ASSOC_COUNT_MASK as u8 {
                return Err(VrtError::BoundsAssociatedContextPacketCount);
            }
        }
        Ok(())
    }

    /// Encodes a single trailer word into `out[0]` when `header`
    /// requires one; returns `Ok(0)` if the header does not.
    pub fn write(&self, header: &Header, out: &mut [u32], validate: bool) -> Result<usize, VrtError> {
        let needed = Self::words(header);
        if needed == 0 {
            return Ok(0);
        }
        if out.is_empty() {
            return Err(VrtError::BufferSize);
        }
        if validate {
            self.validate()?;
        }
        let mut w: u32 = 0;
        for (bit, value) in self.pairs() {
            if let Some(v) = value {
                w |= 1 << (HAS_SHIFT + bit);
                if v {
                    w |= 1 << (VALUE_SHIFT + bit);
                }
            }
        }
        if let Some(count) = self.associated_context_packet_count {
            w |= 1 << ASSOC_HAS_BIT;
            w |= (count as u32) & ASSOC_COUNT_MASK;
        }
        out[0] = w;
        Ok(1)
    }

    /// Decodes a single trailer word from `buf[0]` when `header`
    /// requires one; returns `Ok((Trailer::default(), 0))` if not.
    pub fn read(header: &Header, buf: &[u32], validate: bool) -> Result<(Trailer, usize), VrtError> {
        let needed = Self::words(header);
        if needed == 0 {
            return Ok((Trailer::default(), 0));
        }
        if buf.is_empty() {
            return Err(VrtError::BufferSize);
        }
        let w = buf[0];
        let has = |bit: u32| w & (1 << (HAS_SHIFT + bit)) != 0;
        let value = |bit: u32| w & (1 << (VALUE_SHIFT + bit)) != 0;
        let opt_bool = |bit: u32| has(bit).then(|| value(bit));

        let trailer = Trailer {
            calibrated_time: opt_bool(11),
            valid_data: opt_bool(10),
            reference_lock: opt_bool(9),
            agc_or_mgc: opt_bool(8).map(|v| if v { AgcOrMgc::Agc } else { AgcOrMgc::Mgc }),
            detected_signal: opt_bool(7),
            spectral_inversion: opt_bool(6),
            over_range: opt_bool(5),
            sample_loss: opt_bool(4),
            user_defined11: opt_bool(3),
            user_defined10: opt_bool(2),
            user_defined9: opt_bool(1),
            user_defined8: opt_bool(0),
            associated_context_packet_count: (w & (1 << ASSOC_HAS_BIT) != 0)
                .then_some((w & ASSOC_COUNT_MASK) as u8),
        };
        if validate {
            trailer.validate()?;
        }
        Ok((trailer, 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{PacketType, Tsf, Tsi, Tsm};

    fn data_header(has_trailer: bool) -> Header {
        Header {
            packet_type: PacketType::IfDataNoStreamId,
            has_class_id: false,
            has_trailer,
            tsm: Tsm::Fine,
            tsi: Tsi::None,
            tsf: Tsf::None,
            packet_count: 0,
            packet_size: 0,
        }
    }

    #[test]
    fn sample_loss_set_matches_scenario_3() {
        let header = data_header(true);
        let t = Trailer {
            sample_loss: Some(true),
            ..Default::default()
        };
        let mut buf = [0u32; 1];
        let n = t.write(&header, &mut buf, true).unwrap();
        assert_eq!(n, 1);
        assert_eq!(buf[0], 0x0100_1000);
        let (decoded, n2) = Trailer::read(&header, &buf, true).unwrap();
        assert_eq!(n2, 1);
        assert_eq!(decoded.sample_loss, Some(true));
        assert_eq!(decoded.valid_data, None);
    }

    #[test]
    fn no_trailer_words_without_flag() {
        let header = data_header(false);
        assert_eq!(Trailer::words(&header), 0);
        let t = Trailer::default();
        let mut buf = [0u32; 0];
        assert_eq!(t.write(&header, &mut buf, true).unwrap(), 0);
    }

    #[test]
    fn context_packet_has_no_trailer() {
        let mut header = data_header(true);
        header.packet_type = PacketType::IfContext;
        header.has_trailer = false;
        assert_eq!(Trailer::words(&header), 0);
    }

    #[test]
    fn associated_context_count_bounds() {
        let header = data_header(true);
        let t = Trailer {
            associated_context_packet_count: Some(0x7F),
            ..Default::default()
        };
        let mut buf = [0u32; 1];
        assert!(t.write(&header, &mut buf, true).is_ok());
        assert_eq!(buf[0] & 0x80, 0);
    }
}
