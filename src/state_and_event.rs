// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
State-and-event indicators: an IF context subsection mirroring the
trailer's indicator shape, plus an opaque user-defined byte.
*/

use crate::error::VrtError;
use crate::trailer::AgcOrMgc;

const HAS_SHIFT: u32 = 24;
const VALUE_SHIFT: u32 = 12;
const RESERVED_MASK: u32 = (0b1111 << 20) | (0b1111 << 8);

/// State-and-event indicators (IF context subsection 15).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateAndEventIndicators {
    pub calibrated_time: Option<bool>,
    pub valid_data: Option<bool>,
    pub reference_lock: Option<bool>,
    pub agc_or_mgc: Option<AgcOrMgc>,
    pub detected_signal: Option<bool>,
    pub spectral_inversion: Option<bool>,
    pub over_range: Option<bool>,
    pub sample_loss: Option<bool>,
    pub user_defined: u8,
}

impl StateAndEventIndicators {
    pub const WORDS: usize = 1;

    fn pairs(&self) -> [(u32, Option<bool>); 8] {
        [
            (7, self.calibrated_time),
            (6, self.valid_data),
            (5, self.reference_lock),
            (4, self.agc_or_mgc.map(|m| matches!(m, AgcOrMgc::Agc))),
            (3, self.detected_signal),
            (2, self.spectral_inversion),
            (1, self.over_range),
            (0, self.sample_loss),
        ]
    }

    pub fn write(&self, validate: bool) -> Result<u32, VrtError> {
        let _ = validate;
        let mut w: u32 = self.user_defined as u32;
        for (bit, value) in self.pairs() {
            if let Some(v) = value {
                w |= 1 << (HAS_SHIFT + bit);
                if v {
                    w |= 1 << (VALUE_SHIFT + bit);
                }
            }
        }
        Ok(w)
    }

    pub fn read(word: u32, validate: bool) -> Result<StateAndEventIndicators, VrtError> {
        if validate && word & RESERVED_MASK != 0 {
            return Err(VrtError::Reserved);
        }
        let has = |bit: u32| word & (1 << (HAS_SHIFT + bit)) != 0;
        let value = |bit: u32| word & (1 << (VALUE_SHIFT + bit)) != 0;
        let opt_bool = |bit: u32| has(bit).then(|| value(bit));
        Ok(StateAndEventIndicators {
            calibrated_time: opt_bool(7),
            valid_data: opt_bool(6),
            reference_lock: opt_bool(5),
            agc_or_mgc: opt_bool(4).map(|v| if v { AgcOrMgc::Agc } else { AgcOrMgc::Mgc }),
            detected_signal: opt_bool(3),
            spectral_inversion: opt_bool(2),
            over_range: opt_bool(1),
            sample_loss: opt_bool(0),
            user_defined: (word & 0xFF) as u8,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let s = StateAndEventIndicators {
            valid_data: Some(true),
            over_range: Some(false),
            user_defined: 0x42,
            ..Default::default()
        };
        let w = s.write(true).unwrap();
        assert_eq!(StateAndEventIndicators::read(w, true).unwrap(), s);
    }

    #[test]
    fn reserved_bits_rejected_on_read() {
        let w = 0x00F0_0F00;
        assert_eq!(StateAndEventIndicators::read(w, true), Err(VrtError::Reserved));
        assert!(StateAndEventIndicators::read(w, false).is_ok());
    }
}
