// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Gain: a pair of radix-7 fixed-point stages packed into one IF context
word.
*/

use fixed::types::I9F7;

use crate::error::VrtError;

/// Two-stage gain value (IF context subsection 8).
///
/// `stage2` occupies the high half-word, `stage1` the low half-word,
/// each a signed 16-bit fixed-point value at radix 7. If only one
/// stage is used, it MUST be `stage1`.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gain {
    pub stage1: I9F7,
    pub stage2: I9F7,
}

impl Gain {
    fn validate(&self) -> Result<(), VrtError> {
        if self.stage2.to_bits() != 0 && self.stage1.to_bits() == 0 {
            return Err(VrtError::GainStage2Set);
        }
        Ok(())
    }

    pub fn write(&self, validate: bool) -> Result<u32, VrtError> {
        if validate {
            self.validate()?;
        }
        let stage1 = self.stage1.to_bits() as u16 as u32;
        let stage2 = self.stage2.to_bits() as u16 as u32;
        Ok((stage2 << 16) | stage1)
    }

    pub fn read(word: u32, validate: bool) -> Result<Gain, VrtError> {
        let stage1 = I9F7::from_bits(word as u16 as i16);
        let stage2 = I9F7::from_bits((word >> 16) as u16 as i16);
        let gain = Gain { stage1, stage2 };
        if validate {
            gain.validate()?;
        }
        Ok(gain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let g = Gain {
            stage1: I9F7::from_num(10.0),
            stage2: I9F7::from_num(5.5),
        };
        let w = g.write(true).unwrap();
        assert_eq!(Gain::read(w, true).unwrap(), g);
    }

    #[test]
    fn stage2_without_stage1_rejected() {
        let g = Gain {
            stage1: I9F7::from_num(0.0),
            stage2: I9F7::from_num(1.0),
        };
        assert_eq!(g.write(true), Err(VrtError::GainStage2Set));
        let w = g.write(false).unwrap();
        assert_eq!(Gain::read(w, true), Err(VrtError::GainStage2Set));
        assert!(Gain::read(w, false).is_ok());
    }
}
