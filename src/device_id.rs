// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Device identifier: a two-word IF context subsection naming the OUI and
vendor-defined device code of the equipment that produced the stream.
*/

use crate::error::VrtError;

/// Device identifier (IF context subsection 14).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceIdentifier {
    pub oui: u32,
    pub device_code: u16,
}

impl DeviceIdentifier {
    pub const WORDS: usize = 2;

    fn validate(&self) -> Result<(), VrtError> {
        if self.oui > 0x00FF_FFFF {
            return Err(VrtError::BoundsOui);
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
        out[0] = self.oui & 0x00FF_FFFF;
        out[1] = self.device_code as u32;
        Ok(Self::WORDS)
    }

    pub fn read(buf: &[u32], validate: bool) -> Result<(DeviceIdentifier, usize), VrtError> {
        if buf.len() < Self::WORDS {
            return Err(VrtError::BufferSize);
        }
        if validate && ((buf[0] >> 24) != 0 || (buf[1] >> 16) != 0) {
            return Err(VrtError::Reserved);
        }
        let id = DeviceIdentifier {
            oui: buf[0] & 0x00FF_FFFF,
            device_code: buf[1] as u16,
        };
        Ok((id, Self::WORDS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let id = DeviceIdentifier {
            oui: 0x00A1B2,
            device_code: 0x1234,
        };
        let mut buf = [0u32; 2];
        id.write(&mut buf, true).unwrap();
        let (decoded, n) = DeviceIdentifier::read(&buf, true).unwrap();
        assert_eq!(n, 2);
        assert_eq!(decoded, id);
    }

    #[test]
    fn reserved_bits_rejected() {
        let buf = [0x0100_0000u32, 0];
        assert_eq!(DeviceIdentifier::read(&buf, true), Err(VrtError::Reserved));
        assert!(DeviceIdentifier::read(&buf, false).is_ok());
    }
}
