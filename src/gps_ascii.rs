// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
GPS ASCII: a variable-length IF context subsection carrying a
zero-padded vendor-defined text blob, e.g. raw NMEA sentences.
*/

use crate::error::VrtError;

const WORDS_MASK: u32 = 0x00FF_FFFF;

/// GPS ASCII (IF context subsection 22).
///
/// `ascii` borrows directly into the buffer that was decoded; it is
/// never copied.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GpsAscii<'a> {
    pub oui: u32,
    pub ascii: &'a [u32],
}

impl<'a> GpsAscii<'a> {
    /// Total words this subsection occupies: 2 header words plus the payload.
    pub fn words(&self) -> usize {
        2 + self.ascii.len()
    }

    fn validate(&self) -> Result<(), VrtError> {
        if self.oui > WORDS_MASK {
            return Err(VrtError::BoundsOui);
        }
        Ok(())
    }

    pub fn write(&self, out: &mut [u32], validate: bool) -> Result<usize, VrtError> {
        let needed = self.words();
        if out.len() < needed {
            return Err(VrtError::BufferSize);
        }
        if validate {
            self.validate()?;
        }
        out[0] = self.oui & WORDS_MASK;
        out[1] = (self.ascii.len() as u32) & WORDS_MASK;
        out[2..needed].copy_from_slice(self.ascii);
        Ok(needed)
    }

    pub fn read(buf: &'a [u32], validate: bool) -> Result<(GpsAscii<'a>, usize), VrtError> {
        if buf.len() < 2 {
            return Err(VrtError::BufferSize);
        }
        if validate && (buf[0] >> 24) != 0 {
            return Err(VrtError::Reserved);
        }
        let oui = buf[0] & WORDS_MASK;
        let num_words = (buf[1] & WORDS_MASK) as usize;
        let total = 2 + num_words;
        if buf.len() < total {
            return Err(VrtError::BufferSize);
        }
        let gps_ascii = GpsAscii {
            oui,
            ascii: &buf[2..total],
        };
        Ok((gps_ascii, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let payload = [0x4E4D_4541u32, 0x2C30_302C]; // "NMEA", ",00,"
        let g = GpsAscii {
            oui: 0x00A1B2,
            ascii: &payload,
        };
        let mut buf = [0u32; 4];
        let n = g.write(&mut buf, true).unwrap();
        assert_eq!(n, 4);
        let (decoded, n2) = GpsAscii::read(&buf, true).unwrap();
        assert_eq!(n2, 4);
        assert_eq!(decoded.ascii, &payload);
    }

    #[test]
    fn buffer_too_small_for_payload() {
        let buf = [0u32, 5];
        assert_eq!(GpsAscii::read(&buf, true), Err(VrtError::BufferSize));
    }
}
