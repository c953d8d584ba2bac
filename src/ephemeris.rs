// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Ephemeris block: the common 13-word layout shared by the ECEF and
relative ephemeris subsections.
*/

use crate::error::VrtError;
use crate::fixed_point::{from_float_i32, to_float_i32};
use crate::geolocation::UNSPECIFIED_I32;
use crate::header::{Tsf, Tsi};

const UNSPECIFIED_TSI: u32 = 0xFFFF_FFFF;
const UNSPECIFIED_TSF: u64 = 0xFFFF_FFFF_FFFF_FFFF;
const REAL_TIME_BOUND_PS: u64 = 1_000_000_000_000;

/// An ECEF or relative ephemeris block (ANSI/VITA-49.0 section
/// 9.4.3/9.4.4). The two subsections share this exact layout.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EphemerisBlock {
    pub tsi: Tsi,
    pub tsf: Tsf,
    pub oui: u32,
    pub integer_second_timestamp: u32,
    pub fractional_second_timestamp: u64,
    /// Meters, radix 5.
    pub position_x: Option<f64>,
    pub position_y: Option<f64>,
    pub position_z: Option<f64>,
    /// Degrees, radix 22.
    pub attitude_alpha: Option<f64>,
    pub attitude_beta: Option<f64>,
    pub attitude_phi: Option<f64>,
    /// Meters/second, radix 16.
    pub velocity_dx: Option<f64>,
    pub velocity_dy: Option<f64>,
    pub velocity_dz: Option<f64>,
}

impl Default for EphemerisBlock {
    fn default() -> Self {
        EphemerisBlock {
            tsi: Tsi::None,
            tsf: Tsf::None,
            oui: 0,
            integer_second_timestamp: UNSPECIFIED_TSI,
            fractional_second_timestamp: UNSPECIFIED_TSF,
            position_x: None,
            position_y: None,
            position_z: None,
            attitude_alpha: None,
            attitude_beta: None,
            attitude_phi: None,
            velocity_dx: None,
            velocity_dy: None,
            velocity_dz: None,
        }
    }
}

impl EphemerisBlock {
    pub const WORDS: usize = 13;

    fn validate(&self) -> Result<(), VrtError> {
        if matches!(self.tsi, Tsi::None) && self.integer_second_timestamp != UNSPECIFIED_TSI {
            return Err(VrtError::SetIntegerSecondTimestamp);
        }
        if matches!(self.tsf, Tsf::None) && self.fractional_second_timestamp != UNSPECIFIED_TSF {
            return Err(VrtError::SetFractionalSecondTimestamp);
        }
        if matches!(self.tsf, Tsf::RealTime) && self.fractional_second_timestamp >= REAL_TIME_BOUND_PS {
            return Err(VrtError::BoundsRealTime);
        }
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
        out[0] = ((self.tsi as u32 & 0b11) << 26) | ((self.tsf as u32 & 0b11) << 24) | (self.oui & 0x00FF_FFFF);
        out[1] = self.integer_second_timestamp;
        out[2] = (self.fractional_second_timestamp >> 32) as u32;
        out[3] = self.fractional_second_timestamp as u32;
        let enc = |v: Option<f64>, radix: u32| v.map_or(UNSPECIFIED_I32, |v| from_float_i32(v, radix) as u32);
        out[4] = enc(self.position_x, 5);
        out[5] = enc(self.position_y, 5);
        out[6] = enc(self.position_z, 5);
        out[7] = enc(self.attitude_alpha, 22);
        out[8] = enc(self.attitude_beta, 22);
        out[9] = enc(self.attitude_phi, 22);
        out[10] = enc(self.velocity_dx, 16);
        out[11] = enc(self.velocity_dy, 16);
        out[12] = enc(self.velocity_dz, 16);
        Ok(Self::WORDS)
    }

    pub fn read(buf: &[u32], validate: bool) -> Result<(EphemerisBlock, usize), VrtError> {
        if buf.len() < Self::WORDS {
            return Err(VrtError::BufferSize);
        }
        if validate && (buf[0] >> 28) != 0 {
            return Err(VrtError::Reserved);
        }
        let tsi = match (buf[0] >> 26) & 0b11 {
            0 => Tsi::None,
            1 => Tsi::Utc,
            2 => Tsi::Gps,
            _ => Tsi::Other,
        };
        let tsf = match (buf[0] >> 24) & 0b11 {
            0 => Tsf::None,
            1 => Tsf::SampleCount,
            2 => Tsf::RealTime,
            _ => Tsf::FreeRunningCount,
        };
        let dec = |raw: u32, radix: u32| (raw != UNSPECIFIED_I32).then(|| to_float_i32(raw as i32, radix));
        let block = EphemerisBlock {
            tsi,
            tsf,
            oui: buf[0] & 0x00FF_FFFF,
            integer_second_timestamp: buf[1],
            fractional_second_timestamp: ((buf[2] as u64) << 32) | buf[3] as u64,
            position_x: dec(buf[4], 5),
            position_y: dec(buf[5], 5),
            position_z: dec(buf[6], 5),
            attitude_alpha: dec(buf[7], 22),
            attitude_beta: dec(buf[8], 22),
            attitude_phi: dec(buf[9], 22),
            velocity_dx: dec(buf[10], 16),
            velocity_dy: dec(buf[11], 16),
            velocity_dz: dec(buf[12], 16),
        };
        if validate {
            block.validate()?;
        }
        Ok((block, Self::WORDS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unspecified_round_trips() {
        let block = EphemerisBlock::default();
        let mut buf = [0u32; EphemerisBlock::WORDS];
        block.write(&mut buf, true).unwrap();
        let (decoded, n) = EphemerisBlock::read(&buf, true).unwrap();
        assert_eq!(n, EphemerisBlock::WORDS);
        assert_eq!(decoded.position_x, None);
    }

    #[test]
    fn populated_round_trips() {
        let block = EphemerisBlock {
            tsi: Tsi::Gps,
            tsf: Tsf::RealTime,
            oui: 0x00ABCD,
            integer_second_timestamp: 12345,
            fractional_second_timestamp: 500_000_000_000,
            position_x: Some(6378137.0),
            position_y: Some(-100.0),
            position_z: Some(0.0),
            velocity_dx: Some(7.5),
            ..Default::default()
        };
        let mut buf = [0u32; EphemerisBlock::WORDS];
        block.write(&mut buf, true).unwrap();
        let (decoded, _) = EphemerisBlock::read(&buf, true).unwrap();
        assert_eq!(decoded.position_y, Some(-100.0));
        assert_eq!(decoded.velocity_dx, Some(7.5));
    }
}
