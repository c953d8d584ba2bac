// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Geolocation block: the common 11-word layout shared by the formatted
GPS and formatted INS geolocation subsections.
*/

use crate::error::VrtError;
use crate::fixed_point::{from_float_i32, from_float_u32, to_float_i32, to_float_u32};
use crate::header::{Tsf, Tsi};

pub(crate) const UNSPECIFIED_I32: u32 = 0x7FFF_FFFF;
const UNSPECIFIED_TSI: u32 = 0xFFFF_FFFF;
const UNSPECIFIED_TSF: u64 = 0xFFFF_FFFF_FFFF_FFFF;
const REAL_TIME_BOUND_PS: u64 = 1_000_000_000_000;

/// A formatted-GPS or formatted-INS geolocation block (ANSI/VITA-49.0
/// section 9.4.5/9.4.6). The two subsections share this exact layout.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeolocationBlock {
    pub tsi: Tsi,
    pub tsf: Tsf,
    pub oui: u32,
    pub integer_second_timestamp: u32,
    pub fractional_second_timestamp: u64,
    /// Degrees, radix 22. `None` is the unspecified sentinel.
    pub latitude: Option<f64>,
    /// Degrees, radix 22. `None` is the unspecified sentinel.
    pub longitude: Option<f64>,
    /// Meters, radix 5. `None` is the unspecified sentinel.
    pub altitude: Option<f64>,
    /// Meters/second, unsigned radix 16. `None` is the unspecified sentinel.
    pub speed_over_ground: Option<f64>,
    /// Degrees, radix 22. `None` is the unspecified sentinel.
    pub heading_angle: Option<f64>,
    /// Degrees, radix 22. `None` is the unspecified sentinel.
    pub track_angle: Option<f64>,
    /// Degrees, radix 22. `None` is the unspecified sentinel.
    pub magnetic_variation: Option<f64>,
}

impl Default for GeolocationBlock {
    fn default() -> Self {
        GeolocationBlock {
            tsi: Tsi::None,
            tsf: Tsf::None,
            oui: 0,
            integer_second_timestamp: UNSPECIFIED_TSI,
            fractional_second_timestamp: UNSPECIFIED_TSF,
            latitude: None,
            longitude: None,
            altitude: None,
            speed_over_ground: None,
            heading_angle: None,
            track_angle: None,
            magnetic_variation: None,
        }
    }
}

impl GeolocationBlock {
    pub const WORDS: usize = 11;

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
        if let Some(v) = self.latitude {
            if v.abs() > 90.0 {
                return Err(VrtError::BoundsLatitude);
            }
        }
        if let Some(v) = self.longitude {
            if v.abs() > 180.0 {
                return Err(VrtError::BoundsLongitude);
            }
        }
        if let Some(v) = self.speed_over_ground {
            if v < 0.0 {
                return Err(VrtError::BoundsSpeedOverGround);
            }
        }
        if let Some(v) = self.heading_angle {
            if !(0.0..360.0).contains(&v) {
                return Err(VrtError::BoundsHeadingAngle);
            }
        }
        if let Some(v) = self.track_angle {
            if !(0.0..360.0).contains(&v) {
                return Err(VrtError::BoundsTrackAngle);
            }
        }
        if let Some(v) = self.magnetic_variation {
            if v.abs() > 180.0 {
                return Err(VrtError::BoundsMagneticVariation);
            }
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
        if validate && self.oui > 0x00FF_FFFF {
            return Err(VrtError::BoundsOui);
        }
        out[0] = ((self.tsi as u32 & 0b11) << 26) | ((self.tsf as u32 & 0b11) << 24) | (self.oui & 0x00FF_FFFF);
        out[1] = self.integer_second_timestamp;
        out[2] = (self.fractional_second_timestamp >> 32) as u32;
        out[3] = self.fractional_second_timestamp as u32;
        out[4] = self.latitude.map_or(UNSPECIFIED_I32, |v| from_float_i32(v, 22) as u32);
        out[5] = self.longitude.map_or(UNSPECIFIED_I32, |v| from_float_i32(v, 22) as u32);
        out[6] = self.altitude.map_or(UNSPECIFIED_I32, |v| from_float_i32(v, 5) as u32);
        out[7] = self.speed_over_ground.map_or(UNSPECIFIED_I32, |v| from_float_u32(v, 16));
        out[8] = self.heading_angle.map_or(UNSPECIFIED_I32, |v| from_float_i32(v, 22) as u32);
        out[9] = self.track_angle.map_or(UNSPECIFIED_I32, |v| from_float_i32(v, 22) as u32);
        out[10] = self.magnetic_variation.map_or(UNSPECIFIED_I32, |v| from_float_i32(v, 22) as u32);
        Ok(Self::WORDS)
    }

    pub fn read(buf: &[u32], validate: bool) -> Result<(GeolocationBlock, usize), VrtError> {
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
        let oui = buf[0] & 0x00FF_FFFF;
        let integer_second_timestamp = buf[1];
        let fractional_second_timestamp = ((buf[2] as u64) << 32) | buf[3] as u64;

        let geo_field = |raw: u32, radix: u32| (raw != UNSPECIFIED_I32).then(|| to_float_i32(raw as i32, radix));

        let block = GeolocationBlock {
            tsi,
            tsf,
            oui,
            integer_second_timestamp,
            fractional_second_timestamp,
            latitude: geo_field(buf[4], 22),
            longitude: geo_field(buf[5], 22),
            altitude: geo_field(buf[6], 5),
            speed_over_ground: (buf[7] != UNSPECIFIED_I32).then(|| to_float_u32(buf[7], 16)),
            heading_angle: geo_field(buf[8], 22),
            track_angle: geo_field(buf[9], 22),
            magnetic_variation: geo_field(buf[10], 22),
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
        let block = GeolocationBlock::default();
        let mut buf = [0u32; GeolocationBlock::WORDS];
        block.write(&mut buf, true).unwrap();
        assert_eq!(buf[4], UNSPECIFIED_I32);
        let (decoded, n) = GeolocationBlock::read(&buf, true).unwrap();
        assert_eq!(n, GeolocationBlock::WORDS);
        assert_eq!(decoded.latitude, None);
    }

    #[test]
    fn populated_round_trips() {
        let block = GeolocationBlock {
            tsi: Tsi::Utc,
            tsf: Tsf::SampleCount,
            oui: 0x00ABCD,
            integer_second_timestamp: 1000,
            fractional_second_timestamp: 42,
            latitude: Some(45.0),
            longitude: Some(-73.5),
            altitude: Some(100.0),
            speed_over_ground: Some(12.5),
            heading_angle: Some(90.0),
            track_angle: Some(0.0),
            magnetic_variation: Some(-10.0),
            ..Default::default()
        };
        let mut buf = [0u32; GeolocationBlock::WORDS];
        block.write(&mut buf, true).unwrap();
        let (decoded, _) = GeolocationBlock::read(&buf, true).unwrap();
        assert_eq!(decoded.latitude, Some(45.0));
        assert_eq!(decoded.longitude, Some(-73.5));
        assert_eq!(decoded.speed_over_ground, Some(12.5));
    }

    #[test]
    fn latitude_out_of_bounds_rejected() {
        let block = GeolocationBlock {
            latitude: Some(91.0),
            ..Default::default()
        };
        let mut buf = [0u32; GeolocationBlock::WORDS];
        assert_eq!(block.write(&mut buf, true), Err(VrtError::BoundsLatitude));
        assert!(block.write(&mut buf, false).is_ok());
    }

    #[test]
    fn tsi_none_requires_sentinel_timestamp() {
        let block = GeolocationBlock {
            tsi: Tsi::None,
            integer_second_timestamp: 5,
            ..Default::default()
        };
        let mut buf = [0u32; GeolocationBlock::WORDS];
        assert_eq!(block.write(&mut buf, true), Err(VrtError::SetIntegerSecondTimestamp));
    }
}
