// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
IF context: the metadata section carried by IF-context and
ext-context packets. One indicator word followed by up to 23
conditionally-present subsections, always encoded in the fixed order
below.
*/

use crate::context_association_lists::ContextAssociationLists;
use crate::device_id::DeviceIdentifier;
use crate::ephemeris::EphemerisBlock;
use crate::error::VrtError;
use crate::fixed_point::{from_float_i16, join_i64, split_i64, to_float_i16};
use crate::gain::Gain;
use crate::geolocation::GeolocationBlock;
use crate::gps_ascii::GpsAscii;
use crate::payload_format::DataPacketPayloadFormat;
use crate::state_and_event::StateAndEventIndicators;

const INDICATOR_SHIFT_BASE: u32 = 8;
const RESERVED_MASK: u32 = 0x0000_00FF;

fn radix20_write(out: &mut [u32], v: f64) {
    let raw = crate::fixed_point::from_float_i64(v, 20);
    let (hi, lo) = split_i64(raw);
    out[0] = hi;
    out[1] = lo;
}

fn radix20_read(buf: &[u32]) -> f64 {
    crate::fixed_point::to_float_i64(join_i64(buf[0], buf[1]), 20)
}

/// The IF context section (ANSI/VITA-49.0 section 9).
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IfContext<'a> {
    pub context_field_change_indicator: bool,
    pub reference_point_identifier: Option<u32>,
    pub bandwidth: Option<f64>,
    pub if_reference_frequency: Option<f64>,
    pub rf_reference_frequency: Option<f64>,
    pub rf_reference_frequency_offset: Option<f64>,
    pub if_band_offset: Option<f64>,
    pub reference_level: Option<f64>,
    pub gain: Option<Gain>,
    pub over_range_count: Option<u32>,
    pub sample_rate: Option<f64>,
    pub timestamp_adjustment: Option<i64>,
    pub timestamp_calibration_time: Option<u32>,
    pub temperature: Option<f64>,
    pub device_identifier: Option<DeviceIdentifier>,
    pub state_and_event_indicators: Option<StateAndEventIndicators>,
    pub data_packet_payload_format: Option<DataPacketPayloadFormat>,
    pub formatted_gps_geolocation: Option<GeolocationBlock>,
    pub formatted_ins_geolocation: Option<GeolocationBlock>,
    pub ecef_ephemeris: Option<EphemerisBlock>,
    pub relative_ephemeris: Option<EphemerisBlock>,
    pub ephemeris_reference_identifier: Option<u32>,
    pub gps_ascii: Option<GpsAscii<'a>>,
    pub context_association_lists: Option<ContextAssociationLists<'a>>,
}

impl<'a> IfContext<'a> {
    /// Presence flags in wire order, most significant first (bit 30
    /// down to bit 8 of the indicator word).
    fn presence_bits(&self) -> [bool; 23] {
        [
            self.reference_point_identifier.is_some(),
            self.bandwidth.is_some(),
            self.if_reference_frequency.is_some(),
            self.rf_reference_frequency.is_some(),
            self.rf_reference_frequency_offset.is_some(),
            self.if_band_offset.is_some(),
            self.reference_level.is_some(),
            self.gain.is_some(),
            self.over_range_count.is_some(),
            self.sample_rate.is_some(),
            self.timestamp_adjustment.is_some(),
            self.timestamp_calibration_time.is_some(),
            self.temperature.is_some(),
            self.device_identifier.is_some(),
            self.state_and_event_indicators.is_some(),
            self.data_packet_payload_format.is_some(),
            self.formatted_gps_geolocation.is_some(),
            self.formatted_ins_geolocation.is_some(),
            self.ecef_ephemeris.is_some(),
            self.relative_ephemeris.is_some(),
            self.ephemeris_reference_identifier.is_some(),
            self.gps_ascii.is_some(),
            self.context_association_lists.is_some(),
        ]
    }

    fn indicator_word(&self) -> u32 {
        let mut w = (self.context_field_change_indicator as u32) << 31;
        for (i, present) in self.presence_bits().iter().enumerate() {
            if *present {
                w |= 1 << (30 - i);
            }
        }
        w
    }

    /// Word count of subsections 1..21 (every fixed-size subsection),
    /// excluding the indicator word, GPS ASCII, and association lists.
    pub fn size_words_indicator(&self) -> usize {
        let mut n = 0;
        n += self.reference_point_identifier.is_some() as usize;
        n += 2 * self.bandwidth.is_some() as usize;
        n += 2 * self.if_reference_frequency.is_some() as usize;
        n += 2 * self.rf_reference_frequency.is_some() as usize;
        n += 2 * self.rf_reference_frequency_offset.is_some() as usize;
        n += 2 * self.if_band_offset.is_some() as usize;
        n += self.reference_level.is_some() as usize;
        n += self.gain.is_some() as usize;
        n += self.over_range_count.is_some() as usize;
        n += 2 * self.sample_rate.is_some() as usize;
        n += 2 * self.timestamp_adjustment.is_some() as usize;
        n += self.timestamp_calibration_time.is_some() as usize;
        n += self.temperature.is_some() as usize;
        n += 2 * self.device_identifier.is_some() as usize;
        n += self.state_and_event_indicators.is_some() as usize;
        n += 2 * self.data_packet_payload_format.is_some() as usize;
        n += 11 * self.formatted_gps_geolocation.is_some() as usize;
        n += 11 * self.formatted_ins_geolocation.is_some() as usize;
        n += 13 * self.ecef_ephemeris.is_some() as usize;
        n += 13 * self.relative_ephemeris.is_some() as usize;
        n += self.ephemeris_reference_identifier.is_some() as usize;
        n
    }

    /// Total words this section occupies, including the indicator word.
    pub fn words(&self) -> usize {
        1 + self.size_words_indicator()
            + self.gps_ascii.map_or(0, |g| g.words())
            + self.context_association_lists.map_or(0, |l| l.words())
    }

    pub fn write(&self, out: &mut [u32], validate: bool) -> Result<usize, VrtError> {
        let needed = self.words();
        if out.len() < needed {
            return Err(VrtError::BufferSize);
        }
        out[0] = self.indicator_word();
        let mut idx = 1;

        if let Some(v) = self.reference_point_identifier {
            out[idx] = v;
            idx += 1;
        }
        if let Some(v) = self.bandwidth {
            if validate && v < 0.0 {
                return Err(VrtError::BoundsBandwidth);
            }
            radix20_write(&mut out[idx..], v);
            idx += 2;
        }
        if let Some(v) = self.if_reference_frequency {
            radix20_write(&mut out[idx..], v);
            idx += 2;
        }
        if let Some(v) = self.rf_reference_frequency {
            radix20_write(&mut out[idx..], v);
            idx += 2;
        }
        if let Some(v) = self.rf_reference_frequency_offset {
            radix20_write(&mut out[idx..], v);
            idx += 2;
        }
        if let Some(v) = self.if_band_offset {
            radix20_write(&mut out[idx..], v);
            idx += 2;
        }
        if let Some(v) = self.reference_level {
            out[idx] = from_float_i16(v, 7) as u16 as u32;
            idx += 1;
        }
        if let Some(g) = self.gain {
            out[idx] = g.write(validate)?;
            idx += 1;
        }
        if let Some(v) = self.over_range_count {
            out[idx] = v;
            idx += 1;
        }
        if let Some(v) = self.sample_rate {
            if validate && v < 0.0 {
                return Err(VrtError::BoundsSampleRate);
            }
            radix20_write(&mut out[idx..], v);
            idx += 2;
        }
        if let Some(v) = self.timestamp_adjustment {
            let (hi, lo) = split_i64(v);
            out[idx] = hi;
            out[idx + 1] = lo;
            idx += 2;
        }
        if let Some(v) = self.timestamp_calibration_time {
            out[idx] = v;
            idx += 1;
        }
        if let Some(v) = self.temperature {
            if validate && v < -273.15 {
                return Err(VrtError::BoundsTemperature);
            }
            out[idx] = from_float_i16(v, 6) as u16 as u32;
            idx += 1;
        }
        if let Some(d) = self.device_identifier {
            idx += d.write(&mut out[idx..], validate)?;
        }
        if let Some(s) = self.state_and_event_indicators {
            out[idx] = s.write(validate)?;
            idx += 1;
        }
        if let Some(f) = self.data_packet_payload_format {
            idx += f.write(&mut out[idx..], validate)?;
        }
        if let Some(g) = self.formatted_gps_geolocation {
            idx += g.write(&mut out[idx..], validate)?;
        }
        if let Some(g) = self.formatted_ins_geolocation {
            idx += g.write(&mut out[idx..], validate)?;
        }
        if let Some(e) = self.ecef_ephemeris {
            idx += e.write(&mut out[idx..], validate)?;
        }
        if let Some(e) = self.relative_ephemeris {
            idx += e.write(&mut out[idx..], validate)?;
        }
        if let Some(v) = self.ephemeris_reference_identifier {
            out[idx] = v;
            idx += 1;
        }
        if let Some(g) = self.gps_ascii {
            idx += g.write(&mut out[idx..], validate)?;
        }
        if let Some(l) = self.context_association_lists {
            idx += l.write(&mut out[idx..], validate)?;
        }
        Ok(idx)
    }

    pub fn read(buf: &'a [u32], validate: bool) -> Result<(IfContext<'a>, usize), VrtError> {
        if buf.is_empty() {
            return Err(VrtError::BufferSize);
        }
        let w0 = buf[0];
        if validate && w0 & RESERVED_MASK != 0 {
            return Err(VrtError::Reserved);
        }
        let present = |i: u32| w0 & (1 << (30 - i)) != 0;
        let mut ctx = IfContext {
            context_field_change_indicator: w0 & (1 << 31) != 0,
            ..Default::default()
        };
        let mut idx = 1;

        macro_rules! take {
            ($n:expr) => {{
                if buf.len() < idx + $n {
                    return Err(VrtError::BufferSize);
                }
                let slice = &buf[idx..idx + $n];
                idx += $n;
                slice
            }};
        }

        if present(0) {
            ctx.reference_point_identifier = Some(take!(1)[0]);
        }
        if present(1) {
            let s = take!(2);
            let v = radix20_read(s);
            if validate && v < 0.0 {
                return Err(VrtError::BoundsBandwidth);
            }
            ctx.bandwidth = Some(v);
        }
        if present(2) {
            ctx.if_reference_frequency = Some(radix20_read(take!(2)));
        }
        if present(3) {
            ctx.rf_reference_frequency = Some(radix20_read(take!(2)));
        }
        if present(4) {
            ctx.rf_reference_frequency_offset = Some(radix20_read(take!(2)));
        }
        if present(5) {
            ctx.if_band_offset = Some(radix20_read(take!(2)));
        }
        if present(6) {
            let w = take!(1)[0];
            if validate && (w >> 16) != 0 {
                return Err(VrtError::Reserved);
            }
            ctx.reference_level = Some(to_float_i16(w as u16 as i16, 7));
        }
        if present(7) {
            ctx.gain = Some(Gain::read(take!(1)[0], validate)?);
        }
        if present(8) {
            ctx.over_range_count = Some(take!(1)[0]);
        }
        if present(9) {
            let s = take!(2);
            let v = radix20_read(s);
            if validate && v < 0.0 {
                return Err(VrtError::BoundsSampleRate);
            }
            ctx.sample_rate = Some(v);
        }
        if present(10) {
            let s = take!(2);
            ctx.timestamp_adjustment = Some(join_i64(s[0], s[1]));
        }
        if present(11) {
            ctx.timestamp_calibration_time = Some(take!(1)[0]);
        }
        if present(12) {
            let w = take!(1)[0];
            if validate && (w >> 16) != 0 {
                return Err(VrtError::Reserved);
            }
            let v = to_float_i16(w as u16 as i16, 6);
            if validate && v < -273.15 {
                return Err(VrtError::BoundsTemperature);
            }
            ctx.temperature = Some(v);
        }
        if present(13) {
            let (d, n) = DeviceIdentifier::read(&buf[idx..], validate)?;
            idx += n;
            ctx.device_identifier = Some(d);
        }
        if present(14) {
            ctx.state_and_event_indicators = Some(StateAndEventIndicators::read(take!(1)[0], validate)?);
        }
        if present(15) {
            let (f, n) = DataPacketPayloadFormat::read(&buf[idx..], validate)?;
            idx += n;
            ctx.data_packet_payload_format = Some(f);
        }
        if present(16) {
            let (g, n) = GeolocationBlock::read(&buf[idx..], validate)?;
            idx += n;
            ctx.formatted_gps_geolocation = Some(g);
        }
        if present(17) {
            let (g, n) = GeolocationBlock::read(&buf[idx..], validate)?;
            idx += n;
            ctx.formatted_ins_geolocation = Some(g);
        }
        if present(18) {
            let (e, n) = EphemerisBlock::read(&buf[idx..], validate)?;
            idx += n;
            ctx.ecef_ephemeris = Some(e);
        }
        if present(19) {
            let (e, n) = EphemerisBlock::read(&buf[idx..], validate)?;
            idx += n;
            ctx.relative_ephemeris = Some(e);
        }
        if present(20) {
            ctx.ephemeris_reference_identifier = Some(take!(1)[0]);
        }
        if present(21) {
            let (g, n) = GpsAscii::read(&buf[idx..], validate)?;
            idx += n;
            ctx.gps_ascii = Some(g);
        }
        if present(22) {
            let (l, n) = ContextAssociationLists::read(&buf[idx..], validate)?;
            idx += n;
            ctx.context_association_lists = Some(l);
        }

        Ok((ctx, idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_rate_only_matches_scenario_4() {
        let ctx = IfContext {
            sample_rate: Some(4097.0),
            ..Default::default()
        };
        assert_eq!(ctx.words(), 3);
        let mut buf = [0u32; 3];
        let n = ctx.write(&mut buf, true).unwrap();
        assert_eq!(n, 3);
        assert_eq!(buf, [0x0020_0000, 0x0000_0001, 0x0010_0000]);
        let (decoded, n2) = IfContext::read(&buf, true).unwrap();
        assert_eq!(n2, 3);
        assert_eq!(decoded.sample_rate, Some(4097.0));
    }

    #[test]
    fn negative_bandwidth_rejected_unless_unvalidated() {
        let ctx = IfContext {
            bandwidth: Some(-1.0),
            ..Default::default()
        };
        let mut buf = [0u32; 3];
        assert_eq!(ctx.write(&mut buf, true), Err(VrtError::BoundsBandwidth));
        let n = ctx.write(&mut buf, false).unwrap();
        assert_eq!(n, 3);
        assert_eq!(IfContext::read(&buf, true), Err(VrtError::BoundsBandwidth));
        assert!(IfContext::read(&buf, false).is_ok());
    }

    #[test]
    fn reserved_low_byte_rejected_on_read() {
        let buf = [0x0000_00FFu32];
        assert_eq!(IfContext::read(&buf, true), Err(VrtError::Reserved));
        assert!(IfContext::read(&buf, false).is_ok());
    }
}
