// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Error types for the `vita49-vrt` crate.

Every failure mode the codec can produce is a variant of [`VrtError`].
Each variant also carries a stable negative [`i32`] discriminant via
[`VrtError::code`], for callers that need the narrower numeric surface
used at a cross-language boundary, plus a fixed, non-localized message
via [`VrtError::message`] (and the `Display` impl `thiserror` derives
from the same string).
*/

use thiserror::Error;

/// The closed set of codec failure modes.
///
/// Discriminant values match the negative error codes used throughout
/// the ANSI/VITA-49.0 reference tooling this crate's wire format is
/// bit-compatible with.
#[derive(Error, Copy, Clone, Eq, PartialEq, Debug)]
pub enum VrtError {
    /// The caller-supplied buffer is too small for the operation.
    #[error("buffer is too small")]
    BufferSize,
    /// A bit position documented as reserved was nonzero on read.
    #[error("one or more reserved bits are set")]
    Reserved,
    /// `packet_type` is outside `0..=5`.
    #[error("packet type is an invalid value")]
    InvalidPacketType,
    /// A context-typed packet has `has_trailer` set.
    #[error("context packet has trailer bit set")]
    TrailerInContext,
    /// A data-typed packet has `tsm == Coarse`.
    #[error("data packet has TSM bit set")]
    TsmInData,
    /// `tsm` is outside its two defined values.
    #[error("TSM is an invalid value")]
    InvalidTsm,
    /// `tsi` is outside `0..=3`.
    #[error("TSI is an invalid value")]
    InvalidTsi,
    /// `tsf` is outside `0..=3`.
    #[error("TSF is an invalid value")]
    InvalidTsf,
    /// `tsf == RealTime` but the picosecond value is `>= 10^12`.
    #[error("TSF is real time but picoseconds is outside valid bounds (> 999999999999 ps)")]
    BoundsRealTime,
    /// `packet_count` is outside `0..=0x0F`.
    #[error("packet count is outside valid bounds (> 0x0F)")]
    BoundsPacketCount,
    /// An OUI is outside `0..=0x00FFFFFF`.
    #[error("OUI is outside valid bounds (> 0x00FFFFFF)")]
    BoundsOui,
    /// `associated_context_packet_count` is outside `0..=0x7F`.
    #[error("associated context packet count is outside valid bounds (> 0x7F)")]
    BoundsAssociatedContextPacketCount,
    /// Bandwidth is negative.
    #[error("bandwidth is outside valid bounds (< 0 Hz)")]
    BoundsBandwidth,
    /// Gain stage 2 is set while stage 1 is unused.
    #[error("gain stage 1 must be used instead of stage 2 when only one is set")]
    GainStage2Set,
    /// Sample rate is negative.
    #[error("sample rate is outside valid bounds (< 0 Hz)")]
    BoundsSampleRate,
    /// Temperature is below absolute zero.
    #[error("temperature is outside valid bounds (< -273.15 degrees C)")]
    BoundsTemperature,
    /// `packing_method` is outside its defined values.
    #[error("packing method is an invalid value")]
    InvalidPackingMethod,
    /// `real_or_complex` is outside `0..=2`.
    #[error("real/complex is an invalid value")]
    InvalidRealOrComplex,
    /// `data_item_format` uses a reserved code point.
    #[error("data item format is an invalid value")]
    InvalidDataItemFormat,
    /// `event_tag_size` is outside `0..=0x07`.
    #[error("event tag size is outside valid bounds (> 0x07)")]
    BoundsEventTagSize,
    /// `channel_tag_size` is outside `0..=0x0F`.
    #[error("channel tag size is outside valid bounds (> 0x0F)")]
    BoundsChannelTagSize,
    /// `item_packing_field_size` is outside `0..=0x3F`.
    #[error("item packing field size is outside valid bounds (> 0x3F)")]
    BoundsItemPackingFieldSize,
    /// `data_item_size` is outside `0..=0x3F`.
    #[error("data item size is outside valid bounds (> 0x3F)")]
    BoundsDataItemSize,
    /// Integer-second timestamp sentinel violated (`tsi == None` but value `!= 0xFFFFFFFF`).
    #[error("integer second timestamp is not 0xFFFFFFFF when TSI is None")]
    SetIntegerSecondTimestamp,
    /// Fractional-second timestamp sentinel violated (`tsf == None` but value `!= all-ones`).
    #[error("fractional second timestamp is not all-ones when TSF is None")]
    SetFractionalSecondTimestamp,
    /// `|latitude| > 90`.
    #[error("latitude is outside valid bounds (< -90 or > 90 degrees)")]
    BoundsLatitude,
    /// `|longitude| > 180`.
    #[error("longitude is outside valid bounds (< -180 or > 180 degrees)")]
    BoundsLongitude,
    /// Speed over ground is negative.
    #[error("speed over ground is outside valid bounds (< 0 m/s)")]
    BoundsSpeedOverGround,
    /// Heading angle outside `[0, 360)`.
    #[error("heading angle is outside valid bounds (< 0 or >= 360 degrees)")]
    BoundsHeadingAngle,
    /// Track angle outside `[0, 360)`.
    #[error("track angle is outside valid bounds (< 0 or >= 360 degrees)")]
    BoundsTrackAngle,
    /// `|magnetic_variation| > 180`.
    #[error("magnetic variation is outside valid bounds (< -180 or > 180 degrees)")]
    BoundsMagneticVariation,
    /// Source list size exceeds the 9-bit field.
    #[error("source list size is outside valid bounds (> 0x01FF)")]
    BoundsSourceListSize,
    /// System list size exceeds the 9-bit field.
    #[error("system list size is outside valid bounds (> 0x01FF)")]
    BoundsSystemListSize,
    /// Vector-component or async-channel list size exceeds its field width.
    #[error("channel list size is outside valid bounds")]
    BoundsChannelListSize,
    /// Computed or declared packet size exceeds `0xFFFF` words.
    #[error("calculated packet size is outside valid bounds (> 0xFFFF)")]
    BoundsPacketSize,
    /// `header.packet_size` disagrees with the recomputed section layout.
    #[error("packet size in header and calculated packet size do not match")]
    PacketSizeMismatch,
    /// Two packets passed to a time operation disagree on TSI/TSF.
    #[error("TSI and/or TSF differ between packets")]
    MismatchTimeTypes,
    /// A conversion that needs a sample rate was invoked with a non-positive rate.
    #[error("sample rate is required but was not provided (<= 0)")]
    MissingSampleRate,
    /// A `SampleCount`-mode fractional timestamp is `>= sample_rate`.
    #[error("fractional timestamp is outside valid bounds (>= sample rate)")]
    BoundsSampleCount,
    /// Free-running-count-derived whole seconds disagree with the TSI field.
    #[error("integer seconds and calculated seconds from free running count differ")]
    IntegerSecondsMismatch,
}

impl VrtError {
    /// The stable negative error code for this variant, for callers
    /// that need the narrow cross-language numeric surface instead of
    /// matching on the Rust enum directly.
    pub fn code(&self) -> i32 {
        match self {
            VrtError::BufferSize => -1,
            VrtError::Reserved => -2,
            VrtError::InvalidPacketType => -3,
            VrtError::TrailerInContext => -4,
            VrtError::TsmInData => -5,
            VrtError::InvalidTsm => -6,
            VrtError::InvalidTsi => -7,
            VrtError::InvalidTsf => -8,
            VrtError::BoundsRealTime => -9,
            VrtError::BoundsPacketCount => -10,
            VrtError::BoundsOui => -11,
            VrtError::BoundsAssociatedContextPacketCount => -12,
            VrtError::BoundsBandwidth => -13,
            VrtError::GainStage2Set => -14,
            VrtError::BoundsSampleRate => -15,
            VrtError::BoundsTemperature => -16,
            VrtError::InvalidPackingMethod => -17,
            VrtError::InvalidRealOrComplex => -18,
            VrtError::InvalidDataItemFormat => -19,
            VrtError::BoundsEventTagSize => -20,
            VrtError::BoundsChannelTagSize => -21,
            VrtError::BoundsItemPackingFieldSize => -22,
            VrtError::BoundsDataItemSize => -23,
            VrtError::SetIntegerSecondTimestamp => -24,
            VrtError::SetFractionalSecondTimestamp => -25,
            VrtError::BoundsLatitude => -26,
            VrtError::BoundsLongitude => -27,
            VrtError::BoundsSpeedOverGround => -28,
            VrtError::BoundsHeadingAngle => -29,
            VrtError::BoundsTrackAngle => -30,
            VrtError::BoundsMagneticVariation => -31,
            VrtError::BoundsSourceListSize => -32,
            VrtError::BoundsSystemListSize => -33,
            VrtError::BoundsChannelListSize => -34,
            VrtError::BoundsPacketSize => -35,
            VrtError::PacketSizeMismatch => -36,
            // Not present in the upstream error-code header fragment this
            // crate was grounded on; numbered to continue the sequence.
            VrtError::MismatchTimeTypes => -37,
            VrtError::MissingSampleRate => -38,
            VrtError::BoundsSampleCount => -39,
            VrtError::IntegerSecondsMismatch => -40,
        }
    }

    /// The fixed, non-localized human-readable message for this error.
    ///
    /// Equivalent to `self.to_string()`; provided as a dedicated lookup
    /// for callers that want a message without going through `Display`.
    pub fn message(&self) -> &'static str {
        match self {
            VrtError::BufferSize => "buffer is too small",
            VrtError::Reserved => "one or more reserved bits are set",
            VrtError::InvalidPacketType => "packet type is an invalid value",
            VrtError::TrailerInContext => "context packet has trailer bit set",
            VrtError::TsmInData => "data packet has TSM bit set",
            VrtError::InvalidTsm => "TSM is an invalid value",
            VrtError::InvalidTsi => "TSI is an invalid value",
            VrtError::InvalidTsf => "TSF is an invalid value",
            VrtError::BoundsRealTime => {
                "TSF is real time but picoseconds is outside valid bounds (> 999999999999 ps)"
            }
            VrtError::BoundsPacketCount => "packet count is outside valid bounds (> 0x0F)",
            VrtError::BoundsOui => "OUI is outside valid bounds (> 0x00FFFFFF)",
            VrtError::BoundsAssociatedContextPacketCount => {
                "associated context packet count is outside valid bounds (> 0x7F)"
            }
            VrtError::BoundsBandwidth => "bandwidth is outside valid bounds (< 0 Hz)",
            VrtError::GainStage2Set => {
                "gain stage 1 must be used instead of stage 2 when only one is set"
            }
            VrtError::BoundsSampleRate => "sample rate is outside valid bounds (< 0 Hz)",
            VrtError::BoundsTemperature => {
                "temperature is outside valid bounds (< -273.15 degrees C)"
            }
            VrtError::InvalidPackingMethod => "packing method is an invalid value",
            VrtError::InvalidRealOrComplex => "real/complex is an invalid value",
            VrtError::InvalidDataItemFormat => "data item format is an invalid value",
            VrtError::BoundsEventTagSize => "event tag size is outside valid bounds (> 0x07)",
            VrtError::BoundsChannelTagSize => "channel tag size is outside valid bounds (> 0x0F)",
            VrtError::BoundsItemPackingFieldSize => {
                "item packing field size is outside valid bounds (> 0x3F)"
            }
            VrtError::BoundsDataItemSize => "data item size is outside valid bounds (> 0x3F)",
            VrtError::SetIntegerSecondTimestamp => {
                "integer second timestamp is not 0xFFFFFFFF when TSI is None"
            }
            VrtError::SetFractionalSecondTimestamp => {
                "fractional second timestamp is not all-ones when TSF is None"
            }
            VrtError::BoundsLatitude => "latitude is outside valid bounds (< -90 or > 90 degrees)",
            VrtError::BoundsLongitude => {
                "longitude is outside valid bounds (< -180 or > 180 degrees)"
            }
            VrtError::BoundsSpeedOverGround => "speed over ground is outside valid bounds (< 0 m/s)",
            VrtError::BoundsHeadingAngle => {
                "heading angle is outside valid bounds (< 0 or >= 360 degrees)"
            }
            VrtError::BoundsTrackAngle => {
                "track angle is outside valid bounds (< 0 or >= 360 degrees)"
            }
            VrtError::BoundsMagneticVariation => {
                "magnetic variation is outside valid bounds (< -180 or > 180 degrees)"
            }
            VrtError::BoundsSourceListSize => "source list size is outside valid bounds (> 0x01FF)",
            VrtError::BoundsSystemListSize => "system list size is outside valid bounds (> 0x01FF)",
            VrtError::BoundsChannelListSize => "channel list size is outside valid bounds",
            VrtError::BoundsPacketSize => "calculated packet size is outside valid bounds (> 0xFFFF)",
            VrtError::PacketSizeMismatch => {
                "packet size in header and calculated packet size do not match"
            }
            VrtError::MismatchTimeTypes => "TSI and/or TSF differ between packets",
            VrtError::MissingSampleRate => "sample rate is required but was not provided (<= 0)",
            VrtError::BoundsSampleCount => {
                "fractional timestamp is outside valid bounds (>= sample rate)"
            }
            VrtError::IntegerSecondsMismatch => {
                "integer seconds and calculated seconds from free running count differ"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_negative_and_unique() {
        let all = [
            VrtError::BufferSize,
            VrtError::Reserved,
            VrtError::InvalidPacketType,
            VrtError::TrailerInContext,
            VrtError::TsmInData,
            VrtError::InvalidTsm,
            VrtError::InvalidTsi,
            VrtError::InvalidTsf,
            VrtError::BoundsRealTime,
            VrtError::BoundsPacketCount,
            VrtError::BoundsOui,
            VrtError::BoundsAssociatedContextPacketCount,
            VrtError::BoundsBandwidth,
            VrtError::GainStage2Set,
            VrtError::BoundsSampleRate,
            VrtError::BoundsTemperature,
            VrtError::InvalidPackingMethod,
            VrtError::InvalidRealOrComplex,
            VrtError::InvalidDataItemFormat,
            VrtError::BoundsEventTagSize,
            VrtError::BoundsChannelTagSize,
            VrtError::BoundsItemPackingFieldSize,
            VrtError::BoundsDataItemSize,
            VrtError::SetIntegerSecondTimestamp,
            VrtError::SetFractionalSecondTimestamp,
            VrtError::BoundsLatitude,
            VrtError::BoundsLongitude,
            VrtError::BoundsSpeedOverGround,
            VrtError::BoundsHeadingAngle,
            VrtError::BoundsTrackAngle,
            VrtError::BoundsMagneticVariation,
            VrtError::BoundsSourceListSize,
            VrtError::BoundsSystemListSize,
            VrtError::BoundsChannelListSize,
            VrtError::BoundsPacketSize,
            VrtError::PacketSizeMismatch,
            VrtError::MismatchTimeTypes,
            VrtError::MissingSampleRate,
            VrtError::BoundsSampleCount,
            VrtError::IntegerSecondsMismatch,
        ];
        let mut codes: Vec<i32> = all.iter().map(|e| e.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), all.len());
        assert!(all.iter().all(|e| e.code() < 0));
    }

    #[test]
    fn message_matches_display() {
        assert_eq!(VrtError::BufferSize.message(), VrtError::BufferSize.to_string());
    }
}
