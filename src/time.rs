// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Time utilities: signed duration between two packet timestamps, and
conversion of a timestamp into broken-down civil time.
*/

use crate::error::VrtError;
use crate::header::{Tsf, Tsi};

const PS_PER_S: u64 = 1_000_000_000_000;
const UTC_GPS_OFFSET_S: i64 = 315_964_800;

/// The timestamp fields of one packet, as needed by [`time_difference`]
/// and [`time_calendar`].
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Timestamp {
    pub tsi: Tsi,
    pub tsf: Tsf,
    pub integer_seconds: u32,
    /// Meaning depends on `tsf`: a sample count, picoseconds, or a
    /// free-running sample count. Unused when `tsf == Tsf::None`.
    pub fractional: u64,
}

/// A signed duration: `seconds` may be negative, `picoseconds` is
/// always in `[0, 10^12)`. A duration of -3.5s is `{seconds: -4,
/// picoseconds: 5*10^11}`.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct TimeDelta {
    pub seconds: i64,
    pub picoseconds: u64,
}

fn sample_count(p2: &Timestamp, p1: &Timestamp, sample_rate: f64) -> Result<TimeDelta, VrtError> {
    if sample_rate <= 0.0 {
        return Err(VrtError::MissingSampleRate);
    }
    if p1.fractional as f64 >= sample_rate || p2.fractional as f64 >= sample_rate {
        return Err(VrtError::BoundsSampleCount);
    }

    let mut seconds: i64 = 0;
    if !matches!(p2.tsi, Tsi::None) {
        seconds = p2.integer_seconds as i64 - p1.integer_seconds as i64;
    }
    let mut d: i128 = p2.fractional as i128 - p1.fractional as i128;
    if d < 0 {
        seconds -= 1;
        d += sample_rate as i128;
    }
    let picoseconds = (d as f64 / sample_rate * PS_PER_S as f64).round() as u64;
    Ok(TimeDelta { seconds, picoseconds })
}

fn real_time(p2: &Timestamp, p1: &Timestamp) -> Result<TimeDelta, VrtError> {
    if p1.fractional >= PS_PER_S || p2.fractional >= PS_PER_S {
        return Err(VrtError::BoundsRealTime);
    }

    let mut seconds: i64 = 0;
    if !matches!(p2.tsi, Tsi::None) {
        seconds = p2.integer_seconds as i64 - p1.integer_seconds as i64;
    }
    let mut picoseconds: i128 = p2.fractional as i128 - p1.fractional as i128;
    if picoseconds < 0 {
        seconds -= 1;
        picoseconds += PS_PER_S as i128;
    }
    Ok(TimeDelta {
        seconds,
        picoseconds: picoseconds as u64,
    })
}

fn free_running_count(p2: &Timestamp, p1: &Timestamp, sample_rate: f64) -> Result<TimeDelta, VrtError> {
    if sample_rate <= 0.0 {
        return Err(VrtError::MissingSampleRate);
    }
    let rate = sample_rate as u128;

    let negative = p2.fractional < p1.fractional;
    let d = if negative {
        p1.fractional as u128 - p2.fractional as u128
    } else {
        p2.fractional as u128 - p1.fractional as u128
    };

    let mut seconds = (d / rate) as i64;
    let mut seconds_from_tsi = p2.integer_seconds as i64 - p1.integer_seconds as i64;
    if negative {
        seconds = -seconds - 1;
        seconds_from_tsi -= 1;
    }

    if !matches!(p2.tsi, Tsi::None) && seconds != seconds_from_tsi {
        return Err(VrtError::IntegerSecondsMismatch);
    }

    let picoseconds = ((d % rate) as f64 / sample_rate * PS_PER_S as f64).round() as u64;
    Ok(TimeDelta { seconds, picoseconds })
}

/// Computes `p2 - p1`. Both timestamps must share `tsi` and `tsf`.
pub fn time_difference(p2: &Timestamp, p1: &Timestamp, sample_rate: f64) -> Result<TimeDelta, VrtError> {
    if p2.tsi != p1.tsi || p2.tsf != p1.tsf {
        return Err(VrtError::MismatchTimeTypes);
    }
    match (p2.tsi, p2.tsf) {
        (Tsi::None, Tsf::None) => Ok(TimeDelta {
            seconds: 0,
            picoseconds: 0,
        }),
        (_, Tsf::None) => Ok(TimeDelta {
            seconds: p2.integer_seconds as i64 - p1.integer_seconds as i64,
            picoseconds: 0,
        }),
        (_, Tsf::SampleCount) => sample_count(p2, p1, sample_rate),
        (_, Tsf::RealTime) => real_time(p2, p1),
        (_, Tsf::FreeRunningCount) => free_running_count(p2, p1, sample_rate),
    }
}

/// Broken-down civil time, proleptic Gregorian, no leap seconds.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Calendar {
    pub year: i64,
    /// 1..12.
    pub month: u32,
    /// 1..31.
    pub mday: u32,
    /// 0..365, days since January 1st of `year`.
    pub yday: u32,
    /// 0..6, 0 = Sunday (matches civil `tm_wday`).
    pub wday: u32,
    pub hour: u32,
    pub min: u32,
    pub sec: u32,
    pub picoseconds: u64,
}

const DAYS_IN_MONTH: [[u32; 12]; 2] = [
    [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31],
    [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31],
];

fn is_leap_year(y: i64) -> bool {
    (y % 4 == 0 && y % 100 != 0) || y % 400 == 0
}

/// Converts a day count since the 1970-01-01 epoch into a
/// proleptic-Gregorian (year, month, day), following Howard Hinnant's
/// `civil_from_days` construction rather than a fixed-epoch table.
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = (z - era * 146_097) as u64;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let m = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    (y + if m <= 2 { 1 } else { 0 }, m, d)
}

/// Converts integer seconds since the epoch into the `Calendar`'s
/// date and time-of-day fields (`picoseconds` is left at 0).
fn calendar_from_seconds(total_seconds: i64) -> Calendar {
    let days = total_seconds.div_euclid(86_400);
    let secs_of_day = total_seconds.rem_euclid(86_400);
    let (year, month, mday) = civil_from_days(days);

    let leap = is_leap_year(year) as usize;
    let yday = DAYS_IN_MONTH[leap][..(month as usize - 1)].iter().sum::<u32>() + (mday - 1);
    let wday = (days + 4).rem_euclid(7) as u32;

    Calendar {
        year,
        month,
        mday,
        yday,
        wday,
        hour: (secs_of_day / 3600) as u32,
        min: ((secs_of_day % 3600) / 60) as u32,
        sec: (secs_of_day % 60) as u32,
        picoseconds: 0,
    }
}

/// Converts a timestamp into broken-down calendar time. Valid only
/// when `tsi ∈ {Utc, Gps}`; `tsf` must not be `FreeRunningCount`.
pub fn time_calendar(ts: &Timestamp, sample_rate: f64) -> Result<Calendar, VrtError> {
    let epoch_seconds = match ts.tsi {
        Tsi::Utc => ts.integer_seconds as i64,
        Tsi::Gps => ts.integer_seconds as i64 + UTC_GPS_OFFSET_S,
        Tsi::None | Tsi::Other => return Err(VrtError::InvalidTsi),
    };
    let mut calendar = calendar_from_seconds(epoch_seconds);

    calendar.picoseconds = match ts.tsf {
        Tsf::None => 0,
        Tsf::SampleCount => {
            if sample_rate <= 0.0 {
                return Err(VrtError::MissingSampleRate);
            }
            if ts.fractional as f64 >= sample_rate {
                return Err(VrtError::BoundsSampleCount);
            }
            (ts.fractional as f64 / sample_rate * PS_PER_S as f64).round() as u64
        }
        Tsf::RealTime => {
            if ts.fractional >= PS_PER_S {
                return Err(VrtError::BoundsRealTime);
            }
            ts.fractional
        }
        Tsf::FreeRunningCount => return Err(VrtError::InvalidTsf),
    };
    Ok(calendar)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(tsi: Tsi, tsf: Tsf, integer_seconds: u32, fractional: u64) -> Timestamp {
        Timestamp {
            tsi,
            tsf,
            integer_seconds,
            fractional,
        }
    }

    #[test]
    fn negative_duration_borrows_correctly() {
        let p1 = ts(Tsi::Utc, Tsf::RealTime, 10, 0);
        let p2 = ts(Tsi::Utc, Tsf::RealTime, 6, 500_000_000_000);
        let d = time_difference(&p2, &p1, 0.0).unwrap();
        assert_eq!(d.seconds, -4);
        assert_eq!(d.picoseconds, 500_000_000_000);
    }

    #[test]
    fn mismatched_time_types_rejected() {
        let p1 = ts(Tsi::Utc, Tsf::None, 10, 0);
        let p2 = ts(Tsi::Gps, Tsf::None, 10, 0);
        assert_eq!(time_difference(&p2, &p1, 0.0), Err(VrtError::MismatchTimeTypes));
    }

    #[test]
    fn sample_count_requires_positive_rate() {
        let p1 = ts(Tsi::None, Tsf::SampleCount, 0, 0);
        let p2 = ts(Tsi::None, Tsf::SampleCount, 0, 1);
        assert_eq!(time_difference(&p2, &p1, 0.0), Err(VrtError::MissingSampleRate));
    }

    #[test]
    fn free_running_count_checks_tsi_consistency() {
        let p1 = ts(Tsi::Utc, Tsf::FreeRunningCount, 100, 0);
        let p2 = ts(Tsi::Utc, Tsf::FreeRunningCount, 105, 10_000);
        // sample_rate implies ~3s elapsed but tsi implies 5s: mismatch.
        assert_eq!(
            time_difference(&p2, &p1, 2_000.0),
            Err(VrtError::IntegerSecondsMismatch)
        );
    }

    #[test]
    fn epoch_is_thursday() {
        let ts_epoch = ts(Tsi::Utc, Tsf::None, 0, 0);
        let cal = time_calendar(&ts_epoch, 0.0).unwrap();
        assert_eq!((cal.year, cal.month, cal.mday), (1970, 1, 1));
        assert_eq!(cal.wday, 4);
        assert_eq!(cal.yday, 0);
    }

    #[test]
    fn gps_offset_applied() {
        let ts_gps = ts(Tsi::Gps, Tsf::None, 0, 0);
        let cal = time_calendar(&ts_gps, 0.0).unwrap();
        assert_eq!((cal.year, cal.month, cal.mday), (1980, 1, 6));
    }

    #[test]
    fn leap_day_round_trips() {
        // 2024-02-29 00:00:00 UTC
        let days = (2024 - 1970) * 365 + 13 + 29 - 1; // rough but checked below precisely
        let _ = days;
        let seconds = 1_709_164_800i64; // known epoch seconds for 2024-02-29T00:00:00Z
        let cal = calendar_from_seconds(seconds);
        assert_eq!((cal.year, cal.month, cal.mday), (2024, 2, 29));
    }

    #[test]
    fn free_running_count_invalid_for_calendar() {
        let ts_frc = ts(Tsi::Utc, Tsf::FreeRunningCount, 0, 0);
        assert_eq!(time_calendar(&ts_frc, 0.0), Err(VrtError::InvalidTsf));
    }
}
