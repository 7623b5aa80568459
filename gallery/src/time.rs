//! Wall-clock decomposition shared by every clock face (UTC, millisecond resolution).

use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

pub const MS_PER_DAY: u64 = 86_400_000;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ClockTime {
    pub epoch_ms: u64,
    pub milliseconds: u32,
    /// Seconds including the millisecond fraction.
    pub seconds: f64,
    /// Minutes including the seconds fraction.
    pub minutes: f64,
    /// Hours since midnight including the minutes fraction.
    pub hours: f64,
}

impl ClockTime {
    pub fn from_epoch_ms(epoch_ms: u64) -> Self {
        let ms_of_day = epoch_ms % MS_PER_DAY;
        let milliseconds = (ms_of_day % 1_000) as u32;
        let whole_seconds = (ms_of_day / 1_000) % 60;
        let whole_minutes = (ms_of_day / 60_000) % 60;
        let whole_hours = ms_of_day / 3_600_000;

        let seconds = whole_seconds as f64 + milliseconds as f64 / 1_000.0;
        let minutes = whole_minutes as f64 + seconds / 60.0;
        let hours = whole_hours as f64 + minutes / 60.0;

        Self {
            epoch_ms,
            milliseconds,
            seconds,
            minutes,
            hours,
        }
    }

    pub fn now() -> Self {
        let epoch_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        Self::from_epoch_ms(epoch_ms)
    }

    /// `[millisecond/1000, second/60, minute/60, hour/24]`, each in `[0, 1)`.
    pub fn normalized(&self) -> [f64; 4] {
        [
            self.milliseconds as f64 / 1_000.0,
            self.seconds / 60.0,
            self.minutes / 60.0,
            self.hours / 24.0,
        ]
    }

    /// `YYYY-MM-DDTHH:MM:SS.mmmZ`
    pub fn iso_stamp(&self) -> String {
        let (year, month, day) = civil_from_days((self.epoch_ms / MS_PER_DAY) as i64);
        format!(
            "{year:04}-{month:02}-{day:02}T{:02}:{:02}:{:02}.{:03}Z",
            self.hours as u64,
            self.minutes as u64,
            self.seconds as u64,
            self.milliseconds
        )
    }

    /// ISO stamp with the `T` and `Z` markers removed.
    pub fn bare_stamp(&self) -> String {
        self.iso_stamp().replace(['T', 'Z'], "")
    }
}

pub fn ease_in_out_poly(x: f64, n: i32) -> f64 {
    if x < 0.5 {
        (2.0 * x).powi(n) / 2.0
    } else {
        1.0 - (2.0 * (1.0 - x)).powi(n) / 2.0
    }
}

// Howard Hinnant's days-to-civil conversion (proleptic Gregorian).
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}
