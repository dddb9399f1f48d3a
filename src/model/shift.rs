use chrono::NaiveTime;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Organizational cutoff applied to employees without an assigned shift.
pub static DEFAULT_LATE_CUTOFF: Lazy<NaiveTime> =
    Lazy::new(|| NaiveTime::from_hms_opt(8, 30, 0).unwrap());

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Shift {
    pub id: i64,

    #[schema(example = "Night Shift")]
    pub name: String,

    #[schema(example = "22:00:00", value_type = String, format = "time")]
    pub start_time: NaiveTime,

    /// An end time earlier than the start time denotes an overnight shift.
    #[schema(example = "06:30:00", value_type = String, format = "time")]
    pub end_time: NaiveTime,

    pub active: bool,
}

impl Shift {
    pub fn is_overnight(&self) -> bool {
        self.end_time < self.start_time
    }

    /// Lateness for a clock-in at `time_in`.
    ///
    /// Regular shift: late iff strictly after the start time.
    ///
    /// Overnight shift (e.g. 22:00-06:30) partitions the day into three
    /// zones: `[00:00, end]` is the early-morning tail of the previous
    /// evening's shift (on-time, boundary inclusive at `end`), `(end, start)`
    /// is outside the window entirely (late), and on `[start, 24:00)` a
    /// clock-in exactly at `start` is on time.
    pub fn is_late(&self, time_in: NaiveTime) -> bool {
        if !self.is_overnight() {
            return time_in > self.start_time;
        }

        if time_in <= self.end_time {
            false
        } else if time_in < self.start_time {
            true
        } else {
            time_in > self.start_time
        }
    }
}

/// Shift-aware lateness with the no-shift fallback cutoff.
pub fn is_late_for(shift: Option<&Shift>, time_in: NaiveTime) -> bool {
    match shift {
        Some(shift) => shift.is_late(time_in),
        None => time_in > *DEFAULT_LATE_CUTOFF,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(hour: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, min, 0).unwrap()
    }

    fn day_shift() -> Shift {
        Shift {
            id: 1,
            name: "Day Shift".to_string(),
            start_time: hm(8, 0),
            end_time: hm(17, 0),
            active: true,
        }
    }

    fn night_shift() -> Shift {
        Shift {
            id: 2,
            name: "Night Shift".to_string(),
            start_time: hm(22, 0),
            end_time: hm(6, 30),
            active: true,
        }
    }

    #[test]
    fn regular_shift_exactly_on_time() {
        let shift = day_shift();
        assert!(!shift.is_late(hm(7, 59)));
        assert!(!shift.is_late(hm(8, 0)));
        assert!(shift.is_late(hm(8, 1)));
    }

    #[test]
    fn night_shift_after_start_is_late() {
        assert!(night_shift().is_late(hm(23, 0)));
    }

    #[test]
    fn night_shift_early_morning_tail_is_on_time() {
        assert!(!night_shift().is_late(hm(2, 0)));
    }

    #[test]
    fn night_shift_outside_window_is_late() {
        assert!(night_shift().is_late(hm(15, 0)));
    }

    #[test]
    fn night_shift_boundary_minutes() {
        let shift = night_shift();

        // tail boundary: exactly at the end time still counts as on time
        assert!(!shift.is_late(hm(6, 29)));
        assert!(!shift.is_late(hm(6, 30)));
        assert!(shift.is_late(hm(6, 31)));

        // evening boundary: exactly at the start time is on time
        assert!(shift.is_late(hm(21, 59)));
        assert!(!shift.is_late(hm(22, 0)));
        assert!(shift.is_late(hm(22, 1)));

        // day edges
        assert!(!shift.is_late(hm(0, 0)));
        assert!(shift.is_late(hm(23, 59)));
    }

    // Pins the chosen convention for every minute of the day against the
    // zone boundaries written out as literals.
    #[test]
    fn night_shift_zones_cover_every_minute() {
        let shift = night_shift();
        let tail_end = hm(6, 30);
        let start = hm(22, 0);

        for minute in 0..24 * 60 {
            let t = NaiveTime::from_num_seconds_from_midnight_opt(minute * 60, 0).unwrap();
            let expected = if t <= tail_end {
                false
            } else if t < start {
                true
            } else {
                t != start
            };
            assert_eq!(shift.is_late(t), expected, "disagreement at {t}");
        }
    }

    #[test]
    fn no_shift_falls_back_to_cutoff() {
        assert!(!is_late_for(None, hm(8, 30)));
        assert!(is_late_for(None, hm(8, 31)));
        assert!(!is_late_for(None, hm(6, 0)));
    }

    #[test]
    fn assigned_shift_overrides_cutoff() {
        let shift = night_shift();
        // 09:00 would be late under the default cutoff but is merely the
        // dead zone judgement for the night shift
        assert!(is_late_for(Some(&shift), hm(9, 0)));
        assert!(!is_late_for(Some(&shift), hm(3, 0)));
    }
}
