use std::sync::LazyLock;

use leaptick::julian::{civil_from_truncated_julian_day, truncated_julian_day};
use leaptick::{GpsInstant, LeapSecondTable, Posix, TaiInstant, Tick60Instant};
use proptest::prelude::*;

static TABLE: LazyLock<LeapSecondTable> = LazyLock::new(|| {
    include_str!("data/leapseconds")
        .parse()
        .expect("fixture ledger loads")
});

/// GPS seconds whose Tick60 value stays within 60 bits.
const MAX_GPS_SECONDS: i64 = 100_000_000_000;

proptest! {
    #[test]
    fn calendar_roundtrip(year in 1583i32..=9999, month in 1u8..=12, day in 1u8..=28) {
        let tjd = truncated_julian_day(year, month, day);
        prop_assert_eq!(civil_from_truncated_julian_day(tjd), (year, month, day));
    }

    #[test]
    fn posix_fields_rebuild_the_same_seconds(seconds in -10_000_000_000i64..100_000_000_000, nanos in 0u32..1_000_000_000) {
        let p = Posix::from_seconds(seconds, nanos);
        let rebuilt = Posix::from_calendar(p.year(), p.month(), p.day(), p.hour(), p.minute(), p.second(), p.nanos());
        prop_assert_eq!(rebuilt, p);
    }

    #[test]
    fn tai_gps_roundtrip(seconds in -1_000_000_000_000_000i64..1_000_000_000_000_000, nanos in 0u32..1_000_000_000) {
        let tai = TaiInstant::from_seconds(seconds, nanos);
        let gps: GpsInstant = tai.to();
        prop_assert_eq!(gps.seconds(), seconds - 694_656_019);
        prop_assert_eq!(gps.to::<leaptick::TAI>(), tai);
    }

    #[test]
    fn gps_tick60_roundtrip_truncates(seconds in 0i64..MAX_GPS_SECONDS, nanos in 0u32..1_000_000_000) {
        let gps = GpsInstant::from_seconds(seconds, nanos);
        let back = gps.to_tick60().unwrap().to_gps();
        prop_assert_eq!(back, GpsInstant::from_seconds(seconds, nanos - nanos % 100));
    }

    #[test]
    fn gps_components_roundtrip(cycle in 0u32..100, week in 0u16..1024, sow in 0u32..604_800, nanos in 0u32..1_000_000_000) {
        let gps = GpsInstant::from_components(cycle, week, sow, nanos);
        prop_assert_eq!(gps.cycle(), i64::from(cycle));
        prop_assert_eq!(gps.week(), week);
        prop_assert_eq!(gps.seconds_of_week(), sow);
        prop_assert_eq!(GpsInstant::from_seconds(gps.seconds(), nanos), gps);
    }

    #[test]
    fn offset_moves_by_at_most_one_and_only_at_records(seconds in 0i64..2_000_000_000) {
        let before = TABLE.offset(seconds);
        let after = TABLE.offset(seconds + 1);
        prop_assert!((after - before).abs() <= 1);
        if after != before {
            prop_assert!(TABLE.is_leap_second(seconds + 1));
        }
    }

    #[test]
    fn posix_tai_roundtrip(seconds in 0i64..2_000_000_000, nanos in 0u32..1_000_000_000) {
        let posix = Posix::from_seconds(seconds, nanos);
        let tai = TaiInstant::from_posix(&posix, &TABLE);
        prop_assert_eq!(tai.to_posix(&TABLE), posix);
    }

    #[test]
    fn tick60_text_roundtrip(ticks in 0u64..=Tick60Instant::MAX.ticks()) {
        let tick = Tick60Instant::new(ticks);
        let text = tick.to_string();
        prop_assert_eq!(text.parse::<Tick60Instant>().unwrap(), tick);
    }

    #[test]
    fn tai_text_roundtrip(seconds in 0i64..1_000_000_000_000, nanos in 0u32..1_000_000_000) {
        let tai = TaiInstant::from_seconds(seconds, nanos);
        prop_assert_eq!(tai.to_string().parse::<TaiInstant>().unwrap(), tai);
    }
}

#[test]
fn consecutive_records_differ_by_one() {
    for pair in TABLE.records().windows(2) {
        assert_eq!((pair[1].offset() - pair[0].offset()).abs(), 1);
    }
    assert_eq!(TABLE.records()[0].offset(), 11);
}
