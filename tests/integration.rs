use std::sync::Arc;
use std::thread;

use leaptick::{
    GpsInstant, GpsWeek, LeapSecondTable, LeapTableConfig, Posix, TaiInstant, Tick60Instant,
    TickGenerator, TickSource, TimeError,
};

const LEDGER: &str = include_str!("data/leapseconds");
const LEDGER_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/leapseconds");

fn table() -> LeapSecondTable {
    LeapSecondTable::from_file(LEDGER_PATH, &LeapTableConfig::default()).expect("fixture loads")
}

#[test]
fn first_record_raises_offset_to_eleven() {
    let table = table();
    let first = table.records()[0];
    assert_eq!(first.to_string(), "Leap 1972 Jun 30 23:59:60 + S");
    assert_eq!(first.offset(), 11);
    assert_eq!(table.offset_at(&Posix::midnight(1972, 7, 1)), 11);
}

#[test]
fn posix_epoch_in_ticks_is_the_lilian_constant() {
    let tick = Tick60Instant::from_posix(&Posix::midnight(1970, 1, 1)).unwrap();
    assert_eq!(tick.ticks(), 12_219_292_800 * 10_000_000);
}

#[test]
fn gps_components_at_epoch() {
    let gps = GpsInstant::from_components(0, 0, 0, 0);
    assert_eq!(gps, GpsInstant::from_seconds(0, 0));
    assert_eq!((gps.cycle(), gps.week(), gps.seconds_of_week()), (0, 0, 0));
}

#[test]
fn leap_second_text_roundtrips_to_the_same_tick() {
    let tick: Tick60Instant = "2015-06-30T23:59:60.1234567Z".parse().unwrap();
    let rendered = tick.to_string();
    assert_eq!(rendered, "2015-07-01T00:00:00.123456700Z");
    assert_eq!(rendered.parse::<Tick60Instant>().unwrap(), tick);
}

#[test]
fn short_ledger_leaves_no_table() {
    let short: String = LEDGER
        .lines()
        .filter(|l| l.starts_with("Leap"))
        .take(5)
        .collect::<Vec<_>>()
        .join("\n");
    let result = LeapSecondTable::parse(&short, &LeapTableConfig::default());
    assert!(matches!(
        result,
        Err(TimeError::InsufficientEntries { found: 5, .. })
    ));
}

#[test]
fn gps_epoch_from_posix() {
    let table = table();
    let posix = Posix::midnight(1980, 1, 6);
    assert_eq!(table.offset_at(&posix), 19);
    let tai = TaiInstant::from_posix(&posix, &table);
    assert_eq!(tai.seconds(), 694_656_019);
    let gps = GpsInstant::from_posix(&posix, &table);
    assert_eq!(gps, GpsInstant::from_seconds(0, 0));
}

#[test]
fn posix_roundtrip_across_the_2016_leap() {
    let table = table();
    for posix in [
        Posix::from_calendar(2016, 12, 31, 23, 59, 59, 999_999_999),
        Posix::midnight(2017, 1, 1),
        Posix::from_calendar(2017, 1, 1, 0, 0, 1, 5),
    ] {
        let gps = GpsInstant::from_posix(&posix, &table);
        assert_eq!(gps.to_posix(&table), posix, "{posix}");
    }
    // The named leap second and the following second share a POSIX count,
    // so both come back as the following second.
    let leap = Posix::from_calendar(2016, 12, 31, 23, 59, 60, 0);
    let tai = TaiInstant::from_posix(&leap, &table);
    assert_eq!(tai.to_posix(&table), Posix::midnight(2017, 1, 1));
}

#[test]
fn tai_elapsed_across_leap_second() {
    let table = table();
    let before = TaiInstant::from_posix(&Posix::from_calendar(2016, 12, 31, 23, 59, 59, 0), &table);
    let after = TaiInstant::from_posix(&Posix::midnight(2017, 1, 1), &table);
    // One civil second, two atomic seconds.
    assert_eq!(after.seconds() - before.seconds(), 2);
}

#[test]
fn atomic_and_civil_ticks_differ_by_leap_seconds() {
    let table = table();
    let posix = Posix::midnight(2020, 1, 1);
    let civil = Tick60Instant::from_posix(&posix).unwrap();
    let atomic = GpsInstant::from_posix(&posix, &table).to_tick60().unwrap();
    // GPS runs ahead of UTC by TAI−UTC − 19 = 18 s.
    assert_eq!(atomic.ticks() - civil.ticks(), 18 * 10_000_000);
}

#[test]
fn gps_week_around_a_tick() {
    let tick: Tick60Instant = "2024-03-15T12:00:00.000Z".parse().unwrap();
    let week = GpsWeek::containing(tick).unwrap();
    assert!(week.contains(tick));
    assert_eq!(i64::from(week.number()), tick.to_gps().absolute_week());
    let next = week.next().unwrap();
    assert_eq!(week.end(), next.begin());
    assert!(!week.contains(next.begin()));
}

#[test]
fn shared_table_across_threads() {
    let table = table().into_shared();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let table = Arc::clone(&table);
            thread::spawn(move || table.offset(1_483_228_800 + i))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 37);
    }
}

#[test]
fn generator_shared_between_threads_never_repeats() {
    let generator = Arc::new(TickGenerator::new());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let generator = Arc::clone(&generator);
            thread::spawn(move || (0..500).map(|_| generator.next_tick()).collect::<Vec<_>>())
        })
        .collect();
    let mut all: Vec<Tick60Instant> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    let issued = all.len();
    all.sort();
    all.dedup();
    assert_eq!(all.len(), issued);
}
