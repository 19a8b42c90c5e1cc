use std::env;

use leaptick::{
    AnchoredClock, GpsInstant, GpsWeek, LeapSecondTable, LeapTableConfig, Posix, TaiInstant,
    TickSource,
};

fn main() -> Result<(), leaptick::TimeError> {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "/usr/share/zoneinfo/leapseconds".to_string());
    let table = LeapSecondTable::from_file(&path, &LeapTableConfig::default())?;

    let now = Posix::now();
    let tai = TaiInstant::from_posix(&now, &table);
    let gps: GpsInstant = tai.to();

    println!("UTC: {now}");
    println!("TAI − UTC: {} s", table.offset_at(&now));
    println!("TAI: {tai}");
    println!(
        "GPS: cycle {} week {} second {}",
        gps.cycle(),
        gps.week(),
        gps.seconds_of_week()
    );
    println!("Tick60: {}", gps.to_tick60()?);
    if let Some(week) = GpsWeek::containing(gps.to_tick60()?) {
        println!("{week}");
    }
    if table.is_stale(now.seconds()) {
        println!(
            "ledger ends {} s ago",
            -table.seconds_until_final_leap(now.seconds())
        );
    }

    let clock = AnchoredClock::new();
    println!("next ticks: {} {}", clock.next_tick(), clock.next_tick());
    Ok(())
}
