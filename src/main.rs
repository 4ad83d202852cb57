//! Reads NMEA sentences from stdin and prints every accepted update.
//!
//! `RUST_LOG=debug nmea-fix < capture.nmea` also shows rejected sentences.

extern crate env_logger;
#[macro_use]
extern crate log;
extern crate nmea_fix;

use std::io::{self, Write};

use nmea_fix::{ReadSource, Receiver, Update};

fn main() -> io::Result<()> {
    env_logger::Builder::new()
        .format_timestamp(None)
        .format_target(false)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let stdin = io::stdin();
    let mut source = ReadSource::new(stdin.lock());
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut receiver = Receiver::new();

    while !source.is_exhausted() {
        let update = match receiver.poll(&mut source)? {
            Some(update) => update,
            None => continue,
        };
        let snapshot = match receiver.take_fresh() {
            Some(snapshot) => snapshot,
            None => continue,
        };
        match update {
            Update::Fix => writeln!(
                out,
                "fix {:.2} lat={:.7} lon={:.7} alt={:.1} q={} sats={} hdop={:.1} east={:.2} north={:.2}",
                snapshot.time,
                snapshot.latitude,
                snapshot.longitude,
                snapshot.altitude,
                snapshot.fix_quality.code(),
                snapshot.sat_count,
                snapshot.hdop,
                snapshot.position.east,
                snapshot.position.north,
            )?,
            Update::Velocity => writeln!(
                out,
                "velocity {:.3} m/s ({:.1} kn)",
                snapshot.speed, snapshot.speed_knots
            )?,
        }
    }

    info!("{:?}", receiver.stats());
    Ok(())
}
