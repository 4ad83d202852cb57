#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate nmea_fix;

use nmea_fix::Receiver;

fuzz_target!(|data: &[u8]| {
    let mut receiver = Receiver::new();

    for &byte in data {
        let _ = receiver.feed(byte);
    }
});
