#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use vsohash::{ContentId, HasherConfig, hash_reader};

fuzz_target!(|data: Vec<u8>| {
    let config = HasherConfig::new(2).unwrap();
    let id = hash_reader(Cursor::new(&data), &config).unwrap();

    // Verify: reader path agrees with the sequential construction
    assert_eq!(id, ContentId::sequential(&data));

    // Verify: identifiers survive a hex round trip
    assert_eq!(id.to_hex().parse::<ContentId>().unwrap(), id);
});
