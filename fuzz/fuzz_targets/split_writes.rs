#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use vsohash::{ContentId, Hasher, ID_TAG};

fuzz_target!(|input: (Vec<u16>, Vec<u8>)| {
    let (splits, data) = input;
    let expected = ContentId::sequential(&data);
    assert_eq!(expected.tag(), ID_TAG);

    // Verify: one-shot matches the sequential construction
    assert_eq!(vsohash::compute(&data), expected);

    // Verify: any split of the input gives the same identifier
    for parallelism in [1, 3] {
        let mut hasher = Hasher::new(parallelism).unwrap();
        let mut rest = &data[..];
        for (i, &split) in splits.iter().enumerate() {
            let n = (split as usize).min(rest.len());
            let (head, tail) = rest.split_at(n);
            if i % 2 == 0 {
                hasher.update(head).unwrap();
            } else {
                hasher.update_bytes(Bytes::copy_from_slice(head)).unwrap();
            }
            rest = tail;
        }
        hasher.update(rest).unwrap();

        assert_eq!(hasher.bytes_written(), data.len() as u64);
        assert_eq!(hasher.finish().unwrap(), expected);

        // Verify: the hasher is single-use
        assert!(hasher.finish().is_err());
    }
});
