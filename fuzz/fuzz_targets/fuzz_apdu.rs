//! Fuzz target: `TagService::process_command_apdu`
//!
//! Drives arbitrary byte sequences through the full APDU path and
//! asserts that every input gets a defined response: either exactly the
//! failure status word or a success-terminated data response that fits
//! the bounded response buffer.  No input may panic.
//!
//! cargo fuzz run fuzz_apdu

#![no_main]

use libfuzzer_sys::fuzz_target;
use taplink::app::ports::NullEventSink;
use taplink::app::service::TagService;
use taplink::config::TagConfig;

fuzz_target!(|data: &[u8]| {
    let mut service = TagService::new(TagConfig::default()).expect("default config is valid");
    let mut sink = NullEventSink;
    service
        .set_url("https://example.com/fuzz", &mut sink)
        .expect("url within capacity");

    // Interpret the input as a sequence of length-prefixed APDUs so one
    // run exercises multi-command state, not just the first transition.
    let mut rest = data;
    while let [len, tail @ ..] = rest {
        let take = (*len as usize).min(tail.len());
        let (apdu, remainder) = tail.split_at(take);
        rest = remainder;

        let resp = service.process_command_apdu(apdu, &mut sink);
        assert!(
            resp.as_slice() == [0x6A, 0x82] || resp.ends_with(&[0x90, 0x00]),
            "undefined response {:02X?} for apdu {:02X?}",
            resp.as_slice(),
            apdu
        );
        assert!(resp.len() >= 2 && resp.len() <= 258);
    }
});
