#![no_main]

use libfuzzer_sys::fuzz_target;
use gtc_peer::gtc::{
    GtcCapabilities, GtcRequest, GtcSession, MemoryCredentials, MethodOutcome, OuterMethod,
    MAX_PASSWORD_ATTEMPTS,
};

fuzz_target!(|data: &[u8]| {
    let Some((&selector, payload)) = data.split_first() else {
        return;
    };
    let outer = if selector & 1 == 0 {
        OuterMethod::None
    } else {
        OuterMethod::Fast
    };
    let capabilities = GtcCapabilities {
        vendor_error_codes: selector & 2 != 0,
        new_password_retry: selector & 4 != 0,
    };
    let mut session = GtcSession::for_outer(outer, capabilities);
    let mut store = MemoryCredentials::new()
        .with_identity("fuzz")
        .with_password("pw")
        .with_new_password("npw");

    for round in 0..3u8 {
        let request = GtcRequest::new(round, payload);
        let mut outcome = MethodOutcome::default();
        let _ = session.process(&mut store, &request, &mut outcome);
        assert!(session.password_tried() <= MAX_PASSWORD_ATTEMPTS);
    }
});
