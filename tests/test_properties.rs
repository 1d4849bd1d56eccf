//! Property tests for the GTC method and the settings parser.

use gtc_peer::gtc::{
    CredentialStore, ErrorCode, GtcCapabilities, GtcRequest, GtcSession, MAX_PASSWORD_ATTEMPTS,
    MemoryCredentials, MethodOutcome, OuterMethod, PeerCommand, Reply, TunnelResponse,
};
use gtc_peer::settings::{
    LineOutcome, OperationalSettings, SETTINGS, apply_line, parse_unsigned, table_for,
};
use proptest::prelude::*;

fn fast_session() -> GtcSession {
    GtcSession::for_outer(OuterMethod::Fast, GtcCapabilities::vendor())
}

fn full_store() -> MemoryCredentials {
    MemoryCredentials::new()
        .with_identity("user")
        .with_password("pw")
        .with_new_password("npw")
}

proptest! {
    #[test]
    fn attempt_counter_never_exceeds_limit(
        payloads in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..24), 1..12),
        retry in any::<bool>(),
    ) {
        let caps = GtcCapabilities { vendor_error_codes: true, new_password_retry: retry };
        let mut session = GtcSession::for_outer(OuterMethod::Fast, caps);
        let mut store = full_store();
        for (id, payload) in payloads.iter().enumerate() {
            let mut outcome = MethodOutcome::default();
            let id = u8::try_from(id).unwrap();
            let _ = session.process(&mut store, &GtcRequest::new(id, payload), &mut outcome);
            prop_assert!(session.password_tried() <= MAX_PASSWORD_ATTEMPTS);
        }
    }

    #[test]
    fn unprefixed_tunnel_payload_gets_empty_ack(
        payload in "[^CE].*",
        id in any::<u8>(),
    ) {
        let mut session = fast_session();
        let mut store = full_store().with_otp("otp");
        let mut outcome = MethodOutcome::default();
        let reply = session
            .process(&mut store, &GtcRequest::new(id, payload.as_bytes()), &mut outcome)
            .unwrap();
        let response = reply.response().unwrap();
        prop_assert!(response.is_empty());
        prop_assert_eq!(response.identifier(), id);
        prop_assert_eq!(outcome, MethodOutcome::default());
        prop_assert!(store.otp().is_some());
    }

    #[test]
    fn error_codes_route_by_kind(code in 0u32..100_000) {
        let mut session = fast_session();
        let mut store = full_store();
        let payload = format!("E={code}");
        let mut outcome = MethodOutcome::default();
        let reply = session
            .process(&mut store, &GtcRequest::new(1, payload.as_bytes()), &mut outcome)
            .unwrap();

        if ErrorCode::from(code).requests_new_password() {
            prop_assert_eq!(reply.response().unwrap().payload(), b"RESPONSE=user\0npw");
            prop_assert!(outcome.promote_new_password);
        } else {
            prop_assert_eq!(
                reply,
                Reply::Prompt(PeerCommand::RequestOtp { prompt: payload.into_bytes() })
            );
            prop_assert!(outcome.ignore);
        }
    }

    #[test]
    fn otp_is_used_at_most_once(rounds in 1usize..6) {
        let mut session = GtcSession::default();
        let mut store = MemoryCredentials::new().with_otp("otp").with_password("pw");
        let mut otp_sent = 0;
        for id in 0..rounds {
            let mut outcome = MethodOutcome::default();
            let id = u8::try_from(id).unwrap();
            let reply = session
                .process(&mut store, &GtcRequest::new(id, b"Token:"), &mut outcome)
                .unwrap();
            if reply.response().unwrap().payload() == b"otp" {
                otp_sent += 1;
            }
        }
        prop_assert_eq!(otp_sent, 1);
    }

    #[test]
    fn tunnel_response_parses_back(
        identity in prop::collection::vec(1u8..=255, 0..32),
        credential in prop::collection::vec(any::<u8>(), 0..32),
    ) {
        let encoded = TunnelResponse { identity: &identity, credential: &credential }.encode();
        let parsed = TunnelResponse::parse(&encoded).unwrap();
        prop_assert_eq!(parsed.identity, identity.as_slice());
        prop_assert_eq!(parsed.credential, credential.as_slice());
    }

    #[test]
    fn decimal_values_parse_exactly(value in any::<u32>()) {
        prop_assert_eq!(parse_unsigned(value.to_string().as_bytes()), u64::from(value));
    }

    #[test]
    fn stored_values_always_in_bounds(
        lines in prop::collection::vec("[A-Za-z]{2,22}[ \t][-+0-9xX]{0,12}", 0..20),
        dms in any::<bool>(),
    ) {
        let table = table_for(dms);
        let mut settings = OperationalSettings::defaults();
        for line in &lines {
            let _ = apply_line(table, line.as_bytes(), &mut settings);
        }
        for entry in &SETTINGS {
            prop_assert!(entry.accepts(u64::from(settings.get(entry.field))), "{}", entry.key);
        }
    }

    #[test]
    fn key_case_is_ignored(value in 3u32..=60, upper in prop::collection::vec(any::<bool>(), 10)) {
        let key: String = "eaptimeout"
            .chars()
            .zip(upper)
            .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
            .collect();
        let line = format!("{key} {value}");
        let mut settings = OperationalSettings::defaults();
        let outcome = apply_line(table_for(false), line.as_bytes(), &mut settings);
        prop_assert_eq!(outcome, LineOutcome::Applied { key: "EAPTIMEOUT", value });
        prop_assert_eq!(settings.eap_timeout, value);
    }
}
