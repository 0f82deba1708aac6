//! Parsing arbitrary payloads never panics and honours the layout length

use proptest::prelude::*;
use vcu_protocol::{
    DashboardFrame, InverterActual1, InverterActual2, InverterActual3, InverterSetpoints,
    PedalFrame, ProtocolError, Record, SubControllerFrame,
};

proptest! {
    #[test]
    fn parse_any_payload(id in any::<u16>(), payload in prop::collection::vec(any::<u8>(), 0..=8)) {
        let record = Record::new(id, &payload, 0).unwrap();
        let full = payload.len() == 8;

        prop_assert_eq!(PedalFrame::parse(&record).is_ok(), full);
        prop_assert_eq!(SubControllerFrame::parse(&record).is_ok(), full);
        prop_assert_eq!(InverterActual1::parse(&record).is_ok(), full);
        prop_assert_eq!(InverterActual2::parse(&record).is_ok(), full);
        prop_assert_eq!(InverterActual3::parse(&record).is_ok(), full);
        prop_assert_eq!(InverterSetpoints::parse(&record).is_ok(), full);
        prop_assert_eq!(DashboardFrame::parse(&record).is_ok(), payload.len() >= 2);
    }

    #[test]
    fn status_byte_lands_in_flags(status in any::<u8>(), speed in any::<i16>()) {
        let mut payload = [0u8; 8];
        payload[1] = status;
        payload[2..4].copy_from_slice(&speed.to_le_bytes());
        let frame = InverterActual1::parse(&Record::new(0x283, &payload, 0).unwrap()).unwrap();

        prop_assert_eq!(frame.status.ready, status & 0x01 != 0);
        prop_assert_eq!(frame.status.derating, status & 0x80 != 0);
        prop_assert!(!frame.status.reserved);
        prop_assert_eq!(frame.speed, speed);
    }
}

#[test]
fn short_pedal_payload_reports_lengths() {
    let record = Record::new(0x30, &[1, 2, 3, 4], 0).unwrap();
    assert_eq!(
        PedalFrame::parse(&record),
        Err(ProtocolError::ShortPayload {
            id: 0x30,
            expected: 8,
            actual: 4
        })
    );
}
