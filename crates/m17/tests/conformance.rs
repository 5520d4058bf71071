//! Known-answer and error-path checks for the public API.

use bytes::Bytes;
use m17::address::{encode, Address, AddressError};
use m17::frame::{
    recover_lich, FrameError, FramerConfig, IpFrame, LichFrame, Payload, RegularFrame, RfFramer,
    StreamType, DEFAULT_PORT, IP_FRAME_LEN, MAGIC, REGULAR_FRAME_LEN, SYNC_WORD,
};

fn w2fbi() -> Address {
    Address::from_callsign("W2FBI").unwrap()
}

fn sp5wwp() -> Address {
    Address::from_callsign("SP5WWP").unwrap()
}

#[test]
fn w2fbi_known_answer() {
    assert_eq!(encode("W2FBI").unwrap(), 23_178_783);
    assert_eq!(w2fbi().to_bytes(), [0x00, 0x00, 0x01, 0x61, 0xAE, 0x1F]);
}

#[test]
fn address_equality_across_representations() {
    let me = w2fbi();
    assert_eq!(me, "W2FBI");
    assert_eq!(me, 23_178_783u64);
    assert_eq!(me, Address::from_addr(23_178_783).unwrap());
}

#[test]
fn address_errors() {
    assert!(matches!(
        encode("ABCDEFGHIJ"),
        Err(AddressError::AddressOverflow { .. })
    ));
    assert!(matches!(
        encode("W2FBI*"),
        Err(AddressError::InvalidCallsign { ch: '*', .. })
    ));
}

#[test]
fn unsupported_lich_source() {
    let payload = Payload::new(0, [0; 8]);
    assert!(matches!(
        RegularFrame::from_raw_lich(b"not a lich", payload),
        Err(FrameError::UnsupportedLichSource { len: 10 })
    ));
}

#[test]
fn malformed_nonce() {
    assert!(matches!(
        LichFrame::try_new(sp5wwp(), w2fbi(), StreamType::CODEC2_3200_VOICE, &[0u8; 15]),
        Err(FrameError::MalformedFrame { .. })
    ));
}

#[test]
fn wire_constants() {
    assert_eq!(DEFAULT_PORT, 17000);
    assert_eq!(SYNC_WORD.to_be_bytes(), [0x32, 0x43]);
    assert_eq!(&MAGIC, b"M17 ");
    assert_eq!(REGULAR_FRAME_LEN, 18);
    assert_eq!(IP_FRAME_LEN, 46);
}

#[test]
fn rf_stream_end_to_end() {
    let lich = LichFrame::new(sp5wwp(), w2fbi(), StreamType::CODEC2_3200_VOICE, [0x5A; 14]);
    let mut framer = RfFramer::with_config(lich.clone(), FramerConfig::default());
    let voice = vec![0xC2u8; 8 * 10];

    let wire: Vec<Bytes> = framer
        .payload_stream(&voice)
        .iter()
        .map(RegularFrame::pack)
        .collect();
    assert!(wire.iter().all(|f| f.len() == REGULAR_FRAME_LEN));

    // a receiver joining mid-stream sees frames 3..8
    let recovered = recover_lich(&wire[3..8]).unwrap();
    assert_eq!(recovered, lich);
    assert_eq!(recovered.to_string(), "LICH: W2FBI =[5]> SP5WWP");
}

#[test]
fn ip_receiver_filters_foreign_traffic() {
    let lich = LichFrame::new(sp5wwp(), w2fbi(), 5u16, [0; 14]);
    let frame = IpFrame::new(0xBEEF, lich, Payload::new(0, *b"voice..."));
    let datagrams: Vec<Vec<u8>> = vec![b"PING".to_vec(), frame.pack().to_vec()];

    let accepted: Vec<IpFrame> = datagrams
        .iter()
        .filter(|d| IpFrame::is_m17(d))
        .map(|d| IpFrame::unpack(d).unwrap())
        .collect();
    assert_eq!(accepted, vec![frame]);
}
