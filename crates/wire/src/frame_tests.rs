// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use dmi_core::test_support::order_flow;
use dmi_core::PeerServer;

#[tokio::test]
async fn frame_roundtrip() {
    let original = b"hello world";

    let mut buffer = Vec::new();
    write_frame(&mut buffer, original).await.expect("write failed");
    assert_eq!(buffer.len(), 4 + original.len());

    let mut cursor = std::io::Cursor::new(buffer);
    let read_back = read_frame(&mut cursor).await.expect("read failed");
    assert_eq!(read_back, original);
}

#[tokio::test]
async fn write_frame_adds_length_prefix() {
    let data = b"test data";

    let mut buffer = Vec::new();
    write_frame(&mut buffer, data).await.expect("write failed");

    let len = u32::from_be_bytes([buffer[0], buffer[1], buffer[2], buffer[3]]) as usize;
    assert_eq!(len, data.len());
    assert_eq!(&buffer[4..], data);
}

#[tokio::test]
async fn empty_stream_is_connection_closed() {
    let mut cursor = std::io::Cursor::new(Vec::<u8>::new());
    assert!(matches!(read_frame(&mut cursor).await, Err(ProtocolError::ConnectionClosed)));
}

#[tokio::test]
async fn truncated_payload_is_io_error() {
    let mut buffer = 10u32.to_be_bytes().to_vec();
    buffer.extend_from_slice(b"abc");
    let mut cursor = std::io::Cursor::new(buffer);
    assert!(matches!(read_frame(&mut cursor).await, Err(ProtocolError::Io(_))));
}

#[tokio::test]
async fn oversized_length_rejected_before_reading() {
    let buffer = ((MAX_FRAME_SIZE + 1) as u32).to_be_bytes().to_vec();
    let mut cursor = std::io::Cursor::new(buffer);
    let err = read_frame(&mut cursor).await.unwrap_err();
    assert!(matches!(
        err,
        ProtocolError::MessageTooLarge { size, max } if size == MAX_FRAME_SIZE + 1 && max == MAX_FRAME_SIZE
    ));
}

#[tokio::test]
async fn oversized_write_rejected() {
    let data = vec![0u8; MAX_FRAME_SIZE + 1];
    let mut buffer = Vec::new();
    assert!(matches!(
        write_frame(&mut buffer, &data).await,
        Err(ProtocolError::MessageTooLarge { .. })
    ));
    assert!(buffer.is_empty());
}

#[tokio::test]
async fn objects_stream_in_order() {
    let app = order_flow();
    let server = PeerServer::new("fps1", "localhost", 1947);

    let mut buffer = Vec::new();
    write_object(&mut buffer, &DmiValue::from(app.clone()), ProtocolVersion::CURRENT).await.unwrap();
    write_object(&mut buffer, &DmiValue::from(server.clone()), ProtocolVersion::V2).await.unwrap();

    let mut cursor = std::io::Cursor::new(buffer);
    let first = read_object(&mut cursor).await.unwrap();
    assert_eq!(first.value, DmiValue::Application(app));
    let second = read_object(&mut cursor).await.unwrap();
    assert_eq!(second.version, ProtocolVersion::V2);
    assert_eq!(second.value, DmiValue::PeerServer(server));
    assert!(matches!(read_object(&mut cursor).await, Err(ProtocolError::ConnectionClosed)));
}

#[tokio::test]
async fn corrupt_envelope_surfaces_wire_error() {
    let mut buffer = Vec::new();
    write_frame(&mut buffer, &[0xca, 0xfe, 0, 1, 0, 1]).await.unwrap();
    let mut cursor = std::io::Cursor::new(buffer);
    assert!(matches!(
        read_object(&mut cursor).await,
        Err(ProtocolError::Wire(WireError::BadMagic(0xcafe)))
    ));
}
