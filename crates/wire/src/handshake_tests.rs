// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tokio::io::duplex;

const V1: ProtocolVersion = ProtocolVersion::V1;
const V2: ProtocolVersion = ProtocolVersion::V2;
const V3: ProtocolVersion = ProtocolVersion::V3;

async fn run(
    client: VersionRange,
    server: VersionRange,
) -> (Result<ProtocolVersion, ProtocolError>, Result<ProtocolVersion, ProtocolError>) {
    let (mut a, mut b) = duplex(64);
    tokio::join!(client_handshake(&mut a, client), server_handshake(&mut b, server))
}

#[tokio::test]
async fn picks_highest_common_version() {
    let (client, server) = run(VersionRange::new(V1, V2), VersionRange::SUPPORTED).await;
    assert_eq!(client.unwrap(), V2);
    assert_eq!(server.unwrap(), V2);
}

#[tokio::test]
async fn identical_ranges_use_current() {
    let (client, server) = run(VersionRange::SUPPORTED, VersionRange::SUPPORTED).await;
    assert_eq!(client.unwrap(), ProtocolVersion::CURRENT);
    assert_eq!(server.unwrap(), ProtocolVersion::CURRENT);
}

#[tokio::test]
async fn disjoint_ranges_fail_on_both_sides() {
    let (client, server) = run(VersionRange::exactly(V1), VersionRange::new(V2, V3)).await;
    assert!(matches!(client, Err(ProtocolError::NoCommonVersion(r)) if r == VersionRange::exactly(V1)));
    assert!(matches!(server, Err(ProtocolError::NoCommonVersion(_))));
}

#[tokio::test]
async fn client_rejects_bad_magic() {
    let (mut a, mut b) = duplex(64);
    let server = async move {
        let _offer = read_frame(&mut b).await.unwrap();
        write_frame(&mut b, &[0xca, 0xfe, 0, 1]).await.unwrap();
    };
    let (client, ()) = tokio::join!(client_handshake(&mut a, VersionRange::SUPPORTED), server);
    assert!(matches!(client, Err(ProtocolError::Wire(WireError::BadMagic(0xcafe)))));
}

#[tokio::test]
async fn client_rejects_choice_outside_offer() {
    let (mut a, mut b) = duplex(64);
    let server = async move {
        let _offer = read_frame(&mut b).await.unwrap();
        write_frame(&mut b, &[0x44, 0x4d, 0, 9]).await.unwrap();
    };
    let (client, ()) = tokio::join!(client_handshake(&mut a, VersionRange::SUPPORTED), server);
    assert!(matches!(client, Err(ProtocolError::VersionOutOfRange { chosen: 9, .. })));
}

#[tokio::test]
async fn server_sees_closed_connection() {
    let (a, mut b) = duplex(64);
    drop(a);
    assert!(matches!(
        server_handshake(&mut b, VersionRange::SUPPORTED).await,
        Err(ProtocolError::ConnectionClosed)
    ));
}
