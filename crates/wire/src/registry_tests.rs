// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::codec::MAX_DEPTH;
use crate::version::ProtocolVersion;
use dmi_core::test_support::order_flow;
use dmi_core::{PeerServer, Port};
use std::collections::HashSet;

#[test]
fn tags_and_names_are_unique() {
    let tags: HashSet<_> = entries().iter().map(|e| e.tag).collect();
    let names: HashSet<_> = entries().iter().map(|e| e.name).collect();
    assert_eq!(tags.len(), entries().len());
    assert_eq!(names.len(), entries().len());
}

#[test]
fn entries_are_in_tag_order() {
    let tags: Vec<u16> = entries().iter().map(|e| e.tag.0).collect();
    assert_eq!(tags, (1..=12).collect::<Vec<u16>>());
}

#[yare::parameterized(
    application = { TypeTag::APPLICATION, "application" },
    port = { TypeTag::PORT, "port" },
    service_status = { TypeTag::SERVICE_STATUS, "service_status" },
    principal = { TypeTag::PRINCIPAL, "principal" },
    archive = { TypeTag::ARCHIVE, "archive" },
    object_list = { TypeTag::OBJECT_LIST, "object_list" },
)]
fn lookup_and_by_name_agree(tag: TypeTag, name: &str) {
    assert_eq!(lookup(tag).map(|e| e.name), Some(name));
    assert_eq!(by_name(name).map(|e| e.tag), Some(tag));
    assert_eq!(tag.name(), Some(name));
}

#[test]
fn unregistered_tags_have_no_entry() {
    assert!(lookup(TypeTag(0)).is_none());
    assert!(lookup(TypeTag(999)).is_none());
    assert!(by_name("job").is_none());
    assert_eq!(TypeTag(999).to_string(), "#999");
    assert_eq!(TypeTag::ROUTE.to_string(), "route(4)");
}

#[test]
fn value_names_match_serde_names() {
    let value = DmiValue::from(PeerServer::new("fps1", "localhost", 1947));
    let json = serde_json::to_value(&value).unwrap();
    assert_eq!(json["type"], value.type_name());
    assert_eq!(json["object"]["host"], "localhost");
}

#[test]
fn mixed_list_reconstructs_each_type() {
    let list: ObjectList = vec![
        DmiValue::from(order_flow()),
        DmiValue::from(Port::input("IN_PORT", "q.in")),
        DmiValue::from(PeerServer::new("fps1", "localhost", 1947)),
    ]
    .into_iter()
    .collect();

    let mut w = DmiWriter::new(ProtocolVersion::CURRENT);
    w.put_tagged(&DmiValue::from(list.clone())).unwrap();
    let mut r = DmiReader::new(w.into_bytes(), ProtocolVersion::CURRENT);
    let back = r.get_tagged().unwrap();
    r.finish().unwrap();

    let DmiValue::ObjectList(back) = back else {
        panic!("expected object list");
    };
    assert_eq!(back, list);
    let tags: Vec<_> = back.0.iter().map(DmiValue::type_tag).collect();
    assert_eq!(tags, vec![TypeTag::APPLICATION, TypeTag::PORT, TypeTag::PEER_SERVER]);
}

fn nested(depth: usize) -> DmiValue {
    let mut value = DmiValue::from(ObjectList::default());
    for _ in 1..depth {
        value = DmiValue::from(ObjectList(vec![value]));
    }
    value
}

#[test]
fn nesting_at_limit_is_accepted() {
    let mut w = DmiWriter::new(ProtocolVersion::CURRENT);
    w.put_tagged(&nested(MAX_DEPTH)).unwrap();
    let mut r = DmiReader::new(w.into_bytes(), ProtocolVersion::CURRENT);
    assert_eq!(r.get_tagged().unwrap(), nested(MAX_DEPTH));
}

#[test]
fn nesting_beyond_limit_is_rejected_on_write() {
    let mut w = DmiWriter::new(ProtocolVersion::CURRENT);
    assert_eq!(w.put_tagged(&nested(MAX_DEPTH + 1)), Err(WireError::TooDeep(MAX_DEPTH)));
}

#[test]
fn nesting_beyond_limit_is_rejected_on_read() {
    // Hand-built: MAX_DEPTH + 1 lists, each holding the next.
    let mut bytes = Vec::new();
    for _ in 0..=MAX_DEPTH {
        bytes.extend_from_slice(&TypeTag::OBJECT_LIST.0.to_be_bytes());
        bytes.extend_from_slice(&1u32.to_be_bytes());
    }
    let mut r = DmiReader::new(bytes, ProtocolVersion::CURRENT);
    assert_eq!(r.get_tagged(), Err(WireError::TooDeep(MAX_DEPTH)));
}

#[test]
fn unknown_nested_tag_is_rejected() {
    let mut bytes = TypeTag::OBJECT_LIST.0.to_be_bytes().to_vec();
    bytes.extend_from_slice(&1u32.to_be_bytes());
    bytes.extend_from_slice(&77u16.to_be_bytes());
    let mut r = DmiReader::new(bytes, ProtocolVersion::CURRENT);
    assert_eq!(r.get_tagged(), Err(WireError::UnknownType(TypeTag(77))));
}
