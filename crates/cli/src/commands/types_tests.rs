// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn rows_follow_registry_order() {
    let rows = registered();
    assert_eq!(rows.len(), registry::entries().len());
    assert_eq!(rows[0], TypeRow { tag: 1, name: "application" });
    assert!(rows.windows(2).all(|w| w[0].tag < w[1].tag));
}
