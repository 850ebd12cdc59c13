// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixtures shared by unit tests across crates.

use crate::{Application, Endpoint, Port, Route, ServiceInstance};

/// Three-stage order flow: `feeder -> transformer -> display`.
pub fn order_flow() -> Application {
    Application::new("OrderFlow")
        .with_description("Routes purchase orders through a transformation")
        .with_category("samples")
        .with_service(
            ServiceInstance::builder()
                .name("feeder")
                .component("feeder")
                .ports(vec![Port::output("OUT_PORT", "orders.feeder.out")])
                .build(),
        )
        .with_service(
            ServiceInstance::builder()
                .name("transformer")
                .parameters([("stylesheet".to_string(), "order.xsl".to_string())].into_iter().collect())
                .build(),
        )
        .with_service(
            ServiceInstance::builder()
                .name("display")
                .component("display")
                .ports(vec![Port::input("IN_PORT", "orders.display.in")])
                .build(),
        )
        .with_route(Route::new(
            "feed",
            Endpoint::new("feeder", "OUT_PORT"),
            Endpoint::new("transformer", "IN_PORT"),
        ))
        .with_route(
            Route::new(
                "show",
                Endpoint::new("transformer", "OUT_PORT"),
                Endpoint::new("display", "IN_PORT"),
            )
            .with_selector("priority > 3"),
        )
}
