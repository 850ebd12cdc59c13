// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Type-tag registry for polymorphic object reconstruction.
//!
//! Every registered type appears once in [`DmiValue`] and once in the
//! static dispatch table consulted by [`DmiReader::get_tagged`].

use dmi_core::{
    Application, ApplicationArchive, ApplicationRuntimeStatus, ConfigProperty, KeyStoreEntry,
    PeerServer, Port, Route, SecurityPrincipal, ServiceInstance, ServiceRuntimeStatus,
};
use serde::Serialize;

use crate::codec::{DmiReader, DmiWriter};
use crate::error::WireError;
use crate::object::{DmiObject, TypeTag};

type DecodeFn = fn(&mut DmiReader) -> Result<DmiValue, WireError>;

/// One row of the dispatch table.
pub struct RegistryEntry {
    pub tag: TypeTag,
    pub name: &'static str,
    decode: DecodeFn,
}

impl RegistryEntry {
    pub fn decode(&self, r: &mut DmiReader) -> Result<DmiValue, WireError> {
        (self.decode)(r)
    }
}

impl std::fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryEntry").field("tag", &self.tag).field("name", &self.name).finish()
    }
}

macro_rules! dmi_types {
    ($( $variant:ident($ty:ty) => $name:literal ),+ $(,)?) => {
        /// Any registered DMI object.
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(tag = "type", content = "object", rename_all = "snake_case")]
        pub enum DmiValue {
            $( $variant($ty), )+
        }

        impl DmiValue {
            pub fn type_tag(&self) -> TypeTag {
                match self {
                    $( DmiValue::$variant(_) => <$ty as DmiObject>::TAG, )+
                }
            }

            pub fn type_name(&self) -> &'static str {
                match self {
                    $( DmiValue::$variant(_) => $name, )+
                }
            }

            pub(crate) fn write_body(&self, w: &mut DmiWriter) -> Result<(), WireError> {
                match self {
                    $( DmiValue::$variant(v) => v.write_body(w), )+
                }
            }
        }

        $(
            impl From<$ty> for DmiValue {
                fn from(v: $ty) -> Self {
                    DmiValue::$variant(v)
                }
            }
        )+

        static REGISTRY: &[RegistryEntry] = &[
            $(
                RegistryEntry {
                    tag: <$ty as DmiObject>::TAG,
                    name: $name,
                    decode: |r| <$ty as DmiObject>::read_body(r).map(DmiValue::$variant),
                },
            )+
        ];
    };
}

dmi_types! {
    Application(Application) => "application",
    ServiceInstance(ServiceInstance) => "service_instance",
    Port(Port) => "port",
    Route(Route) => "route",
    ServiceStatus(ServiceRuntimeStatus) => "service_status",
    ApplicationStatus(ApplicationRuntimeStatus) => "application_status",
    PeerServer(PeerServer) => "peer_server",
    ConfigProperty(ConfigProperty) => "config_property",
    Principal(SecurityPrincipal) => "principal",
    KeyStoreEntry(KeyStoreEntry) => "key_store_entry",
    Archive(ApplicationArchive) => "archive",
    ObjectList(ObjectList) => "object_list",
}

/// Heterogeneous sequence; each element carries its own type tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ObjectList(pub Vec<DmiValue>);

impl DmiObject for ObjectList {
    const TAG: TypeTag = TypeTag::OBJECT_LIST;

    fn write_body(&self, w: &mut DmiWriter) -> Result<(), WireError> {
        w.put_list(&self.0, |w, v| w.put_tagged(v))
    }

    fn read_body(r: &mut DmiReader) -> Result<Self, WireError> {
        r.get_list(|r| r.get_tagged()).map(ObjectList)
    }
}

impl FromIterator<DmiValue> for ObjectList {
    fn from_iter<I: IntoIterator<Item = DmiValue>>(iter: I) -> Self {
        ObjectList(iter.into_iter().collect())
    }
}

/// All registered types, in tag order.
pub fn entries() -> &'static [RegistryEntry] {
    REGISTRY
}

pub fn lookup(tag: TypeTag) -> Option<&'static RegistryEntry> {
    REGISTRY.iter().find(|e| e.tag == tag)
}

pub fn by_name(name: &str) -> Option<&'static RegistryEntry> {
    REGISTRY.iter().find(|e| e.name == name)
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
