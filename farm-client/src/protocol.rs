//! Wire types for the farm-side resource API.
//!
//! The remote protocol is treated as opaque pass-through: requests and
//! responses are tagged with a resource kind and an id where applicable, and
//! everything else flows through untouched. Listing responses arrive under a
//! `list` envelope; create and update echo the record back.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// The five resource collections a farm server exposes.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Info,
    Log,
    Asset,
    Term,
    Area,
}

impl ResourceKind {
    /// Collection endpoint path on the farm server.
    pub fn collection_path(&self) -> &'static str {
        match self {
            ResourceKind::Info => "farm.json",
            ResourceKind::Log => "log.json",
            ResourceKind::Asset => "farm_asset.json",
            ResourceKind::Term => "taxonomy_term.json",
            ResourceKind::Area => "area.json",
        }
    }

    /// Endpoint path for one record of this kind.
    pub fn record_path(&self, id: i64) -> String {
        let stem = match self {
            ResourceKind::Info => "farm",
            ResourceKind::Log => "log",
            ResourceKind::Asset => "farm_asset",
            ResourceKind::Term => "taxonomy_term",
            ResourceKind::Area => "area",
        };
        format!("{stem}/{id}.json")
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResourceKind::Info => "info",
            ResourceKind::Log => "log",
            ResourceKind::Asset => "asset",
            ResourceKind::Term => "term",
            ResourceKind::Area => "area",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(ResourceKind::Info),
            "log" => Ok(ResourceKind::Log),
            "asset" => Ok(ResourceKind::Asset),
            "term" => Ok(ResourceKind::Term),
            "area" => Ok(ResourceKind::Area),
            other => Err(format!(
                "unknown resource kind '{other}' (expected info, log, asset, term or area)"
            )),
        }
    }
}

/// A record sent to a farm server.
///
/// Only the fields the aggregation core itself inspects are typed; all other
/// fields pass through as-is, in their original order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RecordPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(flatten)]
    pub extra: IndexMap<String, JsonValue>,
}

impl RecordPayload {
    pub fn from_value(value: JsonValue) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

/// Listing envelope returned by farm servers.
#[derive(Debug, Deserialize)]
pub struct CollectionResponse {
    #[serde(default)]
    pub list: Vec<JsonValue>,
}

/// Acknowledgement returned by a delete.
///
/// Farms may answer with an empty body; `body` is `None` in that case.
#[derive(Clone, Debug, PartialEq)]
pub struct DeleteAck {
    pub id: i64,
    pub body: Option<JsonValue>,
}
