//! Assistant configuration merge
//!
//! The primary configuration file (`~/.claude.json`) is merged field by field
//! instead of being overwritten:
//!
//! | Field          | Rule                                                        |
//! |----------------|-------------------------------------------------------------|
//! | `userID`       | always local (never taken from remote, even if absent)      |
//! | `oauthAccount` | always local (never taken from remote, even if absent)      |
//! | `projects`     | per project path, see [`merge_assistant_config`]            |
//! | anything else  | remote value replaces local value (last writer wins)        |
//!
//! Written output keeps the key order of the local file (see [`order_like`]).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Top-level keys that identify the local account
pub const PRESERVED_KEYS: [&str; 2] = ["userID", "oauthAccount"];

/// Typed view of the assistant configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(
        rename = "userID",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_id: Option<Value>,

    #[serde(
        rename = "oauthAccount",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub oauth_account: Option<Value>,

    /// Project-scoped settings keyed by project path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<BTreeMap<String, ProjectEntry>>,

    /// Every other top-level key
    #[serde(flatten)]
    pub shared: Map<String, Value>,
}

/// Settings of one project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    /// Tool/server registrations
    #[serde(rename = "mcpServers", default, skip_serializing_if = "Option::is_none")]
    pub mcp_servers: Option<Map<String, Value>>,

    #[serde(flatten)]
    pub settings: Map<String, Value>,
}

/// Keeps an explicit `null` distinct from an absent key.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl AssistantConfig {
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

/// Merge a remote configuration into the local one.
///
/// Starting from `local`:
/// - a project only present remotely is adopted wholesale;
/// - a project present on both sides gets the remote `mcpServers` entries
///   added, remote winning on name collisions; its other fields stay local;
/// - every shared top-level key from `remote` overwrites the local value;
/// - [`PRESERVED_KEYS`] are never read from `remote`.
pub fn merge_assistant_config(local: AssistantConfig, remote: AssistantConfig) -> AssistantConfig {
    let mut merged = local;

    if let Some(remote_projects) = remote.projects {
        let projects = merged.projects.get_or_insert_with(BTreeMap::new);
        for (path, remote_entry) in remote_projects {
            match projects.entry(path) {
                Entry::Vacant(slot) => {
                    slot.insert(remote_entry);
                }
                Entry::Occupied(mut slot) => {
                    if let Some(servers) = remote_entry.mcp_servers {
                        slot.get_mut()
                            .mcp_servers
                            .get_or_insert_with(Map::new)
                            .extend(servers);
                    }
                }
            }
        }
    }

    merged.shared.extend(remote.shared);
    merged
}

/// Reorder the object keys of `value` to follow `template`, at every depth.
///
/// Keys absent from `template` follow in their existing order.
pub fn order_like(value: Value, template: &Value) -> Value {
    let (map, reference) = match (value, template) {
        (Value::Object(map), Value::Object(reference)) => (map, reference),
        (value, _) => return value,
    };

    let mut rest: Vec<(String, Value)> = map.into_iter().collect();
    let mut ordered = Map::new();
    for (key, reference_child) in reference {
        if let Some(pos) = rest.iter().position(|(k, _)| k == key) {
            let (key, child) = rest.remove(pos);
            ordered.insert(key, order_like(child, reference_child));
        }
    }
    ordered.extend(rest);
    Value::Object(ordered)
}

/// Untyped entry point over parsed JSON values; keeps `local`'s key order.
pub fn merge_config_values(local: Value, remote: Value) -> Result<Value, serde_json::Error> {
    let typed_local = AssistantConfig::from_value(local.clone())?;
    let typed_remote = AssistantConfig::from_value(remote)?;
    let merged = serde_json::to_value(merge_assistant_config(typed_local, typed_remote))?;
    Ok(order_like(merged, &local))
}
