//! Property tests for the assistant configuration merge.

use proptest::prelude::*;
use serde_json::{json, Map, Value};

use claude_sync::domain::services::merge_config_values;

fn key() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9]{0,8}"
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        "[ -~]{0,12}".prop_map(Value::from),
    ]
}

fn servers() -> impl Strategy<Value = Map<String, Value>> {
    proptest::collection::btree_map(key(), scalar(), 0..4)
        .prop_map(|m| m.into_iter().collect())
}

fn projects() -> impl Strategy<Value = Map<String, Value>> {
    proptest::collection::btree_map("/[a-z]{1,6}", servers(), 0..4).prop_map(|m| {
        m.into_iter()
            .map(|(path, servers)| (path, json!({ "mcpServers": servers })))
            .collect()
    })
}

fn shared_keys() -> impl Strategy<Value = Map<String, Value>> {
    proptest::collection::btree_map(key(), scalar(), 0..4).prop_map(|m| {
        m.into_iter()
            .filter(|(k, _)| !matches!(k.as_str(), "userID" | "oauthAccount" | "projects"))
            .collect()
    })
}

fn config(with_identity: bool) -> impl Strategy<Value = Value> {
    (shared_keys(), projects(), "[a-f0-9]{8}").prop_map(move |(shared, projects, user)| {
        let mut root = shared;
        root.insert("projects".to_string(), Value::Object(projects));
        if with_identity {
            root.insert("userID".to_string(), Value::from(user.clone()));
            root.insert("oauthAccount".to_string(), json!({ "id": user }));
        }
        Value::Object(root)
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: identity keys always come from the local side, even when
    /// the local side has none.
    #[test]
    fn property_identity_is_always_local(
        local in config(true),
        remote in config(true),
        local_has_identity in any::<bool>(),
    ) {
        let mut local = local;
        if !local_has_identity {
            let root = local.as_object_mut().unwrap();
            root.remove("userID");
            root.remove("oauthAccount");
        }

        let merged = merge_config_values(local.clone(), remote).unwrap();

        prop_assert_eq!(merged.get("userID"), local.get("userID"));
        prop_assert_eq!(merged.get("oauthAccount"), local.get("oauthAccount"));
    }

    /// PROPERTY: no server registered on either side is lost; remote wins
    /// collisions.
    #[test]
    fn property_servers_are_unioned(local in config(false), remote in config(false)) {
        let merged = merge_config_values(local.clone(), remote.clone()).unwrap();

        for side in [&local, &remote] {
            for (path, entry) in side["projects"].as_object().unwrap() {
                for name in entry["mcpServers"].as_object().unwrap().keys() {
                    prop_assert!(
                        merged["projects"][path]["mcpServers"].get(name).is_some(),
                        "{} lost from {}", name, path
                    );
                }
            }
        }
        for (path, entry) in remote["projects"].as_object().unwrap() {
            for (name, value) in entry["mcpServers"].as_object().unwrap() {
                prop_assert_eq!(&merged["projects"][path]["mcpServers"][name], value);
            }
        }
    }

    /// PROPERTY: merging the same remote twice changes nothing.
    #[test]
    fn property_merge_is_idempotent(local in config(true), remote in config(true)) {
        let once = merge_config_values(local, remote.clone()).unwrap();
        let twice = merge_config_values(once.clone(), remote).unwrap();

        prop_assert_eq!(once, twice);
    }
}
