//! Property tests for machine identifiers.

use proptest::prelude::*;

use claude_sync::domain::value_objects::MachineId;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: derived ids are eight lowercase hex digits and parse back.
    #[test]
    fn property_derived_id_is_valid(host in "(?s).{0,64}", user in "(?s).{0,32}") {
        let id = MachineId::derive(&host, &user);

        prop_assert_eq!(id.as_str().len(), 8);
        prop_assert!(id.as_str().chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        prop_assert_eq!(MachineId::parse(id.as_str()).unwrap(), id);
    }

    /// PROPERTY: the id depends only on hostname and user.
    #[test]
    fn property_derivation_is_stable(host in "[a-z0-9.-]{1,32}", user in "[a-z]{1,16}") {
        prop_assert_eq!(MachineId::derive(&host, &user), MachineId::derive(&host, &user));
    }

    /// PROPERTY: parsing arbitrary input never panics.
    #[test]
    fn property_parse_never_panics(raw in "(?s).{0,32}") {
        let _ = MachineId::parse(&raw);
    }
}
