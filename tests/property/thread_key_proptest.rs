//! Properties of thread key derivation

use proptest::prelude::*;
use vnchat::shared::thread_key::{ThreadKey, SEPARATOR};

fn identifier() -> impl Strategy<Value = String> {
    "[0-9]{1,11}"
}

proptest! {
    #[test]
    fn test_derive_is_commutative(a in identifier(), b in identifier()) {
        prop_assert_eq!(ThreadKey::derive(&a, &b), ThreadKey::derive(&b, &a));
    }

    #[test]
    fn test_participants_are_sorted_inputs(a in identifier(), b in identifier()) {
        prop_assume!(a != b);
        let key = ThreadKey::derive(&a, &b);
        let (low, high) = key.participants();

        prop_assert!(low < high);
        prop_assert!(key.includes(&a));
        prop_assert!(key.includes(&b));
        prop_assert_eq!(key.as_str().matches(SEPARATOR).count(), 1);
    }

    #[test]
    fn test_parse_accepts_exactly_derived_keys(a in identifier(), b in identifier()) {
        prop_assume!(a != b);
        let key = ThreadKey::derive(&a, &b);

        prop_assert_eq!(ThreadKey::parse(key.as_str()), Some(key.clone()));

        let (low, high) = key.participants();
        let reversed = format!("{high}{SEPARATOR}{low}");
        prop_assert_eq!(ThreadKey::parse(&reversed), None);
    }

    #[test]
    fn test_distinct_pairs_have_distinct_keys(
        a in identifier(),
        b in identifier(),
        c in identifier(),
    ) {
        prop_assume!(b != c);
        prop_assert_ne!(ThreadKey::derive(&a, &b), ThreadKey::derive(&a, &c));
    }
}
