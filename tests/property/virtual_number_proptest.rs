//! Properties of virtual number generation

use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};
use vnchat::backend::auth::virtual_number::{generate_with, is_virtual_number, VIRTUAL_NUMBER_LEN};

proptest! {
    #[test]
    fn test_generated_numbers_are_well_formed(seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let number = generate_with(&mut rng);

        prop_assert_eq!(number.len(), VIRTUAL_NUMBER_LEN);
        prop_assert!(number.bytes().all(|b| b.is_ascii_digit()));
        prop_assert!(!number.starts_with('0'));
        prop_assert!(is_virtual_number(&number));
    }

    #[test]
    fn test_non_digits_are_rejected(raw in "[0-9]{0,10}[a-z_ ][0-9]{0,10}") {
        prop_assert!(!is_virtual_number(&raw));
    }
}
