//! Properties of the message codec

use proptest::prelude::*;
use vnchat::backend::crypto::MessageCodec;

proptest! {
    #[test]
    fn test_decrypt_inverts_encrypt(key in any::<[u8; 32]>(), text in "\\PC{0,200}") {
        let codec = MessageCodec::new(key);
        let sealed = codec.encrypt(&text);
        prop_assert_eq!(codec.decrypt(&sealed.cipher_text, &sealed.iv).unwrap(), text);
    }

    #[test]
    fn test_ciphertext_is_padded_hex(text in "\\PC{0,200}") {
        let codec = MessageCodec::new([7u8; 32]);
        let sealed = codec.encrypt(&text);

        prop_assert_eq!(sealed.iv.len(), 32);
        prop_assert!(sealed.cipher_text.chars().all(|c| c.is_ascii_hexdigit()));
        // PKCS#7 always adds at least one byte
        let bytes = sealed.cipher_text.len() / 2;
        prop_assert_eq!(bytes % 16, 0);
        prop_assert!(bytes > text.len());
    }

    #[test]
    fn test_wrong_key_never_yields_plaintext(text in "[a-z]{1,64}") {
        let sealed = MessageCodec::new([1u8; 32]).encrypt(&text);
        let other = MessageCodec::new([2u8; 32]);
        prop_assert_ne!(other.decrypt(&sealed.cipher_text, &sealed.iv).ok(), Some(text));
    }
}
