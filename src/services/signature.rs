use {
    base64::{Engine as _, engine::general_purpose::STANDARD as BASE64},
    openssl::{hash::MessageDigest, pkey::PKey, sign::Verifier},
};

/// Authenticates a raw webhook body against the configured public key.
///
/// The provider signs the lowercase-hex SHA-256 digest of the body, not the
/// body itself, so that digest string is the message handed to the verifier.
/// The key material selects the scheme (RSA in the observed protocol); the
/// comparison happens inside the library primitive, never as a manual byte
/// equality. Fails closed on every malformed input.
pub fn verify(payload: &[u8], signature_b64: &str, public_key_pem: &str) -> bool {
    if payload.is_empty() || signature_b64.is_empty() || public_key_pem.trim().is_empty() {
        return false;
    }

    let digest = match openssl::hash::hash(MessageDigest::sha256(), payload) {
        Ok(d) => hex::encode(&*d),
        Err(_) => return false,
    };

    let signature = match BASE64.decode(signature_b64.trim()) {
        Ok(s) => s,
        Err(_) => return false,
    };

    let key = match PKey::public_key_from_pem(public_key_pem.as_bytes()) {
        Ok(k) => k,
        Err(_) => return false,
    };

    let Ok(mut verifier) = Verifier::new(MessageDigest::sha256(), &key) else {
        return false;
    };
    verifier.update(digest.as_bytes()).is_ok() && verifier.verify(&signature).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        openssl::{pkey::PKey, rsa::Rsa, sign::Signer},
    };

    struct Keys {
        private: PKey<openssl::pkey::Private>,
        public_pem: String,
    }

    fn keys() -> Keys {
        let rsa = Rsa::generate(2048).unwrap();
        let private = PKey::from_rsa(rsa).unwrap();
        let public_pem = String::from_utf8(private.public_key_to_pem().unwrap()).unwrap();
        Keys {
            private,
            public_pem,
        }
    }

    fn sign(keys: &Keys, payload: &[u8]) -> String {
        let digest = hex::encode(&*openssl::hash::hash(MessageDigest::sha256(), payload).unwrap());
        let mut signer = Signer::new(MessageDigest::sha256(), &keys.private).unwrap();
        signer.update(digest.as_bytes()).unwrap();
        BASE64.encode(signer.sign_to_vec().unwrap())
    }

    #[test]
    fn valid_signature_verifies() {
        let keys = keys();
        let payload = br#"{"externalId":"482/xyz"}"#;
        let sig = sign(&keys, payload);
        assert!(verify(payload, &sig, &keys.public_pem));
    }

    #[test]
    fn tampered_payload_fails() {
        let keys = keys();
        let payload = br#"{"externalId":"482/xyz"}"#;
        let sig = sign(&keys, payload);

        let mut tampered = payload.to_vec();
        tampered[10] ^= 1;
        assert!(!verify(&tampered, &sig, &keys.public_pem));
    }

    #[test]
    fn wrong_key_fails() {
        let signing = keys();
        let other = keys();
        let payload = b"payload";
        let sig = sign(&signing, payload);
        assert!(!verify(payload, &sig, &other.public_pem));
    }

    #[test]
    fn empty_inputs_fail_closed() {
        let keys = keys();
        let sig = sign(&keys, b"x");
        assert!(!verify(b"", &sig, &keys.public_pem));
        assert!(!verify(b"x", "", &keys.public_pem));
        assert!(!verify(b"x", &sig, ""));
    }

    #[test]
    fn invalid_base64_fails() {
        let keys = keys();
        assert!(!verify(b"payload", "%%%not-base64%%%", &keys.public_pem));
    }

    #[test]
    fn invalid_pem_fails() {
        let keys = keys();
        let sig = sign(&keys, b"payload");
        assert!(!verify(b"payload", &sig, "-----BEGIN PUBLIC KEY-----\ngarbage"));
    }
}
