//! RS256/384/512 (RSASSA-PKCS1-v1_5) and PS256/384/512 (RSASSA-PSS)
//!
//! Both variants hash the signing input first, then hand the digest to the
//! `rsa` crate. PSS uses MGF1 with the same digest and a salt as long as the
//! digest.

use crate::algorithm::{Algorithm, AlgorithmFamily, TokenSigner, TokenVerifier};
use crate::error::{Error, Result};
use crate::utils::HashAlgorithm;

use rand::rngs::OsRng;
use rsa::{Pkcs1v15Sign, Pss, RsaPrivateKey, RsaPublicKey};
use sha2::{Sha256, Sha384, Sha512};
use tracing::debug;

fn check_algorithm(algorithm: Algorithm) -> Result<HashAlgorithm> {
    match algorithm.family() {
        AlgorithmFamily::RsaPkcs1 | AlgorithmFamily::RsaPss => {
            HashAlgorithm::for_algorithm(algorithm)
        }
        _ => Err(Error::AlgorithmMismatch {
            algorithm: algorithm.to_string(),
            engine: "RSA",
        }),
    }
}

fn pkcs1v15(hash: HashAlgorithm) -> Pkcs1v15Sign {
    match hash {
        HashAlgorithm::Sha256 => Pkcs1v15Sign::new::<Sha256>(),
        HashAlgorithm::Sha384 => Pkcs1v15Sign::new::<Sha384>(),
        HashAlgorithm::Sha512 => Pkcs1v15Sign::new::<Sha512>(),
    }
}

fn pss(hash: HashAlgorithm) -> Pss {
    match hash {
        HashAlgorithm::Sha256 => Pss::new::<Sha256>(),
        HashAlgorithm::Sha384 => Pss::new::<Sha384>(),
        HashAlgorithm::Sha512 => Pss::new::<Sha512>(),
    }
}

/// RSA signer over a private key
pub struct RsaSigner {
    algorithm: Algorithm,
    hash: HashAlgorithm,
    key: RsaPrivateKey,
}

impl RsaSigner {
    pub fn new(algorithm: Algorithm, key: RsaPrivateKey) -> Result<Self> {
        let hash = check_algorithm(algorithm)?;
        debug!(%algorithm, "constructed RSA signer");
        Ok(Self {
            algorithm,
            hash,
            key,
        })
    }

    /// Verifier over the matching public key
    pub fn verifier(&self) -> RsaVerifier {
        RsaVerifier {
            algorithm: self.algorithm,
            hash: self.hash,
            key: self.key.to_public_key(),
        }
    }
}

impl TokenSigner for RsaSigner {
    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn sign(&self, signing_input: &[u8]) -> Result<Vec<u8>> {
        let digest = self.hash.digest(signing_input);
        let signed = match self.algorithm.family() {
            AlgorithmFamily::RsaPss => {
                self.key
                    .sign_with_rng(&mut OsRng, pss(self.hash), &digest)
            }
            _ => self
                .key
                .sign_with_rng(&mut OsRng, pkcs1v15(self.hash), &digest),
        };
        signed.map_err(|e| Error::CryptoFailure(format!("{} signing: {e}", self.algorithm)))
    }
}

/// RSA verifier over a public key
pub struct RsaVerifier {
    algorithm: Algorithm,
    hash: HashAlgorithm,
    key: RsaPublicKey,
}

impl RsaVerifier {
    pub fn new(algorithm: Algorithm, key: RsaPublicKey) -> Result<Self> {
        let hash = check_algorithm(algorithm)?;
        debug!(%algorithm, "constructed RSA verifier");
        Ok(Self {
            algorithm,
            hash,
            key,
        })
    }
}

impl TokenVerifier for RsaVerifier {
    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8]) -> Result<bool> {
        let digest = self.hash.digest(signing_input);
        let outcome = match self.algorithm.family() {
            AlgorithmFamily::RsaPss => self.key.verify(pss(self.hash), &digest, signature),
            _ => self.key.verify(pkcs1v15(self.hash), &digest, signature),
        };

        match outcome {
            Ok(()) => Ok(true),
            Err(rsa::Error::Verification) => Ok(false),
            Err(e) => Err(Error::CryptoFailure(format!(
                "{} verification: {e}",
                self.algorithm
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::base64url;
    use rsa::BigUint;

    // RFC 7515 Appendix A.2
    const N: &str = "ofgWCuLjybRlzo0tZWJjNiuSfb4p4fAkd_wWJcyQoTbji9k0l8W26mPddxHmfHQp-Vaw-4qPCJrcS2mJPMEzP1Pt0Bm4d4QlL-yRT-SFd2lZS-pCgNMsD1W_YpRPEwOWvG6b32690r2jZ47soMZo9wGzjb_7OMg0LOL-bSf63kpaSHSXndS5z5rexMdbBYUsLA9e-KXBdQOS-UTo7WTBEMa2R2CapHg665xsmtdVMTBQY4uDZlxvb3qCo5ZwKh9kG4LT6_I5IhlJH7aGhyxXFvUK-DWNmoudF8NAco9_h9iaGNj8q2ethFkMLs91kzk2PAcDTW9gb54h4FRWyuXpoQ";
    const D: &str = "Eq5xpGnNCivDflJsRQBXHx1hdR1k6Ulwe2JZD50LpXyWPEAeP88vLNO97IjlA7_GQ5sLKMgvfTeXZx9SE-7YwVol2NXOoAJe46sui395IW_GO-pWJ1O0BkTGoVEn2bKVRUCgu-GjBVaYLU6f3l9kJfFNS3E0QbVdxzubSu3Mkqzjkn439X0M_V51gfpRLI9JYanrC4D4qAdGcopV_0ZHHzQlBjudU2QvXt4ehNYTCBr6XCLQUShb1juUO1ZdiYoFaFQT5Tw8bGUl_x_jTj3ccPDVZFD9pIuhLhBOneufuBiB4cS98l2SR_RQyGWSeWjnczT0QU91p1DhOVRuOopznQ";
    const P: &str = "4BzEEOtIpmVdVEZNCqS7baC4crd0pqnRH_5IB3jw3bcxGn6QLvnEtfdUdiYrqBdss1l58BQ3KhooKeQTa9AB0Hw_Py5PJdTJNPY8cQn7ouZ2KKDcmnPGBY5t7yLc1QlQ5xHdwW1VhvKn-nXqhJTBgIPgtldC-KDV5z-y2XDwGUc";
    const Q: &str = "uQPEfgmVtjL0Uyyx88GZFF1fOunH3-7cepKmtH4pxhtCoHqpWmT8YAmZxaewHgHAjLYsp1ZSe7zFYHj7C6ul7TjeLQeZD_YwD66t62wDmpe_HlB-TnBA-njbglfIsRLtXlnDzQkv5dTltRJ11BKBBypeeF6689rjcJIDEz9RWdc";

    const INPUT: &str = "eyJhbGciOiJSUzI1NiJ9.eyJpc3MiOiJqb2UiLA0KICJleHAiOjEzMDA4MTkzODAsDQogImh0dHA6Ly9leGFtcGxlLmNvbS9pc19yb290Ijp0cnVlfQ";
    const RS256_SIG: &str = "cC4hiUPoj9Eetdgtv3hF80EGrhuB__dzERat0XF9g2VtQgr9PJbu3XOiZj5RZmh7AAuHIm4Bh-0Qc_lF5YKt_O8W2Fp5jujGbds9uJdbF9CUAr7t1dnZcAcQjbKBYNX4BAynRFdiuB--f_nZLgrnbyTyWzO75vRK5h6xBArLIARNPvkSjtQBMHlb1L07Qe7K0GarZRmB_eSN9383LcOLn6_dO--xi12jzDwusC-eOkHWEsqtFZESc6BfI7noOPqvhJ1phCnvWh6IeYI2w9QOYEUipUTI8np6LbgGY9Fs98rqVt5AXLIhWkWywlVmtVrBp0igcN_IoypGlUPQGe77Rw";

    // Same key and signing input, other digests
    const RS384_SIG: &str = "QMlqnIk4Jg6V4BsZGDb3PTKORZPw-eoUq-FsnjYifl08H95otuD2EHkUuDdfTGjEcJ6tgIehmwfchztWsgwuobaeMbRS44doIjGi4FaIHX4XlKcIlUxSnJPQ2O8bWZF6vkvQaPBXjzwLDGKUTkJwwP052sCL-ivRWakkNETy66m2ODQjg4mN6EJI2o6_hRsklNEHPHjrTdOWnugAcEJ44e_fZ3cCFlP9009ITkx9ZgiVR8ViI-KBgCY90JDhxneWKNzWidZaTg6TcEUQo73V1H4WSbzUVa7aLTFVc5OTSX-kO6GNrlCSKHx-M_yPDowT9ovfNX_UXJzxxMWWwGaYCA";
    const RS512_SIG: &str = "jVVNFquIjYtsXWDHTCFaq0UoNhuL2qq0KNQ3hx6V-dfxtc2obZ81vcL-mpmCxsnW5VzZtAuEM__uUpFTtoP65kGyVR8ebwUMhr_ra0JzpO4fS1SrHTu-f-GqPoN9LYXM_7pmT2dYbGw2-AqbLTutv-lBG04TQHbgJ3ISx14bjdACIRh8DGtQwvHQBpV_S-KM_yweOiqt5ff5GckMaaGqSuDTlVupVE46NfXiE3tjf3PnnztWuOJ-lNNtQ0ojc-jGX7DpreVDWFkh4WpnC_dPVlhTpq8F-mKSsOEBc4B7-J_bnR80VNx2sCEq3GH49TRs2js-J0VIef8hX7H-3aQt4g";

    fn uint(b64: &str) -> BigUint {
        BigUint::from_bytes_be(&base64url::decode(b64).unwrap())
    }

    fn rfc7515_key() -> RsaPrivateKey {
        RsaPrivateKey::from_components(
            uint(N),
            BigUint::from_bytes_be(&[1, 0, 1]),
            uint(D),
            vec![uint(P), uint(Q)],
        )
        .unwrap()
    }

    #[test]
    fn test_rs256_known_answer() {
        let signer = RsaSigner::new(Algorithm::RS256, rfc7515_key()).unwrap();
        let sig = signer.sign(INPUT.as_bytes()).unwrap();
        assert_eq!(base64url::encode(&sig), RS256_SIG);
        assert!(signer.verifier().verify(INPUT.as_bytes(), &sig).unwrap());
    }

    #[test]
    fn test_rs384_rs512_known_answers() {
        for (alg, expected) in [(Algorithm::RS384, RS384_SIG), (Algorithm::RS512, RS512_SIG)] {
            let signer = RsaSigner::new(alg, rfc7515_key()).unwrap();
            let sig = signer.sign(INPUT.as_bytes()).unwrap();
            assert_eq!(base64url::encode(&sig), expected, "{alg}");

            let verifier = RsaVerifier::new(alg, rfc7515_key().to_public_key()).unwrap();
            assert!(verifier.verify(INPUT.as_bytes(), &sig).unwrap());
        }
    }

    #[test]
    fn test_pss_round_trip_is_randomized() {
        for alg in [Algorithm::PS256, Algorithm::PS384, Algorithm::PS512] {
            let signer = RsaSigner::new(alg, rfc7515_key()).unwrap();
            let a = signer.sign(INPUT.as_bytes()).unwrap();
            let b = signer.sign(INPUT.as_bytes()).unwrap();
            assert_ne!(a, b, "{alg} salt should be random");
            assert_eq!(a.len(), 256);

            let verifier = signer.verifier();
            assert!(verifier.verify(INPUT.as_bytes(), &a).unwrap());
            assert!(verifier.verify(INPUT.as_bytes(), &b).unwrap());
        }
    }

    #[test]
    fn test_tampered_signature_is_false() {
        let signer = RsaSigner::new(Algorithm::RS384, rfc7515_key()).unwrap();
        let mut sig = signer.sign(INPUT.as_bytes()).unwrap();
        sig[10] ^= 0x80;
        assert!(!signer.verifier().verify(INPUT.as_bytes(), &sig).unwrap());
    }

    #[test]
    fn test_cross_scheme_is_false() {
        let pkcs1 = RsaSigner::new(Algorithm::RS256, rfc7515_key()).unwrap();
        let pss = RsaSigner::new(Algorithm::PS256, rfc7515_key()).unwrap();
        let sig = pkcs1.sign(INPUT.as_bytes()).unwrap();
        assert!(!pss.verifier().verify(INPUT.as_bytes(), &sig).unwrap());
    }

    #[test]
    fn test_wrong_length_is_false() {
        let verifier = RsaSigner::new(Algorithm::RS256, rfc7515_key())
            .unwrap()
            .verifier();
        assert!(!verifier.verify(INPUT.as_bytes(), &[0u8; 16]).unwrap());
    }

    #[test]
    fn test_non_rsa_algorithm_rejected() {
        for alg in [Algorithm::HS256, Algorithm::ES256, Algorithm::EdDSA, Algorithm::None] {
            assert!(matches!(
                RsaSigner::new(alg, rfc7515_key()),
                Err(Error::AlgorithmMismatch { .. })
            ));
            assert!(matches!(
                RsaVerifier::new(alg, rfc7515_key().to_public_key()),
                Err(Error::AlgorithmMismatch { .. })
            ));
        }
    }
}
