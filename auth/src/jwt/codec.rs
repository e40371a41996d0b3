use std::str::FromStr;
use std::sync::Arc;

use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;
use crate::clock::Clock;
use crate::clock::SystemClock;

/// Signs claims into a compact token string and verifies them back.
pub trait TokenCodec: Send + Sync + 'static {
    /// Serialize and sign claims.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    fn encode(&self, claims: &Claims) -> Result<String, JwtError>;

    /// Verify signature, algorithm and expiry, then return the claims.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature invalid, algorithm mismatch, or malformed token
    /// * `DecodingFailed` - Payload does not have the claims shape
    /// * `TokenExpired` - Current time is at or past `exp`
    /// * `MissingClaim` - Token carries no `exp`
    fn decode(&self, token: &str) -> Result<Claims, JwtError>;
}

/// HMAC-signed JWT codec.
///
/// Tokens are standard compact JWS strings, so they can be inspected with any
/// off-the-shelf JWT decoder.
pub struct JwtCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    clock: Arc<dyn Clock>,
}

impl JwtCodec {
    /// Create a codec bound to a shared secret and algorithm.
    ///
    /// # Arguments
    /// * `secret` - Shared signing secret
    /// * `algorithm` - Algorithm identifier, one of `HS256`, `HS384`, `HS512`
    /// * `clock` - Time source used for expiry checks
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - Identifier unknown or not an HMAC algorithm
    pub fn new(secret: &[u8], algorithm: &str, clock: Arc<dyn Clock>) -> Result<Self, JwtError> {
        let algorithm = parse_algorithm(algorithm)?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            clock,
        })
    }

    /// HS256 codec on the system clock.
    pub fn hs256(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked against the injected clock instead
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();
        validation
    }
}

impl TokenCodec for JwtCodec {
    fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation())
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                ErrorKind::Json(_) => JwtError::DecodingFailed(e.to_string()),
                _ => JwtError::InvalidToken(e.to_string()),
            })?;

        let claims = token_data.claims;
        if claims.exp.is_none() {
            return Err(JwtError::MissingClaim("exp".to_string()));
        }
        if claims.is_expired(self.clock.now().timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }
}

fn parse_algorithm(identifier: &str) -> Result<Algorithm, JwtError> {
    match Algorithm::from_str(identifier) {
        Ok(algorithm @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => Ok(algorithm),
        _ => Err(JwtError::UnsupportedAlgorithm(identifier.to_string())),
    }
}
