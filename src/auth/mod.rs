use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString},
    Algorithm, Argon2, Params, Version,
};
use axum::http::{header, HeaderMap};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),

    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),

    #[error("Hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Argon2id password hashing. Hashes are self-describing PHC strings, so
/// verification works for hashes made with other cost settings.
#[derive(Clone, Debug)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    pub fn new(memory_kib: u32, iterations: u32) -> Result<Self, AuthError> {
        let params = Params::new(memory_kib, iterations, Params::DEFAULT_P_COST, None)
            .map_err(|e| AuthError::InvalidParams(e.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    pub fn hash_blocking(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Hash(e.to_string()))
    }

    pub fn verify_blocking(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|e| AuthError::MalformedHash(e.to_string()))?;
        Ok(self.argon2().verify_password(password.as_bytes(), &parsed).is_ok())
    }

    /// Hash on the blocking pool; argon2 is deliberately slow.
    pub async fn hash(&self, password: &str) -> Result<String, AuthError> {
        let hasher = self.clone();
        let password = password.to_string();
        tokio::task::spawn_blocking(move || hasher.hash_blocking(&password)).await?
    }

    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let hasher = self.clone();
        let password = password.to_string();
        let hash = hash.to_string();
        tokio::task::spawn_blocking(move || hasher.verify_blocking(&password, &hash)).await?
    }
}

/// Email and password from an `Authorization: Basic` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub email: String,
    pub password: String,
}

impl BasicCredentials {
    /// `None` when the header is missing or is not well-formed Basic auth
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
        let (scheme, encoded) = value.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return None;
        }

        let decoded = STANDARD.decode(encoded.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (email, password) = decoded.split_once(':')?;

        Some(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }

    /// Header value for these credentials, used by clients and tests
    pub fn to_header_value(&self) -> String {
        format!("Basic {}", STANDARD.encode(format!("{}:{}", self.email, self.password)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use crate::testing::test_hasher;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn parses_basic_credentials() {
        let creds = BasicCredentials {
            email: "ada@example.com".into(),
            password: "p:ss word".into(),
        };
        let parsed = BasicCredentials::from_headers(&headers(&creds.to_header_value())).unwrap();
        assert_eq!(parsed, creds);
    }

    #[test]
    fn scheme_is_case_insensitive() {
        let value = format!("basic {}", STANDARD.encode("a@b.co:pw"));
        let parsed = BasicCredentials::from_headers(&headers(&value)).unwrap();
        assert_eq!(parsed.email, "a@b.co");
    }

    #[test]
    fn rejects_other_schemes_and_garbage() {
        assert!(BasicCredentials::from_headers(&HeaderMap::new()).is_none());
        assert!(BasicCredentials::from_headers(&headers("Bearer abc.def")).is_none());
        assert!(BasicCredentials::from_headers(&headers("Basic !!!")).is_none());
        let no_colon = format!("Basic {}", STANDARD.encode("justanemail"));
        assert!(BasicCredentials::from_headers(&headers(&no_colon)).is_none());
    }

    #[tokio::test]
    async fn hashes_and_verifies() {
        let hasher = test_hasher();
        let hash = hasher.hash("correct horse").await.unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("correct horse", &hash).await.unwrap());
        assert!(!hasher.verify("battery staple", &hash).await.unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        let hasher = test_hasher();
        assert!(matches!(
            hasher.verify_blocking("pw", "not-a-phc-string"),
            Err(AuthError::MalformedHash(_))
        ));
    }

    #[test]
    fn rejects_impossible_params() {
        assert!(matches!(PasswordHasher::new(1, 1), Err(AuthError::InvalidParams(_))));
    }
}
