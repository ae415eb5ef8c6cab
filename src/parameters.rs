//! Protocol parameter collection and normalization
//! ([RFC 5849 section 3.4.1.3][rfc]).
//!
//! [rfc]: https://tools.ietf.org/html/rfc5849#section-3.4.1.3

use crate::encode::percent_encode;
use crate::{
    SecretsProvider, SignError, SignResult, SigningRequest, HMAC_SHA1, OAUTH_CALLBACK_KEY,
    OAUTH_CONSUMER_KEY, OAUTH_KEY_PREFIX, OAUTH_NONCE_KEY, OAUTH_SIGNATURE_KEY,
    OAUTH_SIGNATURE_METHOD_KEY, OAUTH_TIMESTAMP_KEY, OAUTH_TOKEN_KEY, OAUTH_VERSION,
    OAUTH_VERSION_KEY,
};

/// Keys the collector generates itself, plus the signature. A request
/// carrying one of them would sign and emit it twice.
const RESERVED_KEYS: &[&str] = &[
    OAUTH_CALLBACK_KEY,
    OAUTH_CONSUMER_KEY,
    OAUTH_NONCE_KEY,
    OAUTH_SIGNATURE_KEY,
    OAUTH_SIGNATURE_METHOD_KEY,
    OAUTH_TIMESTAMP_KEY,
    OAUTH_TOKEN_KEY,
    OAUTH_VERSION_KEY,
];

/// Protocol and request parameters of a single signing operation.
///
/// Built fresh for every request since nonce and timestamp must not be
/// reused. Entries keep insertion order; duplicate keys stay separate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthParameterSet {
    entries: Vec<(String, String)>,
    realm: Option<String>,
}

impl OAuthParameterSet {
    /// Assemble the protocol parameters for `request` and merge in its
    /// query and form parameters unchanged.
    ///
    /// # Errors
    ///
    /// Fails with `SignError::ReservedParameter` if a query or form
    /// parameter uses a protocol key such as `oauth_nonce` or
    /// `oauth_signature`. Extension keys like `oauth_verifier` pass through;
    /// the callback is set with `SigningRequest::callback`.
    pub fn collect<S>(
        secrets: &S,
        request: &SigningRequest,
        nonce: String,
        timestamp: u64,
    ) -> SignResult<Self>
    where
        S: SecretsProvider + ?Sized,
    {
        let mut entries = vec![
            (
                OAUTH_CONSUMER_KEY.to_string(),
                secrets.consumer().key().to_string(),
            ),
            (OAUTH_NONCE_KEY.to_string(), nonce),
            (OAUTH_SIGNATURE_METHOD_KEY.to_string(), HMAC_SHA1.to_string()),
            (OAUTH_TIMESTAMP_KEY.to_string(), timestamp.to_string()),
        ];
        if let Some(token) = secrets.user_token() {
            entries.push((OAUTH_TOKEN_KEY.to_string(), token.token().to_string()));
        }
        entries.push((OAUTH_VERSION_KEY.to_string(), OAUTH_VERSION.to_string()));
        if let Some(callback) = request.get_callback() {
            entries.push((OAUTH_CALLBACK_KEY.to_string(), callback.to_string()));
        }

        for (key, value) in request.parameters_iter() {
            if RESERVED_KEYS.contains(&key) {
                return Err(SignError::ReservedParameter(key.to_string()));
            }
            entries.push((key.to_string(), value.to_string()));
        }

        Ok(OAuthParameterSet {
            entries,
            realm: request.get_realm().map(str::to_string),
        })
    }

    /// Build a set from raw entries, bypassing protocol parameter generation.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        OAuthParameterSet {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            realm: None,
        }
    }

    /// Produce the normalized parameter string.
    ///
    /// Keys and values are percent-encoded, sorted by encoded key then
    /// encoded value (byte-wise), joined as `key=value` pairs with `&`.
    pub fn normalize(&self) -> String {
        let mut encoded: Vec<(String, String)> = self
            .entries
            .iter()
            .map(|(k, v)| (percent_encode(k), percent_encode(v)))
            .collect();
        encoded.sort();
        encoded
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<String>>()
            .join("&")
    }

    /// Look up the first value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Entries whose key starts with `oauth_`, in insertion order.
    pub fn oauth_entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().filter(|(k, _)| k.starts_with(OAUTH_KEY_PREFIX))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn realm(&self) -> Option<&str> {
        self.realm.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
