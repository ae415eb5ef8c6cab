use std::borrow::Cow;

use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::encode::{percent_encode, percent_encode_to};
use crate::headers::authorize;
use crate::provider::{Clock, NonceSource, RandomNonce, SystemClock};
use crate::{SecretsProvider, SignResult, SigningRequest};

type HmacSha1 = Hmac<Sha1>;

/// `encode(consumer_secret)&encode(token_secret)`, with an empty token
/// secret for two-legged requests.
pub fn signing_key(consumer_secret: &str, token_secret: Option<&str>) -> String {
    let mut key = percent_encode(consumer_secret);
    key.push('&');
    if let Some(token_secret) = token_secret {
        percent_encode_to(token_secret, &mut key);
    }
    key
}

/// HMAC-SHA1 over `base_string`, base64 encoded with the standard alphabet.
///
/// Never fails: an empty consumer secret still yields a (useless) signature.
/// Callers that want a diagnostic validate the credential beforehand.
pub fn sign(base_string: &str, consumer_secret: &str, token_secret: Option<&str>) -> String {
    let key = signing_key(consumer_secret, token_secret);
    let mut mac =
        HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
    mac.update(base_string.as_bytes());
    BASE64_STANDARD.encode(mac.finalize().into_bytes())
}

/// Signs requests built through the reqwest adapter.
#[derive(Debug)]
pub struct Signer<'a, TSecretsProvider>
where
    TSecretsProvider: SecretsProvider,
{
    secrets: &'a TSecretsProvider,
    parameters: OAuthParameters<'a>,
}

impl<TSecretsProvider> Clone for Signer<'_, TSecretsProvider>
where
    TSecretsProvider: SecretsProvider,
{
    fn clone(&self) -> Self {
        Signer {
            secrets: self.secrets,
            parameters: self.parameters.clone(),
        }
    }
}

impl<'a, TSecretsProvider> Signer<'a, TSecretsProvider>
where
    TSecretsProvider: SecretsProvider,
{
    pub fn new(secrets: &'a TSecretsProvider, parameters: OAuthParameters<'a>) -> Self {
        Signer {
            secrets,
            parameters,
        }
    }

    /// Produce the `Authorization` header value for `request`.
    ///
    /// Callback and realm configured on the parameters apply unless the
    /// request sets its own.
    pub fn generate_signature(self, request: SigningRequest) -> SignResult<String> {
        let mut request = request;
        if request.get_callback().is_none() {
            if let Some(callback) = self.parameters.callback {
                request = request.callback(callback);
            }
        }
        if request.get_realm().is_none() {
            if let Some(realm) = self.parameters.realm {
                request = request.realm(realm);
            }
        }

        let nonce = match self.parameters.nonce {
            Some(nonce) => nonce.into_owned(),
            None => RandomNonce.nonce(),
        };
        let timestamp = self
            .parameters
            .timestamp
            .unwrap_or_else(|| SystemClock.timestamp());

        authorize(self.secrets, &request, nonce, timestamp)
    }
}

/// Per-request overrides of the generated OAuth parameters.
#[derive(Debug, Clone, Default)]
pub struct OAuthParameters<'a> {
    callback: Option<Cow<'a, str>>,
    nonce: Option<Cow<'a, str>>,
    realm: Option<Cow<'a, str>>,
    timestamp: Option<u64>,
}

impl<'a> OAuthParameters<'a> {
    pub fn new() -> Self {
        Default::default()
    }

    /// set the oauth_callback value
    pub fn callback<T>(self, callback: T) -> Self
    where
        T: Into<Cow<'a, str>>,
    {
        OAuthParameters {
            callback: Some(callback.into()),
            ..self
        }
    }

    /// set the oauth_nonce value instead of a random one
    pub fn nonce<T>(self, nonce: T) -> Self
    where
        T: Into<Cow<'a, str>>,
    {
        OAuthParameters {
            nonce: Some(nonce.into()),
            ..self
        }
    }

    /// set the realm value
    pub fn realm<T>(self, realm: T) -> Self
    where
        T: Into<Cow<'a, str>>,
    {
        OAuthParameters {
            realm: Some(realm.into()),
            ..self
        }
    }

    /// set the oauth_timestamp value instead of the current time
    pub fn timestamp<T>(self, timestamp: T) -> Self
    where
        T: Into<u64>,
    {
        OAuthParameters {
            timestamp: Some(timestamp.into()),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use http::Method;

    use super::*;
    use crate::Secrets;

    #[test]
    fn signing_key_with_token() {
        assert_eq!(signing_key("cs", Some("ts")), "cs&ts");
    }

    #[test]
    fn signing_key_without_token() {
        assert_eq!(signing_key("cs", None), "cs&");
        assert_eq!(signing_key("cs", Some("")), "cs&");
    }

    #[test]
    fn signing_key_encodes_each_part() {
        assert_eq!(signing_key("c&s", Some("t s")), "c%26s&t%20s");
    }

    #[test]
    fn sign_known_vector() {
        // https://developer.twitter.com/en/docs/authentication/oauth-1-0a/creating-a-signature
        let base = "POST&https%3A%2F%2Fapi.twitter.com%2F1.1%2Fstatuses%2Fupdate.json&include_entities%3Dtrue%26oauth_consumer_key%3Dxvz1evFS4wEEPTGEFPHBog%26oauth_nonce%3DkYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg%26oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1318622958%26oauth_token%3D370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb%26oauth_version%3D1.0%26status%3DHello%2520Ladies%2520%252B%2520Gentlemen%252C%2520a%2520signed%2520OAuth%2520request%2521";
        let signature = sign(
            base,
            "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
            Some("LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE"),
        );
        assert_eq!(signature, "hCtSmYh+iHYCEqBWrE7C7hYmtUk=");
    }

    #[test]
    fn sign_empty_secret_still_signs() {
        let signature = sign("GET&http%3A%2F%2Fexample.com%2F&", "", None);
        // 20 byte digest, padded base64
        assert_eq!(signature.len(), 28);
        assert!(signature.ends_with('='));
    }

    #[test]
    fn sign_is_deterministic() {
        let a = sign("base", "cs", Some("ts"));
        let b = sign("base", "cs", Some("ts"));
        assert_eq!(a, b);
        assert_ne!(a, sign("base", "cs", None));
    }

    #[test]
    fn signer_applies_overrides() {
        let secrets = Secrets::new("dpf43f3p2l4k3l03", "kd94hf93k423kf44");
        let params = OAuthParameters::new()
            .nonce("wIjqoS")
            .timestamp(137_131_200u64)
            .callback("http://printer.example.com/ready")
            .realm("photos");
        let request =
            SigningRequest::new(Method::POST, "https://photos.example.net/initiate").unwrap();

        let header = Signer::new(&secrets, params)
            .generate_signature(request)
            .unwrap();
        assert!(header.starts_with(
            "OAuth realm=\"photos\", \
             oauth_callback=\"http%3A%2F%2Fprinter.example.com%2Fready\", "
        ));
        assert!(header.contains("oauth_nonce=\"wIjqoS\""));
        assert!(header.contains("oauth_timestamp=\"137131200\""));
    }

    #[test]
    fn signer_request_values_win() {
        let secrets = Secrets::new("key", "secret");
        let params = OAuthParameters::new().callback("oob").realm("outer");
        let request = SigningRequest::new(Method::POST, "https://example.com/request_token")
            .unwrap()
            .callback("https://client.example.com/cb")
            .realm("inner");

        let header = Signer::new(&secrets, params)
            .generate_signature(request)
            .unwrap();
        assert!(header.starts_with("OAuth realm=\"inner\", "));
        assert!(header.contains("oauth_callback=\"https%3A%2F%2Fclient.example.com%2Fcb\""));
        assert!(!header.contains("oob"));
    }
}
