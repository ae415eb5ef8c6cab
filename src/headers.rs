//! `Authorization` and OAuth Echo header assembly.

use http::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use tracing::{debug, trace};

use crate::base_string::{base_url, build_base_string};
use crate::encode::percent_encode_to;
use crate::parameters::OAuthParameterSet;
use crate::provider::{Clock, NonceSource, RandomNonce, SystemClock};
use crate::signer::sign;
use crate::{
    SecretsProvider, SignError, SignResult, SigningRequest, TokenSecretsProvider, UserToken,
    OAUTH_SIGNATURE_KEY, REALM_KEY,
};

/// Name of the Echo header carrying the delegated `Authorization` value.
pub const X_VERIFY_CREDENTIALS_AUTHORIZATION: &str = "X-Verify-Credentials-Authorization";
/// Name of the Echo header carrying the verification URL.
pub const X_AUTH_SERVICE_PROVIDER: &str = "X-Auth-Service-Provider";

const AUTHORIZATION_SCHEME: &str = "OAuth ";

/// Serialize the `oauth_*` entries of `set` plus `signature` into an
/// `Authorization` header value.
///
/// Entries are sorted by key and joined with `, `; values are
/// percent-encoded and quoted. Request parameters without the `oauth_`
/// prefix are left out: they travel in the query or body.
pub fn build_authorization_header(set: &OAuthParameterSet, signature: &str) -> String {
    let mut entries: Vec<(&str, &str)> = set
        .oauth_entries()
        .chain(std::iter::once((OAUTH_SIGNATURE_KEY, signature)))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let mut header = String::from(AUTHORIZATION_SCHEME);
    if let Some(realm) = set.realm() {
        // OAuth realm="realm", oauth_...
        header.push_str(REALM_KEY);
        header.push_str("=\"");
        push_quoted_string(realm, &mut header);
        header.push_str("\", ");
    }
    for (i, (key, value)) in entries.into_iter().enumerate() {
        if i > 0 {
            header.push_str(", ");
        }
        percent_encode_to(key, &mut header);
        header.push_str("=\"");
        percent_encode_to(value, &mut header);
        header.push('"');
    }
    header
}

/// Append `value` as the content of an RFC 2617 quoted-string, escaping
/// `"` and `\` so it cannot close the quotes.
fn push_quoted_string(value: &str, output: &mut String) {
    for c in value.chars() {
        if c == '"' || c == '\\' {
            output.push('\\');
        }
        output.push(c);
    }
}

/// Sign `request` with a given nonce and timestamp.
///
/// Runs the whole pipeline: credential check, parameter collection,
/// normalization, base string, HMAC-SHA1 and header serialization.
pub fn authorize<S>(
    secrets: &S,
    request: &SigningRequest,
    nonce: String,
    timestamp: u64,
) -> SignResult<String>
where
    S: SecretsProvider + ?Sized,
{
    let consumer = secrets.consumer();
    consumer.validate()?;

    let set = OAuthParameterSet::collect(secrets, request, nonce, timestamp)?;
    let base_string = build_base_string(request.method(), request.url(), &set.normalize());
    trace!(base_string = %base_string, "built signature base string");

    let signature = sign(
        &base_string,
        consumer.expose_secret(),
        secrets.user_token().map(UserToken::expose_secret),
    );
    debug!(
        method = %request.method(),
        url = %base_url(request.url()),
        parameters = set.len(),
        with_token = secrets.user_token().is_some(),
        "signed request"
    );

    Ok(build_authorization_header(&set, &signature))
}

/// Build the OAuth Echo headers for `request` with a given nonce and
/// timestamp.
///
/// `X-Verify-Credentials-Authorization` is exactly what `authorize` returns
/// for the same inputs; `X-Auth-Service-Provider` is the request URL as the
/// caller wrote it, unencoded and unnormalized.
pub fn build_echo_headers<S>(
    secrets: &S,
    request: &SigningRequest,
    nonce: String,
    timestamp: u64,
) -> SignResult<EchoHeaders>
where
    S: TokenSecretsProvider + ?Sized,
{
    let authorization = authorize(secrets, request, nonce, timestamp)?;
    Ok(EchoHeaders {
        verify_credentials_authorization: authorization,
        auth_service_provider: request.original_url().to_string(),
    })
}

/// Headers a relying party forwards to the service that verifies the
/// user's identity on its behalf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EchoHeaders {
    #[serde(rename = "X-Verify-Credentials-Authorization")]
    pub verify_credentials_authorization: String,
    #[serde(rename = "X-Auth-Service-Provider")]
    pub auth_service_provider: String,
}

impl EchoHeaders {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            (
                X_VERIFY_CREDENTIALS_AUTHORIZATION,
                self.verify_credentials_authorization.as_str(),
            ),
            (X_AUTH_SERVICE_PROVIDER, self.auth_service_provider.as_str()),
        ]
        .into_iter()
    }

    /// Convert into an `http::HeaderMap`.
    ///
    /// # Errors
    ///
    /// Fails with `SignError::InvalidHeaderValue` if a value contains bytes
    /// not allowed in a header.
    pub fn to_header_map(&self) -> SignResult<HeaderMap> {
        let mut map = HeaderMap::with_capacity(2);
        for (name, value) in self.iter() {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| SignError::InvalidHeaderValue(name))?;
            let header_value =
                HeaderValue::from_str(value).map_err(|_| SignError::InvalidHeaderValue(name))?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }
}

/// Signing engine producing `Authorization` and OAuth Echo headers.
///
/// Holds no credentials; they are passed per call. The nonce and clock
/// sources default to `RandomNonce` and `SystemClock`.
#[derive(Debug, Clone, Default)]
pub struct OAuth1aHeaders<N = RandomNonce, C = SystemClock> {
    nonce_source: N,
    clock: C,
}

impl OAuth1aHeaders {
    pub fn new() -> Self {
        Default::default()
    }
}

impl<N, C> OAuth1aHeaders<N, C>
where
    N: NonceSource,
    C: Clock,
{
    pub fn with_providers(nonce_source: N, clock: C) -> Self {
        OAuth1aHeaders {
            nonce_source,
            clock,
        }
    }

    /// Collect the parameter set a signature for `request` would cover.
    pub fn parameters<S>(
        &self,
        secrets: &S,
        request: &SigningRequest,
    ) -> SignResult<OAuthParameterSet>
    where
        S: SecretsProvider + ?Sized,
    {
        OAuthParameterSet::collect(
            secrets,
            request,
            self.nonce_source.nonce(),
            self.clock.timestamp(),
        )
    }

    /// Build the `Authorization` header value for `request`.
    ///
    /// # Errors
    ///
    /// Fails if the consumer key or secret is empty, or if the request
    /// carries a reserved parameter.
    pub fn authorization_header<S>(
        &self,
        secrets: &S,
        request: &SigningRequest,
    ) -> SignResult<String>
    where
        S: SecretsProvider + ?Sized,
    {
        authorize(
            secrets,
            request,
            self.nonce_source.nonce(),
            self.clock.timestamp(),
        )
    }

    /// Build the OAuth Echo headers for delegating verification of
    /// `request` (typically a verify-credentials endpoint).
    pub fn echo_headers<S>(
        &self,
        secrets: &S,
        request: &SigningRequest,
    ) -> SignResult<EchoHeaders>
    where
        S: TokenSecretsProvider + ?Sized,
    {
        build_echo_headers(
            secrets,
            request,
            self.nonce_source.nonce(),
            self.clock.timestamp(),
        )
    }
}
