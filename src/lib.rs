/*!
oauth1a-headers: OAuth 1.0a request signing.

# Overview

This library computes the OAuth 1.0a `Authorization` header for an outgoing
request (HMAC-SHA1), and the pair of OAuth Echo headers
(`X-Verify-Credentials-Authorization`, `X-Auth-Service-Provider`) a relying
party forwards to a service that verifies the user on its behalf.

It never sends anything: requests are described with `SigningRequest`, the
header values are returned to the caller. A thin adapter for
[reqwest](https://crates.io/crates/reqwest) attaches the header to a
`reqwest::RequestBuilder`.

# How to use

## Basic usecase 1 - signing a tweet

```rust,no_run
use http::Method;
use oauth1a_headers::{OAuth1aHeaders, Secrets, SigningRequest};

# fn main() -> Result<(), oauth1a_headers::Error> {
let secrets = Secrets::new("[CONSUMER_KEY]", "[CONSUMER_SECRET]")
    .token("[ACCESS_TOKEN]", "[TOKEN_SECRET]");

let request = SigningRequest::new(
    Method::POST,
    "https://api.twitter.com/1.1/statuses/update.json",
)?
.parameter("status", "Hello, Twitter!");

let authorization = OAuth1aHeaders::new().authorization_header(&secrets, &request)?;
// send `request.form_body()` with `Authorization: {authorization}`
# Ok(())
# }
```

## Basic usecase 2 - OAuth Echo

```rust,no_run
use oauth1a_headers::endpoint::{ACCOUNT_VERIFY_CREDENTIALS, TWITTER_API_BASE};
use oauth1a_headers::{OAuth1aHeaders, Secrets};

# fn main() -> Result<(), oauth1a_headers::Error> {
let secrets = Secrets::new("[CONSUMER_KEY]", "[CONSUMER_SECRET]")
    .token("[ACCESS_TOKEN]", "[TOKEN_SECRET]");

let request = ACCOUNT_VERIFY_CREDENTIALS.request(TWITTER_API_BASE).build()?;
let echo = OAuth1aHeaders::new().echo_headers(&secrets, &request)?;
// hand `echo.to_header_map()?` to the relying party
# Ok(())
# }
```

## Basic usecase 3 - reqwest

```rust,no_run
use oauth1a_headers::{OAuthClientProvider, Secrets};

# fn main() -> Result<(), oauth1a_headers::Error> {
let secrets = Secrets::new("[CONSUMER_KEY]", "[CONSUMER_SECRET]")
    .token("[ACCESS_TOKEN]", "[TOKEN_SECRET]");

let request = reqwest::Client::new()
    .oauth1(&secrets)
    .post("https://api.twitter.com/1.1/statuses/update.json")
    .form(&[("status", "Hello, Twitter!")])
    .generate_signature()?;
// request.send().await
# Ok(())
# }
```
*/
pub mod base_string;
mod client;
pub mod encode;
pub mod endpoint;
mod error;
pub mod headers;
pub mod parameters;
pub mod provider;
mod request;
mod secrets;
pub mod signer;
mod signing_request;

// exposed to external program
pub use client::{Client, OAuthClientProvider};
pub use encode::percent_encode;
pub use error::{Error, Result, SignError, SignResult};
pub use headers::{
    authorize, build_authorization_header, build_echo_headers, EchoHeaders, OAuth1aHeaders,
};
pub use parameters::OAuthParameterSet;
pub use provider::{Clock, FixedClock, FixedNonce, NonceSource, RandomNonce, SystemClock};
pub use request::RequestBuilder;
pub use secrets::{ConsumerCredential, Secrets, SecretsProvider, TokenSecretsProvider, UserToken};
pub use signer::{sign, signing_key, OAuthParameters, Signer};
pub use signing_request::SigningRequest;

// exposed constant variables
/// Represents `oauth_callback`.
pub const OAUTH_CALLBACK_KEY: &str = "oauth_callback";
/// Represents `oauth_consumer_key`.
pub const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
/// Represents `oauth_nonce`.
pub const OAUTH_NONCE_KEY: &str = "oauth_nonce";
/// Represents `oauth_signature`.
pub const OAUTH_SIGNATURE_KEY: &str = "oauth_signature";
/// Represents `oauth_signature_method`.
pub const OAUTH_SIGNATURE_METHOD_KEY: &str = "oauth_signature_method";
/// Represents `oauth_timestamp`.
pub const OAUTH_TIMESTAMP_KEY: &str = "oauth_timestamp";
/// Represents `oauth_token`.
pub const OAUTH_TOKEN_KEY: &str = "oauth_token";
/// Represents `oauth_version`.
pub const OAUTH_VERSION_KEY: &str = "oauth_version";
/// Represents `realm`.
pub const REALM_KEY: &str = "realm";
/// The only supported `oauth_signature_method`.
pub const HMAC_SHA1: &str = "HMAC-SHA1";
/// The `oauth_version` value.
pub const OAUTH_VERSION: &str = "1.0";

// crate-private constant variables
pub(crate) const OAUTH_KEY_PREFIX: &str = "oauth_";
