// ----------------------------------------------------------------------------
// This source code contains derived artifacts from seanmonstar's `reqwest`.
// for further information(including license information),
// please visit their repository: https://github.com/seanmonstar/reqwest .
// ----------------------------------------------------------------------------
use std::time::Duration;

use http::{header::AUTHORIZATION, HeaderValue, Method};
use reqwest::{header::HeaderMap, header::HeaderName, RequestBuilder as ReqwestRequestBuilder, Url};
use serde::Serialize;

use crate::{SecretsProvider, SignError, SignResult, Signer, SigningRequest};

/// Wraps `reqwest::RequestBuilder`, capturing the URL and form body so the
/// request can be signed before it is handed back.
pub struct RequestBuilder<TSigner>
where
    TSigner: Clone,
{
    pub(crate) method: Method,
    inner: ReqwestRequestBuilder,
    signer: TSigner,
    pub(crate) url: Option<Url>,
    pub(crate) body: String,
    error: Option<SignError>,
}

impl<'a, TSecretsProvider> RequestBuilder<Signer<'a, TSecretsProvider>>
where
    TSecretsProvider: SecretsProvider,
{
    /// Generate the OAuth signature and return the reqwest's `RequestBuilder`
    /// with the `Authorization` header set.
    ///
    /// # Errors
    ///
    /// Fails if the URL could not be parsed, if a query or form could not be
    /// serialized, or on any signing error.
    pub fn generate_signature(self) -> SignResult<ReqwestRequestBuilder> {
        if let Some(err) = self.error {
            return Err(err);
        }
        let url = self.url.ok_or_else(|| {
            SignError::InvalidUrl(String::new(), "request url could not be parsed".to_string())
        })?;
        let request = SigningRequest::from_url(self.method, url)?.form_str(&self.body);
        let authorization = self.signer.generate_signature(request)?;
        let value = HeaderValue::from_str(&authorization)
            .map_err(|_| SignError::InvalidHeaderValue("Authorization"))?;
        Ok(self.inner.header(AUTHORIZATION, value))
    }
}

impl<TSigner> RequestBuilder<TSigner>
where
    TSigner: Clone,
{
    pub(crate) fn new(
        builder: ReqwestRequestBuilder,
        method: Method,
        url: Option<Url>,
        signer: TSigner,
    ) -> Self {
        RequestBuilder {
            inner: builder,
            method,
            url,
            body: String::new(),
            error: None,
            signer,
        }
    }

    // ------------------------------------------------------------------------
    // Trapped with the wrapper

    /// Modify the query string of the URL.
    ///
    /// Appends, like `reqwest::RequestBuilder::query`; repeated keys show up
    /// twice and are signed twice.
    pub fn query<T: Serialize + ?Sized>(mut self, query: &T) -> Self {
        if let Some(ref mut url) = self.url {
            let mut pairs = url.query_pairs_mut();
            let serializer = serde_urlencoded::Serializer::new(&mut pairs);
            if let Err(err) = query.serialize(serializer) {
                self.error.get_or_insert(SignError::InvalidForm(err.to_string()));
            }
        }
        if let Some(ref mut url) = self.url {
            if let Some("") = url.query() {
                url.set_query(None);
            }
        }
        self.inner = self.inner.query(query);
        self
    }

    /// Send a form body. Its fields take part in the signature.
    pub fn form<T: Serialize + ?Sized>(mut self, form: &T) -> Self {
        match serde_urlencoded::to_string(form) {
            Ok(body) => self.body = body,
            Err(err) => {
                self.error.get_or_insert(SignError::InvalidForm(err.to_string()));
            }
        }
        self.inner = self.inner.form(form);
        self
    }

    // ------------------------------------------------------------------------
    // Pass-through to inner builder

    /// Add a `Header` to this Request.
    pub fn header<K, V>(mut self, key: K, value: V) -> Self
    where
        HeaderName: TryFrom<K>,
        <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
        HeaderValue: TryFrom<V>,
        <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
    {
        self.inner = self.inner.header(key, value);
        self
    }

    /// Add a set of Headers to the existing ones on this Request.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.inner = self.inner.headers(headers);
        self
    }

    /// Enables a request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.timeout(timeout);
        self
    }

    /// Attempt to clone the RequestBuilder.
    ///
    /// `None` is returned if the RequestBuilder can not be cloned,
    /// i.e. if the request body is a stream.
    pub fn try_clone(&self) -> Option<Self> {
        self.inner.try_clone().map(|inner| RequestBuilder {
            inner,
            method: self.method.clone(),
            url: self.url.clone(),
            body: self.body.clone(),
            error: self.error.clone(),
            signer: self.signer.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use http::header::AUTHORIZATION;

    use crate::{OAuthClientProvider, OAuthParameters, Secrets, SignError};

    fn extract_signature(auth_header: &str) -> String {
        let content = auth_header.strip_prefix("OAuth ").unwrap();
        let sig_content = content
            .split(',')
            .filter_map(|item| item.trim().split_once('='))
            .find(|(k, _)| *k == "oauth_signature")
            .map(|(_, v)| v.trim_matches('"'))
            .unwrap();
        percent_encoding::percent_decode_str(sig_content)
            .decode_utf8_lossy()
            .to_string()
    }

    #[test]
    fn capture_form_body() {
        let secrets = Secrets::new("dpf43f3p2l4k3l03", "kd94hf93k423kf44");

        let req = reqwest::Client::new()
            .oauth1(&secrets)
            .post("https://photos.example.net/initiate")
            .form(&[("少女", "終末旅行")]);
        assert_eq!(
            req.body,
            "%E5%B0%91%E5%A5%B3=%E7%B5%82%E6%9C%AB%E6%97%85%E8%A1%8C"
        );
    }

    #[test]
    fn capture_query() {
        let secrets = Secrets::new("dpf43f3p2l4k3l03", "kd94hf93k423kf44");

        let req = reqwest::Client::new()
            .oauth1(&secrets)
            .get("https://photos.example.net/photos?file=vacation.jpg")
            .query(&[("size", "original")]);
        let query = req.url.unwrap().query().unwrap().to_string();
        assert_eq!(query, "file=vacation.jpg&size=original")
    }

    #[test]
    fn sign_get_query() {
        // OAuth Core 1.0a, Appendix A.5
        let secrets = Secrets::new("dpf43f3p2l4k3l03", "kd94hf93k423kf44")
            .token("nnch734d00sl2jdk", "pfkkdhi9sl3r4s00");
        let params = OAuthParameters::new()
            .nonce("kllo9940pd9333jh")
            .timestamp(1_191_242_096u64);

        let req = reqwest::Client::new()
            .oauth1_with_params(&secrets, params)
            .get("http://photos.example.net/photos")
            .query(&[("file", "vacation.jpg"), ("size", "original")])
            .generate_signature()
            .unwrap()
            .build()
            .unwrap();

        let sign = req.headers().get(AUTHORIZATION).unwrap().to_str().unwrap();
        assert_eq!(extract_signature(sign), "tR3+Ty81lMeYAr/Fid0kMTYa/WM=");
        assert_eq!(
            req.url().as_str(),
            "http://photos.example.net/photos?file=vacation.jpg&size=original"
        );
    }

    #[test]
    fn sign_post_body() {
        // https://developer.twitter.com/en/docs/authentication/oauth-1-0a/creating-a-signature
        let secrets = Secrets::new(
            "xvz1evFS4wEEPTGEFPHBog",
            "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
        )
        .token(
            "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb",
            "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE",
        );
        let params = OAuthParameters::new()
            .nonce("kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg")
            .timestamp(1_318_622_958u64);

        let req = reqwest::Client::new()
            .oauth1_with_params(&secrets, params)
            .post("https://api.twitter.com/1.1/statuses/update.json?include_entities=true")
            .form(&[(
                "status",
                "Hello Ladies + Gentlemen, a signed OAuth request!",
            )])
            .generate_signature()
            .unwrap()
            .build()
            .unwrap();

        let sign = req.headers().get(AUTHORIZATION).unwrap().to_str().unwrap();
        assert_eq!(extract_signature(sign), "hCtSmYh+iHYCEqBWrE7C7hYmtUk=");
        assert!(!sign.contains("status"));
    }

    #[test]
    fn unparsable_url_fails_signing() {
        let secrets = Secrets::new("key", "secret");
        let result = reqwest::Client::new()
            .oauth1(&secrets)
            .get("not a url")
            .generate_signature();
        assert!(matches!(result, Err(SignError::InvalidUrl(_, _))));
    }

    #[test]
    fn unserializable_form_fails_signing() {
        let secrets = Secrets::new("key", "secret");
        // a bare string is not a sequence of key/value pairs
        let result = reqwest::Client::new()
            .oauth1(&secrets)
            .post("https://api.example.com/1.1/statuses/update.json")
            .form("status")
            .generate_signature();
        assert!(matches!(result, Err(SignError::InvalidForm(_))));
    }

    #[test]
    fn unserializable_query_fails_signing() {
        let secrets = Secrets::new("key", "secret");
        let result = reqwest::Client::new()
            .oauth1(&secrets)
            .get("https://api.example.com/1.1/statuses/show.json")
            .query(&42u64)
            .generate_signature();
        assert!(matches!(result, Err(SignError::InvalidForm(_))));
    }

    #[test]
    fn empty_secret_fails_signing() {
        let secrets = Secrets::new("key", "");
        let result = reqwest::Client::new()
            .oauth1(&secrets)
            .get("https://api.example.com/")
            .generate_signature();
        assert!(matches!(result, Err(SignError::MissingConsumerSecret)));
    }
}
