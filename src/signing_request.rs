use http::Method;
use serde::Serialize;
use url::Url;

use crate::{SignError, SignResult};

/// Everything about an outgoing request that takes part in the signature.
///
/// The query component of the URL is split into parameters at construction;
/// form parameters are kept apart so the caller can send them as the body.
#[derive(Debug, Clone)]
pub struct SigningRequest {
    method: Method,
    url: Url,
    original_url: String,
    callback: Option<String>,
    realm: Option<String>,
    query: Vec<(String, String)>,
    form: Vec<(String, String)>,
}

impl SigningRequest {
    /// Parse `url` and start a request description.
    ///
    /// # Errors
    ///
    /// Fails with `SignError::InvalidUrl` if `url` is not an absolute URL
    /// with a host.
    pub fn new(method: Method, url: &str) -> SignResult<Self> {
        let parsed = Url::parse(url)
            .map_err(|err| SignError::InvalidUrl(url.to_string(), err.to_string()))?;
        let mut request = Self::from_url(method, parsed)?;
        request.original_url = url.to_string();
        Ok(request)
    }

    /// Start a request description from an already parsed URL.
    pub fn from_url(method: Method, mut url: Url) -> SignResult<Self> {
        if url.cannot_be_a_base() || url.host_str().map_or(true, str::is_empty) {
            return Err(SignError::InvalidUrl(
                url.to_string(),
                "an absolute url with a host is required".to_string(),
            ));
        }
        url.set_fragment(None);
        let query = url.query_pairs().into_owned().collect();
        Ok(SigningRequest {
            method,
            original_url: url.as_str().to_string(),
            url,
            callback: None,
            realm: None,
            query,
            form: Vec::new(),
        })
    }

    /// Set `oauth_callback`, used when requesting temporary credentials.
    pub fn callback<T: Into<String>>(self, callback: T) -> Self {
        SigningRequest {
            callback: Some(callback.into()),
            ..self
        }
    }

    /// Set the `realm` attribute of the header. It is never signed.
    pub fn realm<T: Into<String>>(self, realm: T) -> Self {
        SigningRequest {
            realm: Some(realm.into()),
            ..self
        }
    }

    /// Add a form (body) parameter. Keys may repeat.
    pub fn parameter<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.form.push((key.into(), value.into()));
        self
    }

    pub fn parameters<I, K, V>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.form
            .extend(parameters.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Add the fields of a serializable form as body parameters.
    pub fn form<T: Serialize + ?Sized>(self, form: &T) -> SignResult<Self> {
        let body =
            serde_urlencoded::to_string(form).map_err(|e| SignError::InvalidForm(e.to_string()))?;
        Ok(self.form_str(&body))
    }

    /// Add the pairs of an `application/x-www-form-urlencoded` body.
    pub fn form_str(self, body: &str) -> Self {
        let pairs: Vec<(String, String)> = url::form_urlencoded::parse(body.as_bytes())
            .into_owned()
            .collect();
        self.parameters(pairs)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The request URL, including its query component.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The URL as the caller wrote it, before parsing normalized scheme,
    /// host or path. Parsed URLs given to `from_url` are kept as they are.
    pub fn original_url(&self) -> &str {
        &self.original_url
    }

    pub fn get_callback(&self) -> Option<&str> {
        self.callback.as_deref()
    }

    pub fn get_realm(&self) -> Option<&str> {
        self.realm.as_deref()
    }

    pub fn query_parameters(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn form_parameters(&self) -> &[(String, String)] {
        &self.form
    }

    /// Query and form parameters, in that order.
    pub fn parameters_iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.query
            .iter()
            .chain(self.form.iter())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The form parameters encoded as an `application/x-www-form-urlencoded` body.
    pub fn form_body(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.form.iter())
            .finish()
    }
}
