// ----------------------------------------------------------------------------
// This source code contains derived artifacts from seanmonstar's `reqwest`.
// for further information(including license information),
// please visit their repository: https://github.com/seanmonstar/reqwest .
// ----------------------------------------------------------------------------
use reqwest::{Client as ReqwestClient, IntoUrl, Method};

use crate::{OAuthParameters, SecretsProvider, Signer};

use super::request::RequestBuilder;

/// Add OAuth 1.0a signing to `reqwest::Client`.
pub trait OAuthClientProvider {
    fn oauth1<'a, T>(self, secrets: &'a T) -> Client<Signer<'a, T>>
    where
        Self: Sized,
        T: SecretsProvider,
    {
        self.oauth1_with_params(secrets, OAuthParameters::new())
    }

    fn oauth1_with_params<'a, T>(
        self,
        secrets: &'a T,
        params: OAuthParameters<'a>,
    ) -> Client<Signer<'a, T>>
    where
        Self: Sized,
        T: SecretsProvider;
}

/// A `reqwest::Client` paired with the signer for its requests.
#[derive(Debug)]
pub struct Client<TSigner> {
    inner: ReqwestClient,
    signer: TSigner,
}

impl OAuthClientProvider for ReqwestClient {
    fn oauth1_with_params<'a, T>(
        self,
        secrets: &'a T,
        parameters: OAuthParameters<'a>,
    ) -> Client<Signer<'a, T>>
    where
        Self: Sized,
        T: SecretsProvider,
    {
        Client {
            inner: self,
            signer: Signer::new(secrets, parameters),
        }
    }
}

impl<TSigner> Client<TSigner>
where
    TSigner: Clone,
{
    /// Convenience method to make a `GET` request to a URL.
    pub fn get<U: IntoUrl + Clone>(&self, url: U) -> RequestBuilder<TSigner> {
        self.request(Method::GET, url)
    }

    /// Convenience method to make a `POST` request to a URL.
    pub fn post<U: IntoUrl + Clone>(&self, url: U) -> RequestBuilder<TSigner> {
        self.request(Method::POST, url)
    }

    /// Convenience method to make a `PUT` request to a URL.
    pub fn put<U: IntoUrl + Clone>(&self, url: U) -> RequestBuilder<TSigner> {
        self.request(Method::PUT, url)
    }

    /// Convenience method to make a `PATCH` request to a URL.
    pub fn patch<U: IntoUrl + Clone>(&self, url: U) -> RequestBuilder<TSigner> {
        self.request(Method::PATCH, url)
    }

    /// Convenience method to make a `DELETE` request to a URL.
    pub fn delete<U: IntoUrl + Clone>(&self, url: U) -> RequestBuilder<TSigner> {
        self.request(Method::DELETE, url)
    }

    /// Convenience method to make a `HEAD` request to a URL.
    pub fn head<U: IntoUrl + Clone>(&self, url: U) -> RequestBuilder<TSigner> {
        self.request(Method::HEAD, url)
    }

    /// Start building a `Request` with the `Method` and `Url`.
    ///
    /// A URL that cannot be parsed is reported when the signature is
    /// generated.
    pub fn request<U: IntoUrl + Clone>(&self, method: Method, url: U) -> RequestBuilder<TSigner> {
        let captured_url = url.clone().into_url().ok();
        RequestBuilder::new(
            self.inner.request(method.clone(), url),
            method,
            captured_url,
            self.signer.clone(),
        )
    }
}
