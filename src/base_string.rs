//! Signature base string construction ([RFC 5849 section 3.4.1][rfc]).
//!
//! [rfc]: https://tools.ietf.org/html/rfc5849#section-3.4.1

use http::Method;
use url::Url;

use crate::encode::percent_encode_to;

/// Scheme, authority and path of `url`, without query or fragment.
///
/// Scheme and host are lowercase and default ports are dropped, as the
/// `url` crate normalizes both on parse.
pub fn base_url(url: &Url) -> String {
    let mut base = url.clone();
    base.set_query(None);
    base.set_fragment(None);
    base.into()
}

/// Build `METHOD&encoded-base-url&encoded-normalized-parameters`.
///
/// `normalized` is the output of `OAuthParameterSet::normalize`; it is
/// encoded again here as one opaque value.
pub fn build_base_string(method: &Method, url: &Url, normalized: &str) -> String {
    let mut base = method.as_str().to_ascii_uppercase();
    base.push('&');
    percent_encode_to(&base_url(url), &mut base);
    base.push('&');
    percent_encode_to(normalized, &mut base);
    base
}
