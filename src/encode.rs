//! RFC 3986 percent-encoding as required by OAuth 1.0a.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything but the unreserved characters `A-Z a-z 0-9 - . _ ~`.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode `input` over its UTF-8 bytes, using uppercase hex digits.
///
/// This is the single encoder used for parameter normalization, the
/// signature base string, the signing key and the header values.
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, OAUTH_ENCODE_SET).to_string()
}

pub(crate) fn percent_encode_to(input: &str, output: &mut String) {
    output.extend(utf8_percent_encode(input, OAUTH_ENCODE_SET));
}
