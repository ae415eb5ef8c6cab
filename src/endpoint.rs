//! Declarative API endpoint table.
//!
//! Each endpoint is plain data: HTTP method, path template and the
//! parameters it accepts. `EndpointRequest` turns an endpoint plus argument
//! values into a `SigningRequest` for the signing engine.

use http::Method;
use url::Url;

use crate::encode::percent_encode_to;
use crate::{SignError, SignResult, SigningRequest};

pub const TWITTER_API_BASE: &str = "https://api.twitter.com";

/// Where a parameter is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    Query,
    Form,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub location: ParamLocation,
    pub required: bool,
}

impl ParamSpec {
    pub const fn query(name: &'static str) -> Self {
        ParamSpec {
            name,
            location: ParamLocation::Query,
            required: false,
        }
    }

    pub const fn form(name: &'static str) -> Self {
        ParamSpec {
            name,
            location: ParamLocation::Form,
            required: false,
        }
    }

    pub const fn required(self) -> Self {
        ParamSpec {
            required: true,
            ..self
        }
    }
}

/// An API endpoint. `{name}` segments in the path template are filled from
/// path arguments; a query component in the template is always sent.
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub method: Method,
    pub path_template: &'static str,
    pub params: &'static [ParamSpec],
}

impl Endpoint {
    /// Start a request against this endpoint on `base_url`
    /// (e.g. `TWITTER_API_BASE`).
    pub fn request<'e>(&'e self, base_url: &str) -> EndpointRequest<'e> {
        EndpointRequest {
            endpoint: self,
            base_url: base_url.trim_end_matches('/').to_string(),
            path_args: Vec::new(),
            params: Vec::new(),
        }
    }

    pub fn param_spec(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|param| param.name == name)
    }

    fn expand_path(&self, args: &[(String, String)]) -> SignResult<String> {
        let mut path = String::with_capacity(self.path_template.len());
        let mut rest = self.path_template;
        while let Some(start) = rest.find('{') {
            let end = match rest[start..].find('}') {
                Some(offset) => start + offset,
                None => break,
            };
            let name = &rest[start + 1..end];
            let value = args
                .iter()
                .find(|(arg, _)| arg == name)
                .map(|(_, value)| value)
                .ok_or_else(|| SignError::MissingPathArgument(name.to_string()))?;
            path.push_str(&rest[..start]);
            percent_encode_to(value, &mut path);
            rest = &rest[end + 1..];
        }
        path.push_str(rest);
        Ok(path)
    }
}

/// Argument values for one call of an `Endpoint`.
#[derive(Debug, Clone)]
pub struct EndpointRequest<'e> {
    endpoint: &'e Endpoint,
    base_url: String,
    path_args: Vec<(String, String)>,
    params: Vec<(String, String)>,
}

impl<'e> EndpointRequest<'e> {
    pub fn path_arg<K, V>(mut self, name: K, value: V) -> Self
    where
        K: Into<String>,
        V: ToString,
    {
        self.path_args.push((name.into(), value.to_string()));
        self
    }

    pub fn param<K, V>(mut self, name: K, value: V) -> Self
    where
        K: Into<String>,
        V: ToString,
    {
        self.params.push((name.into(), value.to_string()));
        self
    }

    /// Add the parameter only when a value is present.
    pub fn optional_param<K, V>(self, name: K, value: Option<V>) -> Self
    where
        K: Into<String>,
        V: ToString,
    {
        match value {
            Some(value) => self.param(name, value),
            None => self,
        }
    }

    /// Validate the arguments and produce the request description.
    ///
    /// # Errors
    ///
    /// Fails on parameters the endpoint does not declare, on missing
    /// required parameters or path arguments, and on an unparsable URL.
    pub fn build(self) -> SignResult<SigningRequest> {
        let endpoint = self.endpoint;
        for (name, _) in &self.params {
            if endpoint.param_spec(name).is_none() {
                return Err(SignError::UnknownParameter(name.clone()));
            }
        }
        for param in endpoint.params.iter().filter(|param| param.required) {
            if !self.params.iter().any(|(name, _)| name == param.name) {
                return Err(SignError::MissingParameter(param.name));
            }
        }

        let raw = format!("{}{}", self.base_url, endpoint.expand_path(&self.path_args)?);
        let mut url =
            Url::parse(&raw).map_err(|err| SignError::InvalidUrl(raw.clone(), err.to_string()))?;

        let (query, form): (Vec<_>, Vec<_>) = self.params.into_iter().partition(|(name, _)| {
            endpoint.param_spec(name).map(|param| param.location) == Some(ParamLocation::Query)
        });
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &query {
                pairs.append_pair(name, value);
            }
        }

        Ok(SigningRequest::from_url(endpoint.method.clone(), url)?.parameters(form))
    }
}

/// Every Tweet-returning endpoint asks for extended text and cards.
macro_rules! tweet_path {
    ($path:literal) => {
        concat!(
            $path,
            "?tweet_mode=extended&include_cards=true&cards_platform=TwitterKit-13"
        )
    };
}

const TIMELINE_PARAMS: &[ParamSpec] = &[
    ParamSpec::query("count"),
    ParamSpec::query("since_id"),
    ParamSpec::query("max_id"),
    ParamSpec::query("trim_user"),
    ParamSpec::query("exclude_replies"),
    ParamSpec::query("contributor_details"),
    ParamSpec::query("include_entities"),
];

pub const STATUSES_MENTIONS_TIMELINE: Endpoint = Endpoint {
    method: Method::GET,
    path_template: tweet_path!("/1.1/statuses/mentions_timeline.json"),
    params: TIMELINE_PARAMS,
};

pub const STATUSES_HOME_TIMELINE: Endpoint = Endpoint {
    method: Method::GET,
    path_template: tweet_path!("/1.1/statuses/home_timeline.json"),
    params: TIMELINE_PARAMS,
};

pub const STATUSES_USER_TIMELINE: Endpoint = Endpoint {
    method: Method::GET,
    path_template: tweet_path!("/1.1/statuses/user_timeline.json"),
    params: &[
        ParamSpec::query("user_id"),
        ParamSpec::query("screen_name"),
        ParamSpec::query("count"),
        ParamSpec::query("since_id"),
        ParamSpec::query("max_id"),
        ParamSpec::query("trim_user"),
        ParamSpec::query("exclude_replies"),
        ParamSpec::query("contributor_details"),
        ParamSpec::query("include_rts"),
    ],
};

pub const STATUSES_SHOW: Endpoint = Endpoint {
    method: Method::GET,
    path_template: tweet_path!("/1.1/statuses/show.json"),
    params: &[
        ParamSpec::query("id").required(),
        ParamSpec::query("trim_user"),
        ParamSpec::query("include_my_retweet"),
        ParamSpec::query("include_entities"),
    ],
};

pub const STATUSES_LOOKUP: Endpoint = Endpoint {
    method: Method::GET,
    path_template: tweet_path!("/1.1/statuses/lookup.json"),
    params: &[
        ParamSpec::query("id").required(),
        ParamSpec::query("include_entities"),
        ParamSpec::query("trim_user"),
        ParamSpec::query("map"),
    ],
};

pub const STATUSES_UPDATE: Endpoint = Endpoint {
    method: Method::POST,
    path_template: tweet_path!("/1.1/statuses/update.json"),
    params: &[
        ParamSpec::form("status").required(),
        ParamSpec::form("in_reply_to_status_id"),
        ParamSpec::form("possibly_sensitive"),
        ParamSpec::form("lat"),
        ParamSpec::form("long"),
        ParamSpec::form("place_id"),
        ParamSpec::form("display_coordinates"),
        ParamSpec::form("trim_user"),
        ParamSpec::form("media_ids"),
    ],
};

pub const STATUSES_RETWEET: Endpoint = Endpoint {
    method: Method::POST,
    path_template: tweet_path!("/1.1/statuses/retweet/{id}.json"),
    params: &[ParamSpec::form("trim_user")],
};

pub const STATUSES_UNRETWEET: Endpoint = Endpoint {
    method: Method::POST,
    path_template: tweet_path!("/1.1/statuses/unretweet/{id}.json"),
    params: &[ParamSpec::form("trim_user")],
};

pub const STATUSES_DESTROY: Endpoint = Endpoint {
    method: Method::POST,
    path_template: tweet_path!("/1.1/statuses/destroy/{id}.json"),
    params: &[ParamSpec::form("trim_user")],
};

pub const FAVORITES_LIST: Endpoint = Endpoint {
    method: Method::GET,
    path_template: tweet_path!("/1.1/favorites/list.json"),
    params: &[
        ParamSpec::query("user_id"),
        ParamSpec::query("screen_name"),
        ParamSpec::query("count"),
        ParamSpec::query("since_id"),
        ParamSpec::query("max_id"),
        ParamSpec::query("include_entities"),
    ],
};

pub const FAVORITES_CREATE: Endpoint = Endpoint {
    method: Method::POST,
    path_template: tweet_path!("/1.1/favorites/create.json"),
    params: &[
        ParamSpec::form("id").required(),
        ParamSpec::form("include_entities"),
    ],
};

pub const FAVORITES_DESTROY: Endpoint = Endpoint {
    method: Method::POST,
    path_template: tweet_path!("/1.1/favorites/destroy.json"),
    params: &[
        ParamSpec::form("id").required(),
        ParamSpec::form("include_entities"),
    ],
};

/// The usual target of OAuth Echo delegation.
pub const ACCOUNT_VERIFY_CREDENTIALS: Endpoint = Endpoint {
    method: Method::GET,
    path_template: "/1.1/account/verify_credentials.json",
    params: &[
        ParamSpec::query("include_entities"),
        ParamSpec::query("skip_status"),
        ParamSpec::query("include_email"),
    ],
};
