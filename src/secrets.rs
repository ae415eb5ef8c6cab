use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::{Error, Result, SignError, SignResult};

pub(crate) const CONSUMER_KEY_ENV: &str = "OAUTH_CONSUMER_KEY";
pub(crate) const CONSUMER_SECRET_ENV: &str = "OAUTH_CONSUMER_SECRET";
pub(crate) const TOKEN_ENV: &str = "OAUTH_TOKEN";
pub(crate) const TOKEN_SECRET_ENV: &str = "OAUTH_TOKEN_SECRET";

/// Application-level key pair identifying the client.
///
/// The secret is kept in a `SecretString` and redacted from `Debug` output.
#[derive(Clone)]
pub struct ConsumerCredential {
    key: String,
    secret: SecretString,
}

impl ConsumerCredential {
    pub fn new<TKey, TSecret>(key: TKey, secret: TSecret) -> Self
    where
        TKey: Into<String>,
        TSecret: Into<String>,
    {
        ConsumerCredential {
            key: key.into(),
            secret: SecretString::from(secret.into()),
        }
    }

    /// Load the credential from `OAUTH_CONSUMER_KEY` / `OAUTH_CONSUMER_SECRET`.
    ///
    /// A `.env` file in the working directory is loaded first when present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let key = lookup(CONSUMER_KEY_ENV).ok_or(Error::MissingEnvVar(CONSUMER_KEY_ENV))?;
        let secret =
            lookup(CONSUMER_SECRET_ENV).ok_or(Error::MissingEnvVar(CONSUMER_SECRET_ENV))?;
        Ok(Self::new(key, secret))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Expose the consumer secret. Only for building the signing key.
    pub fn expose_secret(&self) -> &str {
        self.secret.expose_secret()
    }

    /// Reject credentials that would silently produce a useless signature.
    pub(crate) fn validate(&self) -> SignResult<()> {
        if self.key.is_empty() {
            return Err(SignError::MissingConsumerKey);
        }
        if self.expose_secret().is_empty() {
            return Err(SignError::MissingConsumerSecret);
        }
        Ok(())
    }
}

impl fmt::Debug for ConsumerCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsumerCredential")
            .field("key", &self.key)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Per-user access token pair obtained from a prior authorization flow.
#[derive(Clone)]
pub struct UserToken {
    token: String,
    secret: SecretString,
}

impl UserToken {
    pub fn new<TKey, TSecret>(token: TKey, secret: TSecret) -> Self
    where
        TKey: Into<String>,
        TSecret: Into<String>,
    {
        UserToken {
            token: token.into(),
            secret: SecretString::from(secret.into()),
        }
    }

    /// Load the token from `OAUTH_TOKEN` / `OAUTH_TOKEN_SECRET`.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let token = lookup(TOKEN_ENV).ok_or(Error::MissingEnvVar(TOKEN_ENV))?;
        let secret = lookup(TOKEN_SECRET_ENV).ok_or(Error::MissingEnvVar(TOKEN_SECRET_ENV))?;
        Ok(Self::new(token, secret))
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Expose the token secret. Only for building the signing key.
    pub fn expose_secret(&self) -> &str {
        self.secret.expose_secret()
    }
}

impl fmt::Debug for UserToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserToken")
            .field("token", &self.token)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Source of the credentials used to sign a request.
pub trait SecretsProvider {
    fn consumer(&self) -> &ConsumerCredential;

    fn user_token(&self) -> Option<&UserToken>;
}

/// Credentials that always carry a user token, as required by OAuth Echo.
pub trait TokenSecretsProvider: SecretsProvider {
    fn token(&self) -> &UserToken;
}

/// Consumer credential with an optional user token.
///
/// `Secrets<()>` signs two-legged (app-only) requests;
/// `Secrets<UserToken>` signs on behalf of a user.
#[derive(Debug, Clone)]
pub struct Secrets<T = ()> {
    consumer: ConsumerCredential,
    token: T,
}

impl Secrets<()> {
    pub fn new<TKey, TSecret>(consumer_key: TKey, consumer_secret: TSecret) -> Self
    where
        TKey: Into<String>,
        TSecret: Into<String>,
    {
        Secrets {
            consumer: ConsumerCredential::new(consumer_key, consumer_secret),
            token: (),
        }
    }

    pub fn from_credential(consumer: ConsumerCredential) -> Self {
        Secrets {
            consumer,
            token: (),
        }
    }

    pub fn token<TKey, TSecret>(self, token: TKey, token_secret: TSecret) -> Secrets<UserToken>
    where
        TKey: Into<String>,
        TSecret: Into<String>,
    {
        self.with_user_token(UserToken::new(token, token_secret))
    }

    pub fn with_user_token(self, token: UserToken) -> Secrets<UserToken> {
        Secrets {
            consumer: self.consumer,
            token,
        }
    }
}

impl SecretsProvider for Secrets<()> {
    fn consumer(&self) -> &ConsumerCredential {
        &self.consumer
    }

    fn user_token(&self) -> Option<&UserToken> {
        None
    }
}

impl SecretsProvider for Secrets<UserToken> {
    fn consumer(&self) -> &ConsumerCredential {
        &self.consumer
    }

    fn user_token(&self) -> Option<&UserToken> {
        Some(&self.token)
    }
}

impl TokenSecretsProvider for Secrets<UserToken> {
    fn token(&self) -> &UserToken {
        &self.token
    }
}

impl SecretsProvider for ConsumerCredential {
    fn consumer(&self) -> &ConsumerCredential {
        self
    }

    fn user_token(&self) -> Option<&UserToken> {
        None
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    static CONSUMER_KEY: &str = "<CONSUMER_KEY>";
    static CONSUMER_SECRET: &str = "<CONSUMER_SECRET>";
    static TOKEN: &str = "<ACCESS_TOKEN>";
    static TOKEN_SECRET: &str = "<TOKEN_SECRET>";

    #[test]
    fn secrets_builder() {
        let secrets = Secrets::new(CONSUMER_KEY, CONSUMER_SECRET);
        assert_eq!(secrets.consumer().key(), CONSUMER_KEY);
        assert!(secrets.user_token().is_none());

        let secrets = secrets.token(TOKEN, TOKEN_SECRET);
        assert_eq!(secrets.consumer().expose_secret(), CONSUMER_SECRET);
        assert_eq!(secrets.token().token(), TOKEN);
        assert_eq!(secrets.user_token().unwrap().expose_secret(), TOKEN_SECRET);
    }

    #[test]
    fn secrets_with_user_token() {
        let token = UserToken::new(TOKEN, TOKEN_SECRET);
        let secrets = Secrets::new(CONSUMER_KEY, CONSUMER_SECRET).with_user_token(token);
        assert_eq!(secrets.consumer().key(), CONSUMER_KEY);
        assert_eq!(secrets.user_token().map(UserToken::token), Some(TOKEN));
    }

    #[test]
    fn debug_redacts_secrets() {
        let secrets = Secrets::new("my_key", "super_secret_consumer")
            .token("my_token", "super_secret_token");
        let debug_str = format!("{:?}", secrets);

        assert!(debug_str.contains("my_key"));
        assert!(debug_str.contains("my_token"));
        assert!(!debug_str.contains("super_secret_consumer"));
        assert!(!debug_str.contains("super_secret_token"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn validate_rejects_empty_material() {
        assert_eq!(
            ConsumerCredential::new("", "secret").validate(),
            Err(SignError::MissingConsumerKey)
        );
        assert_eq!(
            ConsumerCredential::new("key", "").validate(),
            Err(SignError::MissingConsumerSecret)
        );
        assert!(ConsumerCredential::new("key", "secret").validate().is_ok());
    }

    #[test]
    fn credential_from_lookup() {
        let vars: HashMap<&str, &str> = vec![
            (CONSUMER_KEY_ENV, "env_key"),
            (CONSUMER_SECRET_ENV, "env_secret"),
            (TOKEN_ENV, "env_token"),
        ]
        .into_iter()
        .collect();
        let lookup = |name: &'static str| vars.get(name).map(|v| v.to_string());

        let consumer = ConsumerCredential::from_lookup(lookup).unwrap();
        assert_eq!(consumer.key(), "env_key");
        assert_eq!(consumer.expose_secret(), "env_secret");

        match UserToken::from_lookup(lookup) {
            Err(Error::MissingEnvVar(name)) => assert_eq!(name, TOKEN_SECRET_ENV),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
