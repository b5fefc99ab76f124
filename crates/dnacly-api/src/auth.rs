use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::Error;

/// Credentials for authenticating with a DNA Center controller.
///
/// Immutable once loaded. The controller is always reached over HTTPS at
/// `https://{host}:{port}`.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            username: username.into(),
            password,
        }
    }

    /// The controller root URL derived from host and port.
    pub fn base_url(&self) -> Result<Url, Error> {
        let host = self.host.trim().trim_end_matches('/');
        Ok(Url::parse(&format!("https://{host}:{}", self.port))?)
    }
}

/// Opaque bearer credential issued by the controller.
///
/// Sent as the `X-Auth-Token` header. Never empty: [`Token::new`] refuses
/// blank input, so holding a `Token` means holding something to send.
/// The client tracks no expiry; the controller decides when it goes stale.
#[derive(Clone)]
pub struct Token(SecretString);

impl Token {
    /// Wrap a raw token string. Returns `None` for empty or whitespace input.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return None;
        }
        Some(Self(SecretString::from(raw)))
    }

    /// The raw token value, for headers and explicit display.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token([REDACTED])")
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for Token {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_is_rejected() {
        assert!(Token::new("").is_none());
        assert!(Token::new("   ").is_none());
        assert_eq!(Token::new("abc").map(|t| t.expose().to_owned()), Some("abc".into()));
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = Token::new("super-secret").unwrap();
        assert_eq!(format!("{token:?}"), "Token([REDACTED])");
    }

    #[test]
    fn base_url_uses_https_and_port() {
        let creds = Credentials::new(
            "sandboxdnac.cisco.com",
            443,
            "devnetuser",
            SecretString::from("pw".to_string()),
        );
        assert_eq!(
            creds.base_url().unwrap().as_str(),
            "https://sandboxdnac.cisco.com/"
        );

        let creds =
            Credentials::new("10.1.1.1", 8443, "admin", SecretString::from("pw".to_string()));
        assert_eq!(creds.base_url().unwrap().as_str(), "https://10.1.1.1:8443/");
    }

    #[test]
    fn credentials_debug_hides_password() {
        let creds = Credentials::new("h", 443, "u", SecretString::from("hunter2".to_string()));
        assert!(!format!("{creds:?}").contains("hunter2"));
    }
}
