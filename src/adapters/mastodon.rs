//! Mastodon notifier adapter.
//!
//! Implements [`NotifierPort`] by posting a public status through the
//! Mastodon REST API (`POST /api/v1/statuses`) with a bearer token.
//!
//! The client is blocking, like the rest of the monitor: a publish call
//! holds the loop until the server answers or the request times out.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::app::ports::NotifierPort;
use crate::error::{Error, NotifyError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct MastodonNotifier {
    client: Client,
    endpoint: String,
    token: String,
}

impl MastodonNotifier {
    /// `instance` is a host name such as `botsin.space`, with or without an
    /// `http(s)://` prefix.  The token is trimmed and must then be non-empty
    /// visible ASCII.
    pub fn new(instance: &str, token: &str) -> Result<Self, Error> {
        let token = token.trim();
        if !is_header_token(token) {
            return Err(Error::Config("access token must be visible ASCII without spaces"));
        }
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| NotifyError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: status_endpoint(instance),
            token: token.to_owned(),
        })
    }
}

impl NotifierPort for MastodonNotifier {
    fn publish(&mut self, message: &str) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .form(&[("status", message), ("visibility", "public")])
            .send()
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(NotifyError::Rejected(status.as_u16()))
        }
    }
}

/// Bearer tokens are a single run of `0x21..=0x7E` bytes.
fn is_header_token(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_graphic())
}

/// Statuses are always posted over TLS, whatever scheme the instance was
/// configured with.
fn status_endpoint(instance: &str) -> String {
    let instance = instance.trim();
    let host = instance
        .strip_prefix("https://")
        .or_else(|| instance.strip_prefix("http://"))
        .unwrap_or(instance)
        .trim_end_matches('/');
    format!("https://{host}/api/v1/statuses")
}
