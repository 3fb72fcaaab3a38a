use std::time::Duration;

use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Client, Method, StatusCode,
};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};

use crate::{
    config::Config,
    credentials::Credential,
    error::{Error, Result, Stage},
};

#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountStatus {
    #[serde(default)]
    pub gems: u64,
    #[serde(default, deserialize_with = "epoch_millis")]
    pub next_free_gems_at: Option<i64>,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClaimResult {
    #[serde(default)]
    pub gems: u64,
    #[serde(default, deserialize_with = "epoch_millis")]
    pub next_free_gems_at: Option<i64>,
}

// The API sends a JSON number, which is not always integral.
fn epoch_millis<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?
        .filter(|millis| millis.is_finite())
        .map(|millis| millis.floor() as i64))
}

#[derive(Deserialize)]
struct AccountResponse {
    #[serde(default)]
    user: AccountStatus,
}

#[derive(Deserialize)]
struct ClaimResponse {
    user: ClaimResult,
}

pub struct RequestParams<'a, S: Serialize> {
    pub url: &'a str,
    pub method: Method,
    pub body: Option<S>,
    pub stage: Stage,
}

pub struct GemsApi {
    client: Client,
    account_url: String,
    claim_url: String,
    session_cookie_name: Option<String>,
    base_headers: HeaderMap,
}

impl GemsApi {
    pub fn new(config: &Config) -> eyre::Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            account_url: config.account_url(),
            claim_url: config.claim_url(),
            session_cookie_name: config.session_cookie_name.clone(),
            base_headers: get_headers(config)?,
        })
    }

    pub fn auth_headers(&self, credential: &Credential) -> Result<HeaderMap> {
        let mut headers = self.base_headers.clone();

        let (name, value) = match (credential, &self.session_cookie_name) {
            (Credential::Cookie(cookies), _) | (Credential::Account { cookies, .. }, _) => {
                (reqwest::header::COOKIE, cookies.clone())
            }
            (Credential::Token(token), Some(cookie_name)) => {
                (reqwest::header::COOKIE, format!("{cookie_name}={token}"))
            }
            (Credential::Token(token), None) => {
                (reqwest::header::AUTHORIZATION, format!("Bearer {token}"))
            }
        };

        let invalid = Error::InvalidHeader {
            name: if name == reqwest::header::COOKIE {
                "cookie"
            } else {
                "authorization"
            },
        };
        let mut value = HeaderValue::from_str(&value).map_err(|_| invalid)?;
        value.set_sensitive(true);
        headers.insert(name, value);

        Ok(headers)
    }

    pub async fn account_status(&self, headers: &HeaderMap) -> Result<AccountStatus> {
        let request_params = RequestParams::<()> {
            url: &self.account_url,
            method: Method::GET,
            body: None,
            stage: Stage::Account,
        };

        let (status, text) = self.send_http_request(&request_params, headers).await?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::Auth { status });
        }
        if !status.is_success() {
            return Err(Error::Http {
                stage: Stage::Account,
                status,
                body: text,
            });
        }

        let response: AccountResponse = decode(&text, Stage::Account)?;
        Ok(response.user)
    }

    pub async fn claim_free_gems(&self, headers: &HeaderMap) -> Result<ClaimResult> {
        let request_params = RequestParams {
            url: &self.claim_url,
            method: Method::POST,
            body: Some(serde_json::json!({})),
            stage: Stage::Claim,
        };

        let (status, text) = self.send_http_request(&request_params, headers).await?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::CooldownRejected { body: text });
        }
        if !status.is_success() {
            return Err(Error::Http {
                stage: Stage::Claim,
                status,
                body: text,
            });
        }

        let response: ClaimResponse = decode(&text, Stage::Claim)?;
        Ok(response.user)
    }

    // Status codes are left to the caller.
    async fn send_http_request(
        &self,
        request_params: &RequestParams<'_, impl Serialize>,
        headers: &HeaderMap,
    ) -> Result<(StatusCode, String)> {
        let stage = request_params.stage;
        let mut request = self
            .client
            .request(request_params.method.clone(), request_params.url)
            .headers(headers.clone());

        if let Some(body) = &request_params.body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .inspect_err(|e| tracing::debug!("Request failed: {e}"))
            .map_err(|source| Error::Network { stage, source })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .inspect_err(|e| tracing::debug!("Failed to retrieve response text: {e}"))
            .map_err(|source| Error::Network { stage, source })?;

        tracing::debug!(%status, url = request_params.url, "response received");

        Ok((status, text))
    }
}

fn decode<T: DeserializeOwned>(text: &str, stage: Stage) -> Result<T> {
    serde_json::from_str(text).map_err(|e| Error::InvalidResponse {
        stage,
        reason: e.to_string(),
    })
}

fn get_headers(config: &Config) -> eyre::Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    headers.insert(
        HeaderName::from_static("accept"),
        HeaderValue::from_static("application/json"),
    );
    headers.insert(
        HeaderName::from_static("content-type"),
        HeaderValue::from_static("application/json"),
    );
    headers.insert(
        HeaderName::from_static("user-agent"),
        HeaderValue::from_str(&config.user_agent)?,
    );
    headers.insert(
        HeaderName::from_static("origin"),
        HeaderValue::from_str(config.base_url())?,
    );
    headers.insert(
        HeaderName::from_static("referer"),
        HeaderValue::from_str(&format!("{}/gems", config.base_url()))?,
    );

    Ok(headers)
}
