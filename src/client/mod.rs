//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::domain::{
    ApiId, ApiMsgId, BalanceResult, DiagnosticCode, MessageChargeResult, Password, QueryResult,
    RawPhoneNumber, ResultEnvelope, RouteCoverageResult, SendMessage, SendResult, User,
    ValidationError,
};
use crate::transport::{self, TransportError};

/// Base URL of the Clickatell HTTP API.
pub const DEFAULT_BASE_URL: &str = "http://api.clickatell.com";

const SEND_MESSAGE_PATH: &str = "http/sendmsg";
const GET_BALANCE_PATH: &str = "http/getbalance";
const QUERY_MESSAGE_PATH: &str = "http/querymsg";
const STOP_MESSAGE_PATH: &str = "http/delmsg";
const MESSAGE_CHARGE_PATH: &str = "http/getmsgcharge";
const ROUTE_COVERAGE_PATH: &str = "utils/routeCoverage.php";

/// Environment variable holding the account user name.
pub const ENV_USER: &str = "CLICKATELL_USER";
/// Environment variable holding the account password.
pub const ENV_PASSWORD: &str = "CLICKATELL_PASSWORD";
/// Environment variable holding the HTTP API product id.
pub const ENV_API_ID: &str = "CLICKATELL_API_ID";

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Join an API base URL and an endpoint path.
///
/// A leading `/` on `path` is stripped so it is never doubled:
/// `get_url(DEFAULT_BASE_URL, "/http/sendmsg")` and `get_url(DEFAULT_BASE_URL, "http/sendmsg")`
/// both yield `http://api.clickatell.com/http/sendmsg`.
pub fn get_url(base: &str, path: &str) -> String {
    let base = base.strip_suffix('/').unwrap_or(base);
    let path = path.strip_prefix('/').unwrap_or(path);
    format!("{base}/{path}")
}

/// The network seam: one call, one raw text body.
///
/// Implement this to substitute the HTTP stack (for tests, proxies, or another client).
/// Implementations return the body exactly as the gateway sent it.
pub trait ApiTransport: Send + Sync {
    fn call<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<String, ClickatellError>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl ApiTransport for ReqwestTransport {
    fn call<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<String, ClickatellError>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .form(&params)
                .send()
                .await
                .map_err(|err| ClickatellError::Transport(Box::new(err)))?;
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|err| ClickatellError::Transport(Box::new(err)))?;

            if !(200..=299).contains(&status) {
                let body = if body.trim().is_empty() {
                    None
                } else {
                    Some(body)
                };
                return Err(ClickatellError::HttpStatus { status, body });
            }
            Ok(body)
        })
    }
}

#[derive(Clone)]
/// Account credentials attached to every call (`user`, `password`, `api_id`).
pub struct Credentials {
    user: User,
    password: Password,
    api_id: ApiId,
}

impl Credentials {
    /// Validate and bundle the three credential parts.
    pub fn new(
        user: impl Into<String>,
        password: impl Into<String>,
        api_id: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            user: User::new(user)?,
            password: Password::new(password)?,
            api_id: ApiId::new(api_id)?,
        })
    }

    /// Load credentials from `CLICKATELL_USER`, `CLICKATELL_PASSWORD` and `CLICKATELL_API_ID`.
    pub fn from_env() -> Result<Self, ClickatellError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClickatellError> {
        let read = |var: &'static str| lookup(var).ok_or(ClickatellError::Config { var });
        Ok(Self::new(read(ENV_USER)?, read(ENV_PASSWORD)?, read(ENV_API_ID)?)?)
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn api_id(&self) -> &ApiId {
        &self.api_id
    }

    fn push_form_params(&self, params: &mut Vec<(String, String)>) {
        params.push((User::FIELD.to_owned(), self.user.as_str().to_owned()));
        params.push((Password::FIELD.to_owned(), self.password.as_str().to_owned()));
        params.push((ApiId::FIELD.to_owned(), self.api_id.as_str().to_owned()));
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("api_id", &self.api_id)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`ClickatellClient`] and [`parse_response`].
///
/// Per-recipient send failures are not errors; they are reported inline with
/// `RecipientResult::error`.
pub enum ClickatellError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// The gateway answered with an `ERR:` line.
    #[error("gateway error {code}: {description}")]
    Gateway {
        code: DiagnosticCode,
        description: String,
        message: String,
    },

    /// A required marker was missing or carried an unparseable value.
    #[error("malformed response: {0}")]
    MalformedResponse(#[source] Box<dyn StdError + Send + Sync>),

    /// The configured base URL is not a valid absolute URL.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// A required environment variable is not set.
    #[error("missing configuration: {var} is not set")]
    Config { var: &'static str },

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl From<TransportError> for ClickatellError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Gateway { code, message } => Self::Gateway {
                description: code.error_description().to_owned(),
                code,
                message,
            },
            other => Self::MalformedResponse(Box::new(other)),
        }
    }
}

/// Operation whose response body is being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Send,
    Balance,
    Query,
    StopMessage,
    RouteCoverage,
    MessageCharge,
}

/// Typed record produced by [`parse_response`].
///
/// Serialized as `{"kind": ..., "data": ...}` so that consumers can tell a stop
/// confirmation from a status query even though both carry a [`QueryResult`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum ParsedResponse {
    Send(SendResult),
    Balance(BalanceResult),
    Query(QueryResult),
    StopMessage(QueryResult),
    RouteCoverage(RouteCoverageResult),
    MessageCharge(MessageChargeResult),
}

/// Parse one raw gateway body without performing any I/O.
///
/// `recipients` is only consulted for [`ResponseKind::Send`], where it fixes the order
/// and length of the result.
pub fn parse_response(
    kind: ResponseKind,
    raw: &str,
    recipients: &[RawPhoneNumber],
) -> Result<ResultEnvelope<ParsedResponse>, ClickatellError> {
    let parsed = match kind {
        ResponseKind::Send => {
            ParsedResponse::Send(transport::decode_send_message_response(recipients, raw)?)
        }
        ResponseKind::Balance => ParsedResponse::Balance(transport::decode_balance_response(raw)?),
        ResponseKind::Query => {
            ParsedResponse::Query(transport::decode_query_message_response(raw)?)
        }
        ResponseKind::StopMessage => {
            ParsedResponse::StopMessage(transport::decode_query_message_response(raw)?)
        }
        ResponseKind::RouteCoverage => {
            ParsedResponse::RouteCoverage(transport::decode_route_coverage_response(raw)?)
        }
        ResponseKind::MessageCharge => {
            ParsedResponse::MessageCharge(transport::decode_message_charge_response(raw)?)
        }
    };
    Ok(ResultEnvelope::new(parsed))
}

#[derive(Clone)]
/// Builder for [`ClickatellClient`].
///
/// Use this when you need to customize the base URL, timeout, user-agent, or transport.
pub struct ClickatellClientBuilder {
    credentials: Credentials,
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    transport: Option<Arc<dyn ApiTransport>>,
}

impl ClickatellClientBuilder {
    /// Create a builder with the default base URL and no timeout/user-agent override.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
            user_agent: None,
            transport: None,
        }
    }

    /// Override the API base URL (scheme and host, optionally a path prefix).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Use a custom transport instead of the built-in `reqwest` one.
    ///
    /// `timeout` and `user_agent` are ignored when a transport is supplied.
    pub fn transport(mut self, transport: Arc<dyn ApiTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build a [`ClickatellClient`].
    pub fn build(self) -> Result<ClickatellClient, ClickatellError> {
        url::Url::parse(&self.base_url)?;

        let http = match self.transport {
            Some(transport) => transport,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                if let Some(user_agent) = self.user_agent {
                    builder = builder.user_agent(user_agent);
                }
                let client = builder
                    .build()
                    .map_err(|err| ClickatellError::Transport(Box::new(err)))?;
                Arc::new(ReqwestTransport { client })
            }
        };

        Ok(ClickatellClient {
            credentials: self.credentials,
            base_url: self.base_url,
            http,
        })
    }
}

#[derive(Clone)]
/// High-level Clickatell HTTP API client.
///
/// Every method returns its record wrapped in a [`ResultEnvelope`]. Gateway `ERR:`
/// replies surface as [`ClickatellError::Gateway`], unparseable bodies as
/// [`ClickatellError::MalformedResponse`].
pub struct ClickatellClient {
    credentials: Credentials,
    base_url: String,
    http: Arc<dyn ApiTransport>,
}

impl ClickatellClient {
    /// Create a client using the default base URL.
    ///
    /// For more customization, use [`ClickatellClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_owned(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> ClickatellClientBuilder {
        ClickatellClientBuilder::new(credentials)
    }

    /// Full URL for an endpoint path under this client's base URL.
    pub fn url(&self, path: &str) -> String {
        get_url(&self.base_url, path)
    }

    /// Send a message to one or more recipients (`http/sendmsg`).
    ///
    /// The result holds one entry per requested recipient, in request order. A recipient
    /// the gateway did not confirm is reported with `error: true` rather than failing
    /// the whole call.
    pub async fn send_message(
        &self,
        request: SendMessage,
    ) -> Result<ResultEnvelope<SendResult>, ClickatellError> {
        let body = self
            .call(
                SEND_MESSAGE_PATH,
                transport::encode_send_message_form(&request),
            )
            .await?;
        let results = transport::decode_send_message_response(request.recipients(), &body)?;
        tracing::debug!(
            recipients = results.len(),
            failed = results.iter().filter(|r| r.error).count(),
            "message sent"
        );
        Ok(ResultEnvelope::new(results))
    }

    /// Remaining account credit (`http/getbalance`).
    pub async fn get_balance(&self) -> Result<ResultEnvelope<BalanceResult>, ClickatellError> {
        let body = self.call(GET_BALANCE_PATH, Vec::new()).await?;
        Ok(ResultEnvelope::new(transport::decode_balance_response(
            &body,
        )?))
    }

    /// Delivery status of a sent message (`http/querymsg`).
    pub async fn query_message(
        &self,
        api_msg_id: &ApiMsgId,
    ) -> Result<ResultEnvelope<QueryResult>, ClickatellError> {
        let body = self
            .call(
                QUERY_MESSAGE_PATH,
                transport::encode_api_msg_id_form(api_msg_id),
            )
            .await?;
        Ok(ResultEnvelope::new(
            transport::decode_query_message_response(&body)?,
        ))
    }

    /// Stop delivery of a queued message (`http/delmsg`).
    pub async fn stop_message(
        &self,
        api_msg_id: &ApiMsgId,
    ) -> Result<ResultEnvelope<QueryResult>, ClickatellError> {
        let body = self
            .call(
                STOP_MESSAGE_PATH,
                transport::encode_api_msg_id_form(api_msg_id),
            )
            .await?;
        Ok(ResultEnvelope::new(
            transport::decode_query_message_response(&body)?,
        ))
    }

    /// Whether the gateway can route to `msisdn`, and at what charge.
    pub async fn route_coverage(
        &self,
        msisdn: &RawPhoneNumber,
    ) -> Result<ResultEnvelope<RouteCoverageResult>, ClickatellError> {
        let body = self
            .call(
                ROUTE_COVERAGE_PATH,
                transport::encode_route_coverage_form(msisdn),
            )
            .await?;
        Ok(ResultEnvelope::new(
            transport::decode_route_coverage_response(&body)?,
        ))
    }

    /// Charge and status of a sent message (`http/getmsgcharge`).
    pub async fn get_message_charge(
        &self,
        api_msg_id: &ApiMsgId,
    ) -> Result<ResultEnvelope<MessageChargeResult>, ClickatellError> {
        let body = self
            .call(
                MESSAGE_CHARGE_PATH,
                transport::encode_api_msg_id_form(api_msg_id),
            )
            .await?;
        Ok(ResultEnvelope::new(
            transport::decode_message_charge_response(&body)?,
        ))
    }

    async fn call(
        &self,
        path: &'static str,
        request_params: Vec<(String, String)>,
    ) -> Result<String, ClickatellError> {
        let url = self.url(path);
        let mut params = Vec::<(String, String)>::new();
        self.credentials.push_form_params(&mut params);
        params.extend(request_params);

        tracing::debug!(endpoint = path, "calling gateway");
        let body = self.http.call(&url, params).await?;
        tracing::debug!(endpoint = path, bytes = body.len(), "gateway responded");
        Ok(body)
    }
}
