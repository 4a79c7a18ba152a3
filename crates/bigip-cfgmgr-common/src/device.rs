//! iControl REST device access.
//!
//! The managers never talk HTTP directly; they go through the [`DeviceApi`]
//! trait, which models the resource-oriented surface of the device
//! (existence check, load, create, modify, delete). [`RestClient`] is the
//! production implementation: token-authenticated iControl REST over HTTPS.
//!
//! One session per run. The login token is acquired in
//! [`RestClient::connect`] and revoked best-effort by
//! [`RestClient::cleanup_token`] at the end of the run.

use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::{CfgMgrError, CfgMgrResult};

/// Header carrying the session token on every authenticated request.
pub const AUTH_TOKEN_HEADER: &str = "X-F5-Auth-Token";

const LOGIN_URI: &str = "/mgmt/shared/authn/login";
const TOKENS_URI: &str = "/mgmt/shared/authz/tokens";

/// Connection parameters for the device management endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionParams {
    /// Management address or hostname.
    pub server: String,

    /// Management port.
    #[serde(default = "default_server_port")]
    pub server_port: u16,

    /// Username for token login.
    pub user: String,

    /// Password for token login.
    pub password: String,

    /// Whether to validate the device TLS certificate.
    ///
    /// Management endpoints commonly run with self-signed certificates,
    /// so this can be turned off per run.
    #[serde(default = "default_validate_certs")]
    pub validate_certs: bool,
}

fn default_server_port() -> u16 {
    443
}

fn default_validate_certs() -> bool {
    true
}

/// Encodes a partitioned resource name the way iControl REST expects.
///
/// ```
/// use bigip_cfgmgr_common::device::resource_path;
///
/// assert_eq!(resource_path("Common", "my_profile"), "~Common~my_profile");
/// ```
pub fn resource_path(partition: &str, name: &str) -> String {
    format!("~{}~{}", partition, name)
}

/// Resource-oriented device operations used by the managers.
///
/// Paths are full management URIs (e.g.
/// `/mgmt/tm/ltm/profile/client-ssl/~Common~my_profile`).
#[async_trait]
pub trait DeviceApi: Send + Sync {
    /// Checks whether the resource at `path` exists.
    async fn exists(&self, path: &str) -> CfgMgrResult<bool>;

    /// Loads the resource at `path` as raw JSON.
    async fn load(&self, path: &str) -> CfgMgrResult<Value>;

    /// Creates a resource under the `collection` URI.
    async fn create(&self, collection: &str, body: &Value) -> CfgMgrResult<()>;

    /// Applies a partial update to the resource at `path`.
    async fn modify(&self, path: &str, body: &Value) -> CfgMgrResult<()>;

    /// Deletes the resource at `path`.
    async fn delete(&self, path: &str) -> CfgMgrResult<()>;
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
    #[serde(rename = "loginProviderName")]
    login_provider_name: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: LoginToken,
}

#[derive(Debug, Deserialize)]
struct LoginToken {
    token: String,
}

/// Token-authenticated iControl REST client.
pub struct RestClient {
    http: Client,
    base: String,
    token: String,
}

impl RestClient {
    /// Connects to the device and performs a token login.
    #[instrument(skip(conn), fields(server = %conn.server))]
    pub async fn connect(conn: &ConnectionParams) -> CfgMgrResult<Self> {
        let http = Client::builder()
            .danger_accept_invalid_certs(!conn.validate_certs)
            .build()
            .map_err(|e| CfgMgrError::device("connect", e.to_string()))?;

        let base = format!("https://{}:{}", conn.server, conn.server_port);

        let body = LoginRequest {
            username: &conn.user,
            password: &conn.password,
            login_provider_name: "tmos",
        };
        let resp = http
            .post(format!("{}{}", base, LOGIN_URI))
            .json(&body)
            .send()
            .await
            .map_err(|e| CfgMgrError::device("login", e.to_string()))?;
        let resp = expect_success("login", resp).await?;
        let login: LoginResponse = resp
            .json()
            .await
            .map_err(|e| CfgMgrError::device("login", e.to_string()))?;

        debug!("Token login succeeded");
        Ok(Self {
            http,
            base,
            token: login.token.token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn request(
        &self,
        op: &str,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> CfgMgrResult<Response> {
        let mut req = self
            .http
            .request(method, self.url(path))
            .header(AUTH_TOKEN_HEADER, &self.token);
        if let Some(body) = body {
            req = req.json(body);
        }
        req.send()
            .await
            .map_err(|e| CfgMgrError::device(op, e.to_string()))
    }

    /// Revokes the session token.
    ///
    /// Best-effort: a failure here must never mask the module result, so it
    /// is logged at debug level and otherwise discarded.
    pub async fn cleanup_token(&self) {
        let path = format!("{}/{}", TOKENS_URI, self.token);
        match self.request("logout", Method::DELETE, &path, None).await {
            Ok(resp) if resp.status().is_success() => debug!("Session token revoked"),
            Ok(resp) => debug!(status = %resp.status(), "Token revocation rejected"),
            Err(e) => debug!(error = %e, "Token revocation failed"),
        }
    }
}

/// Maps an existence-probe status to a presence verdict.
///
/// 404 means the resource is absent, any success status means present,
/// anything else is a device error the caller must surface.
fn presence_from_status(status: StatusCode) -> Option<bool> {
    match status {
        StatusCode::NOT_FOUND => Some(false),
        status if status.is_success() => Some(true),
        _ => None,
    }
}

async fn expect_success(op: &str, resp: Response) -> CfgMgrResult<Response> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        let text = resp.text().await.unwrap_or_default();
        Err(CfgMgrError::device(op, format!("{} {}", status, text)))
    }
}

#[async_trait]
impl DeviceApi for RestClient {
    async fn exists(&self, path: &str) -> CfgMgrResult<bool> {
        let resp = self.request("exists", Method::GET, path, None).await?;
        let status = resp.status();
        match presence_from_status(status) {
            Some(found) => Ok(found),
            None => {
                let text = resp.text().await.unwrap_or_default();
                Err(CfgMgrError::device("exists", format!("{} {}", status, text)))
            }
        }
    }

    async fn load(&self, path: &str) -> CfgMgrResult<Value> {
        let resp = self.request("load", Method::GET, path, None).await?;
        let resp = expect_success("load", resp).await?;
        resp.json()
            .await
            .map_err(|e| CfgMgrError::device("load", e.to_string()))
    }

    async fn create(&self, collection: &str, body: &Value) -> CfgMgrResult<()> {
        let resp = self
            .request("create", Method::POST, collection, Some(body))
            .await?;
        expect_success("create", resp).await?;
        Ok(())
    }

    async fn modify(&self, path: &str, body: &Value) -> CfgMgrResult<()> {
        let resp = self
            .request("modify", Method::PATCH, path, Some(body))
            .await?;
        expect_success("modify", resp).await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> CfgMgrResult<()> {
        let resp = self.request("delete", Method::DELETE, path, None).await?;
        expect_success("delete", resp).await?;
        Ok(())
    }
}
