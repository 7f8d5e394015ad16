/*
 * Copyright (c) Huawei Technologies Co., Ltd. 2025. All rights reserved.
 * Wallet Pass Service is licensed under the Mulan PSL v2.
 * You can use this software according to the terms and conditions of the Mulan PSL v2.
 * You may obtain a copy of Mulan PSL v2 at:
 *     http://license.coscl.org.cn/MulanPSL2
 * THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND, EITHER EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR
 * PURPOSE.
 * See the Mulan PSL v2 for more details.
 */

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
#[cfg(test)]
use mockall::automock;
use serde_json::Value;

use crate::auth::AuthClientCache;
use crate::error::RegistryError;
use crate::retry::send_with_single_retry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryMethod {
    Get,
    Post,
    Put,
}

impl fmt::Display for RegistryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RegistryMethod::Get => "GET",
            RegistryMethod::Post => "POST",
            RegistryMethod::Put => "PUT",
        };
        f.write_str(name)
    }
}

/// A request relative to the registry base url
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryRequest {
    pub method: RegistryMethod,
    pub path: String,
    pub body: Option<Value>,
}

impl RegistryRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self { method: RegistryMethod::Get, path: path.into(), body: None }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self { method: RegistryMethod::Post, path: path.into(), body: Some(body) }
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self { method: RegistryMethod::Put, path: path.into(), body: Some(body) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryResponse {
    pub status: u16,
    pub body: String,
}

impl RegistryResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one registry request. Any HTTP status is a successful send; only
/// failures to get a response at all are errors.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RegistryTransport: Send + Sync {
    async fn execute(&self, request: RegistryRequest) -> Result<RegistryResponse, RegistryError>;
}

/// reqwest transport authenticated through the shared `AuthClientCache`
pub struct HttpRegistryTransport {
    auth: Arc<AuthClientCache>,
    base_url: String,
}

impl HttpRegistryTransport {
    pub fn new(auth: Arc<AuthClientCache>, base_url: impl Into<String>) -> Self {
        Self { auth, base_url: base_url.into().trim_end_matches('/').to_string() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl RegistryTransport for HttpRegistryTransport {
    async fn execute(&self, request: RegistryRequest) -> Result<RegistryResponse, RegistryError> {
        let client = self.auth.get_client().await?;
        let token = client.bearer_token().await?;
        let url = self.url(&request.path);
        debug!("registry {} {}", request.method, url);

        let response = send_with_single_retry(|| {
            let builder = match request.method {
                RegistryMethod::Get => client.http().get(&url),
                RegistryMethod::Post => client.http().post(&url),
                RegistryMethod::Put => client.http().put(&url),
            };
            let builder = builder.bearer_auth(&token);
            match &request.body {
                Some(body) => builder.json(body),
                None => builder,
            }
        })
        .await
        .map_err(|e| RegistryError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| RegistryError::Transport(e.to_string()))?;
        debug!("registry {} {} -> {}", request.method, url, status);
        Ok(RegistryResponse { status, body })
    }
}
