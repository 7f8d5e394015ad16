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

use thiserror::Error;

/// Failure to obtain an authenticated registry client.
///
/// Cloneable because the first failure is cached and handed to every later caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("registry credentials missing: {0}")]
    MissingCredentials(String),
    #[error("registry credentials invalid: {0}")]
    InvalidCredentials(String),
    #[error("token exchange rejected with status {status}: {detail}")]
    Rejected { status: u16, detail: String },
    #[error("token exchange failed: {0}")]
    Transport(String),
}

impl AuthError {
    /// Failures that cannot heal without a restart. Transport errors can.
    pub fn is_permanent(&self) -> bool {
        !matches!(self, AuthError::Transport(_))
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("registry answered {status}: {detail}")]
    Upstream { status: u16, detail: String },
    #[error("registry unreachable: {0}")]
    Transport(String),
    #[error("registry payload error: {0}")]
    Serialization(String),
}

impl RegistryError {
    /// Builds an upstream error from a raw response body, preferring the
    /// registry's own `error.message` when the body is JSON.
    pub fn upstream(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| value.pointer("/error/message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or_else(|| body.chars().take(512).collect());
        RegistryError::Upstream { status, detail }
    }
}
