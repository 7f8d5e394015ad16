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

use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use fetch::FetchError;
use log::{error, warn};
use provider::ValidationError;
use registry::{AuthError, RegistryError};
use serde_json::json;
use thiserror::Error;
use token_management::SigningError;

/// Every failure a handler can surface, with its HTTP mapping.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Registry(RegistryError),
    #[error(transparent)]
    Signing(#[from] SigningError),
    // pull callbacks never fail towards the provider
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RegistryError> for ApiError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::Auth(auth) => ApiError::Auth(auth),
            other => ApiError::Registry(other),
        }
    }
}

impl ApiError {
    pub fn invalid(field: &str, reason: impl ToString) -> Self {
        ApiError::Validation(ValidationError::Invalid { field: field.to_string(), reason: reason.to_string() })
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Auth(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Registry(RegistryError::Upstream { .. }) => StatusCode::BAD_GATEWAY,
            ApiError::Registry(RegistryError::Transport(_)) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Registry(_) => StatusCode::BAD_GATEWAY,
            ApiError::Signing(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Fetch(_) => StatusCode::OK,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = match self {
            ApiError::Validation(e) => {
                warn!("Request validation failed: {}", e);
                json!({ "error": e.to_string() })
            },
            ApiError::Registry(RegistryError::Upstream { status: upstream, detail }) => {
                error!("Registry rejected request: {} {}", upstream, detail);
                json!({ "error": "pass registry request failed", "status": upstream, "detail": detail })
            },
            ApiError::Fetch(e) => {
                error!("Pull callback failed, answering empty: {}", e);
                json!({})
            },
            other => {
                error!("Operation failed: {}", other);
                json!({ "error": other.to_string() })
            },
        };
        HttpResponse::build(status).insert_header(ContentType::json()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_of(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.error_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn test_validation_maps_to_bad_request() {
        let (status, body) = body_of(ValidationError::missing("publicCardUrl required").into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "publicCardUrl required"}));
    }

    #[actix_web::test]
    async fn test_registry_auth_failure_is_unavailable() {
        let err: ApiError = RegistryError::Auth(AuthError::MissingCredentials("key.json".to_string())).into();
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn test_upstream_carries_status_and_detail() {
        let err: ApiError = RegistryError::Upstream { status: 403, detail: "issuer not authorized".to_string() }.into();
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["status"], 403);
        assert_eq!(body["detail"], "issuer not authorized");
    }

    #[actix_web::test]
    async fn test_transport_is_gateway_timeout() {
        let err: ApiError = RegistryError::Transport("timed out".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[actix_web::test]
    async fn test_fetch_failure_answers_empty_ok() {
        let (status, body) = body_of(FetchError::Repository("down".to_string()).into()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({}));
    }
}
