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

use actix_web::{web, HttpResponse};
use log::info;
use provider::CardProfile;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::orchestrator;
use crate::state::AppState;
use crate::utils::api_error::ApiError;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PassRequest {
    #[validate(length(min = 1, max = 128))]
    pub user_id: Option<String>,
    #[serde(flatten)]
    pub profile: CardProfile,
}

impl PassRequest {
    fn checked(request: web::Json<PassRequest>) -> Result<PassRequest, ApiError> {
        let request = request.into_inner();
        request.validate().map_err(|e| ApiError::invalid("userId", e))?;
        Ok(request)
    }
}

/// POST /create-pass
pub async fn create_pass(
    state: web::Data<AppState>,
    request: web::Json<PassRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = PassRequest::checked(request)?;
    let pass = orchestrator::provision_pass(&state, request.user_id.as_deref(), &request.profile).await?;
    Ok(HttpResponse::Ok().json(json!({ "saveUrl": pass.save_url, "objectId": pass.object_id })))
}

/// POST /update-pass
pub async fn update_pass(
    state: web::Data<AppState>,
    request: web::Json<PassRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = PassRequest::checked(request)?;
    let google = state.google()?;
    let object_id = orchestrator::update_pass(google, request.user_id.as_deref(), &request.profile).await?;
    info!("pass {} updated", object_id);
    Ok(HttpResponse::Ok().json(json!({ "objectId": object_id })))
}

/// POST /init-class
pub async fn init_class(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let class_id = orchestrator::init_class(state.google()?).await?;
    Ok(HttpResponse::Ok().json(json!({ "classId": class_id })))
}
