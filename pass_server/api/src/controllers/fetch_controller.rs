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

//! Callbacks the wallet provider makes against pull-flow references.

use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use fetch::PullResponse;
use log::debug;
use serde::Deserialize;

use crate::state::AppState;
use crate::utils::api_error::ApiError;

#[derive(Debug, Deserialize)]
pub struct CardEventQuery {
    pub event: Option<String>,
}

fn to_http(response: PullResponse) -> HttpResponse {
    HttpResponse::build(StatusCode::from_u16(response.status).unwrap_or(StatusCode::OK)).json(response.body)
}

/// GET /cards/{card_id}/{ref_id}
pub async fn get_card(state: web::Data<AppState>, path: web::Path<(String, String)>) -> Result<HttpResponse, ApiError> {
    let (card_id, ref_id) = path.into_inner();
    let response = state.fetch.fetch(&card_id, &ref_id).await?;
    Ok(to_http(response))
}

/// POST /cards/{card_id}/{ref_id}, the body is ignored
pub async fn post_card(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (card_id, ref_id) = path.into_inner();
    let event = web::Query::<CardEventQuery>::from_query(req.query_string())
        .ok()
        .and_then(|query| query.into_inner().event);
    let response = state.fetch.acknowledge(&card_id, &ref_id, event.as_deref()).await?;
    Ok(to_http(response))
}

/// Any other shape or method under /cards
pub async fn unknown_card(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let info = req.match_info();
    let card_id = info.get("card_id").or_else(|| info.get("tail")).unwrap_or_default();
    let ref_id = info.get("ref_id").unwrap_or_default();
    debug!("unmatched card callback {} {}", req.method(), req.path());
    to_http(state.fetch.unknown(card_id, ref_id))
}
