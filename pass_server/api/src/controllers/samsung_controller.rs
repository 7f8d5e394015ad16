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
use chrono::Utc;
use log::info;
use provider::{add_to_wallet_url, CardProfile, SamsungCardFields, ValidationError};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::orchestrator;
use crate::state::AppState;
use crate::utils::api_error::ApiError;

const CARD_DATA_KEY: &str = "cdata";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardData {
    pub qr_value: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTokenRequest {
    pub card_data: Option<CardData>,
}

// Samsung callers historically post loose bodies; anything unparsable is
// treated as empty so the field checks produce the error message.
fn lenient<T: DeserializeOwned + Default>(body: &[u8]) -> T {
    serde_json::from_slice(body).unwrap_or_default()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// POST /generate-token
pub async fn generate_token(state: web::Data<AppState>, body: web::Bytes) -> Result<HttpResponse, ApiError> {
    let request: GenerateTokenRequest = lenient(&body);
    let card_data = request.card_data.unwrap_or_default();
    let qr_value = non_blank(card_data.qr_value.as_deref())
        .ok_or_else(|| ValidationError::missing("cardData with qrValue is required"))?;

    let fields = SamsungCardFields::new(qr_value, card_data.title.as_deref(), card_data.subtitle.as_deref())
        .with_description(card_data.description.as_deref());
    let issued = orchestrator::sign_samsung_fields(&state, &fields).await?;
    info!("card token issued for card {}", state.samsung.push.card_id());
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "token": issued.token,
        "partnerCode": state.samsung.partner_code,
        "cardId": state.samsung.push.card_id(),
    })))
}

/// POST /create, body is a card profile; `publicCardUrl` is the card link
pub async fn create_card(state: web::Data<AppState>, body: web::Bytes) -> Result<HttpResponse, ApiError> {
    let profile: CardProfile = lenient(&body);
    let issued = orchestrator::sign_samsung_profile(&state, &profile).await?;
    let samsung = &state.samsung;
    let add_url =
        add_to_wallet_url(&samsung.add_url_prefix, &samsung.cert_id, samsung.push.card_id(), CARD_DATA_KEY, &issued.token);

    let mut body = Map::new();
    body.insert("success".to_string(), Value::Bool(true));
    body.insert("cardId".to_string(), json!(samsung.push.card_id()));
    body.insert("token".to_string(), json!(issued.token));
    body.insert("partnerCode".to_string(), json!(samsung.partner_code));
    body.insert("addUrl".to_string(), json!(add_url));
    if let Some(url) = &samsung.push_card.rd_click_url {
        body.insert("rdClickUrl".to_string(), json!(url));
    }
    if let Some(url) = &samsung.push_card.rd_impression_url {
        body.insert("rdImpressionUrl".to_string(), json!(url));
    }
    Ok(HttpResponse::Ok().json(Value::Object(body)))
}

/// POST /register-card
pub async fn register_card(
    state: web::Data<AppState>,
    profile: web::Json<CardProfile>,
) -> Result<HttpResponse, ApiError> {
    let reference = orchestrator::register_pull(&state, &profile).await?;
    info!("pull reference {} registered for card {}", reference.ref_id, reference.card_id);
    Ok(HttpResponse::Ok().json(json!({
        "cardId": reference.card_id,
        "refId": reference.ref_id,
        "addUrl": reference.add_url,
    })))
}

/// GET /health
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "OK",
        "wallet": "Samsung",
        "partnerCode": state.samsung.partner_code,
        "cardId": state.samsung.push.card_id(),
        "pullCardId": state.samsung.pull.card_id(),
        "googleAvailable": state.google.is_ok(),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_treats_garbage_as_empty() {
        let request: GenerateTokenRequest = lenient(b"not json");
        assert!(request.card_data.is_none());
    }

    #[test]
    fn test_lenient_reads_nested_card_data() {
        let request: GenerateTokenRequest = lenient(br#"{"cardData":{"qrValue":"https://x/y","title":"T"}}"#);
        let card = request.card_data.unwrap();
        assert_eq!(card.qr_value.as_deref(), Some("https://x/y"));
        assert_eq!(card.title.as_deref(), Some("T"));
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  ")), None);
        assert_eq!(non_blank(Some(" a ")), Some("a"));
        assert_eq!(non_blank(None), None);
    }
}
