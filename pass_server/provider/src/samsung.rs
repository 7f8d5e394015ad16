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

use chrono::Utc;
use serde_json::{json, Map, Value};
use url::form_urlencoded::byte_serialize;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::model::{
    text, CardProfile, FlowKind, ProviderAdapter, ProviderFlow, PullReference, PushPayload, DEFAULT_SUBTITLE,
    DEFAULT_TITLE,
};
use crate::policy::{background_color, font_color, secure_image_url};

const CARD_TYPE: &str = "generic";
const CARD_SUB_TYPE: &str = "others";
const LANGUAGE: &str = "en";
const SERIAL_TYPE_QR: &str = "QRCODE";

/// Visible attributes of a generic Samsung card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamsungCardFields {
    pub title: String,
    pub subtitle: String,
    /// Opened when the card is tapped; also encoded as the QR serial.
    pub app_link_data: String,
    pub description: Option<String>,
    pub bg_color: String,
    pub font_color: String,
    pub logo_image: Option<String>,
    pub bg_image: Option<String>,
    pub text_rows: Vec<String>,
}

impl SamsungCardFields {
    /// Minimal card: defaults for everything except the link.
    pub fn new(app_link_data: impl Into<String>, title: Option<&str>, subtitle: Option<&str>) -> Self {
        let bg_color = background_color(None);
        Self {
            title: non_blank(title).unwrap_or(DEFAULT_TITLE).to_string(),
            subtitle: non_blank(subtitle).unwrap_or(DEFAULT_SUBTITLE).to_string(),
            app_link_data: app_link_data.into(),
            description: None,
            font_color: font_color(&bg_color).to_string(),
            bg_color,
            logo_image: None,
            bg_image: None,
            text_rows: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: Option<&str>) -> Self {
        self.description = non_blank(description).map(str::to_string);
        self
    }

    /// Full card from a profile. Images failing the url policy are left out.
    pub fn from_profile(profile: &CardProfile, app_link_data: &str) -> Self {
        let bg_color = background_color(profile.theme_color.as_deref());
        Self {
            title: profile.full_name().unwrap_or(DEFAULT_TITLE).to_string(),
            subtitle: profile.subtitle(),
            app_link_data: app_link_data.to_string(),
            description: text(&profile.company_name).map(str::to_string),
            font_color: font_color(&bg_color).to_string(),
            bg_color,
            logo_image: secure_image_url(profile.avatar_url.as_deref()),
            bg_image: secure_image_url(profile.banner_url.as_deref()),
            text_rows: profile.contact_rows().into_iter().map(|(_, _, value)| value.to_string()).collect(),
        }
    }

    fn attributes(&self) -> Map<String, Value> {
        let mut attributes = Map::new();
        attributes.insert("title".to_string(), json!(self.title));
        attributes.insert("subtitle".to_string(), json!(self.subtitle));
        attributes.insert("appLinkData".to_string(), json!(self.app_link_data));
        attributes.insert("bgColor".to_string(), json!(self.bg_color));
        attributes.insert("fontColor".to_string(), json!(self.font_color));
        if let Some(description) = &self.description {
            attributes.insert("description".to_string(), json!(description));
        }
        if let Some(logo) = &self.logo_image {
            attributes.insert("logoImage".to_string(), json!(logo));
        }
        if let Some(bg) = &self.bg_image {
            attributes.insert("bgImage".to_string(), json!(bg));
        }
        for (index, row) in self.text_rows.iter().enumerate() {
            attributes.insert(format!("text{}", index + 1), json!(row));
        }
        attributes.insert("serial1.value".to_string(), json!(self.app_link_data));
        attributes.insert("serial1.serialType".to_string(), json!(SERIAL_TYPE_QR));
        attributes
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// The `card` object shared by the push token and the pull fetch answer.
/// Timestamps are epoch milliseconds.
pub fn card_object(fields: &SamsungCardFields, ref_id: &str, created_at: i64, updated_at: i64) -> Value {
    json!({
        "type": CARD_TYPE,
        "subType": CARD_SUB_TYPE,
        "data": [{
            "refId": ref_id,
            "createdAt": created_at,
            "updatedAt": updated_at,
            "language": LANGUAGE,
            "attributes": fields.attributes(),
        }]
    })
}

/// Answer to a provider fetch, computed only from the stored snapshot.
pub fn fetch_payload(ref_id: &str, profile: &CardProfile, created_at: i64, updated_at: i64) -> Value {
    let fields = SamsungCardFields::from_profile(profile, profile.public_card_url().unwrap_or_default());
    json!({
        "refId": ref_id,
        "card": card_object(&fields, ref_id, created_at, updated_at),
    })
}

/// `{prefix}/{cert_id}/{card_id}#Clip?{key}={value}`
pub fn add_to_wallet_url(prefix: &str, cert_id: &str, card_id: &str, key: &str, value: &str) -> String {
    let encoded: String = byte_serialize(value.as_bytes()).collect();
    format!("{}/{}/{}#Clip?{}={}", prefix.trim_end_matches('/'), cert_id, card_id, key, encoded)
}

/// Push flow: the card travels inside the signed `cdata` token.
#[derive(Debug, Clone)]
pub struct SamsungPushAdapter {
    card_id: String,
}

impl SamsungPushAdapter {
    pub fn new(card_id: impl Into<String>) -> Self {
        Self { card_id: card_id.into() }
    }

    pub fn card_id(&self) -> &str {
        &self.card_id
    }

    /// Card object with a fresh reference id.
    pub fn build_card(&self, fields: &SamsungCardFields) -> Value {
        let now = Utc::now().timestamp_millis();
        card_object(fields, &Uuid::new_v4().to_string(), now, now)
    }
}

impl ProviderAdapter for SamsungPushAdapter {
    fn name(&self) -> &'static str {
        "samsung-push"
    }

    fn flow_kind(&self) -> FlowKind {
        FlowKind::Push
    }

    fn build(&self, profile: &CardProfile) -> Result<ProviderFlow, ValidationError> {
        let link = profile.require_public_card_url()?;
        let card = self.build_card(&SamsungCardFields::from_profile(profile, link));
        Ok(ProviderFlow::Push(PushPayload::Embedded { card }))
    }
}

/// Pull flow: the link carries only a reference the provider fetches later.
#[derive(Debug, Clone)]
pub struct SamsungPullAdapter {
    cert_id: String,
    card_id: String,
    add_url_prefix: String,
}

impl SamsungPullAdapter {
    pub fn new(cert_id: impl Into<String>, card_id: impl Into<String>, add_url_prefix: impl Into<String>) -> Self {
        Self { cert_id: cert_id.into(), card_id: card_id.into(), add_url_prefix: add_url_prefix.into() }
    }

    pub fn card_id(&self) -> &str {
        &self.card_id
    }
}

impl ProviderAdapter for SamsungPullAdapter {
    fn name(&self) -> &'static str {
        "samsung-pull"
    }

    fn flow_kind(&self) -> FlowKind {
        FlowKind::Pull
    }

    fn build(&self, profile: &CardProfile) -> Result<ProviderFlow, ValidationError> {
        profile.require_public_card_url()?;
        let ref_id = Uuid::new_v4().to_string();
        let add_url = add_to_wallet_url(&self.add_url_prefix, &self.cert_id, &self.card_id, "pdata", &ref_id);
        Ok(ProviderFlow::Pull(PullReference {
            card_id: self.card_id.clone(),
            ref_id,
            add_url,
            profile: profile.clone(),
        }))
    }
}
