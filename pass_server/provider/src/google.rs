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

use registry::{ObjectAttribute, ObjectState, WalletClassDescriptor, WalletObjectRecord};
use serde_json::{json, Map, Value};

use crate::error::ValidationError;
use crate::model::{CardProfile, FlowKind, ProviderAdapter, ProviderFlow, PushPayload, DEFAULT_TITLE};
use crate::policy::{background_color, derive_user_id, secure_image_url};

const LANGUAGE: &str = "en";

/// Builds the Google Wallet generic class and object for a card.
///
/// Object ids are `{issuer}.{user_id}` and the class id is
/// `{issuer}.{class_suffix}`, so repeated builds for one user converge.
#[derive(Debug, Clone)]
pub struct GoogleAdapter {
    issuer_id: String,
    class_suffix: String,
}

impl GoogleAdapter {
    pub fn new(issuer_id: impl Into<String>, class_suffix: impl Into<String>) -> Self {
        Self { issuer_id: issuer_id.into(), class_suffix: class_suffix.into() }
    }

    pub fn class_id(&self) -> String {
        format!("{}.{}", self.issuer_id, self.class_suffix)
    }

    pub fn object_id(&self, user_id: &str) -> String {
        format!("{}.{}", self.issuer_id, user_id)
    }

    pub fn class_descriptor(&self) -> WalletClassDescriptor {
        WalletClassDescriptor { id: self.class_id(), class_template_info: class_template() }
    }

    /// Same as `build`, with a caller supplied user id taking precedence over
    /// the one derived from the public card url.
    pub fn build_for_user(&self, user_id: Option<&str>, profile: &CardProfile) -> Result<ProviderFlow, ValidationError> {
        let user_id = derive_user_id(user_id, profile.public_card_url())?;
        let object = self.object_record(&user_id, profile);
        Ok(ProviderFlow::Push(PushPayload::Registry { class: self.class_descriptor(), object }))
    }

    fn object_record(&self, user_id: &str, profile: &CardProfile) -> WalletObjectRecord {
        let mut presentation = Map::new();
        let title = profile.company_name.as_deref().map(str::trim).filter(|v| !v.is_empty()).unwrap_or(DEFAULT_TITLE);
        presentation.insert("cardTitle".to_string(), localized(title));
        presentation.insert("header".to_string(), localized(profile.full_name().unwrap_or(DEFAULT_TITLE)));
        presentation.insert("subheader".to_string(), localized(&profile.subtitle()));
        if let Some(uri) = secure_image_url(profile.avatar_url.as_deref()) {
            presentation.insert("logo".to_string(), image(&uri));
        }
        if let Some(uri) = secure_image_url(profile.banner_url.as_deref()) {
            presentation.insert("heroImage".to_string(), image(&uri));
        }
        presentation.insert(
            "hexBackgroundColor".to_string(),
            json!(background_color(profile.theme_color.as_deref())),
        );

        let attributes = profile
            .contact_rows()
            .into_iter()
            .map(|(id, header, body)| ObjectAttribute { id: id.to_string(), header: header.to_string(), body: body.to_string() })
            .collect();

        WalletObjectRecord {
            id: self.object_id(user_id),
            class_id: self.class_id(),
            state: ObjectState::Active,
            attributes,
            barcode_value: profile.public_card_url().map(str::to_string),
            presentation,
        }
    }
}

impl ProviderAdapter for GoogleAdapter {
    fn name(&self) -> &'static str {
        "google"
    }

    fn flow_kind(&self) -> FlowKind {
        FlowKind::Push
    }

    fn build(&self, profile: &CardProfile) -> Result<ProviderFlow, ValidationError> {
        self.build_for_user(None, profile)
    }
}

fn localized(value: &str) -> Value {
    json!({ "defaultValue": { "language": LANGUAGE, "value": value } })
}

fn image(uri: &str) -> Value {
    json!({ "sourceUri": { "uri": uri } })
}

fn field(id: &str) -> Value {
    json!({ "firstValue": { "fields": [{ "fieldPath": format!("object.textModulesData['{}']", id) }] } })
}

/// Card rows reference object text modules by id.
fn class_template() -> Value {
    json!({
        "cardTemplateOverride": {
            "cardRowTemplateInfos": [
                { "twoItems": { "startItem": field("email"), "endItem": field("phone") } },
                { "oneItem": { "item": field("website") } },
                { "oneItem": { "item": field("address") } }
            ]
        }
    })
}
