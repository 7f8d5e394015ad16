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

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::rt::time::sleep;
use actix_web::web;
use async_trait::async_trait;
use config_manager::types::context::SamsungCardConfig;
use fetch::{FetchFlowResponder, InMemoryPullRecordRepository, UnknownReferencePolicy};
use openssl::rsa::Rsa;
use provider::{GoogleAdapter, SamsungPullAdapter, SamsungPushAdapter};
use registry::{
    AuthError, PassRegistryClient, RegistryError, RegistryMethod, RegistryRequest, RegistryResponse,
    RegistryTransport,
};
use serde_json::Value;
use token_management::{CardTokenSigner, SaveLinkSigner, SigningKey};
use wallet_passd::state::{AppState, GoogleProvisioning, SamsungProvisioning};

pub const ISSUER: &str = "3388000000022195611";
pub const PARTNER: &str = "4137610299143138240";

/// In-process registry deduplicating by id, optionally slow.
#[derive(Default)]
pub struct FakeRegistry {
    pub classes: Mutex<HashMap<String, Value>>,
    pub objects: Mutex<HashMap<String, Value>>,
    pub calls: Mutex<Vec<String>>,
    pub delay: Option<Duration>,
}

impl FakeRegistry {
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay: Some(delay), ..Default::default() }
    }
}

#[async_trait]
impl RegistryTransport for FakeRegistry {
    async fn execute(&self, request: RegistryRequest) -> Result<RegistryResponse, RegistryError> {
        if let Some(delay) = self.delay {
            sleep(delay).await;
        }
        self.calls.lock().unwrap().push(format!("{} {}", request.method, request.path));
        let segments: Vec<&str> = request.path.split('/').collect();
        let body = request.body.clone().unwrap_or_default();
        let id = body["id"].as_str().unwrap_or_default().to_string();
        let response = match (request.method, segments.as_slice()) {
            (RegistryMethod::Get, ["genericClass", id]) => match self.classes.lock().unwrap().get(*id) {
                Some(found) => RegistryResponse::new(200, found.to_string()),
                None => RegistryResponse::new(404, ""),
            },
            (RegistryMethod::Post, ["genericClass"]) => {
                self.classes.lock().unwrap().insert(id, body.clone());
                RegistryResponse::new(200, body.to_string())
            },
            (RegistryMethod::Post, ["genericObject"]) => {
                let mut objects = self.objects.lock().unwrap();
                if objects.contains_key(&id) {
                    RegistryResponse::new(409, "")
                } else {
                    objects.insert(id, body.clone());
                    RegistryResponse::new(200, body.to_string())
                }
            },
            (RegistryMethod::Put, ["genericObject", id]) => {
                self.objects.lock().unwrap().insert(id.to_string(), body.clone());
                RegistryResponse::new(200, body.to_string())
            },
            _ => RegistryResponse::new(400, r#"{"error":{"message":"unexpected call"}}"#),
        };
        Ok(response)
    }
}

pub fn signing_key() -> SigningKey {
    let pem = Rsa::generate(2048).unwrap().private_key_to_pem().unwrap();
    SigningKey::from_pem(&pem).unwrap()
}

pub fn samsung(key: &SigningKey) -> SamsungProvisioning {
    let prefix = "https://a.swallet.link/atw/v1";
    SamsungProvisioning {
        partner_code: PARTNER.to_string(),
        cert_id: "Ab12".to_string(),
        add_url_prefix: prefix.to_string(),
        push: SamsungPushAdapter::new("push-card"),
        push_card: SamsungCardConfig {
            card_id: "push-card".to_string(),
            rd_click_url: Some("https://rd.test/click".to_string()),
            rd_impression_url: None,
        },
        pull: SamsungPullAdapter::new("Ab12", "pull-card", prefix),
        signer: CardTokenSigner::new(key, PARTNER, 300).unwrap(),
    }
}

pub fn state_with(registry: Option<Arc<FakeRegistry>>) -> web::Data<AppState> {
    build_state(registry, false)
}

/// Google save tokens carry the object instead of referencing it.
pub fn embedding_state(registry: Arc<FakeRegistry>) -> web::Data<AppState> {
    build_state(Some(registry), true)
}

fn build_state(registry: Option<Arc<FakeRegistry>>, embed_objects: bool) -> web::Data<AppState> {
    let key = signing_key();
    let google = match registry {
        Some(registry) => Ok(Arc::new(GoogleProvisioning {
            adapter: GoogleAdapter::new(ISSUER, "business_card"),
            registry: PassRegistryClient::new(registry),
            signer: SaveLinkSigner::new(key.clone(), "issuer@demo.iam.gserviceaccount.com"),
            audience: "google".to_string(),
            origins: vec![],
            embed_objects,
        })),
        None => Err(AuthError::MissingCredentials("key.json".to_string())),
    };
    web::Data::new(AppState {
        google,
        samsung: samsung(&key),
        fetch: FetchFlowResponder::new(Arc::new(InMemoryPullRecordRepository::new()), UnknownReferencePolicy::OkEmpty),
    })
}
