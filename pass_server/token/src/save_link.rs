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

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{encode, Algorithm, Header};
use log::{debug, error};
use serde_json::{json, Value};

use crate::keys::SigningKey;
use crate::token_error::SigningError;

pub const SAVE_URL_PREFIX: &str = "https://pay.google.com/gp/v/save";
const SAVE_TOKEN_TYPE: &str = "savetowallet";

/// Mints "save to wallet" links.
///
/// The token is a plain RS256 JWT signed with the service-account key. It is
/// not invalidated after use, so minting the same object twice is harmless.
pub struct SaveLinkSigner {
    key: SigningKey,
    issuer_email: String,
    url_prefix: String,
}

impl SaveLinkSigner {
    pub fn new(key: SigningKey, issuer_email: impl Into<String>) -> Self {
        Self { key, issuer_email: issuer_email.into(), url_prefix: SAVE_URL_PREFIX.to_string() }
    }

    pub fn with_url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.url_prefix = prefix.into().trim_end_matches('/').to_string();
        self
    }

    /// Link that saves an object already written to the registry.
    pub fn mint(&self, object_ref: &str, audience: &str, allowed_origins: &[String]) -> Result<String, SigningError> {
        self.sign_link(json!({ "genericObjects": [{ "id": object_ref }] }), audience, allowed_origins)
    }

    /// Link that carries whole object bodies, for objects never written to the registry.
    pub fn mint_with_objects(
        &self,
        objects: Vec<Value>,
        audience: &str,
        allowed_origins: &[String],
    ) -> Result<String, SigningError> {
        self.sign_link(json!({ "genericObjects": objects }), audience, allowed_origins)
    }

    fn sign_link(&self, payload: Value, audience: &str, allowed_origins: &[String]) -> Result<String, SigningError> {
        let iat = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| SigningError::SignFailed(e.to_string()))?
            .as_secs();
        let claims = json!({
            "iss": self.issuer_email,
            "aud": audience,
            "origins": allowed_origins,
            "typ": SAVE_TOKEN_TYPE,
            "iat": iat,
            "payload": payload,
        });
        let token = encode(&Header::new(Algorithm::RS256), &claims, self.key.encoding_key()).map_err(|e| {
            error!("sign save link failed: {}", e);
            SigningError::SignFailed(e.to_string())
        })?;
        debug!("minted save link for {}", self.issuer_email);
        Ok(format!("{}/{}", self.url_prefix, token))
    }
}
