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

use jwt::JwsSigner;
use log::error;
use serde_json::{json, Map, Value};

use crate::keys::SigningKey;
use crate::token_error::SigningError;

const CARD_AUDIENCE: &str = "samsung";
const CARD_CONTENT_TYPE: &str = "CARD";
const CARD_TOKEN_VERSION: u64 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardToken {
    pub token: String,
    pub iat: u64,
    pub exp: u64,
}

/// Signs push-flow card data into the compact JWS the wallet app accepts.
pub struct CardTokenSigner {
    signer: JwsSigner,
    partner_code: String,
    ttl_secs: u64,
}

impl CardTokenSigner {
    pub fn new(key: &SigningKey, partner_code: impl Into<String>, ttl_secs: u64) -> Result<Self, SigningError> {
        let signer = JwsSigner::new(key.pkey().clone(), "RS256").map_err(|e| SigningError::InvalidKey(e.to_string()))?;
        Ok(Self { signer, partner_code: partner_code.into(), ttl_secs })
    }

    pub fn partner_code(&self) -> &str {
        &self.partner_code
    }

    /// `card` is the provider card object (`type`, `subType`, `data`).
    pub fn sign(&self, card: Value) -> Result<CardToken, SigningError> {
        let iat = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| SigningError::SignFailed(e.to_string()))?
            .as_secs();
        let exp = iat + self.ttl_secs;
        let claims = json!({
            "iss": self.partner_code,
            "aud": CARD_AUDIENCE,
            "iat": iat,
            "exp": exp,
            "card": card,
        });
        let mut header = Map::new();
        header.insert("cty".to_string(), json!(CARD_CONTENT_TYPE));
        header.insert("ver".to_string(), json!(CARD_TOKEN_VERSION));
        let token = self.signer.sign(header, &claims).map_err(|e| {
            error!("sign card token failed: {}", e);
            SigningError::SignFailed(e.to_string())
        })?;
        Ok(CardToken { token, iat, exp })
    }
}
