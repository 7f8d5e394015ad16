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

use base64::Engine as _;
use base64::prelude::BASE64_URL_SAFE_NO_PAD;
use openssl::pkey::{PKey, Private};
use openssl::sign::Signer;
use serde_json::{Map, Value};
use crate::jwt_error::JwtError;
use crate::jwt_parser::digest_for;

/// Compact JWS encoder for headers that carry non-registered members
/// (for example `ver`), which typed JWT headers cannot express.
pub struct JwsSigner {
    key: PKey<Private>,
    alg: String,
}

impl JwsSigner {
    /// # Errors
    ///
    /// * `JwtError::UnsupportedAlgorithm` - If `alg` is not an RSA SHA-2 algorithm.
    pub fn new(key: PKey<Private>, alg: &str) -> Result<Self, JwtError> {
        if !alg.starts_with("RS") {
            return Err(JwtError::UnsupportedAlgorithm(alg.to_string()));
        }
        digest_for(alg)?;
        Ok(Self { key, alg: alg.to_string() })
    }

    /// Signs `claims` under `extra_header`; `alg` is always set by the signer.
    ///
    /// # Errors
    ///
    /// * `JwtError::SigningError` - If serialization or the RSA signature fails.
    pub fn sign(&self, extra_header: Map<String, Value>, claims: &Value) -> Result<String, JwtError> {
        let mut header = Map::new();
        header.insert("alg".to_string(), Value::String(self.alg.clone()));
        for (name, value) in extra_header {
            if name != "alg" {
                header.insert(name, value);
            }
        }
        let header_json = serde_json::to_vec(&Value::Object(header))
            .map_err(|e| JwtError::SigningError(e.to_string()))?;
        let claims_json = serde_json::to_vec(claims).map_err(|e| JwtError::SigningError(e.to_string()))?;

        let signing_input = format!(
            "{}.{}",
            BASE64_URL_SAFE_NO_PAD.encode(header_json),
            BASE64_URL_SAFE_NO_PAD.encode(claims_json)
        );
        let digest = digest_for(&self.alg)?;
        let mut signer = Signer::new(digest, &self.key).map_err(|e| JwtError::SigningError(e.to_string()))?;
        signer.update(signing_input.as_bytes()).map_err(|e| JwtError::SigningError(e.to_string()))?;
        let signature = signer.sign_to_vec().map_err(|e| JwtError::SigningError(e.to_string()))?;

        Ok(format!("{}.{}", signing_input, BASE64_URL_SAFE_NO_PAD.encode(signature)))
    }
}
