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
use openssl::hash::MessageDigest;
use serde_json::Value;
use crate::jwt_error::JwtError;

/// Splits a compact JWS into its parts without verifying it.
pub struct JwtParser {}

impl JwtParser {
    fn segments(content: &str) -> Result<Vec<&str>, JwtError> {
        let data_vec: Vec<&str> = content.split('.').collect();
        if data_vec.len() != 3 {
            return Err(JwtError::IncorrectFormatError(format!(
                "expected 3 segments, found {}", data_vec.len()
            )));
        }
        Ok(data_vec)
    }

    fn decode_segment(segment: &str, name: &str) -> Result<String, JwtError> {
        BASE64_URL_SAFE_NO_PAD
            .decode(segment)
            .map_err(|_| JwtError::IncorrectFormatError(format!("Failed to decode JWT {}", name)))
            .and_then(|bytes| {
                String::from_utf8(bytes)
                    .map_err(|_| JwtError::IncorrectFormatError(format!("JWT {} is not valid UTF-8", name)))
            })
    }

    /// Get the decoded header as JSON.
    ///
    /// # Errors
    ///
    /// * `JwtError::IncorrectFormatError` - If the JWT content is not in the correct format.
    pub fn get_header(content: &str) -> Result<Value, JwtError> {
        let data_vec = Self::segments(content)?;
        let header = Self::decode_segment(data_vec[0], "header")?;
        serde_json::from_str(&header).map_err(|e| JwtError::IncorrectFormatError(e.to_string()))
    }

    /// Get the digest matching the `alg` header of the JWT.
    ///
    /// # Errors
    ///
    /// * `JwtError::IncorrectFormatError` - If the JWT content is not in the correct format.
    /// * `JwtError::UnsupportedAlgorithm` - If `alg` is not an RSA/PSS SHA-2 algorithm.
    pub fn get_alg(content: &str) -> Result<MessageDigest, JwtError> {
        let header = Self::get_header(content)?;
        let alg = header.get("alg").and_then(Value::as_str).unwrap_or_default();
        digest_for(alg)
    }

    /// Get the raw signature bytes.
    ///
    /// # Errors
    ///
    /// * `JwtError::IncorrectFormatError` - If the JWT content is not in the correct format.
    pub fn get_signature(content: &str) -> Result<Vec<u8>, JwtError> {
        let data_vec = Self::segments(content)?;
        BASE64_URL_SAFE_NO_PAD
            .decode(data_vec[2])
            .map_err(|e| JwtError::IncorrectFormatError(e.to_string()))
    }

    /// Get the decoded payload.
    ///
    /// # Errors
    ///
    /// * `JwtError::IncorrectFormatError` - If the JWT content is not in the correct format.
    pub fn get_payload(content: &str) -> Result<String, JwtError> {
        let data_vec = Self::segments(content)?;
        Self::decode_segment(data_vec[1], "payload")
    }

    /// Get the decoded payload as JSON.
    pub fn get_claims(content: &str) -> Result<Value, JwtError> {
        let payload = Self::get_payload(content)?;
        serde_json::from_str(&payload).map_err(|e| JwtError::IncorrectFormatError(e.to_string()))
    }

    /// Get the signing input, `header.payload`.
    pub fn get_base_data(content: &str) -> Result<String, JwtError> {
        let data_vec = Self::segments(content)?;
        Ok(format!("{}.{}", data_vec[0], data_vec[1]))
    }
}

pub(crate) fn digest_for(alg: &str) -> Result<MessageDigest, JwtError> {
    match alg {
        "RS256" | "PS256" => Ok(MessageDigest::sha256()),
        "RS384" | "PS384" => Ok(MessageDigest::sha384()),
        "RS512" | "PS512" => Ok(MessageDigest::sha512()),
        other => Err(JwtError::UnsupportedAlgorithm(other.to_string())),
    }
}
