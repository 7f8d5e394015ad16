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

use std::path::Path;

use jsonwebtoken::EncodingKey;
use log::info;
use openssl::pkey::{PKey, Private};

use crate::token_error::SigningError;

/// RSA private key parsed once and kept in both the openssl and the
/// jsonwebtoken representation.
#[derive(Clone)]
pub struct SigningKey {
    pkey: PKey<Private>,
    encoding_key: EncodingKey,
}

impl SigningKey {
    pub fn from_pem(pem: &[u8]) -> Result<Self, SigningError> {
        let pkey = PKey::private_key_from_pem(pem).map_err(|e| SigningError::InvalidKey(e.to_string()))?;
        let rsa = pkey.rsa().map_err(|e| SigningError::InvalidKey(format!("not an RSA key: {}", e)))?;
        let der = rsa.private_key_to_der().map_err(|e| SigningError::InvalidKey(e.to_string()))?;
        Ok(Self { pkey, encoding_key: EncodingKey::from_rsa_der(&der) })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SigningError> {
        let path = path.as_ref();
        let pem = std::fs::read(path).map_err(|e| SigningError::KeyUnavailable(format!("{}: {}", path.display(), e)))?;
        let key = Self::from_pem(&pem)?;
        info!("loaded signing key from {}", path.display());
        Ok(key)
    }

    pub fn pkey(&self) -> &PKey<Private> {
        &self.pkey
    }

    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningKey(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openssl::rsa::Rsa;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let pem = Rsa::generate(2048).unwrap().private_key_to_pem().unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&pem).unwrap();
        assert!(SigningKey::from_file(file.path()).is_ok());
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        assert!(matches!(
            SigningKey::from_file("/nonexistent/samsung.pem"),
            Err(SigningError::KeyUnavailable(_))
        ));
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert!(matches!(SigningKey::from_pem(b"-----BEGIN NOTHING-----"), Err(SigningError::InvalidKey(_))));
    }

    #[test]
    fn test_ec_key_is_rejected() {
        let group = openssl::ec::EcGroup::from_curve_name(openssl::nid::Nid::X9_62_PRIME256V1).unwrap();
        let ec = openssl::ec::EcKey::generate(&group).unwrap();
        let pem = PKey::from_ec_key(ec).unwrap().private_key_to_pem_pkcs8().unwrap();
        assert!(matches!(SigningKey::from_pem(&pem), Err(SigningError::InvalidKey(_))));
    }
}
