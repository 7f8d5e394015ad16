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

use thiserror::Error;

/// Token signing exception enumeration
#[derive(Debug, Error)]
pub enum SigningError {
    // key file could not be read
    #[error("Signing key unavailable: {0}")]
    KeyUnavailable(String),
    // key material is not a usable RSA private key
    #[error("Signing key invalid: {0}")]
    InvalidKey(String),
    #[error("Sign token failed: {0}")]
    SignFailed(String),
}
