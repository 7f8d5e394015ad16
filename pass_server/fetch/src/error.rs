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

use cache::RedisError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("pull record store failed: {0}")]
    Repository(String),
    #[error("pull record corrupt: {0}")]
    Serialization(String),
    #[error("reference {0} already registered")]
    AlreadyRegistered(String),
}

impl From<RedisError> for FetchError {
    fn from(e: RedisError) -> Self {
        FetchError::Repository(e.to_string())
    }
}
