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

use std::sync::Mutex;

use lazy_static::lazy_static;
use log::info;
use redis::Client;

use crate::error::RedisError;

/// Connection url of the shared client.
pub const REDIS_URL_ENV: &str = "REDIS_URL";

lazy_static! {
    static ref SHARED: Mutex<Option<RedisClient>> = Mutex::new(None);
}

/// Handle on a redis server. Cheap to clone; connections are opened per call.
#[derive(Clone, Debug)]
pub struct RedisClient {
    pub(crate) client: Client,
}

impl RedisClient {
    /// Parses `redis_url`; nothing is connected yet.
    pub fn open(redis_url: &str) -> Result<RedisClient, RedisError> {
        Ok(RedisClient { client: Client::open(redis_url)? })
    }

    pub fn get_instance() -> Result<RedisClient, RedisError> {
        let mut shared = SHARED.lock().map_err(|_| RedisError::OperationError("redis client lock poisoned".to_string()))?;
        if let Some(client) = shared.as_ref() {
            return Ok(client.clone());
        }
        let url = std::env::var(REDIS_URL_ENV)
            .map_err(|_| RedisError::OperationError(format!("{} is not set", REDIS_URL_ENV)))?;
        let client = Self::open(&url)?;
        info!("redis client created for {:?}", client.client.get_connection_info().addr);
        *shared = Some(client.clone());
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_rejects_malformed_url() {
        assert!(matches!(RedisClient::open("not a url"), Err(RedisError::ConnectionError(_))));
        assert!(RedisClient::open("redis://127.0.0.1:6379/0").is_ok());
    }

    #[test]
    fn test_shared_client_is_reused() {
        std::env::set_var(REDIS_URL_ENV, "redis://127.0.0.1:6379/0");
        let first = RedisClient::get_instance().unwrap();
        std::env::set_var(REDIS_URL_ENV, "redis://10.0.0.1:6379/0");
        let second = RedisClient::get_instance().unwrap();
        assert_eq!(first.client.get_connection_info().addr, second.client.get_connection_info().addr);
    }
}
