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

use std::time::Duration;
use log::debug;
use redis::{Commands, Script};
use crate::client::RedisClient;
use crate::error::RedisError;

/// Replaces the value only when the stored value still equals ARGV[1].
/// KEEPTTL leaves an expiry set at insert time untouched.
const COMPARE_AND_SWAP_SCRIPT: &str = r#"
if redis.call('GET', KEYS[1]) == ARGV[1] then
    redis.call('SET', KEYS[1], ARGV[2], 'KEEPTTL')
    return 1
end
return 0
"#;

impl RedisClient {
    /// Gets the value for a given key.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the key does not exist.
    ///
    /// # Errors
    /// * `RedisError::ConnectionError` - If there is an error talking to Redis.
    pub fn get(&self, key: &str) -> Result<Option<String>, RedisError> {
        let mut conn = self.client.get_connection().map_err(RedisError::ConnectionError)?;
        let value: Option<String> = conn.get(key).map_err(RedisError::ConnectionError)?;
        Ok(value)
    }

    /// Sets a key only if it does not already exist, with an optional expiry.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the key was written, `Ok(false)` if it already existed.
    ///
    /// # Errors
    /// * `RedisError::ConnectionError` - If there is an error talking to Redis.
    pub fn set_nx(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<bool, RedisError> {
        let mut conn = self.client.get_connection().map_err(RedisError::ConnectionError)?;
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value).arg("NX");
        if let Some(ttl) = ttl {
            cmd.arg("EX").arg(ttl.as_secs().max(1));
        }
        let reply: Option<String> = cmd.query(&mut conn).map_err(RedisError::ConnectionError)?;
        Ok(reply.is_some())
    }

    /// Atomically replaces `expected` with `new` at `key`.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the swap happened, `Ok(false)` if the stored value differed or the key was missing.
    ///
    /// # Errors
    /// * `RedisError::ConnectionError` - If there is an error talking to Redis.
    pub fn compare_and_swap(&self, key: &str, expected: &str, new: &str) -> Result<bool, RedisError> {
        let mut conn = self.client.get_connection().map_err(RedisError::ConnectionError)?;
        let swapped: i32 = Script::new(COMPARE_AND_SWAP_SCRIPT)
            .key(key)
            .arg(expected)
            .arg(new)
            .invoke(&mut conn)
            .map_err(RedisError::ConnectionError)?;
        debug!("compare_and_swap on {} swapped={}", key, swapped);
        Ok(swapped == 1)
    }
}
