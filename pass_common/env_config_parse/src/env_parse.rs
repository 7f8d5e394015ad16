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

use log::{info, warn};
use std::env;
use std::str::FromStr;

/// Reads an environment variable, returning an empty string when it is unset.
pub fn get_env_value(key: &str) -> String {
    match env::var(key) {
        Ok(value) => value,
        Err(e) => {
            warn!("Failed to get environment variable {}: {:?}", key, e);
            String::new()
        }
    }
}

/// Reads and parses an environment variable, falling back to `default` when the
/// variable is unset or does not parse.
pub fn get_env_value_or_default<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key).ok().and_then(|value| value.parse::<T>().ok()) {
        Some(value) => value,
        None => {
            info!("environment variable {} not usable, using default", key);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_value_or_default() {
        env::set_var("WALLET_PASS_TEST_PORT", "4001");
        assert_eq!(get_env_value_or_default("WALLET_PASS_TEST_PORT", 3001u16), 4001);
        env::set_var("WALLET_PASS_TEST_PORT", "not-a-port");
        assert_eq!(get_env_value_or_default("WALLET_PASS_TEST_PORT", 3001u16), 3001);
        env::remove_var("WALLET_PASS_TEST_PORT");
        assert_eq!(get_env_value("WALLET_PASS_TEST_PORT"), "");
    }
}
