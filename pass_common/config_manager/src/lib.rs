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

/// Configuration management for the wallet pass service.
///
/// Configuration is read once from a YAML file into a [`ConfigSingleton`] and
/// shared read-only for the rest of the process.
///
/// # Example
///
/// ```no_run
/// use config_manager::types::CONFIG;
///
/// CONFIG.initialize("server_config.yaml").expect("Failed to load config");
/// let config = CONFIG.get_instance().expect("Config not initialized");
/// println!("issuer: {}", config.google.issuer_id);
/// ```
pub mod manager;
pub mod types;

pub use manager::ConfigSingleton;
