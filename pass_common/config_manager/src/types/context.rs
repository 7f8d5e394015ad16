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

use serde::Deserialize;
use crate::ConfigSingleton;

/// Main configuration structure that matches the server_config.yaml file structure.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: HttpServerConfig,
    pub google: GoogleWalletConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
    pub samsung: SamsungWalletConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// HTTP listener settings
#[derive(Debug, Deserialize, Clone)]
pub struct HttpServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum accepted JSON body in bytes
    #[serde(default = "default_max_json_size")]
    pub max_json_size: usize,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self { bind_address: default_bind_address(), port: default_port(), max_json_size: default_max_json_size() }
    }
}

/// Google Wallet issuer settings
#[derive(Debug, Deserialize, Clone)]
pub struct GoogleWalletConfig {
    /// Numeric issuer id, prefix of every class and object id
    pub issuer_id: String,
    /// Fixed class suffix, the class id is `{issuer_id}.{class_suffix}`
    #[serde(default = "default_class_suffix")]
    pub class_suffix: String,
    /// Path of the service account JSON key
    pub credentials_path: String,
    /// `aud` claim of the save-to-wallet token
    #[serde(default = "default_google_audience")]
    pub audience: String,
    /// Origins allowed to render the save button
    #[serde(default)]
    pub origins: Vec<String>,
    #[serde(default = "default_save_url_prefix")]
    pub save_url_prefix: String,
    /// Carry the full object inside the save token instead of writing it to
    /// the registry first. The class is still written to the registry.
    #[serde(default)]
    pub embed_objects: bool,
}

/// Pass registry API settings
#[derive(Debug, Deserialize, Clone)]
pub struct RegistryConfig {
    #[serde(default = "default_registry_base_url")]
    pub base_url: String,
    /// Timeout of a single registry or token-exchange call
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { base_url: default_registry_base_url(), request_timeout_secs: default_request_timeout_secs() }
    }
}

/// Samsung Wallet partner settings
#[derive(Debug, Deserialize, Clone)]
pub struct SamsungWalletConfig {
    pub partner_code: String,
    /// Certificate id used in add-to-wallet links
    pub cert_id: String,
    /// PEM private key used to sign card data tokens
    pub private_key_path: String,
    /// Lifetime of a card data token in seconds
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
    #[serde(default = "default_add_url_prefix")]
    pub add_url_prefix: String,
    /// Card template that receives card data inside the token
    pub push: SamsungCardConfig,
    /// Card template whose data is fetched from this service
    pub pull: SamsungCardConfig,
}

/// One Samsung card template
#[derive(Debug, Deserialize, Clone)]
pub struct SamsungCardConfig {
    pub card_id: String,
    #[serde(default)]
    pub rd_click_url: Option<String>,
    #[serde(default)]
    pub rd_impression_url: Option<String>,
}

/// Where pull records live
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PullStoreKind {
    Memory,
    Redis,
}

/// How the fetch endpoints answer an unknown card or reference
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UnknownReferenceSetting {
    /// 200 with an empty JSON object
    OkEmpty,
    /// 404 with an error body
    NotFound,
}

/// Pull flow settings
#[derive(Debug, Deserialize, Clone)]
pub struct FetchConfig {
    #[serde(default = "default_pull_store")]
    pub store: PullStoreKind,
    #[serde(default = "default_unknown_reference")]
    pub unknown_reference: UnknownReferenceSetting,
    /// Expiry applied by the redis store, unset keeps records forever
    #[serde(default)]
    pub record_ttl_secs: Option<u64>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { store: default_pull_store(), unknown_reference: default_unknown_reference(), record_ttl_secs: None }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_max_json_size() -> usize {
    1024 * 1024
}

fn default_class_suffix() -> String {
    "digital_business_card".to_string()
}

fn default_google_audience() -> String {
    "google".to_string()
}

fn default_save_url_prefix() -> String {
    "https://pay.google.com/gp/v/save/".to_string()
}

fn default_registry_base_url() -> String {
    "https://walletobjects.googleapis.com/walletobjects/v1".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_token_ttl_secs() -> u64 {
    300
}

fn default_add_url_prefix() -> String {
    "https://a.swallet.link/atw/v3".to_string()
}

fn default_pull_store() -> PullStoreKind {
    PullStoreKind::Memory
}

fn default_unknown_reference() -> UnknownReferenceSetting {
    UnknownReferenceSetting::OkEmpty
}

impl ServerConfig {
    /// Validates the configuration values
    ///
    /// # Errors
    ///
    /// * the Google issuer id or class suffix is empty or contains characters outside `[A-Za-z0-9._-]`
    /// * the Samsung push and pull templates share a card id
    /// * the registry timeout is zero
    pub fn validate(&self) -> Result<(), String> {
        if !is_registry_id(&self.google.issuer_id) {
            return Err(format!("Invalid configuration: google.issuer_id '{}'", self.google.issuer_id));
        }
        if !is_registry_id(&self.google.class_suffix) {
            return Err(format!("Invalid configuration: google.class_suffix '{}'", self.google.class_suffix));
        }
        if self.samsung.push.card_id.is_empty() || self.samsung.pull.card_id.is_empty() {
            return Err("Invalid configuration: samsung card ids must not be empty".to_string());
        }
        // a card id carries exactly one flow
        if self.samsung.push.card_id == self.samsung.pull.card_id {
            return Err(format!(
                "Invalid configuration: samsung card id {} is bound to both push and pull",
                self.samsung.push.card_id
            ));
        }
        if self.registry.request_timeout_secs == 0 {
            return Err("Invalid configuration: registry.request_timeout_secs must be positive".to_string());
        }
        Ok(())
    }
}

fn is_registry_id(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

/// Global configuration singleton instance
///
/// Call `CONFIG.initialize(path)` once at startup and `CONFIG.get_instance()` afterwards.
pub static CONFIG: ConfigSingleton<ServerConfig> = ConfigSingleton::new();
