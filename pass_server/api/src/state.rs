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

use std::sync::Arc;
use std::time::Duration;

use cache::RedisClient;
use config_manager::types::context::{
    PullStoreKind, SamsungCardConfig, SamsungWalletConfig, ServerConfig, UnknownReferenceSetting,
};
use fetch::{
    FetchFlowResponder, InMemoryPullRecordRepository, PullRecordRepository, RedisPullRecordRepository,
    UnknownReferencePolicy,
};
use log::info;
use provider::{GoogleAdapter, SamsungPullAdapter, SamsungPushAdapter};
use registry::{AuthClientCache, AuthError, FileCredentialSource, HttpRegistryTransport, PassRegistryClient};
use server_config::{GoogleSigning, InitContext};
use token_management::{CardTokenSigner, SaveLinkSigner, SigningKey};

use crate::utils::api_error::ApiError;

/// Everything the Google push flow needs
pub struct GoogleProvisioning {
    pub adapter: GoogleAdapter,
    pub registry: PassRegistryClient,
    pub signer: SaveLinkSigner,
    pub audience: String,
    pub origins: Vec<String>,
    /// Object travels inside the save token, only the class is written
    pub embed_objects: bool,
}

impl GoogleProvisioning {
    pub fn from_config(config: &ServerConfig, signing: GoogleSigning) -> Self {
        let timeout = Duration::from_secs(config.registry.request_timeout_secs);
        let auth = Arc::new(AuthClientCache::new(
            Arc::new(FileCredentialSource::new(signing.credentials_path)),
            timeout,
        ));
        let transport = HttpRegistryTransport::new(auth, config.registry.base_url.clone());
        Self {
            adapter: GoogleAdapter::new(config.google.issuer_id.clone(), config.google.class_suffix.clone()),
            registry: PassRegistryClient::new(Arc::new(transport)),
            signer: SaveLinkSigner::new(signing.key, signing.service_account_email)
                .with_url_prefix(config.google.save_url_prefix.clone()),
            audience: config.google.audience.clone(),
            origins: config.google.origins.clone(),
            embed_objects: config.google.embed_objects,
        }
    }
}

/// Samsung partner identity plus one adapter per card template
pub struct SamsungProvisioning {
    pub partner_code: String,
    pub cert_id: String,
    pub add_url_prefix: String,
    pub push: SamsungPushAdapter,
    pub push_card: SamsungCardConfig,
    pub pull: SamsungPullAdapter,
    pub signer: CardTokenSigner,
}

impl SamsungProvisioning {
    pub fn from_config(config: &SamsungWalletConfig, key: &SigningKey) -> Result<Self, String> {
        let signer =
            CardTokenSigner::new(key, config.partner_code.clone(), config.token_ttl_secs).map_err(|e| e.to_string())?;
        Ok(Self {
            partner_code: config.partner_code.clone(),
            cert_id: config.cert_id.clone(),
            add_url_prefix: config.add_url_prefix.clone(),
            push: SamsungPushAdapter::new(config.push.card_id.clone()),
            push_card: config.push.clone(),
            pull: SamsungPullAdapter::new(config.cert_id.clone(), config.pull.card_id.clone(), config.add_url_prefix.clone()),
            signer,
        })
    }
}

pub struct AppState {
    /// Err when the service-account key was unusable at startup
    pub google: Result<Arc<GoogleProvisioning>, AuthError>,
    pub samsung: SamsungProvisioning,
    pub fetch: FetchFlowResponder,
}

impl AppState {
    /// Builds the shared state from a completed init chain.
    pub fn from_context(context: InitContext) -> Result<Self, String> {
        let config = context.config.ok_or("configuration not loaded")?;
        let signing = context.signing.ok_or("signing keys not loaded")?;

        let google = match signing.google {
            Some(google) => Ok(Arc::new(GoogleProvisioning::from_config(&config, google))),
            None => Err(AuthError::MissingCredentials("service account key unusable at startup".to_string())),
        };
        let samsung = SamsungProvisioning::from_config(&config.samsung, &signing.samsung_key)?;
        let fetch = FetchFlowResponder::new(pull_repository(&config)?, unknown_reference_policy(&config));
        Ok(Self { google, samsung, fetch })
    }

    pub fn google(&self) -> Result<Arc<GoogleProvisioning>, ApiError> {
        self.google.clone().map_err(ApiError::Auth)
    }
}

fn pull_repository(config: &ServerConfig) -> Result<Arc<dyn PullRecordRepository>, String> {
    match config.fetch.store {
        PullStoreKind::Memory => {
            info!("pull records kept in memory");
            Ok(Arc::new(InMemoryPullRecordRepository::new()))
        },
        PullStoreKind::Redis => {
            let client = RedisClient::get_instance().map_err(|e| e.to_string())?;
            info!("pull records kept in redis");
            let ttl = config.fetch.record_ttl_secs.map(Duration::from_secs);
            Ok(Arc::new(RedisPullRecordRepository::new(client, ttl)))
        },
    }
}

pub fn unknown_reference_policy(config: &ServerConfig) -> UnknownReferencePolicy {
    match config.fetch.unknown_reference {
        UnknownReferenceSetting::OkEmpty => UnknownReferencePolicy::OkEmpty,
        UnknownReferenceSetting::NotFound => UnknownReferencePolicy::NotFound,
    }
}
