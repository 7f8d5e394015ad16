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

//! Provisioning steps behind the HTTP handlers.
//!
//! Every provider goes through the same two steps: its `ProviderAdapter`
//! builds a `ProviderFlow`, then `deliver` turns the flow into what the
//! caller hands to the user. Registry writes run on a detached task and the
//! handler awaits its handle, so a client that disconnects does not cancel a
//! half-finished upsert.

use std::sync::Arc;

use log::info;
use provider::{
    CardProfile, ProviderAdapter, ProviderFlow, PullReference, PushPayload, SamsungCardFields, ValidationError,
};
use registry::{WalletClassDescriptor, WalletObjectRecord};
use token_management::CardToken;

use crate::state::{AppState, GoogleProvisioning};
use crate::utils::api_error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedPass {
    pub object_id: String,
    pub save_url: String,
}

/// Result of a delivered flow
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    SaveLink(ProvisionedPass),
    CardToken(CardToken),
    PullLink(PullReference),
}

fn unexpected(adapter: &dyn ProviderAdapter, delivery: &Delivery) -> ApiError {
    ApiError::Internal(format!("{} adapter delivered {:?}", adapter.name(), delivery))
}

/// Builds the adapter's flow for `profile` and delivers it.
pub async fn provision(
    state: &AppState,
    adapter: &dyn ProviderAdapter,
    profile: &CardProfile,
) -> Result<Delivery, ApiError> {
    let flow = adapter.build(profile)?;
    deliver(state, adapter, flow).await
}

/// Push flows are signed, registry payloads are written first, pull flows
/// are registered for the provider's later fetch.
pub async fn deliver(state: &AppState, adapter: &dyn ProviderAdapter, flow: ProviderFlow) -> Result<Delivery, ApiError> {
    if flow.kind() != adapter.flow_kind() {
        return Err(ApiError::Internal(format!("{} adapter produced a {:?} flow", adapter.name(), flow.kind())));
    }
    match flow {
        ProviderFlow::Push(PushPayload::Registry { class, object }) => {
            Ok(Delivery::SaveLink(save_to_registry(state.google()?, class, object).await?))
        },
        ProviderFlow::Push(PushPayload::Embedded { card }) => Ok(Delivery::CardToken(state.samsung.signer.sign(card)?)),
        ProviderFlow::Pull(reference) => {
            state.fetch.register(&reference).await.map_err(|e| ApiError::Internal(e.to_string()))?;
            Ok(Delivery::PullLink(reference))
        },
    }
}

async fn save_to_registry(
    google: Arc<GoogleProvisioning>,
    class: WalletClassDescriptor,
    object: WalletObjectRecord,
) -> Result<ProvisionedPass, ApiError> {
    if google.embed_objects {
        let object_id = object.id.clone();
        let embedded = object.to_registry_json();
        let registry = google.registry.clone();
        let handle = actix_web::rt::spawn(async move { registry.ensure_class(&class).await });
        handle.await.map_err(|e| ApiError::Internal(format!("registry task failed: {}", e)))??;
        let save_url = google.signer.mint_with_objects(vec![embedded], &google.audience, &google.origins)?;
        info!("pass {} provisioned inside its save token", object_id);
        return Ok(ProvisionedPass { object_id, save_url });
    }
    let object_id = write_to_registry(google.clone(), class, object).await?;
    let save_url = google.signer.mint(&object_id, &google.audience, &google.origins)?;
    info!("pass {} provisioned", object_id);
    Ok(ProvisionedPass { object_id, save_url })
}

async fn write_to_registry(
    google: Arc<GoogleProvisioning>,
    class: WalletClassDescriptor,
    object: WalletObjectRecord,
) -> Result<String, ApiError> {
    let registry = google.registry.clone();
    let handle = actix_web::rt::spawn(async move {
        registry.ensure_class(&class).await?;
        registry.upsert_object(&object).await
    });
    let object_id = handle.await.map_err(|e| ApiError::Internal(format!("registry task failed: {}", e)))??;
    Ok(object_id)
}

/// Google push: an explicit user id wins over the one derived from the
/// profile's public card url.
pub async fn provision_pass(
    state: &AppState,
    user_id: Option<&str>,
    profile: &CardProfile,
) -> Result<ProvisionedPass, ApiError> {
    let google = state.google()?;
    let delivery = match user_id {
        Some(user_id) => {
            let flow = google.adapter.build_for_user(Some(user_id), profile)?;
            deliver(state, &google.adapter, flow).await?
        },
        None => provision(state, &google.adapter, profile).await?,
    };
    match delivery {
        Delivery::SaveLink(pass) => Ok(pass),
        other => Err(unexpected(&google.adapter, &other)),
    }
}

/// Replaces an existing user's object with the submitted profile. The object
/// is always written to the registry, even when save tokens embed objects.
pub async fn update_pass(
    google: Arc<GoogleProvisioning>,
    user_id: Option<&str>,
    profile: &CardProfile,
) -> Result<String, ApiError> {
    let user_id = user_id.map(str::trim).filter(|id| !id.is_empty()).ok_or_else(|| ValidationError::missing("userId required"))?;
    match google.adapter.build_for_user(Some(user_id), profile)? {
        ProviderFlow::Push(PushPayload::Registry { class, object }) => write_to_registry(google, class, object).await,
        other => Err(ApiError::Internal(format!("google adapter produced a {:?} flow", other.kind()))),
    }
}

pub async fn init_class(google: Arc<GoogleProvisioning>) -> Result<String, ApiError> {
    let class = google.adapter.class_descriptor();
    let registry = google.registry.clone();
    let handle = actix_web::rt::spawn(async move { registry.ensure_class(&class).await });
    let class_id = handle.await.map_err(|e| ApiError::Internal(format!("registry task failed: {}", e)))??;
    Ok(class_id)
}

/// Samsung push from loose card fields rather than a full profile.
pub async fn sign_samsung_fields(state: &AppState, fields: &SamsungCardFields) -> Result<CardToken, ApiError> {
    let push = &state.samsung.push;
    let flow = ProviderFlow::Push(PushPayload::Embedded { card: push.build_card(fields) });
    match deliver(state, push, flow).await? {
        Delivery::CardToken(token) => Ok(token),
        other => Err(unexpected(push, &other)),
    }
}

/// Samsung push from a full profile: imagery, theme and contact rows.
pub async fn sign_samsung_profile(state: &AppState, profile: &CardProfile) -> Result<CardToken, ApiError> {
    let push = &state.samsung.push;
    match provision(state, push, profile).await? {
        Delivery::CardToken(token) => Ok(token),
        other => Err(unexpected(push, &other)),
    }
}

/// Mints a pull reference and stores its REGISTERED record.
pub async fn register_pull(state: &AppState, profile: &CardProfile) -> Result<PullReference, ApiError> {
    let pull = &state.samsung.pull;
    match provision(state, pull, profile).await? {
        Delivery::PullLink(reference) => Ok(reference),
        other => Err(unexpected(pull, &other)),
    }
}
