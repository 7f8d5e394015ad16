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

//! Client side of the pass registry: the cached OAuth2 handshake and the
//! idempotent class/object upserts.

pub mod auth;
pub mod client;
pub mod error;
pub mod model;
pub mod retry;
pub mod transport;

pub use auth::{AuthClientCache, AuthenticatedClient, CredentialSource, FileCredentialSource, ServiceAccountCredentials};
pub use client::PassRegistryClient;
pub use error::{AuthError, RegistryError};
pub use model::{ObjectAttribute, ObjectState, WalletClassDescriptor, WalletObjectRecord};
pub use transport::{HttpRegistryTransport, RegistryMethod, RegistryRequest, RegistryResponse, RegistryTransport};
