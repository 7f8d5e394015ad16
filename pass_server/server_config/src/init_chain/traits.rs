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

use config_manager::types::context::ServerConfig;
use std::fmt::Debug;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use token_management::SigningKey;

pub trait InitHandler: Debug {
    fn handle<'a>(&'a self, context: &'a mut InitContext) -> Pin<Box<dyn Future<Output = Result<(), String>> + 'a>>;
    fn set_next(&mut self, next: Box<dyn InitHandler>);
}

/// Service-account identity used for save links and registry access
#[derive(Debug, Clone)]
pub struct GoogleSigning {
    pub service_account_email: String,
    pub key: SigningKey,
    pub credentials_path: PathBuf,
}

/// Key material parsed once at startup
#[derive(Debug, Clone)]
pub struct SigningMaterial {
    pub samsung_key: SigningKey,
    /// `None` when the service-account key could not be loaded; Google
    /// provisioning is then refused until the process is restarted.
    pub google: Option<GoogleSigning>,
}

#[derive(Debug, Default)]
pub struct InitContext {
    // data shared along the initialization chain
    pub config: Option<ServerConfig>,
    pub signing: Option<SigningMaterial>,
}

impl InitContext {
    pub fn new() -> Self {
        Self::default()
    }
}
