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

use crate::init_chain::traits::{InitContext, InitHandler};
use config_manager::types::context::{ServerConfig, CONFIG};
use env_config_parse::find_file;
use log::info;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

const CONFIG_FILE_NAME: &str = "server_config.yaml";
const CONFIG_PATH_ENV: &str = "WALLET_SERVER_CONFIG";

#[derive(Debug, Default)]
pub struct ConfigInitHandler {
    next: Option<Box<dyn InitHandler>>,
}

impl ConfigInitHandler {
    pub fn new() -> Self {
        ConfigInitHandler { next: None }
    }

    /// `WALLET_SERVER_CONFIG` when set, otherwise the first `server_config.yaml`
    /// below the working directory.
    fn config_path(&self) -> Result<PathBuf, String> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.is_empty() => Ok(PathBuf::from(path)),
            _ => find_file(CONFIG_FILE_NAME),
        }
    }

    fn load_config(&self) -> Result<ServerConfig, String> {
        let config_path = self.config_path()?;
        info!("Loading configuration from {}", config_path.display());
        CONFIG.initialize(&config_path)?;
        Ok(CONFIG.get_instance()?.clone())
    }
}

impl InitHandler for ConfigInitHandler {
    fn handle<'a>(&'a self, context: &'a mut InitContext) -> Pin<Box<dyn Future<Output = Result<(), String>> + 'a>> {
        Box::pin(async move {
            let config = self.load_config()?;
            context.config = Some(config);

            if let Some(next) = &self.next {
                next.handle(context).await
            } else {
                Ok(())
            }
        })
    }

    fn set_next(&mut self, next: Box<dyn InitHandler>) {
        self.next = Some(next);
    }
}
