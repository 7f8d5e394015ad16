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
use log::info;
use std::future::Future;
use std::pin::Pin;

#[derive(Debug, Default)]
pub struct LoggerInitHandler {
    next: Option<Box<dyn InitHandler>>,
}

impl LoggerInitHandler {
    pub fn new() -> LoggerInitHandler {
        LoggerInitHandler { next: None }
    }

    /// Initializes log4rs from `logging.yaml`. A logger installed earlier in
    /// the process is kept.
    pub fn init_logger(&self) -> Result<(), String> {
        if common_log::is_initialized() {
            return Ok(());
        }
        common_log::init().map_err(|e| format!("failed to init logger: {}", e))?;
        info!("Logger initialized");
        Ok(())
    }
}

impl InitHandler for LoggerInitHandler {
    fn handle<'a>(&'a self, context: &'a mut InitContext) -> Pin<Box<dyn Future<Output = Result<(), String>> + 'a>> {
        Box::pin(async move {
            self.init_logger()?;
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
