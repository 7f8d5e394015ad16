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

#[derive(Debug)]
pub struct InitChain {
    first_handler: Option<Box<dyn InitHandler>>,
}

impl InitChain {
    /// Executes the initialization chain by running each handler in sequence
    ///
    /// # Errors
    /// Returns the message of the first handler that fails; later handlers do not run.
    pub async fn execute(&self, context: &mut InitContext) -> Result<(), String> {
        if let Some(handler) = &self.first_handler {
            handler.handle(context).await
        } else {
            Ok(())
        }
    }

    pub fn builder() -> InitChainBuilder {
        InitChainBuilder::new()
    }
}

#[derive(Default)]
pub struct InitChainBuilder {
    handlers: Vec<Box<dyn InitHandler>>,
}

impl InitChainBuilder {
    pub fn new() -> Self {
        InitChainBuilder { handlers: Vec::new() }
    }

    pub fn add_handler<H: InitHandler + 'static>(mut self, handler: H) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    pub fn build(mut self) -> InitChain {
        if self.handlers.is_empty() {
            return InitChain { first_handler: None };
        }
        // link back to front
        for i in (0..self.handlers.len().saturating_sub(1)).rev() {
            let next = self.handlers.remove(i + 1);
            if let Some(current) = self.handlers.get_mut(i) {
                current.set_next(next);
            }
        }
        InitChain { first_handler: Some(self.handlers.remove(0)) }
    }
}
