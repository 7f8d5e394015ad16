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

pub mod init_chain;

pub use init_chain::chain::builder::{InitChain, InitChainBuilder};
pub use init_chain::handlers::config_init_handler::ConfigInitHandler;
pub use init_chain::handlers::credential_init_handler::CredentialInitHandler;
pub use init_chain::handlers::logger_init_handler::LoggerInitHandler;
pub use init_chain::traits::{GoogleSigning, InitContext, InitHandler, SigningMaterial};
