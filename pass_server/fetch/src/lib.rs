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

pub mod error;
pub mod memory_repository;
pub mod record;
pub mod redis_repository;
pub mod repository;
pub mod responder;

pub use error::FetchError;
pub use memory_repository::InMemoryPullRecordRepository;
pub use record::{PullRecord, PullState};
pub use redis_repository::RedisPullRecordRepository;
pub use repository::PullRecordRepository;
pub use responder::{FetchFlowResponder, PullResponse, UnknownReferencePolicy};
