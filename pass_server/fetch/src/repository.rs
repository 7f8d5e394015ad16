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

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::FetchError;
use crate::record::PullRecord;

/// Key-value store for pull records, shared by every server instance.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PullRecordRepository: Send + Sync {
    /// Stores a new record. `Ok(false)` when the key is already taken.
    async fn insert(&self, record: PullRecord) -> Result<bool, FetchError>;

    async fn get(&self, card_id: &str, ref_id: &str) -> Result<Option<PullRecord>, FetchError>;

    /// Replaces the stored record with `new` only if it still equals `expected`.
    async fn compare_and_swap(&self, expected: &PullRecord, new: PullRecord) -> Result<bool, FetchError>;
}
