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

use std::time::Duration;

use async_trait::async_trait;
use cache::RedisClient;
use log::debug;

use crate::error::FetchError;
use crate::record::{record_key, PullRecord};
use crate::repository::PullRecordRepository;

/// Redis backed store so several instances see the same pull state.
///
/// Records are JSON strings; the swap compares the whole stored string, so a
/// record changed by another instance is never overwritten.
pub struct RedisPullRecordRepository {
    client: RedisClient,
    ttl: Option<Duration>,
}

impl RedisPullRecordRepository {
    pub fn new(client: RedisClient, ttl: Option<Duration>) -> Self {
        Self { client, ttl }
    }
}

fn encode(record: &PullRecord) -> Result<String, FetchError> {
    serde_json::to_string(record).map_err(|e| FetchError::Serialization(e.to_string()))
}

// The redis client is blocking; keep it off the async workers.
async fn blocking<T, F>(task: F) -> Result<T, FetchError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, FetchError> + Send + 'static,
{
    tokio::task::spawn_blocking(task).await.map_err(|e| FetchError::Repository(e.to_string()))?
}

#[async_trait]
impl PullRecordRepository for RedisPullRecordRepository {
    async fn insert(&self, record: PullRecord) -> Result<bool, FetchError> {
        let key = record.key();
        let value = encode(&record)?;
        let client = self.client.clone();
        let ttl = self.ttl;
        blocking(move || Ok(client.set_nx(&key, &value, ttl)?)).await
    }

    async fn get(&self, card_id: &str, ref_id: &str) -> Result<Option<PullRecord>, FetchError> {
        let key = record_key(card_id, ref_id);
        let client = self.client.clone();
        let raw = blocking(move || Ok(client.get(&key)?)).await?;
        match raw {
            Some(raw) => serde_json::from_str(&raw).map(Some).map_err(|e| FetchError::Serialization(e.to_string())),
            None => Ok(None),
        }
    }

    async fn compare_and_swap(&self, expected: &PullRecord, new: PullRecord) -> Result<bool, FetchError> {
        let key = expected.key();
        let expected = encode(expected)?;
        let new = encode(&new)?;
        let client = self.client.clone();
        let swapped = blocking(move || Ok(client.compare_and_swap(&key, &expected, &new)?)).await?;
        debug!("pull record swap applied={}", swapped);
        Ok(swapped)
    }
}
