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

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::FetchError;
use crate::record::{record_key, PullRecord};
use crate::repository::PullRecordRepository;

/// Single-process store; every operation runs under one lock.
#[derive(Default)]
pub struct InMemoryPullRecordRepository {
    records: Mutex<HashMap<String, PullRecord>>,
}

impl InMemoryPullRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

#[async_trait]
impl PullRecordRepository for InMemoryPullRecordRepository {
    async fn insert(&self, record: PullRecord) -> Result<bool, FetchError> {
        let mut records = self.records.lock();
        let key = record.key();
        if records.contains_key(&key) {
            return Ok(false);
        }
        records.insert(key, record);
        Ok(true)
    }

    async fn get(&self, card_id: &str, ref_id: &str) -> Result<Option<PullRecord>, FetchError> {
        Ok(self.records.lock().get(&record_key(card_id, ref_id)).cloned())
    }

    async fn compare_and_swap(&self, expected: &PullRecord, new: PullRecord) -> Result<bool, FetchError> {
        let mut records = self.records.lock();
        match records.get_mut(&expected.key()) {
            Some(current) if current == expected => {
                *current = new;
                Ok(true)
            },
            _ => Ok(false),
        }
    }
}
