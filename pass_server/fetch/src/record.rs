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

use chrono::Utc;
use provider::{CardProfile, PullReference};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PullState {
    Registered,
    Fetched,
    Acked,
}

/// Lifecycle of one pull reference. States only move forward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRecord {
    pub card_id: String,
    pub ref_id: String,
    pub state: PullState,
    /// epoch milliseconds
    pub created_at: i64,
    pub last_event_time: Option<String>,
    pub last_event: Option<String>,
    pub profile: CardProfile,
}

impl PullRecord {
    pub fn registered(reference: &PullReference) -> Self {
        Self {
            card_id: reference.card_id.clone(),
            ref_id: reference.ref_id.clone(),
            state: PullState::Registered,
            created_at: Utc::now().timestamp_millis(),
            last_event_time: None,
            last_event: None,
            profile: reference.profile.clone(),
        }
    }

    pub fn key(&self) -> String {
        record_key(&self.card_id, &self.ref_id)
    }

    pub(crate) fn fetched(&self) -> Self {
        Self { state: PullState::Fetched, ..self.clone() }
    }

    pub(crate) fn acked(&self, event: &str) -> Self {
        Self {
            state: PullState::Acked,
            last_event_time: Some(Utc::now().to_rfc3339()),
            last_event: Some(event.to_string()),
            ..self.clone()
        }
    }
}

pub fn record_key(card_id: &str, ref_id: &str) -> String {
    format!("wallet:pull:{}:{}", card_id, ref_id)
}
