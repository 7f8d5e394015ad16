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

use std::sync::Arc;

use log::{debug, info, warn};
use provider::{fetch_payload, PullReference};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::FetchError;
use crate::record::{PullRecord, PullState};
use crate::repository::PullRecordRepository;

const DEFAULT_EVENT: &str = "UPDATED";
// Forward-only transitions mean a writer can lose at most twice.
const MAX_SWAP_ATTEMPTS: usize = 3;

/// Answer for references the store does not know.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownReferencePolicy {
    /// 200 with an empty object; the provider retries on anything else
    #[default]
    OkEmpty,
    /// 404 with an error body
    NotFound,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PullResponse {
    pub status: u16,
    pub body: Value,
}

impl PullResponse {
    fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }
}

/// Serves provider callbacks for pull references.
///
/// REGISTERED goes to FETCHED on the first GET and to ACKED on the first
/// POST. Repeated callbacks never move a record backwards and always return
/// the same payload, which is derived from the stored snapshot only.
pub struct FetchFlowResponder {
    repository: Arc<dyn PullRecordRepository>,
    policy: UnknownReferencePolicy,
}

impl FetchFlowResponder {
    pub fn new(repository: Arc<dyn PullRecordRepository>, policy: UnknownReferencePolicy) -> Self {
        Self { repository, policy }
    }

    pub fn policy(&self) -> UnknownReferencePolicy {
        self.policy
    }

    /// Stores a fresh REGISTERED record for a minted pull link.
    pub async fn register(&self, reference: &PullReference) -> Result<PullRecord, FetchError> {
        let record = PullRecord::registered(reference);
        if !self.repository.insert(record.clone()).await? {
            return Err(FetchError::AlreadyRegistered(reference.ref_id.clone()));
        }
        info!("pull reference {} registered for card {}", record.ref_id, record.card_id);
        Ok(record)
    }

    /// Provider GET: returns the card payload.
    pub async fn fetch(&self, card_id: &str, ref_id: &str) -> Result<PullResponse, FetchError> {
        for _ in 0..MAX_SWAP_ATTEMPTS {
            let record = match self.repository.get(card_id, ref_id).await? {
                Some(record) => record,
                None => return Ok(self.unknown(card_id, ref_id)),
            };
            if record.state != PullState::Registered {
                return Ok(PullResponse::ok(payload(&record)));
            }
            if self.repository.compare_and_swap(&record, record.fetched()).await? {
                debug!("pull reference {} fetched", ref_id);
                return Ok(PullResponse::ok(payload(&record)));
            }
            debug!("pull reference {} changed concurrently, re-reading", ref_id);
        }
        self.current_payload(card_id, ref_id).await
    }

    /// Provider POST status callback: records the event and acknowledges.
    pub async fn acknowledge(&self, card_id: &str, ref_id: &str, event: Option<&str>) -> Result<PullResponse, FetchError> {
        let event = event.map(str::trim).filter(|e| !e.is_empty()).unwrap_or(DEFAULT_EVENT);
        for _ in 0..MAX_SWAP_ATTEMPTS {
            let record = match self.repository.get(card_id, ref_id).await? {
                Some(record) => record,
                None => return Ok(self.unknown(card_id, ref_id)),
            };
            if record.state == PullState::Acked {
                return Ok(ack(ref_id));
            }
            if self.repository.compare_and_swap(&record, record.acked(event)).await? {
                info!("pull reference {} acknowledged with event {}", ref_id, event);
                return Ok(ack(ref_id));
            }
            debug!("pull reference {} changed concurrently, re-reading", ref_id);
        }
        warn!("pull reference {} kept changing, acknowledging without update", ref_id);
        Ok(ack(ref_id))
    }

    async fn current_payload(&self, card_id: &str, ref_id: &str) -> Result<PullResponse, FetchError> {
        match self.repository.get(card_id, ref_id).await? {
            Some(record) => Ok(PullResponse::ok(payload(&record))),
            None => Ok(self.unknown(card_id, ref_id)),
        }
    }

    /// Reply for an unknown or malformed reference.
    pub fn unknown(&self, card_id: &str, ref_id: &str) -> PullResponse {
        debug!("unknown pull reference {}/{}", card_id, ref_id);
        match self.policy {
            UnknownReferencePolicy::OkEmpty => PullResponse::ok(json!({})),
            UnknownReferencePolicy::NotFound => PullResponse {
                status: 404,
                body: json!({ "error": "Card not found", "requestedCardId": card_id }),
            },
        }
    }
}

fn payload(record: &PullRecord) -> Value {
    fetch_payload(&record.ref_id, &record.profile, record.created_at, record.created_at)
}

fn ack(ref_id: &str) -> PullResponse {
    PullResponse::ok(json!({ "result": "SUCCESS", "refId": ref_id }))
}
