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

use log::{debug, info};

use crate::error::RegistryError;
use crate::model::{WalletClassDescriptor, WalletObjectRecord};
use crate::transport::{RegistryRequest, RegistryResponse, RegistryTransport};

const CLASS_COLLECTION: &str = "genericClass";
const OBJECT_COLLECTION: &str = "genericObject";
const NOT_FOUND: u16 = 404;
const CONFLICT: u16 = 409;

/// Idempotent writes against the pass registry.
///
/// There is no local record of what exists remotely. Both operations are
/// check-then-act and rely on the registry deduplicating by id, so two
/// concurrent callers may both create; the loser sees 409 and converges.
#[derive(Clone)]
pub struct PassRegistryClient {
    transport: Arc<dyn RegistryTransport>,
}

impl PassRegistryClient {
    pub fn new(transport: Arc<dyn RegistryTransport>) -> Self {
        Self { transport }
    }

    /// Makes sure the class exists and returns its id.
    pub async fn ensure_class(&self, descriptor: &WalletClassDescriptor) -> Result<String, RegistryError> {
        let lookup = self
            .transport
            .execute(RegistryRequest::get(format!("{}/{}", CLASS_COLLECTION, descriptor.id)))
            .await?;
        if lookup.is_success() {
            debug!("class {} already registered", descriptor.id);
            return Ok(descriptor.id.clone());
        }
        if lookup.status != NOT_FOUND {
            return Err(upstream(lookup));
        }

        let created = self
            .transport
            .execute(RegistryRequest::post(CLASS_COLLECTION, descriptor.to_registry_json()))
            .await?;
        match created.status {
            _ if created.is_success() => {
                info!("class {} created", descriptor.id);
                Ok(descriptor.id.clone())
            },
            CONFLICT => {
                debug!("class {} created concurrently", descriptor.id);
                Ok(descriptor.id.clone())
            },
            _ => Err(upstream(created)),
        }
    }

    /// Creates the object, or fully replaces it when it already exists.
    pub async fn upsert_object(&self, record: &WalletObjectRecord) -> Result<String, RegistryError> {
        let body = record.to_registry_json();
        let created = self
            .transport
            .execute(RegistryRequest::post(OBJECT_COLLECTION, body.clone()))
            .await?;
        if created.is_success() {
            info!("object {} created", record.id);
            return Ok(record.id.clone());
        }
        if created.status != CONFLICT {
            return Err(upstream(created));
        }

        let replaced = self
            .transport
            .execute(RegistryRequest::put(format!("{}/{}", OBJECT_COLLECTION, record.id), body))
            .await?;
        if replaced.is_success() {
            info!("object {} replaced", record.id);
            Ok(record.id.clone())
        } else {
            Err(upstream(replaced))
        }
    }
}

fn upstream(response: RegistryResponse) -> RegistryError {
    RegistryError::upstream(response.status, &response.body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ObjectState;
    use crate::transport::{MockRegistryTransport, RegistryMethod};
    use mockall::predicate::eq;
    use mockall::Sequence;
    use serde_json::{json, Map};

    fn class() -> WalletClassDescriptor {
        WalletClassDescriptor { id: "3388.card".to_string(), class_template_info: json!({}) }
    }

    fn object() -> WalletObjectRecord {
        WalletObjectRecord {
            id: "3388.jane".to_string(),
            class_id: "3388.card".to_string(),
            state: ObjectState::Active,
            attributes: Vec::new(),
            barcode_value: None,
            presentation: Map::new(),
        }
    }

    #[tokio::test]
    async fn test_ensure_class_swallows_conflict() {
        let mut transport = MockRegistryTransport::new();
        let mut seq = Sequence::new();
        transport
            .expect_execute()
            .with(eq(RegistryRequest::get("genericClass/3388.card")))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(RegistryResponse::new(404, "")));
        transport
            .expect_execute()
            .withf(|req| req.method == RegistryMethod::Post && req.path == "genericClass")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(RegistryResponse::new(409, r#"{"error":{"message":"exists"}}"#)));

        let client = PassRegistryClient::new(Arc::new(transport));
        assert_eq!(client.ensure_class(&class()).await.unwrap(), "3388.card");
    }

    #[tokio::test]
    async fn test_ensure_class_existing_skips_create() {
        let mut transport = MockRegistryTransport::new();
        transport.expect_execute().times(1).returning(|_| Ok(RegistryResponse::new(200, "{}")));
        let client = PassRegistryClient::new(Arc::new(transport));
        assert_eq!(client.ensure_class(&class()).await.unwrap(), "3388.card");
    }

    #[tokio::test]
    async fn test_ensure_class_lookup_failure_is_upstream() {
        let mut transport = MockRegistryTransport::new();
        transport.expect_execute().times(1).returning(|_| Ok(RegistryResponse::new(403, "denied")));
        let client = PassRegistryClient::new(Arc::new(transport));
        match client.ensure_class(&class()).await {
            Err(RegistryError::Upstream { status, .. }) => assert_eq!(status, 403),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_upsert_conflict_replaces() {
        let mut transport = MockRegistryTransport::new();
        let mut seq = Sequence::new();
        transport
            .expect_execute()
            .withf(|req| req.method == RegistryMethod::Post && req.path == "genericObject")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(RegistryResponse::new(409, "")));
        transport
            .expect_execute()
            .withf(|req| req.method == RegistryMethod::Put && req.path == "genericObject/3388.jane")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(RegistryResponse::new(200, "{}")));

        let client = PassRegistryClient::new(Arc::new(transport));
        assert_eq!(client.upsert_object(&object()).await.unwrap(), "3388.jane");
    }

    #[tokio::test]
    async fn test_upsert_rejected_is_not_retried() {
        let mut transport = MockRegistryTransport::new();
        transport.expect_execute().times(1).returning(|_| Ok(RegistryResponse::new(400, "bad object")));
        let client = PassRegistryClient::new(Arc::new(transport));
        assert!(matches!(
            client.upsert_object(&object()).await,
            Err(RegistryError::Upstream { status: 400, .. })
        ));
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let mut transport = MockRegistryTransport::new();
        transport
            .expect_execute()
            .times(1)
            .returning(|_| Err(RegistryError::Transport("timed out".to_string())));
        let client = PassRegistryClient::new(Arc::new(transport));
        assert!(matches!(client.upsert_object(&object()).await, Err(RegistryError::Transport(_))));
    }
}
