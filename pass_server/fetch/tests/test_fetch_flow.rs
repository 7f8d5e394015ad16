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

use fetch::{FetchFlowResponder, InMemoryPullRecordRepository, PullRecordRepository, PullState, UnknownReferencePolicy};
use futures::future::join_all;
use provider::{CardProfile, ProviderAdapter, ProviderFlow, PullReference, SamsungPullAdapter};

fn reference() -> PullReference {
    let adapter = SamsungPullAdapter::new("Ux0d", "3ir7iadicu001", "https://a.swallet.link/atw/v3");
    let profile = CardProfile {
        full_name: Some("Jane Doe".to_string()),
        job_title: Some("Engineer".to_string()),
        company_name: Some("Acme".to_string()),
        public_card_url: Some("https://cards.acme.io/jane".to_string()),
        ..Default::default()
    };
    match adapter.build(&profile).unwrap() {
        ProviderFlow::Pull(reference) => reference,
        other => panic!("unexpected flow {:?}", other),
    }
}

fn setup() -> (Arc<InMemoryPullRecordRepository>, FetchFlowResponder) {
    let repo = Arc::new(InMemoryPullRecordRepository::new());
    let responder = FetchFlowResponder::new(repo.clone(), UnknownReferencePolicy::OkEmpty);
    (repo, responder)
}

async fn state_of(repo: &InMemoryPullRecordRepository, reference: &PullReference) -> PullState {
    repo.get(&reference.card_id, &reference.ref_id).await.unwrap().unwrap().state
}

#[tokio::test]
async fn test_repeated_get_returns_identical_payload() {
    let (repo, responder) = setup();
    let reference = reference();
    responder.register(&reference).await.unwrap();

    let first = responder.fetch(&reference.card_id, &reference.ref_id).await.unwrap();
    let second = responder.fetch(&reference.card_id, &reference.ref_id).await.unwrap();

    assert_eq!(first.status, 200);
    assert_eq!(first, second);
    assert_eq!(first.body["card"]["data"][0]["attributes"]["title"], "Jane Doe");
    assert_eq!(state_of(&repo, &reference).await, PullState::Fetched);
}

#[tokio::test]
async fn test_ack_does_not_change_later_payload() {
    let (repo, responder) = setup();
    let reference = reference();
    responder.register(&reference).await.unwrap();

    let before = responder.fetch(&reference.card_id, &reference.ref_id).await.unwrap();
    let ack = responder.acknowledge(&reference.card_id, &reference.ref_id, Some("ADDED")).await.unwrap();
    let after = responder.fetch(&reference.card_id, &reference.ref_id).await.unwrap();

    assert_eq!(ack.body["result"], "SUCCESS");
    assert_eq!(ack.body["refId"], reference.ref_id.as_str());
    assert_eq!(before, after);
    let record = repo.get(&reference.card_id, &reference.ref_id).await.unwrap().unwrap();
    assert_eq!(record.state, PullState::Acked);
    assert_eq!(record.last_event.as_deref(), Some("ADDED"));
    assert!(record.last_event_time.is_some());
}

#[tokio::test]
async fn test_ack_before_fetch_goes_straight_to_acked() {
    let (repo, responder) = setup();
    let reference = reference();
    responder.register(&reference).await.unwrap();

    responder.acknowledge(&reference.card_id, &reference.ref_id, None).await.unwrap();
    responder.fetch(&reference.card_id, &reference.ref_id).await.unwrap();

    assert_eq!(state_of(&repo, &reference).await, PullState::Acked);
}

#[tokio::test]
async fn test_repeated_ack_keeps_first_event() {
    let (repo, responder) = setup();
    let reference = reference();
    responder.register(&reference).await.unwrap();

    responder.acknowledge(&reference.card_id, &reference.ref_id, Some("ADDED")).await.unwrap();
    let again = responder.acknowledge(&reference.card_id, &reference.ref_id, Some("DELETED")).await.unwrap();

    assert_eq!(again.body["result"], "SUCCESS");
    let record = repo.get(&reference.card_id, &reference.ref_id).await.unwrap().unwrap();
    assert_eq!(record.last_event.as_deref(), Some("ADDED"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_callbacks_end_acked() {
    let (repo, responder) = setup();
    let responder = Arc::new(responder);
    let reference = reference();
    responder.register(&reference).await.unwrap();

    let tasks = (0..32).map(|i| {
        let responder = responder.clone();
        let reference = reference.clone();
        tokio::spawn(async move {
            if i % 2 == 0 {
                responder.fetch(&reference.card_id, &reference.ref_id).await.unwrap()
            } else {
                responder.acknowledge(&reference.card_id, &reference.ref_id, None).await.unwrap()
            }
        })
    });
    for response in join_all(tasks).await {
        assert_eq!(response.unwrap().status, 200);
    }

    assert_eq!(state_of(&repo, &reference).await, PullState::Acked);
}

#[tokio::test]
async fn test_register_twice_is_rejected() {
    let (repo, responder) = setup();
    let reference = reference();
    responder.register(&reference).await.unwrap();
    assert!(responder.register(&reference).await.is_err());
    assert_eq!(repo.len(), 1);
}
