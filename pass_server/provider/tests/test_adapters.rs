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

use provider::{
    CardProfile, FlowKind, GoogleAdapter, ProviderAdapter, ProviderFlow, PushPayload, SamsungPullAdapter,
    SamsungPushAdapter,
};

fn adapters() -> Vec<Box<dyn ProviderAdapter>> {
    vec![
        Box::new(GoogleAdapter::new("3388000000022222222", "digital_business_card")),
        Box::new(SamsungPushAdapter::new("3ir7iadicu000")),
        Box::new(SamsungPullAdapter::new("Ux0d", "3ir7iadicu001", "https://a.swallet.link/atw/v3")),
    ]
}

fn jane() -> CardProfile {
    serde_json::from_value(serde_json::json!({
        "fullName": "Jane Doe",
        "jobTitle": "Engineer",
        "companyName": "Acme",
        "email": "jane@acme.io",
        "bannerUrl": "https://cdn.acme.io/banner.png",
        "publicCardUrl": "https://cards.acme.io/jane"
    }))
    .unwrap()
}

#[test]
fn test_every_adapter_builds_its_declared_flow() {
    for adapter in adapters() {
        let flow = adapter.build(&jane()).unwrap();
        assert_eq!(flow.kind(), adapter.flow_kind(), "adapter {}", adapter.name());
    }
}

#[test]
fn test_push_adapters_embed_data_and_pull_adapters_do_not() {
    for adapter in adapters() {
        match adapter.build(&jane()).unwrap() {
            ProviderFlow::Push(PushPayload::Registry { object, .. }) => {
                assert_eq!(object.presentation["header"]["defaultValue"]["value"], "Jane Doe");
            },
            ProviderFlow::Push(PushPayload::Embedded { card }) => {
                assert_eq!(card["data"][0]["attributes"]["title"], "Jane Doe");
                assert_eq!(card["data"][0]["attributes"]["bgImage"], "https://cdn.acme.io/banner.png");
            },
            ProviderFlow::Pull(reference) => {
                assert_eq!(adapter.flow_kind(), FlowKind::Pull);
                assert!(reference.add_url.ends_with(&reference.ref_id));
                assert_eq!(reference.profile, jane());
            },
        }
    }
}

#[test]
fn test_pull_references_are_fresh_per_registration() {
    let adapter = SamsungPullAdapter::new("Ux0d", "3ir7iadicu001", "https://a.swallet.link/atw/v3");
    let refs: Vec<String> = (0..3)
        .map(|_| match adapter.build(&jane()).unwrap() {
            ProviderFlow::Pull(reference) => reference.ref_id,
            other => panic!("unexpected flow {:?}", other),
        })
        .collect();
    assert_ne!(refs[0], refs[1]);
    assert_ne!(refs[1], refs[2]);
}
