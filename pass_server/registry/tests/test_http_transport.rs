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
use std::time::Duration;

use openssl::rsa::Rsa;
use registry::{
    AuthClientCache, AuthError, FileCredentialSource, HttpRegistryTransport, PassRegistryClient, RegistryError,
    WalletClassDescriptor,
};
use serde_json::json;
use tempfile::NamedTempFile;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_credentials(token_uri: &str) -> NamedTempFile {
    let rsa = Rsa::generate(2048).unwrap();
    let pem = String::from_utf8(rsa.private_key_to_pem().unwrap()).unwrap();
    let contents = json!({
        "type": "service_account",
        "client_email": "issuer@demo-project.iam.gserviceaccount.com",
        "private_key": pem,
        "private_key_id": "kid-1",
        "token_uri": token_uri,
    });
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), contents.to_string()).unwrap();
    file
}

fn descriptor() -> WalletClassDescriptor {
    WalletClassDescriptor { id: "3388.digital_business_card".to_string(), class_template_info: json!({}) }
}

async fn mount_token(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "ya29.test-token",
            "expires_in": 3600,
            "token_type": "Bearer"
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_handshake_runs_once_and_bearer_is_sent() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    Mock::given(method("GET"))
        .and(path("/walletobjects/v1/genericClass/3388.digital_business_card"))
        .and(header("authorization", "Bearer ya29.test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "3388.digital_business_card"})))
        .expect(2)
        .mount(&server)
        .await;

    let creds = write_credentials(&format!("{}/token", server.uri()));
    let cache = Arc::new(AuthClientCache::new(
        Arc::new(FileCredentialSource::new(creds.path())),
        Duration::from_secs(5),
    ));
    let transport = HttpRegistryTransport::new(cache.clone(), format!("{}/walletobjects/v1/", server.uri()));
    let client = PassRegistryClient::new(Arc::new(transport));

    assert_eq!(client.ensure_class(&descriptor()).await.unwrap(), "3388.digital_business_card");
    assert_eq!(client.ensure_class(&descriptor()).await.unwrap(), "3388.digital_business_card");
}

#[tokio::test]
async fn test_rejected_credentials_fail_every_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid_grant"))
        .expect(1)
        .mount(&server)
        .await;

    let creds = write_credentials(&format!("{}/token", server.uri()));
    let cache = Arc::new(AuthClientCache::new(
        Arc::new(FileCredentialSource::new(creds.path())),
        Duration::from_secs(5),
    ));
    let client = PassRegistryClient::new(Arc::new(HttpRegistryTransport::new(cache.clone(), server.uri())));

    for _ in 0..3 {
        match client.ensure_class(&descriptor()).await {
            Err(RegistryError::Auth(AuthError::Rejected { status, .. })) => assert_eq!(status, 401),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_missing_key_file_is_auth_error() {
    let cache = AuthClientCache::new(
        Arc::new(FileCredentialSource::new("/nonexistent/service-account.json")),
        Duration::from_secs(1),
    );
    assert!(matches!(cache.get_client().await, Err(AuthError::MissingCredentials(_))));
}

#[tokio::test]
async fn test_token_exchange_retries_once_on_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .expect(2)
        .mount(&server)
        .await;

    let creds = write_credentials(&format!("{}/token", server.uri()));
    let cache = AuthClientCache::new(
        Arc::new(FileCredentialSource::new(creds.path())),
        Duration::from_millis(200),
    );
    assert!(matches!(cache.get_client().await, Err(AuthError::Transport(_))));
}

#[tokio::test]
async fn test_upstream_error_status_is_not_retried() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    Mock::given(method("GET"))
        .and(path("/genericClass/3388.digital_business_card"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error": {"code": 500, "message": "backend error"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let creds = write_credentials(&format!("{}/token", server.uri()));
    let cache = Arc::new(AuthClientCache::new(
        Arc::new(FileCredentialSource::new(creds.path())),
        Duration::from_secs(5),
    ));
    let client = PassRegistryClient::new(Arc::new(HttpRegistryTransport::new(cache, server.uri())));

    match client.ensure_class(&descriptor()).await {
        Err(RegistryError::Upstream { status, detail }) => {
            assert_eq!(status, 500);
            assert_eq!(detail, "backend error");
        },
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_handshake_recovers_after_token_endpoint_timeout() {
    let server = MockServer::start().await;
    // first call and its retry time out
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    mount_token(&server, 1).await;

    let creds = write_credentials(&format!("{}/token", server.uri()));
    let cache = AuthClientCache::new(
        Arc::new(FileCredentialSource::new(creds.path())),
        Duration::from_millis(200),
    );

    assert!(matches!(cache.get_client().await, Err(AuthError::Transport(_))));
    let client = cache.get_client().await.unwrap();
    assert_eq!(client.service_account_email(), "issuer@demo-project.iam.gserviceaccount.com");
}
