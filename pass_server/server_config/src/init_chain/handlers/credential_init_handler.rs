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

use crate::init_chain::traits::{GoogleSigning, InitContext, InitHandler, SigningMaterial};
use config_manager::types::context::ServerConfig;
use log::{error, info};
use registry::ServiceAccountCredentials;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use token_management::SigningKey;

pub const GOOGLE_CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";
pub const SAMSUNG_KEY_ENV: &str = "SAMSUNG_PRIVATE_KEY_PATH";

/// Parses the signing keys before the server accepts requests.
///
/// A broken Samsung key stops startup. A broken Google service-account key is
/// logged and leaves Google provisioning disabled.
#[derive(Debug, Default)]
pub struct CredentialInitHandler {
    next: Option<Box<dyn InitHandler>>,
}

fn path_from_env_or(env_key: &str, configured: &str) -> PathBuf {
    match std::env::var(env_key) {
        Ok(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(configured),
    }
}

impl CredentialInitHandler {
    pub fn new() -> Self {
        CredentialInitHandler { next: None }
    }

    pub fn load(&self, config: &ServerConfig) -> Result<SigningMaterial, String> {
        let samsung_path = path_from_env_or(SAMSUNG_KEY_ENV, &config.samsung.private_key_path);
        let samsung_key = SigningKey::from_file(&samsung_path).map_err(|e| e.to_string())?;

        let google_path = path_from_env_or(GOOGLE_CREDENTIALS_ENV, &config.google.credentials_path);
        let google = match Self::load_google(&google_path) {
            Ok(google) => {
                info!("service account {} loaded", google.service_account_email);
                Some(google)
            },
            Err(e) => {
                error!("google provisioning disabled: {}", e);
                None
            },
        };
        Ok(SigningMaterial { samsung_key, google })
    }

    fn load_google(path: &Path) -> Result<GoogleSigning, String> {
        let contents = std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?;
        let credentials = ServiceAccountCredentials::from_json(&contents).map_err(|e| e.to_string())?;
        let key = SigningKey::from_pem(credentials.private_key.as_bytes()).map_err(|e| e.to_string())?;
        Ok(GoogleSigning { service_account_email: credentials.client_email, key, credentials_path: path.to_path_buf() })
    }
}

impl InitHandler for CredentialInitHandler {
    fn handle<'a>(&'a self, context: &'a mut InitContext) -> Pin<Box<dyn Future<Output = Result<(), String>> + 'a>> {
        Box::pin(async move {
            let config = context.config.as_ref().ok_or("configuration must be loaded before credentials")?;
            let signing = self.load(config)?;
            context.signing = Some(signing);

            if let Some(next) = &self.next {
                next.handle(context).await
            } else {
                Ok(())
            }
        })
    }

    fn set_next(&mut self, next: Box<dyn InitHandler>) {
        self.next = Some(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config_manager::ConfigSingleton;
    use openssl::rsa::Rsa;
    use serial_test::serial;
    use tempfile::TempDir;

    fn pem() -> String {
        String::from_utf8(Rsa::generate(2048).unwrap().private_key_to_pem().unwrap()).unwrap()
    }

    fn config(dir: &TempDir, google_valid: bool) -> ServerConfig {
        let samsung = dir.path().join("samsung.pem");
        std::fs::write(&samsung, pem()).unwrap();
        let google = dir.path().join("service_account.json");
        if google_valid {
            let sa = serde_json::json!({"client_email": "svc@demo.iam.gserviceaccount.com", "private_key": pem()});
            std::fs::write(&google, sa.to_string()).unwrap();
        }
        let yaml = format!(
            r#"
google:
  issuer_id: "3388000000022222222"
  credentials_path: "{}"
samsung:
  partner_code: "4137610299143138240"
  cert_id: "Ux0d"
  private_key_path: "{}"
  push:
    card_id: "3ir7iadicu000"
  pull:
    card_id: "3ir7iadicu001"
"#,
            google.display(),
            samsung.display()
        );
        ConfigSingleton::<ServerConfig>::parse(&yaml).unwrap()
    }

    #[tokio::test]
    #[serial]
    async fn test_loads_both_keys() {
        std::env::remove_var(SAMSUNG_KEY_ENV);
        std::env::remove_var(GOOGLE_CREDENTIALS_ENV);
        let dir = TempDir::new().unwrap();
        let mut context = InitContext::new();
        context.config = Some(config(&dir, true));

        CredentialInitHandler::new().handle(&mut context).await.unwrap();

        let signing = context.signing.unwrap();
        assert_eq!(signing.google.unwrap().service_account_email, "svc@demo.iam.gserviceaccount.com");
    }

    #[tokio::test]
    #[serial]
    async fn test_missing_google_key_is_not_fatal() {
        std::env::remove_var(SAMSUNG_KEY_ENV);
        std::env::remove_var(GOOGLE_CREDENTIALS_ENV);
        let dir = TempDir::new().unwrap();
        let mut context = InitContext::new();
        context.config = Some(config(&dir, false));

        CredentialInitHandler::new().handle(&mut context).await.unwrap();
        assert!(context.signing.unwrap().google.is_none());
    }

    #[tokio::test]
    #[serial]
    async fn test_bad_samsung_key_is_fatal() {
        let dir = TempDir::new().unwrap();
        let broken = dir.path().join("broken.pem");
        std::fs::write(&broken, "not a key").unwrap();
        std::env::set_var(SAMSUNG_KEY_ENV, &broken);
        let mut context = InitContext::new();
        context.config = Some(config(&dir, true));

        let result = CredentialInitHandler::new().handle(&mut context).await;
        std::env::remove_var(SAMSUNG_KEY_ENV);
        assert!(result.is_err());
        assert!(context.signing.is_none());
    }

    #[tokio::test]
    async fn test_requires_config() {
        let result = CredentialInitHandler::new().handle(&mut InitContext::new()).await;
        assert!(result.is_err());
    }
}
