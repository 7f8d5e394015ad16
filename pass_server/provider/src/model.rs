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

use registry::{WalletClassDescriptor, WalletObjectRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;

/// Snapshot of a business card as submitted by the dashboard.
///
/// Every provisioning call carries the whole profile; provider state is
/// replaced from it, never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardProfile {
    pub full_name: Option<String>,
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub theme_color: Option<String>,
    pub avatar_url: Option<String>,
    pub banner_url: Option<String>,
    pub public_card_url: Option<String>,
}

/// Trimmed value, `None` when absent or blank.
pub(crate) fn text(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl CardProfile {
    pub fn full_name(&self) -> Option<&str> {
        text(&self.full_name)
    }

    pub fn public_card_url(&self) -> Option<&str> {
        text(&self.public_card_url)
    }

    /// "{job title} @ {company}", falling back to "Professional" for the title part.
    pub fn subtitle(&self) -> String {
        let job = text(&self.job_title).unwrap_or(DEFAULT_SUBTITLE);
        match text(&self.company_name) {
            Some(company) => format!("{} @ {}", job, company),
            None => job.to_string(),
        }
    }

    /// Contact rows in display order: (id, label, value)
    pub fn contact_rows(&self) -> Vec<(&'static str, &'static str, &str)> {
        [
            ("email", "Email", &self.email),
            ("phone", "Phone", &self.phone),
            ("website", "Website", &self.website),
            ("address", "Address", &self.address),
        ]
        .into_iter()
        .filter_map(|(id, label, value)| text(value).map(|v| (id, label, v)))
        .collect()
    }

    pub fn require_public_card_url(&self) -> Result<&str, ValidationError> {
        self.public_card_url().ok_or_else(|| ValidationError::missing("publicCardUrl required"))
    }
}

pub const DEFAULT_TITLE: &str = "Digital Business Card";
pub const DEFAULT_SUBTITLE: &str = "Professional";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowKind {
    /// the hand-off token embeds the card
    Push,
    /// the hand-off link carries a reference, the provider fetches later
    Pull,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PushPayload {
    /// Written to the pass registry first, then referenced by a save link.
    Registry { class: WalletClassDescriptor, object: WalletObjectRecord },
    /// Signed as-is into the hand-off token.
    Embedded { card: Value },
}

/// Stable pointer handed to a pull provider; no card data travels with it.
#[derive(Debug, Clone, PartialEq)]
pub struct PullReference {
    pub card_id: String,
    pub ref_id: String,
    pub add_url: String,
    /// Captured at registration; later fetches are answered from it.
    pub profile: CardProfile,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProviderFlow {
    Push(PushPayload),
    Pull(PullReference),
}

impl ProviderFlow {
    pub fn kind(&self) -> FlowKind {
        match self {
            ProviderFlow::Push(_) => FlowKind::Push,
            ProviderFlow::Pull(_) => FlowKind::Pull,
        }
    }
}

pub trait ProviderAdapter: Send + Sync {
    fn name(&self) -> &'static str;

    /// The single flow this provider works in.
    fn flow_kind(&self) -> FlowKind;

    fn build(&self, profile: &CardProfile) -> Result<ProviderFlow, ValidationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_deserializes_camel_case() {
        let profile: CardProfile = serde_json::from_str(
            r#"{"fullName":"Jane Doe","jobTitle":"CTO","companyName":"Acme","publicCardUrl":"https://x/y","unknown":1}"#,
        )
        .unwrap();
        assert_eq!(profile.full_name(), Some("Jane Doe"));
        assert_eq!(profile.subtitle(), "CTO @ Acme");
        assert_eq!(profile.public_card_url(), Some("https://x/y"));
    }

    #[test]
    fn test_subtitle_defaults() {
        let mut profile = CardProfile::default();
        assert_eq!(profile.subtitle(), "Professional");
        profile.company_name = Some("Acme".to_string());
        assert_eq!(profile.subtitle(), "Professional @ Acme");
    }

    #[test]
    fn test_contact_rows_skip_blank_fields() {
        let profile = CardProfile {
            email: Some("jane@acme.io".to_string()),
            phone: Some("   ".to_string()),
            address: Some("1 Main St".to_string()),
            ..Default::default()
        };
        let ids: Vec<&str> = profile.contact_rows().iter().map(|(id, _, _)| *id).collect();
        assert_eq!(ids, vec!["email", "address"]);
    }

    #[test]
    fn test_missing_public_card_url_message() {
        let err = CardProfile::default().require_public_card_url().unwrap_err();
        assert_eq!(err.to_string(), "publicCardUrl required");
    }
}
