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

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use url::Url;
use uuid::Uuid;

use crate::error::ValidationError;

pub const DEFAULT_BG_COLOR: &str = "#0A1A4F";

const PLACEHOLDER_MARKERS: [&str; 2] = ["example.com", "placeholder"];
const MAX_USER_ID_LEN: usize = 64;
// Perceived brightness above which light text becomes unreadable.
const LIGHT_BACKGROUND_THRESHOLD: f64 = 150.0;

lazy_static! {
    static ref HEX_COLOR: Regex = Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap();
}

/// Keeps an image url only when it is https and not a known placeholder.
/// Rejected urls are dropped, never reported as errors.
pub fn secure_image_url(raw: Option<&str>) -> Option<String> {
    let raw = raw.map(str::trim).filter(|v| !v.is_empty())?;
    let url = match Url::parse(raw) {
        Ok(url) => url,
        Err(e) => {
            debug!("dropping unparsable image url: {}", e);
            return None;
        },
    };
    if url.scheme() != "https" {
        debug!("dropping image url with scheme {}", url.scheme());
        return None;
    }
    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    let lowered = raw.to_ascii_lowercase();
    if host.is_empty() || PLACEHOLDER_MARKERS.iter().any(|marker| host.contains(marker) || lowered.contains(marker)) {
        debug!("dropping placeholder image url on host {}", host);
        return None;
    }
    Some(url.to_string())
}

/// `#RRGGBB` as given, otherwise the provider default.
pub fn background_color(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(color) if HEX_COLOR.is_match(color) => color.to_ascii_uppercase(),
        _ => DEFAULT_BG_COLOR.to_string(),
    }
}

/// Text colour for a `#RRGGBB` background: "dark" on bright backgrounds, else "light".
pub fn font_color(background: &str) -> &'static str {
    let channel = |range: std::ops::Range<usize>| {
        background.get(range).and_then(|hex| u8::from_str_radix(hex, 16).ok()).unwrap_or(0) as f64
    };
    let brightness = 0.299 * channel(1..3) + 0.587 * channel(3..5) + 0.114 * channel(5..7);
    if brightness > LIGHT_BACKGROUND_THRESHOLD {
        "dark"
    } else {
        "light"
    }
}

/// Checks a caller supplied id against the registry id alphabet
/// `[A-Za-z0-9._-]`. Blank ids count as absent; anything else must already be
/// valid, ids are never rewritten.
pub fn validate_user_id(raw: &str) -> Result<Option<&str>, ValidationError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    if raw.len() > MAX_USER_ID_LEN {
        return Err(ValidationError::Invalid {
            field: "userId".to_string(),
            reason: format!("longer than {} characters", MAX_USER_ID_LEN),
        });
    }
    if !raw.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')) {
        return Err(ValidationError::Invalid {
            field: "userId".to_string(),
            reason: "only letters, digits, '.', '_' and '-' are allowed".to_string(),
        });
    }
    Ok(Some(raw))
}

/// The explicit id when given, otherwise a name-based UUID of the public card
/// url, so the same card always lands on the same object.
pub fn derive_user_id(explicit: Option<&str>, public_card_url: Option<&str>) -> Result<String, ValidationError> {
    if let Some(id) = explicit.map(validate_user_id).transpose()?.flatten() {
        return Ok(id.to_string());
    }
    match public_card_url.map(str::trim).filter(|v| !v.is_empty()) {
        Some(url) => Ok(Uuid::new_v5(&Uuid::NAMESPACE_URL, url.as_bytes()).to_string()),
        None => Err(ValidationError::missing("userId or publicCardUrl required")),
    }
}
