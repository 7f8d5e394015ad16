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

//! Maps a card profile onto each wallet provider's schema.
//!
//! A provider works either in push mode (the signed token carries the card)
//! or in pull mode (the link carries a reference and the provider fetches
//! the card later). Each adapter declares exactly one of the two.

pub mod error;
pub mod google;
pub mod model;
pub mod policy;
pub mod samsung;

pub use error::ValidationError;
pub use google::GoogleAdapter;
pub use model::{CardProfile, FlowKind, ProviderAdapter, ProviderFlow, PullReference, PushPayload};
pub use samsung::{add_to_wallet_url, card_object, fetch_payload, SamsungCardFields, SamsungPullAdapter, SamsungPushAdapter};
