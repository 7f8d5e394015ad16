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

use log::warn;
use reqwest::{RequestBuilder, Response};

/// Sends the request built by `build`, retrying once when the first attempt
/// failed before any response arrived (timeout, connect or request error).
/// HTTP error statuses are returned as responses and never retried.
pub async fn send_with_single_retry<F>(build: F) -> Result<Response, reqwest::Error>
where
    F: Fn() -> RequestBuilder,
{
    match build().send().await {
        Ok(response) => Ok(response),
        Err(e) if is_transient(&e) => {
            warn!("request failed ({}), retrying once", e);
            build().send().await
        },
        Err(e) => Err(e),
    }
}

fn is_transient(e: &reqwest::Error) -> bool {
    e.is_timeout() || e.is_connect() || e.is_request()
}
