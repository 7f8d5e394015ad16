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

use actix_web::web;

use crate::controllers::{fetch_controller, google_controller, samsung_controller};
use crate::state::AppState;
use crate::utils::api_error::ApiError;

/// Prefixes the wallet routes are mounted under; the second keeps older
/// Samsung integrations working.
pub const API_SCOPES: [&str; 2] = ["/api/wallet", "/api/samsung-wallet"];

/// configure routes
pub fn configure_wallet_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/create-pass", web::post().to(google_controller::create_pass))
        .route("/update-pass", web::post().to(google_controller::update_pass))
        .route("/init-class", web::post().to(google_controller::init_class))
        .route("/generate-token", web::post().to(samsung_controller::generate_token))
        .route("/create", web::post().to(samsung_controller::create_card))
        .route("/register-card", web::post().to(samsung_controller::register_card))
        .route("/health", web::get().to(samsung_controller::health));

    cfg.service(
        web::resource("/cards/{card_id}/{ref_id}")
            .route(web::get().to(fetch_controller::get_card))
            .route(web::post().to(fetch_controller::post_card))
            .default_service(web::to(fetch_controller::unknown_card)),
    )
    .service(web::resource(["/cards", "/cards/{tail:.*}"]).to(fetch_controller::unknown_card));
}

pub fn json_config(max_json_size: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(max_json_size)
        .error_handler(|err, _| ApiError::invalid("body", err).into())
}

/// Mounts the wallet routes under every API scope with shared state.
pub fn configure_app(cfg: &mut web::ServiceConfig, state: web::Data<AppState>, max_json_size: usize) {
    for prefix in API_SCOPES {
        cfg.service(
            web::scope(prefix)
                .app_data(state.clone())
                .app_data(json_config(max_json_size))
                .configure(configure_wallet_routes),
        );
    }
}
