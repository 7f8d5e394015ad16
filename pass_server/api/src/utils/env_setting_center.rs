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

use actix_web::{HttpRequest, HttpResponse};
use config_manager::types::context::HttpServerConfig;
use env_config_parse::{find_file, get_env_value_or_default};
use log::info;
use serde_json::json;

pub const SERVER_PORT_ENV: &str = "SERVER_PORT";

pub async fn default_not_found_page(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "success": false,
        "error": "Endpoint not found",
        "path": req.path(),
    }))
}

/// Loads `.env` from below the working directory when present.
pub fn load_env() {
    match find_file(".env") {
        Ok(path) => match dotenv::from_path(&path) {
            Ok(()) => info!("environment loaded from {}", path.display()),
            Err(e) => info!("ignoring {}: {}", path.display(), e),
        },
        Err(_) => info!("no .env file found, using process environment"),
    }
}

/// `bind_address:port`, the port overridable through `SERVER_PORT`.
pub fn get_address(server: &HttpServerConfig) -> String {
    let port = get_env_value_or_default(SERVER_PORT_ENV, server.port);
    format!("{}:{}", server.bind_address, port)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_port_env_overrides_config() {
        let server = HttpServerConfig { bind_address: "127.0.0.1".to_string(), port: 3001, max_json_size: 1024 };
        std::env::remove_var(SERVER_PORT_ENV);
        assert_eq!(get_address(&server), "127.0.0.1:3001");
        std::env::set_var(SERVER_PORT_ENV, "8080");
        assert_eq!(get_address(&server), "127.0.0.1:8080");
        std::env::remove_var(SERVER_PORT_ENV);
    }
}
