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

use actix_web::{middleware, web, App, HttpServer};
use log::{error, info};
use server_config::{ConfigInitHandler, CredentialInitHandler, InitChainBuilder, InitContext, LoggerInitHandler};
use wallet_passd::middlewares::request_logger::RequestLogger;
use wallet_passd::routes::routes::configure_app;
use wallet_passd::state::AppState;
use wallet_passd::utils::env_setting_center::{default_not_found_page, get_address, load_env};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("Program started!");
    // load env
    load_env();
    let chain = InitChainBuilder::new()
        .add_handler(LoggerInitHandler::new())
        .add_handler(ConfigInitHandler::new())
        .add_handler(CredentialInitHandler::new())
        .build();

    let mut context = InitContext::new();
    if let Err(e) = chain.execute(&mut context).await {
        eprintln!("initialization failed: {}", e);
        return Err(std::io::Error::new(std::io::ErrorKind::Other, e));
    }
    let server_config = match context.config.as_ref() {
        Some(config) => config.server.clone(),
        None => return Err(std::io::Error::new(std::io::ErrorKind::Other, "configuration not loaded")),
    };
    let state = match AppState::from_context(context) {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            error!("failed to build application state: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e));
        },
    };
    if let Err(e) = &state.google {
        error!("google wallet routes disabled: {}", e);
    }

    let address = get_address(&server_config);
    info!("wallet pass service listening on {}", address);
    let max_json_size = server_config.max_json_size;
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .wrap(RequestLogger::new())
            .configure(|cfg| configure_app(cfg, state.clone(), max_json_size))
            .default_service(web::route().to(default_not_found_page))
    })
    .bind(address)?
    .run()
    .await
}
