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

use crate::config::{LogConfig, LoggerConfig};
use chrono::{DateTime, Local};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::rolling_file::policy::compound::roll::fixed_window::FixedWindowRoller;
use log4rs::append::rolling_file::policy::compound::trigger::size::SizeTrigger;
use log4rs::append::rolling_file::policy::compound::CompoundPolicy;
use log4rs::filter::threshold::ThresholdFilter;
use log4rs::{
    append::rolling_file::RollingFileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    Config, Handle,
};
use std::env;
use std::path::PathBuf;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S:%3f)} {l} [{M}:{L}] - {m}{n}";
const ROOT_APPENDER: &str = "root_appender";
const STDOUT_APPENDER: &str = "stdout";

pub struct Logger {
    #[allow(dead_code)]
    handle: Handle,
}

impl Logger {
    pub fn new_from_yaml(config_path: impl Into<PathBuf>) -> Result<Self, Box<dyn std::error::Error>> {
        Self::new_from_config(LogConfig::from_yaml(config_path)?)
    }

    pub fn new_from_config(config: LogConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let handle = log4rs::init_config(Self::build_config(&config)?)?;
        Ok(Self { handle })
    }

    /// Builds the log4rs configuration: one rolling file appender per logger
    /// entry, the `root` entry attached to the root logger.
    pub fn build_config(config: &LogConfig) -> Result<Config, Box<dyn std::error::Error>> {
        let mut builder = Config::builder();

        for logger_config in config.loggers.iter().filter(|l| l.path_prefix != "root") {
            let appender_name = format!("{}_appender", logger_config.path_prefix);
            builder = builder.appender(
                Appender::builder().build(&appender_name, Box::new(Self::create_appender(logger_config)?)),
            );
            let logger = log4rs::config::Logger::builder()
                .appender(appender_name)
                .additive(false)
                .build(logger_config.path_prefix.clone(), Self::parse_level(&logger_config.level));
            builder = builder.logger(logger);
        }

        let mut root_appenders = Vec::new();
        let root_level = match config.get_root_config() {
            Some(root_config) => {
                builder = builder.appender(
                    Appender::builder().build(ROOT_APPENDER, Box::new(Self::create_appender(root_config)?)),
                );
                root_appenders.push(ROOT_APPENDER);
                Self::parse_level(&root_config.level)
            },
            None => LevelFilter::Info,
        };

        if config.console {
            let stdout = ConsoleAppender::builder()
                .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
                .target(Target::Stdout)
                .build();
            builder = builder.appender(
                Appender::builder()
                    .filter(Box::new(ThresholdFilter::new(LevelFilter::Info)))
                    .build(STDOUT_APPENDER, Box::new(stdout)),
            );
            root_appenders.push(STDOUT_APPENDER);
        }

        Ok(builder.build(Root::builder().appenders(root_appenders).build(root_level))?)
    }

    fn create_appender(config: &LoggerConfig) -> Result<RollingFileAppender, Box<dyn std::error::Error>> {
        let log_out_dir = env::var("LOG_OUTPUT_DIR").unwrap_or_else(|_| ".".to_string());
        let log_directory = format!("{}/{}", log_out_dir, config.log_directory);
        std::fs::create_dir_all(&log_directory)?;

        let now: DateTime<Local> = Local::now();
        let formatted_time = now.format("%Y%m%d%H%M%S%3f").to_string();

        let log_file = format!("{}/{}", log_directory, config.log_file_name);
        let archived_log_pattern =
            format!("{}/{}-{{}}-{}.gz", log_directory, config.log_file_name, formatted_time);

        let size_trigger = SizeTrigger::new(config.max_file_size);
        let roller = FixedWindowRoller::builder().build(&archived_log_pattern, config.max_zip_count)?;
        let compound_policy = CompoundPolicy::new(Box::new(size_trigger), Box::new(roller));

        let appender = RollingFileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build(log_file, Box::new(compound_policy))?;
        Ok(appender)
    }

    pub(crate) fn parse_level(level: &str) -> LevelFilter {
        match level.to_lowercase().as_str() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            "off" => LevelFilter::Off,
            _ => LevelFilter::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_falls_back_to_info() {
        assert_eq!(Logger::parse_level("DEBUG"), LevelFilter::Debug);
        assert_eq!(Logger::parse_level("verbose"), LevelFilter::Info);
    }

    #[test]
    fn test_build_config_creates_log_directory() {
        let dir = tempfile::tempdir().unwrap();
        env::set_var("LOG_OUTPUT_DIR", dir.path());
        let config = LogConfig::from_yaml_str(
            r#"
loggers:
  - path_prefix: root
    log_directory: logs
    log_file_name: root.log
    max_file_size: 1024
    max_zip_count: 2
    level: warn
"#,
        )
        .unwrap();
        let built = Logger::build_config(&config).unwrap();
        assert_eq!(built.root().level(), LevelFilter::Warn);
        assert!(dir.path().join("logs").is_dir());
    }
}
