//! Logger installation for the `log` facade
//!
//! On the ESP32 esp-println writes to UART0 and takes its level filter from
//! `ESP_LOG` at build time. Hosted builds log through pretty_env_logger at
//! `info` unless `RUST_LOG` says otherwise.

#[cfg(target_arch = "xtensa")]
pub fn init() {
    esp_println::logger::init_logger_from_env();
}

#[cfg(not(target_arch = "xtensa"))]
pub fn init() {
    pretty_env_logger::formatted_builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
