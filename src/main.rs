#![cfg_attr(target_arch = "xtensa", no_std, no_main)]

mod logging;

#[cfg(target_arch = "xtensa")]
mod gpio;
#[cfg(not(target_arch = "xtensa"))]
mod hosted;

#[cfg(target_arch = "xtensa")]
use esp_backtrace as _;
#[cfg(target_arch = "xtensa")]
use esp_hal::xtensa_lx_rt::entry;

#[cfg(target_arch = "xtensa")]
esp_bootloader_esp_idf::esp_app_desc!(); // defaults are fine

#[cfg(target_arch = "xtensa")]
#[entry]
fn main() -> ! {
    use pin_mirror::PinMirror;

    let peripherals = esp_hal::init(esp_hal::Config::default());

    logging::init();
    log::info!(
        "{} v{} starting",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let (input, output) = gpio::init_gpio(peripherals.GPIO4, peripherals.GPIO2);
    let mut mirror = PinMirror::new(input, output).configure();

    log::info!("mirroring GPIO4 onto GPIO2");
    mirror.run_forever()
}

#[cfg(not(target_arch = "xtensa"))]
fn main() -> anyhow::Result<()> {
    logging::init();
    hosted::run()
}
