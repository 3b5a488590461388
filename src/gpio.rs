//! ESP32 pins for the mirror
//!
//! * Input: `GPIO4`, floating
//! * Output: `GPIO2` (on-board LED), left as a disabled flex pin until the
//!   mirror selects push-pull drive

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use esp_hal::{
    gpio::{DriveMode, Flex, Input, InputConfig, OutputConfig, Pull},
    peripherals::{GPIO2, GPIO4},
};
use pin_mirror::PushPull;

/// GPIO2 with its output driver under the mirror's control.
pub struct MirrorOutput(Flex<'static>);

impl ErrorType for MirrorOutput {
    type Error = Infallible;
}

impl OutputPin for MirrorOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set_low();
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set_high();
        Ok(())
    }
}

impl PushPull for MirrorOutput {
    fn set_push_pull(&mut self) {
        self.0
            .apply_output_config(&OutputConfig::default().with_drive_mode(DriveMode::PushPull));
        self.0.set_output_enable(true);
    }
}

/// Bind the mirror's input and output pins.
pub fn init_gpio(gpio4: GPIO4<'static>, gpio2: GPIO2<'static>) -> (Input<'static>, MirrorOutput) {
    let input = Input::new(gpio4, InputConfig::default().with_pull(Pull::None));
    let output = MirrorOutput(Flex::new(gpio2));
    (input, output)
}
