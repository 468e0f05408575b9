#![no_std]
#![deny(unsafe_code)]

//! A platform agnostic driver for 7-segment displays connected to
//! 74HC595 or 74HC4094 shift registers
//!
//! Each glyph is shifted out as one byte on the SPI bus while chip-select
//! (latch/strobe) is asserted. The output-enable line is driven with PWM
//! to set the display brightness and is blanked while data is shifted.
//!
//! Example
//!
//! ```
//! # use core::convert::Infallible;
//! # use embedded_hal::{digital, pwm, spi};
//! # struct Spi;
//! # impl spi::ErrorType for Spi { type Error = Infallible; }
//! # impl spi::SpiBus for Spi {
//! #     fn read(&mut self, _: &mut [u8]) -> Result<(), Infallible> { Ok(()) }
//! #     fn write(&mut self, _: &[u8]) -> Result<(), Infallible> { Ok(()) }
//! #     fn transfer(&mut self, _: &mut [u8], _: &[u8]) -> Result<(), Infallible> { Ok(()) }
//! #     fn transfer_in_place(&mut self, _: &mut [u8]) -> Result<(), Infallible> { Ok(()) }
//! #     fn flush(&mut self) -> Result<(), Infallible> { Ok(()) }
//! # }
//! # struct Pin;
//! # impl digital::ErrorType for Pin { type Error = Infallible; }
//! # impl digital::OutputPin for Pin {
//! #     fn set_low(&mut self) -> Result<(), Infallible> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Infallible> { Ok(()) }
//! # }
//! # struct Pwm;
//! # impl pwm::ErrorType for Pwm { type Error = Infallible; }
//! # impl pwm::SetDutyCycle for Pwm {
//! #     fn max_duty_cycle(&self) -> u16 { 255 }
//! #     fn set_duty_cycle(&mut self, _: u16) -> Result<(), Infallible> { Ok(()) }
//! # }
//! # let (spi, latch, oe) = (Spi, Pin, Pwm);
//! use shift_segment::{SegmentDisplay, ShiftRegister};
//!
//! let mut display = SegmentDisplay::new(spi, latch, oe);
//! display.set_type(ShiftRegister::Hc595);
//! display.set_pattern(b"GFEDCBA.");
//! display.begin().unwrap();
//! display.set_brightness(128).unwrap();
//!
//! // Three displays in a chain, the first one with its dot lit
//! display.print("3.14").unwrap();
//!
//! display.begin_transfer().unwrap();
//! display.send_digit(0x0a, false).unwrap();
//! display.send_char('-', true).unwrap();
//! display.end_transfer().unwrap();
//! ```

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use embedded_hal::spi::SpiBus;

pub mod font;
pub mod pattern;

pub use pattern::PatternMap;

/// Logic level of a control line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// The opposite level
    pub const fn inactive(self) -> Self {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

/// Asserted levels of the chip-select and output-enable lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlLevels {
    pub chip_select: Level,
    pub output_enable: Level,
}

/// Supported shift register families
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShiftRegister {
    /// 74HC595: latch and /OE are active low
    #[default]
    Hc595,
    /// 74HC4094: strobe and OE are active high
    Hc4094,
}

impl ShiftRegister {
    pub const fn levels(self) -> ControlLevels {
        match self {
            ShiftRegister::Hc595 => ControlLevels {
                chip_select: Level::Low,
                output_enable: Level::Low,
            },
            ShiftRegister::Hc4094 => ControlLevels {
                chip_select: Level::High,
                output_enable: Level::High,
            },
        }
    }
}

#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<SpiError, PinError, PwmError> {
    Spi(SpiError),
    Pin(PinError),
    Pwm(PwmError),
    /// Digit value above 0x0f passed to `send_digit_checked`
    DigitOutOfRange(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransferState {
    Idle,
    Transferring,
}

pub struct SegmentDisplay<SPI, CS, OE> {
    spi: SPI,
    chip_select: CS,
    output_enable: OE,
    levels: ControlLevels,
    brightness: u8,
    pattern: PatternMap,
    state: TransferState,
}

type DisplayResult<SPI, CS, OE> = Result<
    (),
    Error<
        <SPI as embedded_hal::spi::ErrorType>::Error,
        <CS as embedded_hal::digital::ErrorType>::Error,
        <OE as embedded_hal::pwm::ErrorType>::Error,
    >,
>;

impl<SPI, CS, OE> SegmentDisplay<SPI, CS, OE>
where
    SPI: SpiBus,
    CS: OutputPin,
    OE: SetDutyCycle,
{
    /// Create a new SegmentDisplay for a 74HC595 at full brightness
    pub fn new(spi: SPI, chip_select: CS, output_enable: OE) -> Self {
        Self {
            spi,
            chip_select,
            output_enable,
            levels: ShiftRegister::default().levels(),
            brightness: 255,
            pattern: PatternMap::IDENTITY,
            state: TransferState::Idle,
        }
    }

    /// Release the SegmentDisplay and the resources
    pub fn release(self) -> (SPI, CS, OE) {
        (self.spi, self.chip_select, self.output_enable)
    }

    /// Select the shift register family. Takes effect on the next transfer.
    pub fn set_type(&mut self, register: ShiftRegister) {
        #[cfg(feature = "defmt")]
        defmt::debug!("shift register: {}", register);

        self.levels = register.levels();
    }

    pub fn levels(&self) -> ControlLevels {
        self.levels
    }

    /// Drive both control lines to their inactive level.
    ///
    /// Call once before the first transfer.
    pub fn begin(&mut self) -> DisplayResult<SPI, CS, OE> {
        #[cfg(feature = "defmt")]
        defmt::trace!("init: {}", self.levels);

        self.set_chip_select(self.levels.chip_select.inactive())?;
        self.set_output_enable(self.levels.output_enable.inactive())?;
        self.state = TransferState::Idle;
        Ok(())
    }

    /// Assert chip-select and blank the outputs while data is shifted in
    pub fn begin_transfer(&mut self) -> DisplayResult<SPI, CS, OE> {
        debug_assert_eq!(self.state, TransferState::Idle, "transfer already started");

        self.set_chip_select(self.levels.chip_select)?;
        self.set_output_enable(self.levels.output_enable.inactive())?;
        self.state = TransferState::Transferring;
        Ok(())
    }

    /// Latch the shifted data and restore the brightness
    pub fn end_transfer(&mut self) -> DisplayResult<SPI, CS, OE> {
        debug_assert_eq!(self.state, TransferState::Transferring, "no transfer started");

        // Release the latch and the outputs even if the bus failed
        let flushed = self.spi.flush().map_err(Error::Spi);
        self.state = TransferState::Idle;
        self.set_chip_select(self.levels.chip_select.inactive())?;
        let restored = self.apply_brightness();
        flushed.and(restored)
    }

    pub fn is_transferring(&self) -> bool {
        self.state == TransferState::Transferring
    }

    /// Set the PWM brightness, 0 is off and 255 is fully on
    pub fn set_brightness(&mut self, value: u8) -> DisplayResult<SPI, CS, OE> {
        #[cfg(feature = "defmt")]
        defmt::trace!("brightness: {}", value);

        self.brightness = value;
        self.apply_brightness()
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Remap the shift register outputs.
    ///
    /// `layout[i]` names the segment wired to output `Qi`, the default is
    /// `b"ABCDEFG."`. See [`PatternMap::from_layout`].
    pub fn set_pattern(&mut self, layout: &[u8; 8]) {
        self.pattern = PatternMap::from_layout(layout);

        #[cfg(feature = "defmt")]
        defmt::debug!("pattern: {}", self.pattern);
    }

    pub fn pattern(&self) -> &PatternMap {
        &self.pattern
    }

    /// Shift out a hexadecimal digit (0-15). Larger values are ignored.
    ///
    /// Must be called between `begin_transfer` and `end_transfer`.
    pub fn send_digit(&mut self, value: u8, dp: bool) -> DisplayResult<SPI, CS, OE> {
        match font::digit_glyph(value) {
            Some(mask) => self.write_glyph(mask, dp),
            None => Ok(()),
        }
    }

    /// Like `send_digit` but reports values above 15
    pub fn send_digit_checked(&mut self, value: u8, dp: bool) -> DisplayResult<SPI, CS, OE> {
        let mask = font::digit_glyph(value).ok_or(Error::DigitOutOfRange(value))?;
        self.write_glyph(mask, dp)
    }

    /// Shift out a character. Non-ASCII characters are sent as space.
    ///
    /// Must be called between `begin_transfer` and `end_transfer`.
    pub fn send_char(&mut self, c: char, dp: bool) -> DisplayResult<SPI, CS, OE> {
        self.write_glyph(font::char_glyph(c), dp)
    }

    /// Shift out a string in a single transfer.
    ///
    /// A `.` following a character lights that character's decimal point
    /// instead of taking a display of its own, so `"3.14"` needs three.
    pub fn print(&mut self, text: &str) -> DisplayResult<SPI, CS, OE> {
        self.begin_transfer()?;

        let sent = self.send_text(text);
        let ended = self.end_transfer();
        sent.and(ended)
    }

    fn send_text(&mut self, text: &str) -> DisplayResult<SPI, CS, OE> {
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            let dp = chars.next_if_eq(&'.').is_some();
            self.send_char(c, dp)?;
        }

        Ok(())
    }

    fn write_glyph(&mut self, mask: u8, dp: bool) -> DisplayResult<SPI, CS, OE> {
        debug_assert!(self.is_transferring(), "glyph sent outside a transfer");

        let mut bits = self.pattern.apply(mask);
        if dp {
            bits |= self.pattern.dot();
        }

        self.spi.write(&[bits]).map_err(Error::Spi)
    }

    fn apply_brightness(&mut self) -> DisplayResult<SPI, CS, OE> {
        let duty = match self.levels.output_enable {
            Level::High => self.brightness,
            Level::Low => 255 - self.brightness,
        };

        self.output_enable
            .set_duty_cycle_fraction(u16::from(duty), 255)
            .map_err(Error::Pwm)
    }

    fn set_chip_select(&mut self, level: Level) -> DisplayResult<SPI, CS, OE> {
        let result = match level {
            Level::High => self.chip_select.set_high(),
            Level::Low => self.chip_select.set_low(),
        };
        result.map_err(Error::Pin)
    }

    fn set_output_enable(&mut self, level: Level) -> DisplayResult<SPI, CS, OE> {
        let result = match level {
            Level::High => self.output_enable.set_duty_cycle_fully_on(),
            Level::Low => self.output_enable.set_duty_cycle_fully_off(),
        };
        result.map_err(Error::Pwm)
    }
}
