//! Chip information (§4.I SUPPLEMENT): static metadata, not part of the
//! decode core.
//!
//! Grounded in `bpc_info_t`/`bpc_info()` in the original driver.

/// Static metadata about the BPC receiver chip this decoder targets.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChipInfo {
    /// Chip name.
    pub chip_name: &'static str,
    /// Manufacturer name.
    pub manufacturer_name: &'static str,
    /// Physical interface.
    pub interface: &'static str,
    /// Minimum supply voltage, in volts.
    pub supply_voltage_min_v: f32,
    /// Maximum supply voltage, in volts.
    pub supply_voltage_max_v: f32,
    /// Maximum supply current, in milliamps.
    pub max_current_ma: f32,
    /// Minimum operating temperature, in degrees Celsius.
    pub temperature_min_c: f32,
    /// Maximum operating temperature, in degrees Celsius.
    pub temperature_max_c: f32,
    /// Driver version, encoded as `major * 1000 + minor * 100 + patch`.
    pub driver_version: u16,
}

/// Static chip metadata for the BPC receiver.
#[must_use]
pub const fn info() -> ChipInfo {
    ChipInfo {
        chip_name: "China BPC",
        manufacturer_name: "China",
        interface: "GPIO",
        supply_voltage_min_v: 2.7,
        supply_voltage_max_v: 5.5,
        max_current_ma: 1.5,
        temperature_min_c: -40.0,
        temperature_max_c: 125.0,
        driver_version: 1000,
    }
}
