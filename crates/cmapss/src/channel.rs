//! Canonical Sensor Channel Definitions
//!
//! Of the 21 raw sensor columns in the C-MAPSS files, 14 carry degradation
//! signal; the rest are constant in the source data and are excluded from
//! modeling. Each channel carries one authoritative threshold entry with two
//! named purposes: a criticality cutoff (alert factor) and a valid range
//! (data quality). The two must not be conflated.

use serde::{Deserialize, Serialize};

/// Number of canonical sensor channels
pub const CHANNEL_COUNT: usize = 14;

/// The 14 retained physical measurements, in canonical (model) order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorChannel {
    /// T24: LPC outlet temperature (s_2)
    LpcOutletTemp,
    /// T30: HPC outlet temperature (s_3)
    HpcOutletTemp,
    /// T50: LPT outlet temperature (s_4)
    LptOutletTemp,
    /// P30: HPC outlet pressure (s_7)
    HpcOutletPressure,
    /// Nf: physical fan speed (s_8)
    FanSpeed,
    /// Nc: physical core speed (s_9)
    CoreSpeed,
    /// Ps30: static pressure at HPC outlet (s_11)
    CombustionPressure,
    /// phi: fuel flow to Ps30 ratio (s_12)
    FuelFlowRatio,
    /// NRf: corrected fan speed (s_13)
    CorrectedFanSpeed,
    /// NRc: corrected core speed (s_14)
    CorrectedCoreSpeed,
    /// BPR: bypass ratio (s_15)
    BypassRatio,
    /// htBleed: bleed enthalpy (s_17)
    BleedEnthalpy,
    /// W31: HPT coolant bleed (s_20)
    HptCoolantBleed,
    /// W32: LPT coolant bleed, correlates with vibration (s_21)
    LptCoolantBleed,
}

/// Threshold entry for one channel, with its two distinct purposes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelThresholds {
    /// Data-derived cutoff above which the channel is named as a
    /// contributing failure factor. `None` for channels with no alert policy.
    pub criticality_cutoff: Option<f64>,
    /// Plausible (min, max) range; readings outside it are flagged as a
    /// data-quality anomaly, not a failure factor.
    pub valid_range: (f64, f64),
}

impl SensorChannel {
    /// All channels in canonical order. This order is the feature-vector
    /// order the regressor was fit with; reordering silently breaks
    /// predictions.
    pub const ALL: [SensorChannel; CHANNEL_COUNT] = [
        SensorChannel::LpcOutletTemp,
        SensorChannel::HpcOutletTemp,
        SensorChannel::LptOutletTemp,
        SensorChannel::HpcOutletPressure,
        SensorChannel::FanSpeed,
        SensorChannel::CoreSpeed,
        SensorChannel::CombustionPressure,
        SensorChannel::FuelFlowRatio,
        SensorChannel::CorrectedFanSpeed,
        SensorChannel::CorrectedCoreSpeed,
        SensorChannel::BypassRatio,
        SensorChannel::BleedEnthalpy,
        SensorChannel::HptCoolantBleed,
        SensorChannel::LptCoolantBleed,
    ];

    /// Position in the canonical order
    pub fn index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|c| c == self)
            .unwrap_or_default()
    }

    /// Wire/display name, matching the dashboard payload keys
    pub fn name(&self) -> &'static str {
        match self {
            SensorChannel::LpcOutletTemp => "LPC_Outlet_Temp",
            SensorChannel::HpcOutletTemp => "HPC_Outlet_Temp",
            SensorChannel::LptOutletTemp => "LPT_Outlet_Temp",
            SensorChannel::HpcOutletPressure => "HPC_Outlet_Pressure",
            SensorChannel::FanSpeed => "Fan_Speed",
            SensorChannel::CoreSpeed => "Core_Speed",
            SensorChannel::CombustionPressure => "Combustion_Pressure",
            SensorChannel::FuelFlowRatio => "Fuel_Flow_Ratio",
            SensorChannel::CorrectedFanSpeed => "Corrected_Fan_Speed",
            SensorChannel::CorrectedCoreSpeed => "Corrected_Core_Speed",
            SensorChannel::BypassRatio => "Bypass_Ratio",
            SensorChannel::BleedEnthalpy => "Bleed_Enthalpy",
            SensorChannel::HptCoolantBleed => "HPT_Coolant_Bleed",
            SensorChannel::LptCoolantBleed => "LPT_Coolant_Bleed",
        }
    }

    /// Human-readable description
    pub fn full_name(&self) -> &'static str {
        match self {
            SensorChannel::LpcOutletTemp => "Low Pressure Compressor Outlet Temperature",
            SensorChannel::HpcOutletTemp => "High Pressure Compressor Outlet Temperature",
            SensorChannel::LptOutletTemp => "Low Pressure Turbine Outlet Temperature",
            SensorChannel::HpcOutletPressure => "High Pressure Compressor Outlet Pressure",
            SensorChannel::FanSpeed => "Physical Fan Speed",
            SensorChannel::CoreSpeed => "Physical Core Speed",
            SensorChannel::CombustionPressure => "Static Pressure at HPC Outlet",
            SensorChannel::FuelFlowRatio => "Fuel Flow to Ps30 Ratio",
            SensorChannel::CorrectedFanSpeed => "Corrected Fan Speed",
            SensorChannel::CorrectedCoreSpeed => "Corrected Core Speed",
            SensorChannel::BypassRatio => "Bypass Ratio",
            SensorChannel::BleedEnthalpy => "Bleed Air Enthalpy",
            SensorChannel::HptCoolantBleed => "High Pressure Turbine Coolant Bleed",
            SensorChannel::LptCoolantBleed => "Low Pressure Turbine Coolant Bleed (Vibration)",
        }
    }

    /// Physical unit of the measurement
    pub fn unit(&self) -> &'static str {
        match self {
            SensorChannel::LpcOutletTemp
            | SensorChannel::HpcOutletTemp
            | SensorChannel::LptOutletTemp => "degR",
            SensorChannel::HpcOutletPressure | SensorChannel::CombustionPressure => "psia",
            SensorChannel::FanSpeed
            | SensorChannel::CoreSpeed
            | SensorChannel::CorrectedFanSpeed
            | SensorChannel::CorrectedCoreSpeed => "rpm",
            SensorChannel::FuelFlowRatio => "pps/psi",
            SensorChannel::BypassRatio | SensorChannel::BleedEnthalpy => "--",
            SensorChannel::HptCoolantBleed | SensorChannel::LptCoolantBleed => "lbm/s",
        }
    }

    /// Zero-based index into the 21-sensor block of a raw record
    pub fn raw_index(&self) -> usize {
        match self {
            SensorChannel::LpcOutletTemp => 1,      // s_2
            SensorChannel::HpcOutletTemp => 2,      // s_3
            SensorChannel::LptOutletTemp => 3,      // s_4
            SensorChannel::HpcOutletPressure => 6,  // s_7
            SensorChannel::FanSpeed => 7,           // s_8
            SensorChannel::CoreSpeed => 8,          // s_9
            SensorChannel::CombustionPressure => 10, // s_11
            SensorChannel::FuelFlowRatio => 11,     // s_12
            SensorChannel::CorrectedFanSpeed => 12, // s_13
            SensorChannel::CorrectedCoreSpeed => 13, // s_14
            SensorChannel::BypassRatio => 14,       // s_15
            SensorChannel::BleedEnthalpy => 16,     // s_17
            SensorChannel::HptCoolantBleed => 19,   // s_20
            SensorChannel::LptCoolantBleed => 20,   // s_21
        }
    }

    /// Consolidated threshold entry for this channel. Cutoffs are the high
    /// percentiles observed across the combined FD001-FD004 datasets; ranges
    /// bound physically plausible readings.
    pub fn thresholds(&self) -> ChannelThresholds {
        match self {
            SensorChannel::LpcOutletTemp => ChannelThresholds {
                criticality_cutoff: Some(643.67),
                valid_range: (535.0, 646.0),
            },
            SensorChannel::HpcOutletTemp => ChannelThresholds {
                criticality_cutoff: Some(1603.05),
                valid_range: (1240.0, 1620.0),
            },
            SensorChannel::LptOutletTemp => ChannelThresholds {
                criticality_cutoff: Some(1427.59),
                valid_range: (1020.0, 1445.0),
            },
            SensorChannel::HpcOutletPressure => ChannelThresholds {
                criticality_cutoff: Some(563.43),
                valid_range: (135.0, 575.0),
            },
            SensorChannel::FanSpeed => ChannelThresholds {
                criticality_cutoff: None,
                valid_range: (1910.0, 2390.0),
            },
            SensorChannel::CoreSpeed => ChannelThresholds {
                criticality_cutoff: Some(9120.25),
                valid_range: (7980.0, 9250.0),
            },
            SensorChannel::CombustionPressure => ChannelThresholds {
                criticality_cutoff: Some(48.11),
                valid_range: (36.0, 49.0),
            },
            SensorChannel::FuelFlowRatio => ChannelThresholds {
                criticality_cutoff: Some(530.97),
                valid_range: (128.0, 540.0),
            },
            SensorChannel::CorrectedFanSpeed => ChannelThresholds {
                criticality_cutoff: None,
                valid_range: (2025.0, 2395.0),
            },
            SensorChannel::CorrectedCoreSpeed => ChannelThresholds {
                criticality_cutoff: None,
                valid_range: (7840.0, 8300.0),
            },
            SensorChannel::BypassRatio => ChannelThresholds {
                criticality_cutoff: None,
                valid_range: (8.1, 11.1),
            },
            SensorChannel::BleedEnthalpy => ChannelThresholds {
                criticality_cutoff: None,
                valid_range: (300.0, 405.0),
            },
            SensorChannel::HptCoolantBleed => ChannelThresholds {
                criticality_cutoff: None,
                valid_range: (10.0, 40.0),
            },
            SensorChannel::LptCoolantBleed => ChannelThresholds {
                criticality_cutoff: Some(23.66),
                valid_range: (6.0, 24.0),
            },
        }
    }

    /// Contributing-factor label reported when the criticality cutoff is
    /// exceeded. Channels without an alert policy return `None`.
    pub fn factor_label(&self) -> Option<&'static str> {
        match self {
            SensorChannel::LpcOutletTemp => Some("High LPC Temperature"),
            SensorChannel::HpcOutletTemp => Some("High HPC Temperature"),
            SensorChannel::LptOutletTemp => Some("High LPT Temperature"),
            SensorChannel::HpcOutletPressure => Some("High HPC Pressure"),
            SensorChannel::CombustionPressure => Some("High Combustion Pressure"),
            SensorChannel::FuelFlowRatio => Some("High Fuel Flow Parameter"),
            SensorChannel::CoreSpeed => Some("High Core Speed"),
            SensorChannel::LptCoolantBleed => Some("High Vibration"),
            _ => None,
        }
    }
}
