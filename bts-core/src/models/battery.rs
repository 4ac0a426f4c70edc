use super::ConfigurationError;

/// The physical limits of the battery.
///
/// The efficiencies are *loss* fractions: a `charge_efficiency` of 0.1 means
/// 10% of imported energy never reaches storage.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatteryParameters {
    /// The largest aggregate import power, in MW
    pub max_charge_rate: f64,
    /// The largest aggregate export power, in MW
    pub max_discharge_rate: f64,
    /// The storage capacity, in MWh
    pub max_storage_volume: f64,
    /// The fraction of imported energy lost before storage, in [0, 1]
    pub charge_efficiency: f64,
    /// The fraction of exported energy lost before sale, in [0, 1]
    pub discharge_efficiency: f64,
}

impl BatteryParameters {
    /// Check every parameter against its admissible range, reporting the
    /// first offending field.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (field, value) in [
            ("max_charge_rate", self.max_charge_rate),
            ("max_discharge_rate", self.max_discharge_rate),
            ("max_storage_volume", self.max_storage_volume),
        ] {
            // also rejects NaN
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigurationError::NotPositive { field, value });
            }
        }

        for (field, value) in [
            ("charge_efficiency", self.charge_efficiency),
            ("discharge_efficiency", self.discharge_efficiency),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigurationError::EfficiencyOutOfRange { field, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn battery() -> BatteryParameters {
        BatteryParameters {
            max_charge_rate: 2.0,
            max_discharge_rate: 2.0,
            max_storage_volume: 4.0,
            charge_efficiency: 0.05,
            discharge_efficiency: 0.05,
        }
    }

    #[test]
    fn test_valid() {
        assert!(battery().validate().is_ok());
    }

    #[test]
    fn test_zero_volume() {
        let battery = BatteryParameters {
            max_storage_volume: 0.0,
            ..battery()
        };
        assert_eq!(
            battery.validate(),
            Err(ConfigurationError::NotPositive {
                field: "max_storage_volume",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_nan_rate() {
        let battery = BatteryParameters {
            max_charge_rate: f64::NAN,
            ..battery()
        };
        assert!(matches!(
            battery.validate(),
            Err(ConfigurationError::NotPositive {
                field: "max_charge_rate",
                ..
            })
        ));
    }

    #[test]
    fn test_efficiency_range() {
        let battery = BatteryParameters {
            discharge_efficiency: 1.5,
            ..battery()
        };
        assert_eq!(
            battery.validate(),
            Err(ConfigurationError::EfficiencyOutOfRange {
                field: "discharge_efficiency",
                value: 1.5
            })
        );
    }

    #[test]
    fn test_deserialize() {
        let raw = r#"{
            "max_charge_rate": 2.0,
            "max_discharge_rate": 2.0,
            "max_storage_volume": 4.0,
            "charge_efficiency": 0.05,
            "discharge_efficiency": 0.05
        }"#;

        let test = serde_json::from_str::<BatteryParameters>(raw);
        assert_eq!(test.unwrap(), battery());
    }
}
