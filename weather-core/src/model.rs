use serde::{Deserialize, Serialize};

/// Reading returned by a weather lookup for a single locale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentWeather {
    pub temp_c: f64,
    /// Present when the upstream reports it; never used for conversion.
    pub temp_f: Option<f64>,
}

impl CurrentWeather {
    pub fn celsius(temp_c: f64) -> Self {
        Self { temp_c, temp_f: None }
    }
}

/// Temperature in the three units returned to callers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    #[serde(rename = "temp_C")]
    pub temp_c: f64,
    #[serde(rename = "temp_F")]
    pub temp_f: f64,
    #[serde(rename = "temp_K")]
    pub temp_k: f64,
}

impl WeatherResult {
    pub fn from_celsius(temp_c: f64) -> Self {
        Self {
            temp_c,
            temp_f: temp_c * 1.8 + 32.0,
            temp_k: temp_c + 273.15,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_ten_celsius_exactly() {
        let result = WeatherResult::from_celsius(10.0);

        assert_eq!(result.temp_c, 10.0);
        assert_eq!(result.temp_f, 50.0);
        assert_eq!(result.temp_k, 283.15);
    }

    #[test]
    fn converts_freezing_and_negative_values() {
        let freezing = WeatherResult::from_celsius(0.0);
        assert_eq!(freezing.temp_f, 32.0);
        assert_eq!(freezing.temp_k, 273.15);

        let crossover = WeatherResult::from_celsius(-40.0);
        assert_eq!(crossover.temp_f, -40.0);
    }

    #[test]
    fn serializes_with_unit_suffixed_keys() {
        let json = serde_json::to_value(WeatherResult::from_celsius(10.0)).unwrap();

        assert_eq!(json, serde_json::json!({"temp_C": 10.0, "temp_F": 50.0, "temp_K": 283.15}));
    }
}
