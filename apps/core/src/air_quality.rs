/// Highest AQI still reported as excellent.
pub const EXCELLENT_MAX_AQI: i64 = 50;

/// Highest AQI still reported as moderate. Anything above raises an alert.
pub const MODERATE_MAX_AQI: i64 = 100;

/// Styling intent of a displayed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Success,
    Warning,
    Danger,
}

/// Three-band air quality classification of an AQI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum AirQuality {
    Excellent,
    Moderate,
    Poor,
}

impl AirQuality {
    /// Bands are inclusive at their upper bound: 50 is excellent, 100 is moderate.
    pub const fn classify(aqi: i64) -> Self {
        if aqi <= EXCELLENT_MAX_AQI {
            Self::Excellent
        } else if aqi <= MODERATE_MAX_AQI {
            Self::Moderate
        } else {
            Self::Poor
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "EXCELLENT",
            Self::Moderate => "MODERATE",
            Self::Poor => "POOR",
        }
    }

    pub const fn tone(self) -> Tone {
        match self {
            Self::Excellent => Tone::Success,
            Self::Moderate => Tone::Warning,
            Self::Poor => Tone::Danger,
        }
    }

    pub const fn is_dangerous(self) -> bool {
        matches!(self, Self::Poor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_values_are_excellent() {
        for aqi in [-5, 0, 12, 49, 50] {
            let quality = AirQuality::classify(aqi);
            assert_eq!(quality, AirQuality::Excellent, "aqi {aqi}");
            assert_eq!(quality.label(), "EXCELLENT");
            assert_eq!(quality.tone(), Tone::Success);
        }
    }

    #[test]
    fn band_boundaries_are_inclusive_at_the_top() {
        assert_eq!(AirQuality::classify(50), AirQuality::Excellent);
        assert_eq!(AirQuality::classify(51), AirQuality::Moderate);
        assert_eq!(AirQuality::classify(100), AirQuality::Moderate);
        assert_eq!(AirQuality::classify(101), AirQuality::Poor);
    }

    #[test]
    fn moderate_band_uses_warning_tone() {
        for aqi in [51, 75, 100] {
            let quality = AirQuality::classify(aqi);
            assert_eq!(quality.label(), "MODERATE");
            assert_eq!(quality.tone(), Tone::Warning);
            assert!(!quality.is_dangerous());
        }
    }

    #[test]
    fn poor_band_is_dangerous() {
        for aqi in [101, 250, 999] {
            let quality = AirQuality::classify(aqi);
            assert_eq!(quality.label(), "POOR");
            assert_eq!(quality.tone(), Tone::Danger);
            assert!(quality.is_dangerous());
        }
    }
}
