/// Degree classification from a cumulative average
use super::table::{FAIL_LABEL, HONORS_BANDS};

/// Returns the highest band whose threshold `cgpa` meets, or "Fail".
pub fn classify_honors(cgpa: f64) -> &'static str {
    HONORS_BANDS
        .iter()
        .find(|(_, threshold)| cgpa >= *threshold)
        .map(|(label, _)| *label)
        .unwrap_or(FAIL_LABEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_thresholds_map_to_their_band() {
        assert_eq!(classify_honors(3.70), "First Class Honors");
        assert_eq!(classify_honors(3.30), "Second Class Upper");
        assert_eq!(classify_honors(2.70), "Second Class Lower");
        assert_eq!(classify_honors(2.00), "Pass");
    }

    #[test]
    fn test_between_thresholds() {
        assert_eq!(classify_honors(3.699), "Second Class Upper");
        assert_eq!(classify_honors(3.5), "Second Class Upper");
        assert_eq!(classify_honors(1.999), "Fail");
    }

    #[test]
    fn test_out_of_range_inputs_never_panic() {
        assert_eq!(classify_honors(4.8), "First Class Honors");
        assert_eq!(classify_honors(-1.0), "Fail");
        assert_eq!(classify_honors(f64::NAN), "Fail");
    }
}
