//! Helpers to convert prediction data into render-ready values.

/// Format a [0,1] probability as a one-decimal percentage, e.g. `82.0%`.
pub fn confidence_label(probability: f64) -> String {
    format!("{:.1}%", probability.clamp(0.0, 1.0) * 100.0)
}

/// Two-slice proportions for the confidence ring: the probability share and
/// the remainder, out of 100. `None` renders as an empty ring.
pub fn chart_slices(probability: Option<f64>) -> [f32; 2] {
    let share = probability.unwrap_or(0.0).clamp(0.0, 1.0) as f32 * 100.0;
    [share, 100.0 - share]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_label_rounds_to_one_decimal() {
        assert_eq!(confidence_label(0.82), "82.0%");
        assert_eq!(confidence_label(0.825), "82.5%");
        assert_eq!(confidence_label(0.0), "0.0%");
    }

    #[test]
    fn confidence_label_clamps_out_of_range_values() {
        assert_eq!(confidence_label(1.7), "100.0%");
        assert_eq!(confidence_label(-0.2), "0.0%");
    }

    #[test]
    fn chart_slices_split_the_probability_share() {
        let [share, rest] = chart_slices(Some(0.82));
        assert!((share - 82.0).abs() < 1e-3);
        assert!((rest - 18.0).abs() < 1e-3);
    }

    #[test]
    fn chart_slices_without_a_prediction_fill_the_remainder() {
        assert_eq!(chart_slices(None), [0.0, 100.0]);
    }
}
