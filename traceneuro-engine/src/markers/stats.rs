//! Small descriptive statistics shared by the analyzers

use regex::Regex;

/// Characters counted as digits: decimal digits in any script plus the
/// superscript, subscript, and circled digit forms
///
/// Fractions and letter numerals such as `½` or `Ⅳ` are not digits.
pub const DIGIT_PATTERN: &str = concat!(
    r"[\p{Nd}\x{B2}\x{B3}\x{B9}\x{1369}-\x{1371}\x{19DA}",
    r"\x{2070}\x{2074}-\x{2079}\x{2080}-\x{2089}",
    r"\x{2460}-\x{2468}\x{2474}-\x{247C}\x{2488}-\x{2490}\x{24EA}\x{24F5}-\x{24FD}\x{24FF}",
    r"\x{2776}-\x{277E}\x{2780}-\x{2788}\x{278A}-\x{2792}",
    r"\x{10A40}-\x{10A43}\x{10E60}-\x{10E68}\x{11052}-\x{1105A}\x{1F100}-\x{1F10A}]",
);

/// Arithmetic mean (0.0 for an empty slice)
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (0.0 for an empty slice)
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Population variance, 0.0 unless there are at least two values
pub fn spread(values: &[f64]) -> f64 {
    if values.len() > 1 {
        variance(values)
    } else {
        0.0
    }
}

/// Sample standard deviation (n - 1 denominator), `None` below two values
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// `value / threshold`, capped at 1.0
pub fn normalized(value: f64, threshold: f64) -> f64 {
    (value / threshold).min(1.0)
}

/// Count-valued helper for per-sentence tallies
pub fn as_f64(counts: &[usize]) -> Vec<f64> {
    counts.iter().map(|&c| c as f64).collect()
}

/// Share of `text`'s characters matched by a compiled [`DIGIT_PATTERN`]
pub fn digit_ratio(digits: &Regex, text: &str) -> f64 {
    let len = text.chars().count();
    if len == 0 {
        return 0.0;
    }
    digits.find_iter(text).count() as f64 / len as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_variance() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&values), 5.0);
        assert_eq!(variance(&values), 4.0);
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(variance(&[]), 0.0);
        assert_eq!(spread(&[3.0]), 0.0);
        assert!(sample_std_dev(&[1.0]).is_none());
    }

    #[test]
    fn test_sample_std_dev() {
        let sd = sample_std_dev(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((sd - 1.2909944487).abs() < 1e-9);
    }

    #[test]
    fn test_normalized_caps_at_one() {
        assert_eq!(normalized(1.0, 2.0), 0.5);
        assert_eq!(normalized(10.0, 2.0), 1.0);
    }

    #[test]
    fn test_digit_ratio_counts_digit_forms_only() {
        let digits = Regex::new(DIGIT_PATTERN).unwrap();
        assert_eq!(digit_ratio(&digits, "a1b2"), 0.5);
        // superscript two and Arabic-Indic three
        assert_eq!(digit_ratio(&digits, "\u{b2}\u{663}"), 1.0);
        // vulgar half and Roman numeral four
        assert_eq!(digit_ratio(&digits, "\u{bd}\u{2163}"), 0.0);
        assert_eq!(digit_ratio(&digits, "x\u{bd} y\u{b2} \u{2163}"), 1.0 / 7.0);
        assert_eq!(digit_ratio(&digits, ""), 0.0);
    }
}
