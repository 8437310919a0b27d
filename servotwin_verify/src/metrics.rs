//! Stateless performance metrics over recorded position series.
//!
//! Every metric returns `Option<f64>`: `None` marks an undefined
//! measurement (empty input, zero reference base, a signal that never
//! settles) instead of a sentinel value that could pass a threshold
//! comparison by accident.

/// Peak excursion above the reference, as a percentage of the first
/// reference sample.
///
/// `None` when the series are empty, lengths differ, or the reference
/// starts at zero (the percentage base would divide by zero).
pub fn overshoot_percent(reference: &[f64], position: &[f64]) -> Option<f64> {
    if reference.is_empty() || position.len() != reference.len() {
        return None;
    }
    let base = reference[0];
    if base == 0.0 {
        return None;
    }
    let peak = position
        .iter()
        .zip(reference)
        .map(|(p, r)| p - r)
        .fold(f64::NEG_INFINITY, f64::max);
    Some(peak * 100.0 / base)
}

/// Root-mean-square tracking error.
///
/// `None` when the series are empty or lengths differ.
pub fn rms_error(reference: &[f64], position: &[f64]) -> Option<f64> {
    if reference.is_empty() || position.len() != reference.len() {
        return None;
    }
    let sum_sq: f64 = position
        .iter()
        .zip(reference)
        .map(|(p, r)| (p - r) * (p - r))
        .sum();
    Some((sum_sq / reference.len() as f64).sqrt())
}

/// First time after which |position − reference| stays within
/// `tol · |reference|` for the rest of the run.
///
/// - `Some(t[0])` when the signal never leaves the band (settled from
///   the start).
/// - `None` when the signal is still outside the band at the final
///   sample (it never settles).
/// - Lengths must agree and `t` must be non-empty, else `None`.
pub fn settling_time(reference: &[f64], position: &[f64], t: &[f64], tol: f64) -> Option<f64> {
    if t.is_empty() || reference.len() != t.len() || position.len() != t.len() {
        return None;
    }

    let outside =
        |i: usize| (position[i] - reference[i]).abs() > tol * reference[i].abs();
    let last_outside = (0..t.len()).rev().find(|&i| outside(i));

    match last_outside {
        None => Some(t[0]),
        Some(i) if i + 1 < t.len() => Some(t[i + 1]),
        Some(_) => None,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overshoot_of_exact_tracking_is_zero() {
        let reference = vec![1.0; 5];
        let position = vec![1.0; 5];
        assert_eq!(overshoot_percent(&reference, &position), Some(0.0));
    }

    #[test]
    fn overshoot_measures_the_peak() {
        let reference = vec![2.0; 4];
        let position = vec![1.0, 2.5, 2.2, 2.0];
        // Peak excursion 0.5 over a base of 2.0 → 25%.
        let overshoot = overshoot_percent(&reference, &position).unwrap();
        assert!((overshoot - 25.0).abs() < 1e-12);
    }

    #[test]
    fn overshoot_undefined_for_zero_base() {
        assert_eq!(overshoot_percent(&[0.0, 1.0], &[0.0, 1.0]), None);
    }

    #[test]
    fn overshoot_undefined_for_empty_or_mismatched() {
        assert_eq!(overshoot_percent(&[], &[]), None);
        assert_eq!(overshoot_percent(&[1.0], &[1.0, 2.0]), None);
    }

    #[test]
    fn rms_of_exact_tracking_is_zero() {
        let reference = vec![3.0; 10];
        assert_eq!(rms_error(&reference, &reference), Some(0.0));
    }

    #[test]
    fn rms_of_constant_offset() {
        let reference = vec![1.0; 8];
        let position = vec![1.5; 8];
        let rms = rms_error(&reference, &position).unwrap();
        assert!((rms - 0.5).abs() < 1e-12);
    }

    #[test]
    fn rms_undefined_for_empty() {
        assert_eq!(rms_error(&[], &[]), None);
    }

    #[test]
    fn settling_finds_first_time_after_last_violation() {
        let t: Vec<f64> = (0..6).map(|i| i as f64 * 0.1).collect();
        let reference = vec![1.0; 6];
        // Outside the 2% band at samples 0-2, inside from sample 3 on.
        let position = vec![0.0, 0.5, 0.9, 0.99, 1.0, 1.01];
        let settling = settling_time(&reference, &position, &t, 0.02).unwrap();
        assert!((settling - 0.3).abs() < 1e-12);
    }

    #[test]
    fn settling_is_start_time_when_always_in_band() {
        let t = vec![0.0, 0.1, 0.2];
        let reference = vec![1.0; 3];
        let position = vec![1.0, 0.99, 1.01];
        assert_eq!(settling_time(&reference, &position, &t, 0.02), Some(0.0));
    }

    #[test]
    fn settling_undefined_when_never_settles() {
        let t = vec![0.0, 0.1, 0.2];
        let reference = vec![1.0; 3];
        let position = vec![0.0, 0.2, 0.4];
        assert_eq!(settling_time(&reference, &position, &t, 0.02), None);
    }

    #[test]
    fn settling_undefined_for_empty() {
        assert_eq!(settling_time(&[], &[], &[], 0.02), None);
    }

    #[test]
    fn settling_band_excursion_at_final_sample_never_settles() {
        let t = vec![0.0, 0.1, 0.2, 0.3];
        let reference = vec![1.0; 4];
        let position = vec![1.0, 1.0, 1.0, 2.0];
        assert_eq!(settling_time(&reference, &position, &t, 0.02), None);
    }
}
