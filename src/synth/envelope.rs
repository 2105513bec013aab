//! Linear fade envelope.

/// Returns `count` evenly spaced values from `start` to `end` inclusive.
///
/// A single-point ramp yields `start`; an empty ramp yields nothing.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Builds a trapezoidal envelope of `len` samples.
///
/// The first `fade_in` samples ramp 0 to 1, the last `fade_out` samples
/// ramp 1 to 0, and everything between is 1. Callers guarantee
/// `fade_in + fade_out <= len`.
pub fn fade_envelope(len: usize, fade_in: usize, fade_out: usize) -> Vec<f64> {
    debug_assert!(fade_in + fade_out <= len);

    let mut envelope = vec![1.0; len];
    for (gain, ramp) in envelope.iter_mut().zip(linspace(0.0, 1.0, fade_in)) {
        *gain = ramp;
    }
    let tail_start = len - fade_out;
    for (gain, ramp) in envelope[tail_start..]
        .iter_mut()
        .zip(linspace(1.0, 0.0, fade_out))
    {
        *gain = ramp;
    }
    envelope
}

/// Multiplies `samples` in place by a trapezoidal fade envelope.
pub fn apply_fades(samples: &mut [f64], fade_in: usize, fade_out: usize) {
    let envelope = fade_envelope(samples.len(), fade_in, fade_out);
    for (sample, gain) in samples.iter_mut().zip(envelope) {
        *sample *= gain;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_endpoints() {
        let ramp = linspace(0.0, 1.0, 5);
        assert_eq!(ramp, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(1.0, 0.0, 1), vec![1.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn envelope_shape() {
        let env = fade_envelope(10, 3, 2);
        assert_eq!(env, vec![0.0, 0.5, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn envelope_without_fades_is_flat() {
        assert_eq!(fade_envelope(4, 0, 0), vec![1.0; 4]);
    }

    #[test]
    fn fades_are_monotonic() {
        let env = fade_envelope(1000, 300, 400);
        assert!(env[..300].windows(2).all(|w| w[0] <= w[1]));
        assert!(env[600..].windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(env[0], 0.0);
        assert_eq!(env[999], 0.0);
    }

    #[test]
    fn apply_fades_scales_samples() {
        let mut samples = vec![2.0; 5];
        apply_fades(&mut samples, 2, 2);
        assert_eq!(samples, vec![0.0, 2.0, 2.0, 2.0, 0.0]);
    }
}
