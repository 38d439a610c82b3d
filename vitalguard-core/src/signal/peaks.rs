//! Smoothing and peak detection primitives
//!
//! Pure functions over sample slices. No allocation beyond the returned
//! vectors, no hidden state.
//!
//! ## Peak Rules
//!
//! A sample is a local maximum when it is strictly greater than its left
//! neighbour and strictly greater than the first differing sample to its
//! right. A flat top counts once, at its middle. The first and last samples
//! are never peaks (there is no evidence on one side).
//!
//! ```text
//!        x            x x x
//!       / \          /     \
//!  ____/   \___   __/       \__
//!        ^                ^
//!      peak        plateau peak (middle index)
//! ```
//!
//! The spacing rule then keeps the tallest peaks first and discards any lower
//! peak closer than `ceil(distance)` samples to one already kept.

use alloc::vec::Vec;

/// Moving average over a fixed window, "valid" mode
///
/// Output has `len - window + 1` samples (empty when the input is shorter than
/// the window). Each output sample is the mean of `window` consecutive inputs.
pub fn moving_average(samples: &[f64], window: usize) -> Vec<f64> {
    if window == 0 {
        return Vec::new();
    }

    let scale = 1.0 / window as f64;
    samples
        .windows(window)
        .map(|w| w.iter().sum::<f64>() * scale)
        .collect()
}

/// Indices of local maxima, in ascending order
pub fn local_maxima(samples: &[f64]) -> Vec<usize> {
    let mut peaks = Vec::new();
    if samples.len() < 3 {
        return peaks;
    }

    let last = samples.len() - 1;
    let mut i = 1;
    while i < last {
        if samples[i - 1] < samples[i] {
            // Walk across a possible plateau
            let mut ahead = i + 1;
            while ahead < last && samples[ahead] == samples[i] {
                ahead += 1;
            }

            if samples[ahead] < samples[i] {
                peaks.push((i + ahead - 1) / 2);
                i = ahead;
            }
        }
        i += 1;
    }

    peaks
}

/// Drop peaks closer than `distance` samples to a taller neighbour
///
/// `peaks` must be ascending indices into `samples`; the survivors are
/// returned in the same order.
pub fn select_by_distance(samples: &[f64], peaks: &[usize], distance: f64) -> Vec<usize> {
    let min_gap = libm::ceil(distance).max(1.0) as usize;
    if peaks.len() < 2 || min_gap <= 1 {
        return peaks.to_vec();
    }

    // Visit tallest first; among equal heights the later peak wins
    let mut order: Vec<usize> = (0..peaks.len()).collect();
    order.sort_by(|&a, &b| samples[peaks[a]].total_cmp(&samples[peaks[b]]));

    let mut keep = alloc::vec![true; peaks.len()];
    for &j in order.iter().rev() {
        if !keep[j] {
            continue;
        }

        let mut k = j;
        while k > 0 && peaks[j] - peaks[k - 1] < min_gap {
            keep[k - 1] = false;
            k -= 1;
        }

        let mut k = j + 1;
        while k < peaks.len() && peaks[k] - peaks[j] < min_gap {
            keep[k] = false;
            k += 1;
        }
    }

    peaks
        .iter()
        .zip(keep)
        .filter_map(|(&peak, kept)| kept.then_some(peak))
        .collect()
}

/// Local maxima at least `min_distance` samples apart
pub fn find_peaks(samples: &[f64], min_distance: f64) -> Vec<usize> {
    let candidates = local_maxima(samples);
    select_by_distance(samples, &candidates, min_distance)
}
