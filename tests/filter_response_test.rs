mod test_signals;

use approx::assert_abs_diff_eq;
use multimode::config::{BandwidthMode, FilterMode, FilterType};
use multimode::signal_processing::MultimodeFilter;
use multimode::signal_processing::warp::{band_edges, prewarp};
use multimode::simulation::impulse_response;
use test_signals::{butterworth, params, steady_gain_db};

const SR: f32 = 44100.0;

#[test]
fn test_lowpass_passes_bass_and_rejects_treble() {
    let mut filter = MultimodeFilter::with_params(butterworth(4, FilterMode::Lowpass, 1000.0, 0.0))
        .unwrap();

    let pass = steady_gain_db(&mut filter, 100.0, SR);
    assert!(pass.abs() < 0.5, "100 Hz gain {:.3} dB", pass);

    let stop = steady_gain_db(&mut filter, 10000.0, SR);
    assert!(stop <= -48.0, "10 kHz gain {:.1} dB", stop);
}

#[test]
fn test_highpass_mirrors_lowpass_scenario() {
    let mut filter =
        MultimodeFilter::with_params(butterworth(4, FilterMode::Highpass, 1000.0, 0.0)).unwrap();

    let pass = steady_gain_db(&mut filter, 10000.0, SR);
    assert!(pass.abs() < 0.5, "10 kHz gain {:.3} dB", pass);

    let stop = steady_gain_db(&mut filter, 100.0, SR);
    assert!(stop <= -48.0, "100 Hz gain {:.1} dB", stop);
}

#[test]
fn test_measured_gain_matches_analytic_response() {
    let mut filter =
        MultimodeFilter::with_params(butterworth(6, FilterMode::Lowpass, 2000.0, 0.3)).unwrap();
    for freq in [200.0, 1000.0, 2000.0, 3000.0] {
        let measured = steady_gain_db(&mut filter, freq, SR);
        let analytic = filter.magnitude_db(freq) as f32;
        assert!(
            (measured - analytic).abs() < 0.1,
            "{} Hz: measured {:.3} analytic {:.3}",
            freq,
            measured,
            analytic
        );
    }
}

#[test]
fn test_lowpass_highpass_spectral_duality() {
    // corners mirrored about fs/4 warp to reciprocal prototypes
    let corner = 2000.0;
    let mirrored = SR / 2.0 - corner;
    for poles in 1..=16 {
        for qbw in [0.0, 0.5] {
            let lp = MultimodeFilter::with_params(butterworth(poles, FilterMode::Lowpass, corner, qbw))
                .unwrap();
            let hp =
                MultimodeFilter::with_params(butterworth(poles, FilterMode::Highpass, mirrored, qbw))
                    .unwrap();
            for i in 1..40 {
                let f = i as f32 * 500.0;
                let lp_db = lp.magnitude_db(f);
                if lp_db < -120.0 {
                    continue;
                }
                let hp_db = hp.magnitude_db(SR / 2.0 - f);
                assert!(
                    (lp_db - hp_db).abs() < 1e-3,
                    "{} poles qbw {} at {} Hz: lp {:.4} hp {:.4}",
                    poles,
                    qbw,
                    f,
                    lp_db,
                    hp_db
                );
            }
        }
    }
}

#[test]
fn test_pitch_bandpass_edges_are_half_power() {
    let filter = MultimodeFilter::with_params(params(
        SR,
        FilterType::Butterworth,
        4,
        FilterMode::Bandpass,
        1000.0,
        0.22,
        BandwidthMode::Pitch,
    ))
    .unwrap();

    let edges = band_edges(1000.0, 0.22, BandwidthMode::Pitch, 21000.0);
    assert!((edges.low - 737.0).abs() < 1.0);
    assert!((edges.high - 1356.9).abs() < 1.0);

    assert_abs_diff_eq!(filter.magnitude_db(edges.low), -3.0103, epsilon = 0.05);
    assert_abs_diff_eq!(filter.magnitude_db(edges.high), -3.0103, epsilon = 0.05);

    // geometric center in the warped domain
    let w02 = prewarp(edges.low, SR) * prewarp(edges.high, SR);
    let center = (w02.sqrt().atan() * SR as f64 / std::f64::consts::PI) as f32;
    assert!((center - 1000.0).abs() < 20.0, "center {}", center);
    assert_abs_diff_eq!(filter.magnitude_db(center), 0.0, epsilon = 1e-3);
}

#[test]
fn test_pitch_bandpass_impulse_has_single_lobe() {
    let mut filter = MultimodeFilter::with_params(params(
        SR,
        FilterType::Butterworth,
        4,
        FilterMode::Bandpass,
        1000.0,
        0.22,
        BandwidthMode::Pitch,
    ))
    .unwrap();
    let h = impulse_response(&mut filter, 8192);

    let spectrum: Vec<(f32, f64)> = (2..160)
        .map(|i| {
            let f = i as f32 * 50.0;
            let omega = 2.0 * std::f64::consts::PI * f as f64 / SR as f64;
            let (re, im) = h.iter().enumerate().fold((0.0, 0.0), |(re, im), (n, &x)| {
                let phase = omega * n as f64;
                (re + x as f64 * phase.cos(), im - x as f64 * phase.sin())
            });
            (f, 20.0 * (re * re + im * im).sqrt().log10())
        })
        .collect();

    let (peak_freq, peak_db) = spectrum
        .iter()
        .copied()
        .fold((0.0, f64::MIN), |best, p| if p.1 > best.1 { p } else { best });
    assert!((900.0..=1100.0).contains(&peak_freq), "peak at {} Hz", peak_freq);
    assert!(peak_db.abs() < 0.5, "peak {:.2} dB", peak_db);

    for pair in spectrum.windows(2) {
        let ((f0, db0), (_, db1)) = (pair[0], pair[1]);
        if db0 < -80.0 && db1 < -80.0 {
            continue;
        }
        if f0 < peak_freq {
            assert!(db1 >= db0 - 0.01, "not rising below the peak at {} Hz", f0);
        } else {
            assert!(db1 <= db0 + 0.01, "not falling above the peak at {} Hz", f0);
        }
    }
}

#[test]
fn test_bandreject_notches_center() {
    let filter = MultimodeFilter::with_params(params(
        SR,
        FilterType::Butterworth,
        4,
        FilterMode::Bandreject,
        1000.0,
        0.22,
        BandwidthMode::Pitch,
    ))
    .unwrap();
    let edges = band_edges(1000.0, 0.22, BandwidthMode::Pitch, 21000.0);
    let w02 = prewarp(edges.low, SR) * prewarp(edges.high, SR);
    let center = (w02.sqrt().atan() * SR as f64 / std::f64::consts::PI) as f32;

    assert!(filter.magnitude_db(center) < -60.0);
    assert!(filter.magnitude_db(20.0).abs() < 0.1);
    assert!(filter.magnitude_db(15000.0).abs() < 0.1);
    assert_abs_diff_eq!(filter.magnitude_db(edges.low), -3.0103, epsilon = 0.05);
}

#[test]
fn test_chebyshev_is_steeper_than_butterworth() {
    let make = |filter_type| {
        MultimodeFilter::with_params(params(
            SR,
            filter_type,
            4,
            FilterMode::Lowpass,
            1000.0,
            0.0,
            BandwidthMode::Linear,
        ))
        .unwrap()
    };
    let butter = make(FilterType::Butterworth);
    let cheby = make(FilterType::Chebyshev);
    assert!(cheby.magnitude_db(2000.0) < butter.magnitude_db(2000.0) - 3.0);
    assert!(cheby.magnitude_db(4000.0) < butter.magnitude_db(4000.0) - 3.0);
}

#[test]
fn test_wider_linear_band_passes_more() {
    let make = |qbw| {
        MultimodeFilter::with_params(butterworth(4, FilterMode::Bandpass, 2000.0, qbw)).unwrap()
    };
    let narrow = make(0.05);
    let wide = make(0.4);
    assert!(narrow.magnitude_db(1500.0) < -20.0);
    assert!(wide.magnitude_db(1500.0) > -1.0);
}
