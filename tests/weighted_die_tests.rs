//! WeightedDie integration tests: distribution, convergence and fallback.

use std::sync::{Arc, Mutex};
use std::thread;

use weighted_dice::core::{GameRng, UniformSource};
use weighted_dice::dice::{select_index, WeightPolicy, WeightedDie, FALLBACK_FACE};

/// Always returns the same draw.
struct FixedDraw(f64);

impl UniformSource for FixedDraw {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

/// Route dice logs to the test output. Safe to call from every test.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("weighted_dice=trace"))
        .with_test_writer()
        .try_init();
}

fn frequencies(die: &mut WeightedDie, rng: &mut GameRng, rolls: usize) -> [f64; 6] {
    for _ in 0..rolls {
        die.roll(rng);
    }
    let counts = *die.counts();
    counts.map(|c| c as f64 / rolls as f64)
}

// =============================================================================
// Fairness Tests
// =============================================================================

#[test]
fn test_exponential_fair_over_many_rolls() {
    let mut rng = GameRng::new(42);
    let mut die = WeightedDie::exponential(0.3);

    let freq = frequencies(&mut die, &mut rng, 100_000);

    for (i, f) in freq.iter().enumerate() {
        assert!((f - 1.0 / 6.0).abs() < 0.01, "face {} frequency {f}", i + 1);
    }

    // Still well-defined after a long game.
    let p = die.probabilities();
    assert!(p.iter().all(|&p| p > 0.0 && p.is_finite()), "{p:?}");
    assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
}

#[test]
fn test_inverse_count_fair_over_many_rolls() {
    let mut rng = GameRng::new(42);
    let mut die = WeightedDie::inverse_count();

    let freq = frequencies(&mut die, &mut rng, 100_000);

    for (i, f) in freq.iter().enumerate() {
        assert!((f - 1.0 / 6.0).abs() < 0.01, "face {} frequency {f}", i + 1);
    }
}

#[test]
fn test_zero_alpha_behaves_like_fair_die() {
    let mut rng = GameRng::new(7);
    let mut die = WeightedDie::exponential(0.0);

    let freq = frequencies(&mut die, &mut rng, 100_000);

    for f in freq {
        assert!((f - 1.0 / 6.0).abs() < 0.01, "frequency {f}");
    }
}

#[test]
fn test_exponential_keeps_counts_close() {
    let mut rng = GameRng::new(123);
    let mut die = WeightedDie::exponential(0.3);

    for _ in 0..6_000 {
        die.roll(&mut rng);
        let max = die.counts().iter().max().copied().unwrap_or(0);
        let min = die.counts().iter().min().copied().unwrap_or(0);
        assert!(max - min < 25, "counts drifted apart: {:?}", die.counts());
    }
}

#[test]
fn test_count_conservation() {
    let mut rng = GameRng::new(5);
    for policy in [WeightPolicy::exponential(0.3), WeightPolicy::InverseCount] {
        let mut die = WeightedDie::new(policy);
        for _ in 0..1_234 {
            die.roll(&mut rng);
        }
        assert_eq!(die.counts().iter().sum::<u64>(), 1_234);
        assert_eq!(die.total_rolls(), 1_234);
    }
}

#[test]
fn test_same_seed_same_rolls() {
    let mut rng1 = GameRng::new(99);
    let mut rng2 = GameRng::new(99);
    let mut die1 = WeightedDie::inverse_count();
    let mut die2 = WeightedDie::inverse_count();

    let seq1: Vec<_> = (0..200).map(|_| die1.roll(&mut rng1)).collect();
    let seq2: Vec<_> = (0..200).map(|_| die2.roll(&mut rng2)).collect();

    assert_eq!(seq1, seq2);
}

// =============================================================================
// Weighting Scenarios
// =============================================================================

#[test]
fn test_inverse_count_penalizes_rolled_face() {
    let die = WeightedDie::with_counts(WeightPolicy::InverseCount, [5, 0, 0, 0, 0, 0]);

    let weights = die.weights();
    assert!((weights[0] - 1.0 / 6.0).abs() < 1e-12);
    assert_eq!(&weights[1..], &[1.0; 5]);

    let p = die.probabilities();
    for other in &p[1..] {
        assert!((p[0] / other - 1.0 / 6.0).abs() < 1e-12);
    }
}

#[test]
fn test_inverse_count_penalty_observed() {
    // Face 1 starts 5 rolls ahead: over the next few rolls it should come
    // up far less often than an average face.
    let mut hits = 0u32;
    let trials = 6_000;
    let mut rng = GameRng::new(11);
    for _ in 0..trials {
        let mut die = WeightedDie::with_counts(WeightPolicy::InverseCount, [5, 0, 0, 0, 0, 0]);
        if die.roll(&mut rng) == 1 {
            hits += 1;
        }
    }
    // Expected share is (1/6) / (1/6 + 5) = 1/31.
    let share = f64::from(hits) / f64::from(trials);
    assert!((share - 1.0 / 31.0).abs() < 0.01, "share {share}");
}

#[test]
fn test_zero_alpha_ignores_counts() {
    let counts = [[0; 6], [1, 2, 3, 4, 5, 6], [500, 0, 0, 0, 0, 0], [0, 0, 0, 0, 0, 9_999]];
    for counts in counts {
        let die = WeightedDie::with_counts(WeightPolicy::exponential(0.0), counts);
        assert_eq!(die.weights(), [1.0; 6], "counts {counts:?}");
    }
}

#[test]
fn test_exponential_chance_drops_with_own_count() {
    let policy = WeightPolicy::exponential(0.3);
    let mut previous = f64::INFINITY;
    for own in 0..50 {
        let die = WeightedDie::with_counts(policy, [own, 3, 3, 3, 3, 3]);
        let p = die.probabilities();
        assert!(p[0] < previous, "own {own}: {}", p[0]);

        // Relative to another face, the chance follows the unscaled formula.
        let expected = policy.weight(own) / policy.weight(3);
        assert!((p[0] / p[1] - expected).abs() < 1e-9);
        previous = p[0];
    }
}

#[test]
fn test_smaller_alpha_is_closer_to_uniform() {
    let counts = [10, 0, 0, 0, 0, 0];
    let mut previous_gap = f64::INFINITY;
    for alpha in [1.0, 0.3, 0.1, 0.01, 0.001, 0.0] {
        let die = WeightedDie::with_counts(WeightPolicy::exponential(alpha), counts);
        let p = die.probabilities();
        let gap = p[1] - p[0];
        assert!(gap < previous_gap, "alpha {alpha}: gap {gap}");
        previous_gap = gap;
    }
    assert_eq!(previous_gap, 0.0);
}

// =============================================================================
// Selection Rule Tests
// =============================================================================

#[test]
fn test_roll_matches_selection_rule() {
    let counts = [2, 0, 1, 4, 0, 3];
    for policy in [WeightPolicy::exponential(0.3), WeightPolicy::InverseCount] {
        for u in [0.0, 0.1, 0.25, 0.5, 0.75, 0.9, 0.999_999] {
            let mut die = WeightedDie::with_counts(policy, counts);
            let weights = die.weights();
            let total: f64 = weights.iter().sum();

            let expected = select_index(&weights, u * total) as u8 + 1;
            assert_eq!(die.roll(&mut FixedDraw(u)), expected, "{policy} u={u}");
        }
    }
}

#[test]
fn test_fallback_selects_last_face() {
    init_tracing();
    for policy in [WeightPolicy::exponential(0.3), WeightPolicy::InverseCount] {
        let mut die = WeightedDie::with_counts(policy, [1, 2, 3, 0, 0, 0]);

        // A draw of 1.0 puts r exactly at the total, beyond every running sum.
        let face = die.roll(&mut FixedDraw(1.0));

        assert_eq!(face, FALLBACK_FACE);
        assert_eq!(die.counts(), &[1, 2, 3, 0, 0, 1]);
    }
}

#[test]
fn test_large_equal_counts_still_fair() {
    init_tracing();
    // Unscaled, exp(-10 * 100) would be zero for every face.
    let mut die = WeightedDie::with_counts(WeightPolicy::exponential(10.0), [100; 6]);
    assert_eq!(die.weights(), [1.0; 6]);

    let mut rng = GameRng::new(1);
    for _ in 0..60_000 {
        die.roll(&mut rng);
    }

    for (i, &c) in die.counts().iter().enumerate() {
        let share = (c - 100) as f64 / 60_000.0;
        assert!((share - 1.0 / 6.0).abs() < 0.01, "face {} share {share}", i + 1);
    }
}

#[test]
fn test_negative_alpha_stays_well_defined() {
    // Negative alpha favours the most rolled face instead of locking on
    // the fallback face.
    let mut die = WeightedDie::with_counts(WeightPolicy::exponential(-0.5), [5_000, 0, 0, 0, 0, 0]);
    assert!(die.weights().iter().all(|w| w.is_finite()));

    let mut rng = GameRng::new(8);
    for _ in 0..100 {
        assert_eq!(die.roll(&mut rng), 1);
    }
    assert_eq!(die.counts(), &[5_100, 0, 0, 0, 0, 0]);
}

// =============================================================================
// Ownership Tests
// =============================================================================

#[test]
fn test_shared_die_behind_mutex() {
    let die = Arc::new(Mutex::new(WeightedDie::exponential(0.3)));
    let mut root = GameRng::new(42);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let die = Arc::clone(&die);
            let mut rng = root.fork();
            thread::spawn(move || {
                for _ in 0..1_000 {
                    let face = die.lock().unwrap().roll(&mut rng);
                    assert!((1..=6).contains(&face));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(die.lock().unwrap().total_rolls(), 4_000);
}
