//! Random draws used by the weather and production models

use rand::Rng;
use rand_distr::{Exp1, StandardNormal};

/// Draw from N(mean, std_dev)
pub fn normal<R: Rng>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    mean + std_dev * z
}

/// Draw from an exponential distribution with the given mean
pub fn exponential<R: Rng>(rng: &mut R, mean: f64) -> f64 {
    let e: f64 = rng.sample(Exp1);
    mean * e
}

/// Bernoulli trial with probability `p`, clamped to [0, 1]
pub fn chance<R: Rng>(rng: &mut R, p: f64) -> bool {
    rng.gen::<f64>() < p.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_normal_sample_mean() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let n = 20_000;
        let mean: f64 = (0..n).map(|_| normal(&mut rng, 75.0, 12.0)).sum::<f64>() / n as f64;
        assert!((mean - 75.0).abs() < 0.5, "mean was {}", mean);
    }

    #[test]
    fn test_exponential_is_non_negative_with_expected_mean() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let draws: Vec<f64> = (0..20_000).map(|_| exponential(&mut rng, 7.0)).collect();
        assert!(draws.iter().all(|d| *d >= 0.0));
        let mean = draws.iter().sum::<f64>() / draws.len() as f64;
        assert!((mean - 7.0).abs() < 0.3, "mean was {}", mean);
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!((0..100).all(|_| !chance(&mut rng, 0.0)));
        assert!((0..100).all(|_| chance(&mut rng, 1.0)));
    }
}
