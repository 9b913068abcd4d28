//! Train / held-out splits
//!
//! Delivery data is time-ordered; the default split holds out the most
//! recent purchases so evaluation never sees the future during training.

use rand::prelude::*;

/// Held-out size for `n` rows: `ceil(n * test_fraction)`, leaving at least
/// one row on each side when `n >= 2`.
pub fn test_size(n: usize, test_fraction: f64) -> usize {
    if n < 2 {
        return 0;
    }
    let size = (n as f64 * test_fraction).ceil() as usize;
    size.clamp(1, n - 1)
}

/// Split indices by key order; the largest keys are held out.
///
/// Rows with equal keys keep their input order.
///
/// # Returns
///
/// `(train_indices, test_indices)`, each in ascending key order.
pub fn chronological_split<K: Ord>(keys: &[K], test_fraction: f64) -> (Vec<usize>, Vec<usize>) {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by(|&a, &b| keys[a].cmp(&keys[b]));

    let n_test = test_size(keys.len(), test_fraction);
    let test = order.split_off(keys.len() - n_test);
    (order, test)
}

/// Seeded random split.
pub fn shuffled_split(n: usize, test_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut order: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    order.shuffle(&mut rng);

    let n_test = test_size(n, test_fraction);
    let test = order.split_off(n - n_test);
    (order, test)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_rounds_up() {
        assert_eq!(test_size(10, 0.2), 2);
        assert_eq!(test_size(11, 0.2), 3);
        assert_eq!(test_size(2, 0.2), 1);
        assert_eq!(test_size(2, 0.99), 1);
        assert_eq!(test_size(1, 0.2), 0);
    }

    #[test]
    fn test_chronological_holds_out_latest() {
        let keys = [50, 10, 40, 20, 30];
        let (train, test) = chronological_split(&keys, 0.4);
        assert_eq!(train, vec![1, 3, 4]);
        assert_eq!(test, vec![2, 0]);
    }

    #[test]
    fn test_shuffled_is_deterministic_partition() {
        let (train_a, test_a) = shuffled_split(100, 0.2, 42);
        let (train_b, test_b) = shuffled_split(100, 0.2, 42);
        assert_eq!(train_a, train_b);
        assert_eq!(test_a, test_b);
        assert_eq!(test_a.len(), 20);

        let mut all: Vec<usize> = train_a.into_iter().chain(test_a).collect();
        all.sort_unstable();
        assert_eq!(all, (0..100).collect::<Vec<_>>());
    }
}
