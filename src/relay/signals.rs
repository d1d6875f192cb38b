use rand::Rng;

use crate::domain::candle::parse_records;
use crate::domain::{CandleRecord, Signal, SignalType};

/// Up to `max_signals` synthetic signals, each field drawn uniformly from the range the dataset
/// actually covers: time in `[min time, max time]`, price in `[min lowest, max highest]`,
/// volume in `[min volume, max volume]`. Buy or sell with equal odds.
pub fn generate_random_signals<R: Rng>(
    records: &[CandleRecord],
    max_signals: usize,
    rng: &mut R,
) -> Vec<Signal> {
    let candles = parse_records(records);
    if candles.is_empty() {
        return Vec::new();
    }

    let (mut min_time, mut max_time) = (i64::MAX, i64::MIN);
    let (mut min_price, mut max_price) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_volume, mut max_volume) = (f64::INFINITY, f64::NEG_INFINITY);
    for c in &candles {
        min_time = min_time.min(c.time);
        max_time = max_time.max(c.time);
        min_price = min_price.min(c.lowest);
        max_price = max_price.max(c.highest);
        min_volume = min_volume.min(c.volume);
        max_volume = max_volume.max(c.volume);
    }

    let count = candles.len().min(max_signals);
    (0..count)
        .map(|_| Signal {
            time: rng.gen_range(min_time..=max_time),
            price: uniform(rng, min_price, max_price),
            volume: uniform(rng, min_volume, max_volume),
            kind: if rng.gen_bool(0.5) {
                SignalType::Buy
            } else {
                SignalType::Sell
            },
        })
        .collect()
}

// Interpolates rather than using `gen_range`, which panics on an empty range and on a span
// wider than f64 can hold
fn uniform<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    if max <= min {
        return min;
    }
    let t: f64 = rng.r#gen();
    (min * (1.0 - t) + max * t).clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn record(time: i64, open: &str, close: &str, high: &str, low: &str, volume: &str) -> CandleRecord {
        CandleRecord {
            time,
            open: open.into(),
            close: close.into(),
            highest: high.into(),
            lowest: low.into(),
            volume: volume.into(),
        }
    }

    fn dataset(n: i64) -> Vec<CandleRecord> {
        (0..n)
            .map(|i| {
                let base = 100 + i;
                record(
                    1_700_000_000 + i * 3_600,
                    &base.to_string(),
                    &(base + 1).to_string(),
                    &(base + 5).to_string(),
                    &(base - 5).to_string(),
                    &(10 * (i + 1)).to_string(),
                )
            })
            .collect()
    }

    #[test]
    fn count_is_capped_at_ten() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(generate_random_signals(&dataset(25), 10, &mut rng).len(), 10);
        assert_eq!(generate_random_signals(&dataset(4), 10, &mut rng).len(), 4);
        assert!(generate_random_signals(&[], 10, &mut rng).is_empty());
    }

    #[test]
    fn every_field_within_observed_bounds() {
        let data = dataset(30);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            for s in generate_random_signals(&data, 10, &mut rng) {
                assert!((1_700_000_000..=1_700_000_000 + 29 * 3_600).contains(&s.time));
                assert!((95.0..=134.0).contains(&s.price), "price {}", s.price);
                assert!((10.0..=300.0).contains(&s.volume), "volume {}", s.volume);
            }
        }
    }

    #[test]
    fn same_seed_same_signals() {
        let data = dataset(12);
        let a = generate_random_signals(&data, 10, &mut StdRng::seed_from_u64(42));
        let b = generate_random_signals(&data, 10, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn flat_dataset_does_not_panic() {
        let data = vec![record(5, "1", "1", "1", "1", "0")];
        let mut rng = StdRng::seed_from_u64(1);
        let signals = generate_random_signals(&data, 10, &mut rng);
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].time, 5);
        assert_eq!(signals[0].price, 1.0);
        assert_eq!(signals[0].volume, 0.0);
    }

    #[test]
    fn extreme_upstream_values_stay_in_range() {
        let data = vec![
            record(1, "0", "0", "1e308", "-1e308", "0"),
            record(2, "0", "0", "1e308", "-1e308", "1.7e308"),
        ];
        let mut rng = StdRng::seed_from_u64(9);
        let signals = generate_random_signals(&data, 10, &mut rng);
        assert_eq!(signals.len(), 2);
        for s in signals {
            assert!(s.price.is_finite() && (-1e308..=1e308).contains(&s.price));
            assert!(s.volume.is_finite() && (0.0..=1.7e308).contains(&s.volume));
        }
    }

    #[test]
    fn both_kinds_show_up() {
        let data = dataset(40);
        let mut rng = StdRng::seed_from_u64(3);
        let kinds: Vec<SignalType> = (0..10)
            .flat_map(|_| generate_random_signals(&data, 10, &mut rng))
            .map(|s| s.kind)
            .collect();
        assert!(kinds.contains(&SignalType::Buy));
        assert!(kinds.contains(&SignalType::Sell));
    }
}
