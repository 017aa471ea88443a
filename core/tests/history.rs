//! Throughput history tests — FIFO eviction at capacity.

use portwatch_core::history::TimeSeriesBuffer;

/// After N > capacity appends the buffer holds exactly the last `capacity`
/// values, oldest first.
#[test]
fn keeps_last_capacity_values_in_order() {
    for capacity in [1usize, 5, 24] {
        for extra in [1usize, 7, 50] {
            let n = capacity + extra;
            let mut buf = TimeSeriesBuffer::new(capacity);
            let mut evicted = 0;
            for i in 0..n {
                if buf.push(i as f64).is_some() {
                    evicted += 1;
                }
            }

            assert_eq!(buf.len(), capacity);
            assert_eq!(evicted, extra);
            let expected: Vec<f64> = (n - capacity..n).map(|i| i as f64).collect();
            assert_eq!(buf.to_vec(), expected, "capacity={capacity} n={n}");
        }
    }
}

#[test]
fn below_capacity_nothing_is_evicted() {
    let mut buf = TimeSeriesBuffer::new(24);
    for i in 0..10 {
        assert_eq!(buf.push(f64::from(i)), None);
    }
    assert_eq!(buf.len(), 10);
    assert!(!buf.is_full());
}
