use defectoscope::{Reading, SampleBuffer};

fn r(v: f64) -> Reading {
    Reading::from_mm(v)
}

#[test]
fn keeps_last_n_readings_in_arrival_order() {
    let mut buf = SampleBuffer::new(5);
    for i in 0..12 {
        buf.append(r(i as f64));
    }
    assert_eq!(buf.len(), 5);
    let got: Vec<f64> = buf.snapshot().into_iter().map(Reading::mm).collect();
    assert_eq!(got, vec![7.0, 8.0, 9.0, 10.0, 11.0]);
}

#[test]
fn length_never_exceeds_capacity() {
    let mut buf = SampleBuffer::new(3);
    for i in 0..10 {
        buf.append(r(i as f64));
        assert!(buf.len() <= buf.capacity());
    }
}

#[test]
fn snapshot_does_not_mutate() {
    let mut buf = SampleBuffer::new(4);
    buf.append(r(1.0));
    buf.append(r(2.0));
    let first = buf.snapshot();
    let second = buf.snapshot();
    assert_eq!(first, second);
    assert_eq!(buf.len(), 2);
}

#[test]
fn recent_returns_tail_or_refuses() {
    let mut buf = SampleBuffer::new(10);
    for i in 1..=4 {
        buf.append(r(i as f64));
    }
    assert_eq!(buf.recent(2), Some(vec![r(3.0), r(4.0)]));
    assert_eq!(buf.recent(4).map(|v| v.len()), Some(4));
    assert_eq!(buf.recent(5), None);
}

#[test]
fn plot_points_are_indexed_oldest_first() {
    let mut buf = SampleBuffer::new(2);
    buf.append(r(10.0));
    buf.append(r(20.0));
    buf.append(r(30.0));
    assert_eq!(buf.plot_points(), vec![[0.0, 20.0], [1.0, 30.0]]);
    assert_eq!(buf.latest(), Some(r(30.0)));
}

#[test]
fn zero_capacity_is_raised_to_one() {
    let mut buf = SampleBuffer::new(0);
    buf.append(r(1.0));
    buf.append(r(2.0));
    assert_eq!(buf.snapshot(), vec![r(2.0)]);
}
