use super::*;

#[test]
fn burst_fires_once_after_quiet_period() {
    let t0 = Instant::now();
    let ms = Duration::from_millis;
    let mut d = Debouncer::default();
    assert!(!d.poll(t0));

    for i in 0..5 {
        d.poke(t0 + ms(i * 50));
    }
    // Last keystroke at 200ms; deadline is 500ms.
    assert_eq!(d.deadline(), Some(t0 + ms(500)));
    assert!(!d.poll(t0 + ms(499)));
    assert!(d.is_pending());
    assert!(d.poll(t0 + ms(500)));
    assert!(!d.poll(t0 + ms(900)));
    assert!(!d.is_pending());
}

#[test]
fn take_cancels_pending_event() {
    let t0 = Instant::now();
    let mut d = Debouncer::new(Duration::from_millis(10));
    assert!(!d.take());
    d.poke(t0);
    assert!(d.take());
    assert!(!d.poll(t0 + Duration::from_secs(1)));
}
