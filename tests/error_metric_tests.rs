use bank_dashboard::error::DashboardError;
use bank_dashboard::metrics::mean_absolute_error;

#[test]
fn mae_over_three_days() {
    let mae = mean_absolute_error(&[17.30, 17.54, 17.64], &[17.25, 17.60, 17.70]).unwrap();
    assert!((mae - (0.05 + 0.06 + 0.06) / 3.0).abs() < 1e-9);
    assert!((mae - 0.0567).abs() < 1e-4);
}

#[test]
fn mae_ignores_excess_elements() {
    let mae = mean_absolute_error(&[1.0, 2.0, 3.0, 100.0], &[2.0, 2.0, 1.0]).unwrap();
    assert!((mae - 1.0).abs() < 1e-12);
}

#[test]
fn mae_on_empty_input_is_error() {
    assert!(matches!(
        mean_absolute_error(&[], &[1.0, 2.0, 3.0]),
        Err(DashboardError::EmptyComparison)
    ));
    assert!(matches!(
        mean_absolute_error(&[1.0], &[]),
        Err(DashboardError::EmptyComparison)
    ));
}
