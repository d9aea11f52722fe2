use crate::tensor::Tensor;
use approx::assert_abs_diff_eq;

#[test]
fn test_tanh_relu_exp() {
    let x = Tensor::new(&[-1.0, 0.0, 2.0], &[3]);
    assert_abs_diff_eq!(
        x.tanh(),
        Tensor::new(&[-0.7615942, 0.0, 0.9640276], &[3]),
        epsilon = 1e-6
    );
    assert_eq!(x.relu(), Tensor::new(&[0.0, 0.0, 2.0], &[3]));
    assert_abs_diff_eq!(
        x.exp(),
        Tensor::new(&[0.36787945, 1.0, 7.389056], &[3]),
        epsilon = 1e-5
    );
}

#[test]
fn test_softmax_rows_sum_to_one() {
    let x = Tensor::new(&[1.0, 2.0, 3.0, -1.0, 0.0, 100.0], &[2, 3]);
    let y = x.softmax(1);
    for row in 0..2 {
        let sum: f32 = (0..3).map(|c| y[[row, c]]).sum();
        assert_abs_diff_eq!(sum, 1.0, epsilon = 1e-6);
    }
    assert_abs_diff_eq!(y[[0, 0]], 0.09003057, epsilon = 1e-6);
    assert_abs_diff_eq!(y[[0, 2]], 0.66524096, epsilon = 1e-6);
    // 极端值不会溢出
    assert!(y.is_finite());
    assert_abs_diff_eq!(y[[1, 2]], 1.0, epsilon = 1e-6);
}

#[test]
fn test_softmax_along_first_axis() {
    let x = Tensor::new(&[0.0, 5.0, 0.0, 5.0], &[2, 2]);
    let y = x.softmax(0);
    assert_abs_diff_eq!(y[[0, 0]], 0.5, epsilon = 1e-6);
    assert_abs_diff_eq!(y[[1, 1]], 0.5, epsilon = 1e-6);
}

#[test]
fn test_log_softmax_matches_ln_of_softmax() {
    let x = Tensor::new(&[0.5, -1.5, 2.0, 3.0, 3.0, 3.0], &[2, 3]);
    let expected = Tensor::new(
        &x.softmax(1).to_vec().iter().map(|p| p.ln()).collect::<Vec<_>>(),
        &[2, 3],
    );
    assert_abs_diff_eq!(x.log_softmax(1), expected, epsilon = 1e-5);
}

#[test]
#[should_panic(expected = "axis须<2")]
fn test_softmax_axis_out_of_range() {
    let x = Tensor::zeros(&[2, 2]);
    let _ = x.softmax(2);
}
