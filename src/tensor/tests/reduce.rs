use crate::tensor::Tensor;

#[test]
fn test_sum_all_and_sum_axis() {
    let x = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3]);
    assert_eq!(x.sum_all(), 21.0);
    assert_eq!(x.sum_axis(0), Tensor::new(&[5., 7., 9.], &[3]));
    assert_eq!(x.sum_axis(1), Tensor::new(&[6., 15.], &[2]));
}

#[test]
fn test_argmax_2d_axis1() {
    // [[1, 3, 2],
    //  [5, 4, 6]]
    let x = Tensor::new(&[1.0, 3.0, 2.0, 5.0, 4.0, 6.0], &[2, 3]);
    let result = x.argmax(1);
    assert_eq!(result.shape(), &[2]);
    assert_eq!(result[[0]], 1.0);
    assert_eq!(result[[1]], 2.0);
    assert_eq!(x.argmax_rows(), vec![1, 2]);
}

#[test]
fn test_argmax_first_maximum_wins() {
    let x = Tensor::new(&[0.2, 0.4, 0.4, 0.0], &[1, 4]);
    assert_eq!(x.argmax_rows(), vec![1]);
}

#[test]
fn test_argmax_negative_values() {
    let x = Tensor::new(&[-3.0, -1.0, -2.0], &[1, 3]);
    assert_eq!(x.argmax_rows(), vec![1]);
}

#[test]
fn test_select() {
    let x = Tensor::new(&[1., 2., 3., 4., 5., 6., 7., 8.], &[2, 2, 2]);
    assert_eq!(x.select(0, 1), Tensor::new(&[5., 6., 7., 8.], &[2, 2]));
    assert_eq!(x.select(2, 0), Tensor::new(&[1., 3., 5., 7.], &[2, 2]));
}
