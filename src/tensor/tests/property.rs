use crate::tensor::Tensor;

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓shape↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
#[test]
fn test_compare_shapes() {
    let tensor1 = Tensor::new(&[1., 2., 3., 4.], &[1, 4]);
    let tensor2 = Tensor::new(&[1., 2., 3., 4.], &[1, 4]);
    assert!(tensor1.is_same_shape(&tensor2));

    let tensor2 = Tensor::new(&[1., 2., 3., 4.], &[4]);
    assert!(!tensor1.is_same_shape(&tensor2));
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑shape↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

#[test]
fn test_dimension_and_size() {
    let tensor = Tensor::new(&[1.], &[]);
    assert_eq!(tensor.dimension(), 0);
    assert_eq!(tensor.size(), 1);

    let tensor = Tensor::new(&[1.0; 24], &[2, 3, 2, 2]);
    assert_eq!(tensor.dimension(), 4);
    assert_eq!(tensor.size(), 24);
}

#[test]
fn test_number() {
    assert_eq!(Tensor::new(&[3.5], &[1, 1]).number(), Some(3.5));
    assert_eq!(Tensor::from(2.0).number(), Some(2.0));
    assert_eq!(Tensor::new(&[1., 2.], &[2]).number(), None);
}

#[test]
fn test_is_finite() {
    assert!(Tensor::new(&[1., -2.], &[2]).is_finite());
    assert!(!Tensor::new(&[1., f32::NAN], &[2]).is_finite());
    assert!(!Tensor::new(&[f32::INFINITY], &[1]).is_finite());
}

#[test]
fn test_display() {
    let text = format!("{}", Tensor::new(&[1., 2.5, -3., 4.], &[2, 2]));
    assert!(text.contains("2.5000"));
    assert!(text.contains("-3.0000"));
    assert!(text.ends_with("形状: [2, 2]"));
}
