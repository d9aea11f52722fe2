use crate::errors::{ComparisonOperator, Operator, TensorError};
use crate::tensor::Tensor;
use ndarray::{Array3, Axis, Ix2, Ix3};

impl Tensor {
    /// 实现矩阵乘法。只接受2阶张量，否则会触发panic。
    /// 需要保证前一个张量的列数（col）等于后一个张量的行数（row），否则也会触发panic。
    pub fn mat_mul(&self, other: &Tensor) -> Tensor {
        assert_dimension(self, 2);
        assert_dimension(other, 2);
        assert_inner_dims(self.shape()[1], other.shape()[0], self, other, Operator::MatMul);
        let self_data = self.data.view().into_dimensionality::<Ix2>().unwrap();
        let other_data = other.data.view().into_dimensionality::<Ix2>().unwrap();
        Tensor::from_array(self_data.dot(&other_data).into_dyn())
    }

    /// 批量矩阵乘法：[B, N, K] × [B, K, M] -> [B, N, M]，每个样本各自相乘
    pub fn batch_mat_mul(&self, other: &Tensor) -> Tensor {
        assert_dimension(self, 3);
        assert_dimension(other, 3);
        let (a, b) = (self.shape(), other.shape());
        if a[0] != b[0] {
            panic!(
                "{}",
                TensorError::OperatorError {
                    operator: Operator::BatchMatMul,
                    tensor1_shape: a.to_vec(),
                    tensor2_shape: b.to_vec(),
                }
            );
        }
        assert_inner_dims(a[2], b[1], self, other, Operator::BatchMatMul);

        let lhs = self.data.view().into_dimensionality::<Ix3>().unwrap();
        let rhs = other.data.view().into_dimensionality::<Ix3>().unwrap();
        let mut result = Array3::<f32>::zeros((a[0], a[1], b[2]));
        for (i, mut out) in result.outer_iter_mut().enumerate() {
            out.assign(&lhs.index_axis(Axis(0), i).dot(&rhs.index_axis(Axis(0), i)));
        }
        Tensor::from_array(result.into_dyn())
    }

    /// 沿最后一个维度与2阶权重矩阵相乘：[..., K] × [K, M] -> [..., M]。
    /// 前置维度（如批次、区域、单词）原样保留，常用于对网格中每个向量做同一线性映射。
    pub fn mat_mul_last_axis(&self, weight: &Tensor) -> Tensor {
        assert!(
            self.dimension() >= 1,
            "{}",
            TensorError::ValueMustSatisfyComparison {
                value_name: "张量维数".to_string(),
                operator: ComparisonOperator::GreaterOrEqual,
                threshold: 1,
            }
        );
        assert_dimension(weight, 2);
        let shape = self.shape();
        let k = shape[shape.len() - 1];
        assert_inner_dims(k, weight.shape()[0], self, weight, Operator::MatMul);

        let rows = self.size() / k.max(1);
        let flat = self.reshape(&[rows, k]).mat_mul(weight);
        let mut out_shape = shape[..shape.len() - 1].to_vec();
        out_shape.push(weight.shape()[1]);
        flat.reshape(&out_shape)
    }
}

fn assert_dimension(tensor: &Tensor, expected: usize) {
    assert!(
        tensor.dimension() == expected,
        "{}",
        TensorError::DimensionMismatch {
            expected,
            got: tensor.dimension(),
        }
    );
}

fn assert_inner_dims(left: usize, right: usize, t1: &Tensor, t2: &Tensor, operator: Operator) {
    assert!(
        left == right,
        "{}",
        TensorError::OperatorError {
            operator,
            tensor1_shape: t1.shape().to_vec(),
            tensor2_shape: t2.shape().to_vec(),
        }
    );
}
