use super::Tensor;
use crate::errors::{Operator, TensorError};
use ndarray::{Array, ArrayViewD, IxDyn};
use std::collections::HashSet;

impl Tensor {
    /// 以行优先顺序重排为新形状（不影响原张量），元素总数须保持不变。
    /// 对于经过`permute`等操作后内存不连续的张量同样适用。
    pub fn reshape(&self, shape: &[usize]) -> Self {
        let total_elements: usize = self.data.len();
        let new_total_elements: usize = shape.iter().product();
        assert!(
            total_elements == new_total_elements,
            "{}",
            TensorError::IncompatibleShape
        );
        Self::new(&self.to_vec(), shape)
    }

    /// 交换张量的两个（以上）维度，并将其返回（不影响原张量）
    pub fn permute(&self, axes: &[usize]) -> Self {
        // 检查axes中的所有元素必须是唯一且在[0, <张量维数>)范围内
        let unique_axes = axes.iter().copied().collect::<HashSet<_>>();
        assert!(
            unique_axes.len() == axes.len()
                && axes.len() == self.dimension()
                && unique_axes.iter().all(|&a| a < self.dimension()),
            "{}",
            TensorError::PermuteNeedUniqueAndInRange
        );
        Self {
            data: self.data.clone().permuted_axes(axes),
        }
    }

    /// 交换指定的两个维度
    pub fn transpose_dims(&self, dim1: usize, dim2: usize) -> Self {
        assert!(
            dim1 < self.dimension() && dim2 < self.dimension(),
            "{}",
            TensorError::PermuteNeedUniqueAndInRange
        );
        let mut axes: Vec<usize> = (0..self.dimension()).collect();
        axes.swap(dim1, dim2);
        self.permute(&axes)
    }

    /// 按 NumPy 规则求两个张量广播后的形状，无法广播时返回None
    ///
    /// # 广播规则
    /// - 从右向左对齐维度
    /// - 每个维度必须相等，或其中一个为 1
    /// - 维度数不同时，较短的形状前面补 1
    pub fn broadcast_shape(&self, other: &Self) -> Option<Vec<usize>> {
        let (a, b) = (self.shape(), other.shape());
        let rank = a.len().max(b.len());
        let mut shape = vec![0; rank];
        for i in 0..rank {
            let da = if i < rank - a.len() { 1 } else { a[i - (rank - a.len())] };
            let db = if i < rank - b.len() { 1 } else { b[i - (rank - b.len())] };
            shape[i] = match (da, db) {
                (x, y) if x == y => x,
                (1, y) => y,
                (x, 1) => x,
                _ => return None,
            };
        }
        Some(shape)
    }

    pub fn can_broadcast_with(&self, other: &Self) -> bool {
        self.broadcast_shape(other).is_some()
    }
}

/// 将两个张量广播至共同形状后逐元素运算。形状不兼容时panic。
pub(in crate::tensor) fn broadcast_zip_with(
    tensor_1: &Tensor,
    tensor_2: &Tensor,
    operator: Operator,
    f: impl Fn(f32, f32) -> f32,
) -> Tensor {
    let Some(shape) = tensor_1.broadcast_shape(tensor_2) else {
        panic!(
            "{}",
            TensorError::OperatorError {
                operator,
                tensor1_shape: tensor_1.shape().to_vec(),
                tensor2_shape: tensor_2.shape().to_vec(),
            }
        );
    };
    let lhs = broadcast_view(tensor_1, &shape);
    let rhs = broadcast_view(tensor_2, &shape);
    let mut data = Array::zeros(IxDyn(&shape));
    ndarray::Zip::from(&mut data)
        .and(&lhs)
        .and(&rhs)
        .for_each(|out, &a, &b| *out = f(a, b));
    Tensor::from_array(data)
}

fn broadcast_view<'a>(tensor: &'a Tensor, shape: &[usize]) -> ArrayViewD<'a, f32> {
    match tensor.data.broadcast(IxDyn(shape)) {
        Some(view) => view,
        None => panic!("{}", TensorError::IncompatibleShape),
    }
}
