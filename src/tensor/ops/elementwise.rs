/*
 * @Author       : 老董
 * @Description  : 张量的逐元素四则运算（加、减、乘），返回新的张量：
 *                 - 张量与纯数：纯数作用于每个元素，结果形状与该张量相同；
 *                 - 两个张量：按 NumPy 规则广播，如 [B, N, k] + [N, k] 即为逐样本加上同一个偏置，
 *                   [B, N, D] * [B, N, 1] 即为按每个区域的注意力权重缩放该区域的特征。
 *                 注意：这里的乘法是哈达玛积（Hadamard product），矩阵乘法见`mat_mul.rs`。
 */

use crate::errors::Operator;
use crate::tensor::Tensor;
use crate::tensor::shape::broadcast_zip_with;
use std::ops::{Add, Mul, Sub};

/// 为`Tensor`/`&Tensor`与`f32`/`Tensor`/`&Tensor`的全部组合实现同一个逐元素运算
macro_rules! impl_elementwise_op {
    ($op_trait:ident, $method:ident, $operator:expr, $op:tt) => {
        impl $op_trait<f32> for Tensor {
            type Output = Tensor;

            fn $method(self, scalar: f32) -> Tensor {
                Tensor {
                    data: &self.data $op scalar,
                }
            }
        }

        impl $op_trait<f32> for &Tensor {
            type Output = Tensor;

            fn $method(self, scalar: f32) -> Tensor {
                Tensor {
                    data: &self.data $op scalar,
                }
            }
        }

        impl $op_trait<Tensor> for f32 {
            type Output = Tensor;

            fn $method(self, tensor: Tensor) -> Tensor {
                Tensor {
                    data: self $op &tensor.data,
                }
            }
        }

        impl $op_trait<&Tensor> for f32 {
            type Output = Tensor;

            fn $method(self, tensor: &Tensor) -> Tensor {
                Tensor {
                    data: self $op &tensor.data,
                }
            }
        }

        impl $op_trait for Tensor {
            type Output = Tensor;

            fn $method(self, other: Tensor) -> Tensor {
                broadcast_zip_with(&self, &other, $operator, |a, b| a $op b)
            }
        }

        impl $op_trait<&Tensor> for Tensor {
            type Output = Tensor;

            fn $method(self, other: &Tensor) -> Tensor {
                broadcast_zip_with(&self, other, $operator, |a, b| a $op b)
            }
        }

        impl $op_trait<Tensor> for &Tensor {
            type Output = Tensor;

            fn $method(self, other: Tensor) -> Tensor {
                broadcast_zip_with(self, &other, $operator, |a, b| a $op b)
            }
        }

        impl $op_trait<&Tensor> for &Tensor {
            type Output = Tensor;

            fn $method(self, other: &Tensor) -> Tensor {
                broadcast_zip_with(self, other, $operator, |a, b| a $op b)
            }
        }
    };
}

impl_elementwise_op!(Add, add, Operator::Add, +);
impl_elementwise_op!(Sub, sub, Operator::Sub, -);
impl_elementwise_op!(Mul, mul, Operator::Mul, *);
