/*
 * @Author       : 老董
 * @Description  : 逐元素激活函数及沿某一轴的softmax族运算（均返回新张量）
 */

use crate::errors::{ComparisonOperator, TensorError};
use crate::tensor::Tensor;
use ndarray::Axis;

impl Tensor {
    pub fn tanh(&self) -> Tensor {
        Tensor::from_array(self.data.mapv(f32::tanh))
    }

    /// max(0, x)
    pub fn relu(&self) -> Tensor {
        Tensor::from_array(self.data.mapv(|x| x.max(0.0)))
    }

    pub fn exp(&self) -> Tensor {
        Tensor::from_array(self.data.mapv(f32::exp))
    }

    /// 沿`axis`做数值稳定的softmax：先减去该轴上的最大值再取指数并归一化，
    /// 因此每条沿`axis`的“线”（lane）上的元素之和为1。
    pub fn softmax(&self, axis: usize) -> Tensor {
        self.assert_valid_axis(axis);
        let mut data = self.data.clone();
        for mut lane in data.lanes_mut(Axis(axis)) {
            let max = lane.fold(f32::NEG_INFINITY, |m, &x| m.max(x));
            lane.mapv_inplace(|x| (x - max).exp());
            let sum = lane.sum();
            lane.mapv_inplace(|x| x / sum);
        }
        Tensor::from_array(data)
    }

    /// 沿`axis`的log-softmax，使用log-sum-exp技巧：
    /// `log_softmax(x)_i = x_i - max(x) - ln(Σ exp(x_j - max(x)))`
    pub fn log_softmax(&self, axis: usize) -> Tensor {
        self.assert_valid_axis(axis);
        let mut data = self.data.clone();
        for mut lane in data.lanes_mut(Axis(axis)) {
            let max = lane.fold(f32::NEG_INFINITY, |m, &x| m.max(x));
            let log_sum_exp = lane.fold(0.0f32, |s, &x| s + (x - max).exp()).ln();
            lane.mapv_inplace(|x| x - max - log_sum_exp);
        }
        Tensor::from_array(data)
    }

    pub(in crate::tensor) fn assert_valid_axis(&self, axis: usize) {
        assert!(
            axis < self.dimension(),
            "{}",
            TensorError::ValueMustSatisfyComparison {
                value_name: "axis".to_string(),
                operator: ComparisonOperator::LessThan,
                threshold: self.dimension(),
            }
        );
        assert!(
            self.shape()[axis] > 0,
            "{}",
            TensorError::ValueMustSatisfyComparison {
                value_name: format!("第{axis}维的长度"),
                operator: ComparisonOperator::GreaterThan,
                threshold: 0,
            }
        );
    }
}
