use crate::tensor::Tensor;
use ndarray::Axis;

impl Tensor {
    /// 对张量中的所有元素求和并返回一个纯数
    pub fn sum_all(&self) -> f32 {
        self.data.sum()
    }

    /// 沿`axis`求和，结果中该轴被移除。如[B, N, D]沿轴1求和得[B, D]
    pub fn sum_axis(&self, axis: usize) -> Tensor {
        self.assert_valid_axis(axis);
        Tensor::from_array(self.data.sum_axis(Axis(axis)))
    }

    /// 沿`axis`求最大值的索引（以f32存放），结果中该轴被移除。
    /// 若有多个最大值，返回最先出现的那个。
    pub fn argmax(&self, axis: usize) -> Tensor {
        self.assert_valid_axis(axis);
        let data = self.data.map_axis(Axis(axis), |lane| {
            let mut best_index = 0;
            let mut best_value = f32::NEG_INFINITY;
            for (i, &x) in lane.iter().enumerate() {
                if i == 0 || x > best_value {
                    best_index = i;
                    best_value = x;
                }
            }
            best_index as f32
        });
        Tensor::from_array(data)
    }

    /// 逐行（2阶张量沿轴1）的argmax，直接以`usize`返回，便于与标签比较
    pub fn argmax_rows(&self) -> Vec<usize> {
        self.argmax(1).to_vec().into_iter().map(|i| i as usize).collect()
    }
}
