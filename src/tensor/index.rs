use super::Tensor;
use ndarray::Axis;
use std::ops::{Index, IndexMut};

// 引用式索引：`tensor[[b, c]]`
impl<const N: usize> Index<[usize; N]> for Tensor {
    type Output = f32;

    fn index(&self, indices: [usize; N]) -> &f32 {
        &self.data[&indices[..]]
    }
}

impl<const N: usize> IndexMut<[usize; N]> for Tensor {
    fn index_mut(&mut self, indices: [usize; N]) -> &mut f32 {
        &mut self.data[&indices[..]]
    }
}

// 克隆式索引
impl Tensor {
    /// 取出沿`axis`的第`index`个切片（该轴被移除），如从[B, N, D]中取出第b个样本的[N, D]
    pub fn select(&self, axis: usize, index: usize) -> Tensor {
        self.assert_valid_axis(axis);
        Tensor::from_array(self.data.index_axis(Axis(axis), index).to_owned())
    }
}
