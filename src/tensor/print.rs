use crate::tensor::Tensor;
use std::fmt;

/// 数据按 ndarray 的格式逐行输出（保留4位小数），末行附上形状。
/// 注意力权重、logits 等中间结果调试时可直接`{}`打印
impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{:.4}", self.data)?;
        write!(f, "形状: {:?}", self.shape())
    }
}
