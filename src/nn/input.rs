/*
 * @Author       : 老董
 * @Description  : 模型的输入槽位（图像、问题、标签）。训练循环每个批次都须按槽位绑定输入；
 *                 槽位的批维度不固定，其余维度在构建时由配置确定。
 */

use super::ModelError;
use crate::tensor::Tensor;

/// 一个批次的输入：图像特征、问题状态与 one-hot 答案标签
#[derive(Debug, Clone)]
pub struct Batch {
    pub image: Tensor,
    pub question: Tensor,
    pub labels: Tensor,
}

impl Batch {
    pub fn new(image: Tensor, question: Tensor, labels: Tensor) -> Self {
        Self {
            image,
            question,
            labels,
        }
    }

    /// 批大小（取标签的首维）
    pub fn len(&self) -> usize {
        self.labels.shape().first().copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 单个输入槽位。`shape`中的`None`表示该维度（批维度）可变
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSlot {
    pub name: &'static str,
    pub shape: Vec<Option<usize>>,
}

impl InputSlot {
    pub(crate) fn batched(name: &'static str, dims: &[usize]) -> Self {
        let mut shape = vec![None];
        shape.extend(dims.iter().map(|&d| Some(d)));
        Self { name, shape }
    }

    /// 检查张量是否符合本槽位，不会进行任何隐式广播
    pub fn check(&self, tensor: &Tensor) -> Result<(), ModelError> {
        let got = tensor.shape();
        let expected = self
            .shape
            .iter()
            .enumerate()
            .map(|(i, d)| d.unwrap_or_else(|| got.get(i).copied().unwrap_or(0)))
            .collect::<Vec<_>>();
        if got != expected.as_slice() {
            return Err(ModelError::shape_mismatch(&expected, got, self.name));
        }
        Ok(())
    }
}

/// 模型的全部输入槽位
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSlots {
    pub image: InputSlot,
    pub question: InputSlot,
    pub label: InputSlot,
}

impl InputSlots {
    /// 依次检查三个输入的形状，以及它们的批大小是否一致且非零
    pub fn check(&self, batch: &Batch) -> Result<usize, ModelError> {
        self.image.check(&batch.image)?;
        self.question.check(&batch.question)?;
        self.label.check(&batch.labels)?;

        let batch_size = batch.len();
        for (name, tensor) in [("question", &batch.question), ("image", &batch.image)] {
            if tensor.shape()[0] != batch_size {
                return Err(ModelError::shape_mismatch(
                    &[batch_size],
                    &tensor.shape()[..1],
                    &format!("{name}与label的批大小"),
                ));
            }
        }
        if batch_size == 0 {
            return Err(ModelError::shape_mismatch(&[1], &[0], "批大小须>0"));
        }
        Ok(batch_size)
    }
}
