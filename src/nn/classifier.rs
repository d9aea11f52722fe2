/*
 * @Author       : 老董
 * @Description  : 分类头的公共逻辑：logits -> softmax 交叉熵损失、argmax 预测、准确率。
 *                 两个模型各自持有 score_W/score_b，本模块只负责其后的计算。
 */

use crate::tensor::Tensor;

/// 一次前向计算的全部输出，只在本次计算内有意义
#[derive(Debug, Clone)]
pub struct ForwardOutput {
    /// 整个批次的交叉熵之和
    pub loss: f32,
    /// 预测与标签一致的样本比例，取值于[0, 1]
    pub accuracy: f32,
    /// 每个样本预测的答案索引
    pub predictions: Vec<usize>,
    /// softmax 后的答案分布 [B, num_output]
    pub probabilities: Tensor,
    /// 分类器原始输出 [B, num_output]
    pub logits: Tensor,
}

/// `x·W + b`，其中 x 为[B, h]，W 为[h, num_output]，b 为[num_output]
pub(crate) fn project(x: &Tensor, weight: &Tensor, bias: &Tensor) -> Tensor {
    x.mat_mul(weight) + bias
}

/// 逐样本的 softmax 交叉熵`-Σ y·log softmax(x)`，再对整个批次求和。
/// 使用 log-sum-exp，极端的 logits 也不会溢出。
pub fn softmax_cross_entropy(logits: &Tensor, labels: &Tensor) -> f32 {
    -(labels * &logits.log_softmax(1)).sum_all()
}

/// 预测索引与标签 argmax 一致的比例
pub fn accuracy(predictions: &[usize], labels: &Tensor) -> f32 {
    let expected = labels.argmax_rows();
    let correct = predictions
        .iter()
        .zip(expected.iter())
        .filter(|(p, e)| p == e)
        .count();
    correct as f32 / predictions.len() as f32
}

/// 由 logits 与 one-hot 标签得出损失、预测与准确率。调用前须已确认二者形状一致且批次非空。
pub(crate) fn evaluate(logits: Tensor, labels: &Tensor) -> ForwardOutput {
    let loss = softmax_cross_entropy(&logits, labels);
    let probabilities = logits.softmax(1);
    let predictions = probabilities.argmax_rows();
    let accuracy = accuracy(&predictions, labels);
    ForwardOutput {
        loss,
        accuracy,
        predictions,
        probabilities,
        logits,
    }
}
