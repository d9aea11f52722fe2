/*
 * @Author       : 老董
 * @Description  : 外部组件的接口：问题编码器与图像特征源。
 *                 本库只规定其输出形状，内部实现（循环单元、卷积特征提取）由调用方提供。
 */

use crate::tensor::Tensor;

/// 问题编码器：把补齐后的词索引序列编码为定长状态
pub trait QuestionEncoder {
    /// 各循环层最终隐状态与细胞状态的拼接，形状为[B, 2 * rnn_layer * rnn_size]（基线模型用）
    fn encode_final_state(&self, questions: &[Vec<usize>]) -> Tensor;

    /// 每个时间步的隐状态，形状为[B, max_question_length, rnn_size]（协同注意力模型用）
    fn encode_sequence(&self, questions: &[Vec<usize>]) -> Tensor;
}

/// 图像特征源：基线模型需要[B, img_dim]，协同注意力模型需要[B, H, W, img_dim]
pub trait ImageFeatureSource {
    type Image;

    fn features(&self, images: &[Self::Image]) -> Tensor;
}
