/*
 * @Author       : 老董
 * @Description  : VQA 模型的超参数配置。构建参数时固定，此后每个批次都须与之匹配。
 */

use super::ModelError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 两种可选的模型结构
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// 基线融合模型：投影 + 逐元素乘积 + 分类
    Baseline,
    /// 协同注意力模型：多轮注意力 + 门控记忆
    CoAttention,
}

/// 模型配置，可由 JSON 反序列化，缺省字段取`Default`中的值。
///
/// ```json
/// {
///   "img_dim": 512,
///   "img_height": 14,
///   "img_width": 14,
///   "rnn_size": 512,
///   "att_round": 2,
///   "num_output": 1000,
///   "ans_vocab_size": 1000
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VqaConfig {
    /// 训练循环期望的批大小（仅作参考，前向计算接受任意批大小）
    pub batch_size: usize,
    /// 图像特征宽度（基线为向量长度，协同注意力为每个区域的通道数）
    pub img_dim: usize,
    /// 协同注意力的空间特征图高度 H
    pub img_height: usize,
    /// 协同注意力的空间特征图宽度 W
    pub img_width: usize,
    pub hidden_dim: usize,
    /// 问题编码器每层的隐状态宽度 d
    pub rnn_size: usize,
    pub rnn_layer: usize,
    /// 参数均匀初始化的边界：U[-init_bound, init_bound]
    pub init_bound: f32,
    pub num_output: usize,
    /// 丢弃率，保留概率为`1 - dropout_rate`
    pub dropout_rate: f32,
    pub ans_vocab_size: usize,
    #[serde(alias = "max_que_length")]
    pub max_question_length: usize,
    pub att_hidden_dim: usize,
    /// 门控记忆的轮数，0 表示只用初始亲和矩阵
    pub att_round: usize,
    /// 构建参数时的随机种子
    pub seed: u64,
}

impl Default for VqaConfig {
    fn default() -> Self {
        Self {
            batch_size: 32,
            img_dim: 512,
            img_height: 14,
            img_width: 14,
            hidden_dim: 1024,
            rnn_size: 512,
            rnn_layer: 2,
            init_bound: 0.08,
            num_output: 1000,
            dropout_rate: 0.5,
            ans_vocab_size: 1000,
            max_question_length: 26,
            att_hidden_dim: 512,
            att_round: 2,
            seed: 42,
        }
    }
}

impl VqaConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        serde_json::from_str(json).map_err(|e| ModelError::ConfigIo(e.to_string()))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ModelError::ConfigIo(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// 区域数 N = H * W
    pub fn regions(&self) -> usize {
        self.img_height * self.img_width
    }

    /// 基线模型的问题状态宽度：各层最终隐状态与细胞状态拼接，即 2 * layers * d
    pub fn question_state_dim(&self) -> usize {
        2 * self.rnn_layer * self.rnn_size
    }

    pub fn keep_prob(&self) -> f32 {
        1.0 - self.dropout_rate
    }

    /// 校验配置。`num_output`与`ans_vocab_size`不等时分类器与标签宽度不一致，
    /// 此处显式拒绝，而不是任其在运算中被错误地广播。
    pub fn validate(&self, kind: ModelKind) -> Result<(), ModelError> {
        let mut positive = vec![
            ("batch_size", self.batch_size),
            ("img_dim", self.img_dim),
            ("hidden_dim", self.hidden_dim),
            ("rnn_size", self.rnn_size),
            ("num_output", self.num_output),
            ("ans_vocab_size", self.ans_vocab_size),
        ];
        match kind {
            ModelKind::Baseline => positive.push(("rnn_layer", self.rnn_layer)),
            ModelKind::CoAttention => positive.extend([
                ("img_height", self.img_height),
                ("img_width", self.img_width),
                ("max_question_length", self.max_question_length),
                ("att_hidden_dim", self.att_hidden_dim),
            ]),
        }
        if let Some((name, _)) = positive.iter().find(|(_, v)| *v == 0) {
            return Err(ModelError::InvalidConfig(format!("{name}须>0")));
        }
        if !(self.init_bound.is_finite() && self.init_bound > 0.0) {
            return Err(ModelError::InvalidConfig(format!(
                "init_bound须为正的有限值，实际为{}",
                self.init_bound
            )));
        }
        if !(0.0..1.0).contains(&self.dropout_rate) {
            return Err(ModelError::InvalidConfig(format!(
                "dropout_rate须在[0, 1)内，实际为{}",
                self.dropout_rate
            )));
        }
        if self.num_output != self.ans_vocab_size {
            return Err(ModelError::ConfigurationInconsistency(format!(
                "num_output（{}）须等于ans_vocab_size（{}）",
                self.num_output, self.ans_vocab_size
            )));
        }
        Ok(())
    }
}
