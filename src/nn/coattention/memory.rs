/*
 * @Author       : 老董
 * @Description  : 门控记忆：跨轮次累积亲和矩阵 C。
 *
 * 状态机：Uninitialized --首次更新--> Initialized(C0) --之后每次更新--> Gated(C)
 * - 首次更新不经门控，直接采用首轮注意力算出的亲和矩阵；
 * - 之后 C' = (1 - f)·C_old + f·C_new，
 *   其中 C_new 为本轮注意力所用的亲和矩阵，
 *   f = tanh(Σ(v̂·linear_V_W + q̂·linear_Q_W + linear_b))，对整个批次只有一个标量。
 */

use super::{AttentionStep, CoAttentionParams, joint_projection};
use crate::tensor::Tensor;

#[derive(Debug, Clone, Default)]
pub enum MemoryState {
    #[default]
    Uninitialized,
    Initialized(Tensor),
    Gated { affinity: Tensor, gate: f32 },
}

impl MemoryState {
    /// 用本轮的注意力结果更新记忆，返回新状态（永远不会是`Uninitialized`）
    pub fn update(self, params: &CoAttentionParams, step: &AttentionStep) -> Self {
        match self {
            Self::Uninitialized => Self::Initialized(step.affinity.clone()),
            Self::Initialized(old) | Self::Gated { affinity: old, .. } => {
                let gate = forget_gate(params, &step.img_attention, &step.que_attention);
                let affinity = old * (1.0 - gate) + &step.affinity * gate;
                tracing::trace!(gate, "亲和矩阵已门控更新");
                Self::Gated { affinity, gate }
            }
        }
    }

    /// 当前的亲和矩阵，未初始化时为`None`
    pub fn affinity(&self) -> Option<&Tensor> {
        match self {
            Self::Uninitialized => None,
            Self::Initialized(affinity) | Self::Gated { affinity, .. } => Some(affinity),
        }
    }

    /// 最近一次门控的取值，首次初始化（未经门控）时为`None`
    pub fn gate(&self) -> Option<f32> {
        match self {
            Self::Gated { gate, .. } => Some(*gate),
            _ => None,
        }
    }
}

/// 门控标量 f ∈ (-1, 1)，由整个批次的注意力向量共同决定
pub fn forget_gate(params: &CoAttentionParams, img_attention: &Tensor, que_attention: &Tensor) -> f32 {
    joint_projection(params, img_attention, que_attention)
        .sum_all()
        .tanh()
}
