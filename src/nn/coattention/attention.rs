/*
 * @Author       : 老董
 * @Description  : 协同注意力的单轮注意力计算。
 *
 * 记号（单个样本）：V 为图像网格[N, D]，Q 为问题序列[T, d]，C 为亲和矩阵[N, T]
 * - 亲和矩阵：C = (V·hidden_W)·Qᵀ
 * - 图像隐表示：H_v = tanh(V·V_W + (C·Q)·Q_W + V_b)        -> [N, k]
 * - 问题隐表示：H_q = tanh(Q·Q_W + (Cᵀ·V)·V_W + Q_b)       -> [T, k]
 * - 注意力权重：a_v = softmax_N(H_v·img_att_W + img_att_b)，a_q 同理沿 T 归一化
 * - 注意力向量：v̂ = Σ a_v[i]·V[i]，q̂ = Σ a_q[j]·Q[j]
 * - 重加权网格：V' = V ⊙ a_v，Q' = Q ⊙ a_q，作为下一轮的输入
 * 以上均对批次中的每个样本独立进行。
 */

use super::CoAttentionParams;
use crate::tensor::Tensor;

/// 一轮注意力的全部产出
#[derive(Debug, Clone)]
pub struct AttentionStep {
    /// 注意力加权后的图像向量 [B, D]
    pub img_attention: Tensor,
    /// 注意力加权后的问题向量 [B, d]
    pub que_attention: Tensor,
    /// 区域注意力权重 [B, N]，每个样本之和为 1
    pub img_weights: Tensor,
    /// 单词注意力权重 [B, T]，每个样本之和为 1
    pub que_weights: Tensor,
    /// 按区域权重缩放后的图像网格 [B, N, D]
    pub img_grid: Tensor,
    /// 按单词权重缩放后的问题序列 [B, T, d]
    pub que_grid: Tensor,
    /// 本轮使用的亲和矩阵 [B, N, T]：首轮为新算出的，之后为门控记忆给出的
    pub affinity: Tensor,
}

/// 双线性亲和矩阵：[B, N, D]·hidden_W[D, d]·[B, T, d]ᵀ -> [B, N, T]
pub fn affinity(params: &CoAttentionParams, img_grid: &Tensor, que_grid: &Tensor) -> Tensor {
    img_grid
        .mat_mul_last_axis(&params.hidden_w)
        .batch_mat_mul(&que_grid.transpose_dims(1, 2))
}

/// 首轮注意力：亲和矩阵直接由原始（未加权）网格算出，只算一次并随结果返回
pub fn initial_attention(
    params: &CoAttentionParams,
    img_grid: &Tensor,
    que_grid: &Tensor,
) -> AttentionStep {
    let hidden = affinity(params, img_grid, que_grid);
    attend(params, img_grid, que_grid, &hidden, hidden.clone())
}

/// 后续轮次：以门控记忆给出的亲和矩阵计算注意力，该亲和矩阵原样随结果返回
pub fn refined_attention(
    params: &CoAttentionParams,
    img_grid: &Tensor,
    que_grid: &Tensor,
    hidden: &Tensor,
) -> AttentionStep {
    attend(params, img_grid, que_grid, hidden, hidden.clone())
}

fn attend(
    params: &CoAttentionParams,
    img_grid: &Tensor,
    que_grid: &Tensor,
    hidden: &Tensor,
    affinity: Tensor,
) -> AttentionStep {
    let (batch_size, regions) = (img_grid.shape()[0], img_grid.shape()[1]);
    let words = que_grid.shape()[1];

    // 每个区域的隐表示取决于亲和矩阵该行所对应的问题上下文
    let img_context = hidden.batch_mat_mul(que_grid);
    let img_hidden = (img_grid.mat_mul_last_axis(&params.v_w)
        + img_context.mat_mul_last_axis(&params.q_w)
        + &params.v_b)
        .tanh();
    let que_context = hidden.transpose_dims(1, 2).batch_mat_mul(img_grid);
    let que_hidden = (que_grid.mat_mul_last_axis(&params.q_w)
        + que_context.mat_mul_last_axis(&params.v_w)
        + &params.q_b)
        .tanh();

    let img_weights = (img_hidden.mat_mul_last_axis(&params.img_att_w) + &params.img_att_b)
        .reshape(&[batch_size, regions])
        .softmax(1);
    let que_weights = (que_hidden.mat_mul_last_axis(&params.que_att_w) + &params.que_att_b)
        .reshape(&[batch_size, words])
        .softmax(1);

    let (img_attention, img_reweighted) = weigh(img_grid, &img_weights);
    let (que_attention, que_reweighted) = weigh(que_grid, &que_weights);
    AttentionStep {
        img_attention,
        que_attention,
        img_weights,
        que_weights,
        img_grid: img_reweighted,
        que_grid: que_reweighted,
        affinity,
    }
}

/// 由[B, L]的权重得到加权和[B, F]与逐向量缩放后的网格[B, L, F]
fn weigh(grid: &Tensor, weights: &Tensor) -> (Tensor, Tensor) {
    let (batch_size, len, features) = (grid.shape()[0], grid.shape()[1], grid.shape()[2]);
    let summed = weights
        .reshape(&[batch_size, 1, len])
        .batch_mat_mul(grid)
        .reshape(&[batch_size, features]);
    let scaled = grid * &weights.reshape(&[batch_size, len, 1]);
    (summed, scaled)
}
