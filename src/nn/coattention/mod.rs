/*
 * @Author       : 老董
 * @Description  : 协同注意力模型：图像区域与问题单词相互注意，
 *                 亲和矩阵经`att_round`轮门控记忆逐步修正，最后由注意力向量分类。
 *
 * 形状约定（B 为批大小，N = H*W，T 为问题长度）：
 * - 图像特征 [B, H, W, img_dim]，内部展平为[B, N, img_dim]
 * - 问题状态 [B, T, rnn_size]
 * - 标签     [B, ans_vocab_size]
 */

mod attention;
mod memory;

pub use attention::{AttentionStep, affinity, initial_attention, refined_attention};
pub use memory::{MemoryState, forget_gate};

use super::classifier::{self, ForwardOutput};
use super::init::UniformInit;
use super::{
    Batch, Dropout, ForwardMode, InputSlot, InputSlots, ModelError, ModelKind, Module, VqaConfig,
};
use crate::tensor::Tensor;
use rand::Rng;

/// 协同注意力模型的全部可训练参数。
/// 记 D=img_dim，d=rnn_size，k=att_hidden_dim，h=hidden_dim
#[derive(Debug, Clone)]
pub struct CoAttentionParams {
    /// 构造亲和矩阵的双线性权重 [D, d]
    pub hidden_w: Tensor,
    /// [D, k]
    pub v_w: Tensor,
    /// [N, k]
    pub v_b: Tensor,
    /// [d, k]
    pub q_w: Tensor,
    /// [T, k]
    pub q_b: Tensor,
    /// [k, 1]
    pub img_att_w: Tensor,
    /// [N, 1]
    pub img_att_b: Tensor,
    /// [k, 1]
    pub que_att_w: Tensor,
    /// [T, 1]
    pub que_att_b: Tensor,
    /// [D, h]
    pub linear_v_w: Tensor,
    /// [d, h]
    pub linear_q_w: Tensor,
    /// [h]
    pub linear_b: Tensor,
    /// [h, num_output]
    pub score_w: Tensor,
    /// [num_output]
    pub score_b: Tensor,
}

/// 带每轮中间结果的前向输出
#[derive(Debug, Clone)]
pub struct CoAttentionOutput {
    pub output: ForwardOutput,
    /// 每次记忆更新的门控值，首次（未经门控）为`None`；长度恒等于`att_round`
    pub gates: Vec<Option<f32>>,
    /// 最后一轮的注意力结果，分类即基于此
    pub final_step: AttentionStep,
}

#[derive(Debug, Clone)]
pub struct CoAttentionModel {
    params: CoAttentionParams,
    dropout: Dropout,
    slots: InputSlots,
    regions: usize,
    img_dim: usize,
    att_round: usize,
}

impl CoAttentionModel {
    pub fn build<R: Rng + ?Sized>(config: &VqaConfig, rng: &mut R) -> Result<Self, ModelError> {
        config.validate(ModelKind::CoAttention)?;
        let (img_dim, d, k, h) = (
            config.img_dim,
            config.rnn_size,
            config.att_hidden_dim,
            config.hidden_dim,
        );
        let (n, t) = (config.regions(), config.max_question_length);
        let mut init = UniformInit::new(config.init_bound, rng);
        let params = CoAttentionParams {
            hidden_w: init.param("hidden_W", &[img_dim, d]),
            v_w: init.param("V_W", &[img_dim, k]),
            v_b: init.param("V_b", &[n, k]),
            q_w: init.param("Q_W", &[d, k]),
            q_b: init.param("Q_b", &[t, k]),
            img_att_w: init.param("img_att_W", &[k, 1]),
            img_att_b: init.param("img_att_b", &[n, 1]),
            que_att_w: init.param("que_att_W", &[k, 1]),
            que_att_b: init.param("que_att_b", &[t, 1]),
            linear_v_w: init.param("linear_V_W", &[img_dim, h]),
            linear_q_w: init.param("linear_Q_W", &[d, h]),
            linear_b: init.param("linear_b", &[h]),
            score_w: init.param("score_W", &[h, config.num_output]),
            score_b: init.param("score_b", &[config.num_output]),
        };
        let slots = InputSlots {
            image: InputSlot::batched(
                "att_img_state",
                &[config.img_height, config.img_width, img_dim],
            ),
            question: InputSlot::batched("que_state", &[t, d]),
            label: InputSlot::batched("att_label_batch", &[config.ans_vocab_size]),
        };
        let model = Self {
            params,
            dropout: Dropout::new(config.keep_prob()),
            slots,
            regions: n,
            img_dim,
            att_round: config.att_round,
        };
        tracing::info!(
            tensors = model.num_params(),
            elements = model.num_elements(),
            att_round = model.att_round,
            "协同注意力模型参数已构建"
        );
        Ok(model)
    }

    pub fn params(&self) -> &CoAttentionParams {
        &self.params
    }

    pub fn input_slots(&self) -> &InputSlots {
        &self.slots
    }

    pub fn att_round(&self) -> usize {
        self.att_round
    }

    pub fn forward<R: Rng + ?Sized>(
        &self,
        batch: &Batch,
        mode: ForwardMode,
        rng: &mut R,
    ) -> Result<ForwardOutput, ModelError> {
        self.forward_with_trace(batch, mode, rng).map(|o| o.output)
    }

    /// 前向计算并保留每轮的门控值与最后一轮的注意力结果。
    /// 各轮严格顺序执行：第 i+1 轮依赖第 i 轮的记忆状态。
    pub fn forward_with_trace<R: Rng + ?Sized>(
        &self,
        batch: &Batch,
        mode: ForwardMode,
        rng: &mut R,
    ) -> Result<CoAttentionOutput, ModelError> {
        let batch_size = self.slots.check(batch)?;
        let p = &self.params;
        let img_grid = batch
            .image
            .reshape(&[batch_size, self.regions, self.img_dim]);

        let mut step = initial_attention(p, &img_grid, &batch.question);
        let mut memory = MemoryState::Uninitialized;
        let mut gates = Vec::with_capacity(self.att_round);
        for round in 0..self.att_round {
            memory = memory.update(p, &step);
            gates.push(memory.gate());
            tracing::debug!(round, gate = ?memory.gate(), "注意力轮次");
            if let Some(hidden) = memory.affinity() {
                step = refined_attention(p, &step.img_grid, &step.que_grid, hidden);
            }
        }

        let score = joint_projection(p, &step.img_attention, &step.que_attention).tanh();
        let score = self.dropout.forward(&score, mode, rng);
        let logits = classifier::project(&score, &p.score_w, &p.score_b).relu();

        let output = classifier::evaluate(logits, &batch.labels);
        tracing::debug!(
            batch_size,
            loss = output.loss,
            accuracy = output.accuracy,
            "协同注意力模型前向计算完成"
        );
        Ok(CoAttentionOutput {
            output,
            gates,
            final_step: step,
        })
    }
}

/// v̂·linear_V_W + q̂·linear_Q_W + linear_b -> [B, h]，门控与分类共用
pub(crate) fn joint_projection(
    params: &CoAttentionParams,
    img_attention: &Tensor,
    que_attention: &Tensor,
) -> Tensor {
    img_attention.mat_mul(&params.linear_v_w)
        + que_attention.mat_mul(&params.linear_q_w)
        + &params.linear_b
}

impl Module for CoAttentionModel {
    fn parameters(&self) -> Vec<(&'static str, &Tensor)> {
        let p = &self.params;
        vec![
            ("hidden_W", &p.hidden_w),
            ("V_W", &p.v_w),
            ("V_b", &p.v_b),
            ("Q_W", &p.q_w),
            ("Q_b", &p.q_b),
            ("img_att_W", &p.img_att_w),
            ("img_att_b", &p.img_att_b),
            ("que_att_W", &p.que_att_w),
            ("que_att_b", &p.que_att_b),
            ("linear_V_W", &p.linear_v_w),
            ("linear_Q_W", &p.linear_q_w),
            ("linear_b", &p.linear_b),
            ("score_W", &p.score_w),
            ("score_b", &p.score_b),
        ]
    }

    fn parameters_mut(&mut self) -> Vec<(&'static str, &mut Tensor)> {
        let p = &mut self.params;
        vec![
            ("hidden_W", &mut p.hidden_w),
            ("V_W", &mut p.v_w),
            ("V_b", &mut p.v_b),
            ("Q_W", &mut p.q_w),
            ("Q_b", &mut p.q_b),
            ("img_att_W", &mut p.img_att_w),
            ("img_att_b", &mut p.img_att_b),
            ("que_att_W", &mut p.que_att_w),
            ("que_att_b", &mut p.que_att_b),
            ("linear_V_W", &mut p.linear_v_w),
            ("linear_Q_W", &mut p.linear_q_w),
            ("linear_b", &mut p.linear_b),
            ("score_W", &mut p.score_w),
            ("score_b", &mut p.score_b),
        ]
    }
}
