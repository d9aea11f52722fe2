/*
 * @Author       : 老董
 * @Description  : 基线融合模型：问题状态与图像特征分别投影到同一隐空间（tanh），
 *                 逐元素相乘融合后经线性层得到答案 logits。
 *
 * 形状约定（B 为批大小）：
 * - 图像特征 [B, img_dim]
 * - 问题状态 [B, 2 * rnn_layer * rnn_size]
 * - 标签     [B, ans_vocab_size]
 */

use super::classifier::{self, ForwardOutput};
use super::init::UniformInit;
use super::{Batch, Dropout, ForwardMode, InputSlot, InputSlots, ModelError, Module, VqaConfig};
use crate::tensor::Tensor;
use rand::Rng;

/// 基线模型的全部可训练参数
#[derive(Debug, Clone)]
pub struct BaselineParams {
    pub que_w: Tensor,
    pub que_b: Tensor,
    pub img_w: Tensor,
    pub img_b: Tensor,
    pub score_w: Tensor,
    pub score_b: Tensor,
}

#[derive(Debug, Clone)]
pub struct BaselineModel {
    params: BaselineParams,
    dropout: Dropout,
    slots: InputSlots,
}

impl BaselineModel {
    /// 按配置分配参数。配置须先通过校验。
    pub fn build<R: Rng + ?Sized>(config: &VqaConfig, rng: &mut R) -> Result<Self, ModelError> {
        config.validate(super::ModelKind::Baseline)?;
        let (q, h, out) = (config.question_state_dim(), config.hidden_dim, config.num_output);
        let mut init = UniformInit::new(config.init_bound, rng);
        let params = BaselineParams {
            que_w: init.param("que_W", &[q, h]),
            que_b: init.param("que_b", &[h]),
            img_w: init.param("img_W", &[config.img_dim, h]),
            img_b: init.param("img_b", &[h]),
            score_w: init.param("score_W", &[h, out]),
            score_b: init.param("score_b", &[out]),
        };
        let slots = InputSlots {
            image: InputSlot::batched("img_state", &[config.img_dim]),
            question: InputSlot::batched("que_state", &[q]),
            label: InputSlot::batched("label_batch", &[config.ans_vocab_size]),
        };
        let model = Self {
            params,
            dropout: Dropout::new(config.keep_prob()),
            slots,
        };
        tracing::info!(
            tensors = model.num_params(),
            elements = model.num_elements(),
            "基线模型参数已构建"
        );
        Ok(model)
    }

    pub fn params(&self) -> &BaselineParams {
        &self.params
    }

    pub fn input_slots(&self) -> &InputSlots {
        &self.slots
    }

    /// 前向计算：返回损失、准确率与预测
    pub fn forward<R: Rng + ?Sized>(
        &self,
        batch: &Batch,
        mode: ForwardMode,
        rng: &mut R,
    ) -> Result<ForwardOutput, ModelError> {
        let batch_size = self.slots.check(batch)?;
        let p = &self.params;

        let que_state = self.dropout.forward(&batch.question, mode, rng);
        let img_state = self.dropout.forward(&batch.image, mode, rng);
        let que_feature = classifier::project(&que_state, &p.que_w, &p.que_b).tanh();
        let img_feature = classifier::project(&img_state, &p.img_w, &p.img_b).tanh();

        let score = que_feature * &img_feature;
        let score = self.dropout.forward(&score, mode, rng);
        let logits = classifier::project(&score, &p.score_w, &p.score_b);

        let output = classifier::evaluate(logits, &batch.labels);
        tracing::debug!(
            batch_size,
            loss = output.loss,
            accuracy = output.accuracy,
            "基线模型前向计算完成"
        );
        Ok(output)
    }
}

impl Module for BaselineModel {
    fn parameters(&self) -> Vec<(&'static str, &Tensor)> {
        let p = &self.params;
        vec![
            ("que_W", &p.que_w),
            ("que_b", &p.que_b),
            ("img_W", &p.img_w),
            ("img_b", &p.img_b),
            ("score_W", &p.score_w),
            ("score_b", &p.score_b),
        ]
    }

    fn parameters_mut(&mut self) -> Vec<(&'static str, &mut Tensor)> {
        let p = &mut self.params;
        vec![
            ("que_W", &mut p.que_w),
            ("que_b", &mut p.que_b),
            ("img_W", &mut p.img_w),
            ("img_b", &mut p.img_b),
            ("score_W", &mut p.score_w),
            ("score_b", &mut p.score_b),
        ]
    }
}
