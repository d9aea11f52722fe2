/*
 * @Author       : 老董
 * @Description  : 模型选择入口：调用方选定一种结构，构建一次参数，之后对每个批次反复前向计算。
 */

use super::{
    Batch, BaselineModel, CoAttentionModel, ForwardMode, ForwardOutput, ImageFeatureSource,
    InputSlots, ModelError, ModelKind, Module, QuestionEncoder, VqaConfig,
};
use crate::tensor::Tensor;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone)]
pub enum VqaModel {
    Baseline(BaselineModel),
    CoAttention(CoAttentionModel),
}

impl VqaModel {
    /// 以`config.seed`为种子构建参数，同一配置总得到同一组初始参数
    pub fn build(kind: ModelKind, config: &VqaConfig) -> Result<Self, ModelError> {
        let mut rng = StdRng::seed_from_u64(config.seed);
        Self::build_with_rng(kind, config, &mut rng)
    }

    pub fn build_with_rng<R: Rng + ?Sized>(
        kind: ModelKind,
        config: &VqaConfig,
        rng: &mut R,
    ) -> Result<Self, ModelError> {
        Ok(match kind {
            ModelKind::Baseline => Self::Baseline(BaselineModel::build(config, rng)?),
            ModelKind::CoAttention => Self::CoAttention(CoAttentionModel::build(config, rng)?),
        })
    }

    pub fn kind(&self) -> ModelKind {
        match self {
            Self::Baseline(_) => ModelKind::Baseline,
            Self::CoAttention(_) => ModelKind::CoAttention,
        }
    }

    /// 训练循环每个批次须绑定的三个输入槽位
    pub fn input_slots(&self) -> &InputSlots {
        match self {
            Self::Baseline(model) => model.input_slots(),
            Self::CoAttention(model) => model.input_slots(),
        }
    }

    pub fn forward<R: Rng + ?Sized>(
        &self,
        batch: &Batch,
        mode: ForwardMode,
        rng: &mut R,
    ) -> Result<ForwardOutput, ModelError> {
        match self {
            Self::Baseline(model) => model.forward(batch, mode, rng),
            Self::CoAttention(model) => model.forward(batch, mode, rng),
        }
    }

    /// 先经外部编码器与特征源得到问题状态和图像特征，再做前向计算
    #[allow(clippy::too_many_arguments)]
    pub fn forward_with_encoder<E, S, R>(
        &self,
        encoder: &E,
        source: &S,
        images: &[S::Image],
        questions: &[Vec<usize>],
        labels: Tensor,
        mode: ForwardMode,
        rng: &mut R,
    ) -> Result<ForwardOutput, ModelError>
    where
        E: QuestionEncoder + ?Sized,
        S: ImageFeatureSource + ?Sized,
        R: Rng + ?Sized,
    {
        let question = match self {
            Self::Baseline(_) => encoder.encode_final_state(questions),
            Self::CoAttention(_) => encoder.encode_sequence(questions),
        };
        let batch = Batch::new(source.features(images), question, labels);
        self.forward(&batch, mode, rng)
    }
}

impl Module for VqaModel {
    fn parameters(&self) -> Vec<(&'static str, &Tensor)> {
        match self {
            Self::Baseline(model) => model.parameters(),
            Self::CoAttention(model) => model.parameters(),
        }
    }

    fn parameters_mut(&mut self) -> Vec<(&'static str, &mut Tensor)> {
        match self {
            Self::Baseline(model) => model.parameters_mut(),
            Self::CoAttention(model) => model.parameters_mut(),
        }
    }
}
