/*
 * @Author       : 老董
 * @Description  : 负责视觉问答（VQA）答案生成器的前向计算：
 *                 基线融合模型与协同注意力模型，以及二者共用的分类头
 */

mod baseline;
mod classifier;
pub mod coattention;
mod config;
mod dropout;
mod encoder;
mod error;
mod init;
mod input;
mod model;
mod module;

pub use baseline::{BaselineModel, BaselineParams};
pub use classifier::{ForwardOutput, accuracy, softmax_cross_entropy};
pub use coattention::{CoAttentionModel, CoAttentionOutput, CoAttentionParams};
pub use config::{ModelKind, VqaConfig};
pub use dropout::{Dropout, ForwardMode};
pub use encoder::{ImageFeatureSource, QuestionEncoder};
pub use error::ModelError;
pub use input::{Batch, InputSlot, InputSlots};
pub use model::VqaModel;
pub use module::Module;

#[cfg(test)]
mod tests;
