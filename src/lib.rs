//! # Only VQA
//!
//! `only_vqa`用纯rust实现视觉问答（Visual Question Answering）模型的前向计算核心：
//! 给定图像特征与问题编码，输出答案词表上的概率分布，以及训练所需的损失与准确率。
//! 提供两种结构：基线融合模型，以及带门控记忆的协同注意力模型。
//! 图像特征提取、问题编码、数据加载与优化器均由调用方提供。
//!

pub mod errors;
pub mod nn;
pub mod tensor;
pub mod utils;
