/*
 * @Author       : 老董
 * @Description  : Dropout（反向缩放版本）。训练时每个元素以`keep_prob`的概率保留并除以`keep_prob`，
 *                 以保持期望不变；推理时原样输出。随机源由调用方提供。
 */

use crate::tensor::Tensor;
use rand::Rng;

/// 前向计算模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForwardMode {
    /// 训练：启用 dropout
    #[default]
    Train,
    /// 推理/评估：关闭 dropout，同样的输入与参数总得到同样的输出
    Eval,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dropout {
    keep_prob: f32,
}

impl Dropout {
    /// `keep_prob`须在(0, 1]内，为1时等价于恒等映射
    pub fn new(keep_prob: f32) -> Self {
        assert!(
            keep_prob > 0.0 && keep_prob <= 1.0,
            "keep_prob须在(0, 1]内，实际为{keep_prob}"
        );
        Self { keep_prob }
    }

    pub fn keep_prob(&self) -> f32 {
        self.keep_prob
    }

    pub fn forward<R: Rng + ?Sized>(&self, x: &Tensor, mode: ForwardMode, rng: &mut R) -> Tensor {
        if mode == ForwardMode::Eval || self.keep_prob >= 1.0 {
            return x.clone();
        }
        let scale = 1.0 / self.keep_prob;
        let mask = (0..x.size())
            .map(|_| {
                if rng.r#gen::<f32>() < self.keep_prob {
                    scale
                } else {
                    0.0
                }
            })
            .collect::<Vec<_>>();
        x * &Tensor::new(&mask, x.shape())
    }
}
