/*
 * @Author       : 老董
 * @Description  : 参数初始化：按名称与形状从 U[-init_bound, init_bound] 中采样，随机源由调用方给定。
 */

use crate::tensor::Tensor;
use rand::Rng;

/// 参数初始化器：所有参数都取自 U[-bound, bound]，随机源由调用方给定
pub(crate) struct UniformInit<'a, R: Rng + ?Sized> {
    bound: f32,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> UniformInit<'a, R> {
    pub(crate) fn new(bound: f32, rng: &'a mut R) -> Self {
        Self { bound, rng }
    }

    pub(crate) fn param(&mut self, name: &str, shape: &[usize]) -> Tensor {
        tracing::trace!(param = name, ?shape, "初始化参数");
        Tensor::new_uniform_with_rng(-self.bound, self.bound, shape, &mut *self.rng)
    }
}
