/*
 * @Author       : 老董
 * @Description  : Module trait 定义
 */

use super::ModelError;
use crate::tensor::Tensor;

/// 模块 trait
///
/// # 设计原则
/// - `forward()` **不是** trait 方法（两种模型的输入各异）
/// - `build()` **不是** trait 方法（参数各异）
/// - 参数以“名称 + 张量”的形式暴露，外部优化器通过`parameters_mut()`就地更新；
///   前向计算只借用`&self`，因此优化器与前向计算在编译期即不可能同时持有参数
pub trait Module {
    /// 获取所有可训练参数（按构建顺序）
    fn parameters(&self) -> Vec<(&'static str, &Tensor)>;

    /// 获取所有可训练参数的可变引用，供外部优化器就地更新
    fn parameters_mut(&mut self) -> Vec<(&'static str, &mut Tensor)>;

    /// 获取参数（张量）数量
    fn num_params(&self) -> usize {
        self.parameters().len()
    }

    /// 获取所有参数张量的元素总数
    fn num_elements(&self) -> usize {
        self.parameters().iter().map(|(_, t)| t.size()).sum()
    }

    fn parameter(&self, name: &str) -> Option<&Tensor> {
        self.parameters()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, t)| t)
    }

    /// 按名称替换某个参数的值。形状须与构建时一致，参数形状在构建后不再改变。
    fn set_parameter(&mut self, name: &str, value: Tensor) -> Result<(), ModelError> {
        let Some((_, slot)) = self.parameters_mut().into_iter().find(|(n, _)| *n == name) else {
            return Err(ModelError::UnknownParameter(name.to_string()));
        };
        if !slot.is_same_shape(&value) {
            return Err(ModelError::shape_mismatch(
                slot.shape(),
                value.shape(),
                &format!("参数`{name}`"),
            ));
        }
        *slot = value;
        Ok(())
    }
}
