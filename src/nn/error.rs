/*
 * @Author       : 老董
 * @Description  : VQA 模型的错误类型。纯数值流水线只有两类错误：形状不符与配置不一致，
 *                 且都在任何运算开始之前被检出。
 */

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// 输入（或参数）张量的形状与配置不符
    #[error("形状不符（{message}）：期望{expected:?}，实际{got:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
        message: String,
    },
    /// 配置项之间相互矛盾，如`num_output`与`ans_vocab_size`不等
    #[error("配置不一致：{0}")]
    ConfigurationInconsistency(String),
    /// 单个配置项取值非法
    #[error("配置非法：{0}")]
    InvalidConfig(String),
    /// 按名称访问了不存在的参数
    #[error("不存在名为`{0}`的参数")]
    UnknownParameter(String),
    /// 读取或解析配置文件失败
    #[error("配置读取失败：{0}")]
    ConfigIo(String),
}

impl ModelError {
    pub(crate) fn shape_mismatch(expected: &[usize], got: &[usize], message: &str) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
            message: message.to_string(),
        }
    }
}
