/*
 * @Author       : 老董
 * @Description  : 张量层面的错误。张量原语遵循“先断言、后计算”的约定，
 *                 前置条件不满足时以`assert!(cond, "{}", TensorError::...)`的方式panic；
 *                 模型层在调用张量原语前已校验过输入，因此这些断言不会由用户输入触发。
 */

use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TensorError {
    /// 某个数值（维度、轴、长度等）不满足比较条件
    #[error("{value_name}须{operator}{threshold}")]
    ValueMustSatisfyComparison {
        value_name: String,
        operator: ComparisonOperator,
        threshold: usize,
    },
    /// 二元运算的两个操作数形状不兼容
    #[error("形状不一致，故无法{operator}：第一个张量的形状为{tensor1_shape:?}，第二个张量的形状为{tensor2_shape:?}")]
    OperatorError {
        operator: Operator,
        tensor1_shape: Vec<usize>,
        tensor2_shape: Vec<usize>,
    },
    #[error("张量维数须为{expected}，实际为{got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("张量形状不兼容")]
    IncompatibleShape,
    #[error("需要交换的维度必须是唯一且在[0, <张量维数>)范围内")]
    PermuteNeedUniqueAndInRange,
    #[error("张量数据长度{data_len}与形状{shape:?}不匹配")]
    DataShapeMismatch { data_len: usize, shape: Vec<usize> },
}

/// 张量的二元运算
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    MatMul,
    BatchMatMul,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "相加",
            Self::Sub => "相减",
            Self::Mul => "逐元素相乘",
            Self::MatMul => "矩阵相乘",
            Self::BatchMatMul => "批量矩阵相乘",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    GreaterOrEqual,
    GreaterThan,
    LessThan,
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::GreaterOrEqual => "≥",
            Self::GreaterThan => ">",
            Self::LessThan => "<",
        })
    }
}
