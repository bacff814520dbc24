// ==========================================
// 人力资源分配系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 致命错误终止整次运行，不返回任何部分分配
// ==========================================

use crate::domain::CapacityError;
use crate::engine::optimal::SolveStatus;
use thiserror::Error;

/// 分配引擎错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AllocationError {
    // ===== 致命: 记账错误 =====
    #[error("容量记账错误: {0}")]
    Capacity(#[from] CapacityError),

    // ===== 致命: 求解无可行解 =====
    #[error("线性规划无可行解: status={status}, message={message}")]
    Infeasible { status: SolveStatus, message: String },

    // ===== 参数/装配错误 =====
    #[error("运行参数无效 ({field}): {message}")]
    InvalidParameter { field: String, message: String },

    #[error("未配置线性规划求解器，无法执行 optimal 策略")]
    SolverUnavailable,
}

impl AllocationError {
    pub fn invalid_parameter(field: &str, message: impl Into<String>) -> Self {
        AllocationError::InvalidParameter {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Result 类型别名
pub type AllocationResult<T> = Result<T, AllocationError>;
