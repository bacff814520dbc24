// ==========================================
// 人力资源分配系统 - 策略定义
// ==========================================
// 用途：
// - heuristic: 三轮贪心（骨干预置 → 预算填充 → 满负荷兜底）；
// - optimal: 线性规划建模后交由外部求解器，不做兜底。

use serde::{Deserialize, Serialize};

/// 分配策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationStrategy {
    Heuristic,
    Optimal,
}

impl AllocationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllocationStrategy::Heuristic => "heuristic",
            AllocationStrategy::Optimal => "optimal",
        }
    }

    pub fn title_cn(&self) -> &'static str {
        match self {
            AllocationStrategy::Heuristic => "贪心分配",
            AllocationStrategy::Optimal => "最优分配",
        }
    }
}

impl Default for AllocationStrategy {
    fn default() -> Self {
        AllocationStrategy::Heuristic
    }
}

impl std::fmt::Display for AllocationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AllocationStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "heuristic" | "greedy" => Ok(AllocationStrategy::Heuristic),
            "optimal" | "lp" | "linear_program" | "linear-program" => Ok(AllocationStrategy::Optimal),
            other => Err(format!("未知策略类型: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strategy() {
        assert_eq!("heuristic".parse::<AllocationStrategy>(), Ok(AllocationStrategy::Heuristic));
        assert_eq!(" Optimal ".parse::<AllocationStrategy>(), Ok(AllocationStrategy::Optimal));
        assert_eq!("linear-program".parse::<AllocationStrategy>(), Ok(AllocationStrategy::Optimal));
        assert!("random".parse::<AllocationStrategy>().is_err());
    }

    #[test]
    fn test_default_is_heuristic() {
        assert_eq!(AllocationStrategy::default(), AllocationStrategy::Heuristic);
        assert_eq!(AllocationStrategy::Optimal.to_string(), "optimal");
    }
}
