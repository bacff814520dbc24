// ==========================================
// 人力资源分配系统 - 主键校验
// ==========================================
// 规则: 同一文件内编号唯一，首次出现行号用于报错
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use std::collections::HashMap;

/// 校验编号唯一
///
/// # 参数
/// - ids: (行号, 编号) 列表，按文件顺序
pub fn ensure_unique_ids<'a, I>(ids: I) -> ImportResult<()>
where
    I: IntoIterator<Item = (usize, &'a str)>,
{
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (row, id) in ids {
        if let Some(first_row) = seen.get(id) {
            return Err(ImportError::DuplicateId {
                row,
                id: id.to_string(),
                first_row: *first_row,
            });
        }
        seen.insert(id, row);
    }
    Ok(())
}
