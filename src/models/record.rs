use crate::error::{AppError, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// 症状模式
///
/// 固定的有序症状名称列表，在数据加载时确定一次，随后被所有记录共享。
/// 同时维护一次性构建的 名称→下标 查找表，避免运行期按字符串动态取列。
#[derive(Debug, Clone)]
pub struct SymptomSchema {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl SymptomSchema {
    /// 从有序名称列表创建模式
    pub fn new(names: Vec<String>) -> Self {
        let index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self { names, index }
    }

    /// 症状数量
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// 有序症状名称
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// 按下标取症状名称
    pub fn name(&self, idx: usize) -> &str {
        &self.names[idx]
    }

    /// 按名称解析下标，未知名称返回 None
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }
}

/// 患者记录
///
/// 加载后不可变。`symptoms` 按症状模式顺序对齐，长度恒等于模式大小。
#[derive(Debug, Clone, PartialEq)]
pub struct PatientRecord {
    /// 年龄
    pub age: u32,
    /// 症状指示向量（按模式顺序）
    pub symptoms: Vec<bool>,
    /// 风险评分，[0, 100]
    pub risk_score: f64,
    /// 二元风险标签
    pub at_risk: bool,
}

/// 记录存储
///
/// 进程级只读的内存表，启动时构建一次，之后不再变更。
#[derive(Debug)]
pub struct RecordStore {
    schema: Arc<SymptomSchema>,
    records: Vec<PatientRecord>,
}

impl RecordStore {
    /// 从模式与记录列表构建存储
    ///
    /// 所有记录的症状向量长度必须与模式一致，否则视为数据集错误。
    pub fn new(schema: Arc<SymptomSchema>, records: Vec<PatientRecord>) -> Result<Self> {
        for (i, record) in records.iter().enumerate() {
            if record.symptoms.len() != schema.len() {
                return Err(AppError::Dataset(format!(
                    "记录 {} 的症状向量长度 {} 与模式大小 {} 不一致",
                    i,
                    record.symptoms.len(),
                    schema.len()
                )));
            }
        }
        Ok(Self { schema, records })
    }

    /// 症状模式
    pub fn schema(&self) -> &Arc<SymptomSchema> {
        &self.schema
    }

    /// 全部记录
    pub fn records(&self) -> &[PatientRecord] {
        &self.records
    }

    /// 记录数
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 内存占用估算（字节），用于健康检查
    pub fn memory_estimate_bytes(&self) -> usize {
        let per_record = std::mem::size_of::<PatientRecord>() + self.schema.len();
        self.records.len() * per_record
            + self
                .schema
                .names()
                .iter()
                .map(|n| n.len() + std::mem::size_of::<String>())
                .sum::<usize>()
    }
}
