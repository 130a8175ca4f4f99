//! 解析成功后产生的语句结构

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 解析结果的根节点，按值交给执行引擎
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    /// 索引名到类型名的映射，一次解析最多填充一个
    pub index_type_bindings: Vec<BTreeMap<String, String>>,
    /// 每个条件一个单项映射，以索引引用为键，保持源码顺序
    pub conditions: Vec<BTreeMap<String, Condition>>,
    pub time_begin: String,
    pub time_end: String,
}

impl Statement {
    /// 所有 `(索引, 类型)` 绑定
    pub fn bindings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.index_type_bindings
            .iter()
            .flat_map(|m| m.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// 按源码顺序返回所有 `(索引引用, 条件)`
    pub fn conditions(&self) -> impl Iterator<Item = (&str, &Condition)> {
        self.conditions
            .iter()
            .flat_map(|m| m.iter().map(|(k, v)| (k.as_str(), v)))
    }

    pub fn conditions_for<'s>(&'s self, index: &'s str) -> impl Iterator<Item = &'s Condition> {
        self.conditions()
            .filter(move |(k, _)| *k == index)
            .map(|(_, c)| c)
    }
}

/// 作用于单个字段的过滤条件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field_name: String,
    pub comparator: Comparator,
    pub value: ConditionValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Comparator {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    /// 前缀匹配
    Pf,
    /// 后缀匹配
    Sf,
}

/// 比较运算符接受的值形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    Number,
    Text,
    /// 带引号的文本或裸数字，由下一个 token 决定
    Either,
}

impl Comparator {
    pub fn as_str(self) -> &'static str {
        match self {
            Comparator::Eq => "EQ",
            Comparator::Neq => "NEQ",
            Comparator::Gt => "GT",
            Comparator::Gte => "GTE",
            Comparator::Lt => "LT",
            Comparator::Lte => "LTE",
            Comparator::Pf => "PF",
            Comparator::Sf => "SF",
        }
    }

    pub fn value_shape(self) -> ValueShape {
        match self {
            Comparator::Gt | Comparator::Gte | Comparator::Lt | Comparator::Lte => ValueShape::Number,
            Comparator::Pf | Comparator::Sf => ValueShape::Text,
            Comparator::Eq | Comparator::Neq => ValueShape::Either,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 与字段比较的字面值，显式携带类型标签
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ConditionValue {
    Number(f64),
    Text(String),
}

impl ConditionValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ConditionValue::Number(n) => Some(*n),
            ConditionValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ConditionValue::Text(s) => Some(s),
            ConditionValue::Number(_) => None,
        }
    }
}
