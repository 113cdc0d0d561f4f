use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;

use crate::variable::ValueMap;
use crate::variable::nested;

/// 测试运行期间共享的环境变量
///
/// clone 得到的是同一份数据的句柄：请求选项读取、响应解析写入的是同一个 Map。
/// 多个测试用例共享同一环境时，由调用方保证执行顺序。
#[derive(Debug, Clone, Default)]
pub struct Environment {
    values: Arc<RwLock<ValueMap>>,
}

impl Environment {
    /// 创建新的空环境
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(values: ValueMap) -> Self {
        Self {
            values: Arc::new(RwLock::new(values)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, ValueMap> {
        self.values.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ValueMap> {
        self.values.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// 只在顶层查找
    pub fn get(&self, key: &str) -> Option<Value> {
        self.read().get(key).cloned()
    }

    /// 深度优先查找，可命中嵌套 Map 中的 key
    pub fn lookup(&self, key: &str) -> Option<Value> {
        nested::lookup(key, &self.read()).cloned()
    }

    /// 插入或覆盖顶层变量
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.write().insert(key.into(), value.into());
    }

    /// 覆盖已存在的（可能嵌套的）变量，key 不存在时返回 false
    pub fn assign(&self, key: &str, value: impl Into<Value>) -> bool {
        nested::assign(key, value.into(), &mut self.write())
    }

    /// 顶层 key 列表
    pub fn keys(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    /// 当前内容的拷贝
    pub fn snapshot(&self) -> ValueMap {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

impl From<ValueMap> for Environment {
    fn from(values: ValueMap) -> Self {
        Self::from_map(values)
    }
}
