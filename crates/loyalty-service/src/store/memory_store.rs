//! 内存存储
//!
//! 使用 DashMap 实现的高并发内存存储，额外记录插入序号以便按写入顺序列出。

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// 带插入序号的存储槽
#[derive(Debug)]
struct Slot<T> {
    seq: u64,
    value: T,
}

#[derive(Debug)]
struct Inner<T> {
    data: DashMap<String, Slot<T>>,
    next_seq: AtomicU64,
}

/// 通用内存存储
///
/// 基于 DashMap 实现，支持高并发读写操作。
/// 覆盖写入不会改变记录的插入序号，`list` / `list_by` 始终按首次插入顺序返回。
/// 克隆得到的实例共享同一份数据。
#[derive(Debug)]
pub struct MemoryStore<T> {
    inner: Arc<Inner<T>>,
}

impl<T: Clone> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> MemoryStore<T> {
    /// 创建新的内存存储实例
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                data: DashMap::new(),
                next_seq: AtomicU64::new(0),
            }),
        }
    }

    /// 插入或更新数据
    ///
    /// 如果 key 已存在则覆盖原有数据，保留原插入序号
    pub fn insert(&self, id: &str, value: T) {
        match self.inner.data.entry(id.to_string()) {
            Entry::Occupied(mut entry) => entry.get_mut().value = value,
            Entry::Vacant(entry) => {
                entry.insert(Slot {
                    seq: self.next_seq(),
                    value,
                });
            }
        }
    }

    /// 仅在 key 不存在时插入
    ///
    /// 返回是否插入成功
    pub fn insert_if_absent(&self, id: &str, value: T) -> bool {
        match self.inner.data.entry(id.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(Slot {
                    seq: self.next_seq(),
                    value,
                });
                true
            }
        }
    }

    fn next_seq(&self) -> u64 {
        self.inner.next_seq.fetch_add(1, Ordering::Relaxed)
    }

    /// 获取数据
    ///
    /// 返回数据的克隆，不持有锁
    pub fn get(&self, id: &str) -> Option<T> {
        self.inner.data.get(id).map(|slot| slot.value.clone())
    }

    /// 在记录的独占锁内执行修改
    ///
    /// 闭包执行期间同一 key 的其他读写都会等待，因此闭包内的检查与修改
    /// 对外表现为一个原子步骤。闭包内不得再访问同一个存储实例，否则会死锁。
    /// key 不存在时返回 None。
    pub fn update<R, F>(&self, id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        self.inner
            .data
            .get_mut(id)
            .map(|mut slot| f(&mut slot.value))
    }

    /// 列出所有数据
    ///
    /// 按插入顺序返回所有值的克隆列表
    pub fn list(&self) -> Vec<T> {
        self.list_by(|_| true)
    }

    /// 按条件筛选数据
    ///
    /// 按插入顺序返回满足条件的所有数据
    pub fn list_by<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        let mut matched: Vec<(u64, T)> = self
            .inner
            .data
            .iter()
            .filter(|entry| predicate(&entry.value().value))
            .map(|entry| (entry.value().seq, entry.value().value.clone()))
            .collect();
        matched.sort_by_key(|(seq, _)| *seq);
        matched.into_iter().map(|(_, value)| value).collect()
    }

    /// 获取数据总数
    pub fn count(&self) -> usize {
        self.inner.data.len()
    }

    /// 检查是否存在指定 key
    pub fn contains(&self, id: &str) -> bool {
        self.inner.data.contains_key(id)
    }

    /// 批量插入数据
    ///
    /// 接收一个迭代器，提取每个元素的 key 并插入
    pub fn insert_many<I, F>(&self, items: I, key_fn: F)
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> String,
    {
        for item in items {
            let key = key_fn(&item);
            self.insert(&key, item);
        }
    }
}

impl<T> Clone for MemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
