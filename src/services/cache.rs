//! 预测缓存
//!
//! 有界、并发安全的记忆化存储，将规范化查询键映射到分类器结果，
//! 满容量时淘汰最久未使用的条目（“使用”指读或写）。`get_or_compute`
//! 是唯一的变更路径。
//!
//! 同一键上的并发未命中会合并为一次计算：每个键持有一把在途
//! tokio 互斥锁，后到者等待并在锁后复查缓存。计算失败不会写入
//! 任何条目，错误只传播给本次调用方。

use crate::error::Result;
use crate::models::prediction::{PredictionQuery, PredictionResult};
use dashmap::DashMap;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// 缓存计数器
#[derive(Debug, Default)]
struct CacheCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
    coalesced: AtomicU64,
}

/// 缓存统计快照
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    /// 合并进同键在途计算的未命中数
    pub coalesced: u64,
    pub hit_rate: f64,
}

/// LRU 内部状态
///
/// `order` 从最久未使用到最近使用排列，与 `map` 的键集合始终一致。
#[derive(Debug, Default)]
struct LruState {
    map: HashMap<PredictionQuery, PredictionResult>,
    order: VecDeque<PredictionQuery>,
}

impl LruState {
    fn touch(&mut self, query: &PredictionQuery) {
        if let Some(pos) = self.order.iter().position(|q| q == query) {
            self.order.remove(pos);
            self.order.push_back(query.clone());
        }
    }
}

/// 有界 LRU 预测缓存
pub struct PredictionCache {
    capacity: usize,
    state: Mutex<LruState>,
    in_flight: DashMap<PredictionQuery, Arc<tokio::sync::Mutex<()>>>,
    counters: CacheCounters,
}

impl PredictionCache {
    /// 创建指定容量的缓存（容量下限为 1）
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            state: Mutex::new(LruState::default()),
            in_flight: DashMap::new(),
            counters: CacheCounters::default(),
        }
    }

    /// 查找并命中（作为一次“使用”刷新条目新近度）
    fn lookup(&self, query: &PredictionQuery) -> Option<PredictionResult> {
        let mut state = self.state.lock();
        let result = state.map.get(query).copied();
        if result.is_some() {
            state.touch(query);
        }
        result
    }

    /// 插入并按需淘汰最久未使用的条目
    fn insert(&self, query: PredictionQuery, result: PredictionResult) {
        let mut state = self.state.lock();
        if state.map.insert(query.clone(), result).is_none() {
            state.order.push_back(query);
        } else {
            state.touch(&query);
        }
        while state.map.len() > self.capacity {
            if let Some(victim) = state.order.pop_front() {
                state.map.remove(&victim);
                self.counters.evictions.fetch_add(1, Ordering::Relaxed);
                debug!("Evicted least-recently-used prediction cache entry");
            } else {
                break;
            }
        }
    }

    /// 命中返回缓存结果，未命中执行 `compute` 并写入
    ///
    /// 命中时不调用 `compute`（正确性要求，分类器确定性为前提）。
    /// 计算失败不写入条目，错误只传播给本次调用方。
    pub async fn get_or_compute<F, Fut>(
        &self,
        query: PredictionQuery,
        compute: F,
    ) -> Result<PredictionResult>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<PredictionResult>>,
    {
        if let Some(result) = self.lookup(&query) {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(result);
        }

        // 同键在途计算合并：取（或创建）该键的在途锁
        let gate = self
            .in_flight
            .entry(query.clone())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone();
        let _guard = gate.lock().await;

        // 等锁期间其他任务可能已完成计算
        if let Some(result) = self.lookup(&query) {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
            self.counters.coalesced.fetch_add(1, Ordering::Relaxed);
            return Ok(result);
        }

        self.counters.misses.fetch_add(1, Ordering::Relaxed);
        let outcome = compute().await;
        self.in_flight.remove(&query);

        match outcome {
            Ok(result) => {
                self.insert(query, result);
                Ok(result)
            }
            Err(e) => Err(e),
        }
    }

    /// 当前条目数
    pub fn len(&self) -> usize {
        self.state.lock().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 容量上限
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 只读探测，不刷新新近度（仅用于检查与测试）
    pub fn peek(&self, query: &PredictionQuery) -> Option<PredictionResult> {
        self.state.lock().map.get(query).copied()
    }

    /// 统计快照
    pub fn stats(&self) -> CacheStats {
        let hits = self.counters.hits.load(Ordering::Relaxed);
        let misses = self.counters.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        CacheStats {
            entries: self.len(),
            capacity: self.capacity,
            hits,
            misses,
            evictions: self.counters.evictions.load(Ordering::Relaxed),
            coalesced: self.counters.coalesced.load(Ordering::Relaxed),
            hit_rate: if total == 0 {
                0.0
            } else {
                hits as f64 / total as f64
            },
        }
    }
}

impl std::fmt::Debug for PredictionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionCache")
            .field("capacity", &self.capacity)
            .field("entries", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::record::SymptomSchema;
    use std::sync::atomic::AtomicUsize;

    fn query(age: u32, symptoms: &[&str]) -> PredictionQuery {
        let schema = SymptomSchema::new(vec![
            "A".to_string(),
            "B".to_string(),
            "C".to_string(),
            "D".to_string(),
        ]);
        let names: Vec<String> = symptoms.iter().map(|s| s.to_string()).collect();
        PredictionQuery::encode(&schema, age, &names).0
    }

    fn result(p: f64) -> PredictionResult {
        PredictionResult {
            risk_probability: p,
            is_high_risk: p > 0.5,
        }
    }

    #[tokio::test]
    async fn test_hit_does_not_invoke_compute() {
        let cache = PredictionCache::new(10);
        let calls = Arc::new(AtomicUsize::new(0));

        let q = query(50, &["A"]);
        let calls_a = calls.clone();
        let first = cache
            .get_or_compute(q.clone(), || async move {
                calls_a.fetch_add(1, Ordering::SeqCst);
                Ok(result(0.3))
            })
            .await
            .unwrap();

        let calls_b = calls.clone();
        let second = cache
            .get_or_compute(q, || async move {
                calls_b.fetch_add(1, Ordering::SeqCst);
                Ok(result(0.9))
            })
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 1);
    }

    #[tokio::test]
    async fn test_eviction_removes_least_recently_used() {
        let cache = PredictionCache::new(3);
        for (i, name) in ["A", "B", "C", "D"].iter().enumerate() {
            let p = i as f64 / 10.0;
            cache
                .get_or_compute(query(50, &[name]), || async move { Ok(result(p)) })
                .await
                .unwrap();
        }

        assert_eq!(cache.len(), 3);
        assert!(cache.peek(&query(50, &["A"])).is_none());
        assert!(cache.peek(&query(50, &["B"])).is_some());
        assert!(cache.peek(&query(50, &["C"])).is_some());
        assert!(cache.peek(&query(50, &["D"])).is_some());
        assert_eq!(cache.stats().evictions, 1);
    }

    #[tokio::test]
    async fn test_read_refreshes_recency() {
        // 容量 2：K1, K2 写入后读 K1，再写 K3 → 淘汰 K2 而非 K1
        let cache = PredictionCache::new(2);
        let k1 = query(50, &["A"]);
        let k2 = query(50, &["B"]);
        let k3 = query(50, &["C"]);

        cache
            .get_or_compute(k1.clone(), || async { Ok(result(0.1)) })
            .await
            .unwrap();
        cache
            .get_or_compute(k2.clone(), || async { Ok(result(0.2)) })
            .await
            .unwrap();

        let r1 = cache
            .get_or_compute(k1.clone(), || async { Ok(result(0.9)) })
            .await
            .unwrap();
        assert_eq!(r1, result(0.1));

        cache
            .get_or_compute(k3.clone(), || async { Ok(result(0.3)) })
            .await
            .unwrap();

        assert!(cache.peek(&k1).is_some());
        assert!(cache.peek(&k2).is_none());
        assert!(cache.peek(&k3).is_some());
    }

    #[tokio::test]
    async fn test_failed_compute_is_not_cached() {
        let cache = PredictionCache::new(10);
        let q = query(50, &["A"]);

        let err = cache
            .get_or_compute(q.clone(), || async {
                Err(AppError::Classifier("model exploded".to_string()))
            })
            .await;
        assert!(err.is_err());
        assert!(cache.is_empty());

        // 失败不会毒化后续调用
        let ok = cache
            .get_or_compute(q.clone(), || async { Ok(result(0.4)) })
            .await
            .unwrap();
        assert_eq!(ok, result(0.4));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_misses_coalesce() {
        let cache = Arc::new(PredictionCache::new(10));
        let calls = Arc::new(AtomicUsize::new(0));
        let q = query(50, &["A"]);

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = cache.clone();
            let calls = calls.clone();
            let q = q.clone();
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_compute(q, || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
                        Ok(result(0.6))
                    })
                    .await
                    .unwrap()
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap(), result(0.6));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_zero_capacity_clamped_to_one() {
        let cache = PredictionCache::new(0);
        assert_eq!(cache.capacity(), 1);
        cache
            .get_or_compute(query(50, &["A"]), || async { Ok(result(0.1)) })
            .await
            .unwrap();
        assert_eq!(cache.len(), 1);
    }
}
