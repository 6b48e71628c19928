//! ナレッジ一覧のキャッシュ
//!
//! レートリミット回避のため、一覧 API の結果を TTL 付きで保持する。
//! 読み取りはリードロックの高速パス、失効時はライトロック取得後に
//! もう一度鮮度を確かめてから取得する（待っている間に別の呼び出しが
//! 更新していることがある）。

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use crate::client::clock::{Clock, StdClock};
use crate::error::ClientError;
use crate::model::KnowledgeListing;

/// キャッシュエントリ（スナップショットと取得時刻）
struct CacheEntry {
    listing: Arc<KnowledgeListing>,
    fetched_at_ms: u64,
}

/// TTL 付きの一覧キャッシュ
///
/// 保持するスナップショットは `Arc` で貸し出すだけで、呼び出し側が
/// キャッシュの中身を書き換えることはできない。
pub struct ListingCache<C: Clock = StdClock> {
    entry: RwLock<Option<CacheEntry>>,
    ttl_ms: u64,
    clock: C,
}

impl ListingCache<StdClock> {
    /// TTL を指定してキャッシュを作成する
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, StdClock)
    }
}

impl<C: Clock> ListingCache<C> {
    /// Clock 実装を差し替えてキャッシュを作成する（テスト用）
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            entry: RwLock::new(None),
            ttl_ms: ttl.as_millis() as u64,
            clock,
        }
    }

    fn is_fresh(&self, entry: &CacheEntry) -> bool {
        self.clock.now_ms().saturating_sub(entry.fetched_at_ms) < self.ttl_ms
    }

    /// キャッシュが新鮮ならそれを、失効していれば `fetch` で取得して差し替える
    ///
    /// `fetch` が失敗した場合はキャッシュを変更せずエラーを返す。
    /// 厳密な single-flight ではない: ライトロック前に失効を観測した複数の
    /// 呼び出しがそれぞれ fetch することはあるが、TTL より古い結果は返さない。
    pub fn get_or_fetch<F>(&self, fetch: F) -> Result<Arc<KnowledgeListing>, ClientError>
    where
        F: FnOnce() -> Result<KnowledgeListing, ClientError>,
    {
        {
            let guard = self.entry.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(entry) = guard.as_ref() {
                if self.is_fresh(entry) {
                    return Ok(Arc::clone(&entry.listing));
                }
            }
        }

        let mut guard = self.entry.write().unwrap_or_else(PoisonError::into_inner);

        // ライトロック待ちの間に別の呼び出しが更新済みなら取得し直さない
        if let Some(entry) = guard.as_ref() {
            if self.is_fresh(entry) {
                return Ok(Arc::clone(&entry.listing));
            }
        }

        tracing::debug!("knowledge listing cache stale, fetching");
        let listing = Arc::new(fetch()?);
        *guard = Some(CacheEntry {
            listing: Arc::clone(&listing),
            fetched_at_ms: self.clock.now_ms(),
        });
        Ok(listing)
    }

    /// キャッシュを無条件にクリアする（変更系操作の成功後に呼ぶ）
    ///
    /// 次の `get_or_fetch` は必ず取得し直すため、変更前の一覧が
    /// キャッシュから観測されることはない。
    pub fn invalidate(&self) {
        let mut guard = self.entry.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
    use std::thread;

    /// テスト用の固定時刻 Clock
    struct TestClock(Arc<AtomicU64>);

    impl Clock for TestClock {
        fn now_ms(&self) -> u64 {
            self.0.load(Ordering::SeqCst)
        }
    }

    fn empty_listing() -> KnowledgeListing {
        KnowledgeListing {
            knowledge: vec![],
            folders: vec![],
        }
    }

    fn test_cache(ttl_ms: u64) -> (ListingCache<TestClock>, Arc<AtomicU64>) {
        let now = Arc::new(AtomicU64::new(1_000_000));
        let cache = ListingCache::with_clock(
            Duration::from_millis(ttl_ms),
            TestClock(Arc::clone(&now)),
        );
        (cache, now)
    }

    #[test]
    fn test_fresh_cache_serves_without_fetch() {
        let (cache, _now) = test_cache(60_000);
        let count = AtomicUsize::new(0);
        let fetch = || {
            count.fetch_add(1, Ordering::SeqCst);
            Ok(empty_listing())
        };

        cache.get_or_fetch(fetch).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);

        // TTL 内の再読はフェッチしない
        for _ in 0..5 {
            cache
                .get_or_fetch(|| {
                    count.fetch_add(1, Ordering::SeqCst);
                    Ok(empty_listing())
                })
                .unwrap();
        }
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_ttl_expiry_triggers_exactly_one_refetch() {
        let (cache, now) = test_cache(60_000);
        let count = AtomicUsize::new(0);

        cache
            .get_or_fetch(|| {
                count.fetch_add(1, Ordering::SeqCst);
                Ok(empty_listing())
            })
            .unwrap();

        // TTL ちょうどで失効する（now - fetched_at >= ttl）
        now.fetch_add(60_000, Ordering::SeqCst);
        cache
            .get_or_fetch(|| {
                count.fetch_add(1, Ordering::SeqCst);
                Ok(empty_listing())
            })
            .unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 2);

        cache
            .get_or_fetch(|| {
                count.fetch_add(1, Ordering::SeqCst);
                Ok(empty_listing())
            })
            .unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_invalidate_forces_refetch_within_ttl() {
        let (cache, _now) = test_cache(60_000);
        let count = AtomicUsize::new(0);

        cache
            .get_or_fetch(|| {
                count.fetch_add(1, Ordering::SeqCst);
                Ok(empty_listing())
            })
            .unwrap();
        cache.invalidate();
        cache
            .get_or_fetch(|| {
                count.fetch_add(1, Ordering::SeqCst);
                Ok(empty_listing())
            })
            .unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failed_fetch_leaves_prior_entry() {
        let (cache, now) = test_cache(60_000);

        cache.get_or_fetch(|| Ok(empty_listing())).unwrap();

        // 失効させてから失敗するフェッチを流す
        now.fetch_add(60_000, Ordering::SeqCst);
        let err = cache
            .get_or_fetch(|| Err(ClientError::ApiStatus(500)))
            .unwrap_err();
        assert!(matches!(err, ClientError::ApiStatus(500)));

        // 元のエントリは残っている: 時刻を TTL 内に戻せばフェッチなしで返る
        now.fetch_sub(60_000, Ordering::SeqCst);
        cache
            .get_or_fetch(|| panic!("must not fetch"))
            .unwrap();
    }

    #[test]
    fn test_failed_fetch_on_empty_cache_propagates() {
        let (cache, _now) = test_cache(60_000);
        let err = cache
            .get_or_fetch(|| Err(ClientError::ApiStatus(429)))
            .unwrap_err();
        assert!(matches!(err, ClientError::ApiStatus(429)));

        // 失敗後も次の呼び出しで普通に取得できる
        cache.get_or_fetch(|| Ok(empty_listing())).unwrap();
    }

    #[test]
    fn test_concurrent_cold_reads() {
        let cache = Arc::new(ListingCache::new(Duration::from_secs(60)));
        let count = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..4 {
            let cache = Arc::clone(&cache);
            let count = Arc::clone(&count);
            handles.push(thread::spawn(move || {
                cache
                    .get_or_fetch(|| {
                        count.fetch_add(1, Ordering::SeqCst);
                        Ok(empty_listing())
                    })
                    .unwrap()
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        // ライトロック前に同時に失効を観測した分だけ重複フェッチはありうるが、
        // 少なくとも 1 回は取得され、以後の読みはキャッシュから返る
        let fetched = count.load(Ordering::SeqCst);
        assert!((1..=4).contains(&fetched), "fetched = {fetched}");

        cache.get_or_fetch(|| panic!("must not fetch")).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), fetched);
    }
}
