use lru::LruCache;
use serde::{Serialize, Deserialize};
use std::num::NonZeroUsize;
use std::sync::Arc;
use crate::core::error::Result;
use crate::query::ast::Expr;
use crate::query::parser::parse;

/// Parsed expressions keyed by their source text.
///
/// Only successful parses are stored; errors are recomputed each time.
pub struct QueryCache {
    cache: Option<LruCache<String, Arc<Expr>>>,
    pub size_limit: usize,
    pub hit_count: usize,
    pub miss_count: usize,
}

impl QueryCache {
    /// A `size_limit` of 0 disables caching
    pub fn new(size_limit: usize) -> Self {
        QueryCache {
            cache: NonZeroUsize::new(size_limit).map(LruCache::new),
            size_limit,
            hit_count: 0,
            miss_count: 0,
        }
    }

    pub fn get_or_parse(&mut self, text: &str) -> Result<Arc<Expr>> {
        let key = text.trim();
        let Some(cache) = self.cache.as_mut() else {
            return parse(text).map(Arc::new);
        };

        if let Some(expr) = cache.get(key) {
            self.hit_count += 1;
            tracing::trace!(expression = key, "query cache hit");
            return Ok(Arc::clone(expr));
        }

        self.miss_count += 1;
        tracing::trace!(expression = key, "query cache miss");
        // Parse the untrimmed text so error positions match the caller's input
        let expr = Arc::new(parse(text)?);
        cache.put(key.to_string(), Arc::clone(&expr));
        Ok(expr)
    }

    pub fn clear(&mut self) {
        if let Some(cache) = self.cache.as_mut() {
            cache.clear();
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hit_count: self.hit_count,
            miss_count: self.miss_count,
            size: self.cache.as_ref().map_or(0, |c| c.len()),
            capacity: self.size_limit,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub hit_count: usize,
    pub miss_count: usize,
    pub size: usize,
    pub capacity: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hit_count + self.miss_count;
        if total == 0 {
            0.0
        } else {
            self.hit_count as f64 / total as f64
        }
    }
}
