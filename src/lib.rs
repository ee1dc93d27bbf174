pub mod core;
pub mod schema;
pub mod index;
pub mod query;
pub mod search;

pub use crate::core::engine::Engine;
pub use crate::core::error::{Error, ErrorKind, Result};

/*
┌──────────────────────────────────────────────────────────────────────────────┐
│                              ODIE STRUCT ARCHITECTURE                        │
└──────────────────────────────────────────────────────────────────────────────┘

┌─────────────────────────────── SESSION LAYER ────────────────────────────────┐
│                                                                              │
│  struct Engine                                                               │
│    config: EngineConfig            // history / cache / sort policy          │
│    store: Arc<RecordStore>         // immutable events, id = load position   │
│    indices: Arc<FieldIndices>      // built once, read-only                  │
│    selection: Selection            // ordered ids, the active selection      │
│    history: History                // undo (bounded) + redo stacks           │
│    query_cache: QueryCache         // LRU of parsed expressions              │
│                                                                              │
└──────────────────────────────────────────────────────────────────────────────┘
            │ filter_equals / filter_year_range      │ query
            ▼                                        ▼
┌────────────── INDEX LAYER ──────────────┐  ┌──────────── QUERY LAYER ───────────┐
│  FieldIndices                           │  │  Lexer (nom)  → Spanned tokens     │
│    by_country:  value → RoaringBitmap   │  │  QueryParser  → Expr               │
│    by_type:     value → RoaringBitmap   │  │  matcher::compile → CompiledQuery  │
│    by_subtype:  value → RoaringBitmap   │  │    matches(Event) → bool           │
│    years: Vec<(i32, EventId)> sorted    │  │                                    │
└─────────────────────────────────────────┘  └────────────────────────────────────┘
            │ intersect with selection (order kept)
            ▼
┌────────────── SEARCH LAYER ─────────────┐
│  sort_events   stable, blank = minimum  │
│  TopKCollector min-heap of size k       │
└─────────────────────────────────────────┘
*/
