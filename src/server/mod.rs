//! HTTP server layer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │                   GET /tiles/{z}/{x}/{y}                        │
//! │                                                                 │
//! │  ┌───────────────────────────┐  ┌───────────────────────────┐   │
//! │  │         handlers          │  │          routes           │   │
//! │  │ (tile, health, errors)    │  │  (router, CORS, tracing)  │   │
//! │  └───────────────────────────┘  └───────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    empty_tile_handler, health_handler, tile_handler, AppState, HandlerError, HealthResponse,
    MVT_CONTENT_TYPE, POINT_COUNT_HEADER,
};
pub use routes::{create_router, RouterConfig, ALLOWED_METHODS};
