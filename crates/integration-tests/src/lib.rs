//! End-to-end tests for the Mobile Shop backend.
//!
//! The actual tests live in `tests/`; they require a running server and a
//! seeded database, and are `#[ignore]`-gated accordingly.
