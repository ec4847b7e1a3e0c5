//! Library entry for tunescout exposing the catalog gateway and state
//! managers for consumers and integration tests.

pub mod app;
pub mod args;
pub mod sources;
pub mod state;
pub mod storage;
pub mod util;
