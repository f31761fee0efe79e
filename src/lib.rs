//! CloudFormation template → architecture diagram service.
//!
//! ARCHITECTURE
//! ============
//! - `cfn`: tag-aware YAML loading, resource registry, graph extraction.
//! - `diagram`: DOT emission, Graphviz rendering, icon URL rewriting.
//! - `routes`: the HTTP facade (`POST /generate-diagram`, `GET /icons/...`).
//! - `config` / `state`: startup configuration shared read-only by handlers.

pub mod cfn;
pub mod config;
pub mod diagram;
pub mod routes;
pub mod state;

#[cfg(test)]
mod test_support;
