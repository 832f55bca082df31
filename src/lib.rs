//! AIS Media Browser
//!
//! Turns vendor media catalogs into a lazily expanded navigation tree with
//! stable, path-encoded node ids.
//!
//! This library provides:
//! - The browse tree builder: root routing, depth schemas and node id codec
//! - Catalog gateways for the AIS cloud (radio, podcasts), an audiobook
//!   library and the TuneIn OPML directory, plus a console app catalog trait
//! - Wire-format parsers for cloud JSON, RSS and OPML
//! - An HTTP API exposing `GET /browse` (server feature)

#[cfg(feature = "server")]
pub mod api;
pub mod browse;
pub mod catalog;
pub mod config;
pub mod error;
pub mod parse;
pub mod roots;
