//! Mock servers for catalog integration testing
//!
//! These mock servers simulate the upstream catalogs (AIS cloud, audiobook
//! library, TuneIn OPML) so browse trees can be exercised end to end without
//! network access.

#![allow(dead_code)]

pub mod audiobooks;
pub mod cloud;
pub mod tunein;

pub use audiobooks::MockAudioBooksServer;
pub use cloud::MockCloudServer;
pub use tunein::MockTuneInServer;
