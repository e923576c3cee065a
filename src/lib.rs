// 依存関係の推移的依存により複数のバージョンが混在するための抑制
#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod cli;
pub mod presentation;
pub mod settings;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
