pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, toml_config::TomlConfig, ClientSettings};

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use crate::core::{
    batch::{fetch_batch, BatchSettings},
    client::FlyffClient,
    dump::{dump_all, dump_resource, DumpManifest, DumpReport},
    normalize::normalize,
    transport::HttpTransport,
};
pub use domain::model::{Id, IdSpec, Resource, SortKey};
pub use domain::ports::{ConfigProvider, Storage, Transport};
pub use utils::error::{FlyffError, Result};
