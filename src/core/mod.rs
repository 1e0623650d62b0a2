pub mod batch;
pub mod client;
pub mod dump;
pub mod normalize;
pub mod transport;

pub use crate::domain::model::{Id, IdSpec, Resource, SortKey};
pub use crate::domain::ports::{ConfigProvider, Storage, Transport};
pub use crate::utils::error::Result;
