pub mod idx;
pub mod in_memory;
pub mod provider;

pub use idx::{load_idx_pair, parse_idx_pair};
pub use in_memory::InMemoryDataset;
pub use provider::DatasetProvider;
