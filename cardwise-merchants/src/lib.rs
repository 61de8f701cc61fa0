//! cardwise-merchants: merchant directory, descriptor cleanup and classification

mod builtin;
pub mod classifier;
pub mod directory;
pub mod import;
pub mod normalize;

pub use classifier::CachedClassifier;
pub use directory::{Merchant, MerchantDirectory};
pub use import::{import_overrides, import_overrides_from_reader};
pub use normalize::DescriptorNormalizer;
