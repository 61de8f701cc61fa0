//! cardwise-core: reward resolution and card recommendation engine
//!
//! Given a catalog of card definitions, the user's wallet and a ledger of
//! past purchases, picks the card that pays the most for a purchase. All
//! calls are synchronous and pure over the snapshots passed in; the result
//! cache is the only shared mutable state.

pub mod bonus;
pub mod cache;
pub mod caps;
pub mod catalog;
pub mod category;
pub mod config;
pub mod error;
pub mod ledger;
pub mod recommend;
pub mod resolve;
pub mod signals;
pub mod time;
pub mod wallet;

pub use bonus::SignUpBonusProgress;
pub use cache::{CacheKey, ResultCache};
pub use caps::{CapInfo, SpendingCapProgress, cap_info, cap_info_for, cap_overview, estimate_reward};
pub use catalog::{
    CardDefinition, CardNetwork, Catalog, CatalogIssue, CategoryReward, RewardType, RotatingCategorySet,
    SelectableConfig, SignUpBonusTerms,
};
pub use category::{CATEGORY_TABLE_VERSION, SpendingCategory};
pub use config::{EngineConfig, MAX_TTL_SECS, SignalPolicy, load_config};
pub use error::{EngineError, Result};
pub use ledger::{Ledger, TransactionDraft, TransactionRecord};
pub use recommend::{
    MerchantClassifier, MerchantRecommendation, Recommendation, RecommendationEngine, SelectionSuggestion,
};
pub use resolve::{CapRule, ResolvedReward, RewardTier, resolve, reward_value};
pub use signals::{NotificationSignal, SignalKind, project_signals};
pub use time::{CapPeriod, Quarter};
pub use wallet::{PendingActivation, WalletEntry, pending_activations, total_credit_utilization};
