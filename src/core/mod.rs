// Core algorithm exports
pub mod checker;
pub mod classifier;
pub mod notification;
pub mod observer;
pub mod overrides;
pub mod query;
pub mod scoring;
pub mod similarity;

pub use checker::{CheckError, CheckReport, Checker, CheckerSettings};
pub use classifier::{attribute_prompts, classify, filter_matches, rank_matches, ClassifyError};
pub use notification::{compose, resolve_recipient, MessageContext, RecipientPolicy};
pub use observer::{CheckObserver, SkipReason, TracingObserver};
pub use overrides::{OverrideRule, OverrideTable};
pub use query::{round_coordinate, QueryBuildError, SpatialQuery};
pub use scoring::{default_name_tags, score_candidate, score_candidates, select_name, DEFAULT_NAME_TAGS};
pub use similarity::similarity;
