// Service exports
pub mod mailgun;
pub mod overpass;

use crate::models::{CandidateFeature, Notification};
use async_trait::async_trait;

pub use mailgun::{MailError, MailgunClient};
pub use overpass::{OverpassClient, OverpassResponse, QueryError};

/// Executes a spatial query and returns the candidate features
#[async_trait]
pub trait SpatialQueryClient: Send + Sync {
    async fn query(&self, query: &str) -> Result<Vec<CandidateFeature>, QueryError>;
}

/// Delivers a composed notification
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, recipient: &str, notification: &Notification) -> Result<(), MailError>;
}
