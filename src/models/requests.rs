use serde::{Deserialize, Serialize};

/// Form body of a Foursquare push.
///
/// Both fields carry JSON documents encoded as strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckinPush {
    pub checkin: String,
    pub user: String,
    #[serde(default)]
    pub secret: Option<String>,
}
