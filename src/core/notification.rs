use crate::core::query::round_coordinate;
use crate::models::{Checkin, Notification, Outcome, User};

const OSM_EDIT_URL: &str = "https://www.openstreetmap.org/edit";
const FOURSQUARE_URL: &str = "https://foursquare.com";

const NOT_FOUND_SUBJECT: &str = "Your Recent Foursquare Checkin Isn't On OpenStreetMap";
const CONFIRMED_SUBJECT: &str = "Your Recent Foursquare Checkin Is On OpenStreetMap!";

const SIGNATURE: &str = "-Checkin Checker\n\
(Reply to this e-mail for feedback/questions. Uninstall at \
https://foursquare.com/settings/connections to stop these e-mails.)";

/// Who receives notifications for test pushes
#[derive(Debug, Clone)]
pub struct RecipientPolicy {
    /// Address receiving mail for the test user
    pub operator_email: String,
    /// Foursquare sends test pushes as this user id
    pub test_user_id: String,
}

/// Pick the address to notify, or `None` when the user has no email on file
pub fn resolve_recipient(user: &User, policy: &RecipientPolicy) -> Option<String> {
    let email = user.email()?;
    if user.id == policy.test_user_id {
        return Some(policy.operator_email.clone());
    }
    Some(email.to_string())
}

/// The parts of a check-in a message refers to
#[derive(Debug, Clone)]
pub struct MessageContext {
    pub first_name: String,
    pub venue_name: String,
    pub user_id: String,
    pub checkin_id: String,
    pub lat: f64,
    pub lng: f64,
}

impl MessageContext {
    pub fn new(checkin: &Checkin, user: &User) -> Self {
        Self {
            first_name: user
                .first_name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| "Friend".to_string()),
            venue_name: checkin.venue.name.clone(),
            user_id: user.id.clone(),
            checkin_id: checkin.id.clone(),
            lat: round_coordinate(checkin.venue.location.lat),
            lng: round_coordinate(checkin.venue.location.lng),
        }
    }

    fn checkin_url(&self) -> String {
        format!("{}/user/{}/checkin/{}", FOURSQUARE_URL, self.user_id, self.checkin_id)
    }
}

/// Render the message for an outcome.
///
/// Probable matches are not notified and yield `None`.
pub fn compose(outcome: &Outcome, ctx: &MessageContext) -> Option<Notification> {
    match outcome {
        Outcome::NotFound => Some(Notification {
            subject: NOT_FOUND_SUBJECT.to_string(),
            body: format!(
                "Hi {name},\n\n\
                 You checked in at {venue} on Foursquare but that location doesn't seem to exist in OpenStreetMap. \
                 You should consider adding it!\n\n\
                 In fact, here's a direct link to the area in your favorite editor:\n\
                 {edit}?zoom=19&lat={lat:?}&lon={lng:?}\n\n\
                 To remind you where you went, here's a link to your checkin. \
                 Remember that you should not copy from external sources (like Foursquare) when editing.\n\
                 {checkin}\n\n\
                 {signature}",
                name = ctx.first_name,
                venue = ctx.venue_name,
                edit = OSM_EDIT_URL,
                lat = ctx.lat,
                lng = ctx.lng,
                checkin = ctx.checkin_url(),
                signature = SIGNATURE,
            ),
        }),
        Outcome::ConfirmedMatch {
            candidate, prompts, ..
        } => {
            let questions = prompts
                .iter()
                .map(|p| format!(" - {}", p))
                .collect::<Vec<_>>()
                .join("\n");

            Some(Notification {
                subject: CONFIRMED_SUBJECT.to_string(),
                body: format!(
                    "Hi {name},\n\n\
                     Your recent checkin to {venue} seems to match something in OpenStreetMap. \
                     While you're visiting this place, try collecting these missing attributes for OpenStreetMap:\n\n\
                     {questions}\n\n\
                     If you want, you can reply to this email and we will make these changes, \
                     or you can save your email as a draft/note to yourself for later.\n\n\
                     If you'd like to edit the OSM object directly, use this edit link:\n\
                     {edit}?{kind}={id}\n\n\
                     To remind you where you went, here's a link to your checkin. \
                     Remember that you should not copy from external sources (like Foursquare) when editing.\n\
                     {checkin}\n\n\
                     {signature}",
                    name = ctx.first_name,
                    venue = ctx.venue_name,
                    questions = questions,
                    edit = OSM_EDIT_URL,
                    kind = candidate.kind,
                    id = candidate.id,
                    checkin = ctx.checkin_url(),
                    signature = SIGNATURE,
                ),
            })
        }
        Outcome::ProbableMatch { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::attribute_prompts;
    use crate::models::{CandidateFeature, Contact, FeatureKind};

    fn user(id: &str, email: Option<&str>) -> User {
        User {
            id: id.to_string(),
            first_name: Some("Ada".to_string()),
            contact: Contact {
                email: email.map(str::to_string),
            },
        }
    }

    fn policy() -> RecipientPolicy {
        RecipientPolicy {
            operator_email: "operator@example.org".to_string(),
            test_user_id: "1".to_string(),
        }
    }

    fn context() -> MessageContext {
        MessageContext {
            first_name: "Ada".to_string(),
            venue_name: "Visulite Cinema".to_string(),
            user_id: "42".to_string(),
            checkin_id: "c0ffee".to_string(),
            lat: 38.149575,
            lng: -79.072557,
        }
    }

    #[test]
    fn test_recipient_resolution() {
        assert_eq!(resolve_recipient(&user("42", Some("ada@example.org")), &policy()).as_deref(), Some("ada@example.org"));
        assert_eq!(resolve_recipient(&user("1", Some("test@example.org")), &policy()).as_deref(), Some("operator@example.org"));
        assert_eq!(resolve_recipient(&user("42", None), &policy()), None);
        assert_eq!(resolve_recipient(&user("1", None), &policy()), None);
    }

    #[test]
    fn test_not_found_message() {
        let n = compose(&Outcome::NotFound, &context()).unwrap();
        assert_eq!(n.subject, NOT_FOUND_SUBJECT);
        assert!(n.body.starts_with("Hi Ada,"));
        assert!(n.body.contains("You checked in at Visulite Cinema on Foursquare"));
        assert!(n.body.contains("https://www.openstreetmap.org/edit?zoom=19&lat=38.149575&lon=-79.072557"));
        assert!(n.body.contains("https://foursquare.com/user/42/checkin/c0ffee"));
    }

    #[test]
    fn test_confirmed_message() {
        let candidate = CandidateFeature {
            kind: FeatureKind::Way,
            id: 123456,
            tags: [("phone".to_string(), "555-0100".to_string())].into_iter().collect(),
        };
        let outcome = Outcome::ConfirmedMatch {
            prompts: attribute_prompts(&candidate),
            candidate,
            score: 100,
        };

        let n = compose(&outcome, &context()).unwrap();
        assert_eq!(n.subject, CONFIRMED_SUBJECT);
        assert!(n.body.contains(
            " - What is the housenumber?\n - What is the street name?\n - Is the phone number still '555-0100'?"
        ));
        assert!(n.body.contains("https://www.openstreetmap.org/edit?way=123456"));
    }

    #[test]
    fn test_probable_match_is_silent() {
        let outcome = Outcome::ProbableMatch {
            candidate: CandidateFeature {
                kind: FeatureKind::Node,
                id: 1,
                tags: Default::default(),
            },
            score: 70,
        };
        assert!(compose(&outcome, &context()).is_none());
    }

    #[test]
    fn test_missing_first_name_defaults_to_friend() {
        let checkin: Checkin = serde_json::from_str(
            r#"{"id": "c1", "venue": {"name": "Bar", "location": {"lat": 1.0000004, "lng": 2.0}}}"#,
        )
        .unwrap();
        let mut u = user("9", Some("x@example.org"));
        u.first_name = None;

        let ctx = MessageContext::new(&checkin, &u);
        assert_eq!(ctx.first_name, "Friend");
        assert_eq!(ctx.lat, 1.0);

        let n = compose(&Outcome::NotFound, &ctx).unwrap();
        assert!(n.body.contains("edit?zoom=19&lat=1.0&lon=2.0\n"));
        assert!(n.body.starts_with("Hi Friend,"));
    }
}
