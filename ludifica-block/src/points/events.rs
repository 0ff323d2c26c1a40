use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Platform events the points engine reacts to, one JSON object per event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PlatformEvent {
    UserCreated {
        user_id: u64,
    },
    UserLoggedin {
        user_id: u64,
        /// Login time; the processing time is used when absent.
        #[serde(default)]
        time: Option<u64>,
    },
    CourseCompleted {
        user_id: u64,
        course_id: u64,
        /// Course custom field values by short name.
        #[serde(default)]
        custom_fields: HashMap<String, String>,
    },
    CourseModuleCompleted {
        user_id: u64,
        course_id: u64,
        course_module_id: u64,
    },
    UserUpdated {
        user_id: u64,
        #[serde(default)]
        email: Option<String>,
    },
}

impl PlatformEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::UserCreated { .. } => "user_created",
            Self::UserLoggedin { .. } => "user_loggedin",
            Self::CourseCompleted { .. } => "course_completed",
            Self::CourseModuleCompleted { .. } => "course_module_completed",
            Self::UserUpdated { .. } => "user_updated",
        }
    }

    pub fn user_id(&self) -> u64 {
        match self {
            Self::UserCreated { user_id }
            | Self::UserLoggedin { user_id, .. }
            | Self::CourseCompleted { user_id, .. }
            | Self::CourseModuleCompleted { user_id, .. }
            | Self::UserUpdated { user_id, .. } => *user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PlatformEvent;

    #[test]
    fn events_decode_from_tagged_json() {
        let event: PlatformEvent = serde_json::from_str(
            r#"{"event":"course_completed","user_id":3,"course_id":8,"custom_fields":{"duration":"40"}}"#,
        )
        .expect("decode");
        assert_eq!(event.name(), "course_completed");
        assert_eq!(event.user_id(), 3);

        let PlatformEvent::CourseCompleted { custom_fields, .. } = event else {
            panic!("wrong variant");
        };
        assert_eq!(custom_fields.get("duration").map(String::as_str), Some("40"));
    }

    #[test]
    fn optional_fields_may_be_omitted() {
        let event: PlatformEvent =
            serde_json::from_str(r#"{"event":"user_loggedin","user_id":9}"#).expect("decode");
        assert_eq!(
            event,
            PlatformEvent::UserLoggedin {
                user_id: 9,
                time: None
            }
        );
    }

    #[test]
    fn unknown_events_are_rejected() {
        assert!(serde_json::from_str::<PlatformEvent>(r#"{"event":"badge_awarded","user_id":1}"#).is_err());
    }
}
