//! `ember://` deep links between the widget and the main app.
//!
//! - `ember://open?habitId=<id>` opens the app on an activity (empty id opens home)
//! - `ember://log?habitId=<id>` asks the app to quick-log, for hosts that can't
//!   run the update in the widget process

use url::{form_urlencoded, Url};

use crate::error::{EmberError, EmberFfiError, Result};

pub const SCHEME: &str = "ember";
const HABIT_ID_PARAM: &str = "habitId";

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum DeepLink {
    Open { habit_id: Option<String> },
    Log { habit_id: String },
}

impl DeepLink {
    pub fn to_url(&self) -> String {
        let (verb, habit_id) = match self {
            DeepLink::Open { habit_id } => ("open", habit_id.as_deref().unwrap_or("")),
            DeepLink::Log { habit_id } => ("log", habit_id.as_str()),
        };
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair(HABIT_ID_PARAM, habit_id)
            .finish();
        format!("{}://{}?{}", SCHEME, verb, query)
    }

    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |reason: &str| EmberError::InvalidDeepLink {
            url: input.to_string(),
            reason: reason.to_string(),
        };

        let url = Url::parse(input).map_err(|e| invalid(&e.to_string()))?;
        if url.scheme() != SCHEME {
            return Err(invalid("unexpected scheme"));
        }

        let habit_id = url
            .query_pairs()
            .find(|(key, _)| key == HABIT_ID_PARAM)
            .map(|(_, value)| value.into_owned())
            .filter(|id| !id.is_empty());

        match url.host_str() {
            Some("open") => Ok(DeepLink::Open { habit_id }),
            Some("log") => habit_id
                .map(|habit_id| DeepLink::Log { habit_id })
                .ok_or_else(|| invalid("log link without habitId")),
            _ => Err(invalid("unknown action")),
        }
    }
}

pub fn open_url(habit_id: &str) -> String {
    DeepLink::Open {
        habit_id: Some(habit_id.to_string()),
    }
    .to_url()
}

pub fn log_url(habit_id: &str) -> String {
    DeepLink::Log {
        habit_id: habit_id.to_string(),
    }
    .to_url()
}

#[uniffi::export]
pub fn parse_deep_link(url: String) -> std::result::Result<DeepLink, EmberFfiError> {
    DeepLink::parse(&url).map_err(Into::into)
}
