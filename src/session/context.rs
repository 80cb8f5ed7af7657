use serde_json::Value;

use crate::probe::{CreatedPoll, ProbeError};

/// Poll created earlier in the session, consumed by the vote probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollFixture {
    /// Identifier as it appears in the vote path.
    pub id: String,
    /// Count the creation response reported for the option that will be voted on.
    pub baseline_votes: u64,
}

/// Values handed from one probe to a later one within a single session.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    poll: Option<PollFixture>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the created poll. Leaves the fixture unset when the identifier
    /// cannot be used as a path segment.
    pub fn capture_poll(
        &mut self,
        created: &CreatedPoll,
        vote_option: &str,
    ) -> Result<&PollFixture, ProbeError> {
        let id = path_segment(&created.id)?;
        let baseline_votes = created
            .options
            .iter()
            .find(|opt| opt.option == vote_option)
            .map(|opt| opt.votes)
            .unwrap_or(0);

        Ok(self.poll.insert(PollFixture { id, baseline_votes }))
    }

    pub fn poll(&self) -> Option<&PollFixture> {
        self.poll.as_ref()
    }

    pub fn poll_id(&self) -> Option<&str> {
        self.poll.as_ref().map(|poll| poll.id.as_str())
    }
}

fn path_segment(id: &Value) -> Result<String, ProbeError> {
    match id {
        Value::String(id) if !id.is_empty() => Ok(id.clone()),
        Value::Number(id) => Ok(id.to_string()),
        Value::Null => Err(ProbeError::Assertion(
            "creation response carries no _id".to_string(),
        )),
        other => Err(ProbeError::Assertion(format!(
            "creation response _id is not usable as an identifier: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::PollOption;
    use serde_json::json;

    fn created(id: Value, options: Vec<PollOption>) -> CreatedPoll {
        CreatedPoll { id, options }
    }

    #[test]
    fn test_capture_without_options_uses_zero_baseline() {
        let mut context = SessionContext::new();
        assert!(context.poll_id().is_none());

        context
            .capture_poll(&created(json!("abc123"), Vec::new()), "Red")
            .unwrap();

        assert_eq!(context.poll_id(), Some("abc123"));
        assert_eq!(context.poll().unwrap().baseline_votes, 0);
    }

    #[test]
    fn test_capture_reads_baseline_for_vote_option() {
        let mut context = SessionContext::new();
        let options = vec![
            PollOption {
                option: "Red".to_string(),
                votes: 3,
            },
            PollOption {
                option: "Blue".to_string(),
                votes: 7,
            },
        ];
        context
            .capture_poll(&created(json!("p1"), options), "Red")
            .unwrap();

        assert_eq!(context.poll().unwrap().baseline_votes, 3);
    }

    #[test]
    fn test_numeric_identifier_becomes_path_segment() {
        let mut context = SessionContext::new();
        context
            .capture_poll(&created(json!(42), Vec::new()), "Red")
            .unwrap();
        assert_eq!(context.poll_id(), Some("42"));
    }

    #[test]
    fn test_unusable_identifiers_leave_fixture_unset() {
        for id in [
            Value::Null,
            json!(""),
            json!({ "$oid": "abc" }),
            json!(["abc"]),
            json!(true),
        ] {
            let mut context = SessionContext::new();
            let result = context.capture_poll(&created(id, Vec::new()), "Red");
            assert!(matches!(result, Err(ProbeError::Assertion(_))));
            assert!(context.poll_id().is_none());
        }
    }
}
