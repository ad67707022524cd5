use kernel::binding::{BindingError, BindingState};
use serde::{Deserialize, Serialize};

/// One WebSocket message of a live view. Every state change of the
/// underlying binding is sent as a full frame.
#[derive(Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LiveFrame<T> {
    Loading,
    Snapshot { data: Option<T> },
    Error { message: String },
    Unauthorized,
}

impl<T: Clone> From<&BindingState<T>> for LiveFrame<T> {
    fn from(state: &BindingState<T>) -> Self {
        match state {
            BindingState { loading: true, .. } => LiveFrame::Loading,
            BindingState {
                error: Some(BindingError::Permission(_)),
                ..
            } => LiveFrame::Error {
                message: "Missing or insufficient permissions.".into(),
            },
            BindingState {
                error: Some(BindingError::Store(message)),
                ..
            } => LiveFrame::Error {
                message: message.clone(),
            },
            BindingState { data, .. } => LiveFrame::Snapshot { data: data.clone() },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LiveTokenQuery {
    pub token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::store::{Operation, PermissionError};
    use serde_json::json;

    #[test]
    fn frames_are_tagged_by_type() {
        let loading = BindingState::<Vec<u32>> {
            data: None,
            loading: true,
            error: None,
        };
        assert_eq!(
            serde_json::to_value(LiveFrame::from(&loading)).unwrap(),
            json!({ "type": "loading" })
        );

        let ready = BindingState {
            data: Some(vec![1, 2]),
            loading: false,
            error: None,
        };
        assert_eq!(
            serde_json::to_value(LiveFrame::from(&ready)).unwrap(),
            json!({ "type": "snapshot", "data": [1, 2] })
        );

        let denied = BindingState::<Vec<u32>> {
            data: None,
            loading: false,
            error: Some(BindingError::Permission(PermissionError::new(
                "reservations",
                Operation::List,
                None,
            ))),
        };
        assert!(matches!(LiveFrame::from(&denied), LiveFrame::Error { .. }));
        assert_eq!(
            serde_json::to_value(LiveFrame::<u32>::Unauthorized).unwrap(),
            json!({ "type": "unauthorized" })
        );
    }

    #[test]
    fn idle_binding_is_an_empty_snapshot() {
        let idle = BindingState::<u32>::idle();
        assert_eq!(LiveFrame::from(&idle), LiveFrame::Snapshot { data: None });
    }
}
