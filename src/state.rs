use tokio::sync::watch;

use crate::error::ApiResult;

/// Lifecycle of a single remote fetch as seen by observers.
///
/// Every observable resource starts `Idle`, moves to `Loading` when a request
/// goes out and ends in either `Success` or `Error`. A refetch runs through
/// `Loading` again.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Idle,
    Loading,
    Success(T),
    /// Terminal failure; `code` is present only when the server answered.
    Error { message: String, code: Option<u16> },
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    /// The payload of a `Success` state, if that is the current state.
    pub fn value(&self) -> Option<&T> {
        match self {
            FetchState::Success(value) => Some(value),
            _ => None,
        }
    }
}

impl<T: Clone> FetchState<T> {
    /// Map a finished fetch onto its terminal state.
    pub fn from_result(result: &ApiResult<T>) -> Self {
        match result {
            Ok(value) => FetchState::Success(value.clone()),
            Err(e) => FetchState::Error {
                message: e.to_string(),
                code: e.status(),
            },
        }
    }
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Idle
    }
}

/// Observable slot holding the latest [`FetchState`] of one resource.
///
/// Writers publish through [`StateCell::set`]; observers either poll
/// [`StateCell::get`] or await changes on a [`StateCell::subscribe`]
/// receiver. Backed by a `tokio::sync::watch` channel, so late subscribers
/// immediately see the current value.
#[derive(Debug)]
pub struct StateCell<T> {
    tx: watch::Sender<FetchState<T>>,
}

impl<T: Clone> StateCell<T> {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(FetchState::Idle);
        Self { tx }
    }

    /// Publish a new state, replacing the previous one.
    pub fn set(&self, state: FetchState<T>) {
        self.tx.send_replace(state);
    }

    /// Snapshot of the current state.
    pub fn get(&self) -> FetchState<T> {
        self.tx.borrow().clone()
    }

    /// New receiver that sees the current state and all later updates.
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.tx.subscribe()
    }
}

impl<T: Clone> Default for StateCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    #[test]
    fn from_result_maps_ok_to_success() {
        let result: ApiResult<u32> = Ok(7);
        assert_eq!(FetchState::from_result(&result), FetchState::Success(7));
    }

    #[test]
    fn from_result_keeps_http_status_code() {
        let result: ApiResult<u32> = Err(ApiError::HttpStatus(reqwest::StatusCode::NOT_FOUND));
        match FetchState::from_result(&result) {
            FetchState::Error { message, code } => {
                assert!(message.contains("404"));
                assert_eq!(code, Some(404));
            }
            other => panic!("Expected error state, got: {other:?}"),
        }
    }

    #[test]
    fn from_result_has_no_code_for_parse_errors() {
        let parse_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let result: ApiResult<u32> = Err(ApiError::Parse(parse_err));
        match FetchState::from_result(&result) {
            FetchState::Error { code, .. } => assert_eq!(code, None),
            other => panic!("Expected error state, got: {other:?}"),
        }
    }

    #[test]
    fn cell_starts_idle_and_replaces_values() {
        let cell: StateCell<u32> = StateCell::new();
        assert_eq!(cell.get(), FetchState::Idle);

        cell.set(FetchState::Loading);
        assert!(cell.get().is_loading());

        cell.set(FetchState::Success(42));
        assert_eq!(cell.get().value(), Some(&42));
    }

    #[test]
    fn subscriber_sees_later_updates() {
        let cell: StateCell<u32> = StateCell::new();
        let mut rx = cell.subscribe();

        cell.set(FetchState::Success(1));
        tokio_test::block_on(rx.changed()).unwrap();
        assert_eq!(rx.borrow().value(), Some(&1));
    }
}
