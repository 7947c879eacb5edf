use std::future::Future;

use super::{ClientAction, ClientError, Dispatch};

/// Lifecycle of one named asynchronous request.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Pending,
    Fulfilled(T),
    Rejected(String),
}

/// Run `request` as a thunk.
///
/// `Pending` is dispatched before `request` is even called. On success
/// `on_data` runs first (it may dispatch side effects) and `Fulfilled` follows;
/// on failure only `Rejected` is dispatched.
pub async fn run_thunk<T, D, W, R, Fut, H>(
    dispatcher: &D,
    wrap: W,
    request: R,
    on_data: H,
) -> Result<T, ClientError>
where
    T: Clone,
    D: Dispatch + ?Sized,
    W: Fn(LoadState<T>) -> ClientAction,
    R: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
    H: FnOnce(&T, &D),
{
    dispatcher.dispatch(wrap(LoadState::Pending));

    match request().await {
        Ok(data) => {
            on_data(&data, dispatcher);
            dispatcher.dispatch(wrap(LoadState::Fulfilled(data.clone())));
            Ok(data)
        }
        Err(err) => {
            tracing::debug!(error = %err, "Thunk rejected");
            dispatcher.dispatch(wrap(LoadState::Rejected(err.to_string())));
            Err(err)
        }
    }
}
