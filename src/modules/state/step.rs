use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use futures_util::FutureExt;
use tracing::error;

use super::shared_state::{Bootstrap, SharedState};
use crate::core::Result;

/// Run one step body against a freshly loaded state, persisting afterwards
///
/// The snapshot is written whether the body returns `Ok`, returns `Err` or
/// panics on a failed assertion, so every `set` that ran before the failure is
/// visible to the next step. A panic is resumed after persisting. A persist
/// failure wins over the body's own result: losing the snapshot invalidates
/// every later step. A panic swallowed that way is still logged.
pub async fn run_step<T, F>(path: &Path, bootstrap: &Bootstrap, body: F) -> Result<T>
where
    F: AsyncFnOnce(&mut SharedState) -> Result<T>,
{
    let mut state = SharedState::load_seeded(path, bootstrap)?;

    let outcome = AssertUnwindSafe(body(&mut state)).catch_unwind().await;

    if let Err(e) = state.persist() {
        error!(path = %path.display(), error = %e, "Aborting: shared state could not be persisted");
        if let Err(payload) = &outcome {
            error!(
                path = %path.display(),
                panic = panic_message(&**payload),
                "Step panicked before the failed persist"
            );
        }
        return Err(e);
    }

    match outcome {
        Ok(result) => result,
        Err(payload) => panic::resume_unwind(payload),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg
    } else {
        "non-string panic payload"
    }
}
