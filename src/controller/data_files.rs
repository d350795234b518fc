use super::{Context, Notifier};
use crate::api::{DashboardApi, Outcome};
use crate::page::{Handle, Select};
use crate::render::data_file_option;

/// Keeps the data-file selector in sync with the backend's listing.
///
/// Each reload replaces every option after the default entry; nothing is
/// merged, so overlapping reloads can only leave a stale list, never a
/// mixed one. Failures are logged and never shown to the user.
pub struct DataFileLoader {
    select: Handle<Select>,
}

impl DataFileLoader {
    pub fn new(select: Handle<Select>) -> Self {
        Self { select }
    }

    pub(crate) fn reload<A: DashboardApi, N: Notifier>(
        &self,
        ctx: &Context<'_, A, N>,
    ) -> Option<usize> {
        if ctx.cancel.is_cancelled() {
            return None;
        }

        let settled = ctx.api.list_data_files();
        if ctx.cancel.is_cancelled() {
            tracing::debug!("discarding data-file listing settled after teardown");
            return None;
        }

        match settled {
            Ok(Outcome::Success(listing)) => {
                let count = listing.data_files.len();
                self.select
                    .borrow_mut()
                    .rebuild(listing.data_files.iter().map(data_file_option));
                tracing::debug!(count, "data-file list reloaded");
                Some(count)
            }
            Ok(Outcome::Failure(message)) => {
                tracing::warn!(%message, "data-file listing rejected");
                None
            }
            Err(err) => {
                tracing::error!(error = %err, "error loading data files");
                None
            }
        }
    }
}
