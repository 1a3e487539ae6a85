//! Draw → stage → submit lifecycle for one map view.
//!
//! ```text
//!  Idle ──draw──▶ Drawn ──submit──▶ Submitting ──ok──▶ Idle
//!                  ▲  │                  │
//!                  └──┘ redraw           └──err──▶ Drawn (pending kept)
//! ```

use crate::boundary::{LoadSummary, PendingPolygon, SiteBoundary, SkippedBoundary};
use crate::error::{SessionError, SessionResult};
use crate::store::SiteStore;
use serde::Serialize;
use sitetrack_api_client::endpoints::sites::{NewSite, SiteMetrics};
use sitetrack_api_client::{ApiError, Credentials};
use sitetrack_geo::{encode, FeatureCollection, Ring, SiteFeatures};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Where the session is in the lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// No pending polygon
    Idle,
    /// One pending polygon staged, awaiting submission
    Drawn,
    /// Save request in flight
    Submitting,
}

#[derive(Debug)]
struct EditState {
    state: SessionState,
    pending: Option<PendingPolygon>,
    last_error: Option<String>,
}

/// Editing session for site boundaries on one map view.
///
/// The session may be shared (e.g. behind an `Arc`) so a UI can observe it
/// while a request is in flight, but it is driven by a single caller. Edit
/// state sits behind a plain mutex that is never held across an await. The
/// rendered set sits behind an async mutex held for a whole load and for a
/// whole save, so the two never interleave.
pub struct BoundarySession<S> {
    store: S,
    edit: Mutex<EditState>,
    rendered: tokio::sync::Mutex<Vec<SiteBoundary>>,
}

impl<S: SiteStore> BoundarySession<S> {
    /// Create an idle session with an empty rendered set
    pub fn new(store: S) -> Self {
        Self {
            store,
            edit: Mutex::new(EditState {
                state: SessionState::Idle,
                pending: None,
                last_error: None,
            }),
            rendered: tokio::sync::Mutex::new(Vec::new()),
        }
    }

    /// The persistence collaborator
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.edit().state
    }

    /// The staged polygon, if any
    pub fn pending(&self) -> Option<PendingPolygon> {
        self.edit().pending.clone()
    }

    /// Message of the most recent failed operation, cleared by the next draw or submit
    pub fn last_error(&self) -> Option<String> {
        self.edit().last_error.clone()
    }

    /// Snapshot of the rendered boundaries
    pub async fn boundaries(&self) -> Vec<SiteBoundary> {
        self.rendered.lock().await.clone()
    }

    /// Rendered boundaries as a GeoJSON feature collection
    pub async fn feature_collection(&self) -> FeatureCollection {
        let rendered = self.rendered.lock().await;
        FeatureCollection::from_sites(rendered.iter().map(|b| (b.id, &b.ring)))
    }

    /// Stage a freshly drawn ring.
    ///
    /// Replaces any previously staged polygon without confirmation. If the
    /// ring cannot be encoded nothing is staged and the state is unchanged.
    pub fn on_shape_drawn(&self, ring: Ring) -> SessionResult<PendingPolygon> {
        let mut edit = self.edit();

        if edit.state == SessionState::Submitting {
            return Err(SessionError::SubmissionInProgress);
        }

        let wkt = match encode(&ring) {
            Ok(wkt) => wkt,
            Err(e) => {
                edit.last_error = Some(e.to_string());
                return Err(e.into());
            }
        };

        if edit.pending.is_some() {
            debug!("Discarding previously staged polygon");
        }

        let pending = PendingPolygon::new(ring, wkt);
        info!(wkt = %pending.wkt(), "Polygon drawn");

        edit.pending = Some(pending.clone());
        edit.state = SessionState::Drawn;
        edit.last_error = None;

        Ok(pending)
    }

    /// Drop the staged polygon without submitting it
    pub fn discard_pending(&self) -> SessionResult<()> {
        let mut edit = self.edit();
        match edit.state {
            SessionState::Submitting => Err(SessionError::SubmissionInProgress),
            SessionState::Idle => Ok(()),
            SessionState::Drawn => {
                edit.pending = None;
                edit.state = SessionState::Idle;
                Ok(())
            }
        }
    }

    /// Submit the staged polygon to the store.
    ///
    /// On success the session returns to `Idle` and the stored boundary is
    /// appended to the rendered set. On failure it returns to `Drawn` with the
    /// same pending polygon and the collaborator's message.
    pub async fn submit_pending(
        &self,
        credentials: Option<&Credentials>,
        project_id: i64,
        metrics: SiteMetrics,
    ) -> SessionResult<SiteBoundary> {
        let (pending, credentials) = {
            let mut edit = self.edit();
            match edit.state {
                SessionState::Submitting => return Err(SessionError::SubmissionInProgress),
                SessionState::Idle => return Err(SessionError::NothingToSubmit),
                SessionState::Drawn => {}
            }
            let Some(credentials) = credentials else {
                edit.last_error = Some(SessionError::MissingCredentials.to_string());
                return Err(SessionError::MissingCredentials);
            };
            let pending = edit.pending.clone().ok_or(SessionError::NothingToSubmit)?;

            edit.state = SessionState::Submitting;
            edit.last_error = None;
            (pending, credentials)
        };

        let mut guard = SubmitGuard {
            edit: &self.edit,
            armed: true,
        };

        let request = match NewSite::new(project_id, pending.wkt(), &metrics) {
            Ok(request) => request,
            Err(e) => return Err(self.fail_submit(&mut guard, &e)),
        };

        // Taken before the request: a load never interleaves with the save, and
        // nothing is awaited between the store accepting the site and leaving
        // `Submitting`.
        let mut rendered = self.rendered.lock().await;

        info!(project_id, wkt = %request.geometry, "Saving polygon");

        let record = match self.store.create_site(credentials, &request).await {
            Ok(record) => record,
            Err(e) => {
                warn!(project_id, error = %e, "Failed to save polygon");
                return Err(self.fail_submit(&mut guard, &e));
            }
        };

        {
            let mut edit = self.edit();
            edit.pending = None;
            edit.state = SessionState::Idle;
        }
        guard.armed = false;

        let boundary = match SiteBoundary::from_record(record.clone()) {
            Ok(boundary) => boundary,
            Err(e) => {
                warn!(
                    site_id = record.id,
                    error = %e,
                    "Saved site geometry did not decode, rendering the submitted ring"
                );
                SiteBoundary {
                    id: record.id,
                    project_id: record.project_id,
                    ring: pending.ring().clone(),
                    wkt: record.geometry.clone(),
                    metrics: record.parsed_metrics(),
                }
            }
        };

        rendered.push(boundary.clone());

        info!(site_id = boundary.id, "Polygon saved");
        Ok(boundary)
    }

    /// Replace the rendered set with the store's sites.
    ///
    /// Sites whose geometry does not decode are logged and left out; they do
    /// not fail the load. On a collaborator failure the rendered set is left
    /// untouched.
    pub async fn load_boundaries(
        &self,
        credentials: Option<&Credentials>,
        project_id: Option<i64>,
    ) -> SessionResult<LoadSummary> {
        let credentials = credentials.ok_or(SessionError::MissingCredentials)?;

        let mut rendered = self.rendered.lock().await;

        let records = match self.store.list_sites(credentials, project_id).await {
            Ok(records) => records,
            Err(e) => {
                warn!(?project_id, error = %e, "Failed to fetch sites");
                let err = SessionError::collaborator(&e);
                self.edit().last_error = Some(err.to_string());
                return Err(err);
            }
        };

        debug!(count = records.len(), "Fetched sites");

        let mut boundaries = Vec::with_capacity(records.len());
        let mut skipped = Vec::new();

        for record in records {
            let id = record.id;
            match SiteBoundary::from_record(record) {
                Ok(boundary) => boundaries.push(boundary),
                Err(error) => {
                    warn!(site_id = id, error = %error, "Skipping site with malformed geometry");
                    skipped.push(SkippedBoundary { id, error });
                }
            }
        }

        *rendered = boundaries;

        Ok(LoadSummary {
            rendered: rendered.len(),
            skipped,
        })
    }

    fn fail_submit(&self, guard: &mut SubmitGuard<'_>, cause: &ApiError) -> SessionError {
        let err = SessionError::collaborator(cause);
        {
            let mut edit = self.edit();
            edit.state = SessionState::Drawn;
            edit.last_error = Some(err.to_string());
        }
        guard.armed = false;
        err
    }

    fn edit(&self) -> MutexGuard<'_, EditState> {
        lock(&self.edit)
    }
}

fn lock(edit: &Mutex<EditState>) -> MutexGuard<'_, EditState> {
    edit.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Returns the session to `Drawn` if a submit future is dropped mid-flight.
struct SubmitGuard<'a> {
    edit: &'a Mutex<EditState>,
    armed: bool,
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            let mut edit = lock(self.edit);
            if edit.state == SessionState::Submitting {
                edit.state = SessionState::Drawn;
            }
        }
    }
}
