//! Background path worker
//!
//! Queries run on tokio's blocking pool so the caller's task never performs
//! the search itself. The navigation grid sits behind a mutex, so at most one
//! query or update touches it at a time.

use glam::Vec3;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use voxnav_common::{Error, Result};
use voxnav_query::NavMesh3d;

/// Handle to a path request running in the background
///
/// Dropping the ticket discards the result; the search itself still runs
/// to completion.
pub struct PathTicket {
    handle: JoinHandle<voxnav_query::Result<Vec<Vec3>>>,
}

impl PathTicket {
    /// Whether the search has finished and [`PathTicket::wait`] will not block
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the search and returns its corners
    pub async fn wait(self) -> Result<Vec<Vec3>> {
        match self.handle.await {
            Ok(result) => result.map_err(Error::from),
            Err(e) => Err(Error::Io(std::io::Error::other(format!(
                "Path worker failed: {}",
                e
            )))),
        }
    }
}

/// Serializes path queries against one navigation grid
#[derive(Clone)]
pub struct PathWorker {
    nav: Arc<Mutex<NavMesh3d>>,
}

impl PathWorker {
    pub fn new(nav: NavMesh3d) -> Self {
        Self {
            nav: Arc::new(Mutex::new(nav)),
        }
    }

    /// Starts a path search on the blocking pool
    ///
    /// Must be called from within a tokio runtime.
    pub fn request_path(&self, start: Vec3, end: Vec3) -> PathTicket {
        let nav = Arc::clone(&self.nav);
        let handle = tokio::task::spawn_blocking(move || {
            let mut nav = nav.blocking_lock();
            nav.get_path(start, end)
        });
        PathTicket { handle }
    }

    /// Searches a path and waits for the result
    pub async fn find_path(&self, start: Vec3, end: Vec3) -> Result<Vec<Vec3>> {
        self.request_path(start, end).wait().await
    }

    /// Runs `f` with exclusive access to the grid, between queries
    ///
    /// Used for re-baking, budget changes and dynamic occupancy updates.
    pub async fn with_nav<R>(&self, f: impl FnOnce(&mut NavMesh3d) -> R) -> R {
        let mut nav = self.nav.lock().await;
        f(&mut nav)
    }
}
