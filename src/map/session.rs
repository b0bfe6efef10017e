use std::collections::BTreeSet;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::map::error::MapError;
use crate::map::loader::{WidgetHandle, WidgetLoader};
use crate::map::map_model::MapOptions;

pub const MAPS_LIBRARY: &str = "maps";

#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionState {
    Uninitialized,
    Loading,
    Ready(Arc<WidgetHandle>),
    Failed(MapError),
}

/// Observable lifecycle of a [`WidgetSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Uninitialized,
    Loading,
    Ready,
    Failed,
}

struct Inner {
    state: SessionState,
    libraries: BTreeSet<String>,
    loads: usize,
}

/// A map shown by the widget.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMap {
    pub options: MapOptions,
    pub handle: Arc<WidgetHandle>,
}

/// Owns the widget's one-time script load.
///
/// The first `import_library` call drives the load on its own thread;
/// callers arriving while it runs block until it finishes and share its
/// result. `Ready` and `Failed` are terminal: a failed load is not retried.
pub struct WidgetSession<L: WidgetLoader> {
    loader: L,
    inner: Mutex<Inner>,
    settled: Condvar,
}

impl<L: WidgetLoader> WidgetSession<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            inner: Mutex::new(Inner {
                state: SessionState::Uninitialized,
                libraries: BTreeSet::new(),
                loads: 0,
            }),
            settled: Condvar::new(),
        }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn status(&self) -> SessionStatus {
        match self.lock().state {
            SessionState::Uninitialized => SessionStatus::Uninitialized,
            SessionState::Loading => SessionStatus::Loading,
            SessionState::Ready(_) => SessionStatus::Ready,
            SessionState::Failed(_) => SessionStatus::Failed,
        }
    }

    /// How many times the loader has been invoked (0 or 1).
    pub fn load_count(&self) -> usize {
        self.lock().loads
    }

    /// Libraries requested so far, sorted.
    pub fn libraries(&self) -> Vec<String> {
        self.lock().libraries.iter().cloned().collect()
    }

    /// Queue a library for the upcoming load without starting it.
    /// Returns false when the load has already started.
    pub fn request_library(&self, library: &str) -> bool {
        let mut inner = self.lock();
        if inner.state != SessionState::Uninitialized {
            if !inner.libraries.contains(library) {
                warn!(library, "map widget only loads once; ignoring late library request");
            }
            return false;
        }
        inner.libraries.insert(library.to_string());
        true
    }

    /// Make sure the widget is loaded with `library`, loading it now if
    /// nobody has. A library missing from a load that already started is
    /// reported as [`MapError::LibraryNotLoaded`].
    pub fn import_library(&self, library: &str) -> Result<Arc<WidgetHandle>, MapError> {
        self.request_library(library);

        let mut inner = self.lock();
        loop {
            match &inner.state {
                SessionState::Ready(handle) => return with_library(handle, library),
                SessionState::Failed(error) => return Err(error.clone()),
                SessionState::Uninitialized => break,
                SessionState::Loading => {}
            }
            inner = self
                .settled
                .wait(inner)
                .unwrap_or_else(PoisonError::into_inner);
        }

        inner.state = SessionState::Loading;
        inner.loads += 1;
        let libraries: Vec<String> = inner.libraries.iter().cloned().collect();
        drop(inner);

        debug!(?libraries, "loading map widget");
        let result = catch_unwind(AssertUnwindSafe(|| self.loader.load(&libraries)))
            .unwrap_or_else(|_| {
                Err(MapError::ScriptLoad {
                    url: String::new(),
                    reason: "loader panicked".to_string(),
                })
            });

        let mut inner = self.lock();
        let outcome = match result {
            Ok(handle) => {
                info!(url = %handle.script_url, "map widget ready");
                let handle = Arc::new(handle);
                inner.state = SessionState::Ready(Arc::clone(&handle));
                with_library(&handle, library)
            }
            Err(error) => {
                warn!("{}", error);
                inner.state = SessionState::Failed(error.clone());
                Err(error)
            }
        };
        drop(inner);
        self.settled.notify_all();

        outcome
    }

    /// Validate `options`, load the widget if needed and hand the options over.
    pub fn show_map(&self, options: &MapOptions) -> Result<RenderedMap, MapError> {
        options.validate()?;
        let handle = self.import_library(MAPS_LIBRARY)?;
        Ok(RenderedMap {
            options: options.clone(),
            handle,
        })
    }
}

fn with_library(
    handle: &Arc<WidgetHandle>,
    library: &str,
) -> Result<Arc<WidgetHandle>, MapError> {
    if handle.libraries.iter().any(|loaded| loaded == library) {
        Ok(Arc::clone(handle))
    } else {
        Err(MapError::LibraryNotLoaded {
            library: library.to_string(),
        })
    }
}
