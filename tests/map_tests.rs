use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use schedule_selection::map::bootstrap::{BootstrapConfig, READY_CALLBACK};
use schedule_selection::map::error::MapError;
use schedule_selection::map::loader::{HttpScriptLoader, WidgetHandle, WidgetLoader};
use schedule_selection::map::map_model::{LatLng, MapOptions, Marker};
use schedule_selection::map::session::{SessionStatus, WidgetSession};

// ============================================================================
// Test loaders
// ============================================================================

#[derive(Default)]
struct CountingLoader {
    calls: AtomicUsize,
    requested: Mutex<Vec<Vec<String>>>,
    delay: Duration,
    fail: bool,
}

impl CountingLoader {
    fn slow(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl WidgetLoader for CountingLoader {
    fn load(&self, libraries: &[String]) -> Result<WidgetHandle, MapError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(libraries.to_vec());
        thread::sleep(self.delay);

        if self.fail {
            return Err(MapError::ScriptLoad {
                url: "https://maps.example/js".into(),
                reason: "HTTP 503 Service Unavailable".into(),
            });
        }

        Ok(WidgetHandle {
            script_url: "https://maps.example/js".into(),
            libraries: libraries.to_vec(),
            script_bytes: 1024,
        })
    }
}

struct PanickingLoader;

impl WidgetLoader for PanickingLoader {
    fn load(&self, _libraries: &[String]) -> Result<WidgetHandle, MapError> {
        panic!("script tag exploded");
    }
}

// ============================================================================
// Bootstrap URL
// ============================================================================

#[test]
fn bootstrap_url_carries_all_parameters() {
    let config = BootstrapConfig::with_api_key("KEY123");
    let url = config
        .script_url(&["maps".to_string(), "marker".to_string()])
        .unwrap();

    assert_eq!(url.scheme(), "https");
    assert_eq!(url.host_str(), Some("maps.googleapis.com"));
    assert_eq!(url.path(), "/maps/api/js");

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("libraries".to_string(), "maps,marker".to_string()),
            ("key".to_string(), "KEY123".to_string()),
            ("v".to_string(), "weekly".to_string()),
            ("callback".to_string(), READY_CALLBACK.to_string()),
        ]
    );
}

#[test]
fn bootstrap_url_rejects_bad_base() {
    let config = BootstrapConfig {
        base_url: "not a url".into(),
        ..BootstrapConfig::default()
    };
    match config.script_url(&["maps".to_string()]) {
        Err(MapError::InvalidUrl { url, .. }) => assert_eq!(url, "not a url"),
        other => panic!("expected InvalidUrl, got {:?}", other),
    }
}

// ============================================================================
// Map options
// ============================================================================

#[test]
fn default_options_match_contacts_page() {
    let options = MapOptions::default();
    assert_eq!(options.center, LatLng::new(43.259116, 76.933178));
    assert_eq!(options.zoom, 12);
    assert_eq!(options.map_id, "MAP_ID");
    assert_eq!(options.markers.len(), 1);
    assert_eq!(options.markers[0].title, "Medical University");
    assert!(options.validate().is_ok());
}

#[test]
fn options_reject_out_of_range_values() {
    let mut options = MapOptions::default();
    options.center = LatLng::new(91.0, 0.0);
    assert!(matches!(options.validate(), Err(MapError::InvalidOptions(_))));

    let mut options = MapOptions::default();
    options.zoom = 23;
    assert!(matches!(options.validate(), Err(MapError::InvalidOptions(_))));

    let mut options = MapOptions::default();
    options.markers.push(Marker {
        position: LatLng::new(0.0, 181.0),
        title: "Nowhere".into(),
    });
    match options.validate() {
        Err(MapError::InvalidOptions(msg)) => assert!(msg.contains("Nowhere")),
        other => panic!("expected InvalidOptions, got {:?}", other),
    }
}

#[test]
fn options_deserialize_with_defaults() {
    let options: MapOptions = serde_yaml::from_str("center: { lat: 1.5, lng: 2.5 }").unwrap();
    assert_eq!(options.center, LatLng::new(1.5, 2.5));
    assert_eq!(options.zoom, 12);
    assert!(options.markers.is_empty());
}

// ============================================================================
// Widget session lifecycle
// ============================================================================

#[test]
fn session_starts_uninitialized() {
    let session = WidgetSession::new(CountingLoader::default());
    assert_eq!(session.status(), SessionStatus::Uninitialized);
    assert_eq!(session.load_count(), 0);
}

#[test]
fn session_loads_once_and_memoizes() {
    let session = WidgetSession::new(CountingLoader::default());

    let first = session.import_library("maps").unwrap();
    let second = session.import_library("maps").unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(session.status(), SessionStatus::Ready);
    assert_eq!(session.load_count(), 1);
}

#[test]
fn concurrent_imports_share_one_load() {
    let session = WidgetSession::new(CountingLoader::slow(Duration::from_millis(50)));

    let session = &session;

    let handles: Vec<Arc<WidgetHandle>> = thread::scope(|s| {
        let workers: Vec<_> = (0..8)
            .map(|_| s.spawn(move || session.import_library("maps").unwrap()))
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });

    assert_eq!(handles.len(), 8);
    assert!(handles.iter().all(|h| Arc::ptr_eq(h, &handles[0])));
    assert_eq!(session.loader().calls.load(Ordering::SeqCst), 1);
    assert_eq!(session.load_count(), 1);
    assert_eq!(session.status(), SessionStatus::Ready);
}

#[test]
fn queued_libraries_load_together() {
    let loader = CountingLoader::default();
    let session = WidgetSession::new(loader);

    assert!(session.request_library("marker"));
    let handle = session.import_library("maps").unwrap();

    assert_eq!(handle.libraries, vec!["maps".to_string(), "marker".to_string()]);
    assert_eq!(
        *session.loader().requested.lock().unwrap(),
        vec![vec!["maps".to_string(), "marker".to_string()]]
    );
    assert_eq!(session.libraries(), vec!["maps".to_string(), "marker".to_string()]);
}

#[test]
fn late_library_request_is_reported_as_not_loaded() {
    let session = WidgetSession::new(CountingLoader::default());
    session.import_library("maps").unwrap();

    assert!(!session.request_library("places"));
    match session.import_library("places") {
        Err(MapError::LibraryNotLoaded { library }) => assert_eq!(library, "places"),
        other => panic!("expected LibraryNotLoaded, got {:?}", other),
    }

    assert!(session.import_library("maps").is_ok());
    assert_eq!(session.libraries(), vec!["maps".to_string()]);
    assert_eq!(session.status(), SessionStatus::Ready);
    assert_eq!(session.load_count(), 1);
}

#[test]
fn library_requested_during_load_is_reported_as_not_loaded() {
    let session = WidgetSession::new(CountingLoader::slow(Duration::from_millis(200)));

    let session = &session;

    let (maps, places) = thread::scope(|s| {
        let first = s.spawn(move || session.import_library("maps"));
        thread::sleep(Duration::from_millis(50));
        let second = s.spawn(move || session.import_library("places"));
        (first.join().unwrap(), second.join().unwrap())
    });

    assert_eq!(maps.unwrap().libraries, vec!["maps".to_string()]);
    assert_eq!(
        places.unwrap_err(),
        MapError::LibraryNotLoaded {
            library: "places".into()
        }
    );
    assert_eq!(session.load_count(), 1);
}

#[test]
fn failed_load_is_terminal_and_shared() {
    let session = WidgetSession::new(CountingLoader::failing());

    let first = session.import_library("maps").unwrap_err();
    let second = session.import_library("maps").unwrap_err();

    assert_eq!(first, second);
    assert!(matches!(first, MapError::ScriptLoad { .. }));
    assert!(first.to_string().contains("could not load"));
    assert_eq!(session.status(), SessionStatus::Failed);
    assert_eq!(session.load_count(), 1);
}

#[test]
fn concurrent_imports_all_see_failure() {
    let loader = CountingLoader {
        delay: Duration::from_millis(30),
        fail: true,
        ..CountingLoader::default()
    };
    let session = WidgetSession::new(loader);

    let session = &session;

    let results: Vec<Result<Arc<WidgetHandle>, MapError>> = thread::scope(|s| {
        let workers: Vec<_> = (0..4)
            .map(|_| s.spawn(move || session.import_library("maps")))
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });

    assert!(results.iter().all(|r| r.is_err()));
    assert_eq!(session.load_count(), 1);
}

#[test]
fn panicking_loader_marks_session_failed() {
    let session = WidgetSession::new(PanickingLoader);
    let err = session.import_library("maps").unwrap_err();
    assert!(matches!(err, MapError::ScriptLoad { .. }));
    assert_eq!(session.status(), SessionStatus::Failed);
}

#[test]
fn show_map_validates_before_loading() {
    let session = WidgetSession::new(CountingLoader::default());
    let mut options = MapOptions::default();
    options.zoom = 40;

    assert!(matches!(
        session.show_map(&options),
        Err(MapError::InvalidOptions(_))
    ));
    assert_eq!(session.status(), SessionStatus::Uninitialized);
    assert_eq!(session.load_count(), 0);
}

#[test]
fn show_map_loads_maps_library() {
    let session = WidgetSession::new(CountingLoader::default());
    let options = MapOptions::default();

    let map = session.show_map(&options).unwrap();

    assert_eq!(map.options, options);
    assert_eq!(map.handle.libraries, vec!["maps".to_string()]);
    assert_eq!(session.status(), SessionStatus::Ready);
}

#[test]
fn http_loader_reports_unreachable_script() {
    let config = BootstrapConfig {
        base_url: "http://127.0.0.1:9/maps/api/js".into(),
        ..BootstrapConfig::with_api_key("KEY")
    };
    let session = WidgetSession::new(HttpScriptLoader::new(config));

    match session.import_library("maps") {
        Err(MapError::ScriptLoad { url, .. }) => {
            assert!(url.starts_with("http://127.0.0.1:9/maps/api/js?"))
        }
        other => panic!("expected ScriptLoad, got {:?}", other),
    }
    assert_eq!(session.status(), SessionStatus::Failed);
}
