//! End-to-end model loading through the viewer.

use std::io::Write;

use approx::assert_relative_eq;
use trussview::{
    CoordinatePolicy, FileSource, FrameOutcome, FrameSkip, JointError, JsonSource, LoadError,
    ModelDescription, SourceError, StaticSource, Viewer, ViewerConfig, ViewerError,
};

const TWO_JOINTS: &str = r#"{
    "joints": {
        "j1": { "x": 0, "y": 0, "z": 0 },
        "j2": { "x": 1, "y": 0, "z": 0 }
    },
    "frames": {
        "fr1": { "j": "j1", "k": "j2" }
    }
}"#;

fn write_model(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_from_file_then_empty() {
    let file = write_model(TWO_JOINTS);
    let mut viewer = Viewer::new(ViewerConfig::default());

    let report = viewer.reload(&FileSource::new(file.path())).unwrap();
    assert_eq!(report.joints_added, ["j1", "j2"]);

    let graph = viewer.graph();
    assert_eq!(graph.joint_names().into_iter().collect::<Vec<_>>(), ["j1", "j2"]);
    assert_eq!(graph.frames().names(), ["fr1"]);
    assert_relative_eq!(graph.frame("fr1").unwrap().length, 1.0);

    viewer.reload(&StaticSource(ModelDescription::new())).unwrap();
    assert!(viewer.graph().joints().is_empty());
    assert!(viewer.graph().frames().is_empty());
}

#[test]
fn test_missing_file_leaves_model_untouched() {
    let mut viewer = Viewer::new(ViewerConfig::default());
    viewer.reload(&JsonSource::new("inline", TWO_JOINTS)).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let err = viewer
        .reload(&FileSource::new(dir.path().join("absent.json")))
        .unwrap_err();

    assert!(matches!(err, ViewerError::Source(SourceError::NotFound(_))));
    assert!(err.to_string().starts_with("404 File Not Found"));
    assert_eq!(viewer.graph().joints().len(), 2);
    assert_eq!(viewer.graph().frames().len(), 1);
}

#[test]
fn test_malformed_file_leaves_model_untouched() {
    let mut viewer = Viewer::new(ViewerConfig::default());
    viewer.reload(&JsonSource::new("inline", TWO_JOINTS)).unwrap();

    let file = write_model(r#"{ "joints": [1, 2, 3] }"#);
    let err = viewer.reload(&FileSource::new(file.path())).unwrap_err();

    assert!(matches!(err, ViewerError::Source(SourceError::Parse { .. })));
    assert_eq!(viewer.graph().joints().len(), 2);
}

#[test]
fn test_duplicate_joint_in_file_is_partial() {
    let file = write_model(
        r#"{
        "joints": {
            "a": { "x": 0, "y": 0, "z": 0 },
            "b": { "x": 0, "y": 1, "z": 0 },
            "a": { "x": 0, "y": 2, "z": 0 },
            "c": { "x": 0, "y": 3, "z": 0 }
        },
        "frames": {
            "ab": { "j": "a", "k": "b" },
            "bc": { "j": "b", "k": "c" }
        }
    }"#,
    );
    let mut viewer = Viewer::new(ViewerConfig::default());

    let err = viewer.reload(&FileSource::new(file.path())).unwrap_err();
    let ViewerError::Load(LoadError::Joint { name, source, report }) = err else {
        panic!("expected a joint load error");
    };

    assert_eq!(name, "a");
    assert_eq!(source, JointError::DuplicateName("a".into()));
    assert_eq!(report.joints_added, ["a", "b"]);
    assert_eq!(
        viewer.graph().joint_names().into_iter().collect::<Vec<_>>(),
        ["a", "b"]
    );
    assert_eq!(
        report.frames[1].1,
        FrameOutcome::Skipped(FrameSkip::UnresolvedEndpoint {
            frame: "bc".into(),
            endpoint: "c".into(),
        })
    );
}

#[test]
fn test_reload_under_each_policy() {
    let source = JsonSource::new("inline", TWO_JOINTS);

    let mut retaining = Viewer::new(ViewerConfig::default());
    retaining.reload(&source).unwrap();
    assert!(matches!(
        retaining.reload(&source),
        Err(ViewerError::Load(LoadError::Joint {
            source: JointError::DuplicatePosition { .. },
            ..
        }))
    ));

    let mut reclaiming = Viewer::with_policy(ViewerConfig::default(), CoordinatePolicy::Reclaim);
    reclaiming.reload(&source).unwrap();
    reclaiming.reload(&source).unwrap();
    assert_eq!(reclaiming.layout().frames.len(), 1);
}

#[test]
fn test_layout_after_load() {
    let mut viewer = Viewer::new(ViewerConfig {
        frame_size: 0.2,
        ..ViewerConfig::default()
    });
    viewer.reload(&JsonSource::new("inline", TWO_JOINTS)).unwrap();

    let layout = viewer.layout();
    assert_eq!(layout.joints.len(), 2);
    let frame = &layout.frames[0];
    assert_eq!((frame.from.as_str(), frame.to.as_str()), ("j1", "j2"));
    assert_relative_eq!(frame.anchor.x, 0.5);
    assert_relative_eq!(frame.scale.x, 0.2);
    assert!(layout.dangling.is_empty());

    let json = serde_json::to_value(&layout).unwrap();
    assert_eq!(json["frames"][0]["name"], "fr1");
}

#[test]
fn test_invalid_config_rejected() {
    let mut viewer = Viewer::default();
    let err = viewer
        .set_config(ViewerConfig {
            joint_size: 0.0,
            ..ViewerConfig::default()
        })
        .unwrap_err();
    assert!(matches!(err, ViewerError::Config(_)));
    assert_eq!(viewer.config(), &ViewerConfig::default());
}
