//! External model description: the document a whole model is loaded from.
//!
//! ```json
//! {
//!   "joints": { "j1": { "x": 0, "y": 0, "z": 0 }, "j2": { "x": 1, "y": 0, "z": 0 } },
//!   "frames": { "fr1": { "j": "j1", "k": "j2" } }
//! }
//! ```
//!
//! Frame endpoints may be spelled `j`/`k` or `from`/`to`. Integer-like keys
//! (`"0"`, `"1"`, `"42"`) are loaded first in ascending numeric order, then the
//! remaining keys in document order. Repeated keys are kept as separate entries.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Position of a joint in a description.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointSpec {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl JointSpec {
    /// Create a new joint spec.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Endpoints of a frame in a description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSpec {
    /// Start joint name.
    #[serde(alias = "j")]
    pub from: String,
    /// End joint name.
    #[serde(alias = "k")]
    pub to: String,
}

impl FrameSpec {
    /// Create a new frame spec.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// A full joint/frame model, as read from an external document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelDescription {
    /// Joints keyed by name, in load order.
    #[serde(
        default,
        deserialize_with = "ordered_entries",
        serialize_with = "entries_as_map"
    )]
    pub joints: Vec<(String, JointSpec)>,
    /// Frames keyed by name, in load order.
    #[serde(
        default,
        deserialize_with = "ordered_entries",
        serialize_with = "entries_as_map"
    )]
    pub frames: Vec<(String, FrameSpec)>,
}

impl ModelDescription {
    /// Create an empty description.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a joint entry.
    pub fn with_joint(mut self, name: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        self.joints.push((name.into(), JointSpec::new(x, y, z)));
        self
    }

    /// Append a frame entry.
    pub fn with_frame(
        mut self,
        name: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        self.frames.push((name.into(), FrameSpec::new(from, to)));
        self
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Deserialize from JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

fn ordered_entries<'de, D, T>(deserializer: D) -> Result<Vec<(String, T)>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    struct EntriesVisitor<T>(PhantomData<T>);

    impl<'de, T: Deserialize<'de>> Visitor<'de> for EntriesVisitor<T> {
        type Value = Vec<(String, T)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of named entries")
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, T>()? {
                entries.push(entry);
            }
            // Stable, so non-index keys keep their document order.
            entries.sort_by_key(|(key, _)| match array_index(key) {
                Some(index) => (0, index),
                None => (1, 0),
            });
            Ok(entries)
        }
    }

    deserializer.deserialize_any(EntriesVisitor(PhantomData))
}

/// Parse a canonical array index: `"0"` or a decimal without leading zeros,
/// below `u32::MAX`.
fn array_index(key: &str) -> Option<u32> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if key.len() > 1 && key.starts_with('0') {
        return None;
    }
    key.parse::<u32>().ok().filter(|&index| index != u32::MAX)
}

#[allow(clippy::ptr_arg)]
fn entries_as_map<S, T>(entries: &Vec<(String, T)>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    serializer.collect_map(entries.iter().map(|(k, v)| (k, v)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_original_format() {
        let json = r#"{
            "joints": {
                "j2": { "x": 1, "y": 0, "z": 0 },
                "j1": { "x": 0, "y": 0, "z": 0 }
            },
            "frames": { "fr1": { "j": "j1", "k": "j2" } }
        }"#;
        let desc = ModelDescription::from_json(json).unwrap();

        let names: Vec<_> = desc.joints.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["j2", "j1"]);
        assert_eq!(desc.joints[0].1, JointSpec::new(1.0, 0.0, 0.0));
        assert_eq!(desc.frames, vec![("fr1".to_string(), FrameSpec::new("j1", "j2"))]);
    }

    #[test]
    fn test_parse_from_to_spelling() {
        let json = r#"{ "frames": { "f": { "from": "a", "to": "b" } } }"#;
        let desc = ModelDescription::from_json(json).unwrap();
        assert!(desc.joints.is_empty());
        assert_eq!(desc.frames[0].1, FrameSpec::new("a", "b"));
    }

    #[test]
    fn test_duplicate_keys_are_kept() {
        let json = r#"{ "joints": {
            "a": { "x": 0, "y": 0, "z": 0 },
            "a": { "x": 1, "y": 0, "z": 0 }
        } }"#;
        let desc = ModelDescription::from_json(json).unwrap();
        assert_eq!(desc.joints.len(), 2);
    }

    #[test]
    fn test_integer_keys_come_first() {
        let json = r#"{ "joints": {
            "b": { "x": 0, "y": 0, "z": 0 },
            "10": { "x": 1, "y": 0, "z": 0 },
            "a": { "x": 2, "y": 0, "z": 0 },
            "1": { "x": 3, "y": 0, "z": 0 },
            "01": { "x": 4, "y": 0, "z": 0 },
            "4294967295": { "x": 5, "y": 0, "z": 0 }
        } }"#;
        let desc = ModelDescription::from_json(json).unwrap();

        let names: Vec<_> = desc.joints.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["1", "10", "b", "a", "01", "4294967295"]);
    }

    #[test]
    fn test_array_index() {
        assert_eq!(array_index("0"), Some(0));
        assert_eq!(array_index("42"), Some(42));
        assert_eq!(array_index("4294967294"), Some(4_294_967_294));
        assert_eq!(array_index("4294967295"), None);
        assert_eq!(array_index("007"), None);
        assert_eq!(array_index("+1"), None);
        assert_eq!(array_index("-1"), None);
        assert_eq!(array_index("1.5"), None);
        assert_eq!(array_index(""), None);
    }

    #[test]
    fn test_empty_and_null_sections() {
        let desc = ModelDescription::from_json("{}").unwrap();
        assert_eq!(desc, ModelDescription::new());

        let desc = ModelDescription::from_json(r#"{ "joints": null, "frames": {} }"#).unwrap();
        assert!(desc.joints.is_empty() && desc.frames.is_empty());
    }

    #[test]
    fn test_rejects_malformed_joint() {
        let json = r#"{ "joints": { "a": { "x": 0, "y": "up", "z": 0 } } }"#;
        assert!(ModelDescription::from_json(json).is_err());
    }

    #[test]
    fn test_json_output_keeps_order() {
        let desc = ModelDescription::new()
            .with_joint("b", 1.0, 0.0, 0.0)
            .with_joint("a", 0.0, 0.0, 0.0)
            .with_frame("f", "a", "b");
        let json = desc.to_json().unwrap();

        assert!(json.find("\"b\"").unwrap() < json.find("\"a\"").unwrap());
        assert!(json.contains("\"from\": \"a\""));
        assert_eq!(ModelDescription::from_json(&json).unwrap(), desc);
    }
}
