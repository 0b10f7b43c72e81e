use serde_json::{Map, Value};

/// Insertion-ordered label/score mapping built from a detection response.
///
/// A repeated description keeps its original position and takes the
/// last-written score, so the serialized document reads in discovery order
/// with one entry per distinct label.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LabelSet {
    entries: Vec<(String, f32)>,
}

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, description: &str, score: f32) {
        match self.entries.iter_mut().find(|(d, _)| d == description) {
            Some(entry) => entry.1 = score,
            None => self.entries.push((description.to_string(), score)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> + '_ {
        self.entries.iter().map(|(d, s)| (d.as_str(), *s))
    }

    /// Serializes the mapping as a JSON object of percentage strings.
    ///
    /// Scores stay numeric until this boundary. Output is deterministic, so
    /// repeated runs over identical input overwrite the sink byte-for-byte.
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut document = Map::new();
        for (description, score) in self.iter() {
            document.insert(description.to_string(), Value::String(format_percent(score)));
        }
        serde_json::to_vec(&Value::Object(document))
    }
}

/// Renders a [0,1] confidence as "xx.xx%".
pub fn format_percent(score: f32) -> String {
    format!("{:.2}%", score * 100.0)
}
