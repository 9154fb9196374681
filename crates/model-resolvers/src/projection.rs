use indexmap::IndexMap;
use serde_json::Value;

/// The fields a caller asked for, as a tree. An empty projection selects everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    fields: IndexMap<String, Projection>,
}

impl Projection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a projection from dotted paths, e.g. `["record.name", "error"]`.
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut projection = Projection::new();

        for path in paths {
            let mut current = &mut projection;

            for segment in path.as_ref().split('.').filter(|segment| !segment.is_empty()) {
                current = current.fields.entry(segment.to_string()).or_default();
            }
        }

        projection
    }

    /// Builds a projection from a nested object, e.g. `{ "record": { "name": {} } }`.
    /// Non-object leaves select the field as a whole.
    pub fn from_json(value: &Value) -> Self {
        let Value::Object(fields) = value else {
            return Projection::new();
        };

        Projection {
            fields: fields
                .iter()
                .map(|(name, value)| (name.clone(), Projection::from_json(value)))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Projection> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.keys().map(String::as_str)
    }
}
