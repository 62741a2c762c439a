//! Topic identifiers and the fixed topic catalog.

use araldo_error::{RotationError, RotationErrorKind};
use serde::{Deserialize, Serialize};

/// Default topic catalog: front-end and back-end web technologies.
pub const DEFAULT_TOPICS: [&str; 20] = [
    "React.js",
    "Angular",
    "Vue.js",
    "Node.js",
    "Express.js",
    "GraphQL",
    "TypeScript",
    "Webpack",
    "Docker",
    "Kubernetes",
    "Microservices",
    "Progressive Web Apps",
    "Serverless Computing",
    "WebAssembly",
    "RESTful APIs",
    "Next.js",
    "Nuxt.js",
    "Svelte",
    "Tailwind CSS",
    "Responsive Design",
];

/// A subject for generated content, drawn from a fixed catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{}", _0)]
pub struct Topic(pub String);

impl Topic {
    /// View the topic as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Topic {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Topic {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// The fixed, ordered set of candidate topics.
///
/// The catalog is static configuration data: construction deduplicates
/// entries (first occurrence wins) and rejects an empty catalog, which is a
/// configuration precondition for topic selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicCatalog {
    topics: Vec<Topic>,
}

impl TopicCatalog {
    /// Create a catalog from an ordered sequence of topic names.
    ///
    /// # Errors
    ///
    /// Returns `RotationErrorKind::EmptyCatalog` if no topics remain after
    /// deduplication.
    pub fn new<I, S>(topics: I) -> Result<Self, RotationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = std::collections::HashSet::new();
        let mut unique = Vec::new();

        for topic in topics {
            let topic = topic.into();
            if seen.insert(topic.clone()) {
                unique.push(Topic(topic));
            } else {
                tracing::warn!(topic = %topic, "Duplicate catalog topic ignored");
            }
        }

        if unique.is_empty() {
            return Err(RotationError::new(RotationErrorKind::EmptyCatalog));
        }

        Ok(Self { topics: unique })
    }

    /// Catalog topics in their configured order.
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Number of topics in the catalog.
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    /// A catalog is never empty once constructed; this exists for symmetry.
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Check whether the catalog contains a topic identifier.
    pub fn contains(&self, topic: &str) -> bool {
        self.topics.iter().any(|t| t.as_str() == topic)
    }

    /// Iterate over catalog topics in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Topic> {
        self.topics.iter()
    }
}

impl Default for TopicCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_TOPICS).expect("default catalog is non-empty")
    }
}
