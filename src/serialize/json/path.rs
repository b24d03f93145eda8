//! JSON-pointer-style paths for structural error reporting.

use std::fmt;

/// Path of a value inside the raw JSON document, e.g. `/components/0/name`.
///
/// Built by appending static key segments and array indices while the
/// denormalizer descends, so every structural error is localizable.
#[derive(Debug, Clone, Default)]
pub struct JsonPath {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone)]
enum Segment {
    Key(&'static str),
    Index(usize),
}

impl JsonPath {
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn key(&self, key: &'static str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Key(key));
        Self { segments }
    }

    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Index(index));
        Self { segments }
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            match segment {
                Segment::Key(key) => write!(f, "/{key}")?,
                Segment::Index(index) => write!(f, "/{index}")?,
            }
        }
        Ok(())
    }
}
