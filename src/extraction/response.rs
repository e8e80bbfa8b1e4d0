use serde::Serialize;

/// Upper bound on ingredients returned for one request
pub const MAX_INGREDIENTS: usize = 20;

/// Lines containing this word are the service echoing instructions, not data
const INSTRUCTION_MARKER: &str = "ingredient";

/// Ordered ingredient names for one request.
///
/// Only constructible through the parsing rules below, so every value holds
/// at most [`MAX_INGREDIENTS`] trimmed, non-empty entries, none of which
/// mention "ingredient". Order is the service's order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ExtractionResult(Vec<String>);

impl ExtractionResult {
    /// Parse the service's raw newline-delimited output
    pub fn parse(raw: &str) -> Self {
        Self::from_names(raw.lines())
    }

    /// Apply the same rules to names that arrived already split
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .filter_map(|name| {
                let name = name.as_ref().trim();
                if name.is_empty() || name.to_lowercase().contains(INSTRUCTION_MARKER) {
                    None
                } else {
                    Some(name.to_string())
                }
            })
            .take(MAX_INGREDIENTS)
            .collect();

        ExtractionResult(names)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl<'a> IntoIterator for &'a ExtractionResult {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
