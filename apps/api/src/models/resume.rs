use serde::ser::{Serialize, SerializeMap, Serializer};

/// Resume paragraphs bucketed under heading-like labels.
///
/// Keeps labels in order of first appearance and serializes as a JSON
/// object (`{"Experience": ["..."], ...}`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sections {
    entries: Vec<(String, Vec<String>)>,
}

impl Sections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or restarts) the bucket for `label`, dropping anything it held.
    pub fn reset(&mut self, label: &str) {
        match self.entries.iter_mut().find(|(l, _)| l == label) {
            Some((_, paragraphs)) => paragraphs.clear(),
            None => self.entries.push((label.to_string(), Vec::new())),
        }
    }

    pub fn push(&mut self, label: &str, paragraph: String) {
        match self.entries.iter_mut().find(|(l, _)| l == label) {
            Some((_, paragraphs)) => paragraphs.push(paragraph),
            None => self.entries.push((label.to_string(), vec![paragraph])),
        }
    }

    #[cfg(test)]
    pub fn get(&self, label: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, p)| p.as_slice())
    }

    #[cfg(test)]
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Sections {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, paragraphs) in &self.entries {
            map.serialize_entry(label, paragraphs)?;
        }
        map.end()
    }
}

/// Extracted resume text plus its best-effort section split.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ResumeData {
    pub text: String,
    pub sections: Sections,
}

#[derive(Debug, serde::Serialize)]
pub struct ParseResumeResponse {
    pub status: &'static str,
    pub resume_data: ResumeData,
}

impl ParseResumeResponse {
    pub fn success(resume_data: ResumeData) -> Self {
        Self {
            status: "success",
            resume_data,
        }
    }
}
