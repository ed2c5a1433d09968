use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ArtifactFormat {
    Text,
    Image,
    Audio,
    Pdf,
    #[default]
    Unspecified,
}

impl ArtifactFormat {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "text" => Self::Text,
            "image" => Self::Image,
            "audio" => Self::Audio,
            "pdf" => Self::Pdf,
            _ => Self::Unspecified,
        }
    }
}

/// One accepted archive submission, as handed over by the store.
///
/// Both the client-side field names and the database row names are accepted,
/// since accepted artifacts have historically been stored in both shapes.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Artifact {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date_created: Option<String>,
    #[serde(default, alias = "created_at", deserialize_with = "lenient_string")]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient_format")]
    pub format: ArtifactFormat,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, alias = "textContent", deserialize_with = "lenient_string")]
    pub text_content: Option<String>,
    #[serde(default, alias = "visual_url", deserialize_with = "lenient_string")]
    pub file_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub submitter_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub submitter_email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub submitter_designation: Option<String>,
}

impl Artifact {
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => "Untitled",
        }
    }

    pub fn format_label(&self) -> &'static str {
        match self.format {
            ArtifactFormat::Audio => "Audio",
            ArtifactFormat::Image => "Image",
            ArtifactFormat::Pdf => "PDF",
            ArtifactFormat::Text => "Text",
            ArtifactFormat::Unspecified if self.has_text_content() => "Text",
            ArtifactFormat::Unspecified => "Document",
        }
    }

    pub fn submitter_summary(&self) -> Option<String> {
        let parts = [
            self.submitter_name.as_deref(),
            self.submitter_designation.as_deref(),
            self.submitter_email.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }

    fn has_text_content(&self) -> bool {
        self.text_content
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty())
    }
}

// Field decoders below never fail: a value of the wrong JSON type reads as absent,
// so one bad field cannot reject the record or the file around it.

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

// Non-string entries are dropped; anything but an array means no tags.
fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(tag) => Some(tag),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_format<'de, D>(deserializer: D) -> Result<ArtifactFormat, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(label) => ArtifactFormat::from_label(&label),
        _ => ArtifactFormat::Unspecified,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_row_and_client_field_names() {
        let row: Artifact = serde_json::from_str(
            r#"{
                "title": "Arc.Bangalore",
                "tags": ["Community Organizing"],
                "created_at": "2025-09-10T08:00:00Z",
                "date_created": "2025-09-01",
                "format": "image",
                "text_content": null,
                "file_url": "artifacts/arc.png",
                "submitter_name": "Asha"
            }"#,
        )
        .unwrap();
        assert_eq!(row.timestamp.as_deref(), Some("2025-09-10T08:00:00Z"));
        assert_eq!(row.date_created.as_deref(), Some("2025-09-01"));
        assert_eq!(row.format, ArtifactFormat::Image);
        assert_eq!(row.file_url.as_deref(), Some("artifacts/arc.png"));

        let client: Artifact = serde_json::from_str(
            r#"{"title": "Zine", "textContent": "hello", "format": "text"}"#,
        )
        .unwrap();
        assert_eq!(client.text_content.as_deref(), Some("hello"));
        assert!(client.tags.is_empty());
    }

    #[test]
    fn malformed_fields_degrade() {
        let artifact: Artifact =
            serde_json::from_str(r#"{"tags": null, "format": "video", "title": ""}"#).unwrap();
        assert!(artifact.tags.is_empty());
        assert_eq!(artifact.format, ArtifactFormat::Unspecified);
        assert_eq!(artifact.display_title(), "Untitled");
        assert_eq!(artifact.format_label(), "Document");
    }

    #[test]
    fn wrongly_typed_fields_read_as_absent() {
        let artifact: Artifact = serde_json::from_str(
            r#"{
                "title": 42,
                "tags": "Social Justice",
                "date_created": {"year": 2025},
                "created_at": false,
                "format": 3,
                "description": ["a", "b"],
                "submitter_name": null
            }"#,
        )
        .unwrap();
        assert!(artifact.tags.is_empty());
        assert!(artifact.title.is_none());
        assert!(artifact.date_created.is_none());
        assert!(artifact.timestamp.is_none());
        assert!(artifact.description.is_none());
        assert_eq!(artifact.format, ArtifactFormat::Unspecified);
        assert_eq!(artifact.display_title(), "Untitled");

        let mixed: Artifact = serde_json::from_str(r#"{"tags": ["ok", 7, null, "fine"]}"#).unwrap();
        assert_eq!(mixed.tags, vec!["ok".to_owned(), "fine".to_owned()]);
    }

    #[test]
    fn whitespace_title_is_kept_verbatim() {
        let artifact = Artifact {
            title: Some("  ".to_owned()),
            ..Artifact::default()
        };
        assert_eq!(artifact.display_title(), "  ");
        assert_eq!(ArtifactFormat::from_label(" PDF "), ArtifactFormat::Pdf);
    }

    #[test]
    fn format_label_falls_back_to_text_content() {
        let artifact = Artifact {
            text_content: Some("A letter".to_owned()),
            ..Artifact::default()
        };
        assert_eq!(artifact.format_label(), "Text");

        let audio = Artifact {
            format: ArtifactFormat::Audio,
            text_content: Some("transcript".to_owned()),
            ..Artifact::default()
        };
        assert_eq!(audio.format_label(), "Audio");
    }

    #[test]
    fn submitter_summary_skips_blank_parts() {
        let artifact = Artifact {
            submitter_name: Some("Ravi".to_owned()),
            submitter_designation: Some(" ".to_owned()),
            submitter_email: Some("ravi@example.org".to_owned()),
            ..Artifact::default()
        };
        assert_eq!(
            artifact.submitter_summary().as_deref(),
            Some("Ravi, ravi@example.org")
        );
        assert!(Artifact::default().submitter_summary().is_none());
    }
}
