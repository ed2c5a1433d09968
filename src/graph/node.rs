use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::archive::Artifact;

use super::category::{CategorySet, classify};

pub const UNKNOWN_DATE: &str = "Unknown";

/// Graph vertex derived from one artifact. Only the layout engine moves it.
#[derive(Clone, Debug)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub categories: CategorySet,
    pub tags: Vec<String>,
    pub created_display: String,
    /// `None` when neither date field parses; such nodes sort last on the timeline.
    pub created_at: Option<DateTime<Utc>>,
    pub artifact: Arc<Artifact>,
}

impl Node {
    pub fn timeline_key(&self) -> (bool, Option<DateTime<Utc>>) {
        (self.created_at.is_none(), self.created_at)
    }
}

pub fn node_id(index: usize) -> String {
    format!("artifact{index}")
}

pub fn build_node(artifact: Arc<Artifact>, id: String) -> Node {
    let created_at = creation_instant(&artifact);
    let created_display = created_at
        .map(|instant| instant.format("%-m/%-d/%Y").to_string())
        .unwrap_or_else(|| UNKNOWN_DATE.to_owned());

    Node {
        id,
        label: artifact.display_title().to_owned(),
        categories: classify(&artifact.tags),
        tags: artifact.tags.clone(),
        created_display,
        created_at,
        artifact,
    }
}

pub fn build_nodes(artifacts: Vec<Artifact>) -> Vec<Node> {
    artifacts
        .into_iter()
        .enumerate()
        .map(|(index, artifact)| build_node(Arc::new(artifact), node_id(index)))
        .collect()
}

// The user-entered creation date wins over the submission timestamp.
fn creation_instant(artifact: &Artifact) -> Option<DateTime<Utc>> {
    artifact
        .date_created
        .as_deref()
        .and_then(parse_instant)
        .or_else(|| artifact.timestamp.as_deref().and_then(parse_instant))
}

pub(crate) fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
