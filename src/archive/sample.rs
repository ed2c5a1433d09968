use super::record::{Artifact, ArtifactFormat};

fn sample(
    title: &str,
    tags: &[&str],
    timestamp: &str,
    text_content: &str,
    description: &str,
) -> Artifact {
    Artifact {
        title: Some(title.to_owned()),
        tags: tags.iter().map(|tag| (*tag).to_owned()).collect(),
        timestamp: Some(timestamp.to_owned()),
        format: ArtifactFormat::Text,
        text_content: Some(text_content.to_owned()),
        description: Some(description.to_owned()),
        ..Artifact::default()
    }
}

/// Artifacts offered by the "load sample data" affordance of an empty archive.
pub fn sample_artifacts() -> Vec<Artifact> {
    vec![
        sample(
            "Slum Jaggathu, edition 220",
            &[
                "Print Publication (Magazine, Pamphlet, Zine)",
                "Alternative News / Reporting",
                "Media & Representation",
                "Education & Literacy",
            ],
            "2025-12-31",
            "Sample publication content",
            "A community publication highlighting local issues and stories.",
        ),
        sample(
            "Hidden Hunger in Plain Sight, Ambedkarian Chronicles",
            &[
                "Text (Article, Essay, Letter)",
                "Resistance & Protest",
                "Awareness / Advocacy",
                "Social Justice",
            ],
            "2025-11-15",
            "Sample article content",
            "An article exploring food insecurity and social justice.",
        ),
        sample(
            "I Brought Ambedkar Home, Ambedkarian Chronicles",
            &[
                "Oral Histories / Personal Narratives",
                "Text (Article, Essay, Letter)",
                "Memory & Commemoration",
                "Culture & Heritage",
            ],
            "2025-10-20",
            "Sample narrative content",
            "A personal narrative about cultural heritage and identity.",
        ),
        sample(
            "Arc.Bangalore",
            &[
                "Community Organizing",
                "Social Media Post (Instagram, WhatsApp, Twitter, etc.)",
                "Awareness / Advocacy",
                "Urban Life & Infrastructure",
            ],
            "2025-09-10",
            "Sample social media content",
            "Community organizing initiative in Bangalore.",
        ),
        sample(
            "Studying Gender Without Caste Does the Subject a Disservice, The Wire",
            &[
                "Text (Article, Essay, Letter)",
                "Awareness / Advocacy",
                "Social Justice",
                "Caste & Marginalization",
            ],
            "2025-08-05",
            "Sample article content",
            "An analysis of intersectionality in academic discourse.",
        ),
    ]
}
