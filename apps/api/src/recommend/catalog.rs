use serde::{Deserialize, Serialize};

/// A learning resource the ranker can recommend. The catalog is fixed at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Resource {
    pub id: i64,
    pub title: String,
    pub platform: String,
    #[serde(rename = "desc")]
    pub description: String,
}

impl Resource {
    pub fn new(id: i64, title: &str, platform: &str, description: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            platform: platform.to_string(),
            description: description.to_string(),
        }
    }

    /// Text indexed for similarity: title followed by description.
    pub fn document(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

/// The built-in resource catalog.
pub fn default_catalog() -> Vec<Resource> {
    vec![
        Resource::new(
            1,
            "Deep Learning Specialization",
            "Coursera",
            "Neural networks, CNNs, RNNs, and practical deep learning projects.",
        ),
        Resource::new(
            2,
            "PyTorch for Deep Learning",
            "Udemy",
            "Hands-on PyTorch course building CNNs and transformers.",
        ),
        Resource::new(
            3,
            "Machine Learning Crash Course",
            "YouTube",
            "Intro to ML concepts, regression, classification, and evaluation.",
        ),
        Resource::new(
            4,
            "NLP with Transformers",
            "Hugging Face",
            "Transformer architecture, fine-tuning, and deployment.",
        ),
        Resource::new(
            5,
            "Full-Stack React & FastAPI",
            "Medium",
            "Integrating React frontend with FastAPI backend and authentication.",
        ),
        Resource::new(
            6,
            "Librosa Audio Processing",
            "Blog",
            "Audio feature extraction like MFCCs for speech emotion recognition.",
        ),
    ]
}
