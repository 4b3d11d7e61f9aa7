use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Which of the two wiki pages a record came from. Doubles as the label in
/// synthesized fallback descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignType {
    ListeDesPanneaux,
    SignalisationDynamique,
}

impl SignType {
    pub fn as_str(self) -> &'static str {
        match self {
            SignType::ListeDesPanneaux => "liste_des_panneaux",
            SignType::SignalisationDynamique => "signalisation_dynamique",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SignType::ListeDesPanneaux => "liste des panneaux",
            SignType::SignalisationDynamique => "signalisation dynamique",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    pub url: String,
    #[serde(rename = "type")]
    pub sign_type: SignType,
}

/// The reference deployment scrapes these two Wikibooks pages.
pub fn default_sources() -> Vec<Source> {
    vec![
        Source {
            url: "https://fr.wikibooks.org/wiki/Code_de_la_route/Liste_des_panneaux".to_string(),
            sign_type: SignType::ListeDesPanneaux,
        },
        Source {
            url: "https://fr.wikibooks.org/wiki/Code_de_la_route/Signalisation_dynamique"
                .to_string(),
            sign_type: SignType::SignalisationDynamique,
        },
    ]
}

pub fn load(path: &Path) -> Result<Vec<Source>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read sources file {}", path.display()))?;
    let sources: Vec<Source> = serde_json::from_str(&text)
        .with_context(|| format!("Invalid sources file {}", path.display()))?;
    Ok(sources)
}

// ── Tests ──
