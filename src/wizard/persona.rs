use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Persona {
    pub id: String,
    pub name: String,
    pub description: String,
    pub features: Vec<String>,
}

impl Persona {
    fn new(id: &str, name: &str, description: &str, features: &[&str]) -> Persona {
        Persona {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            features: features.iter().map(|feature| feature.to_string()).collect(),
        }
    }
}

/// The game master personalities offered by a freshly opened wizard.
pub fn default_personas() -> Vec<Persona> {
    vec![
        Persona::new(
            "narrative",
            "Jeff's Narrative Flair",
            "Focuses on rich storytelling, dramatic moments, and emotional depth",
            &[
                "Rich descriptions",
                "Character development",
                "Emotional storytelling",
            ],
        ),
        Persona::new(
            "mechanical",
            "Jeff's Mechanical Precision",
            "Emphasizes rules accuracy, tactical combat, and strategic gameplay",
            &["Rules accuracy", "Tactical combat", "Strategic depth"],
        ),
        Persona::new(
            "calibration",
            "Jeff's Calibration Rigor",
            "Balances challenge perfectly and adapts to player preferences",
            &["Perfect balance", "Adaptive difficulty", "Player-focused"],
        ),
    ]
}
