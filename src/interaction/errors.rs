//! Setup errors and configuration warnings reported by the interaction systems.
use std::fmt;

/// Missing external dependencies detected at startup. The game keeps running
/// with the affected feature disabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionSetupError {
    /// No material asset storage, so the default highlight cannot be built.
    MissingHighlightMaterial,
    /// No interaction manager resource, so secondary audio is unavailable.
    MissingInteractionManager,
}

impl fmt::Display for InteractionSetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHighlightMaterial => write!(
                f,
                "Cannot create the default highlight material; objects will not highlight"
            ),
            Self::MissingInteractionManager => write!(
                f,
                "Cannot find an interaction manager; secondary sounds will not play"
            ),
        }
    }
}

impl std::error::Error for InteractionSetupError {}

/// Per-object misconfiguration, logged without functional effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionWarning {
    MissingSecondaryClip { object: String },
    UntexturedRenderer { object: String, renderer: String },
}

impl fmt::Display for InteractionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSecondaryClip { object } => write!(
                f,
                "Interactable '{}' plays a secondary sound on interact, but no clip is assigned",
                object
            ),
            Self::UntexturedRenderer { object, renderer } => write!(
                f,
                "Interactable '{}' has renderer '{}' with no base colour texture; highlight uses the plain template",
                object, renderer
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_object() {
        let warning = InteractionWarning::MissingSecondaryClip {
            object: "Journal Page".to_string(),
        };
        assert!(warning.to_string().contains("'Journal Page'"));

        let warning = InteractionWarning::UntexturedRenderer {
            object: "Crate".to_string(),
            renderer: "Lid".to_string(),
        };
        assert!(warning.to_string().contains("'Lid'"));

        let error: Box<dyn std::error::Error> =
            Box::new(InteractionSetupError::MissingInteractionManager);
        assert!(error.to_string().contains("interaction manager"));
    }
}
