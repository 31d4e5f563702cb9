use serde::{Deserialize, Serialize};

/// Kind of planogram deviation found during a shelf audit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanogramErrorType {
    /// Slot matches the planogram
    None,
    Misplaced,
    Empty,
    #[serde(rename = "Wrong Label", alias = "WrongLabel")]
    WrongLabel,
}

impl PlanogramErrorType {
    /// Label as written in audit exports
    pub fn display_name(&self) -> &'static str {
        match self {
            PlanogramErrorType::None => "None",
            PlanogramErrorType::Misplaced => "Misplaced",
            PlanogramErrorType::Empty => "Empty",
            PlanogramErrorType::WrongLabel => "Wrong Label",
        }
    }

    /// Every deviation kind, excluding `None`
    pub fn errors() -> Vec<PlanogramErrorType> {
        vec![
            PlanogramErrorType::Misplaced,
            PlanogramErrorType::Empty,
            PlanogramErrorType::WrongLabel,
        ]
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, PlanogramErrorType::None)
    }
}

impl std::fmt::Display for PlanogramErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
