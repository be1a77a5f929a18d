/// Completion signal of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Records were processed.
    Succeeded(String),
    /// Handled failure; already logged and reported as a plain `false`, so the
    /// trigger platform does not redrive the batch.
    Recovered(String),
    /// Hard fault surfaced to the runtime's failure channel.
    Fault(String),
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Succeeded(_) => "succeeded",
            Outcome::Recovered(_) => "recovered",
            Outcome::Fault(_) => "fault",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Outcome::Succeeded(message) | Outcome::Recovered(message) | Outcome::Fault(message) => message,
        }
    }

    pub fn is_fault(&self) -> bool {
        matches!(self, Outcome::Fault(_))
    }
}
