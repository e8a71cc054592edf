use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{name} must be within {range}, got {value}")]
    OutOfRange {
        name: &'static str,
        range: &'static str,
        value: String,
    },

    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// The four free-text fields the chain is built from.
///
/// Fields are stored trimmed and can only be set through [`InputBundle::new`],
/// so a constructed bundle always holds four non-empty values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBundle {
    job_title: String,
    interviewer_title: String,
    job_description: String,
    resume: String,
}

impl InputBundle {
    pub fn new(
        job_title: &str,
        interviewer_title: &str,
        job_description: &str,
        resume: &str,
    ) -> Result<Self, InputError> {
        Ok(Self {
            job_title: required("job title", job_title)?,
            interviewer_title: required("interviewer title", interviewer_title)?,
            job_description: required("job description", job_description)?,
            resume: required("resume", resume)?,
        })
    }

    pub fn job_title(&self) -> &str {
        &self.job_title
    }

    pub fn interviewer_title(&self) -> &str {
        &self.interviewer_title
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn resume(&self) -> &str {
        &self.resume
    }
}

fn required(name: &'static str, value: &str) -> Result<String, InputError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(InputError::MissingField(name));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_every_field() {
        let input = InputBundle::new(
            "  Security Operations Analyst ",
            "Hiring Manager\n",
            "\tMonitor SIEM alerts...",
            "2 years SOC Tier 1/2...  ",
        )
        .unwrap();

        assert_eq!(input.job_title(), "Security Operations Analyst");
        assert_eq!(input.interviewer_title(), "Hiring Manager");
        assert_eq!(input.job_description(), "Monitor SIEM alerts...");
        assert_eq!(input.resume(), "2 years SOC Tier 1/2...");
    }

    #[test]
    fn test_whitespace_only_field_is_rejected() {
        let err = InputBundle::new("Analyst", "   ", "JD", "Resume").unwrap_err();
        assert!(matches!(err, InputError::MissingField("interviewer title")));
    }

    #[test]
    fn test_first_missing_field_is_reported() {
        let err = InputBundle::new("", "", "", "").unwrap_err();
        assert_eq!(err.to_string(), "job title is required");
    }
}
