use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Title,
    Location,
    HasCompanyLogo,
    CompanyProfile,
    Description,
    Requirements,
    Benefits,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Checkbox,
}

impl FormField {
    /// Fields in the order the form presents them.
    pub const ALL: [FormField; 7] = [
        FormField::Title,
        FormField::Location,
        FormField::HasCompanyLogo,
        FormField::CompanyProfile,
        FormField::Description,
        FormField::Requirements,
        FormField::Benefits,
    ];

    pub const REQUIRED_TEXT: [FormField; 6] = [
        FormField::Title,
        FormField::Location,
        FormField::CompanyProfile,
        FormField::Description,
        FormField::Requirements,
        FormField::Benefits,
    ];

    pub fn kind(self) -> FieldKind {
        match self {
            FormField::HasCompanyLogo => FieldKind::Checkbox,
            _ => FieldKind::Text,
        }
    }

    /// Name used on the wire and in `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Location => "location",
            FormField::HasCompanyLogo => "has_company_logo",
            FormField::CompanyProfile => "company_profile",
            FormField::Description => "description",
            FormField::Requirements => "requirements",
            FormField::Benefits => "benefits",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Job Title",
            FormField::Location => "Location",
            FormField::HasCompanyLogo => "Company has a logo",
            FormField::CompanyProfile => "Company Profile",
            FormField::Description => "Job Description",
            FormField::Requirements => "Requirements",
            FormField::Benefits => "Benefits",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Title => "e.g., Senior Software Engineer",
            FormField::Location => "e.g., New York, NY, USA",
            FormField::HasCompanyLogo => "",
            FormField::CompanyProfile => {
                "Describe the company, its mission, and what it does..."
            }
            FormField::Description => {
                "Describe the role, responsibilities, and what the job entails..."
            }
            FormField::Requirements => {
                "List the required skills, qualifications, and experience..."
            }
            FormField::Benefits => "List the benefits offered (health insurance, PTO, etc.)...",
        }
    }

    /// Visible rows for multi-line inputs; `None` for single-line ones.
    pub fn rows(self) -> Option<usize> {
        match self {
            FormField::CompanyProfile | FormField::Requirements => Some(4),
            FormField::Description => Some(5),
            FormField::Benefits => Some(3),
            FormField::Title | FormField::Location | FormField::HasCompanyLogo => None,
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown form field '{0}'")]
pub struct UnknownFieldError(pub String);

impl FromStr for FormField {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(FormField::Title),
            "location" => Ok(FormField::Location),
            "has_company_logo" | "hasCompanyLogo" => Ok(FormField::HasCompanyLogo),
            "company_profile" | "companyProfile" => Ok(FormField::CompanyProfile),
            "description" => Ok(FormField::Description),
            "requirements" => Ok(FormField::Requirements),
            "benefits" => Ok(FormField::Benefits),
            other => Err(UnknownFieldError(other.to_string())),
        }
    }
}

/// Job-posting values being edited. Text is kept exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRecord {
    pub title: String,
    pub location: String,
    pub company_profile: String,
    pub description: String,
    pub requirements: String,
    pub benefits: String,
    pub has_company_logo: bool,
}

impl Default for FormRecord {
    fn default() -> Self {
        Self {
            title: String::new(),
            location: String::new(),
            company_profile: String::new(),
            description: String::new(),
            requirements: String::new(),
            benefits: String::new(),
            has_company_logo: true,
        }
    }
}

impl FormRecord {
    /// Text value of `field`, or `None` for the checkbox.
    pub fn text(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::Title => Some(&self.title),
            FormField::Location => Some(&self.location),
            FormField::CompanyProfile => Some(&self.company_profile),
            FormField::Description => Some(&self.description),
            FormField::Requirements => Some(&self.requirements),
            FormField::Benefits => Some(&self.benefits),
            FormField::HasCompanyLogo => None,
        }
    }

    pub fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Title => Some(&mut self.title),
            FormField::Location => Some(&mut self.location),
            FormField::CompanyProfile => Some(&mut self.company_profile),
            FormField::Description => Some(&mut self.description),
            FormField::Requirements => Some(&mut self.requirements),
            FormField::Benefits => Some(&mut self.benefits),
            FormField::HasCompanyLogo => None,
        }
    }

    /// Required text fields that are still empty, in form order.
    pub fn missing_required(&self) -> Vec<FormField> {
        FormField::REQUIRED_TEXT
            .into_iter()
            .filter(|field| self.text(*field).is_some_and(str::is_empty))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_required().is_empty()
    }
}

/// Confidence category reported by the classifier. Unrecognized labels are
/// kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConfidenceLevel {
    VeryHigh,
    High,
    Medium,
    Low,
    Other(String),
}

impl ConfidenceLevel {
    pub fn as_str(&self) -> &str {
        match self {
            ConfidenceLevel::VeryHigh => "Very High",
            ConfidenceLevel::High => "High",
            ConfidenceLevel::Medium => "Medium",
            ConfidenceLevel::Low => "Low",
            ConfidenceLevel::Other(label) => label,
        }
    }
}

impl From<String> for ConfidenceLevel {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Very High" => ConfidenceLevel::VeryHigh,
            "High" => ConfidenceLevel::High,
            "Medium" => ConfidenceLevel::Medium,
            "Low" => ConfidenceLevel::Low,
            _ => ConfidenceLevel::Other(value),
        }
    }
}

impl From<ConfidenceLevel> for String {
    fn from(value: ConfidenceLevel) -> Self {
        match value {
            ConfidenceLevel::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    LikelyLegitimate,
    PotentiallyFraudulent,
}

impl Verdict {
    pub fn from_is_fake(is_fake: bool) -> Self {
        if is_fake {
            Verdict::PotentiallyFraudulent
        } else {
            Verdict::LikelyLegitimate
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Verdict::LikelyLegitimate => "Likely Legitimate",
            Verdict::PotentiallyFraudulent => "Potentially Fraudulent",
        }
    }
}
