use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Topic a contact-form submission is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContactSubject {
    Membership,
    Partnership,
    Products,
    Training,
    General,
}

impl ContactSubject {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Membership => "membership",
            Self::Partnership => "partnership",
            Self::Products => "products",
            Self::Training => "training",
            Self::General => "general",
        }
    }
}

impl FromStr for ContactSubject {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "membership" => Ok(Self::Membership),
            "partnership" => Ok(Self::Partnership),
            "products" => Ok(Self::Products),
            "training" => Ok(Self::Training),
            "general" => Ok(Self::General),
            other => Err(format!("{} is not a valid contact subject", other)),
        }
    }
}

/// Training courses offered by the cooperative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CourseName {
    OrchardEstablishment,
    GraftingTechniques,
    PestManagement,
    PostHarvestHandling,
    QualityGrading,
    FarmBusiness,
}

impl CourseName {
    pub fn as_str(&self) -> &str {
        match self {
            Self::OrchardEstablishment => "orchard-establishment",
            Self::GraftingTechniques => "grafting-techniques",
            Self::PestManagement => "pest-management",
            Self::PostHarvestHandling => "post-harvest-handling",
            Self::QualityGrading => "quality-grading",
            Self::FarmBusiness => "farm-business",
        }
    }

    /// Human-readable title for email bodies
    pub fn title(&self) -> &str {
        match self {
            Self::OrchardEstablishment => "Orchard Establishment",
            Self::GraftingTechniques => "Grafting Techniques",
            Self::PestManagement => "Pest & Disease Management",
            Self::PostHarvestHandling => "Post-Harvest Handling",
            Self::QualityGrading => "Quality Grading & Standards",
            Self::FarmBusiness => "Farm Business Management",
        }
    }
}

impl FromStr for CourseName {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "orchard-establishment" => Ok(Self::OrchardEstablishment),
            "grafting-techniques" => Ok(Self::GraftingTechniques),
            "pest-management" => Ok(Self::PestManagement),
            "post-harvest-handling" => Ok(Self::PostHarvestHandling),
            "quality-grading" => Ok(Self::QualityGrading),
            "farm-business" => Ok(Self::FarmBusiness),
            other => Err(format!("{} is not a valid course", other)),
        }
    }
}

/// Self-reported farming experience of a registrant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FarmingExperience {
    None,
    Beginner,
    Intermediate,
    Advanced,
}

impl FarmingExperience {
    pub fn as_str(&self) -> &str {
        match self {
            Self::None => "none",
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl FromStr for FarmingExperience {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "none" => Ok(Self::None),
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(format!("{} is not a valid experience level", other)),
        }
    }
}

/// Where a newsletter subscription came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubscriberSource {
    #[default]
    Website,
    Contact,
    Manual,
    Event,
    Course,
}

impl SubscriberSource {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Website => "website",
            Self::Contact => "contact",
            Self::Manual => "manual",
            Self::Event => "event",
            Self::Course => "course",
        }
    }
}

impl FromStr for SubscriberSource {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "website" => Ok(Self::Website),
            "contact" => Ok(Self::Contact),
            "manual" => Ok(Self::Manual),
            "event" => Ok(Self::Event),
            "course" => Ok(Self::Course),
            other => Err(format!("{} is not a valid subscriber source", other)),
        }
    }
}

/// Triage state of a contact submission, managed by administrators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubmissionStatus {
    New,
    InProgress,
    Resolved,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::New => "new",
            Self::InProgress => "in-progress",
            Self::Resolved => "resolved",
        }
    }
}

impl FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "new" => Ok(Self::New),
            "in-progress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            other => Err(format!("{} is not a valid submission status", other)),
        }
    }
}

/// Lifecycle of a course registration, from intake to completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegistrationStatus {
    Pending,
    PaymentVerified,
    Approved,
    Confirmed,
    Completed,
    Cancelled,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::PaymentVerified => "payment-verified",
            Self::Approved => "approved",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for RegistrationStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "payment-verified" => Ok(Self::PaymentVerified),
            "approved" => Ok(Self::Approved),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("{} is not a valid registration status", other)),
        }
    }
}

/// Delivery state of a newsletter subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubscriberStatus {
    Active,
    Unsubscribed,
    Bounced,
}

impl SubscriberStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Unsubscribed => "unsubscribed",
            Self::Bounced => "bounced",
        }
    }
}

impl FromStr for SubscriberStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "unsubscribed" => Ok(Self::Unsubscribed),
            "bounced" => Ok(Self::Bounced),
            other => Err(format!("{} is not a valid subscriber status", other)),
        }
    }
}

impl fmt::Display for CourseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
