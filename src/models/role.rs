use serde::{Deserialize, Serialize};

/// An isolated authorization domain. Each role carries its own session
/// cookie and its own protected route prefix; a token for one role grants
/// nothing under another role's prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Applicant,
    Recruiter,
    Company,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Applicant, Role::Recruiter, Role::Company];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Applicant => "applicant",
            Role::Recruiter => "recruiter",
            Role::Company => "company",
        }
    }

    pub fn cookie_name(&self) -> &'static str {
        match self {
            Role::Applicant => "ykapptoken",
            Role::Recruiter => "ykrectoken",
            Role::Company => "ykcomtoken",
        }
    }

    pub fn dashboard_prefix(&self) -> &'static str {
        match self {
            Role::Applicant => "/applicant/dashboard",
            Role::Recruiter => "/recruiter/dashboard",
            Role::Company => "/company/dashboard",
        }
    }

    pub fn login_path(&self) -> &'static str {
        match self {
            Role::Applicant => "/applicant/login",
            Role::Recruiter => "/recruiter/login",
            Role::Company => "/company/login",
        }
    }

    /// Whether `path` falls under this role's protected prefix.
    pub fn protects(&self, path: &str) -> bool {
        let prefix = self.dashboard_prefix();
        path == prefix || path.starts_with(&format!("{}/", prefix))
    }
}

impl std::str::FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "applicant" => Ok(Role::Applicant),
            "recruiter" => Ok(Role::Recruiter),
            "company" => Ok(Role::Company),
            _ => Err(()),
        }
    }
}
