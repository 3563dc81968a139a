//! Catalogue of the Pipedrive v1 collections this client knows by name.
//!
//! The list is advisory. Client operations take any `AsRef<str>`, so a
//! collection missing here can still be requested by its path segment.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A known Pipedrive resource collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Activities,
    ActivityFields,
    ActivityTypes,
    CallLogs,
    Currencies,
    Deals,
    DealFields,
    Files,
    Filters,
    GlobalMessages,
    Leads,
    Notes,
    NoteFields,
    OrganizationFields,
    Organizations,
    OrganizationRelationships,
    PermissionSets,
    Persons,
    PersonFields,
    Pipelines,
    Products,
    ProductFields,
    Roles,
    Stages,
    Teams,
    Users,
    UserConnections,
    Webhooks,
}

impl Resource {
    pub const ALL: [Resource; 28] = [
        Resource::Activities,
        Resource::ActivityFields,
        Resource::ActivityTypes,
        Resource::CallLogs,
        Resource::Currencies,
        Resource::Deals,
        Resource::DealFields,
        Resource::Files,
        Resource::Filters,
        Resource::GlobalMessages,
        Resource::Leads,
        Resource::Notes,
        Resource::NoteFields,
        Resource::OrganizationFields,
        Resource::Organizations,
        Resource::OrganizationRelationships,
        Resource::PermissionSets,
        Resource::Persons,
        Resource::PersonFields,
        Resource::Pipelines,
        Resource::Products,
        Resource::ProductFields,
        Resource::Roles,
        Resource::Stages,
        Resource::Teams,
        Resource::Users,
        Resource::UserConnections,
        Resource::Webhooks,
    ];

    /// The URL path segment, e.g. `"activityFields"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Activities => "activities",
            Resource::ActivityFields => "activityFields",
            Resource::ActivityTypes => "activityTypes",
            Resource::CallLogs => "callLogs",
            Resource::Currencies => "currencies",
            Resource::Deals => "deals",
            Resource::DealFields => "dealFields",
            Resource::Files => "files",
            Resource::Filters => "filters",
            Resource::GlobalMessages => "globalMessages",
            Resource::Leads => "leads",
            Resource::Notes => "notes",
            Resource::NoteFields => "noteFields",
            Resource::OrganizationFields => "organizationFields",
            Resource::Organizations => "organizations",
            Resource::OrganizationRelationships => "organizationRelationships",
            Resource::PermissionSets => "permissionSets",
            Resource::Persons => "persons",
            Resource::PersonFields => "personFields",
            Resource::Pipelines => "pipelines",
            Resource::Products => "products",
            Resource::ProductFields => "productFields",
            Resource::Roles => "roles",
            Resource::Stages => "stages",
            Resource::Teams => "teams",
            Resource::Users => "users",
            Resource::UserConnections => "userConnections",
            Resource::Webhooks => "webhooks",
        }
    }
}

impl AsRef<str> for Resource {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown Pipedrive resource: {0}")]
pub struct UnknownResource(pub String);

impl FromStr for Resource {
    type Err = UnknownResource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownResource(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for resource in Resource::ALL {
            assert_eq!(resource.as_str().parse::<Resource>(), Ok(resource));
        }
    }

    #[test]
    fn names_are_camel_case_path_segments() {
        assert_eq!(Resource::OrganizationRelationships.as_str(), "organizationRelationships");
        assert_eq!(Resource::CallLogs.to_string(), "callLogs");
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = "opportunities".parse::<Resource>().unwrap_err();
        assert_eq!(err, UnknownResource("opportunities".to_string()));
    }
}
