//! Role naming heuristic: `"<apps> <category>"`.

/// Used when no application can be resolved for a group.
pub const GENERIC_APPLICATION_LABEL: &str = "Multi-App";

/// Permission-verb category, highest privilege first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RoleCategory {
    /// `Admin` or `Manage` labels.
    Administrator,
    /// `Edit` or `Write` labels.
    Editor,
    /// `View` or `Read` labels.
    Viewer,
    /// No vocabulary match.
    User,
}

/// Ordered vocabulary: the first category whose keywords match wins.
const VOCABULARY: &[(RoleCategory, &[&str])] = &[
    (RoleCategory::Administrator, &["Admin", "Manage"]),
    (RoleCategory::Editor, &["Edit", "Write"]),
    (RoleCategory::Viewer, &["View", "Read"]),
];

impl RoleCategory {
    /// Suffix used in role names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Administrator => "Administrator",
            Self::Editor => "Editor",
            Self::Viewer => "Viewer",
            Self::User => "User",
        }
    }

    /// Category of a single permission label (case-sensitive substring match).
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        VOCABULARY
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| label.contains(k)))
            .map_or(Self::User, |(category, _)| *category)
    }

    /// Highest-privilege category across all labels; `User` when none match.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        labels
            .into_iter()
            .map(|label| Self::from_label(label.as_ref()))
            .min()
            .unwrap_or(Self::User)
    }

    /// Category named by the last word of a role name, if any.
    #[must_use]
    pub fn from_role_name(name: &str) -> Option<Self> {
        let suffix = name.rsplit(' ').next()?;
        [Self::Administrator, Self::Editor, Self::Viewer, Self::User]
            .into_iter()
            .find(|c| c.as_str() == suffix)
    }
}

/// Build a role name from distinct application names and permission labels.
#[must_use]
pub fn role_name(applications: &[String], permission_labels: &[String]) -> String {
    let apps = if applications.is_empty() {
        GENERIC_APPLICATION_LABEL.to_string()
    } else {
        applications.join("/")
    };
    format!(
        "{apps} {}",
        RoleCategory::from_labels(permission_labels).as_str()
    )
}
