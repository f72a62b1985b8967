//! Injected data context shared by both engines for one ingestion.
//!
//! A context is built once per ingestion event and replaced wholesale on the
//! next one; nothing in the engines holds on to it between runs.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::entity::{Application, Assignment, OrganizationalUnit, Permission, Subject};

/// Id lookups used by the engines. "Not found" is `None`, never an error.
pub trait EntityResolver {
    /// Subject by id.
    fn subject(&self, id: &str) -> Option<&Subject>;
    /// Permission by id.
    fn permission(&self, id: &str) -> Option<&Permission>;
    /// Application by id.
    fn application(&self, id: &str) -> Option<&Application>;
    /// Organizational unit by id.
    fn org_unit(&self, id: &str) -> Option<&OrganizationalUnit>;

    /// Owning application of a permission, if both resolve.
    fn permission_application(&self, permission: &Permission) -> Option<&Application> {
        permission
            .application_id
            .as_deref()
            .and_then(|id| self.application(id))
    }
}

/// Counts of ingested collections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSummary {
    /// Subjects.
    pub subject_count: usize,
    /// Organizational units.
    pub org_unit_count: usize,
    /// Applications.
    pub application_count: usize,
    /// Permissions.
    pub permission_count: usize,
    /// Aggregated assignments.
    pub assignment_count: usize,
}

/// One raw `(subject, permission)` grant as it appears in an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRow {
    /// Granted subject id.
    pub subject_id: String,
    /// Granted permission id.
    pub permission_id: String,
}

/// Serialized ingestion document (already parsed collections).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    /// People.
    pub subjects: Vec<Subject>,
    /// Organizational units.
    pub org_units: Vec<OrganizationalUnit>,
    /// Applications.
    pub applications: Vec<Application>,
    /// Permissions.
    pub permissions: Vec<Permission>,
    /// Raw grant rows.
    pub assignments: Vec<AssignmentRow>,
}

impl Dataset {
    /// Aggregate raw grant rows into one assignment per subject.
    ///
    /// Subjects keep the order of their first grant. Rows naming a subject
    /// that is not in the subject table are dropped.
    #[must_use]
    pub fn into_context(self) -> DataContext {
        let known: BTreeSet<&str> = self.subjects.iter().map(|s| s.id.as_str()).collect();
        let mut order: Vec<String> = Vec::new();
        let mut grants: HashMap<String, BTreeSet<String>> = HashMap::new();
        for row in &self.assignments {
            if !known.contains(row.subject_id.as_str()) {
                continue;
            }
            let entry = grants.entry(row.subject_id.clone()).or_insert_with(|| {
                order.push(row.subject_id.clone());
                BTreeSet::new()
            });
            entry.insert(row.permission_id.clone());
        }
        let assignments = order
            .into_iter()
            .map(|subject_id| {
                let permission_ids = grants.remove(&subject_id).unwrap_or_default();
                Assignment {
                    subject_id,
                    permission_ids,
                }
            })
            .collect();
        DataContext::new(
            self.subjects,
            self.org_units,
            self.applications,
            self.permissions,
            assignments,
        )
    }
}

/// Owned, indexed view over one ingestion.
#[derive(Debug, Clone, Default)]
pub struct DataContext {
    subjects: HashMap<String, Subject>,
    org_units: HashMap<String, OrganizationalUnit>,
    applications: HashMap<String, Application>,
    permissions: HashMap<String, Permission>,
    assignments: Vec<Assignment>,
}

impl DataContext {
    /// Index the collections. Repeated assignments for one subject are merged
    /// into its first record so each subject appears at most once.
    #[must_use]
    pub fn new(
        subjects: Vec<Subject>,
        org_units: Vec<OrganizationalUnit>,
        applications: Vec<Application>,
        permissions: Vec<Permission>,
        assignments: Vec<Assignment>,
    ) -> Self {
        let mut merged: Vec<Assignment> = Vec::with_capacity(assignments.len());
        let mut position: HashMap<String, usize> = HashMap::new();
        for assignment in assignments {
            if let Some(&idx) = position.get(&assignment.subject_id) {
                if let Some(existing) = merged.get_mut(idx) {
                    existing.permission_ids.extend(assignment.permission_ids);
                }
                continue;
            }
            position.insert(assignment.subject_id.clone(), merged.len());
            merged.push(assignment);
        }
        Self {
            subjects: subjects.into_iter().map(|s| (s.id.clone(), s)).collect(),
            org_units: org_units.into_iter().map(|o| (o.id.clone(), o)).collect(),
            applications: applications
                .into_iter()
                .map(|a| (a.id.clone(), a))
                .collect(),
            permissions: permissions
                .into_iter()
                .map(|p| (p.id.clone(), p))
                .collect(),
            assignments: merged,
        }
    }

    /// Assignments in ingestion order.
    #[must_use]
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Applications sorted by name (metadata listing).
    #[must_use]
    pub fn applications(&self) -> Vec<&Application> {
        let mut apps: Vec<&Application> = self.applications.values().collect();
        apps.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        apps
    }

    /// Organizational units sorted by name (metadata listing).
    #[must_use]
    pub fn org_units(&self) -> Vec<&OrganizationalUnit> {
        let mut units: Vec<&OrganizationalUnit> = self.org_units.values().collect();
        units.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        units
    }

    /// Collection counts.
    #[must_use]
    pub fn summary(&self) -> DataSummary {
        DataSummary {
            subject_count: self.subjects.len(),
            org_unit_count: self.org_units.len(),
            application_count: self.applications.len(),
            permission_count: self.permissions.len(),
            assignment_count: self.assignments.len(),
        }
    }

    /// Enough data to mine: subjects, permissions and assignments all present.
    #[must_use]
    pub fn is_minable(&self) -> bool {
        !self.subjects.is_empty() && !self.permissions.is_empty() && !self.assignments.is_empty()
    }
}

impl EntityResolver for DataContext {
    fn subject(&self, id: &str) -> Option<&Subject> {
        self.subjects.get(id)
    }

    fn permission(&self, id: &str) -> Option<&Permission> {
        self.permissions.get(id)
    }

    fn application(&self, id: &str) -> Option<&Application> {
        self.applications.get(id)
    }

    fn org_unit(&self, id: &str) -> Option<&OrganizationalUnit> {
        self.org_units.get(id)
    }
}
