//! Per-pass accumulation of validated records, grouped by target type.

use crate::error::ProcessingError;
use crate::model::QualifiedName;
use crate::record::AnnotatedRecord;
use std::collections::HashMap;

/// All records targeting one group type, in insertion order.
///
/// Member identifiers are unique; a conflicting record is rejected before
/// insertion. Insertion order drives the branch order of the generated
/// dispatcher, keeping output deterministic across runs.
#[derive(Debug, Clone)]
pub struct Group {
    group_type: QualifiedName,
    members: Vec<AnnotatedRecord>,
    by_identifier: HashMap<String, usize>,
}

impl Group {
    fn new(group_type: QualifiedName) -> Self {
        Self {
            group_type,
            members: Vec::new(),
            by_identifier: HashMap::new(),
        }
    }

    /// Canonical name of the group type.
    #[must_use]
    pub fn group_type(&self) -> &QualifiedName {
        &self.group_type
    }

    /// Members in insertion order.
    #[must_use]
    pub fn members(&self) -> &[AnnotatedRecord] {
        &self.members
    }

    /// Looks up the member registered under an identifier.
    #[must_use]
    pub fn member(&self, identifier: &str) -> Option<&AnnotatedRecord> {
        self.by_identifier
            .get(identifier)
            .map(|&idx| &self.members[idx])
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the group has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn add(&mut self, record: AnnotatedRecord) -> Result<(), ProcessingError> {
        if let Some(&idx) = self.by_identifier.get(record.identifier()) {
            return Err(ProcessingError::DuplicateIdentifier {
                declaration: record.declaration().clone(),
                existing: self.members[idx].declaration().clone(),
                identifier: record.identifier().to_owned(),
                group_type: self.group_type.clone(),
            });
        }
        self.by_identifier
            .insert(record.identifier().to_owned(), self.members.len());
        self.members.push(record);
        Ok(())
    }
}

/// Accumulates records across the discovery rounds of one generation pass.
///
/// Groups are kept in discovery order. The registry lives for exactly one
/// pass: populated round by round, consumed by the emitter, then cleared
/// unconditionally so a later pass never re-emits handled records.
#[derive(Debug, Default)]
pub struct GroupRegistry {
    groups: Vec<Group>,
    by_type: HashMap<QualifiedName, usize>,
}

impl GroupRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record, lazily creating its group.
    ///
    /// # Errors
    ///
    /// [`ProcessingError::DuplicateIdentifier`] when the group already has
    /// a member under the record's identifier; carries both conflicting
    /// declarations. The registry is unchanged on error.
    pub fn add(&mut self, record: AnnotatedRecord) -> Result<(), ProcessingError> {
        let idx = match self.by_type.get(record.group_type()) {
            Some(&idx) => idx,
            None => {
                let idx = self.groups.len();
                self.by_type.insert(record.group_type().clone(), idx);
                self.groups.push(Group::new(record.group_type().clone()));
                idx
            }
        };
        self.groups[idx].add(record)
    }

    /// All groups in discovery order.
    #[must_use]
    pub fn all_groups(&self) -> &[Group] {
        &self.groups
    }

    /// Looks up a group by its type name.
    #[must_use]
    pub fn group(&self, group_type: &QualifiedName) -> Option<&Group> {
        self.by_type.get(group_type).map(|&idx| &self.groups[idx])
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no group has been created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Drops all accumulated state.
    pub fn clear(&mut self) {
        self.groups.clear();
        self.by_type.clear();
    }
}
