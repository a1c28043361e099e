//! The invariant-checked member collection of a project.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use sprintboard_account::AccountId;
use sprintboard_core::{DomainError, DomainResult, Entity};

use crate::ids::MemberId;
use crate::member::{Member, MemberRole};

/// Members of a project, keyed by account.
///
/// Invariants, re-checked on every mutation and on deserialization:
/// - never empty
/// - exactly one member has the `Lead` role
///
/// Every mutating operation returns a new collection; nothing mutates in
/// place. A mutation that would break an invariant (a second lead, losing
/// the lead) fails instead of constructing the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Member>", into = "Vec<Member>")]
pub struct Members {
    values: HashMap<AccountId, Member>,
}

impl Members {
    /// Sole construction gate; enforces the collection invariants.
    fn validated(values: HashMap<AccountId, Member>) -> DomainResult<Members> {
        if values.is_empty() {
            return Err(DomainError::invariant("Members must not be empty"));
        }
        let lead_count = values.values().filter(|m| m.is_lead()).count();
        if lead_count != 1 {
            return Err(DomainError::invariant(format!(
                "Members must have exactly one lead, found {lead_count}"
            )));
        }
        Ok(Members { values })
    }

    /// Singleton collection with `account_id` as the lead.
    pub fn of_single(account_id: AccountId) -> Members {
        let member = Member::of(MemberId::generate(), account_id, MemberRole::Lead);
        Members {
            values: HashMap::from([(account_id, member)]),
        }
    }

    /// Validated bulk constructor. Later entries win on duplicate accounts.
    pub fn from_vec(members: Vec<Member>) -> DomainResult<Members> {
        Self::validated(members.into_iter().map(|m| (m.account_id(), m)).collect())
    }

    /// Insert (or overwrite by account) a member.
    pub fn add_member(&self, member: Member) -> DomainResult<Members> {
        let mut values = self.values.clone();
        values.insert(member.account_id(), member);
        Self::validated(values)
    }

    /// Remove the member representing `account_id`.
    ///
    /// Fails with `NotFound` for an unknown account, and with an invariant
    /// violation when removal would leave the project without its lead.
    pub fn remove_member_by_account_id(
        &self,
        account_id: &AccountId,
    ) -> DomainResult<(Members, Member)> {
        let mut values = self.values.clone();
        let removed = values.remove(account_id).ok_or_else(|| {
            DomainError::not_found(format!("no member for account {account_id}"))
        })?;
        Ok((Self::validated(values)?, removed))
    }

    /// Replace the role of the member representing `account_id`.
    pub fn change_role(
        &self,
        account_id: &AccountId,
        role: MemberRole,
    ) -> DomainResult<(Members, Member)> {
        let member = self.values.get(account_id).ok_or_else(|| {
            DomainError::not_found(format!("no member for account {account_id}"))
        })?;
        let changed = member.with_role(role);
        let mut values = self.values.clone();
        values.insert(*account_id, changed.clone());
        Ok((Self::validated(values)?, changed))
    }

    pub fn find_by_account_id(&self, account_id: &AccountId) -> Option<&Member> {
        self.values.get(account_id)
    }

    pub fn find_by_id(&self, member_id: &MemberId) -> Option<&Member> {
        self.values.values().find(|m| m.id() == member_id)
    }

    pub fn contains_by_account_id(&self, account_id: &AccountId) -> bool {
        self.values.contains_key(account_id)
    }

    pub fn is_lead(&self, account_id: &AccountId) -> bool {
        self.values.get(account_id).is_some_and(Member::is_lead)
    }

    /// The lead member; the construction invariant keeps this at exactly one.
    pub fn lead(&self) -> Option<&Member> {
        self.values.values().find(|m| m.is_lead())
    }

    pub fn is_admin(&self, account_id: &AccountId) -> bool {
        self.values.get(account_id).is_some_and(Member::is_admin)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: the construction invariant forbids an empty collection.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn to_vec(&self) -> Vec<Member> {
        self.values.values().cloned().collect()
    }
}

impl TryFrom<Vec<Member>> for Members {
    type Error = DomainError;

    fn try_from(values: Vec<Member>) -> Result<Self, Self::Error> {
        Self::from_vec(values)
    }
}

impl From<Members> for Vec<Member> {
    fn from(members: Members) -> Self {
        members.to_vec()
    }
}
