//! A role-tagged project participant.

use serde::{Deserialize, Serialize};

use sprintboard_account::AccountId;
use sprintboard_core::Entity;

use crate::ids::MemberId;

/// Role of a member within a project.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberRole {
    Lead,
    Admin,
    Normal,
    Readonly,
}

/// A project member.
///
/// Within a project a member is uniquely identified by the account it
/// represents, so equality is on `account_id` alone; the `MemberId` is the
/// membership record's own identity.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Member {
    id: MemberId,
    account_id: AccountId,
    role: MemberRole,
}

impl Member {
    pub fn of(id: MemberId, account_id: AccountId, role: MemberRole) -> Self {
        Self {
            id,
            account_id,
            role,
        }
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    pub fn role(&self) -> MemberRole {
        self.role
    }

    pub fn is_lead(&self) -> bool {
        self.role == MemberRole::Lead
    }

    pub fn is_admin(&self) -> bool {
        self.role == MemberRole::Admin
    }

    pub fn is_normal(&self) -> bool {
        self.role == MemberRole::Normal
    }

    pub fn is_readonly(&self) -> bool {
        self.role == MemberRole::Readonly
    }

    pub fn with_role(&self, role: MemberRole) -> Member {
        Member {
            role,
            ..self.clone()
        }
    }
}

impl PartialEq for Member {
    fn eq(&self, other: &Self) -> bool {
        self.account_id == other.account_id
    }
}

impl Entity for Member {
    type Id = MemberId;

    fn id(&self) -> &MemberId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_on_account_id_only() {
        let account_id = AccountId::generate();
        let a = Member::of(MemberId::generate(), account_id, MemberRole::Lead);
        let b = Member::of(MemberId::generate(), account_id, MemberRole::Readonly);
        let c = Member::of(MemberId::generate(), AccountId::generate(), MemberRole::Lead);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn with_role_keeps_identity() {
        let member = Member::of(MemberId::generate(), AccountId::generate(), MemberRole::Normal);
        let promoted = member.with_role(MemberRole::Admin);

        assert_eq!(promoted.id(), member.id());
        assert_eq!(promoted.account_id(), member.account_id());
        assert!(promoted.is_admin());
        assert!(!member.is_admin());
    }
}
