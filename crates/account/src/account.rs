use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sprintboard_core::{Aggregate, DomainError, DomainResult, ValueObject, uuid_identifier};
use sprintboard_events::{DomainEvent, EventId, EventSourced};

uuid_identifier!(
    /// Account identifier; displays as `Account-<uuid>`.
    AccountId,
    prefix = "Account"
);

/// Display name of an account holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountName(String);

impl AccountName {
    pub const MAX_LENGTH: usize = 30;

    pub fn of(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::validation("AccountName cannot be empty"));
        }
        if value.chars().count() > Self::MAX_LENGTH {
            return Err(DomainError::validation(format!(
                "AccountName cannot be longer than {} characters",
                Self::MAX_LENGTH
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for AccountName {}

impl TryFrom<String> for AccountName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::of(value)
    }
}

impl From<AccountName> for String {
    fn from(value: AccountName) -> Self {
        value.0
    }
}

impl core::fmt::Display for AccountName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Email address of an account holder, structurally validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountEmail(String);

impl AccountEmail {
    pub fn of(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if !is_structurally_valid_email(&value) {
            return Err(DomainError::validation(format!(
                "invalid AccountEmail: {value}"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Local part, `@`, and a dotted domain; no whitespace anywhere.
fn is_structurally_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.split('.').all(|label| !label.is_empty())
}

impl ValueObject for AccountEmail {}

impl TryFrom<String> for AccountEmail {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::of(value)
    }
}

impl From<AccountEmail> for String {
    fn from(value: AccountEmail) -> Self {
        value.0
    }
}

impl core::fmt::Display for AccountEmail {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountRole {
    Admin,
    Normal,
}

/// Event: AccountCreated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountCreated {
    pub id: EventId,
    pub aggregate_id: AccountId,
    pub name: AccountName,
    pub email: AccountEmail,
    pub role: AccountRole,
    pub sequence_number: u64,
    pub occurred_at: DateTime<Utc>,
}

impl AccountCreated {
    pub fn of(
        aggregate_id: AccountId,
        name: AccountName,
        email: AccountEmail,
        role: AccountRole,
        sequence_number: u64,
    ) -> Self {
        Self {
            id: EventId::generate(),
            aggregate_id,
            name,
            email,
            role,
            sequence_number,
            occurred_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AccountEvent {
    Created(AccountCreated),
}

impl DomainEvent for AccountEvent {
    type AggregateId = AccountId;

    fn id(&self) -> EventId {
        match self {
            AccountEvent::Created(e) => e.id,
        }
    }

    fn aggregate_id(&self) -> &AccountId {
        match self {
            AccountEvent::Created(e) => &e.aggregate_id,
        }
    }

    fn sequence_number(&self) -> u64 {
        match self {
            AccountEvent::Created(e) => e.sequence_number,
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            AccountEvent::Created(e) => e.occurred_at,
        }
    }

    fn event_type(&self) -> &'static str {
        match self {
            AccountEvent::Created(_) => "account.created",
        }
    }

    fn is_created(&self) -> bool {
        matches!(self, AccountEvent::Created(_))
    }
}

/// Aggregate root: Account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    id: AccountId,
    name: AccountName,
    email: AccountEmail,
    role: AccountRole,
    sequence_number: u64,
    version: u64,
}

impl Account {
    /// Create a new account; returns the aggregate and its creation event.
    pub fn create(
        name: AccountName,
        email: AccountEmail,
        role: AccountRole,
    ) -> (Account, AccountEvent) {
        let id = AccountId::generate();
        let sequence_number = 1;
        let account = Account {
            id,
            name: name.clone(),
            email: email.clone(),
            role,
            sequence_number,
            version: 1,
        };
        let event =
            AccountEvent::Created(AccountCreated::of(id, name, email, role, sequence_number));
        (account, event)
    }

    pub fn name(&self) -> &AccountName {
        &self.name
    }

    pub fn email(&self) -> &AccountEmail {
        &self.email
    }

    pub fn role(&self) -> AccountRole {
        self.role
    }

    fn apply_event(self, event: &AccountEvent) -> Account {
        match event {
            AccountEvent::Created(e) => panic!(
                "corrupted journal: AccountCreated mid-stream for {} (seq {})",
                e.aggregate_id, e.sequence_number
            ),
        }
    }
}

impl Aggregate for Account {
    type Id = AccountId;

    fn id(&self) -> &AccountId {
        &self.id
    }

    fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn with_version(self, version: u64) -> Self {
        Account { version, ..self }
    }
}

impl EventSourced for Account {
    type Event = AccountEvent;

    fn replay(events: Vec<AccountEvent>, snapshot: Account) -> Account {
        events
            .into_iter()
            .fold(snapshot, |account, event| account.apply_event(&event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_name() -> AccountName {
        AccountName::of("Kato Hanako").unwrap()
    }

    fn test_email() -> AccountEmail {
        AccountEmail::of("hanako@example.com").unwrap()
    }

    #[test]
    fn create_starts_at_sequence_one_and_version_one() {
        let (account, event) = Account::create(test_name(), test_email(), AccountRole::Normal);

        assert_eq!(account.sequence_number(), 1);
        assert_eq!(account.version(), 1);
        assert_eq!(event.sequence_number(), 1);
        assert!(event.is_created());
        assert_eq!(event.aggregate_id(), account.id());
    }

    #[test]
    fn account_name_bounds() {
        assert!(AccountName::of("").is_err());
        assert!(AccountName::of("a".repeat(30)).is_ok());
        assert!(AccountName::of("a".repeat(31)).is_err());
    }

    #[test]
    fn account_email_rejects_malformed_input() {
        for bad in ["", "no-at-sign", "@example.com", "a@", "a@nodot", "a b@example.com", "a@.com", "a@com."] {
            assert!(AccountEmail::of(bad).is_err(), "accepted {bad:?}");
        }
        assert!(AccountEmail::of("taro.yamada@mail.example.co.jp").is_ok());
    }

    #[test]
    fn replay_with_empty_tail_is_identity() {
        let (account, _) = Account::create(test_name(), test_email(), AccountRole::Admin);
        let replayed = Account::replay(vec![], account.clone());
        assert_eq!(replayed, account);
    }

    #[test]
    #[should_panic(expected = "corrupted journal")]
    fn replaying_a_creation_event_is_fatal() {
        let (account, event) = Account::create(test_name(), test_email(), AccountRole::Normal);
        let _ = Account::replay(vec![event], account);
    }

    #[test]
    fn snapshot_serialization_round_trips() {
        let (account, event) = Account::create(test_name(), test_email(), AccountRole::Normal);

        let json = serde_json::to_string(&account).unwrap();
        let back: Account = serde_json::from_str(&json).unwrap();
        assert_eq!(back, account);

        let json = serde_json::to_string(&event).unwrap();
        let back: AccountEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn tampered_snapshot_fails_to_deserialize() {
        let (account, _) = Account::create(test_name(), test_email(), AccountRole::Normal);
        let json = serde_json::to_string(&account)
            .unwrap()
            .replace("hanako@example.com", "not-an-email");
        assert!(serde_json::from_str::<Account>(&json).is_err());
    }
}
