use crate::{Denial, PolicySet, Principal, TablePolicy};

use std::{borrow::Cow, sync::Arc, time::Duration};
use tokio_util::sync::CancellationToken;
use trellis_core::{
    schema::{app::Operation, db::View},
    stmt::Record,
};

/// Applies a [`PolicySet`] to requests.
///
/// The enforcer never touches storage. Reads take the candidate rows and
/// return what the principal may see; writes take the payload and return
/// what may be applied, or a [`Denial`] when nothing may be.
#[derive(Debug, Clone)]
pub struct Enforcer {
    policies: Arc<PolicySet>,
}

/// Rows visible to the principal, with the fields it may not read removed.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadResult {
    pub records: Vec<Record>,

    /// Fields removed from at least one row, in the order first removed
    pub stripped_fields: Vec<String>,
}

/// A bulk write. Updates and deletes carry the current row, or `None` when
/// the requested record does not exist.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOp {
    Create(Vec<Record>),
    Update(Vec<(Option<Record>, Record)>),
    Delete(Vec<Option<Record>>),
}

enum BatchItem {
    Create(Record),
    Update(Option<Record>, Record),
    Delete(Option<Record>),
}

impl Enforcer {
    pub fn new(policies: Arc<PolicySet>) -> Enforcer {
        Enforcer { policies }
    }

    pub fn policies(&self) -> &Arc<PolicySet> {
        &self.policies
    }

    /// Filters `records` of `table` down to the rows the principal may read.
    pub fn read(
        &self,
        principal: Option<&Principal>,
        table: &str,
        records: impl IntoIterator<Item = Record>,
    ) -> Result<ReadResult, Denial> {
        let principal = self.authenticate(principal)?;
        let policy = self.policy(table)?;
        self.read_rows(&principal, policy, records, None)
    }

    /// Reads through a view: the view's filter and order apply first, then
    /// row and field rules, which see every column of the row even when the
    /// view projects some of them away.
    pub fn read_view(
        &self,
        principal: Option<&Principal>,
        view: &str,
        records: impl IntoIterator<Item = Record>,
    ) -> Result<ReadResult, Denial> {
        let principal = self.authenticate(principal)?;

        let view = self
            .policies
            .schema()
            .view(view)
            .ok_or_else(Denial::not_found)?;
        let policy = self
            .policies
            .table_by_id(view.table)
            .ok_or_else(Denial::not_found)?;

        let rows = view.select(records).map_err(|err| Denial::from_error(&err))?;
        self.read_rows(&principal, policy, rows, Some(view))
    }

    /// Reads one record requested by identifier.
    ///
    /// A record that does not exist and a record the principal may not read
    /// produce the same denial.
    pub fn read_one(
        &self,
        principal: Option<&Principal>,
        table: &str,
        record: Option<Record>,
    ) -> Result<Record, Denial> {
        let principal = self.authenticate(principal)?;
        let policy = self.policy(table)?;
        let record = self.readable(&principal, policy, record)?;

        let mut result = self.read_rows(&principal, policy, [record], None)?;
        result.records.pop().ok_or_else(Denial::not_found)
    }

    /// Checks a create. Returns the payload to insert, without read-only
    /// columns.
    pub fn authorize_create(
        &self,
        principal: Option<&Principal>,
        table: &str,
        payload: Record,
    ) -> Result<Record, Denial> {
        let principal = self.authenticate(principal)?;
        let policy = self.policy(table)?;
        self.create_as(&principal, policy, payload)
    }

    /// Checks an update of `existing`. Returns the patch to apply.
    pub fn authorize_update(
        &self,
        principal: Option<&Principal>,
        table: &str,
        existing: Option<&Record>,
        patch: Record,
    ) -> Result<Record, Denial> {
        let principal = self.authenticate(principal)?;
        let policy = self.policy(table)?;
        self.update_as(&principal, policy, existing.cloned(), patch)
    }

    pub fn authorize_delete(
        &self,
        principal: Option<&Principal>,
        table: &str,
        existing: Option<&Record>,
    ) -> Result<(), Denial> {
        let principal = self.authenticate(principal)?;
        let policy = self.policy(table)?;
        self.delete_as(&principal, policy, existing.cloned()).map(drop)
    }

    /// Checks every item of a bulk write before any of it is applied. One
    /// failing item rejects the whole batch.
    ///
    /// Returns the payloads to insert or apply, or for deletes the rows to
    /// remove, in batch order.
    pub fn authorize_batch(
        &self,
        principal: Option<&Principal>,
        table: &str,
        op: BatchOp,
    ) -> Result<Vec<Record>, Denial> {
        let principal = self.authenticate(principal)?;
        let policy = self.policy(table)?;

        op.into_items()
            .into_iter()
            .enumerate()
            .map(|(index, item)| self.batch_item(&principal, policy, index, item))
            .collect()
    }

    /// [`authorize_batch`](Self::authorize_batch) bounded by a deadline and
    /// a cancellation token. Running out of time or being cancelled denies
    /// the whole batch.
    pub async fn authorize_batch_within(
        &self,
        principal: Option<&Principal>,
        table: &str,
        op: BatchOp,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<Vec<Record>, Denial> {
        let principal = self.authenticate(principal)?;
        let policy = self.policy(table)?;

        let deadline = tokio::time::Instant::now() + timeout;
        let timed_out = || {
            tracing::warn!(table = %policy.name, ?timeout, "batch authorization timed out");
            Denial::forbidden("authorization timed out")
        };

        let check = async {
            let items = op.into_items();
            let mut authorized = Vec::with_capacity(items.len());

            for (index, item) in items.into_iter().enumerate() {
                if tokio::time::Instant::now() >= deadline {
                    return Err(timed_out());
                }

                authorized.push(self.batch_item(&principal, policy, index, item)?);
                tokio::task::yield_now().await;
            }

            Ok::<_, Denial>(authorized)
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::warn!(table = %policy.name, "batch authorization cancelled");
                Err(Denial::forbidden("request cancelled before authorization completed"))
            }
            result = tokio::time::timeout_at(deadline, check) => {
                result.unwrap_or_else(|_| Err(timed_out()))
            }
        }
    }

    fn authenticate<'a>(
        &self,
        principal: Option<&'a Principal>,
    ) -> Result<Cow<'a, Principal>, Denial> {
        let Some(principal) = principal else {
            return Err(Denial::unauthorized());
        };

        if principal.banned {
            tracing::warn!(principal = %principal.id, "banned principal denied");
            return Err(Denial::forbidden("account is banned"));
        }

        Ok(self.policies.roles().resolve(principal))
    }

    fn policy(&self, table: &str) -> Result<&TablePolicy, Denial> {
        self.policies.table(table).ok_or_else(Denial::not_found)
    }

    fn read_rows(
        &self,
        principal: &Principal,
        policy: &TablePolicy,
        rows: impl IntoIterator<Item = Record>,
        view: Option<&View>,
    ) -> Result<ReadResult, Denial> {
        if !policy.read.is_row_dependent() && !policy.read.evaluate(principal, &Record::new()) {
            tracing::warn!(table = %policy.name, principal = %principal.id, "read denied");
            return Err(Denial::forbidden(format!(
                "not permitted to read `{}`",
                policy.name
            )));
        }

        let mut records = vec![];
        let mut stripped_fields: Vec<String> = vec![];

        for row in rows {
            if !policy.read.evaluate(principal, &row) {
                continue;
            }

            let hidden: Vec<String> = row
                .keys()
                .filter(|field| !policy.allows_field(principal, &row, Operation::Read, field))
                .map(str::to_string)
                .collect();

            let mut visible = match view {
                Some(view) => view.project(&row),
                None => row,
            };

            for field in hidden {
                if visible.remove(&field).is_some() && !stripped_fields.contains(&field) {
                    stripped_fields.push(field);
                }
            }

            records.push(visible);
        }

        Ok(ReadResult {
            records,
            stripped_fields,
        })
    }

    /// Unwraps a requested row, masking rows the principal may not read as
    /// missing.
    fn readable(
        &self,
        principal: &Principal,
        policy: &TablePolicy,
        record: Option<Record>,
    ) -> Result<Record, Denial> {
        match record {
            Some(record) if policy.read.evaluate(principal, &record) => Ok(record),
            Some(_) => {
                tracing::debug!(table = %policy.name, "unreadable record masked as missing");
                Err(Denial::not_found())
            }
            None => Err(Denial::not_found()),
        }
    }

    fn create_as(
        &self,
        principal: &Principal,
        policy: &TablePolicy,
        payload: Record,
    ) -> Result<Record, Denial> {
        self.write_payload(principal, policy, Operation::Create, &Record::new(), payload)
    }

    fn update_as(
        &self,
        principal: &Principal,
        policy: &TablePolicy,
        existing: Option<Record>,
        patch: Record,
    ) -> Result<Record, Denial> {
        let existing = self.readable(principal, policy, existing)?;

        if !policy.update.evaluate(principal, &existing) {
            return Err(self.forbidden(principal, policy, Operation::Update));
        }

        self.write_payload(principal, policy, Operation::Update, &existing, patch)
    }

    fn delete_as(
        &self,
        principal: &Principal,
        policy: &TablePolicy,
        existing: Option<Record>,
    ) -> Result<Record, Denial> {
        let existing = self.readable(principal, policy, existing)?;

        if !policy.delete.evaluate(principal, &existing) {
            return Err(self.forbidden(principal, policy, Operation::Delete));
        }

        Ok(existing)
    }

    /// Validates a create or update payload against the table and field
    /// rules. Rules are evaluated on `current` with the payload applied.
    fn write_payload(
        &self,
        principal: &Principal,
        policy: &TablePolicy,
        op: Operation,
        current: &Record,
        payload: Record,
    ) -> Result<Record, Denial> {
        let mut accepted = Record::new();

        for (field, value) in payload {
            if !policy.has_column(&field) {
                return Err(Denial::bad_request(format!(
                    "unknown field `{field}` on `{}`",
                    policy.name
                )));
            }

            if policy.is_read_only(&field) {
                tracing::debug!(table = %policy.name, %field, "ignoring write to read-only field");
                continue;
            }

            accepted.insert(field, value);
        }

        let candidate = current.merged(&accepted);

        if !policy.rule(op).evaluate(principal, &candidate) {
            return Err(self.forbidden(principal, policy, op));
        }

        let forbidden: Vec<String> = accepted
            .keys()
            .filter(|field| !policy.allows_field(principal, &candidate, op, field))
            .map(str::to_string)
            .collect();

        if forbidden.is_empty() {
            return Ok(accepted);
        }

        if policy.allow_partial_field_writes {
            for field in &forbidden {
                tracing::debug!(table = %policy.name, %field, "dropping forbidden field from write");
                accepted.remove(field);
            }
            return Ok(accepted);
        }

        tracing::warn!(
            table = %policy.name,
            principal = %principal.id,
            %op,
            fields = ?forbidden,
            "write rejected"
        );

        let fields = forbidden
            .iter()
            .map(|field| format!("`{field}`"))
            .collect::<Vec<_>>()
            .join(", ");

        Err(Denial::forbidden(format!(
            "not permitted to write {fields} on `{}`",
            policy.name
        )))
    }

    fn batch_item(
        &self,
        principal: &Principal,
        policy: &TablePolicy,
        index: usize,
        item: BatchItem,
    ) -> Result<Record, Denial> {
        let result = match item {
            BatchItem::Create(payload) => self.create_as(principal, policy, payload),
            BatchItem::Update(existing, patch) => {
                self.update_as(principal, policy, existing, patch)
            }
            BatchItem::Delete(existing) => self.delete_as(principal, policy, existing),
        };

        result.map_err(|denial| {
            tracing::warn!(table = %policy.name, index, "batch rejected");
            denial.within(format_args!("batch item {index}"))
        })
    }

    fn forbidden(&self, principal: &Principal, policy: &TablePolicy, op: Operation) -> Denial {
        tracing::warn!(table = %policy.name, principal = %principal.id, %op, "operation denied");
        Denial::forbidden(format!("not permitted to {op} `{}`", policy.name))
    }
}

impl BatchOp {
    pub fn len(&self) -> usize {
        match self {
            BatchOp::Create(items) => items.len(),
            BatchOp::Update(items) => items.len(),
            BatchOp::Delete(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn into_items(self) -> Vec<BatchItem> {
        match self {
            BatchOp::Create(items) => items.into_iter().map(BatchItem::Create).collect(),
            BatchOp::Update(items) => items
                .into_iter()
                .map(|(existing, patch)| BatchItem::Update(existing, patch))
                .collect(),
            BatchOp::Delete(items) => items.into_iter().map(BatchItem::Delete).collect(),
        }
    }
}
