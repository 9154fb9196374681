use serde_json::Value;

use crate::{filter::Condition, JsonMap, ID_FIELD};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "camelCase")]
pub enum QueryKind {
    Find,
    FindOne,
    Count,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Mongo-style direction: negative numbers sort descending, everything else ascending.
    pub fn from_number(value: i64) -> Self {
        if value < 0 {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn as_number(self) -> i64 {
        match self {
            SortDirection::Asc => 1,
            SortDirection::Desc => -1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    pub field: String,
    pub direction: SortDirection,
}

impl SortField {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

/// A query handle. Resolvers accumulate filter, sort, limit, skip and projection on it
/// before handing it to [`crate::storage::Storage::execute`].
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    collection: String,
    kind: QueryKind,
    conditions: Vec<Condition>,
    sort: Vec<SortField>,
    limit: Option<u64>,
    skip: Option<u64>,
    projection: Option<Vec<String>>,
}

impl Query {
    fn new(collection: impl Into<String>, kind: QueryKind) -> Self {
        Self {
            collection: collection.into(),
            kind,
            conditions: Vec::new(),
            sort: Vec::new(),
            limit: None,
            skip: None,
            projection: None,
        }
    }

    pub fn find(collection: impl Into<String>) -> Self {
        Self::new(collection, QueryKind::Find)
    }

    pub fn find_one(collection: impl Into<String>) -> Self {
        Self::new(collection, QueryKind::FindOne)
    }

    pub fn count(collection: impl Into<String>) -> Self {
        Self::new(collection, QueryKind::Count)
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn kind(&self) -> QueryKind {
        self.kind
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn sort(&self) -> &[SortField] {
        &self.sort
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    pub fn skip(&self) -> Option<u64> {
        self.skip
    }

    /// The selected storage fields, `None` meaning every field.
    pub fn projection(&self) -> Option<&[String]> {
        self.projection.as_deref()
    }

    pub fn push_condition(&mut self, condition: Condition) -> &mut Self {
        self.conditions.push(condition);
        self
    }

    pub fn push_sort(&mut self, sort: SortField) -> &mut Self {
        self.sort.push(sort);
        self
    }

    pub fn set_limit(&mut self, limit: u64) -> &mut Self {
        self.limit = Some(limit);
        self
    }

    pub fn set_skip(&mut self, skip: u64) -> &mut Self {
        self.skip = Some(skip);
        self
    }

    /// Restricts the returned documents to the given fields. The identity field is
    /// always part of the selection.
    pub fn select<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut projection: Vec<String> = fields.into_iter().map(Into::into).collect();

        if !projection.iter().any(|field| field == ID_FIELD) {
            projection.insert(0, ID_FIELD.to_string());
        }

        self.projection = Some(projection);
        self
    }

    pub fn select_all(&mut self) -> &mut Self {
        self.projection = None;
        self
    }
}

/// The raw result of executing a [`Query`], shaped by its [`QueryKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutput {
    Count(u64),
    Many(Vec<JsonMap>),
    One(Option<JsonMap>),
}

impl QueryOutput {
    pub fn into_value(self) -> Value {
        match self {
            QueryOutput::Count(count) => Value::from(count),
            QueryOutput::Many(documents) => Value::Array(documents.into_iter().map(Value::Object).collect()),
            QueryOutput::One(document) => document.map(Value::Object).unwrap_or(Value::Null),
        }
    }

    /// Collapses the output into at most one document.
    pub fn into_document(self) -> Option<JsonMap> {
        match self {
            QueryOutput::Count(_) => None,
            QueryOutput::Many(documents) => documents.into_iter().next(),
            QueryOutput::One(document) => document,
        }
    }
}
