use std::cell::RefCell;
use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use feruca::{Collator, Locale, Tailoring};

use crate::domain::entities::table::{SortColumn, SortDirection, SortSpec};
use crate::domain::entities::user::User;

/// A single cell as seen by the comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(i64),
    Timestamp(DateTime<Utc>),
}

impl PartialOrd for FieldValue<'_> {
    /// Only values of the same kind are comparable.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => Some(a.cmp(b)),
            (FieldValue::Number(a), FieldValue::Number(b)) => Some(a.cmp(b)),
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

pub fn field_value(user: &User, column: SortColumn) -> FieldValue<'_> {
    match column {
        SortColumn::Id => FieldValue::Number(user.id.0),
        SortColumn::Name => FieldValue::Text(&user.name),
        SortColumn::Email => FieldValue::Text(&user.email),
        SortColumn::Role => FieldValue::Text(user.role.as_str()),
        SortColumn::Status => FieldValue::Text(user.status.as_str()),
        SortColumn::JoinDate => FieldValue::Timestamp(user.join_date),
    }
}

thread_local! {
    static COLLATOR: RefCell<Collator> =
        RefCell::new(Collator::new(Tailoring::Cldr(Locale::Root), false, true));
}

/// Unicode collation with the CLDR root order. Punctuation and spaces are
/// non-ignorable and sort before digits, digits before letters; accents and
/// case only break primary ties, lowercase first.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|collator| collator.borrow_mut().collate(a, b))
}

pub fn compare_values(a: FieldValue<'_>, b: FieldValue<'_>) -> Ordering {
    match (a, b) {
        (FieldValue::Text(x), FieldValue::Text(y)) => locale_compare(x, y),
        (FieldValue::Number(x), FieldValue::Number(y)) => x.cmp(&y),
        _ => fallback_compare(a, b),
    }
}

/// Greater-than, then less-than; everything else ties, including values of
/// different kinds.
fn fallback_compare(a: FieldValue<'_>, b: FieldValue<'_>) -> Ordering {
    if a > b {
        Ordering::Greater
    } else if a < b {
        Ordering::Less
    } else {
        Ordering::Equal
    }
}

pub fn compare_users(a: &User, b: &User, sort: SortSpec) -> Ordering {
    let ordering = compare_values(field_value(a, sort.column), field_value(b, sort.column));
    match sort.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Stable sort of row positions; ties keep their incoming order in both
/// directions.
pub fn sort_rows(users: &[User], rows: &[usize], sort: SortSpec) -> Vec<usize> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|&a, &b| compare_users(&users[a], &users[b], sort));
    sorted
}
