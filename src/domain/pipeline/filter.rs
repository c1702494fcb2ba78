use crate::domain::entities::table::RoleFilter;
use crate::domain::entities::user::User;

/// Search term plus role facet. The term is lowercased once up front.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery {
    term: String,
    role: RoleFilter,
}

impl FilterQuery {
    pub fn new(term: &str, role: RoleFilter) -> Self {
        Self {
            term: term.to_lowercase(),
            role,
        }
    }

    pub fn matches(&self, user: &User) -> bool {
        self.matches_term(user) && self.role.admits(user.role)
    }

    fn matches_term(&self, user: &User) -> bool {
        if self.term.is_empty() {
            return true;
        }
        user.name.to_lowercase().contains(&self.term)
            || user.email.to_lowercase().contains(&self.term)
    }
}

/// Positions into `users` of every matching record, in source order.
pub fn filter_rows(users: &[User], query: &FilterQuery) -> Vec<usize> {
    users
        .iter()
        .enumerate()
        .filter(|(_, user)| query.matches(user))
        .map(|(pos, _)| pos)
        .collect()
}
