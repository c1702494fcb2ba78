use std::fmt;
use std::str::FromStr;

use crate::domain::entities::user::Role;

pub const PAGE_SIZE: usize = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortColumn {
    #[default]
    Id,
    Name,
    Email,
    Role,
    Status,
    JoinDate,
}

impl SortColumn {
    pub const ALL: [SortColumn; 6] = [
        SortColumn::Name,
        SortColumn::Email,
        SortColumn::Role,
        SortColumn::Status,
        SortColumn::JoinDate,
        SortColumn::Id,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortColumn::Id => "ID",
            SortColumn::Name => "Name",
            SortColumn::Email => "Email",
            SortColumn::Role => "Role",
            SortColumn::Status => "Status",
            SortColumn::JoinDate => "Joined",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortSpec {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    /// Header-click transition: same column flips, another column starts ascending.
    pub fn toggled(self, column: SortColumn) -> Self {
        if self.column == column {
            Self::new(column, self.direction.flipped())
        } else {
            Self::new(column, SortDirection::Asc)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoleFilter {
    #[default]
    All,
    Only(Role),
}

impl RoleFilter {
    pub fn admits(self, role: Role) -> bool {
        match self {
            RoleFilter::All => true,
            RoleFilter::Only(wanted) => wanted == role,
        }
    }

    pub fn options() -> impl Iterator<Item = RoleFilter> {
        std::iter::once(RoleFilter::All).chain(Role::ALL.into_iter().map(RoleFilter::Only))
    }

    pub fn label(self) -> &'static str {
        match self {
            RoleFilter::All => "All Roles",
            RoleFilter::Only(role) => role.as_str(),
        }
    }
}

impl fmt::Display for RoleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleFilter::All => f.write_str("all"),
            RoleFilter::Only(role) => write!(f, "{role}"),
        }
    }
}

impl FromStr for RoleFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(RoleFilter::All);
        }
        value.parse().map(RoleFilter::Only)
    }
}
