//! UNION / UNION ALL bookkeeping.

use crate::value::ParamList;
use std::fmt;

/// How union members are combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnionMode {
    /// Not a union query.
    #[default]
    None,
    /// `UNION` (duplicates removed)
    Union,
    /// `UNION ALL` (duplicates kept)
    UnionAll,
}

impl UnionMode {
    /// Separator placed between member texts.
    pub fn separator(self) -> &'static str {
        match self {
            UnionMode::None => "",
            UnionMode::Union => " UNION ",
            UnionMode::UnionAll => " UNION ALL ",
        }
    }
}

impl fmt::Display for UnionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnionMode::None => "NONE",
            UnionMode::Union => "UNION",
            UnionMode::UnionAll => "UNION ALL",
        })
    }
}

/// A member frozen at the moment it joined the union.
///
/// Never re-derived from live builder state.
#[derive(Clone, Debug, PartialEq)]
pub struct UnionMember {
    pub sql: String,
    pub params: ParamList,
}

/// Members plus the operator between them.
#[derive(Clone, Debug, Default)]
pub(crate) struct UnionSet {
    members: Vec<UnionMember>,
    mode: UnionMode,
}

impl UnionSet {
    pub(crate) fn is_active(&self) -> bool {
        !self.members.is_empty()
    }

    pub(crate) fn mode(&self) -> UnionMode {
        self.mode
    }

    pub(crate) fn members(&self) -> &[UnionMember] {
        &self.members
    }

    /// Freeze the first member. Only meaningful before any [`push`](UnionSet::push).
    pub(crate) fn seed(&mut self, first: UnionMember) {
        debug_assert!(self.members.is_empty());
        self.members.push(first);
    }

    /// Append a frozen member; the latest mode applies between all members.
    pub(crate) fn push(&mut self, mode: UnionMode, next: UnionMember) {
        self.members.push(next);
        self.mode = mode;
        let param_count = self.members.iter().map(|m| m.params.len()).sum();
        crate::trace::union_snapshot(self.mode.separator().trim(), self.members.len(), param_count);
    }

    pub(crate) fn sql(&self) -> String {
        self.members
            .iter()
            .map(|m| m.sql.as_str())
            .collect::<Vec<_>>()
            .join(self.mode.separator())
    }

    pub(crate) fn params(&self) -> ParamList {
        let mut params = ParamList::new();
        for member in &self.members {
            params.extend(&member.params);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;

    fn member(sql: &str, params: Vec<crate::Value>) -> UnionMember {
        UnionMember {
            sql: sql.to_string(),
            params: params.into(),
        }
    }

    #[test]
    fn test_members_join_in_order() {
        let mut set = UnionSet::default();
        assert!(!set.is_active());
        set.seed(member("A", params![1]));
        set.push(UnionMode::Union, member("B", params![2]));
        set.push(UnionMode::Union, member("C", params![]));
        assert!(set.is_active());
        assert_eq!(set.sql(), "A UNION B UNION C");
        assert_eq!(set.params(), params![1, 2]);
    }

    #[test]
    fn test_last_call_decides_operator() {
        let mut set = UnionSet::default();
        set.seed(member("A", params![]));
        set.push(UnionMode::Union, member("B", params![]));
        set.push(UnionMode::UnionAll, member("C", params![]));
        assert_eq!(set.mode(), UnionMode::UnionAll);
        assert_eq!(set.sql(), "A UNION ALL B UNION ALL C");
    }

    #[test]
    fn test_display() {
        assert_eq!(UnionMode::UnionAll.to_string(), "UNION ALL");
        assert_eq!(UnionMode::None.separator(), "");
    }
}
