//! Listing model: filter predicates, sort specs, and pagination.
//!
//! The filter is an explicit predicate builder: only provided, non-blank
//! values contribute predicates, and an empty filter matches every member.

use std::cmp::Ordering;

use roster_core::{DomainError, DomainResult};

use crate::Member;

/// Optional filter fields for member listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberFilter {
    first_name: Option<String>,
    last_name: Option<String>,
}

impl MemberFilter {
    /// Build a filter from raw query values; blank values are dropped.
    pub fn new(first_name: Option<String>, last_name: Option<String>) -> Self {
        fn non_blank(v: Option<String>) -> Option<String> {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        }

        Self {
            first_name: non_blank(first_name),
            last_name: non_blank(last_name),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none()
    }

    /// Case-insensitive substring match on each provided field.
    pub fn matches(&self, member: &Member) -> bool {
        fn contains_ci(haystack: &str, needle: &str) -> bool {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        }

        self.first_name
            .as_deref()
            .is_none_or(|n| contains_ci(&member.first_name, n))
            && self
                .last_name
                .as_deref()
                .is_none_or(|n| contains_ci(&member.last_name, n))
    }
}

/// Sortable member fields (wire names match the JSON field names).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SortField {
    Id,
    FirstName,
    LastName,
    Email,
    DateOfBirth,
}

impl SortField {
    fn parse(name: &str) -> DomainResult<Self> {
        match name {
            "id" => Ok(SortField::Id),
            "firstName" => Ok(SortField::FirstName),
            "lastName" => Ok(SortField::LastName),
            "email" => Ok(SortField::Email),
            "dateOfBirth" => Ok(SortField::DateOfBirth),
            other => Err(DomainError::validation(format!(
                "unknown sort field: {other}"
            ))),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

/// Sort order parsed from `field,dir` query syntax.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub dir: SortDir,
}

impl Default for Sort {
    fn default() -> Self {
        Self {
            field: SortField::Id,
            dir: SortDir::Asc,
        }
    }
}

impl Sort {
    /// Parse `"field,dir"`; a bare `"field"` sorts ascending, a blank value
    /// falls back to the default (`id,asc`).
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(Self::default());
        }

        match raw.split_once(',') {
            Some((field, dir)) => {
                let field = SortField::parse(field.trim())?;
                let dir = match dir.trim().to_lowercase().as_str() {
                    "asc" => SortDir::Asc,
                    "desc" => SortDir::Desc,
                    other => {
                        return Err(DomainError::validation(format!(
                            "unknown sort direction: {other}"
                        )));
                    }
                };
                Ok(Self { field, dir })
            }
            None => Ok(Self {
                field: SortField::parse(raw)?,
                dir: SortDir::Asc,
            }),
        }
    }

    pub fn compare(&self, a: &Member, b: &Member) -> Ordering {
        let ord = match self.field {
            SortField::Id => a.id.cmp(&b.id),
            SortField::FirstName => a.first_name.cmp(&b.first_name),
            SortField::LastName => a.last_name.cmp(&b.last_name),
            SortField::Email => a.email.cmp(&b.email),
            SortField::DateOfBirth => a.date_of_birth.cmp(&b.date_of_birth),
        };

        match self.dir {
            SortDir::Asc => ord,
            SortDir::Desc => ord.reverse(),
        }
    }
}

/// Zero-based page request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
}

impl PageRequest {
    pub fn new(page: usize, size: usize) -> DomainResult<Self> {
        if size == 0 {
            return Err(DomainError::validation("page size must be at least 1"));
        }
        Ok(Self { page, size })
    }
}

/// One page of results plus totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: usize,
    pub page_number: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> usize {
        self.total_elements.div_ceil(self.page_size)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            page_number: self.page_number,
            page_size: self.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemberDraft;
    use chrono::NaiveDate;
    use roster_core::MemberId;

    fn member(first: &str, last: &str) -> Member {
        Member::new(
            MemberId::new(),
            MemberDraft {
                first_name: first.to_string(),
                last_name: last.to_string(),
                email: format!("{}@example.com", first.to_lowercase()),
                date_of_birth: NaiveDate::from_ymd_opt(1990, 6, 1).unwrap(),
            },
        )
    }

    #[test]
    fn blank_filter_values_are_dropped() {
        let f = MemberFilter::new(Some("  ".to_string()), None);
        assert!(f.is_empty());
        assert!(f.matches(&member("Asha", "Verma")));
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let f = MemberFilter::new(Some("sha".to_string()), None);
        assert!(f.matches(&member("Asha", "Verma")));
        assert!(!f.matches(&member("Rohan", "Verma")));
    }

    #[test]
    fn both_fields_must_match_when_provided() {
        let f = MemberFilter::new(Some("asha".to_string()), Some("verma".to_string()));
        assert!(f.matches(&member("Asha", "Verma")));
        assert!(!f.matches(&member("Asha", "Sharma")));
    }

    #[test]
    fn sort_spec_parses_field_and_direction() {
        assert_eq!(
            Sort::parse("lastName,desc").unwrap(),
            Sort {
                field: SortField::LastName,
                dir: SortDir::Desc
            }
        );
        assert_eq!(
            Sort::parse("email").unwrap(),
            Sort {
                field: SortField::Email,
                dir: SortDir::Asc
            }
        );
        assert_eq!(Sort::parse("").unwrap(), Sort::default());
    }

    #[test]
    fn unknown_sort_field_is_rejected() {
        assert!(Sort::parse("password,asc").is_err());
        assert!(Sort::parse("id,sideways").is_err());
    }

    #[test]
    fn sort_compare_respects_direction() {
        let a = member("Asha", "Verma");
        let b = member("Rohan", "Sharma");

        let asc = Sort::parse("firstName,asc").unwrap();
        let desc = Sort::parse("firstName,desc").unwrap();

        assert_eq!(asc.compare(&a, &b), Ordering::Less);
        assert_eq!(desc.compare(&a, &b), Ordering::Greater);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert!(PageRequest::new(0, 0).is_err());
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = Page {
            content: vec![1, 2, 3],
            total_elements: 7,
            page_number: 0,
            page_size: 3,
        };
        assert_eq!(page.total_pages(), 3);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 200,
                ..ProptestConfig::default()
            })]

            /// Property: an empty filter matches every member.
            #[test]
            fn empty_filter_matches_all(
                first in "[A-Za-z]{1,12}",
                last in "[A-Za-z]{1,12}"
            ) {
                let f = MemberFilter::default();
                prop_assert!(f.matches(&member(&first, &last)));
            }

            /// Property: a filter built from a substring of the stored name matches.
            #[test]
            fn substring_of_name_matches(
                first in "[A-Za-z]{3,12}",
                start in 0usize..2,
            ) {
                let needle = first[start..first.len() - 1].to_string();
                let f = MemberFilter::new(Some(needle), None);
                prop_assert!(f.matches(&member(&first, "Verma")));
            }
        }
    }
}
