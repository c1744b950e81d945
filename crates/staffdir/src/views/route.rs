//! Screen routing.

use std::fmt;

/// The screen being shown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    /// Employee list (the root).
    #[default]
    List,
    /// Detail page of one employee.
    Employee(String),
    /// Favorite employees.
    Favorites,
}

impl Route {
    /// Resolve a path such as `""`, `"employee/42"` or `"favorites"`.
    ///
    /// Anything unrecognised goes to the list.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let path = path.trim().trim_matches('/');
        let mut segments = path.split('/');
        match (segments.next(), segments.next(), segments.next()) {
            (Some("favorites"), None, None) => Self::Favorites,
            (Some("employee"), Some(id), None) if !id.is_empty() => Self::Employee(id.to_string()),
            _ => Self::List,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "/"),
            Self::Employee(id) => write!(f, "/employee/{id}"),
            Self::Favorites => write!(f, "/favorites"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_routes() {
        assert_eq!(Route::parse(""), Route::List);
        assert_eq!(Route::parse("/"), Route::List);
        assert_eq!(Route::parse("favorites"), Route::Favorites);
        assert_eq!(
            Route::parse("/employee/42"),
            Route::Employee("42".to_string())
        );
    }

    #[test]
    fn test_unknown_routes_fall_back_to_list() {
        assert_eq!(Route::parse("settings"), Route::List);
        assert_eq!(Route::parse("employee"), Route::List);
        assert_eq!(Route::parse("employee/"), Route::List);
        assert_eq!(Route::parse("employee/1/notes"), Route::List);
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for route in [
            Route::List,
            Route::Favorites,
            Route::Employee("abc".to_string()),
        ] {
            assert_eq!(Route::parse(&route.to_string()), route);
        }
    }
}
