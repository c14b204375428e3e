/// A single registered flag and its parameter-count contract.
use std::fmt;

use crate::errors::ParseError;

/// Callback fired with the parameters collected for a flag.
pub(crate) type Callback = Box<dyn FnMut(&[String]) -> Result<(), ParseError>>;

/// How many parameters a flag accepts. Fixed once registration is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// A toggle: no parameters.
    Zero,
    /// Exactly `n` parameters.
    Exact(usize),
    /// Any number of parameters, including none.
    Variadic,
}

impl Arity {
    /// Build from a raw count, normalizing `0` to [`Arity::Zero`].
    #[must_use]
    pub fn from_count(count: usize) -> Self {
        if count == 0 { Self::Zero } else { Self::Exact(count) }
    }

    /// Check a collected parameter count against this contract.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Arity` with the expected and actual counts.
    pub fn check(self, name: &str, actual: usize) -> Result<(), ParseError> {
        let expected = match self {
            Self::Variadic => return Ok(()),
            Self::Zero => 0,
            Self::Exact(n) => n,
        };
        if actual == expected {
            Ok(())
        } else {
            Err(ParseError::Arity {
                name: name.to_owned(),
                expected,
                actual,
            })
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zero => f.write_str("0"),
            Self::Exact(n) => write!(f, "{n}"),
            Self::Variadic => f.write_str("*"),
        }
    }
}

/// A named, optionally aliased command-line switch.
pub struct Flag {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) alias: Option<char>,
    pub(crate) arity: Arity,
    pub(crate) immediate: bool,
    pub(crate) halting: bool,
    pub(crate) is_set: bool,
    pub(crate) params: Vec<String>,
    pub(crate) callback: Callback,
}

impl Flag {
    pub(crate) fn new(name: String, description: String, arity: Arity, callback: Callback) -> Self {
        Self {
            name,
            description,
            alias: None,
            arity,
            immediate: false,
            halting: false,
            is_set: false,
            params: Vec::new(),
            callback,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn alias(&self) -> Option<char> {
        self.alias
    }

    #[must_use]
    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Whether the callback fires as soon as the flag is bound.
    #[must_use]
    pub fn is_immediate(&self) -> bool {
        self.immediate
    }

    /// Whether firing the callback ends flag processing.
    #[must_use]
    pub fn is_halting(&self) -> bool {
        self.halting
    }

    /// Whether the flag was bound by a parse call.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.is_set
    }

    /// Parameters collected when the flag was bound.
    #[must_use]
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Validate and store the collected parameters, marking the flag as set.
    pub(crate) fn bind(&mut self, params: Vec<String>) -> Result<(), ParseError> {
        if self.is_set {
            return Err(ParseError::AlreadySet {
                name: self.name.clone(),
            });
        }
        self.arity.check(&self.name, params.len())?;
        self.params = params;
        self.is_set = true;
        Ok(())
    }

    pub(crate) fn fire(&mut self) -> Result<(), ParseError> {
        (self.callback)(&self.params)
    }
}

impl fmt::Debug for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flag")
            .field("name", &self.name)
            .field("alias", &self.alias)
            .field("arity", &self.arity)
            .field("immediate", &self.immediate)
            .field("halting", &self.halting)
            .field("is_set", &self.is_set)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> Callback {
        Box::new(|_: &[String]| Ok(()))
    }

    #[test]
    fn test_from_count() {
        assert_eq!(Arity::from_count(0), Arity::Zero);
        assert_eq!(Arity::from_count(3), Arity::Exact(3));
    }

    #[test]
    fn test_variadic_accepts_any_count() {
        assert!(Arity::Variadic.check("files", 0).is_ok());
        assert!(Arity::Variadic.check("files", 17).is_ok());
    }

    #[test]
    fn test_exact_mismatch() {
        let err = Arity::Exact(2).check("count", 3).unwrap_err();
        assert_eq!(
            err,
            ParseError::Arity {
                name: "count".to_owned(),
                expected: 2,
                actual: 3,
            }
        );
    }

    #[test]
    fn test_bind_twice_fails() {
        let mut flag = Flag::new("quiet".to_owned(), String::new(), Arity::Zero, noop());
        flag.bind(Vec::new()).unwrap();
        assert!(flag.is_set());
        assert!(matches!(
            flag.bind(Vec::new()),
            Err(ParseError::AlreadySet { .. })
        ));
    }

    #[test]
    fn test_bind_rejects_params_for_toggle() {
        let mut flag = Flag::new("quiet".to_owned(), String::new(), Arity::Zero, noop());
        let err = flag.bind(vec!["x".to_owned()]).unwrap_err();
        assert!(matches!(err, ParseError::Arity { expected: 0, actual: 1, .. }));
        assert!(!flag.is_set());
    }
}
