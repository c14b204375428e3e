/// Argument-vector parsing: binds tokens to registered flags and fires callbacks.
///
/// Tokens are grouped as `flag [param ...]`. A group closes when the next
/// flag-shaped token arrives or the input ends; closing validates the
/// parameter count and marks the flag set. Immediate flags fire at close
/// time, all others fire after the scan in the order they were closed.
use log::{debug, trace};

use super::registry::FlagRegistry;
use crate::errors::ParseError;

/// How a parse call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Every token was consumed and every bound callback fired.
    Completed,
    /// A halting flag fired; later tokens and callbacks were skipped.
    Halted {
        /// Name of the flag that stopped processing.
        flag: String,
    },
}

impl ParseOutcome {
    #[must_use]
    pub fn is_halted(&self) -> bool {
        matches!(self, Self::Halted { .. })
    }
}

/// Lexical class of a single command-line token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    /// `--name`
    Long(&'a str),
    /// `-X`
    Short(char),
    /// Starts with `-` but is neither a long flag nor a single alias (`-abc`).
    Malformed,
    /// Anything else, including a lone `-`.
    Param(&'a str),
}

fn classify(token: &str) -> Token<'_> {
    if let Some(name) = token.strip_prefix("--") {
        return Token::Long(name);
    }
    if let Some(rest) = token.strip_prefix('-') {
        let mut chars = rest.chars();
        return match (chars.next(), chars.next()) {
            (None, _) => Token::Param(token),
            (Some(alias), None) => Token::Short(alias),
            (Some(_), Some(_)) => Token::Malformed,
        };
    }
    Token::Param(token)
}

impl FlagRegistry {
    /// Parse an argument vector. Element 0 is the program name and is skipped.
    ///
    /// Flags bound before an error stay bound.
    ///
    /// # Errors
    ///
    /// - `ParseError::UnknownFlag` — unregistered name or alias, or a bundled
    ///   short option such as `-abc`
    /// - `ParseError::ExpectedFlag` — a parameter before any flag
    /// - `ParseError::AlreadySet` — the same flag given twice
    /// - `ParseError::Arity` — wrong number of parameters
    /// - `ParseError::InvalidParam` / `ParseError::Rejected` — from callbacks
    pub fn parse<I, S>(&mut self, args: I) -> Result<ParseOutcome, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut open: Option<(usize, Vec<String>)> = None;
        let mut deferred: Vec<usize> = Vec::new();

        for arg in args.into_iter().skip(1) {
            let arg = arg.as_ref();
            let token = classify(arg);
            trace!("token '{arg}' -> {token:?}");

            let index = match token {
                Token::Param(value) => {
                    match open.as_mut() {
                        Some((_, params)) => params.push(value.to_owned()),
                        None => {
                            return Err(ParseError::ExpectedFlag {
                                token: value.to_owned(),
                            });
                        }
                    }
                    continue;
                }
                Token::Long(name) => self.by_name.get(name).copied(),
                Token::Short(alias) => self.by_alias.get(&alias).copied(),
                Token::Malformed => None,
            };

            if let Some((current, params)) = open.take() {
                if let Some(halted) = self.close(current, params, &mut deferred)? {
                    return Ok(halted);
                }
            }

            let index = index.ok_or_else(|| ParseError::UnknownFlag {
                token: arg.to_owned(),
            })?;
            if self.flags[index].is_set {
                return Err(ParseError::AlreadySet {
                    name: self.flags[index].name.clone(),
                });
            }
            open = Some((index, Vec::new()));
        }

        if let Some((current, params)) = open.take() {
            if let Some(halted) = self.close(current, params, &mut deferred)? {
                return Ok(halted);
            }
        }

        for index in deferred {
            let flag = &mut self.flags[index];
            debug!("firing --{}", flag.name);
            flag.fire()?;
            if flag.halting {
                return Ok(ParseOutcome::Halted {
                    flag: flag.name.clone(),
                });
            }
        }

        Ok(ParseOutcome::Completed)
    }

    /// Bind the open flag. Returns `Some` when an immediate halting flag fired.
    fn close(
        &mut self,
        index: usize,
        params: Vec<String>,
        deferred: &mut Vec<usize>,
    ) -> Result<Option<ParseOutcome>, ParseError> {
        let flag = &mut self.flags[index];
        flag.bind(params)?;
        debug!("bound --{} with {} parameter(s)", flag.name, flag.params.len());

        if !flag.immediate {
            deferred.push(index);
            return Ok(None);
        }

        debug!("firing --{} immediately", flag.name);
        flag.fire()?;
        if flag.halting {
            return Ok(Some(ParseOutcome::Halted {
                flag: flag.name.clone(),
            }));
        }
        Ok(None)
    }
}
