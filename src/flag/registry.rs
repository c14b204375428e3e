/// Flag registration and lookup.
///
/// The registry owns its flags in registration order plus two indexes: long
/// name → flag and alias → flag. Both namespaces belong to the registry
/// value, so two registries may reuse the same alias.
use std::collections::HashMap;

use log::debug;

use super::definition::{Arity, Callback, Flag};
use super::params::ParamSet;
use crate::errors::{ConfigError, ParseError};
use crate::types::FlagInfo;

/// Owns a set of flags keyed by name and alias.
#[derive(Debug, Default)]
pub struct FlagRegistry {
    pub(crate) flags: Vec<Flag>,
    pub(crate) by_name: HashMap<String, usize>,
    pub(crate) by_alias: HashMap<char, usize>,
}

impl FlagRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a zero-parameter toggle flag.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DuplicateFlag` or `ConfigError::InvalidName`.
    pub fn add_flag(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<FlagHandle<'_>, ConfigError> {
        self.register(
            name.into(),
            description.into(),
            Arity::Zero,
            Box::new(|_: &[String]| Ok(())),
        )
    }

    /// Register a variadic flag whose callback receives the raw parameters.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DuplicateFlag` or `ConfigError::InvalidName`.
    pub fn add_flag_with<F>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        callback: F,
    ) -> Result<FlagHandle<'_>, ConfigError>
    where
        F: FnMut(&[String]) -> Result<(), ParseError> + 'static,
    {
        self.register(
            name.into(),
            description.into(),
            Arity::Variadic,
            Box::new(callback),
        )
    }

    /// Register a fixed-arity flag that converts its parameters into `targets`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DuplicateFlag` or `ConfigError::InvalidName`.
    pub fn add_typed_flag<P: ParamSet>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        targets: P,
    ) -> Result<FlagHandle<'_>, ConfigError> {
        let name = name.into();
        let owner = name.clone();
        let callback: Callback =
            Box::new(move |params: &[String]| targets.assign(&owner, params));
        self.register(name, description.into(), Arity::from_count(P::ARITY), callback)
    }

    fn register(
        &mut self,
        name: String,
        description: String,
        arity: Arity,
        callback: Callback,
    ) -> Result<FlagHandle<'_>, ConfigError> {
        if name.is_empty() || name.starts_with('-') || name.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidName { name });
        }
        if self.by_name.contains_key(&name) {
            return Err(ConfigError::DuplicateFlag { name });
        }

        debug!("registering flag --{name} ({arity})");
        let index = self.flags.len();
        self.by_name.insert(name.clone(), index);
        self.flags.push(Flag::new(name, description, arity, callback));
        Ok(FlagHandle {
            registry: self,
            index,
        })
    }

    /// Reopen a registered flag for configuration.
    #[must_use]
    pub fn flag_mut(&mut self, name: &str) -> Option<FlagHandle<'_>> {
        let index = *self.by_name.get(name)?;
        Some(FlagHandle {
            registry: self,
            index,
        })
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Flag> {
        self.by_name.get(name).map(|&i| &self.flags[i])
    }

    #[must_use]
    pub fn get_by_alias(&self, alias: char) -> Option<&Flag> {
        self.by_alias.get(&alias).map(|&i| &self.flags[i])
    }

    /// Whether `name` is registered and was bound by a parse call.
    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some_and(Flag::is_set)
    }

    /// Parameters bound to `name`, if it was set.
    #[must_use]
    pub fn params(&self, name: &str) -> Option<&[String]> {
        self.get(name).filter(|f| f.is_set()).map(Flag::params)
    }

    /// Flags in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Flag> {
        self.flags.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Serializable summary of every flag, in registration order.
    #[must_use]
    pub fn describe(&self) -> Vec<FlagInfo> {
        self.flags.iter().map(FlagInfo::from).collect()
    }
}

impl<'a> IntoIterator for &'a FlagRegistry {
    type Item = &'a Flag;
    type IntoIter = std::slice::Iter<'a, Flag>;

    fn into_iter(self) -> Self::IntoIter {
        self.flags.iter()
    }
}

/// Configuration handle for the flag most recently registered.
pub struct FlagHandle<'a> {
    registry: &'a mut FlagRegistry,
    index: usize,
}

impl FlagHandle<'_> {
    fn flag(&mut self) -> &mut Flag {
        &mut self.registry.flags[self.index]
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.registry.flags[self.index].name
    }

    /// Assign a one-character alias, usable as `-X`.
    ///
    /// Replaces any alias the flag had before.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DuplicateAlias` if another flag in this registry
    /// claimed it, or `ConfigError::InvalidAlias` for `-` and whitespace.
    pub fn set_alias(mut self, alias: char) -> Result<Self, ConfigError> {
        if alias == '-' || alias.is_whitespace() || alias.is_control() {
            return Err(ConfigError::InvalidAlias { alias });
        }
        if let Some(&owner) = self.registry.by_alias.get(&alias) {
            if owner != self.index {
                return Err(ConfigError::DuplicateAlias {
                    alias,
                    owner: self.registry.flags[owner].name.clone(),
                });
            }
        }

        let index = self.index;
        if let Some(previous) = self.flag().alias.replace(alias) {
            self.registry.by_alias.remove(&previous);
        }
        self.registry.by_alias.insert(alias, index);
        Ok(self)
    }

    /// Override the parameter-count contract.
    pub fn set_param_count(mut self, count: usize) -> Self {
        self.flag().arity = Arity::from_count(count);
        self
    }

    /// Make the flag accept any number of parameters.
    pub fn set_variadic(mut self) -> Self {
        self.flag().arity = Arity::Variadic;
        self
    }

    /// Fire the callback as soon as the flag is bound, before later tokens.
    pub fn set_immediate_parse(mut self) -> Self {
        self.flag().immediate = true;
        self
    }

    /// Stop flag processing once the callback has fired.
    pub fn set_halting(mut self) -> Self {
        self.flag().halting = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flag::Slot;

    #[test]
    fn test_duplicate_name() {
        let mut reg = FlagRegistry::new();
        reg.add_flag("verbose", "").unwrap();
        let err = reg.add_flag("verbose", "again").err();
        assert_eq!(
            err,
            Some(ConfigError::DuplicateFlag {
                name: "verbose".to_owned()
            })
        );
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_duplicate_alias() {
        let mut reg = FlagRegistry::new();
        reg.add_flag("verbose", "").unwrap().set_alias('v').unwrap();
        let err = reg.add_flag("version", "").unwrap().set_alias('v').err();
        assert_eq!(
            err,
            Some(ConfigError::DuplicateAlias {
                alias: 'v',
                owner: "verbose".to_owned(),
            })
        );
        assert!(reg.get("version").unwrap().alias().is_none());
        assert_eq!(reg.get_by_alias('v').unwrap().name(), "verbose");
    }

    #[test]
    fn test_alias_scope_is_per_registry() {
        let mut first = FlagRegistry::new();
        let mut second = FlagRegistry::new();
        first.add_flag("verbose", "").unwrap().set_alias('v').unwrap();
        assert!(second.add_flag("verbose", "").unwrap().set_alias('v').is_ok());
    }

    #[test]
    fn test_realias_same_flag() {
        let mut reg = FlagRegistry::new();
        reg.add_flag("quiet", "")
            .unwrap()
            .set_alias('q')
            .unwrap()
            .set_alias('Q')
            .unwrap();
        assert!(reg.get_by_alias('q').is_none());
        assert_eq!(reg.get_by_alias('Q').unwrap().name(), "quiet");
        // Re-assigning its own alias is not a collision.
        assert!(reg.flag_mut("quiet").unwrap().set_alias('Q').is_ok());
    }

    #[test]
    fn test_invalid_names_and_aliases() {
        let mut reg = FlagRegistry::new();
        assert!(matches!(reg.add_flag("", ""), Err(ConfigError::InvalidName { .. })));
        assert!(matches!(reg.add_flag("-x", ""), Err(ConfigError::InvalidName { .. })));
        assert!(matches!(reg.add_flag("a b", ""), Err(ConfigError::InvalidName { .. })));
        assert!(matches!(
            reg.add_flag("dash", "").unwrap().set_alias('-'),
            Err(ConfigError::InvalidAlias { alias: '-' })
        ));
    }

    #[test]
    fn test_arity_from_registration() {
        let mut reg = FlagRegistry::new();
        reg.add_flag("toggle", "").unwrap();
        reg.add_flag_with("files", "", |_| Ok(())).unwrap();
        reg.add_typed_flag("size", "", (Slot::<u16>::new(), Slot::<u16>::new()))
            .unwrap();
        reg.add_flag_with("pair", "", |_| Ok(()))
            .unwrap()
            .set_param_count(2);
        reg.add_flag_with("none", "", |_| Ok(()))
            .unwrap()
            .set_param_count(0);

        assert_eq!(reg.get("toggle").unwrap().arity(), Arity::Zero);
        assert_eq!(reg.get("files").unwrap().arity(), Arity::Variadic);
        assert_eq!(reg.get("size").unwrap().arity(), Arity::Exact(2));
        assert_eq!(reg.get("pair").unwrap().arity(), Arity::Exact(2));
        assert_eq!(reg.get("none").unwrap().arity(), Arity::Zero);
    }

    #[test]
    fn test_describe_keeps_registration_order() {
        let mut reg = FlagRegistry::new();
        reg.add_flag("zeta", "last letter").unwrap();
        reg.add_flag("alpha", "first letter")
            .unwrap()
            .set_alias('a')
            .unwrap();
        let names: Vec<_> = reg.describe().into_iter().map(|f| f.name).collect();
        assert_eq!(names, ["zeta", "alpha"]);
    }
}
