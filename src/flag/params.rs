/// Typed flag parameters.
///
/// A typed flag owns one [`Slot`] per parameter. When the flag fires, each
/// collected token is converted with [`FromStr`] and stored in its slot; the
/// application keeps a clone of the slot and reads it after parsing.
///
/// ```
/// use quikcli::{FlagRegistry, Slot};
///
/// let width = Slot::<u16>::new();
/// let height = Slot::<u16>::new();
/// let mut flags = FlagRegistry::new();
/// flags
///     .add_typed_flag("size", "window size", (width.clone(), height.clone()))
///     .unwrap();
/// flags.parse(["app", "--size", "80", "24"]).unwrap();
/// assert_eq!(width.get(), Some(80));
/// assert_eq!(height.get(), Some(24));
/// ```
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::errors::ParseError;

/// Shared output cell written by a typed flag.
pub struct Slot<T>(Rc<RefCell<Option<T>>>);

impl<T> Slot<T> {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(None)))
    }

    /// Create a slot holding a default that a parsed value replaces.
    #[must_use]
    pub fn with_default(value: T) -> Self {
        Self(Rc::new(RefCell::new(Some(value))))
    }

    /// Whether a value is present.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.0.borrow().is_some()
    }

    /// Move the value out, leaving the slot empty.
    #[must_use]
    pub fn take(&self) -> Option<T> {
        self.0.borrow_mut().take()
    }

    fn set(&self, value: T) {
        *self.0.borrow_mut() = Some(value);
    }
}

impl<T: Clone> Slot<T> {
    /// Copy of the current value.
    #[must_use]
    pub fn get(&self) -> Option<T> {
        self.0.borrow().clone()
    }
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Slot").field(&*self.0.borrow()).finish()
    }
}

/// Convert one token into a slot.
fn convert<T: FromStr>(slot: &Slot<T>, flag: &str, token: &str) -> Result<(), ParseError> {
    let value = token.parse::<T>().map_err(|_| ParseError::InvalidParam {
        name: flag.to_owned(),
        value: token.to_owned(),
    })?;
    slot.set(value);
    Ok(())
}

/// A fixed-size group of typed outputs for a flag.
///
/// Implemented for a single [`Slot`] and for tuples of up to six slots; the
/// arity of the flag is the number of slots.
pub trait ParamSet: 'static {
    /// Number of parameters the flag takes.
    const ARITY: usize;

    /// Convert `params` in order into the slots.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidParam` for the first token that does not
    /// convert. Slots before it keep their new values.
    fn assign(&self, flag: &str, params: &[String]) -> Result<(), ParseError>;
}

impl<T: FromStr + 'static> ParamSet for Slot<T> {
    const ARITY: usize = 1;

    fn assign(&self, flag: &str, params: &[String]) -> Result<(), ParseError> {
        match params {
            [token] => convert(self, flag, token),
            _ => Err(ParseError::Arity {
                name: flag.to_owned(),
                expected: Self::ARITY,
                actual: params.len(),
            }),
        }
    }
}

macro_rules! count {
    () => { 0usize };
    ($head:ident $($tail:ident)*) => { 1usize + count!($($tail)*) };
}

macro_rules! impl_param_set {
    ($($ty:ident => $idx:tt),+) => {
        impl<$($ty: FromStr + 'static),+> ParamSet for ($(Slot<$ty>,)+) {
            const ARITY: usize = count!($($ty)+);

            fn assign(&self, flag: &str, params: &[String]) -> Result<(), ParseError> {
                if params.len() != Self::ARITY {
                    return Err(ParseError::Arity {
                        name: flag.to_owned(),
                        expected: Self::ARITY,
                        actual: params.len(),
                    });
                }
                $(convert(&self.$idx, flag, &params[$idx])?;)+
                Ok(())
            }
        }
    };
}

impl_param_set!(A => 0);
impl_param_set!(A => 0, B => 1);
impl_param_set!(A => 0, B => 1, C => 2);
impl_param_set!(A => 0, B => 1, C => 2, D => 3);
impl_param_set!(A => 0, B => 1, C => 2, D => 3, E => 4);
impl_param_set!(A => 0, B => 1, C => 2, D => 3, E => 4, F => 5);
