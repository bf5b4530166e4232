//! Assertion helpers built on the structural comparator.
//!
//! The `check_*` functions return a [`AssertionFailure`]; the `assert_*`
//! functions and the [`assert_ref_eq!`](crate::assert_ref_eq) /
//! [`assert_len_eq!`](crate::assert_len_eq) macros panic with the formatted
//! report instead.
//!
//! ```
//! use reflect_assert::assert::{assert_lenient_eq, check_reflection_eq};
//! use reflect_assert::comparator::ModeSet;
//!
//! assert_lenient_eq(&vec![1, 2, 3], &vec![3, 2, 1]);
//!
//! let failure = check_reflection_eq(&vec![1, 2], &vec![1, 3], ModeSet::strict()).unwrap_err();
//! assert!(failure.to_string().contains("Field: <1> expected: <2> but was: <3>"));
//! ```

mod property;

pub use property::{resolve_property, PropertyPath, PropertyStep};

use crate::comparator::{Difference, ModeSet, ReflectionComparator};
use crate::config::AppConfig;
use crate::error::{ReflectionError, Result};
use crate::format::{DifferenceReport, ValueFormatter};
use crate::value::{Reflect, Value};
use thiserror::Error;

/// Why an assertion did not hold.
#[derive(Error, Debug)]
pub enum AssertionFailure {
    /// The values differ; `report` is the full failure text.
    #[error("{report}")]
    NotEqual {
        report: String,
        difference: Box<Difference>,
    },

    /// The comparison itself could not be carried out.
    #[error(transparent)]
    Error(#[from] ReflectionError),
}

impl AssertionFailure {
    /// The difference behind a failed equality, if that is what failed.
    #[must_use]
    pub fn difference(&self) -> Option<&Difference> {
        match self {
            Self::NotEqual { difference, .. } => Some(&**difference),
            Self::Error(_) => None,
        }
    }
}

/// Reusable assertion settings.
#[derive(Debug, Clone, Default)]
pub struct ReflectionAssert {
    modes: ModeSet,
    message: Option<String>,
    formatter: ValueFormatter,
}

impl ReflectionAssert {
    #[must_use]
    pub fn new(modes: ModeSet) -> Self {
        Self {
            modes,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn strict() -> Self {
        Self::new(ModeSet::strict())
    }

    #[must_use]
    pub fn lenient() -> Self {
        Self::new(ModeSet::lenient())
    }

    /// Settings taken from a loaded configuration.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            modes: config.comparison.mode_set(),
            message: None,
            formatter: config.format.formatter(),
        }
    }

    /// Like [`from_config`](Self::from_config) with the configured
    /// `comparison.lenient_modes` in place of `comparison.modes`.
    #[must_use]
    pub fn lenient_from_config(config: &AppConfig) -> Self {
        Self {
            modes: config.comparison.lenient_mode_set(),
            ..Self::from_config(config)
        }
    }

    /// Prefix failure reports with `message`.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub const fn with_formatter(mut self, formatter: ValueFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    #[must_use]
    pub const fn modes(&self) -> ModeSet {
        self.modes
    }

    /// Compare `expected` with `actual`.
    pub fn check<E, A>(&self, expected: &E, actual: &A) -> std::result::Result<(), AssertionFailure>
    where
        E: Reflect + ?Sized,
        A: Reflect + ?Sized,
    {
        self.check_values(self.message.as_deref(), &expected.reflect(), &actual.reflect())
    }

    /// Compare `expected` with the value of `property` on `actual`.
    pub fn check_property<E, A>(
        &self,
        property: &str,
        expected: &E,
        actual: &A,
    ) -> std::result::Result<(), AssertionFailure>
    where
        E: Reflect + ?Sized,
        A: Reflect + ?Sized,
    {
        let value = resolve_property(&actual.reflect(), property)?;
        let message = self.property_message(property);
        self.check_values(Some(&message), &expected.reflect(), &value)
    }

    /// Project `property` out of every element of `actual` and compare the
    /// resulting list with `expected`.
    pub fn check_property_all<E, A>(
        &self,
        property: &str,
        expected: &E,
        actual: &A,
    ) -> std::result::Result<(), AssertionFailure>
    where
        E: Reflect + ?Sized,
        A: Reflect + ?Sized,
    {
        let projected = project_property(&actual.reflect(), property)?;
        self.check_values(self.message.as_deref(), &expected.reflect(), &projected)
    }

    fn property_message(&self, property: &str) -> String {
        let line = format!("Incorrect value for property: {property}");
        match &self.message {
            Some(message) if !message.is_empty() => format!("{message}\n{line}"),
            _ => line,
        }
    }

    fn check_values(
        &self,
        message: Option<&str>,
        expected: &Value,
        actual: &Value,
    ) -> std::result::Result<(), AssertionFailure> {
        let comparator = ReflectionComparator::new(self.modes);
        match comparator.get_difference(expected, actual)? {
            None => Ok(()),
            Some(difference) => {
                let report = DifferenceReport::new(&difference)
                    .with_message(message)
                    .with_formatter(self.formatter)
                    .to_string();
                Err(AssertionFailure::NotEqual {
                    report,
                    difference: Box::new(difference),
                })
            }
        }
    }
}

fn project_property(actual: &Value, property: &str) -> Result<Value> {
    let path = PropertyPath::parse(property)?;
    match actual {
        Value::Seq(seq) => {
            let projected = seq
                .snapshot()?
                .iter()
                .map(|item| path.resolve(item))
                .collect::<Result<Vec<_>>>()?;
            Ok(Value::list(projected))
        }
        other => Err(ReflectionError::property(
            property,
            "projecting over a collection",
            crate::error::PropertyErrorKind::NotNavigable(other.type_name()),
        )),
    }
}

#[track_caller]
fn fail_on(result: std::result::Result<(), AssertionFailure>) {
    if let Err(failure) = result {
        panic!("{failure}");
    }
}

// ============================================================================
// Free functions
// ============================================================================

/// Compare under `modes`.
pub fn check_reflection_eq<E, A>(
    expected: &E,
    actual: &A,
    modes: ModeSet,
) -> std::result::Result<(), AssertionFailure>
where
    E: Reflect + ?Sized,
    A: Reflect + ?Sized,
{
    ReflectionAssert::new(modes).check(expected, actual)
}

/// Compare with lenient order and ignored defaults.
pub fn check_lenient_eq<E, A>(expected: &E, actual: &A) -> std::result::Result<(), AssertionFailure>
where
    E: Reflect + ?Sized,
    A: Reflect + ?Sized,
{
    ReflectionAssert::lenient().check(expected, actual)
}

/// Panics with the difference report unless equal under `modes`.
#[track_caller]
pub fn assert_reflection_eq<E, A>(expected: &E, actual: &A, modes: ModeSet)
where
    E: Reflect + ?Sized,
    A: Reflect + ?Sized,
{
    fail_on(check_reflection_eq(expected, actual, modes));
}

/// Panics unless equal with lenient order and ignored defaults.
#[track_caller]
pub fn assert_lenient_eq<E, A>(expected: &E, actual: &A)
where
    E: Reflect + ?Sized,
    A: Reflect + ?Sized,
{
    fail_on(check_lenient_eq(expected, actual));
}

#[track_caller]
pub fn assert_property_reflection_eq<E, A>(property: &str, expected: &E, actual: &A, modes: ModeSet)
where
    E: Reflect + ?Sized,
    A: Reflect + ?Sized,
{
    fail_on(ReflectionAssert::new(modes).check_property(property, expected, actual));
}

#[track_caller]
pub fn assert_property_lenient_eq<E, A>(property: &str, expected: &E, actual: &A)
where
    E: Reflect + ?Sized,
    A: Reflect + ?Sized,
{
    fail_on(ReflectionAssert::lenient().check_property(property, expected, actual));
}

#[track_caller]
pub fn assert_property_reflection_eq_all<E, A>(
    property: &str,
    expected: &E,
    actual: &A,
    modes: ModeSet,
) where
    E: Reflect + ?Sized,
    A: Reflect + ?Sized,
{
    fail_on(ReflectionAssert::new(modes).check_property_all(property, expected, actual));
}

#[track_caller]
pub fn assert_property_lenient_eq_all<E, A>(property: &str, expected: &E, actual: &A)
where
    E: Reflect + ?Sized,
    A: Reflect + ?Sized,
{
    fail_on(ReflectionAssert::lenient().check_property_all(property, expected, actual));
}

// ============================================================================
// Macros
// ============================================================================

/// Assert structural equality of two [`Reflect`](crate::value::Reflect) values.
///
/// ```
/// use reflect_assert::assert_ref_eq;
/// use reflect_assert::comparator::ComparatorMode;
///
/// assert_ref_eq!(vec![1, 2], vec![1, 2]);
/// assert_ref_eq!(vec![1, 2], vec![2, 1], ComparatorMode::LenientOrder);
/// ```
#[macro_export]
macro_rules! assert_ref_eq {
    ($expected:expr, $actual:expr $(,)?) => {
        $crate::assert::assert_reflection_eq(
            &$expected,
            &$actual,
            $crate::comparator::ModeSet::strict(),
        )
    };
    ($expected:expr, $actual:expr, $($mode:expr),+ $(,)?) => {
        $crate::assert::assert_reflection_eq(
            &$expected,
            &$actual,
            [$($mode),+].into_iter().collect::<$crate::comparator::ModeSet>(),
        )
    };
}

/// Assert equality with lenient order and ignored defaults.
#[macro_export]
macro_rules! assert_len_eq {
    ($expected:expr, $actual:expr $(,)?) => {
        $crate::assert::assert_lenient_eq(&$expected, &$actual)
    };
}
