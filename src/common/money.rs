use bigdecimal::{BigDecimal, ParseBigDecimalError, ToPrimitive};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Number of minor units in one currency unit (4 decimal places).
const SCALE: i64 = 10_000;

/// A fixed-point monetary amount stored as a count of 1/10 000 currency units.
///
/// Balances are summed over arbitrarily long operation histories, so the value is kept
/// as an integer and never touches binary floating point. Text is parsed through
/// `BigDecimal` and rounded to 4 decimal places.
///
/// # Examples
/// ```
/// use bank_ledger::common::money::Money;
///
/// let amount: Money = "12.5".parse().unwrap();
/// assert_eq!(amount.minor_units(), 125_000);
/// assert_eq!(amount.to_string(), "12.5000");
/// assert_eq!((-amount).to_string(), "-12.5000");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub fn from_minor_units(units: i64) -> Self {
        Self(units)
    }

    /// Whole currency units, e.g. `Money::units(600)` is 600.0000.
    ///
    /// # Panics
    ///
    /// Panics when `value` is beyond `i64::MAX / 10_000` in magnitude. Use
    /// [`Money::checked_units`] for values that are not known to be small.
    pub fn units(value: i64) -> Self {
        match Self::checked_units(value) {
            Some(money) => money,
            None => panic!("{value} units overflow the minor-unit range"),
        }
    }

    pub fn checked_units(value: i64) -> Option<Self> {
        value.checked_mul(SCALE).map(Self)
    }

    pub fn zero() -> Self {
        Money(0)
    }

    pub fn minor_units(&self) -> i64 {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// `self + rhs`, or `None` if the sum leaves the representable range.
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    pub fn to_decimal(&self) -> BigDecimal {
        BigDecimal::from(self.0) / BigDecimal::from(SCALE)
    }

    pub fn to_string_4dp(&self) -> String {
        format!("{:.4}", self.to_decimal())
    }
}

impl std::str::FromStr for Money {
    type Err = ParseBigDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.is_empty() {
            return Err(ParseBigDecimalError::Other("empty amount".into()));
        }

        let bd: BigDecimal = t.parse()?;
        let scaled = (bd * BigDecimal::from(SCALE)).round(0);
        let value = scaled
            .to_i64()
            .ok_or_else(|| ParseBigDecimalError::Other("amount overflow".into()))?;

        Ok(Money(value))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_4dp())
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Money;
    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        *self = *self - rhs;
    }
}
