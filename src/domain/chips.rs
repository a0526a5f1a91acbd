use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// 100% в базисных пунктах.
pub const BPS_SCALE: u64 = 10_000;

/// Денежная сумма в минимальных единицах (сентаво).
/// Обёртка над u64, чтобы не путать с обычными числами.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Chips(pub u64);

impl Chips {
    pub const ZERO: Chips = Chips(0);

    pub fn new(amount: u64) -> Self {
        Chips(amount)
    }

    /// Целые единицы валюты → сентаво (`Chips::whole(10)` = 10.00).
    pub const fn whole(units: u64) -> Self {
        Chips(units * 100)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Безопасное вычитание, не даёт уйти в минус.
    pub fn saturating_sub(self, other: Chips) -> Chips {
        Chips(self.0.saturating_sub(other.0))
    }

    /// Умножение на целый коэффициент (выплата `amount × k`).
    pub fn times(self, k: u64) -> Chips {
        Chips(self.0.saturating_mul(k))
    }

    /// Доля в базисных пунктах, округлённая вниз.
    pub fn fraction_bps(self, bps: u32) -> Chips {
        let v = (self.0 as u128 * bps as u128) / BPS_SCALE as u128;
        Chips(v.min(u64::MAX as u128) as u64)
    }

    /// `floor(self × 2.5)` — выплата за блэкджек.
    pub fn times_two_and_half(self) -> Chips {
        Chips((self.0 as u128 * 5 / 2).min(u64::MAX as u128) as u64)
    }
}

impl fmt::Display for Chips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Add for Chips {
    type Output = Chips;

    fn add(self, rhs: Chips) -> Self::Output {
        Chips(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Chips {
    fn add_assign(&mut self, rhs: Chips) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Chips {
    type Output = Chips;

    fn sub(self, rhs: Chips) -> Self::Output {
        Chips(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Chips {
    fn sub_assign(&mut self, rhs: Chips) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl Sum for Chips {
    fn sum<I: Iterator<Item = Chips>>(iter: I) -> Self {
        iter.fold(Chips::ZERO, |acc, c| acc + c)
    }
}

impl<'a> Sum<&'a Chips> for Chips {
    fn sum<I: Iterator<Item = &'a Chips>>(iter: I) -> Self {
        iter.fold(Chips::ZERO, |acc, c| acc + *c)
    }
}
