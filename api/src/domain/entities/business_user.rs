//! Business user domain entity
//!
//! A company-level account that places orders and accrues referral cashback.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::validation::FieldErrors;

/// Referral code that qualifies a business user for cashback
pub const CASHBACK_REFERRAL_CODE: &str = "leafcoin";

/// Share of the order total credited back to a qualifying business user
pub const CASHBACK_RATE: Decimal = dec!(0.05);

/// Field error reported when a phone number is already registered
pub const DUPLICATE_PHONE: &str = "business user with this phone already exists.";

/// Money columns carry two decimal places
const MONEY_SCALE: u32 = 2;

/// Unique identifier for a business user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BusinessUserId(pub i32);

impl From<i32> for BusinessUserId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for BusinessUserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A company account identified by its phone number
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusinessUser {
    pub id: BusinessUserId,
    pub company_name: String,
    pub contact_person: String,
    /// Unique, used as the lookup key by the order workflow
    pub phone: String,
    /// Path or URL of an attached document
    pub uploaded_file: Option<String>,
    pub referral_code: Option<String>,
    /// Running cashback balance
    pub cashback_amount: Decimal,
}

impl BusinessUser {
    /// Whether this user's referral code earns cashback
    pub fn qualifies_for_cashback(&self) -> bool {
        self.referral_code.as_deref() == Some(CASHBACK_REFERRAL_CODE)
    }

    /// Cashback owed for an order of `order_total`, without touching the balance
    pub fn referral_cashback_for(&self, order_total: Decimal) -> Decimal {
        if !self.qualifies_for_cashback() {
            return Decimal::ZERO;
        }
        (order_total * CASHBACK_RATE)
            .round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven)
    }

    /// Apply the referral cashback rule for a newly created order.
    ///
    /// Credits the balance and returns the amount credited (zero when the
    /// referral code does not qualify). Callers persist the new balance in the
    /// same unit of work that persists the order.
    pub fn apply_referral_cashback(&mut self, order_total: Decimal) -> Decimal {
        let cashback = self.referral_cashback_for(order_total);
        if cashback > Decimal::ZERO {
            self.cashback_amount += cashback;
        }
        cashback
    }

    /// The balance must still fit its `NUMERIC(10, 2)` column
    pub fn check_cashback_balance(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.money("cashback_amount", self.cashback_amount);
        errors
    }
}

/// Data needed to create a business user
#[derive(Debug, Clone, Deserialize)]
pub struct NewBusinessUser {
    pub company_name: String,
    pub contact_person: String,
    pub phone: String,
    #[serde(default)]
    pub uploaded_file: Option<String>,
    #[serde(default)]
    pub referral_code: Option<String>,
}

impl NewBusinessUser {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require_text("company_name", &self.company_name, 255);
        errors.require_text("contact_person", &self.contact_person, 255);
        errors.phone("phone", &self.phone);
        if let Some(code) = &self.referral_code {
            errors.max_len("referral_code", code, 50);
        }
        errors
    }
}

/// Partial update of a business user; `None` leaves a field unchanged.
///
/// Has no cashback field: the balance only moves through orders.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BusinessUserChanges {
    pub company_name: Option<String>,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    #[serde(default, with = "double_option")]
    pub uploaded_file: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub referral_code: Option<Option<String>>,
}

impl BusinessUserChanges {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Some(name) = &self.company_name {
            errors.require_text("company_name", name, 255);
        }
        if let Some(contact) = &self.contact_person {
            errors.require_text("contact_person", contact, 255);
        }
        if let Some(phone) = &self.phone {
            errors.phone("phone", phone);
        }
        if let Some(Some(code)) = &self.referral_code {
            errors.max_len("referral_code", code, 50);
        }
        errors
    }

    /// Apply these changes to an existing record
    pub fn apply_to(&self, user: &mut BusinessUser) {
        if let Some(name) = &self.company_name {
            user.company_name = name.clone();
        }
        if let Some(contact) = &self.contact_person {
            user.contact_person = contact.clone();
        }
        if let Some(phone) = &self.phone {
            user.phone = phone.clone();
        }
        if let Some(file) = &self.uploaded_file {
            user.uploaded_file = file.clone();
        }
        if let Some(code) = &self.referral_code {
            user.referral_code = code.clone();
        }
    }
}

impl From<NewBusinessUser> for BusinessUserChanges {
    /// A full replacement (PUT) expressed as changes to every writable field
    fn from(user: NewBusinessUser) -> Self {
        Self {
            company_name: Some(user.company_name),
            contact_person: Some(user.contact_person),
            phone: Some(user.phone),
            uploaded_file: Some(user.uploaded_file),
            referral_code: Some(user.referral_code),
        }
    }
}

/// Distinguishes an absent field from an explicit `null` in partial updates
pub(crate) mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
