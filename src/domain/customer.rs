use crate::common::money::Money;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub first_name: String,
    pub last_name: String,
    pub id: u32,
    /// Signed; settlement may drive it negative down to the credit floor.
    pub balance: Money,
}

impl Customer {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        id: u32,
        balance: Money,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            id,
            balance,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
