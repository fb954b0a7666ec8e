#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Employee,
    Warehouse,
    Unknown,
}

impl Role {
    /// Roles are encoded in the first character of the username in the
    /// staff records: `1` admin, `2` employee, `3` warehouse.
    pub fn from_username(username: &str) -> Self {
        match username.chars().next() {
            Some('1') => Role::Admin,
            Some('2') => Role::Employee,
            Some('3') => Role::Warehouse,
            _ => Role::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Staff {
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl Staff {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        let username = username.into();
        let role = Role::from_username(&username);
        Self {
            username,
            password: password.into(),
            role,
        }
    }
}
