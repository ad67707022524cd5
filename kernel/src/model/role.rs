use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    Superadmin,
    Receptionist,
    StockManager,
    Guest,
}

impl Role {
    pub fn is_staff(self) -> bool {
        !matches!(self, Role::Guest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_use_snake_case_names() {
        assert_eq!(Role::Superadmin.to_string(), "superadmin");
        assert_eq!(Role::StockManager.as_ref(), "stock_manager");
        assert_eq!("receptionist".parse::<Role>().unwrap(), Role::Receptionist);
        assert_eq!(
            serde_json::to_value(Role::StockManager).unwrap(),
            serde_json::json!("stock_manager")
        );
    }
}
