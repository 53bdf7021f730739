use serde::{Deserialize, Serialize};

use crate::domain::types::{CustomerEmail, CustomerId, CustomerName, PhoneNumber};

/// Renter record as supplied by the customer directory.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(rename = "_id")]
    pub id: CustomerId,
    pub name: CustomerName,
    #[serde(default)]
    pub email: Option<CustomerEmail>,
    #[serde(default)]
    pub phone: Option<PhoneNumber>,
}

impl Customer {
    #[must_use]
    pub fn new(id: CustomerId, name: CustomerName) -> Self {
        Self {
            id,
            name,
            email: None,
            phone: None,
        }
    }

    #[must_use]
    pub fn with_email(mut self, email: CustomerEmail) -> Self {
        self.email = Some(email);
        self
    }

    #[must_use]
    pub fn with_phone(mut self, phone: PhoneNumber) -> Self {
        self.phone = Some(phone);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_directory_entry() {
        let json = r#"{"_id": "c1", "name": "Jane Roe", "email": "JANE@example.com", "phone": "+1 415 555 2671"}"#;

        let customer: Customer = serde_json::from_str(json).expect("valid customer");

        let expected = Customer::new(
            CustomerId::new("c1").unwrap(),
            CustomerName::new("Jane Roe").unwrap(),
        )
        .with_email(CustomerEmail::new("jane@example.com").unwrap())
        .with_phone(PhoneNumber::new("+14155552671").unwrap());
        assert_eq!(customer, expected);
    }

    #[test]
    fn contact_details_are_optional() {
        let customer: Customer =
            serde_json::from_str(r#"{"_id": "c2", "name": "Sam Poe"}"#).expect("valid customer");

        assert_eq!(customer.email, None);
        assert_eq!(customer.phone, None);
    }
}
